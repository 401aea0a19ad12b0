use modgraph_util::progress::{format_status, StatusKind};

#[test]
fn test_status_label_is_right_aligned() {
    console::set_colors_enabled(false);
    assert_eq!(
        format_status(StatusKind::Done, "Assembled", "3 modules"),
        "   Assembled 3 modules"
    );
    assert_eq!(
        format_status(StatusKind::Warning, "Unresolved", "g:a:1"),
        "  Unresolved g:a:1"
    );
}

#[test]
fn test_long_label_is_not_truncated() {
    console::set_colors_enabled(false);
    assert_eq!(
        format_status(StatusKind::Done, "Reassembling", "done"),
        "Reassembling done"
    );
}
