use modgraph_util::errors::ModgraphError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = ModgraphError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_record_error_display() {
    let err = ModgraphError::Record {
        message: "module `a:b` has no version".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid resolution record: module `a:b` has no version"
    );
}

#[test]
fn test_config_error_display() {
    let err = ModgraphError::Config {
        message: "bad syntax".to_string(),
    };
    assert_eq!(err.to_string(), "Config error: bad syntax");
}
