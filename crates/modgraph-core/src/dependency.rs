//! Dependency edge records reported by the resolver for one source module.

use std::fmt;

use crate::id::{ModuleSelector, ModuleVersionId};

/// One dependency edge of a source module.
///
/// Equality is structural: two records are the same edge when they were
/// requested with the same selector and had the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencyResult {
    /// Conflict resolution picked `selected` for this declaration.
    Resolved {
        requested: ModuleSelector,
        selected: ModuleVersionId,
    },
    /// The declaration could not be satisfied. There is no target module.
    Unresolved {
        requested: ModuleSelector,
        failure: String,
    },
}

impl DependencyResult {
    pub fn resolved(requested: ModuleSelector, selected: ModuleVersionId) -> Self {
        Self::Resolved {
            requested,
            selected,
        }
    }

    pub fn unresolved(requested: ModuleSelector, failure: impl Into<String>) -> Self {
        Self::Unresolved {
            requested,
            failure: failure.into(),
        }
    }

    /// Shorthand for an edge that selected exactly what it asked for.
    pub fn to(selected: ModuleVersionId) -> Self {
        Self::Resolved {
            requested: ModuleSelector::from(&selected),
            selected,
        }
    }

    pub fn requested(&self) -> &ModuleSelector {
        match self {
            Self::Resolved { requested, .. } | Self::Unresolved { requested, .. } => requested,
        }
    }

    /// The target module, if the edge resolved.
    pub fn selected(&self) -> Option<&ModuleVersionId> {
        match self {
            Self::Resolved { selected, .. } => Some(selected),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Resolved { .. } => None,
            Self::Unresolved { failure, .. } => Some(failure),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

impl fmt::Display for DependencyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved {
                requested,
                selected,
            } => {
                if requested.matches_module(selected) && requested.version == selected.version {
                    write!(f, "{selected}")
                } else if requested.matches_module(selected) {
                    write!(f, "{requested} -> {}", selected.version)
                } else {
                    write!(f, "{requested} -> {selected}")
                }
            }
            Self::Unresolved { requested, failure } => {
                write!(f, "{requested} FAILED ({failure})")
            }
        }
    }
}
