//! Module coordinates: the selected version identity and the requested selector.

use std::fmt;

/// Identity of one resolved module version (`group:name:version`).
///
/// This is the sole key for node identity in an assembled result graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleVersionId {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleVersionId {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `"group:name:version"`. Every part must be non-empty.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, name, version) = split_coordinate(s)?;
        Some(Self::new(group, name, version))
    }

    /// `group:name` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl fmt::Display for ModuleVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// What a dependency declaration asked for, before conflict resolution.
///
/// `version` is the raw constraint as declared (`1.+`, `[1.0,2.0)`, `2.3.0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleSelector {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl ModuleSelector {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `"group:name:version-constraint"`.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, name, version) = split_coordinate(s)?;
        Some(Self::new(group, name, version))
    }

    /// Whether `id` is the same module (ignoring version) as this selector.
    pub fn matches_module(&self, id: &ModuleVersionId) -> bool {
        self.group == id.group && self.name == id.name
    }
}

impl fmt::Display for ModuleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

impl From<&ModuleVersionId> for ModuleSelector {
    fn from(id: &ModuleVersionId) -> Self {
        Self::new(id.group.clone(), id.name.clone(), id.version.clone())
    }
}

fn split_coordinate(s: &str) -> Option<(&str, &str, &str)> {
    let mut parts = s.split(':');
    let group = parts.next()?;
    let name = parts.next()?;
    let version = parts.next()?;
    if parts.next().is_some() || group.is_empty() || name.is_empty() || version.is_empty() {
        return None;
    }
    Some((group, name, version))
}
