//! On-disk form of a resolver's output: the root module plus the dependency
//! edges reported for each resolved module.
//!
//! ```toml
//! root = "com.example:app:1.0"
//!
//! [[module]]
//! id = "com.example:app:1.0"
//! dependencies = [
//!   { requested = "org.a:a:1.+", selected = "org.a:a:1.2" },
//!   { requested = "org.b:b:2.0", failure = "Could not find org.b:b:2.0" },
//! ]
//!
//! [[module]]
//! id = "org.a:a:1.2"
//! ```
//!
//! Each `[[module]]` entry corresponds to one report from the resolver; an id
//! may appear more than once and its edges merge.

use std::path::Path;

use modgraph_util::errors::{ModgraphError, ModgraphResult};
use serde::{Deserialize, Serialize};

use crate::dependency::DependencyResult;
use crate::id::{ModuleSelector, ModuleVersionId};

/// A complete resolution record as written by the resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub root: String,
    #[serde(default, rename = "module")]
    pub modules: Vec<RecordedModule>,
}

/// One report of a module's outgoing edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedModule {
    pub id: String,
    #[serde(default)]
    pub dependencies: Vec<RecordedDependency>,
}

/// One edge as written in the file. Exactly one of `selected` / `failure`
/// must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedDependency {
    pub requested: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// A validated module report, ready to feed into an edge collector.
#[derive(Debug, Clone)]
pub struct ModuleReport {
    pub id: ModuleVersionId,
    pub dependencies: Vec<DependencyResult>,
}

impl ResolutionRecord {
    /// Load a record file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> ModgraphResult<Self> {
        let content = modgraph_util::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> ModgraphResult<Self> {
        toml::from_str(content).map_err(|e| {
            ModgraphError::Record {
                message: format!("Failed to parse TOML record: {e}"),
            }
            .into()
        })
    }

    pub fn from_json(content: &str) -> ModgraphResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            ModgraphError::Record {
                message: format!("Failed to parse JSON record: {e}"),
            }
            .into()
        })
    }

    /// The parsed root module id.
    pub fn root_id(&self) -> Result<ModuleVersionId, ModgraphError> {
        parse_id(&self.root, "root")
    }

    /// Validate every entry, in file order.
    pub fn reports(&self) -> Result<Vec<ModuleReport>, ModgraphError> {
        self.modules.iter().map(RecordedModule::to_report).collect()
    }
}

impl RecordedModule {
    fn to_report(&self) -> Result<ModuleReport, ModgraphError> {
        let id = parse_id(&self.id, "module")?;
        let dependencies = self
            .dependencies
            .iter()
            .map(|dep| dep.to_result(&id))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::trace!("record entry {id}: {} dependencies", dependencies.len());
        Ok(ModuleReport { id, dependencies })
    }
}

impl RecordedDependency {
    fn to_result(&self, owner: &ModuleVersionId) -> Result<DependencyResult, ModgraphError> {
        let requested =
            ModuleSelector::parse(&self.requested).ok_or_else(|| ModgraphError::Record {
                message: format!(
                    "module {owner}: requested `{}` is not a group:name:version coordinate",
                    self.requested
                ),
            })?;
        match (&self.selected, &self.failure) {
            (Some(selected), None) => {
                let selected =
                    ModuleVersionId::parse(selected).ok_or_else(|| ModgraphError::Record {
                        message: format!(
                            "module {owner}: selected `{selected}` is not a group:name:version coordinate"
                        ),
                    })?;
                Ok(DependencyResult::resolved(requested, selected))
            }
            (None, Some(failure)) => Ok(DependencyResult::unresolved(requested, failure.clone())),
            (Some(_), Some(_)) => Err(ModgraphError::Record {
                message: format!(
                    "module {owner}: dependency `{requested}` has both `selected` and `failure`"
                ),
            }),
            (None, None) => Err(ModgraphError::Record {
                message: format!(
                    "module {owner}: dependency `{requested}` has neither `selected` nor `failure`"
                ),
            }),
        }
    }
}

fn parse_id(s: &str, field: &str) -> Result<ModuleVersionId, ModgraphError> {
    ModuleVersionId::parse(s).ok_or_else(|| ModgraphError::Record {
        message: format!("{field} `{s}` is not a group:name:version coordinate"),
    })
}
