use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Convert a value returned by a resource wrapper into a model.
///
/// ```
/// use asana_client::models::{decode, SectionCompact};
///
/// let value = serde_json::json!([{ "gid": "12", "name": "Backlog" }]);
/// let sections: Vec<SectionCompact> = decode(value).unwrap();
/// assert_eq!(sections[0].name, "Backlog");
/// ```
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub gid: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The compact record returned when listing sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCompact {
    pub gid: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// The full record returned by create, get and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub gid: String,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
}

impl From<Section> for SectionCompact {
    fn from(section: Section) -> Self {
        Self {
            gid: section.gid,
            resource_type: section.resource_type,
            name: section.name,
        }
    }
}
