//! Typed builders for section request parameters.
//!
//! Each builder emits only the fields that are set, so an update never sends
//! values the caller did not mean to change. Nothing here checks combinations
//! such as `before_section` together with `after_section`; the service does.

use serde_json::Value;

use crate::transport::Params;

fn put(params: &mut Params, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        params.insert(key.to_string(), Value::String(v.clone()));
    }
}

/// Parameters for creating a section.
#[derive(Debug, Clone, Default)]
pub struct CreateSectionParams {
    pub name: String,
    /// Place the new section before this section (board views).
    pub insert_before: Option<String>,
    /// Place the new section after this section (board views).
    pub insert_after: Option<String>,
}

impl CreateSectionParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("name".into(), Value::String(self.name.clone()));
        put(&mut params, "insert_before", &self.insert_before);
        put(&mut params, "insert_after", &self.insert_after);
        params
    }
}

/// Parameters for updating an existing section.
#[derive(Debug, Clone, Default)]
pub struct UpdateSectionParams {
    pub name: Option<String>,
}

impl UpdateSectionParams {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        put(&mut params, "name", &self.name);
        params
    }
}

/// Parameters for moving a section within a board view.
#[derive(Debug, Clone, Default)]
pub struct InsertSectionParams {
    /// The section to move.
    pub section: String,
    pub before_section: Option<String>,
    pub after_section: Option<String>,
}

impl InsertSectionParams {
    pub fn before(section: impl Into<String>, before_section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            before_section: Some(before_section.into()),
            after_section: None,
        }
    }

    pub fn after(section: impl Into<String>, after_section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            before_section: None,
            after_section: Some(after_section.into()),
        }
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("section".into(), Value::String(self.section.clone()));
        put(&mut params, "before_section", &self.before_section);
        put(&mut params, "after_section", &self.after_section);
        params
    }
}
