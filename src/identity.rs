//! Device identity recorded as `created_by` on every new session.
//!
//! Resolved once in `run()` and passed down by value.

use crate::errors::AppResult;
use std::fmt;
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Read the id persisted at `path`, or create and persist a new one.
    pub fn resolve(path: &Path) -> AppResult<Self> {
        if let Ok(content) = fs::read_to_string(path) {
            let id = content.trim();
            if !id.is_empty() {
                return Ok(Self(id.to_string()));
            }
        }

        let id = Uuid::new_v4().to_string();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
