//! Firebase service-account credentials.
//!
//! Only the project id is needed to verify ID tokens; the private key in the
//! credential file is never read into memory.

use std::path::Path;

use serde::Deserialize;

use crate::AppError;

/// The fields of a Google service-account key file this service uses.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub client_email: Option<String>,
}

impl ServiceAccount {
    /// Parse key file contents.
    pub fn from_json(contents: &str) -> Result<Self, AppError> {
        let account: ServiceAccount = serde_json::from_str(contents)
            .map_err(|e| AppError::config(format!("invalid service account JSON: {e}")))?;

        if let Some(kind) = account.account_type.as_deref() {
            if kind != "service_account" {
                return Err(AppError::config(format!(
                    "credential type is '{kind}', expected 'service_account'"
                )));
            }
        }
        if account.project_id.trim().is_empty() {
            return Err(AppError::config("service account has an empty project_id"));
        }

        Ok(account)
    }

    /// Load a key file. `Ok(None)` when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, AppError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("reading {}: {e}", path.display()))
        })?;
        Self::from_json(&contents).map(Some)
    }
}
