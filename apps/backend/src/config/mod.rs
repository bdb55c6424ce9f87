//! Process configuration, read once at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `FIREBASE_SERVICE_ACCOUNT_JSON` | unset; inline key file contents, wins over the path |
//! | `FIREBASE_SERVICE_ACCOUNT_PATH` | `./firebase-service-account.json` |
//! | `FIREBASE_PROJECT_ID` | project id from the key file |
//! | `AUTH_SHARED_SECRET` | unset; enables HS256 tokens for local development |
//! | `CORS_ALLOWED_ORIGINS` | [`origins::DEFAULT_ALLOWED_ORIGINS`] |
//! | `APP_VERSION` | crate version |
//! | `BODY_LIMIT_BYTES` | 5 MiB |

pub mod credentials;
pub mod origins;

use std::path::PathBuf;

pub use credentials::ServiceAccount;
pub use origins::OriginAllowlist;

use crate::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SERVICE_ACCOUNT_PATH: &str = "./firebase-service-account.json";
pub const DEFAULT_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Which identity provider verifies bearer tokens.
#[derive(Clone, PartialEq, Eq)]
pub enum IdentityProviderConfig {
    Firebase { project_id: String },
    SharedSecret { secret: Vec<u8> },
    /// Credentials absent or unusable; protected routes answer 401.
    Disabled { reason: String },
}

impl std::fmt::Debug for IdentityProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firebase { project_id } => f
                .debug_struct("Firebase")
                .field("project_id", project_id)
                .finish(),
            Self::SharedSecret { .. } => f.write_str("SharedSecret"),
            Self::Disabled { reason } => {
                f.debug_struct("Disabled").field("reason", reason).finish()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub identity: IdentityProviderConfig,
    pub allowed_origins: OriginAllowlist,
    /// Reported by `/health`
    pub version: String,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Malformed `PORT` or `BODY_LIMIT_BYTES` is an error. Missing or broken
    /// credentials are not: they yield [`IdentityProviderConfig::Disabled`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a valid port number, got '{raw}'")))?,
            None => DEFAULT_PORT,
        };

        let body_limit = match var("BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::config(format!("BODY_LIMIT_BYTES must be a positive integer, got '{raw}'"))
                })?,
            None => DEFAULT_BODY_LIMIT,
        };

        let allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .and_then(|raw| OriginAllowlist::from_csv(&raw))
            .unwrap_or_else(OriginAllowlist::defaults);

        let version = var("APP_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

        Ok(Self {
            host,
            port,
            identity: resolve_identity(&var),
            allowed_origins,
            version,
            body_limit,
        })
    }
}

fn resolve_identity<F>(var: &F) -> IdentityProviderConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret) = var("AUTH_SHARED_SECRET") {
        return IdentityProviderConfig::SharedSecret {
            secret: secret.into_bytes(),
        };
    }

    let project_override = var("FIREBASE_PROJECT_ID");

    let loaded = match var("FIREBASE_SERVICE_ACCOUNT_JSON") {
        Some(inline) => ServiceAccount::from_json(&inline).map(Some),
        None => {
            let path = var("FIREBASE_SERVICE_ACCOUNT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICE_ACCOUNT_PATH));
            ServiceAccount::from_file(&path).map(|found| {
                if found.is_none() && project_override.is_none() {
                    tracing::debug!(path = %path.display(), "service account file not found");
                }
                found
            })
        }
    };

    match (loaded, project_override) {
        (_, Some(project_id)) => IdentityProviderConfig::Firebase { project_id },
        (Ok(Some(account)), None) => IdentityProviderConfig::Firebase {
            project_id: account.project_id,
        },
        (Ok(None), None) => IdentityProviderConfig::Disabled {
            reason: "service account credentials not found".to_string(),
        },
        (Err(e), None) => IdentityProviderConfig::Disabled {
            reason: e.to_string(),
        },
    }
}
