//! Public signing keys for Firebase ID tokens.
//!
//! Google publishes the `securetoken` keys as a JWK set with a
//! `Cache-Control: max-age` header. Keys are cached for that long and
//! refetched on the first lookup after expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::DecodingKey;
use moka::future::Cache;
use moka::Expiry;
use reqwest::header::CACHE_CONTROL;
use tracing::{debug, info};

use crate::AppError;

/// Google's JWK endpoint for Firebase Auth ID token signing keys.
pub const GOOGLE_SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Cache lifetime when the response carries no usable `max-age`.
pub const DEFAULT_KEY_TTL: Duration = Duration::from_secs(60 * 60);

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Looks up decoding keys by `kid`.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// `Ok(None)` means the key set was fetched but has no such `kid`.
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AppError>;
}

/// Decoding keys indexed by `kid`, with the lifetime the publisher allowed.
#[derive(Clone)]
pub struct KeySet {
    keys: HashMap<String, DecodingKey>,
    max_age: Duration,
}

impl KeySet {
    /// Build from a JWK set. Keys without a `kid`, or that cannot be turned
    /// into a decoding key, are skipped.
    pub fn from_jwk_set(set: &JwkSet, max_age: Duration) -> Self {
        let keys = set
            .keys
            .iter()
            .filter_map(|jwk| {
                let kid = jwk.common.key_id.clone()?;
                match DecodingKey::from_jwk(jwk) {
                    Ok(key) => Some((kid, key)),
                    Err(e) => {
                        debug!(kid = %kid, error = %e, "skipping unusable JWK");
                        None
                    }
                }
            })
            .collect();

        Self { keys, max_age }
    }

    pub fn get(&self, kid: &str) -> Option<&DecodingKey> {
        self.keys.get(kid)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

/// Parse `max-age=<secs>` out of a `Cache-Control` header value.
pub fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .map(str::trim)
        .find_map(|directive| {
            let (name, value) = directive.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("max-age") {
                value.trim().trim_matches('"').parse::<u64>().ok()
            } else {
                None
            }
        })
        .map(Duration::from_secs)
}

struct KeySetExpiry;

impl Expiry<&'static str, Arc<KeySet>> for KeySetExpiry {
    fn expire_after_create(
        &self,
        _key: &&'static str,
        value: &Arc<KeySet>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.max_age)
    }
}

const KEY_SET_ENTRY: &str = "securetoken";

/// Fetches and caches Google's published signing keys over HTTPS.
pub struct GoogleKeySource {
    client: reqwest::Client,
    url: String,
    cache: Cache<&'static str, Arc<KeySet>>,
}

impl GoogleKeySource {
    pub fn new() -> Result<Self, AppError> {
        Self::with_url(GOOGLE_SECURETOKEN_JWKS_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        let cache = Cache::builder()
            .max_capacity(1)
            .expire_after(KeySetExpiry)
            .build();

        Ok(Self {
            client,
            url: url.into(),
            cache,
        })
    }

    async fn fetch(&self) -> Result<KeySet, AppError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::provider_unavailable(format!("fetching signing keys: {e}")))?;

        let max_age = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| AppError::provider_unavailable(format!("decoding signing keys: {e}")))?;

        let keys = KeySet::from_jwk_set(&set, max_age);
        info!(
            key_count = keys.len(),
            max_age_secs = max_age.as_secs(),
            "fetched identity provider signing keys"
        );
        Ok(keys)
    }

    async fn current(&self) -> Result<Arc<KeySet>, AppError> {
        self.cache
            .try_get_with(KEY_SET_ENTRY, async { self.fetch().await.map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())
    }
}

#[async_trait]
impl KeySource for GoogleKeySource {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AppError> {
        let keys = self.current().await?;
        Ok(keys.get(kid).cloned())
    }
}

/// Fixed key set, for tests and offline environments.
pub struct StaticKeySource {
    keys: KeySet,
}

impl StaticKeySource {
    pub fn new(keys: KeySet) -> Self {
        Self { keys }
    }

    /// Parse a JWK set document.
    pub fn from_jwks_json(json: &str) -> Result<Self, AppError> {
        let set: JwkSet = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("invalid JWK set: {e}")))?;
        Ok(Self::new(KeySet::from_jwk_set(&set, DEFAULT_KEY_TTL)))
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn decoding_key(&self, kid: &str) -> Result<Option<DecodingKey>, AppError> {
        Ok(self.keys.get(kid).cloned())
    }
}
