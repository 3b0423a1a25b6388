// Local-directory blob store for rendered trend charts.
// Access goes through signed, expiring URLs: /artifacts/<name>?expires=<unix>&signature=<hex>.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tracing::instrument;

use crate::config::ArtifactsConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("invalid artifact name")]
    InvalidName,
    #[error("access URL expired")]
    Expired,
    #[error("signature mismatch")]
    BadSignature,
    #[error("URL signing is not configured")]
    NoSigningKey,
}

pub struct ArtifactRepo {
    root: PathBuf,
    signing_key: Option<String>,
    url_ttl_secs: i64,
    public_base_url: String,
}

impl ArtifactRepo {
    pub fn new(config: &ArtifactsConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
            signing_key: config.signing_key.clone().filter(|k| !k.is_empty()),
            url_ttl_secs: i64::try_from(config.url_ttl_secs).unwrap_or(i64::MAX / 2),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Names of stored artifacts starting with `prefix`, in directory order.
    /// A missing root directory is an empty store, not an error.
    #[instrument(skip(self), fields(repo = "artifacts", operation = "list_names"))]
    pub async fn list_names(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "listing {}: {}",
                    self.root.display(),
                    e
                ));
            }
        };
        let mut out = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str()
                && name.starts_with(prefix)
            {
                out.push(name.to_string());
            }
        }
        Ok(out)
    }

    /// Mints an access URL for `name` valid until `now + url_ttl`. Pure: the same
    /// name and `now` always give the same URL.
    pub fn signed_url(&self, name: &str, now: DateTime<Utc>) -> Result<String, AccessError> {
        if !is_valid_name(name) {
            return Err(AccessError::InvalidName);
        }
        let key = self.signing_key.as_deref().ok_or(AccessError::NoSigningKey)?;
        let expires = now.timestamp().saturating_add(self.url_ttl_secs);
        let signature = sign(key, name, expires);
        Ok(format!(
            "{}/artifacts/{}?expires={}&signature={}",
            self.public_base_url, name, expires, signature
        ))
    }

    pub fn verify(
        &self,
        name: &str,
        expires: i64,
        signature: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AccessError> {
        if !is_valid_name(name) {
            return Err(AccessError::InvalidName);
        }
        let key = self.signing_key.as_deref().ok_or(AccessError::NoSigningKey)?;
        if now.timestamp() > expires {
            return Err(AccessError::Expired);
        }
        if sign(key, name, expires) != signature.to_ascii_lowercase() {
            return Err(AccessError::BadSignature);
        }
        Ok(())
    }

    /// Artifact bytes, or None when it no longer exists.
    #[instrument(skip(self), fields(repo = "artifacts", operation = "read"))]
    pub async fn read(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        anyhow::ensure!(is_valid_name(name), "invalid artifact name {:?}", name);
        match tokio::fs::read(self.root.join(name)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Flat file names only: no separators, no dot-dot, URL-safe characters.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn sign(key: &str, name: &str, expires: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update([0u8]);
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(expires.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
