//! Remote mirror of the plant collection
//!
//! The remote holds whole-collection snapshots; there is no record-level
//! protocol. Connectivity failures surface as `Error::Offline`, anything
//! else the remote does wrong as `Error::Transport`.

use std::sync::Mutex;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::Plant;

/// Trait for the remote copy of the collection
#[allow(async_fn_in_trait)]
pub trait RemoteMirror {
    /// Download the remote snapshot
    async fn download(&self) -> Result<Vec<Plant>>;

    /// Replace the remote snapshot
    async fn upload(&self, plants: &[Plant]) -> Result<()>;
}

/// `RemoteMirror` over an HTTP snapshot endpoint
#[derive(Clone)]
pub struct HttpRemoteMirror {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRemoteMirror {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        Ok(Self {
            endpoint,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/collection", self.endpoint)
    }
}

impl RemoteMirror for HttpRemoteMirror {
    async fn download(&self) -> Result<Vec<Plant>> {
        let response = self.client.get(self.collection_url()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(parse_api_error(status, &body)));
        }

        Ok(response.json::<Vec<Plant>>().await?)
    }

    async fn upload(&self, plants: &[Plant]) -> Result<()> {
        let response = self
            .client
            .put(self.collection_url())
            .json(plants)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(parse_api_error(status, &body)));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = raw.trim().to_string();
    if endpoint.is_empty() {
        return Err(Error::InvalidInput(
            "endpoint must not be empty".to_string(),
        ));
    }
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(
            "endpoint must include http:// or https://".to_string(),
        ))
    }
}

/// In-memory `RemoteMirror` (useful for testing)
#[derive(Default)]
pub struct MemoryRemoteMirror {
    snapshot: Mutex<Vec<Plant>>,
    /// Simulate absent connectivity
    offline: Mutex<bool>,
    /// Simulate a reachable remote that fails on upload
    fail_uploads: Mutex<bool>,
}

impl MemoryRemoteMirror {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the mirror with a remote snapshot
    #[must_use]
    pub fn with_snapshot(plants: Vec<Plant>) -> Self {
        let mirror = Self::new();
        *mirror.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = plants;
        mirror
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap_or_else(|e| e.into_inner()) = offline;
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        *self.fail_uploads.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Current remote snapshot, for assertions
    #[must_use]
    pub fn snapshot(&self) -> Vec<Plant> {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn check_online(&self) -> Result<()> {
        if *self.offline.lock().unwrap_or_else(|e| e.into_inner()) {
            Err(Error::Offline)
        } else {
            Ok(())
        }
    }
}

impl RemoteMirror for MemoryRemoteMirror {
    async fn download(&self) -> Result<Vec<Plant>> {
        self.check_online()?;
        Ok(self.snapshot())
    }

    async fn upload(&self, plants: &[Plant]) -> Result<()> {
        self.check_online()?;
        if *self.fail_uploads.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(Error::Transport("simulated upload failure".to_string()));
        }
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = plants.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_endpoint_rejects_invalid_values() {
        assert!(normalize_endpoint(String::new()).is_err());
        assert!(normalize_endpoint("api.example.com".to_string()).is_err());
    }

    #[test]
    fn normalize_endpoint_trims_trailing_slash() {
        let mirror = HttpRemoteMirror::new("https://api.example.com/sync/").unwrap();
        assert_eq!(
            mirror.collection_url(),
            "https://api.example.com/sync/collection"
        );
    }

    #[test]
    fn parse_api_error_prefers_structured_message() {
        let message = parse_api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "snapshot rejected"}"#,
        );
        assert_eq!(message, "snapshot rejected (500)");

        let fallback = parse_api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(fallback, "HTTP 502");
    }

    #[tokio::test]
    async fn memory_mirror_round_trip() {
        let mirror = MemoryRemoteMirror::new();
        let plants = vec![Plant::new("Monstera")];

        mirror.upload(&plants).await.unwrap();
        assert_eq!(mirror.download().await.unwrap(), plants);
    }

    #[tokio::test]
    async fn memory_mirror_offline_surfaces_offline() {
        let mirror = MemoryRemoteMirror::new();
        mirror.set_offline(true);
        assert!(matches!(mirror.download().await, Err(Error::Offline)));
        assert!(matches!(mirror.upload(&[]).await, Err(Error::Offline)));
    }
}
