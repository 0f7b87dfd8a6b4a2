//! HTTP client for the wall's `/api/images` endpoint.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use canvas::wall::WallImage;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("wall request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wall endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("wall entry {index} is not a valid image: {source}")]
    Malformed { index: usize, source: serde_json::Error },
}

#[derive(Serialize)]
struct SaveBody<'a> {
    images: &'a [WallImage],
}

#[derive(Deserialize)]
struct LoadBody {
    #[serde(default)]
    images: Vec<Value>,
}

pub struct RemoteWall {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteWall {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/images", base_url.trim_end_matches('/')),
        }
    }

    /// Fetch the collection for editing. Unknown keys ride along in each
    /// image's `extra`; an entry that is not a valid image fails the whole
    /// fetch, since saving without it would delete it from the server.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx responses, and malformed entries.
    pub async fn fetch(&self) -> Result<Vec<WallImage>, TransportError> {
        self.fetch_raw()
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value(raw).map_err(|source| TransportError::Malformed { index, source })
            })
            .collect()
    }

    /// Fetch for display, entries passed through untouched. Any failure
    /// yields an empty wall.
    pub async fn load(&self) -> Vec<Value> {
        match self.fetch_raw().await {
            Ok(images) => images,
            Err(e) => {
                warn!(error = %e, endpoint = %self.endpoint, "wall load failed; showing empty wall");
                Vec::new()
            }
        }
    }

    async fn fetch_raw(&self) -> Result<Vec<Value>, TransportError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let body: LoadBody = checked(response).await?.json().await?;
        Ok(body.images)
    }

    /// Replace the server's collection with `images`.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses; both are logged first.
    pub async fn save(&self, images: &[WallImage]) -> Result<(), TransportError> {
        let result = async {
            let response = self.client.post(&self.endpoint).json(&SaveBody { images }).send().await?;
            checked(response).await.map(drop)
        }
        .await;
        match &result {
            Ok(()) => info!(count = images.len(), "wall saved"),
            Err(e) => warn!(error = %e, endpoint = %self.endpoint, "wall save failed"),
        }
        result
    }
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status { status: status.as_u16(), body })
}
