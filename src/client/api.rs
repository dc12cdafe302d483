use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::api::{Envelope, OffersPayload};
use crate::models::GeoPoint;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Server answered with `success: false`
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Backend offer lookup as seen by the session
#[async_trait]
pub trait OffersApi: Send + Sync {
    async fn fetch_offers(&self, center: GeoPoint, radius_km: f64) -> Result<OffersPayload, ClientError>;
}

/// reqwest-backed client for `/api/offers`
pub struct OffersClient {
    client: Client,
    base_url: String,
}

impl OffersClient {
    /// Create a client with the default 15 second request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(15))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OffersApi for OffersClient {
    async fn fetch_offers(&self, center: GeoPoint, radius_km: f64) -> Result<OffersPayload, ClientError> {
        let url = format!("{}/api/offers", self.base_url);
        debug!("Fetching offers from {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("lat", center.lat), ("lon", center.lon), ("radius", radius_km)])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Offers endpoint returned status: {}", response.status());
            return Err(ClientError::Status(response.status().as_u16()));
        }

        let envelope: Envelope<OffersPayload> = response.json().await?;

        match envelope {
            Envelope {
                success: true,
                data: Some(payload),
                ..
            } => {
                debug!("Received {} offers", payload.total);
                Ok(payload)
            }
            Envelope { error, .. } => Err(ClientError::Api(
                error.unwrap_or_else(|| "Пустой ответ сервера".to_string()),
            )),
        }
    }
}
