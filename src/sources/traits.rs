use crate::models::Offer;
use crate::sources::types::SearchArea;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all offer backends
/// Lets a real datastore replace the mock listing without touching the distance filter
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Candidate offers around the area's center
    ///
    /// May return offers outside the radius; callers filter by distance.
    async fn offers_near(&self, area: &SearchArea) -> Result<Vec<Offer>>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
