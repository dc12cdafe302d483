use crate::models::Offer;
use crate::sources::traits::OfferSource;
use crate::sources::types::SearchArea;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// Fixed offer catalogue with real coordinates, loaded from a JSON array
pub struct FileOfferSource {
    offers: Vec<Offer>,
}

impl FileOfferSource {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self { offers }
    }

    /// Read the catalogue from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read offers file {}", path.display()))?;
        let offers: Vec<Offer> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse offers file {}", path.display()))?;

        info!("Loaded {} offers from {}", offers.len(), path.display());

        Ok(Self::new(offers))
    }
}

#[async_trait]
impl OfferSource for FileOfferSource {
    async fn offers_near(&self, _area: &SearchArea) -> Result<Vec<Offer>> {
        Ok(self.offers.clone())
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    #[tokio::test]
    async fn load_reads_catalogue() {
        let path = std::env::temp_dir().join(format!("offers-{}.json", std::process::id()));
        let json = r#"[{
            "id": 1,
            "title": "Пекарня",
            "category": "рестораны",
            "description": "Хлеб",
            "address": "ул. Садовая, 3",
            "phone": "+7 (495) 111-22-33",
            "lat": 55.751,
            "lon": 37.621,
            "image": "https://example.com/bread.jpg"
        }]"#;
        tokio::fs::write(&path, json).await.unwrap();

        let source = FileOfferSource::load(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        let area = SearchArea::new(GeoPoint::new(55.75, 37.62), 5.0);
        let offers = source.offers_near(&area).await.unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].title, "Пекарня");
        assert_eq!(offers[0].telegram_url, None);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let err = FileOfferSource::load("/definitely/not/here.json")
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("Failed to read offers file"));
    }
}
