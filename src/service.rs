//! Radius filtering over an [`OfferSource`].

use std::sync::Arc;

use anyhow::Result;
use geo::{line_string, Haversine, Length, Point};
use tracing::{debug, info};

use crate::models::api::OffersPayload;
use crate::models::GeoPoint;
use crate::sources::{OfferSource, SearchArea};

/// Great-circle distance between two points, in kilometers
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let from = Point::new(from.lon, from.lat);
    let to = Point::new(to.lon, to.lat);
    Haversine.length(&line_string![from.0, to.0]) / 1000.0
}

/// Round to one decimal place, the precision offers are reported with
pub fn round_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Answers offer queries from a pluggable source
#[derive(Clone)]
pub struct OfferService {
    source: Arc<dyn OfferSource>,
}

impl OfferService {
    pub fn new(source: Arc<dyn OfferSource>) -> Self {
        Self { source }
    }

    /// Offers whose rounded distance from the center is at most the radius,
    /// in source order
    pub async fn find_offers(&self, area: SearchArea) -> Result<OffersPayload> {
        let candidates = self.source.offers_near(&area).await?;
        let candidate_count = candidates.len();

        let offers: Vec<_> = candidates
            .into_iter()
            .map(|offer| {
                let distance = round_tenth(distance_km(area.center, offer.point()));
                offer.with_distance(distance)
            })
            .filter(|offer| offer.distance <= area.radius_km)
            .collect();

        debug!(
            "{} of {} candidates from {} within {} km",
            offers.len(),
            candidate_count,
            self.source.source_name(),
            area.radius_km
        );
        info!(
            "Found {} offers near ({}, {})",
            offers.len(),
            area.center.lat,
            area.center.lon
        );

        Ok(OffersPayload {
            total: offers.len(),
            offers,
            location: area.center,
            radius: area.radius_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Offer};
    use crate::sources::{FileOfferSource, MockOfferSource};

    fn offer_at(id: u32, lat: f64, lon: f64) -> Offer {
        Offer {
            id,
            title: format!("Offer {id}"),
            category: Category::FlowerShops,
            description: String::new(),
            address: String::new(),
            phone: String::new(),
            lat,
            lon,
            distance: 99.0,
            image: String::new(),
            telegram_url: None,
        }
    }

    #[test]
    fn distance_matches_known_values() {
        let moscow = GeoPoint::new(55.7558, 37.6173);
        let spb = GeoPoint::new(59.9343, 30.3351);

        let km = distance_km(moscow, spb);
        assert!((km - 634.0).abs() < 5.0, "got {km}");
        assert_eq!(distance_km(moscow, moscow), 0.0);
    }

    #[test]
    fn round_tenth_keeps_one_decimal() {
        assert_eq!(round_tenth(1.249), 1.2);
        assert_eq!(round_tenth(1.25), 1.3);
        assert_eq!(round_tenth(0.04), 0.0);
    }

    #[tokio::test]
    async fn filters_by_real_distance_in_source_order() {
        let center = GeoPoint::new(55.75, 37.62);
        // ~1.1 km, ~11 km and ~0 km north of the center
        let source = FileOfferSource::new(vec![
            offer_at(1, 55.76, 37.62),
            offer_at(2, 55.85, 37.62),
            offer_at(3, 55.75, 37.62),
        ]);
        let service = OfferService::new(Arc::new(source));

        let payload = service
            .find_offers(SearchArea::new(center, 5.0))
            .await
            .unwrap();

        let ids: Vec<_> = payload.offers.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(payload.total, 2);
        assert_eq!(payload.offers[0].distance, 1.1);
        assert_eq!(payload.offers[1].distance, 0.0);
        assert_eq!(payload.location, center);
        assert_eq!(payload.radius, 5.0);
    }

    #[tokio::test]
    async fn every_mock_offer_respects_radius() {
        let service = OfferService::new(Arc::new(MockOfferSource::with_seed(7)));

        for radius in [0.0, 0.1, 0.3, 0.5, 1.0, 5.0] {
            let area = SearchArea::new(GeoPoint::new(-33.86, 151.2), radius);
            let payload = service.find_offers(area).await.unwrap();

            assert!(payload.offers.len() <= 5);
            assert_eq!(payload.total, payload.offers.len());
            for offer in &payload.offers {
                assert!(offer.distance <= radius, "{} > {radius}", offer.distance);
            }
        }
    }
}
