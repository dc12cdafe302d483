use crate::models::{Category, Offer};
use crate::sources::traits::OfferSource;
use crate::sources::types::SearchArea;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

/// Max offset in degrees applied to each sample offer around the center (±half of this)
const JITTER_SPAN_DEG: f64 = 0.01;

/// Sample businesses regenerated around the requester on every call
pub struct MockOfferSource {
    seeded: Option<Mutex<StdRng>>,
}

struct Template {
    id: u32,
    title: &'static str,
    category: Category,
    description: &'static str,
    address: &'static str,
    phone: &'static str,
    image: &'static str,
    telegram_url: &'static str,
}

const TEMPLATES: [Template; 5] = [
    Template {
        id: 1,
        title: "Ресторан 'Вкус Востока'",
        category: Category::Restaurants,
        description: "Аутентичная восточная кухня с доставкой",
        address: "ул. Пушкина, 15",
        phone: "+7 (495) 123-45-67",
        image: "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=300&h=150&fit=crop",
        telegram_url: "https://t.me/vkus_vostoka",
    },
    Template {
        id: 2,
        title: "Салон красоты 'Элегант'",
        category: Category::BeautySalons,
        description: "Полный спектр услуг красоты и ухода",
        address: "пр. Мира, 42",
        phone: "+7 (495) 234-56-78",
        image: "https://images.unsplash.com/photo-1560066984-138dadb4c035?w=300&h=150&fit=crop",
        telegram_url: "https://t.me/elegant_salon",
    },
    Template {
        id: 3,
        title: "Автосервис 'Быстрый ремонт'",
        category: Category::CarServices,
        description: "Диагностика и ремонт автомобилей любой сложности",
        address: "ул. Автомобильная, 8",
        phone: "+7 (495) 345-67-89",
        image: "https://images.unsplash.com/photo-1486754735734-325b5831c3ad?w=300&h=150&fit=crop",
        telegram_url: "https://t.me/quick_repair",
    },
    Template {
        id: 4,
        title: "Цветочный магазин 'Роза'",
        category: Category::FlowerShops,
        description: "Свежие цветы и букеты на любой случай",
        address: "ул. Цветочная, 25",
        phone: "+7 (495) 456-78-90",
        image: "https://images.unsplash.com/photo-1563241527-3004b7be99c3?w=300&h=150&fit=crop",
        telegram_url: "https://t.me/roza_flowers",
    },
    Template {
        id: 5,
        title: "Медцентр 'Здоровье+'",
        category: Category::MedicalCenters,
        description: "Комплексное медицинское обслуживание",
        address: "ул. Медицинская, 12",
        phone: "+7 (495) 567-89-01",
        image: "https://images.unsplash.com/photo-1576091160399-112ba8d25d1f?w=300&h=150&fit=crop",
        telegram_url: "https://t.me/health_plus",
    },
];

impl MockOfferSource {
    /// Create a mock source backed by the thread-local RNG
    pub fn new() -> Self {
        Self { seeded: None }
    }

    /// Create a mock source with a reproducible sequence of positions
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    fn generate(&self, area: &SearchArea) -> Result<Vec<Offer>> {
        match &self.seeded {
            Some(rng) => {
                let mut rng = rng
                    .lock()
                    .map_err(|_| anyhow!("mock offer RNG lock poisoned"))?;
                Ok(generate_with(&mut *rng, area))
            }
            None => Ok(generate_with(&mut rand::rng(), area)),
        }
    }
}

impl Default for MockOfferSource {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_with<R: Rng + ?Sized>(rng: &mut R, area: &SearchArea) -> Vec<Offer> {
    TEMPLATES
        .iter()
        .map(|t| Offer {
            id: t.id,
            title: t.title.to_string(),
            category: t.category,
            description: t.description.to_string(),
            address: t.address.to_string(),
            phone: t.phone.to_string(),
            lat: area.center.lat + (rng.random::<f64>() - 0.5) * JITTER_SPAN_DEG,
            lon: area.center.lon + (rng.random::<f64>() - 0.5) * JITTER_SPAN_DEG,
            distance: 0.0,
            image: t.image.to_string(),
            telegram_url: Some(t.telegram_url.to_string()),
        })
        .collect()
}

#[async_trait]
impl OfferSource for MockOfferSource {
    async fn offers_near(&self, area: &SearchArea) -> Result<Vec<Offer>> {
        let offers = self.generate(area)?;
        debug!(
            "Generated {} mock offers around ({}, {})",
            offers.len(),
            area.center.lat,
            area.center.lon
        );
        Ok(offers)
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    #[tokio::test]
    async fn offers_stay_within_jitter_box() {
        let source = MockOfferSource::new();
        let area = SearchArea::new(GeoPoint::new(55.75, 37.62), 5.0);

        let offers = source.offers_near(&area).await.unwrap();

        assert_eq!(offers.len(), 5);
        for offer in &offers {
            assert!((offer.lat - 55.75).abs() <= JITTER_SPAN_DEG / 2.0 + 1e-9);
            assert!((offer.lon - 37.62).abs() <= JITTER_SPAN_DEG / 2.0 + 1e-9);
            assert!(offer.telegram_url.is_some());
        }
    }

    #[tokio::test]
    async fn seeded_sources_agree() {
        let area = SearchArea::new(GeoPoint::new(59.33, 18.07), 5.0);
        let a = MockOfferSource::with_seed(42).offers_near(&area).await.unwrap();
        let b = MockOfferSource::with_seed(42).offers_near(&area).await.unwrap();

        assert_eq!(a, b);
    }
}
