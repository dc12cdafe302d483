pub mod api;

use serde::{Deserialize, Serialize};

/// A coordinate pair in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A one-shot location fix reported by the device
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    /// Accuracy radius in meters, when the platform reports one
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Business category of an offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "рестораны")]
    Restaurants,
    #[serde(rename = "салоны красоты")]
    BeautySalons,
    #[serde(rename = "автосервисы")]
    CarServices,
    #[serde(rename = "цветочные магазины")]
    FlowerShops,
    #[serde(rename = "медцентры")]
    MedicalCenters,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Restaurants,
        Category::BeautySalons,
        Category::CarServices,
        Category::FlowerShops,
        Category::MedicalCenters,
    ];

    /// Label as it appears on the wire and in the UI
    pub fn label(&self) -> &'static str {
        match self {
            Category::Restaurants => "рестораны",
            Category::BeautySalons => "салоны красоты",
            Category::CarServices => "автосервисы",
            Category::FlowerShops => "цветочные магазины",
            Category::MedicalCenters => "медцентры",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Restaurants => "🍽️",
            Category::BeautySalons => "💅",
            Category::CarServices => "🔧",
            Category::FlowerShops => "🌸",
            Category::MedicalCenters => "🏥",
        }
    }

    /// Marker color on the map
    pub fn color(&self) -> &'static str {
        match self {
            Category::Restaurants => "#ff6b6b",
            Category::BeautySalons => "#ff9ff3",
            Category::CarServices => "#54a0ff",
            Category::FlowerShops => "#5f27cd",
            Category::MedicalCenters => "#00d2d3",
        }
    }
}

/// Core offer data model
///
/// `distance` is kilometers from the requester, rounded to one decimal.
/// Sources may leave it at zero; the query service fills it in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub id: u32,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub distance: f64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_url: Option<String>,
}

impl Offer {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Copy of this offer carrying the given distance
    pub fn with_distance(self, distance: f64) -> Self {
        Self { distance, ..self }
    }
}
