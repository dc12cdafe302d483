use thiserror::Error;

use crate::models::{GeoPoint, Offer};

/// Zoom used when the map is first drawn around the user
pub const INITIAL_ZOOM: u8 = 14;
/// Zoom used by "show on map"
pub const DETAIL_ZOOM: u8 = 16;

const USER_MARKER_COLOR: &str = "#ff6b6b";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Карта недоступна: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    /// Clicking reports this offer id back to the session
    Offer(u32),
}

/// A point on the map with its popup content
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub point: GeoPoint,
    pub kind: MarkerKind,
    pub hint: String,
    pub balloon_header: String,
    pub balloon_lines: Vec<String>,
    pub telegram_url: Option<String>,
    pub color: &'static str,
}

impl Marker {
    pub fn user(point: GeoPoint) -> Self {
        Self {
            point,
            kind: MarkerKind::User,
            hint: "Вы здесь".to_string(),
            balloon_header: "📍 Ваше местоположение".to_string(),
            balloon_lines: Vec::new(),
            telegram_url: None,
            color: USER_MARKER_COLOR,
        }
    }

    pub fn for_offer(offer: &Offer) -> Self {
        Self {
            point: offer.point(),
            kind: MarkerKind::Offer(offer.id),
            hint: format!("{} ({:.1} км)", offer.title, offer.distance),
            balloon_header: format!("{} {}", offer.category.emoji(), offer.title),
            balloon_lines: vec![
                offer.category.label().to_string(),
                offer.description.clone(),
                format!("📍 {}", offer.address),
                format!("📞 {}", offer.phone),
                format!("📏 {:.1} км от вас", offer.distance),
            ],
            telegram_url: offer.telegram_url.clone(),
            color: offer.category.color(),
        }
    }
}

/// Axis-aligned box enclosing a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Bounds {
    /// `None` for an empty set
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            Some(match acc {
                None => Bounds {
                    south_west: *p,
                    north_east: *p,
                },
                Some(b) => Bounds {
                    south_west: GeoPoint::new(b.south_west.lat.min(p.lat), b.south_west.lon.min(p.lon)),
                    north_east: GeoPoint::new(b.north_east.lat.max(p.lat), b.north_east.lon.max(p.lon)),
                },
            })
        })
    }
}

/// Interactive map supplied by the host
///
/// Implementations hold their own map handle; the session only drives it.
pub trait MapView: Send + Sync {
    fn render_map(&self, center: GeoPoint, zoom: u8) -> Result<(), MapError>;

    /// Replace all markers currently shown
    fn set_markers(&self, markers: &[Marker]);

    fn fit_bounds(&self, bounds: Bounds);

    fn pan_to(&self, point: GeoPoint, zoom: u8);
}
