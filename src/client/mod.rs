//! Front-end controller logic, with the platform behind traits.

pub mod api;
pub mod controller;
pub mod location;
pub mod map;
pub mod render;

pub use api::{ClientError, OffersApi, OffersClient};
pub use controller::{SearchError, SearchSession};
pub use location::{CachedLocator, LocationError, LocationOptions, LocationProvider};
pub use map::{Bounds, MapError, MapView, Marker, MarkerKind};
pub use render::{OfferCard, OfferDetail, Screen};
