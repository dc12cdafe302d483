//! One user's search session: locate, draw the map, fetch offers, show them.
//!
//! The session owns every platform handle and the last results. Platform
//! calls are awaited in sequence and a second search is refused while one is
//! running; nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{GeoPoint, Offer, Position};
use crate::sources::types::DEFAULT_RADIUS_KM;

use super::api::{ClientError, OffersApi};
use super::location::{LocationError, LocationOptions, LocationProvider};
use super::map::{Bounds, MapError, MapView, Marker, MarkerKind, DETAIL_ZOOM, INITIAL_ZOOM};
use super::render::{self, OfferDetail, Screen};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Поиск уже выполняется")]
    InFlight,

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Api(#[from] ClientError),
}

#[derive(Default)]
struct SessionState {
    position: Option<Position>,
    offers: Vec<Offer>,
}

pub struct SearchSession<L, A, M, S> {
    locator: L,
    api: A,
    map: M,
    screen: S,
    options: LocationOptions,
    radius_km: f64,
    in_flight: AtomicBool,
    state: Mutex<SessionState>,
}

/// Clears the busy indicator and the in-flight flag however the search ends
struct SearchGuard<'a, S: Screen> {
    in_flight: &'a AtomicBool,
    screen: &'a S,
}

impl<S: Screen> Drop for SearchGuard<'_, S> {
    fn drop(&mut self) {
        self.screen.set_loading(false);
        self.in_flight.store(false, Ordering::Release);
    }
}

impl<L, A, M, S> SearchSession<L, A, M, S>
where
    L: LocationProvider,
    A: OffersApi,
    M: MapView,
    S: Screen,
{
    pub fn new(locator: L, api: A, map: M, screen: S) -> Self {
        Self {
            locator,
            api,
            map,
            screen,
            options: LocationOptions::default(),
            radius_km: DEFAULT_RADIUS_KM,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_location_options(mut self, options: LocationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn last_position(&self) -> Option<Position> {
        self.state().position
    }

    pub fn offers(&self) -> Vec<Offer> {
        self.state().offers.clone()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Run one search and report the outcome on the screen
    pub async fn find_nearby_offers(&self) -> Result<Vec<Offer>, SearchError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            warn!("Search already in flight, ignoring trigger");
            return Err(SearchError::InFlight);
        }
        let _guard = SearchGuard {
            in_flight: &self.in_flight,
            screen: &self.screen,
        };
        self.screen.set_loading(true);

        let result = self.run_search().await;

        match &result {
            Ok(offers) if offers.is_empty() => self.screen.notify(&format!(
                "В радиусе {} км от вас не найдено предложений. Попробуйте изменить местоположение.",
                self.radius_km
            )),
            Ok(offers) => self
                .screen
                .notify(&format!("Найдено {} предложений поблизости!", offers.len())),
            Err(e) => {
                error!("Offer search failed: {e}");
                self.screen.notify(&format!("Ошибка: {e}"));
            }
        }

        result
    }

    async fn run_search(&self) -> Result<Vec<Offer>, SearchError> {
        info!("Requesting location...");
        let position = self.locator.current_position(&self.options).await?;
        self.state().position = Some(position);
        let center = position.point();

        info!("Rendering map...");
        self.map.render_map(center, INITIAL_ZOOM)?;

        info!("Requesting offers...");
        let payload = self.api.fetch_offers(center, self.radius_km).await?;

        self.show_offers(center, &payload.offers);
        self.state().offers = payload.offers.clone();

        Ok(payload.offers)
    }

    fn show_offers(&self, center: GeoPoint, offers: &[Offer]) {
        let markers: Vec<Marker> = std::iter::once(Marker::user(center))
            .chain(offers.iter().map(Marker::for_offer))
            .collect();
        self.map.set_markers(&markers);

        if offers.is_empty() {
            self.screen.hide_cards();
            return;
        }

        if let Some(bounds) = Bounds::from_points(markers.iter().map(|m| &m.point)) {
            self.map.fit_bounds(bounds);
        }
        self.screen.show_cards(&render::cards(offers));
    }

    /// Open the detail view for an offer from the last search
    pub fn select_offer(&self, offer_id: u32) -> Option<OfferDetail> {
        let detail = self.find_offer(offer_id).map(|offer| render::detail(&offer))?;
        self.screen.show_detail(&detail);
        Some(detail)
    }

    /// Map click handler
    pub fn on_marker_click(&self, kind: MarkerKind) -> Option<OfferDetail> {
        match kind {
            MarkerKind::Offer(id) => self.select_offer(id),
            MarkerKind::User => None,
        }
    }

    /// Pan the map to an offer and close its detail view
    pub fn show_on_map(&self, offer_id: u32) -> bool {
        let Some(offer) = self.find_offer(offer_id) else {
            return false;
        };

        self.map.pan_to(offer.point(), DETAIL_ZOOM);
        self.screen.hide_detail();
        true
    }

    pub fn close_detail(&self) {
        self.screen.hide_detail();
    }

    fn find_offer(&self, offer_id: u32) -> Option<Offer> {
        self.state()
            .offers
            .iter()
            .find(|offer| offer.id == offer_id)
            .cloned()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
