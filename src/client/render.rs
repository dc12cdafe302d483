use crate::models::{GeoPoint, Offer};

/// Summary of an offer for the result list
#[derive(Debug, Clone, PartialEq)]
pub struct OfferCard {
    pub offer_id: u32,
    pub title: String,
    /// Category name prefixed with its emoji
    pub category_label: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub distance_label: String,
    pub image: String,
    pub telegram_url: Option<String>,
}

/// Full view of a selected offer
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDetail {
    pub card: OfferCard,
    /// Where "show on map" pans to
    pub map_target: GeoPoint,
}

pub fn distance_label(km: f64) -> String {
    format!("{km:.1} км от вас")
}

pub fn card(offer: &Offer) -> OfferCard {
    OfferCard {
        offer_id: offer.id,
        title: offer.title.clone(),
        category_label: format!("{} {}", offer.category.emoji(), offer.category.label()),
        description: offer.description.clone(),
        address: offer.address.clone(),
        phone: offer.phone.clone(),
        distance_label: distance_label(offer.distance),
        image: offer.image.clone(),
        telegram_url: offer.telegram_url.clone(),
    }
}

pub fn cards(offers: &[Offer]) -> Vec<OfferCard> {
    offers.iter().map(card).collect()
}

pub fn detail(offer: &Offer) -> OfferDetail {
    OfferDetail {
        card: card(offer),
        map_target: offer.point(),
    }
}

/// Host surface the session writes results and messages to
pub trait Screen: Send + Sync {
    /// Toggle the busy indicator; the search trigger is disabled while on
    fn set_loading(&self, loading: bool);

    /// User-facing alert
    fn notify(&self, message: &str);

    fn show_cards(&self, cards: &[OfferCard]);

    fn hide_cards(&self);

    fn show_detail(&self, detail: &OfferDetail);

    fn hide_detail(&self);
}
