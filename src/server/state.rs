use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::service::OfferService;
use crate::sources::{FileOfferSource, MockOfferSource, OfferSource};

pub struct State {
    pub config: Config,
    pub offers: OfferService,
    pub started_at: Instant,
}

impl State {
    /// Pick the offer source the config asks for
    pub async fn new(config: Config) -> Result<Arc<Self>> {
        let source: Arc<dyn OfferSource> = match (&config.offers_file, config.offers_seed) {
            (Some(path), _) => Arc::new(FileOfferSource::load(path).await?),
            (None, Some(seed)) => Arc::new(MockOfferSource::with_seed(seed)),
            (None, None) => Arc::new(MockOfferSource::new()),
        };

        info!("Serving offers from {} source", source.source_name());

        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: Config, source: Arc<dyn OfferSource>) -> Arc<Self> {
        Arc::new(Self {
            config,
            offers: OfferService::new(source),
            started_at: Instant::now(),
        })
    }

    /// Seconds since the state was built
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
