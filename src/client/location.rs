use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;
use tracing::debug;

use crate::models::Position;

/// How a location fix should be requested from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    /// Upper bound on waiting for a fix
    pub timeout: Duration,
    /// A cached fix younger than this may be reused; zero disables reuse
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Why a location fix could not be obtained; messages are shown to the user
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Доступ к геолокации запрещен")]
    PermissionDenied,

    #[error("Информация о местоположении недоступна")]
    PositionUnavailable,

    #[error("Превышено время ожидания геолокации")]
    Timeout,

    #[error("Геолокация не поддерживается браузером")]
    Unsupported,
}

/// Platform geolocation capability
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request a one-shot position fix
    async fn current_position(&self, options: &LocationOptions) -> Result<Position, LocationError>;
}

/// Wraps a provider with a bounded wait and reuse of recent fixes
pub struct CachedLocator<P> {
    inner: P,
    last_fix: Mutex<Option<(Position, Instant)>>,
}

impl<P: LocationProvider> CachedLocator<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            last_fix: Mutex::new(None),
        }
    }

    fn fresh_fix(&self, maximum_age: Duration) -> Option<Position> {
        if maximum_age.is_zero() {
            return None;
        }
        let last = *self.last_fix.lock().unwrap_or_else(PoisonError::into_inner);
        last.filter(|(_, at)| at.elapsed() < maximum_age)
            .map(|(position, _)| position)
    }
}

#[async_trait]
impl<P: LocationProvider> LocationProvider for CachedLocator<P> {
    async fn current_position(&self, options: &LocationOptions) -> Result<Position, LocationError> {
        if let Some(position) = self.fresh_fix(options.maximum_age) {
            debug!("Reusing cached location fix");
            return Ok(position);
        }

        let position = tokio::time::timeout(options.timeout, self.inner.current_position(options))
            .await
            .map_err(|_| LocationError::Timeout)??;

        debug!("Location fix: {position:?}");
        *self.last_fix.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((position, Instant::now()));

        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        delay: Duration,
        result: Result<Position, LocationError>,
    }

    impl CountingProvider {
        fn new(result: Result<Position, LocationError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
                result,
            }
        }
    }

    #[async_trait]
    impl LocationProvider for CountingProvider {
        async fn current_position(&self, _: &LocationOptions) -> Result<Position, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.result
        }
    }

    fn here() -> Position {
        Position {
            lat: 55.75,
            lon: 37.62,
            accuracy: Some(20.0),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reuses_fix_within_maximum_age() {
        let locator = CachedLocator::new(CountingProvider::new(Ok(here())));
        let options = LocationOptions::default();

        assert_eq!(locator.current_position(&options).await, Ok(here()));
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(locator.current_position(&options).await, Ok(here()));
        assert_eq!(locator.inner.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(5 * 60)).await;
        locator.current_position(&options).await.unwrap();
        assert_eq!(locator.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_maximum_age_always_requests_a_fix() {
        let locator = CachedLocator::new(CountingProvider::new(Ok(here())));
        let options = LocationOptions {
            maximum_age: Duration::ZERO,
            ..LocationOptions::default()
        };

        locator.current_position(&options).await.unwrap();
        locator.current_position(&options).await.unwrap();

        assert_eq!(locator.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let mut provider = CountingProvider::new(Ok(here()));
        provider.delay = Duration::from_secs(30);
        let locator = CachedLocator::new(provider);

        let result = locator.current_position(&LocationOptions::default()).await;

        assert_eq!(result, Err(LocationError::Timeout));
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let locator = CachedLocator::new(CountingProvider::new(Err(
            LocationError::PermissionDenied,
        )));
        let options = LocationOptions::default();

        assert_eq!(
            locator.current_position(&options).await,
            Err(LocationError::PermissionDenied)
        );
        assert!(locator.current_position(&options).await.is_err());
        assert_eq!(locator.inner.calls.load(Ordering::SeqCst), 2);
    }
}
