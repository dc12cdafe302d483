pub mod file;
pub mod mock;
pub mod traits;
pub mod types;

pub use file::FileOfferSource;
pub use mock::MockOfferSource;
pub use traits::OfferSource;
pub use types::SearchArea;
