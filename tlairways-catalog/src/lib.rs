pub mod product;
pub mod pricing;
pub mod sector;

pub use product::{ProductCategory, SeatType, SubCategory};
pub use pricing::{resolve_price, BaggageTier, PriceSource, PriceTable, PriceTableConfig, ResolvedPrice, SeatPrices};
pub use sector::{SectorClassifier, SectorConfig, SectorType};

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown seat type: {0}")]
    UnknownSeatType(String),

    #[error("Negative price configured for {0}")]
    NegativePrice(String),

    #[error("Duplicate baggage tier: {0}kg")]
    DuplicateBaggageTier(u32),

    #[error("Invalid airport code: {0:?}")]
    InvalidAirportCode(String),
}
