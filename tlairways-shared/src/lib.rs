pub mod lenient;
pub mod models;
pub mod money;
pub mod pii;

pub use models::booking::{
    AirportRef, AncillarySelection, AncillaryServices, BookingRecord, Direction, FlightLeg,
    LegSelections, PaymentInfo, SearchQuery, Traveller, NOT_AVAILABLE,
};
pub use money::Amount;
pub use pii::Masked;
