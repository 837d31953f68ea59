pub mod models;
pub mod selector;
pub mod assembler;
pub mod tracking;
pub mod sink;
pub mod validation;

pub use models::{ProductDetails, ProductLineItem};
pub use selector::{AncillaryLineItem, AncillarySelector, AncillaryService};
pub use assembler::{PurchaseAssembler, DEFAULT_CURRENCY};
pub use tracking::{build_payment_tracking, product_list_items, PurchaseEvent, TrackingContext};
pub use sink::{MemorySink, PurchaseEventSink, SinkError, TracingSink};
pub use validation::{validate_booking, OrderError};

#[cfg(test)]
pub(crate) mod fixtures;
