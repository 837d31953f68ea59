use std::sync::Arc;
use tlairways_catalog::{CatalogError, PriceTable, SectorClassifier};
use tlairways_order::{PurchaseAssembler, PurchaseEventSink};

use crate::app_config::Config;

#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<PurchaseAssembler>,
    pub sink: Arc<dyn PurchaseEventSink>,
    pub emit_events: bool,
}

impl AppState {
    pub fn new(assembler: PurchaseAssembler, sink: Arc<dyn PurchaseEventSink>) -> Self {
        Self { assembler: Arc::new(assembler), sink, emit_events: true }
    }

    pub fn from_config(config: &Config, sink: Arc<dyn PurchaseEventSink>) -> Result<Self, CatalogError> {
        let price_table = PriceTable::new(config.pricing.clone())?;
        let sectors = SectorClassifier::from_config(&config.sectors)?;
        let assembler = PurchaseAssembler::new(price_table, sectors, config.tracking.currency.clone());

        Ok(Self {
            emit_events: config.tracking.emit_events,
            ..Self::new(assembler, sink)
        })
    }
}
