use crate::product::SeatType;
use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tlairways_shared::Amount;

/// Seat prices by seat type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct SeatPrices {
    pub standard: Amount,
    pub window: Amount,
    pub aisle: Amount,
    pub extra_legroom: Amount,
    pub preferred: Amount,
}

impl Default for SeatPrices {
    fn default() -> Self {
        Self {
            standard: Amount::ZERO,
            window: Amount::from_major(500),
            aisle: Amount::from_major(400),
            extra_legroom: Amount::from_major(1200),
            preferred: Amount::from_major(800),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct BaggageTier {
    pub weight_kg: u32,
    pub price: Amount,
}

/// Ancillary price table configuration, in major currency units.
/// Read from snake_case config keys, served as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct PriceTableConfig {
    pub seats: SeatPrices,
    pub baggage: Vec<BaggageTier>,
    pub priority_boarding: Amount,
    pub lounge_access: Amount,
}

impl Default for PriceTableConfig {
    fn default() -> Self {
        Self {
            seats: SeatPrices::default(),
            baggage: vec![
                BaggageTier { weight_kg: 5, price: Amount::from_major(1500) },
                BaggageTier { weight_kg: 10, price: Amount::from_major(2800) },
                BaggageTier { weight_kg: 15, price: Amount::from_major(4000) },
                BaggageTier { weight_kg: 20, price: Amount::from_major(5200) },
            ],
            priority_boarding: Amount::from_major(500),
            lounge_access: Amount::from_major(2000),
        }
    }
}

impl PriceTableConfig {
    /// Rejects negative prices and duplicated baggage tiers.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let seats = [
            (SeatType::Standard, self.seats.standard),
            (SeatType::Window, self.seats.window),
            (SeatType::Aisle, self.seats.aisle),
            (SeatType::ExtraLegroom, self.seats.extra_legroom),
            (SeatType::Preferred, self.seats.preferred),
        ];
        for (seat_type, price) in seats {
            if price.is_negative() {
                return Err(CatalogError::NegativePrice(format!("{} seat", seat_type)));
            }
        }
        if self.priority_boarding.is_negative() {
            return Err(CatalogError::NegativePrice("priority boarding".to_string()));
        }
        if self.lounge_access.is_negative() {
            return Err(CatalogError::NegativePrice("lounge access".to_string()));
        }

        let mut seen = HashSet::new();
        for tier in &self.baggage {
            if tier.price.is_negative() {
                return Err(CatalogError::NegativePrice(format!("{}kg baggage", tier.weight_kg)));
            }
            if !seen.insert(tier.weight_kg) {
                return Err(CatalogError::DuplicateBaggageTier(tier.weight_kg));
            }
        }
        Ok(())
    }
}

/// Which rule priced an ancillary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Price carried on the selection itself
    Carried,
    /// Price table lookup
    Table,
    /// Neither was available
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub amount: Amount,
    pub source: PriceSource,
}

/// Carried price, then table price, then zero. Negative amounts clamp to zero.
pub fn resolve_price(carried: Option<Amount>, table: Option<Amount>) -> ResolvedPrice {
    match (carried, table) {
        (Some(amount), _) => ResolvedPrice { amount: amount.non_negative(), source: PriceSource::Carried },
        (None, Some(amount)) => ResolvedPrice { amount: amount.non_negative(), source: PriceSource::Table },
        (None, None) => ResolvedPrice { amount: Amount::ZERO, source: PriceSource::Fallback },
    }
}

/// Static ancillary price lookup. Unknown keys yield `None`, never an error.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    config: PriceTableConfig,
}

impl PriceTable {
    pub fn new(config: PriceTableConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PriceTableConfig {
        &self.config
    }

    pub fn seat_price(&self, seat_type: SeatType) -> Amount {
        let seats = &self.config.seats;
        match seat_type {
            SeatType::Standard => seats.standard,
            SeatType::Window => seats.window,
            SeatType::Aisle => seats.aisle,
            SeatType::ExtraLegroom => seats.extra_legroom,
            SeatType::Preferred => seats.preferred,
        }
    }

    pub fn baggage_price(&self, weight_kg: u32) -> Option<Amount> {
        self.config
            .baggage
            .iter()
            .find(|tier| tier.weight_kg == weight_kg)
            .map(|tier| tier.price)
    }

    pub fn priority_boarding_price(&self) -> Amount {
        self.config.priority_boarding
    }

    pub fn lounge_access_price(&self) -> Amount {
        self.config.lounge_access
    }
}
