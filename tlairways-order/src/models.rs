use serde::Serialize;
use tlairways_catalog::{ProductCategory, SeatType, SectorType, SubCategory};
use tlairways_shared::{Amount, Direction};

/// One priced entry of the purchase event product list.
///
/// Field names are part of the analytics schema; renaming one breaks the
/// receiving report suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineItem {
    pub product_id: String,
    pub product_name: String,
    pub category: ProductCategory,
    pub sub_category: SubCategory,
    pub price: Amount,
    pub quantity: u32,
    pub currency: String,
    pub journey_type: Direction,
    pub origin: String,
    pub destination: String,
    pub sector_type: SectorType,
    #[serde(flatten)]
    pub details: ProductDetails,
}

/// Category-specific keys, flattened into the line item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductDetails {
    #[serde(rename_all = "camelCase")]
    Flight {
        flight_number: String,
        unit_price: Amount,
        #[serde(skip_serializing_if = "Option::is_none")]
        cabin_class: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        travel_date: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Seat {
        seat_number: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        seat_type: Option<SeatType>,
        passenger_index: usize,
        passenger_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Baggage {
        weight_kg: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        baggage_type: Option<String>,
        passenger_index: usize,
        passenger_name: String,
    },
    /// Priority boarding and lounge access carry only the passenger
    #[serde(rename_all = "camelCase")]
    Passenger {
        passenger_index: usize,
        passenger_name: String,
    },
}

impl ProductLineItem {
    pub fn is_flight(&self) -> bool {
        self.category == ProductCategory::Flight
    }

    pub fn passenger_index(&self) -> Option<usize> {
        match &self.details {
            ProductDetails::Flight { .. } => None,
            ProductDetails::Seat { passenger_index, .. }
            | ProductDetails::Baggage { passenger_index, .. }
            | ProductDetails::Passenger { passenger_index, .. } => Some(*passenger_index),
        }
    }
}
