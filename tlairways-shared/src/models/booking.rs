use crate::lenient;
use crate::pii::Masked;
use crate::Amount;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder emitted when a record lacks a value the analytics payload needs.
pub const NOT_AVAILABLE: &str = "N/A";

/// Journey direction of a leg
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Onward,
    Return,
}

impl Direction {
    /// Iteration order for assembly.
    pub const ALL: [Direction; 2] = [Direction::Onward, Direction::Return];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Onward => "onward",
            Direction::Return => "return",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked passenger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Traveller {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "masked_text")]
    pub email: Option<Masked<String>>,
    #[serde(deserialize_with = "masked_text")]
    pub phone: Option<Masked<String>>,
}

impl Traveller {
    /// `"First Last"`, whichever parts exist, else `"N/A"`.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            parts.join(" ")
        }
    }
}

fn masked_text<'de, D>(deserializer: D) -> Result<Option<Masked<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::text(deserializer).map(|v| v.map(Masked))
}

/// Airport as carried by a leg: either a bare code or an airport object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AirportRef {
    Code(String),
    Detailed(AirportDetails),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirportDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub iata_code: Option<String>,
    #[serde(rename = "iataCode", deserialize_with = "lenient::text")]
    pub iata_code_camel: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

impl AirportRef {
    /// Resolves the airport code: `iata_code`, `iataCode`, `code`, the bare
    /// string form, in that order.
    pub fn code(&self) -> Option<&str> {
        match self {
            AirportRef::Code(code) => Some(code.as_str()),
            AirportRef::Detailed(details) => details
                .iata_code
                .as_deref()
                .or(details.iata_code_camel.as_deref())
                .or(details.code.as_deref()),
        }
    }
}

fn airport<'de, D>(deserializer: D) -> Result<Option<AirportRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok().map(AirportRef::Detailed),
        Some(other) => lenient::text_from_value(&other).map(AirportRef::Code),
        None => None,
    })
}

/// One flight within a booking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightLeg {
    #[serde(deserialize_with = "lenient::text")]
    pub flight_number: Option<String>,
    #[serde(rename = "flight_number", deserialize_with = "lenient::text")]
    pub flight_number_snake: Option<String>,
    #[serde(deserialize_with = "airport")]
    pub origin: Option<AirportRef>,
    #[serde(deserialize_with = "airport")]
    pub destination: Option<AirportRef>,
    #[serde(deserialize_with = "lenient::amount")]
    pub current_price: Option<Amount>,
    #[serde(deserialize_with = "lenient::text")]
    pub departure_time: Option<String>,
}

impl FlightLeg {
    /// `flightNumber`, then `flight_number`, then `"N/A"`.
    pub fn flight_number(&self) -> &str {
        self.flight_number
            .as_deref()
            .or(self.flight_number_snake.as_deref())
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn origin_code(&self) -> &str {
        self.origin.as_ref().and_then(AirportRef::code).unwrap_or(NOT_AVAILABLE)
    }

    pub fn destination_code(&self) -> &str {
        self.destination.as_ref().and_then(AirportRef::code).unwrap_or(NOT_AVAILABLE)
    }

    /// Date part of `departureTime`.
    pub fn departure_date(&self) -> Option<String> {
        self.departure_time.as_deref().map(lenient::normalize_date)
    }
}

/// Ancillaries chosen by one traveller for one leg. Absent fields were not purchased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AncillarySelection {
    #[serde(deserialize_with = "lenient::text")]
    pub seat_number: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub seat_type: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub seat_price: Option<Amount>,
    #[serde(deserialize_with = "lenient::weight_kg")]
    pub baggage: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub baggage_type: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub baggage_price: Option<Amount>,
    #[serde(deserialize_with = "lenient::flag")]
    pub priority_boarding: bool,
    #[serde(deserialize_with = "lenient::amount")]
    pub priority_boarding_price: Option<Amount>,
    #[serde(deserialize_with = "lenient::flag")]
    pub lounge_access: bool,
    #[serde(deserialize_with = "lenient::amount")]
    pub lounge_access_price: Option<Amount>,
}

/// Selections for one leg keyed by traveller index.
///
/// Decodes from an object with numeric keys (`{"0": {...}}`) or from an array
/// (`[{...}, null]`). Entries that are not objects, or whose key is not an
/// index, are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LegSelections(pub BTreeMap<usize, AncillarySelection>);

impl LegSelections {
    pub fn get(&self, traveller_index: usize) -> Option<&AncillarySelection> {
        self.0.get(&traveller_index)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for LegSelections {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut by_index = BTreeMap::new();
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Array(items)) => {
                for (index, item) in items.into_iter().enumerate() {
                    if let Some(selection) = selection_from_value(item) {
                        by_index.insert(index, selection);
                    }
                }
            }
            Some(Value::Object(entries)) => {
                for (key, item) in entries {
                    if let (Ok(index), Some(selection)) = (key.trim().parse::<usize>(), selection_from_value(item)) {
                        by_index.insert(index, selection);
                    }
                }
            }
            _ => {}
        }
        Ok(Self(by_index))
    }
}

fn selection_from_value(value: Value) -> Option<AncillarySelection> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AncillaryServices {
    pub onward: LegSelections,
    #[serde(rename = "return")]
    pub return_leg: LegSelections,
}

impl AncillaryServices {
    pub fn for_direction(&self, direction: Direction) -> &LegSelections {
        match direction {
            Direction::Onward => &self.onward,
            Direction::Return => &self.return_leg,
        }
    }
}

/// Search/selection context the booking was made under
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    #[serde(deserialize_with = "lenient::text")]
    pub trip_type: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub cabin_class: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub departure_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub return_date: Option<String>,
}

impl SearchQuery {
    /// Travel date of a leg as `YYYY-MM-DD` when parseable.
    pub fn travel_date(&self, direction: Direction) -> Option<String> {
        let raw = match direction {
            Direction::Onward => self.departure_date.as_deref(),
            Direction::Return => self.return_date.as_deref(),
        };
        raw.map(lenient::normalize_date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub payment_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub method: Option<String>,
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Option<Amount>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub status: Option<String>,
}

/// The booking/payment record a purchase event is projected from.
/// Read-only for the purposes of this crate family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub booking_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub pnr: Option<String>,
    #[serde(deserialize_with = "lenient::object")]
    pub onward_flight: Option<FlightLeg>,
    #[serde(deserialize_with = "lenient::object")]
    pub return_flight: Option<FlightLeg>,
    #[serde(deserialize_with = "lenient::object_or_default")]
    pub ancillary_services: AncillaryServices,
    #[serde(deserialize_with = "lenient::list")]
    pub travellers: Vec<Traveller>,
    #[serde(deserialize_with = "lenient::object_or_default")]
    pub query: SearchQuery,
    #[serde(deserialize_with = "lenient::object")]
    pub payment: Option<PaymentInfo>,
}

impl BookingRecord {
    pub fn leg(&self, direction: Direction) -> Option<&FlightLeg> {
        match direction {
            Direction::Onward => self.onward_flight.as_ref(),
            Direction::Return => self.return_flight.as_ref(),
        }
    }

    /// Directions with a booked leg, in assembly order.
    pub fn directions(&self) -> impl Iterator<Item = (Direction, &FlightLeg)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.leg(direction).map(|leg| (direction, leg)))
    }

    pub fn passenger_count(&self) -> usize {
        self.travellers.len()
    }
}
