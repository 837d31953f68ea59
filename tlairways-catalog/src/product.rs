use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tlairways_shared::Direction;

/// Top-level product category in the purchase event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Flight,
    Ancillary,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Flight => "flight",
            ProductCategory::Ancillary => "ancillary",
        }
    }
}

/// Sub-category: the leg for flights, the service kind for ancillaries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SubCategory {
    Onward,
    Return,
    Seat,
    Baggage,
    PriorityBoarding,
    LoungeAccess,
}

impl SubCategory {
    /// Ancillary kinds in the order they are emitted per traveller.
    pub const ANCILLARIES: [SubCategory; 4] = [
        SubCategory::Seat,
        SubCategory::Baggage,
        SubCategory::PriorityBoarding,
        SubCategory::LoungeAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubCategory::Onward => "onward",
            SubCategory::Return => "return",
            SubCategory::Seat => "seat",
            SubCategory::Baggage => "baggage",
            SubCategory::PriorityBoarding => "priorityBoarding",
            SubCategory::LoungeAccess => "loungeAccess",
        }
    }

    pub fn category(&self) -> ProductCategory {
        match self {
            SubCategory::Onward | SubCategory::Return => ProductCategory::Flight,
            _ => ProductCategory::Ancillary,
        }
    }
}

impl From<Direction> for SubCategory {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Onward => SubCategory::Onward,
            Direction::Return => SubCategory::Return,
        }
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeatType {
    Standard,
    Window,
    Aisle,
    ExtraLegroom,
    Preferred,
}

impl SeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatType::Standard => "standard",
            SeatType::Window => "window",
            SeatType::Aisle => "aisle",
            SeatType::ExtraLegroom => "extra_legroom",
            SeatType::Preferred => "preferred",
        }
    }

    /// Infers the seat type from the seat letter of a six-abreast cabin.
    pub fn infer_from_seat_number(seat_number: &str) -> Option<SeatType> {
        let letter = seat_number.trim().chars().last()?.to_ascii_uppercase();
        match letter {
            'A' | 'F' => Some(SeatType::Window),
            'C' | 'D' => Some(SeatType::Aisle),
            'B' | 'E' => Some(SeatType::Standard),
            _ => None,
        }
    }

    /// The carried seat type when it parses, otherwise the inferred one.
    pub fn resolve(carried: Option<&str>, seat_number: &str) -> Option<SeatType> {
        carried
            .and_then(|raw| raw.parse().ok())
            .or_else(|| Self::infer_from_seat_number(seat_number))
    }
}

impl FromStr for SeatType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "standard" => Ok(SeatType::Standard),
            "window" => Ok(SeatType::Window),
            "aisle" => Ok(SeatType::Aisle),
            "extralegroom" => Ok(SeatType::ExtraLegroom),
            "preferred" => Ok(SeatType::Preferred),
            _ => Err(CatalogError::UnknownSeatType(s.to_string())),
        }
    }
}

impl fmt::Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_type_parsing_variants() {
        assert_eq!("Window".parse::<SeatType>().unwrap(), SeatType::Window);
        assert_eq!("extra-legroom".parse::<SeatType>().unwrap(), SeatType::ExtraLegroom);
        assert_eq!("extraLegroom".parse::<SeatType>().unwrap(), SeatType::ExtraLegroom);
        assert_eq!("extra legroom".parse::<SeatType>().unwrap(), SeatType::ExtraLegroom);
        assert!(matches!("bunk".parse::<SeatType>(), Err(CatalogError::UnknownSeatType(_))));
    }

    #[test]
    fn test_seat_type_inference() {
        assert_eq!(SeatType::infer_from_seat_number("12A"), Some(SeatType::Window));
        assert_eq!(SeatType::infer_from_seat_number("3d"), Some(SeatType::Aisle));
        assert_eq!(SeatType::infer_from_seat_number("7E"), Some(SeatType::Standard));
        assert_eq!(SeatType::infer_from_seat_number("14K"), None);
        assert_eq!(SeatType::infer_from_seat_number(""), None);
    }

    #[test]
    fn test_carried_seat_type_wins_over_inference() {
        assert_eq!(SeatType::resolve(Some("preferred"), "12A"), Some(SeatType::Preferred));
        assert_eq!(SeatType::resolve(Some("bunk"), "12A"), Some(SeatType::Window));
        assert_eq!(SeatType::resolve(None, "12Z"), None);
    }

    #[test]
    fn test_sub_category_serialization() {
        assert_eq!(serde_json::to_string(&SubCategory::PriorityBoarding).unwrap(), "\"priorityBoarding\"");
        assert_eq!(SubCategory::from(Direction::Return).category(), ProductCategory::Flight);
        assert_eq!(SubCategory::LoungeAccess.category(), ProductCategory::Ancillary);
    }
}
