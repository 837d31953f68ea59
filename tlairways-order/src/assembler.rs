use crate::models::{ProductDetails, ProductLineItem};
use crate::selector::{AncillaryLineItem, AncillarySelector, AncillaryService};
use tlairways_catalog::{PriceTable, SectorClassifier, SectorType, SubCategory};
use tlairways_shared::{Amount, BookingRecord, Direction, FlightLeg, SearchQuery, Traveller, NOT_AVAILABLE};
use tracing::{debug, warn};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Builds the purchase event product list from a booking record
#[derive(Debug, Clone)]
pub struct PurchaseAssembler {
    price_table: PriceTable,
    sectors: SectorClassifier,
    currency: String,
}

impl Default for PurchaseAssembler {
    fn default() -> Self {
        Self::new(PriceTable::default(), SectorClassifier::default(), DEFAULT_CURRENCY)
    }
}

struct Route<'a> {
    origin: &'a str,
    destination: &'a str,
    sector_type: SectorType,
}

impl PurchaseAssembler {
    pub fn new(price_table: PriceTable, sectors: SectorClassifier, currency: impl Into<String>) -> Self {
        Self { price_table, sectors, currency: currency.into() }
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.price_table
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Onward flight, return flight, then every ancillary line item.
    ///
    /// Never fails: missing data is skipped or replaced by `"N/A"`.
    pub fn assemble(&self, record: &BookingRecord) -> Vec<ProductLineItem> {
        let passenger_count = u32::try_from(record.passenger_count()).unwrap_or(u32::MAX);
        let mut products = Vec::new();

        for (direction, leg) in record.directions() {
            products.push(self.flight_product(direction, leg, passenger_count, &record.query));
        }

        let ancillaries = AncillarySelector::new(&self.price_table).select(record);
        for item in ancillaries {
            if let Some(leg) = record.leg(item.direction) {
                products.push(self.ancillary_product(item, leg, &record.travellers));
            }
        }

        debug!(
            products = products.len(),
            passengers = passenger_count,
            "Assembled purchase product list"
        );
        products
    }

    /// Domestic/international for the booking as a whole, taken from its first leg.
    pub fn booking_sector(&self, record: &BookingRecord) -> Option<SectorType> {
        record
            .directions()
            .next()
            .map(|(_, leg)| self.sectors.classify(leg.origin_code(), leg.destination_code()))
    }

    fn route<'a>(&self, leg: &'a FlightLeg) -> Route<'a> {
        let origin = leg.origin_code();
        let destination = leg.destination_code();
        Route { origin, destination, sector_type: self.sectors.classify(origin, destination) }
    }

    fn flight_product(
        &self,
        direction: Direction,
        leg: &FlightLeg,
        passenger_count: u32,
        query: &SearchQuery,
    ) -> ProductLineItem {
        let route = self.route(leg);
        let flight_number = leg.flight_number();
        let unit_price = match leg.current_price {
            Some(price) => price.non_negative(),
            None => {
                warn!(%direction, flight_number, "Flight leg has no current price, defaulting to 0");
                Amount::ZERO
            }
        };

        ProductLineItem {
            product_id: format!("{}-{}", flight_number, direction),
            product_name: format!("{} {}-{}", flight_number, route.origin, route.destination),
            category: SubCategory::from(direction).category(),
            sub_category: SubCategory::from(direction),
            price: unit_price.saturating_mul(passenger_count),
            quantity: passenger_count,
            currency: self.currency.clone(),
            journey_type: direction,
            origin: route.origin.to_string(),
            destination: route.destination.to_string(),
            sector_type: route.sector_type,
            details: ProductDetails::Flight {
                flight_number: flight_number.to_string(),
                unit_price,
                cabin_class: query.cabin_class.clone(),
                travel_date: query.travel_date(direction).or_else(|| leg.departure_date()),
            },
        }
    }

    fn ancillary_product(
        &self,
        item: AncillaryLineItem,
        leg: &FlightLeg,
        travellers: &[Traveller],
    ) -> ProductLineItem {
        let route = self.route(leg);
        let sub_category = item.sub_category();
        let passenger_index = item.traveller_index;
        let passenger_name = travellers
            .get(passenger_index)
            .map(Traveller::display_name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let (product_name, details) = match item.service {
            AncillaryService::Seat { seat_number, seat_type } => (
                format!("Seat {}", seat_number),
                ProductDetails::Seat { seat_number, seat_type, passenger_index, passenger_name },
            ),
            AncillaryService::Baggage { weight_kg, baggage_type } => (
                format!("Extra Baggage {}kg", weight_kg),
                ProductDetails::Baggage { weight_kg, baggage_type, passenger_index, passenger_name },
            ),
            AncillaryService::PriorityBoarding => (
                "Priority Boarding".to_string(),
                ProductDetails::Passenger { passenger_index, passenger_name },
            ),
            AncillaryService::LoungeAccess => (
                "Lounge Access".to_string(),
                ProductDetails::Passenger { passenger_index, passenger_name },
            ),
        };

        ProductLineItem {
            product_id: format!(
                "{}-{}-{}-p{}",
                sub_category,
                item.direction,
                leg.flight_number(),
                passenger_index
            ),
            product_name,
            category: sub_category.category(),
            sub_category,
            price: item.price.amount,
            quantity: 1,
            currency: self.currency.clone(),
            journey_type: item.direction,
            origin: route.origin.to_string(),
            destination: route.destination.to_string(),
            sector_type: route.sector_type,
            details,
        }
    }
}
