use serde_json::{json, Value};
use tlairways_shared::BookingRecord;

/// Round trip BOM -> DXB -> BOM for one traveller, no ancillaries.
pub fn base_booking() -> Value {
    json!({
        "bookingId": "665f1c2e9b1e8a0012ab3456",
        "pnr": "TLX7Q2",
        "onwardFlight": {
            "flightNumber": "TL101",
            "origin": {"iata_code": "BOM", "city": "Mumbai"},
            "destination": {"iata_code": "DXB", "city": "Dubai"},
            "currentPrice": 5000
        },
        "returnFlight": {
            "flightNumber": "TL102",
            "origin": {"iata_code": "DXB", "city": "Dubai"},
            "destination": {"iata_code": "BOM", "city": "Mumbai"},
            "currentPrice": 4800
        },
        "travellers": [{"firstName": "Asha", "lastName": "Rao"}],
        "ancillaryServices": {},
        "query": {
            "tripType": "round-trip",
            "cabinClass": "economy",
            "departureDate": "2025-03-14",
            "returnDate": "2025-03-21"
        }
    })
}

/// The base booking with top-level keys replaced by `overrides`.
pub fn booking(overrides: Value) -> BookingRecord {
    let mut record = base_booking();
    if let (Some(base), Value::Object(overrides)) = (record.as_object_mut(), overrides) {
        for (key, value) in overrides {
            base.insert(key, value);
        }
    }
    serde_json::from_value(record).expect("fixture booking decodes")
}
