use tlairways_shared::BookingRecord;

/// Booking-level rejections, checked before a purchase event is built
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Booking has no travellers")]
    NoTravellers,

    #[error("Booking has neither an onward nor a return flight")]
    NoFlights,
}

/// The assembler accepts anything; callers that expose it publicly reject
/// bookings that cannot describe a purchase.
pub fn validate_booking(record: &BookingRecord) -> Result<(), OrderError> {
    if record.travellers.is_empty() {
        return Err(OrderError::NoTravellers);
    }
    if record.directions().next().is_none() {
        return Err(OrderError::NoFlights);
    }
    Ok(())
}
