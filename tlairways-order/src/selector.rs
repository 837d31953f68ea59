use tlairways_catalog::{resolve_price, PriceSource, PriceTable, ResolvedPrice, SeatType, SubCategory};
use tlairways_shared::{AncillarySelection, BookingRecord, Direction};
use tracing::{debug, warn};

/// The purchased service behind an ancillary line item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AncillaryService {
    Seat {
        seat_number: String,
        seat_type: Option<SeatType>,
    },
    Baggage {
        weight_kg: u32,
        baggage_type: Option<String>,
    },
    PriorityBoarding,
    LoungeAccess,
}

impl AncillaryService {
    pub fn sub_category(&self) -> SubCategory {
        match self {
            AncillaryService::Seat { .. } => SubCategory::Seat,
            AncillaryService::Baggage { .. } => SubCategory::Baggage,
            AncillaryService::PriorityBoarding => SubCategory::PriorityBoarding,
            AncillaryService::LoungeAccess => SubCategory::LoungeAccess,
        }
    }
}

/// One priced ancillary for one traveller on one leg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaryLineItem {
    pub direction: Direction,
    pub traveller_index: usize,
    pub service: AncillaryService,
    pub price: ResolvedPrice,
}

impl AncillaryLineItem {
    pub fn sub_category(&self) -> SubCategory {
        self.service.sub_category()
    }
}

/// Fans ancillary selections out per leg and per traveller.
pub struct AncillarySelector<'a> {
    price_table: &'a PriceTable,
}

impl<'a> AncillarySelector<'a> {
    pub fn new(price_table: &'a PriceTable) -> Self {
        Self { price_table }
    }

    /// Line items in direction -> traveller -> category order.
    ///
    /// Only legs present on the booking are walked, so selections recorded for
    /// an unbooked leg or for a traveller index past the end of the traveller
    /// list never produce items.
    pub fn select(&self, record: &BookingRecord) -> Vec<AncillaryLineItem> {
        let mut items = Vec::new();

        for direction in Direction::ALL {
            let selections = record.ancillary_services.for_direction(direction);
            if record.leg(direction).is_none() {
                if !selections.is_empty() {
                    debug!(%direction, "Skipping ancillaries for a leg that was not booked");
                }
                continue;
            }

            for traveller_index in 0..record.travellers.len() {
                let Some(selection) = selections.get(traveller_index) else {
                    continue;
                };
                items.extend(self.price_selection(direction, traveller_index, selection));
            }
        }

        items
    }

    /// Items for a single selection: seat, baggage, priority boarding, lounge access.
    pub fn price_selection(
        &self,
        direction: Direction,
        traveller_index: usize,
        selection: &AncillarySelection,
    ) -> Vec<AncillaryLineItem> {
        let mut items = Vec::new();
        let mut push = |service: AncillaryService, price: ResolvedPrice| {
            if price.source == PriceSource::Fallback {
                warn!(
                    %direction,
                    traveller_index,
                    sub_category = %service.sub_category(),
                    "No carried or table price for ancillary, defaulting to 0"
                );
            }
            items.push(AncillaryLineItem { direction, traveller_index, service, price });
        };

        if let Some(seat_number) = selection.seat_number.as_deref() {
            let seat_type = SeatType::resolve(selection.seat_type.as_deref(), seat_number);
            let table = seat_type.map(|seat_type| self.price_table.seat_price(seat_type));
            push(
                AncillaryService::Seat { seat_number: seat_number.to_string(), seat_type },
                resolve_price(selection.seat_price, table),
            );
        }

        if let Some(weight_kg) = selection.baggage {
            push(
                AncillaryService::Baggage { weight_kg, baggage_type: selection.baggage_type.clone() },
                resolve_price(selection.baggage_price, self.price_table.baggage_price(weight_kg)),
            );
        }

        if selection.priority_boarding {
            push(
                AncillaryService::PriorityBoarding,
                resolve_price(
                    selection.priority_boarding_price,
                    Some(self.price_table.priority_boarding_price()),
                ),
            );
        }

        if selection.lounge_access {
            push(
                AncillaryService::LoungeAccess,
                resolve_price(selection.lounge_access_price, Some(self.price_table.lounge_access_price())),
            );
        }

        items
    }
}
