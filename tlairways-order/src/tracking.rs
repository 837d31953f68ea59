use crate::assembler::PurchaseAssembler;
use crate::models::ProductLineItem;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tlairways_catalog::SectorType;
use tlairways_shared::{Amount, BookingRecord, NOT_AVAILABLE};
use uuid::Uuid;

pub const PURCHASE_EVENT_TYPE: &str = "commerce.purchases";

/// Per-event identity, passed in explicitly rather than read from page globals
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingContext {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl TrackingContext {
    pub fn now() -> Self {
        Self { event_id: Uuid::new_v4(), timestamp: Utc::now() }
    }
}

/// Purchase event payload handed to the analytics emitter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEvent {
    pub event_type: String,
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub commerce: Commerce,
    pub product_list_items: Vec<ProductListItem>,
    pub booking: BookingSummary,
    pub products: Vec<ProductLineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commerce {
    pub purchases: PurchaseCount,
    pub order: CommerceOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseCount {
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommerceOrder {
    #[serde(rename = "purchaseID")]
    pub purchase_id: String,
    pub price_total: Amount,
    pub currency_code: String,
    pub payments_list: Vec<PaymentEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    pub payment_type: String,
    pub payment_amount: Amount,
    pub currency_code: String,
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
}

/// Product entry in the analytics schema's `productListItems` shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    #[serde(rename = "SKU")]
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub price_total: Amount,
    pub currency_code: String,
    pub product_categories: Vec<ProductCategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCategoryRef {
    #[serde(rename = "categoryID")]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub booking_id: Option<String>,
    pub pnr: Option<String>,
    pub trip_type: String,
    pub passenger_count: usize,
    pub sector_type: Option<SectorType>,
    pub cabin_class: Option<String>,
}

/// Projects assembled products into `productListItems` entries.
pub fn product_list_items(products: &[ProductLineItem]) -> Vec<ProductListItem> {
    products
        .iter()
        .map(|product| ProductListItem {
            sku: product.product_id.clone(),
            name: product.product_name.clone(),
            quantity: product.quantity,
            price_total: product.price,
            currency_code: product.currency.clone(),
            product_categories: vec![ProductCategoryRef {
                category_id: format!("{}/{}", product.category.as_str(), product.sub_category),
            }],
        })
        .collect()
}

/// Builds the full purchase event for a confirmed booking.
pub fn build_payment_tracking(
    assembler: &PurchaseAssembler,
    record: &BookingRecord,
    context: &TrackingContext,
) -> PurchaseEvent {
    let products = assembler.assemble(record);
    let price_total = products.iter().fold(Amount::ZERO, |total, p| total.saturating_add(p.price));
    let currency = assembler.currency().to_string();

    let payments_list = record
        .payment
        .as_ref()
        .map(|payment| PaymentEntry {
            payment_type: payment.method.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            payment_amount: payment.amount.map(Amount::non_negative).unwrap_or(price_total),
            currency_code: payment.currency.clone().unwrap_or_else(|| currency.clone()),
            transaction_id: payment.payment_id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
        .into_iter()
        .collect();

    PurchaseEvent {
        event_type: PURCHASE_EVENT_TYPE.to_string(),
        event_id: context.event_id,
        timestamp: context.timestamp,
        commerce: Commerce {
            purchases: PurchaseCount { value: 1 },
            order: CommerceOrder {
                purchase_id: purchase_id(record),
                price_total,
                currency_code: currency,
                payments_list,
            },
        },
        product_list_items: product_list_items(&products),
        booking: BookingSummary {
            booking_id: record.booking_id.clone(),
            pnr: record.pnr.clone(),
            trip_type: trip_type(record),
            passenger_count: record.passenger_count(),
            sector_type: assembler.booking_sector(record),
            cabin_class: record.query.cabin_class.clone(),
        },
        products,
    }
}

/// `pnr`, then `bookingId`, then the payment id, then `"N/A"`.
fn purchase_id(record: &BookingRecord) -> String {
    record
        .pnr
        .as_deref()
        .or(record.booking_id.as_deref())
        .or(record.payment.as_ref().and_then(|p| p.payment_id.as_deref()))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// The queried trip type, else derived from whether a return leg was booked.
fn trip_type(record: &BookingRecord) -> String {
    match (&record.query.trip_type, &record.return_flight) {
        (Some(trip_type), _) => trip_type.clone(),
        (None, Some(_)) => "round-trip".to_string(),
        (None, None) => "one-way".to_string(),
    }
}
