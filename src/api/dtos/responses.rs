use crate::domain::models::{booking::Booking, listing::Listing};
use serde::Serialize;

#[derive(Serialize)]
pub struct BookingWithListing {
    #[serde(flatten)]
    pub booking: Booking,
    pub listing: Option<Listing>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub success: bool,
    pub message: String,
    pub booking: BookingWithListing,
    pub booking_reference: String,
    pub payment_id: String,
}
