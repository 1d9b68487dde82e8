#[tokio::main]
async fn main() {
    travel_booking_backend::run().await;
}
