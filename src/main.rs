#[tokio::main]
async fn main() {
    travel_buddy_be::start_server().await;
}
