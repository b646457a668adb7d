#[tokio::main]
async fn main() {
    carmay::start_server().await;
}
