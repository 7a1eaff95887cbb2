#[tokio::main]
async fn main() {
    invitation_backend::run().await;
}
