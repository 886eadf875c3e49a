#[tokio::main]
async fn main() -> std::io::Result<()> {
    club_registry::run().await
}
