#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rosterguard::cli::run().await
}
