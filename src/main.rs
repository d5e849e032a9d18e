#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nutricare_lib::run().await
}
