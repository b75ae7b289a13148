use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tb_expiry::cli::run().await
}
