use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    wheelcov_cli::main_entry().await
}
