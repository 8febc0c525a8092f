use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pytutor::run().await
}
