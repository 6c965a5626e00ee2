use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    nestly::cli::run().await
}
