use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    relnotes::run().await
}
