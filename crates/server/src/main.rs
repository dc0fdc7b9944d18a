#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bizquery_server::start().await
}
