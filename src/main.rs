use anyhow::Result;
use tracing::error;

use veritext::config::Config;
use veritext::{init_logging, services, web};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    if let Err(e) = services::initialize() {
        error!(error = %e, "failed to load linguistic resources");
        return Err(e.into());
    }

    let config = Config::load()?;
    web::run_server(config).await
}
