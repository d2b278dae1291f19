use std::sync::Arc;

use anyhow::{anyhow, Context};
use customer_app::{telemetry, ApiUseCases, CustomerApi, CustomerUseCases, Route, Settings, Shell};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load().context("failed to load settings")?;
    telemetry::init(&settings.log.level);

    let start = match std::env::args().nth(1) {
        Some(path) => path.parse::<Route>().map_err(|e| anyhow!(e))?,
        None => Route::List,
    };
    tracing::info!(base_url = %settings.api.base_url, %start, "starting customer manager");

    let use_cases: Arc<dyn CustomerUseCases> =
        Arc::new(ApiUseCases::new(CustomerApi::with_reqwest(&settings.api.base_url)));

    let stdin = std::io::stdin();
    let mut shell = Shell::new(use_cases, stdin.lock(), std::io::stdout());
    shell.run(start).await?;
    Ok(())
}
