use anyhow::Context;
use dotenv::dotenv;
use heron_tariff::{PriceConfig, PriceFetcher, PriceSensor, SensorMetadata, poll_prices};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = PriceConfig::new().context("invalid price configuration")?;
    info!(
        "Polling {} every {:?} (timeout {:?})",
        config.price_url, config.poll_interval, config.request_timeout
    );
    let fetcher = PriceFetcher::new(config).context("failed to build HTTP client")?;
    let mut sensor = PriceSensor::new(SensorMetadata::default());
    poll_prices(&fetcher, &mut sensor, tokio::signal::ctrl_c()).await;
    Ok(())
}
