mod config;
mod error;
mod fetcher;
mod poller;
mod price_scraper;
mod requests;
mod sensor;
mod text_manipulators;

pub use config::{DEFAULT_PRICE_URL, PriceConfig, Surcharges};
pub use error::{ErrorKind, FetchError};
pub use fetcher::PriceFetcher;
pub use poller::poll_prices;
pub use price_scraper::{CellLocator, parse_price, scrape_price};
pub use sensor::{DeviceClass, PriceSensor, SensorMetadata, SensorState, StateClass};
