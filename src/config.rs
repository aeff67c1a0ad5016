use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::price_scraper::CellLocator;

pub const ENV_PREFIX: &str = "HERON_";
pub const DEFAULT_PRICE_URL: &str = "https://www.heron.gr/prices-generous-guarantee/";

/// The env vars that configure price fetching, all optional.
#[derive(Debug, Deserialize)]
pub struct PriceEnv {
    #[serde(default = "default_price_url")]
    price_url: String,
    #[serde(default = "Surcharges::default_transport_system")]
    transport_system: f64,
    #[serde(default = "Surcharges::default_distribution_network")]
    distribution_network: f64,
    #[serde(default = "Surcharges::default_etemeap")]
    etemeap: f64,
    #[serde(default = "Surcharges::default_yko")]
    yko: f64,
    #[serde(default = "default_secs")]
    request_timeout_secs: u64,
    #[serde(default = "default_secs")]
    poll_interval_secs: u64,
    #[serde(default = "default_price_row")]
    price_row: usize,
    #[serde(default = "default_price_column")]
    price_column: usize,
    price_column_label: Option<String>,
}

fn default_price_url() -> String {
    DEFAULT_PRICE_URL.to_string()
}

fn default_secs() -> u64 {
    10
}

fn default_price_row() -> usize {
    1
}

fn default_price_column() -> usize {
    3
}

/// Regulatory fees added on top of the scraped market price, in €/kWh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surcharges {
    pub transport_system: f64,
    pub distribution_network: f64,
    pub etemeap: f64,
    pub yko: f64,
}

impl Surcharges {
    const TRANSPORT_SYSTEM: f64 = 0.00844;
    const DISTRIBUTION_NETWORK: f64 = 0.01415;
    const ETEMEAP: f64 = 0.017;
    const YKO: f64 = 0.01824;

    fn default_transport_system() -> f64 {
        Self::TRANSPORT_SYSTEM
    }

    fn default_distribution_network() -> f64 {
        Self::DISTRIBUTION_NETWORK
    }

    fn default_etemeap() -> f64 {
        Self::ETEMEAP
    }

    fn default_yko() -> f64 {
        Self::YKO
    }

    pub fn total(&self) -> f64 {
        self.transport_system + self.distribution_network + self.etemeap + self.yko
    }

    pub fn apply(&self, price: f64) -> f64 {
        price + self.transport_system + self.distribution_network + self.etemeap + self.yko
    }
}

impl Default for Surcharges {
    fn default() -> Self {
        Self {
            transport_system: Self::TRANSPORT_SYSTEM,
            distribution_network: Self::DISTRIBUTION_NETWORK,
            etemeap: Self::ETEMEAP,
            yko: Self::YKO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PriceConfig {
    pub price_url: String,
    pub surcharges: Surcharges,
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub locator: CellLocator,
}

impl PriceConfig {
    pub fn new() -> anyhow::Result<Self> {
        Self::try_from(PriceEnv::load_from_env()?)
    }

    /// Builds the config from explicit `(name, value)` pairs instead of the process env.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let price_env = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, PriceEnv>(vars)
            .context("failed to load variables into price config")?;
        Self::try_from(price_env)
    }

    /// Config pointing at `price_url` with every other setting at its default.
    pub fn for_url(price_url: impl Into<String>) -> Self {
        Self {
            price_url: price_url.into(),
            ..Self::default()
        }
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            price_url: default_price_url(),
            surcharges: Surcharges::default(),
            request_timeout: Duration::from_secs(default_secs()),
            poll_interval: Duration::from_secs(default_secs()),
            locator: CellLocator::default(),
        }
    }
}

impl TryFrom<PriceEnv> for PriceConfig {
    type Error = anyhow::Error;

    fn try_from(env: PriceEnv) -> anyhow::Result<Self> {
        if env.request_timeout_secs == 0 {
            anyhow::bail!("HERON_REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        if env.poll_interval_secs == 0 {
            anyhow::bail!("HERON_POLL_INTERVAL_SECS must be greater than zero");
        }
        let surcharges = Surcharges {
            transport_system: env.transport_system,
            distribution_network: env.distribution_network,
            etemeap: env.etemeap,
            yko: env.yko,
        };
        if !surcharges.total().is_finite() {
            anyhow::bail!("surcharges must be finite numbers");
        }
        let locator = match env.price_column_label {
            Some(label) if !label.trim().is_empty() => CellLocator::HeaderLabel {
                label: label.trim().to_string(),
                row: env.price_row,
            },
            _ => CellLocator::Position {
                row: env.price_row,
                column: env.price_column,
            },
        };
        Ok(Self {
            price_url: env.price_url,
            surcharges,
            request_timeout: Duration::from_secs(env.request_timeout_secs),
            poll_interval: Duration::from_secs(env.poll_interval_secs),
            locator,
        })
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
