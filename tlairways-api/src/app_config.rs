use serde::Deserialize;
use std::env;
use tlairways_catalog::{PriceTableConfig, SectorConfig};
use tlairways_order::DEFAULT_CURRENCY;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PriceTableConfig,
    #[serde(default)]
    pub sectors: SectorConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackingConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Forward purchase events to the sink in addition to returning them
    #[serde(default = "default_emit_events")]
    pub emit_events: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { currency: default_currency(), emit_events: default_emit_events() }
    }
}

fn default_currency() -> String { DEFAULT_CURRENCY.to_string() }

fn default_emit_events() -> bool { true }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `TLAIRWAYS__SERVER__PORT=9000` sets `server.port`
            .add_source(config::Environment::with_prefix("TLAIRWAYS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlairways_shared::Amount;

    #[test]
    fn test_sections_default_when_absent() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 9000}}"#).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.tracking.currency, "INR");
        assert!(config.tracking.emit_events);
        assert_eq!(config.pricing, PriceTableConfig::default());
        assert!(config.sectors.domestic_airports.iter().any(|code| code == "BOM"));
    }

    #[test]
    fn test_snake_case_pricing_keys_accept_fractions() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 8080\n[pricing]\nlounge_access = 1999.5\n[pricing.seats]\nextra_legroom = \"1,250\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.pricing.lounge_access, Amount::from_minor(199950));
        assert_eq!(config.pricing.seats.extra_legroom, Amount::from_major(1250));
        assert_eq!(config.pricing.priority_boarding, Amount::from_major(500));
    }
}
