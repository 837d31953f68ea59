use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Analytics route segmentation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectorType {
    Domestic,
    International,
}

/// Indian airports on the TLAirways network.
pub const DEFAULT_DOMESTIC_AIRPORTS: &[&str] = &[
    "DEL", "BOM", "BLR", "MAA", "CCU", "HYD", "AMD", "COK", "GOI", "PNQ", "JAI", "LKO", "TRV", "IXC",
    "GAU", "PAT", "BBI", "NAG", "IDR", "VNS", "SXR", "IXB", "CJB", "IXE", "VTZ", "IXR", "RPR", "BHO",
    "UDR", "ATQ",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    #[serde(default = "default_domestic_airports")]
    pub domestic_airports: Vec<String>,
}

fn default_domestic_airports() -> Vec<String> {
    DEFAULT_DOMESTIC_AIRPORTS.iter().map(|code| code.to_string()).collect()
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self { domestic_airports: default_domestic_airports() }
    }
}

/// Classifies routes as domestic or international.
#[derive(Debug, Clone)]
pub struct SectorClassifier {
    domestic: HashSet<String>,
}

impl Default for SectorClassifier {
    fn default() -> Self {
        Self { domestic: DEFAULT_DOMESTIC_AIRPORTS.iter().map(|code| code.to_string()).collect() }
    }
}

impl SectorClassifier {
    /// Codes must be three-letter IATA codes; case is ignored.
    pub fn new<I, S>(domestic_airports: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut domestic = HashSet::new();
        for code in domestic_airports {
            let code = normalize(code.as_ref());
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CatalogError::InvalidAirportCode(code));
            }
            domestic.insert(code);
        }
        Ok(Self { domestic })
    }

    pub fn from_config(config: &SectorConfig) -> Result<Self, CatalogError> {
        Self::new(&config.domestic_airports)
    }

    pub fn is_domestic(&self, code: &str) -> bool {
        self.domestic.contains(&normalize(code))
    }

    /// Domestic only when both ends are known domestic airports.
    pub fn classify(&self, origin: &str, destination: &str) -> SectorType {
        if self.is_domestic(origin) && self.is_domestic(destination) {
            SectorType::Domestic
        } else {
            SectorType::International
        }
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
