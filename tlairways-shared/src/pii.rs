use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Traveller contact data that must never reach logs or analytics payloads.
///
/// `Debug`, `Display` and `Serialize` all emit the mask; use [`Masked::expose`]
/// when the raw value is genuinely needed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

const MASK: &str = "********";

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(MASK)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_everywhere() {
        let email = Masked("asha@example.com".to_string());

        assert_eq!(format!("{:?}", email), MASK);
        assert_eq!(email.to_string(), MASK);
        assert_eq!(serde_json::to_string(&email).unwrap(), format!("\"{}\"", MASK));
        assert_eq!(email.expose(), "asha@example.com");
    }
}
