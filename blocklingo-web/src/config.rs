use std::env;
use std::path::PathBuf;

use blocklingo_translate::{Direction, Strategy, TranslateError, TranslateResult};

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub locales_dir: PathBuf,
    pub dropdown_map: PathBuf,
    /// Direction the dropdown mapping file is written in
    pub mapping: Direction,
    pub strategy: Strategy,
}

impl ServerConfig {
    /// Read configuration from environment variables
    ///
    /// - `BLOCKLINGO_HOST` (default `127.0.0.1`)
    /// - `PORT` (default `3000`)
    /// - `BLOCKLINGO_LOCALES` (default `data/locales`)
    /// - `BLOCKLINGO_DROPDOWN_MAP` (default `data/dropdown_map.json`)
    /// - `BLOCKLINGO_MAPPING` (default `en-to-ja`)
    /// - `BLOCKLINGO_STRATEGY`: `tree` or `pattern` (default `tree`)
    pub fn from_env() -> TranslateResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> TranslateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("PORT", "3000").parse::<u16>().map_err(|e| {
            TranslateError::ConfigLoadFailure(format!("PORT must be a port number: {}", e))
        })?;

        Ok(ServerConfig {
            host: var("BLOCKLINGO_HOST", "127.0.0.1"),
            port,
            locales_dir: PathBuf::from(var("BLOCKLINGO_LOCALES", "data/locales")),
            dropdown_map: PathBuf::from(var("BLOCKLINGO_DROPDOWN_MAP", "data/dropdown_map.json")),
            mapping: var("BLOCKLINGO_MAPPING", "en-to-ja").parse()?,
            strategy: var("BLOCKLINGO_STRATEGY", "tree").parse()?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> TranslateResult<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.locales_dir, PathBuf::from("data/locales"));
        assert_eq!(config.dropdown_map, PathBuf::from("data/dropdown_map.json"));
        assert_eq!(config.mapping.to_string(), "en-to-ja");
        assert_eq!(config.strategy, Strategy::Tree);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("BLOCKLINGO_HOST", "0.0.0.0"),
            ("BLOCKLINGO_STRATEGY", "pattern"),
            ("BLOCKLINGO_MAPPING", "en-to-ko"),
        ])
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.strategy, Strategy::Pattern);
        assert_eq!(config.mapping.target(), "ko");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(TranslateError::ConfigLoadFailure(_))
        ));
        assert!(matches!(
            config(&[("BLOCKLINGO_MAPPING", "japanese")]),
            Err(TranslateError::InvalidDirection(_))
        ));
        assert!(matches!(
            config(&[("BLOCKLINGO_STRATEGY", "fuzzy")]),
            Err(TranslateError::InvalidStrategy(_))
        ));
    }
}
