use std::env;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "4100".to_string());
        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let api_url =
            env::var("BAYLINE_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());

        Ok(Config {
            port,
            cors_origin,
            api_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test so the PORT variable is not mutated concurrently.
    #[test]
    fn test_port_validation() {
        std::env::set_var("PORT", "0");
        assert!(matches!(
            Config::from_env().unwrap_err(),
            ConfigError::PortOutOfRange(0)
        ));

        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env().unwrap_err(),
            ConfigError::InvalidPort(_)
        ));

        std::env::set_var("PORT", "4200");
        assert_eq!(Config::from_env().unwrap().port, 4200);
        std::env::remove_var("PORT");
    }
}
