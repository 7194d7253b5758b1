//! Server configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, `host:port`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:9000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        self.listen_addr
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.listen_addr.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listen_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_parse_toml() {
        let config: ServerConfig = toml::from_str(r#"listen_addr = "127.0.0.1:9100""#).unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9100");

        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_invalid_addr() {
        let config = ServerConfig {
            listen_addr: "localhost".to_string(),
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
