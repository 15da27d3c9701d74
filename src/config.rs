// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `WALLET_APP_ID` | Wallet SDK application ID | Required in `remote` mode |
//! | `WALLET_NETWORK` | `sepolia` or `mainnet` | `sepolia` |
//! | `WALLET_SDK_MODE` | `sandbox` or `remote` | `sandbox` |
//! | `WALLET_SDK_URL` | Wallet SDK backend base URL | Required in `remote` mode |
//! | `TOKEN_ADDRESS` | Token contract targeted by approvals | STRK |
//! | `TOKEN_SYMBOL` | Display symbol of that token | `STRK` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | Unset |
//! | `TLS_KEY_PATH` | PEM private key | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

use crate::blockchain::{FeltAddress, NetworkConfig, STARKNET_SEPOLIA, STRK_TOKEN};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const APP_ID_ENV: &str = "WALLET_APP_ID";
pub const NETWORK_ENV: &str = "WALLET_NETWORK";
pub const SDK_MODE_ENV: &str = "WALLET_SDK_MODE";
pub const SDK_URL_ENV: &str = "WALLET_SDK_URL";
pub const TOKEN_ADDRESS_ENV: &str = "TOKEN_ADDRESS";
pub const TOKEN_SYMBOL_ENV: &str = "TOKEN_SYMBOL";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const SANDBOX_APP_ID: &str = "sandbox";

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which wallet SDK adapter serves requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkMode {
    Sandbox,
    Remote { base_url: Url },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub app_id: String,
    pub network: NetworkConfig,
    pub sdk_mode: SdkMode,
    pub token_address: FeltAddress,
    pub token_symbol: String,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: PORT_ENV,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let bind_addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    name: HOST_ENV,
                    reason: e.to_string(),
                })?;

        let network = match get(NETWORK_ENV) {
            Some(raw) => raw
                .parse::<NetworkConfig>()
                .map_err(|reason| ConfigError::Invalid {
                    name: NETWORK_ENV,
                    reason,
                })?,
            None => STARKNET_SEPOLIA,
        };

        let mode = get(SDK_MODE_ENV).unwrap_or_else(|| "sandbox".to_string());
        let sdk_mode = match mode.to_ascii_lowercase().as_str() {
            "sandbox" => SdkMode::Sandbox,
            "remote" => {
                let raw = get(SDK_URL_ENV).ok_or(ConfigError::Missing(SDK_URL_ENV))?;
                let base_url = Url::parse(&raw).map_err(|e| ConfigError::Invalid {
                    name: SDK_URL_ENV,
                    reason: e.to_string(),
                })?;
                SdkMode::Remote { base_url }
            }
            other => {
                return Err(ConfigError::Invalid {
                    name: SDK_MODE_ENV,
                    reason: format!("expected `sandbox` or `remote`, got `{other}`"),
                })
            }
        };

        let app_id = match (&sdk_mode, get(APP_ID_ENV)) {
            (_, Some(id)) => id,
            (SdkMode::Sandbox, None) => SANDBOX_APP_ID.to_string(),
            (SdkMode::Remote { .. }, None) => return Err(ConfigError::Missing(APP_ID_ENV)),
        };

        let token_raw = get(TOKEN_ADDRESS_ENV).unwrap_or_else(|| STRK_TOKEN.address.to_string());
        let token_address =
            FeltAddress::parse(&token_raw).map_err(|e| ConfigError::Invalid {
                name: TOKEN_ADDRESS_ENV,
                reason: e.to_string(),
            })?;
        let token_symbol = get(TOKEN_SYMBOL_ENV).unwrap_or_else(|| STRK_TOKEN.symbol.to_string());

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref().map(str::to_ascii_lowercase) {
            Some(f) if f == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr,
            app_id,
            network,
            sdk_mode,
            token_address,
            token_symbol,
            tls,
            log_format,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            app_id: SANDBOX_APP_ID.to_string(),
            network: STARKNET_SEPOLIA,
            sdk_mode: SdkMode::Sandbox,
            token_address: FeltAddress::from_static(STRK_TOKEN.address),
            token_symbol: STRK_TOKEN.symbol.to_string(),
            tls: None,
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::blockchain::STARKNET_MAINNET;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_to_sandbox_on_sepolia() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.sdk_mode, SdkMode::Sandbox);
        assert_eq!(config.network, STARKNET_SEPOLIA);
        assert_eq!(config.token_address.as_str(), STRK_TOKEN.address);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.tls.is_none());
    }

    #[test]
    fn remote_mode_requires_url_and_app_id() {
        assert!(matches!(
            load(&[(SDK_MODE_ENV, "remote")]),
            Err(ConfigError::Missing(SDK_URL_ENV))
        ));
        assert!(matches!(
            load(&[(SDK_MODE_ENV, "remote"), (SDK_URL_ENV, "https://sdk.example.invalid")]),
            Err(ConfigError::Missing(APP_ID_ENV))
        ));

        let config = load(&[
            (SDK_MODE_ENV, "Remote"),
            (SDK_URL_ENV, "https://sdk.example.invalid"),
            (APP_ID_ENV, "bc1ba377"),
            (NETWORK_ENV, "mainnet"),
        ])
        .unwrap();
        assert!(matches!(config.sdk_mode, SdkMode::Remote { .. }));
        assert_eq!(config.app_id, "bc1ba377");
        assert_eq!(config.network, STARKNET_MAINNET);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            load(&[(PORT_ENV, "http")]),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(NETWORK_ENV, "goerli")]),
            Err(ConfigError::Invalid { name: NETWORK_ENV, .. })
        ));
        assert!(matches!(
            load(&[(TOKEN_ADDRESS_ENV, "strk")]),
            Err(ConfigError::Invalid { name: TOKEN_ADDRESS_ENV, .. })
        ));
        assert!(matches!(
            load(&[(TLS_CERT_PATH_ENV, "/tmp/cert.pem")]),
            Err(ConfigError::Missing(TLS_KEY_PATH_ENV))
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[(PORT_ENV, "  "), (LOG_FORMAT_ENV, "JSON")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
