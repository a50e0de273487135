use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use accessgrid_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where the policy store keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub storage: StorageConfig,
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub seed_system_catalog: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(|name| env::var(name).ok(), migrate_only)
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        migrate_only: bool,
    ) -> Result<Self, AppError> {
        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StorageConfig::Postgres {
                database_url: required_non_empty(&lookup, "DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if migrate_only && storage == StorageConfig::Memory {
            return Err(AppError::Validation(
                "migrate requires STORAGE_BACKEND=postgres".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or(&lookup, "API_PORT", 3001)?;
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let seed_system_catalog = parse_or(&lookup, "SEED_SYSTEM_CATALOG", true)?;

        Ok(Self {
            migrate_only,
            storage,
            api_host,
            api_port,
            frontend_url,
            seed_system_catalog,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use accessgrid_core::AppError;

    use super::{ApiConfig, StorageConfig};

    fn load(vars: &[(&str, &str)], migrate_only: bool) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned(), migrate_only)
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let result = load(&[], false);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn defaults_apply_for_postgres() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/accessgrid")], false)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.storage,
            StorageConfig::Postgres {
                database_url: "postgres://localhost/accessgrid".to_owned(),
                max_connections: 10,
            }
        );
        assert_eq!(config.api_port, 3001);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert!(config.seed_system_catalog);
        assert_eq!(
            config
                .socket_address()
                .map(|address| address.to_string())
                .unwrap_or_default(),
            "127.0.0.1:3001"
        );
    }

    #[test]
    fn memory_backend_parses_overrides() {
        let config = load(
            &[
                ("STORAGE_BACKEND", "memory"),
                ("API_PORT", "8080"),
                ("SEED_SYSTEM_CATALOG", "false"),
            ],
            false,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(config.api_port, 8080);
        assert!(!config.seed_system_catalog);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(load(&[("STORAGE_BACKEND", "redis")], false).is_err());
        assert!(load(&[("STORAGE_BACKEND", "memory"), ("API_PORT", "http")], false).is_err());
        assert!(load(&[("STORAGE_BACKEND", "memory")], true).is_err());
    }
}
