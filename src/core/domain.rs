use std::net::SocketAddr;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::GatewayPublisherVia;

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> i64;
}

// DuplicatePolicy decides what adding a book under an existing id does
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum DuplicatePolicy {
    Reject,
    Overwrite,
}

// ServerRuntime selects how the HTTP router is driven
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum ServerRuntime {
    Local,
    Lambda,
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub listen_addr: SocketAddr,
    pub runtime: ServerRuntime,
    pub seed_catalog: bool,
    pub duplicate_policy: DuplicatePolicy,
    pub log_level: String,
    pub publisher: GatewayPublisherVia,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            runtime: ServerRuntime::Local,
            seed_catalog: true,
            duplicate_policy: DuplicatePolicy::Reject,
            log_level: "info".to_string(),
            publisher: GatewayPublisherVia::Logs,
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // builds configuration from CATALOG_* variables, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(
            lookup("CATALOG_BRANCH").unwrap_or_else(|| "dev".to_string()).as_str());
        if let Some(addr) = lookup("CATALOG_LISTEN_ADDR") {
            config.listen_addr = addr.parse().map_err(|_| invalid("CATALOG_LISTEN_ADDR", &addr))?;
        }
        if let Some(runtime) = lookup("CATALOG_RUNTIME") {
            config.runtime = match runtime.to_lowercase().as_str() {
                "local" => ServerRuntime::Local,
                "lambda" => ServerRuntime::Lambda,
                _ => return Err(invalid("CATALOG_RUNTIME", &runtime)),
            };
        }
        if let Some(seed) = lookup("CATALOG_SEED") {
            config.seed_catalog = match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(invalid("CATALOG_SEED", &seed)),
            };
        }
        if let Some(policy) = lookup("CATALOG_DUPLICATE_POLICY") {
            config.duplicate_policy = match policy.to_lowercase().as_str() {
                "reject" => DuplicatePolicy::Reject,
                "overwrite" => DuplicatePolicy::Overwrite,
                _ => return Err(invalid("CATALOG_DUPLICATE_POLICY", &policy)),
            };
        }
        if let Some(level) = lookup("CATALOG_LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => config.log_level = level.to_lowercase(),
                _ => return Err(invalid("CATALOG_LOG_LEVEL", &level)),
            }
        }
        if let Some(publisher) = lookup("CATALOG_PUBLISHER") {
            config.publisher = match publisher.to_lowercase().as_str() {
                "logs" => GatewayPublisherVia::Logs,
                "memory" => GatewayPublisherVia::Memory,
                _ => return Err(invalid("CATALOG_PUBLISHER", &publisher)),
            };
        }
        Ok(config)
    }
}

fn invalid(key: &str, value: &str) -> LibraryError {
    LibraryError::validation(
        format!("invalid value {:?} for {}", value, key).as_str(), Some(key.to_string()))
}
