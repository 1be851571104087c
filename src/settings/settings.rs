use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub gateway: Gateway,
    pub http: Http,
    pub log: Log,
    pub storage: Storage,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub token_ttl_days: u64,
}

#[derive(Debug, Deserialize)]
pub struct Gateway {
    pub backend: String, // "http" or "static"
    pub endpoint: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
    pub backend: String, // "mysql" or "memory"
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
