use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

use super::error::Error;
use super::types::Distance;

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    pub num_vertices: usize,
    pub infinity: Distance,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProducerConfig {
    pub batch_size: usize,
    pub channel_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WriterConfig {
    pub rebuild_limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearcherConfig {
    pub interval_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub interval_ms: u64,
    pub min_weight: Distance,
    pub max_weight: Distance,
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub engine: EngineConfig,
    pub producer: ProducerConfig,
    pub writer: WriterConfig,
    pub searcher: SearcherConfig,
    pub simulator: SimulatorConfig,
}

impl Config {
    fn validate(&self) -> Result<(), Error> {
        let checks = [
            (self.engine.num_vertices > 0, "engine.num_vertices must be positive"),
            (self.engine.infinity > 0, "engine.infinity must be positive"),
            (self.producer.batch_size > 0, "producer.batch_size must be positive"),
            (
                self.producer.channel_capacity > 0,
                "producer.channel_capacity must be positive",
            ),
            (self.writer.rebuild_limit > 0, "writer.rebuild_limit must be positive"),
            (
                self.searcher.interval_seconds > 0,
                "searcher.interval_seconds must be positive",
            ),
            (self.simulator.interval_ms > 0, "simulator.interval_ms must be positive"),
            (
                self.simulator.min_weight <= self.simulator.max_weight,
                "simulator.min_weight must not exceed simulator.max_weight",
            ),
            (
                self.simulator.max_weight < self.engine.infinity,
                "simulator.max_weight must stay below engine.infinity",
            ),
        ];

        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, reason)) => Err(Error::ConfigLoadError(reason.to_string())),
            None => Ok(()),
        }
    }
}

/// Loads configuration from a TOML file and `EXECUTOR_`-prefixed environment
/// variables (nested keys joined with `__`, e.g. `EXECUTOR_WRITER__REBUILD_LIMIT`).
pub fn load_config(config_file_path: &Path) -> Result<Config, Error> {
    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(
            File::from(config_file_path)
                .format(FileFormat::Toml)
                .required(true),
        )
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    app_config.validate()?;

    Ok(app_config)
}
