use crate::relation::AdjType;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GraphConfig {
    #[serde(default)]
    pub adj_type: AdjType,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    #[serde(default = "default_batch_size_item")]
    pub batch_size_item: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Draw budget for a single rejection loop; `None` keeps the loop unbounded.
    #[serde(default = "default_max_draws")]
    pub max_draws: Option<usize>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            batch_size_item: default_batch_size_item(),
            seed: default_seed(),
            max_draws: default_max_draws(),
        }
    }
}

fn default_batch_size_item() -> usize {
    1024
}

fn default_seed() -> u64 {
    2020
}

fn default_max_draws() -> Option<usize> {
    Some(100_000)
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

impl LoaderConfig {
    /// Layers `config/default`, `config/{RUN_MODE}` and `JPPREC_*` variables.
    /// Every layer is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment());

        builder.build()?.try_deserialize()
    }

    /// Loads one file on top of the defaults. The format follows the extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("JPPREC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_select_single_side_normalization() {
        let config = LoaderConfig::default();
        assert_eq!(config.graph.adj_type, AdjType::Si);
        assert_eq!(config.sampler.batch_size_item, 1024);
        assert_eq!(config.sampler.max_draws, Some(100_000));
    }

    #[test]
    fn from_file_overrides_selected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[graph]\nadj_type = \"ngcf\"\n\n[sampler]\nbatch_size_item = 64").unwrap();

        let config = LoaderConfig::from_file(&path).unwrap();
        assert_eq!(config.graph.adj_type, AdjType::Ngcf);
        assert_eq!(config.sampler.batch_size_item, 64);
        assert_eq!(config.sampler.seed, 2020);
    }

    #[test]
    fn unknown_scheme_falls_back_to_single_side() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loader.toml");
        std::fs::write(&path, "[graph]\nadj_type = \"plain\"\n").unwrap();

        let config = LoaderConfig::from_file(&path).unwrap();
        assert_eq!(config.graph.adj_type, AdjType::Si);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LoaderConfig::from_file(dir.path().join("absent.toml")).is_err());
    }
}
