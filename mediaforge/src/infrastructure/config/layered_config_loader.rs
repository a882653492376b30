// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Produces the four [`ConfigLayer`]s a [`ConfigResolver`] consults, in
//! precedence order: the job descriptor's own `config_overrides` map,
//! a job-local `.env`-style file sitting next to `job.json`, a system
//! config file (TOML, read through the `config` crate so `.env`,
//! `.toml`, and `.yaml` variants all work), and finally the compiled-in
//! defaults from [`super::defaults`].

use super::defaults::hard_coded_defaults;
use mediaforge_domain::error::MediaforgeError;
use mediaforge_domain::services::ConfigResolver;
use mediaforge_domain::value_objects::{ConfigLayer, ConfigLayerKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct LayeredConfigLoader {
    system_config_path: Option<PathBuf>,
}

impl LayeredConfigLoader {
    pub fn new(system_config_path: Option<PathBuf>) -> Self {
        Self { system_config_path }
    }

    /// Loads all four layers for one job and hands back an owned set the
    /// caller can build a [`ConfigResolver`] over — the resolver itself
    /// borrows, so it cannot outlive this call's local variables.
    pub async fn load_layers(
        &self,
        job_descriptor_overrides: &HashMap<String, String>,
        job_local_env_path: Option<&Path>,
    ) -> Result<Vec<ConfigLayer>, MediaforgeError> {
        let job_descriptor = ConfigLayer::new(ConfigLayerKind::JobDescriptor, job_descriptor_overrides.clone());
        let job_local_env = match job_local_env_path {
            Some(path) => Self::read_env_file(path).await?,
            None => ConfigLayer::new(ConfigLayerKind::JobLocalEnv, HashMap::new()),
        };
        let system_config = self.read_system_config()?;
        let defaults = hard_coded_defaults();

        Ok(vec![job_descriptor, job_local_env, system_config, defaults])
    }

    pub fn resolver<'a>(layers: &'a [ConfigLayer]) -> ConfigResolver<'a> {
        ConfigResolver::new(layers)
    }

    async fn read_env_file(path: &Path) -> Result<ConfigLayer, MediaforgeError> {
        let mut values = HashMap::new();
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                for line in contents.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((key, value)) = line.split_once('=') {
                        values.insert(key.trim().to_string(), value.trim().trim_matches('"').to_string());
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(MediaforgeError::io_error(format!("reading {}: {e}", path.display()))),
        }
        Ok(ConfigLayer::new(ConfigLayerKind::JobLocalEnv, values))
    }

    /// Reads a system-wide TOML config shaped as nested stage tables
    /// (`[asr] executable_path = "..."`) and flattens it to the
    /// `<stage>.<key>` dotted form every other layer uses.
    fn read_system_config(&self) -> Result<ConfigLayer, MediaforgeError> {
        let Some(path) = &self.system_config_path else {
            return Ok(ConfigLayer::new(ConfigLayerKind::SystemConfig, HashMap::new()));
        };
        if !path.exists() {
            return Ok(ConfigLayer::new(ConfigLayerKind::SystemConfig, HashMap::new()));
        }

        let source = config::Config::builder()
            .add_source(config::File::from(path.as_path()).required(false))
            .build()
            .map_err(|e| MediaforgeError::config_missing(format!("loading {}: {e}", path.display())))?;

        let nested: HashMap<String, HashMap<String, String>> = source
            .try_deserialize()
            .map_err(|e| MediaforgeError::config_missing(format!("parsing {}: {e}", path.display())))?;

        let mut values = HashMap::new();
        for (stage, stage_values) in nested {
            for (key, value) in stage_values {
                values.insert(format!("{stage}.{key}"), value);
            }
        }
        Ok(ConfigLayer::new(ConfigLayerKind::SystemConfig, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn job_descriptor_overrides_outrank_everything_else() {
        let loader = LayeredConfigLoader::new(None);
        let mut overrides = HashMap::new();
        overrides.insert("asr.executable_path".to_string(), "/job/custom-whisper".to_string());

        let layers = loader.load_layers(&overrides, None).await.unwrap();
        let resolved = LayeredConfigLoader::resolver(&layers).resolve("asr.executable_path").unwrap();
        assert_eq!(resolved.value, "/job/custom-whisper");
    }

    #[tokio::test]
    async fn falls_back_to_hard_coded_default_when_nothing_else_defines_the_key() {
        let loader = LayeredConfigLoader::new(None);
        let layers = loader.load_layers(&HashMap::new(), None).await.unwrap();
        let resolved = LayeredConfigLoader::resolver(&layers).resolve("mux.executable_path").unwrap();
        assert_eq!(resolved.value, "ffmpeg");
    }

    #[tokio::test]
    async fn job_local_env_file_is_read_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let env_path = tmp.path().join("job.env");
        tokio::fs::write(&env_path, "translate.executable_path=/job/local-translate\n").await.unwrap();

        let loader = LayeredConfigLoader::new(None);
        let layers = loader.load_layers(&HashMap::new(), Some(&env_path)).await.unwrap();
        let resolved = LayeredConfigLoader::resolver(&layers).resolve("translate.executable_path").unwrap();
        assert_eq!(resolved.value, "/job/local-translate");
    }

    #[tokio::test]
    async fn system_config_is_read_and_flattened() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("system.toml");
        tokio::fs::write(&config_path, "[asr]\nexecutable_path = \"/opt/whisper\"\n").await.unwrap();

        let loader = LayeredConfigLoader::new(Some(config_path));
        let layers = loader.load_layers(&HashMap::new(), None).await.unwrap();
        let resolved = LayeredConfigLoader::resolver(&layers).resolve("asr.executable_path").unwrap();
        assert_eq!(resolved.value, "/opt/whisper");
    }
}
