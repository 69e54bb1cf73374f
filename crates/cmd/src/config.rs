// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use diagnostics::*;
use toyfs::FsConfig;

/// Environment variable naming a configuration file when `--config` is absent
pub const CONFIG_ENV: &str = "TOYFS_CONFIG";

/// Pick the configuration file: the flag wins over the environment.
pub fn config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    choose_config_path(flag, std::env::var_os(CONFIG_ENV))
}

pub(crate) fn choose_config_path(flag: Option<PathBuf>, env: Option<OsString>) -> Option<PathBuf> {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Read a YAML configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FsConfig> {
    let Some(path) = path else {
        return Ok(FsConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = FsConfig::from_yaml_str(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    let path = path.display().to_string();
    let block_size = config.block_size;
    log_info!("Loaded config {path} with block size {block_size}", path: path, block_size: block_size);
    Ok(config)
}

/// The configuration in effect as YAML, every default spelled out.
pub fn render_config(config: &FsConfig) -> Result<String> {
    config.to_yaml_string().context("Failed to render the configuration")
}
