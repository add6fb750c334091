//! # netreport Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the netreport configuration. The
//! configuration only covers presentation and tool selection: which
//! executables each step invokes, which speedtest server is targeted, and
//! the labels printed in the report. Running without any configuration file
//! reproduces the default (Portuguese) report.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit `--config <PATH>` file (skips 2 and 3)
//! 2. Project-specific `.netreport.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/netreport/config.toml`
//! 4. Default values defined in the code
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! let nmap = &cfg.tools.nmap;
//! let server = &cfg.bandwidth.server_id;
//! let title = &cfg.labels.title;
//! ```
//!
use crate::core::error::{NetreportError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub bandwidth: BandwidthConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Executables invoked for context discovery and for each probe.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Routing table / address inspector.
    pub ip: String,
    /// Wireless device inspector.
    pub iw: String,
    /// Network mapper used for device discovery.
    pub nmap: String,
    /// Bandwidth tester.
    pub speedtest: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ip: "ip".to_string(),
            iw: "iw".to_string(),
            nmap: "nmap".to_string(),
            speedtest: "speedtest".to_string(),
        }
    }
}

/// Bandwidth probe target.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BandwidthConfig {
    /// Speedtest server identifier (3696 is a São Paulo server).
    pub server_id: String,
}

impl Default for BandwidthConfig {
    fn default() -> Self {
        Self {
            server_id: "3696".to_string(),
        }
    }
}

/// Labels printed in the report.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub title: String,
    pub default_interface: String,
    pub cidr: String,
    pub devices: String,
    pub wifi_interface: String,
    pub frequency: String,
    pub bandwidth: String,
    /// `chrono` strftime format for the header timestamp.
    pub timestamp_format: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            title: "Relatório de Rede".to_string(),
            default_interface: "Interface padrão".to_string(),
            cidr: "CIDR".to_string(),
            devices: "Dispositivos conectados (nmap -sn)".to_string(),
            wifi_interface: "Interface WiFi".to_string(),
            frequency: "Frequência de conexão".to_string(),
            bandwidth: "Speedtest (São Paulo)".to_string(),
            timestamp_format: "%d/%m/%Y %H:%M:%S".to_string(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".netreport.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read (after `~` expansion) and a
/// missing file is an error. Otherwise user and project files are merged over
/// the defaults; both are optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            load_config_from_path(&expanded)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("", "", "netreport") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
            Ok(None)
        }
    }
}

/// Walks from `start` towards the root looking for `.netreport.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Picks `project` where it differs from the built-in default, `user` otherwise.
fn pick(user: String, project: String, default: &str) -> String {
    if project != default {
        project
    } else {
        user
    }
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let tools = ToolsConfig::default();
    let bandwidth = BandwidthConfig::default();
    let labels = LabelsConfig::default();

    Config {
        tools: ToolsConfig {
            ip: pick(user.tools.ip, project.tools.ip, &tools.ip),
            iw: pick(user.tools.iw, project.tools.iw, &tools.iw),
            nmap: pick(user.tools.nmap, project.tools.nmap, &tools.nmap),
            speedtest: pick(
                user.tools.speedtest,
                project.tools.speedtest,
                &tools.speedtest,
            ),
        },
        bandwidth: BandwidthConfig {
            server_id: pick(
                user.bandwidth.server_id,
                project.bandwidth.server_id,
                &bandwidth.server_id,
            ),
        },
        labels: LabelsConfig {
            title: pick(user.labels.title, project.labels.title, &labels.title),
            default_interface: pick(
                user.labels.default_interface,
                project.labels.default_interface,
                &labels.default_interface,
            ),
            cidr: pick(user.labels.cidr, project.labels.cidr, &labels.cidr),
            devices: pick(user.labels.devices, project.labels.devices, &labels.devices),
            wifi_interface: pick(
                user.labels.wifi_interface,
                project.labels.wifi_interface,
                &labels.wifi_interface,
            ),
            frequency: pick(
                user.labels.frequency,
                project.labels.frequency,
                &labels.frequency,
            ),
            bandwidth: pick(
                user.labels.bandwidth,
                project.labels.bandwidth,
                &labels.bandwidth,
            ),
            timestamp_format: pick(
                user.labels.timestamp_format,
                project.labels.timestamp_format,
                &labels.timestamp_format,
            ),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let single_words = [
        ("tools.ip", &config.tools.ip),
        ("tools.iw", &config.tools.iw),
        ("tools.nmap", &config.tools.nmap),
        ("tools.speedtest", &config.tools.speedtest),
        ("bandwidth.server_id", &config.bandwidth.server_id),
    ];
    for (key, value) in single_words {
        if value.trim().is_empty() {
            return Err(anyhow!(NetreportError::Config(format!(
                "'{key}' must not be empty."
            ))));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(anyhow!(NetreportError::Config(format!(
                "'{key}' must be a single word, got '{value}'."
            ))));
        }
    }
    let timestamp_format = &config.labels.timestamp_format;
    // Some specifiers parse but cannot be rendered; only a real render proves the format.
    let mut sample = String::new();
    if timestamp_format.is_empty()
        || write!(sample, "{}", chrono::Local::now().format(timestamp_format)).is_err()
    {
        return Err(anyhow!(NetreportError::Config(format!(
            "'labels.timestamp_format' is not a valid strftime format: '{timestamp_format}'."
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
