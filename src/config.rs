use crate::error::{DashError, Result};
use crate::process::SortKey;
use crate::widgets::graph::GraphStyle;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const MIN_REFRESH: f64 = 0.5;
pub const MAX_REFRESH: f64 = 10.0;
pub const REFRESH_STEP: f64 = 0.5;

/// Clamp a refresh interval in seconds to the supported range.
pub fn clamp_refresh(seconds: f64) -> f64 {
    if seconds.is_nan() {
        return MIN_REFRESH;
    }
    seconds.clamp(MIN_REFRESH, MAX_REFRESH)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn format(self, celsius: f64) -> String {
        match self {
            TempUnit::Celsius => format!("{:.0}°C", celsius),
            TempUnit::Fahrenheit => format!("{:.0}°F", celsius * 9.0 / 5.0 + 32.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub cpu: bool,
    pub memory: bool,
    pub network: bool,
    pub disk: bool,
    pub gpu: bool,
    pub processes: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            cpu: true,
            memory: true,
            network: true,
            disk: true,
            gpu: true,
            processes: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds between samples.
    pub refresh_rate: f64,
    /// Samples kept per graphed series.
    pub history_size: usize,
    pub theme: String,
    pub graph_style: GraphStyle,
    pub show_graphs: bool,
    /// Box-drawing borders and bars; ASCII when false.
    pub unicode_borders: bool,
    pub temp_unit: TempUnit,
    pub max_cores: usize,
    pub max_disks: usize,
    pub max_interfaces: usize,
    /// Upper bound on processes kept per snapshot.
    pub max_processes: usize,
    /// Ticks between process list refreshes.
    pub process_update_interval: u32,
    pub sort_by: SortKey,
    pub tree_view: bool,
    pub panels: PanelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 1.0,
            history_size: 120,
            theme: "default".to_string(),
            graph_style: GraphStyle::Braille,
            show_graphs: true,
            unicode_borders: true,
            temp_unit: TempUnit::Celsius,
            max_cores: 8,
            max_disks: 4,
            max_interfaces: 2,
            max_processes: 200,
            process_update_interval: 2,
            sort_by: SortKey::Cpu,
            tree_view: false,
            panels: PanelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the config at `path`, or the default location when `None`.
    ///
    /// A missing file yields defaults. An unreadable or malformed file is an
    /// error so the caller can decide whether to fall back.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            tracing::debug!("no config at '{}', using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| DashError::Config(format!("TOML parse error: {e}")))?;
        Ok(config.validated())
    }

    /// Like [`AppConfig::load_from`], logging and falling back to defaults on error.
    pub fn load(path: Option<&Path>) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!("{err}; using default config");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()
                .ok_or_else(|| DashError::Config("config directory not available".into()))?,
        };
        self.save_to(&path)?;
        Ok(path)
    }

    /// Bring every field into its supported range.
    pub fn validated(mut self) -> Self {
        self.refresh_rate = clamp_refresh(self.refresh_rate);
        self.history_size = self.history_size.clamp(10, 3600);
        self.max_cores = self.max_cores.clamp(1, 256);
        self.max_disks = self.max_disks.clamp(1, 32);
        self.max_interfaces = self.max_interfaces.min(16);
        self.max_processes = self.max_processes.max(1);
        self.process_update_interval = self.process_update_interval.max(1);
        if crate::theme::Theme::index_of(&self.theme).is_none() {
            tracing::warn!("unknown theme '{}', using default", self.theme);
            self.theme = "default".to_string();
        }
        self
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sysdash").join("config.toml"))
    }
}
