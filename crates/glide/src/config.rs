use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use knob::controller::{
    self, CommandController, SharedController, ShellCommand, WorkspaceController,
};
use knob::icon::IconName;
use knob::ipc::ActionName;
use knob::pie::PieStyle;
use knob::slider::{Axis, Domain};
use knob::value::Value;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where a slider or pie menu reads and writes its value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ControllerConfig {
    Command {
        get: ShellCommand,
        set: ShellCommand,
        #[serde(default)]
        icons: HashMap<String, IconName>,
    },
    Workspace,
}

impl ControllerConfig {
    pub fn build(&self) -> SharedController {
        match self {
            ControllerConfig::Command { get, set, icons } => {
                controller::shared(CommandController::new(get.clone(), set.clone(), icons.clone()))
            }
            ControllerConfig::Workspace => controller::shared(WorkspaceController::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SliderConfig {
    pub name: ActionName,
    pub values: Domain,
    #[serde(default)]
    pub axis: Axis,
    /// Pixels the pointer must travel before values start changing.
    #[serde(default = "default_deadzone")]
    pub deadzone: u32,
    #[serde(default = "default_pixels_in_unit")]
    pub pixels_in_unit: f64,
    #[serde(default = "default_sleep_ms")]
    pub sleep_ms: u64,
    pub controller: ControllerConfig,
}

impl SliderConfig {
    pub fn sleep_time(&self) -> Duration {
        Duration::from_millis(self.sleep_ms)
    }
}

fn default_deadzone() -> u32 {
    10
}

fn default_pixels_in_unit() -> f64 {
    10.0
}

fn default_sleep_ms() -> u64 {
    16
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PieConfig {
    pub name: ActionName,
    pub values: Vec<Value>,
    pub controller: ControllerConfig,
    #[serde(default)]
    pub style: PieStyle,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default, rename = "slider")]
    pub sliders: Vec<SliderConfig>,
    #[serde(default, rename = "pie")]
    pub pies: Vec<PieConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Failed to write default config: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "glide", "glide").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("GLIDE"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, writing the default one first if there is none yet.
pub fn load_or_setup() -> Result<Config, ConfigError> {
    let path = write_default_config()?;
    log::info!("Loading config from {}", path.display());
    load_config()
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
        log::info!("Wrote default config to {}", path.display());
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", ConfigError::from(e));
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
pub(crate) fn from_toml(source: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(source, config::FileFormat::Toml))
        .build()?;
    Ok(s.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = from_toml(DEFAULT_CONFIG).unwrap();
        assert!(!config.sliders.is_empty());
        assert!(!config.pies.is_empty());
    }

    #[test]
    fn test_slider_defaults_and_range() {
        let config = from_toml(
            r#"
            [[slider]]
            name = "volume"
            values = { min = 0, max = 100 }
            axis = "V"
            controller = { kind = "command", get = "get-volume", set = "set-volume {}" }
            "#,
        )
        .unwrap();

        let slider = &config.sliders[0];
        assert_eq!(slider.name, ActionName::new("volume"));
        assert_eq!(slider.values, Domain::Range { min: 0.0, max: 100.0 });
        assert_eq!(slider.axis, Axis::Vertical);
        assert_eq!(slider.deadzone, 10);
        assert_eq!(slider.pixels_in_unit, 10.0);
        assert_eq!(slider.sleep_time(), Duration::from_millis(16));
        assert!(matches!(
            &slider.controller,
            ControllerConfig::Command { icons, .. } if icons.is_empty()
        ));
    }

    #[test]
    fn test_pie_with_list_values_and_style() {
        let config = from_toml(
            r#"
            [[pie]]
            name = "workspaces"
            values = [1, 2, "special"]

            [pie.controller]
            kind = "workspace"

            [pie.style]
            pie_radius = 150
            "#,
        )
        .unwrap();

        let pie = &config.pies[0];
        assert_eq!(
            pie.values,
            vec![Value::Number(1.0), Value::Number(2.0), Value::from("special")]
        );
        assert_eq!(pie.controller, ControllerConfig::Workspace);
        assert_eq!(pie.style.pie_radius, 150.0);
        assert_eq!(pie.style.icon_radius, PieStyle::default().icon_radius);
    }

    #[test]
    fn test_controller_icons() {
        let controller: ControllerConfig = serde_json::from_str(
            r#"{"kind": "command", "get": "g", "set": "s", "icons": {"quiet": "audio-volume-low"}}"#,
        )
        .unwrap();
        let ControllerConfig::Command { icons, .. } = controller else {
            panic!("expected a command controller");
        };
        assert_eq!(icons["quiet"], IconName::new("audio-volume-low"));
    }

    #[test]
    fn test_unknown_controller_kind_is_rejected() {
        let result = from_toml(
            r#"
            [[pie]]
            name = "x"
            values = [1]
            controller = { kind = "telepathy" }
            "#,
        );
        assert!(result.is_err());
    }
}
