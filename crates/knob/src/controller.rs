use crate::icon::{self, IconName};
use crate::value::Value;
use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::Workspace;
use hyprland::dispatch::{Dispatch, DispatchType, WorkspaceIdentifierWithSpecial};
use hyprland::error::HyprError;
use hyprland::prelude::*;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ShellCommand(String);

crate::impl_string_newtype!(ShellCommand);

/// What a pie label shows for a value.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelDisplay {
    Text(String),
    Image(PathBuf),
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Hypr(#[from] HyprError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("`{command}` exited with {status}")]
    Command { command: String, status: ExitStatus },
    #[error("value `{0}` is not accepted by this controller")]
    UnsupportedValue(Value),
}

/// Reads and writes one tracked property.
///
/// `get_value` answers from the state cached by the last `refresh`.
pub trait Controller: Send {
    fn refresh(&mut self) -> Result<(), ControllerError>;

    fn get_value(&self) -> Value;

    fn set_value(&mut self, value: &Value) -> Result<(), ControllerError>;

    fn get_label(&self, value: &Value) -> Option<LabelDisplay>;
}

/// Controller handle shared between the main loop and a tracking thread.
pub type SharedController = Arc<Mutex<Box<dyn Controller>>>;

pub fn shared(controller: impl Controller + 'static) -> SharedController {
    Arc::new(Mutex::new(Box::new(controller)))
}

/// Drives a property through shell commands.
///
/// `get` prints the current value. In `set`, `{}` is replaced by the shell-quoted value; a
/// template without a placeholder gets the value appended as its last argument.
pub struct CommandController {
    get: ShellCommand,
    set: ShellCommand,
    icons: HashMap<String, IconName>,
    current: Value,
}

impl CommandController {
    pub fn new(get: ShellCommand, set: ShellCommand, icons: HashMap<String, IconName>) -> Self {
        Self {
            get,
            set,
            icons,
            current: Value::Text(String::new()),
        }
    }

    fn render_set(&self, value: &Value) -> String {
        let quoted = shell_words::quote(&value.to_string()).into_owned();
        if self.set.contains("{}") {
            self.set.replace("{}", &quoted)
        } else {
            format!("{} {}", self.set.as_str(), quoted)
        }
    }
}

fn sh(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn check(command: &str, status: ExitStatus) -> Result<(), ControllerError> {
    if status.success() {
        Ok(())
    } else {
        Err(ControllerError::Command {
            command: command.to_string(),
            status,
        })
    }
}

impl Controller for CommandController {
    fn refresh(&mut self) -> Result<(), ControllerError> {
        let output = sh(&self.get).stderr(Stdio::null()).output()?;
        check(&self.get, output.status)?;
        self.current = Value::parse(&String::from_utf8_lossy(&output.stdout));
        Ok(())
    }

    fn get_value(&self) -> Value {
        self.current.clone()
    }

    fn set_value(&mut self, value: &Value) -> Result<(), ControllerError> {
        if *value == self.current {
            return Ok(());
        }
        let command = self.render_set(value);
        let status = sh(&command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        check(&command, status)?;
        self.current = value.clone();
        Ok(())
    }

    fn get_label(&self, value: &Value) -> Option<LabelDisplay> {
        let text = value.to_string();
        if let Some(name) = self.icons.get(&text) {
            match icon::find_icon_path(name) {
                Some(path) => return Some(LabelDisplay::Image(path)),
                None => log::warn!("Icon '{}' for '{}' not found, showing text", name, text),
            }
        }
        (!text.is_empty()).then_some(LabelDisplay::Text(text))
    }
}

/// Switches Hyprland workspaces by numeric id.
#[derive(Debug, Default)]
pub struct WorkspaceController {
    current: Option<i32>,
}

impl WorkspaceController {
    pub fn new() -> Self {
        Self::default()
    }

    fn workspace_id(value: &Value) -> Result<i32, ControllerError> {
        value
            .as_number()
            .filter(|n| n.fract() == 0.0 && *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX))
            .map(|n| n as i32)
            .ok_or_else(|| ControllerError::UnsupportedValue(value.clone()))
    }
}

impl Controller for WorkspaceController {
    fn refresh(&mut self) -> Result<(), ControllerError> {
        self.current = Some(Workspace::get_active()?.id);
        Ok(())
    }

    fn get_value(&self) -> Value {
        self.current
            .map(|id| Value::Number(f64::from(id)))
            .unwrap_or(Value::Number(1.0))
    }

    fn set_value(&mut self, value: &Value) -> Result<(), ControllerError> {
        let id = Self::workspace_id(value)?;
        if self.current == Some(id) {
            return Ok(());
        }
        Dispatch::call(DispatchType::Workspace(WorkspaceIdentifierWithSpecial::Id(
            id,
        )))?;
        self.current = Some(id);
        Ok(())
    }

    fn get_label(&self, value: &Value) -> Option<LabelDisplay> {
        Some(LabelDisplay::Text(value.to_string()))
    }
}
