use crate::config::Config;
use crate::registry::{Registry, RegistryError};
use knob::cursor::{CursorProvider, Point};
use knob::ipc::ActionName;
use knob::pie::PieMenu;
use std::collections::HashMap;
use std::sync::Arc;

pub mod view;

pub use view::{LabelPainter, draw};

pub const REFERENCE_HEIGHT: f64 = 1440.0;
pub const ICON_SIZE: i32 = 256;
pub const ICON_INACTIVE_ALPHA: f64 = 0.6;

/// Registered actions, the painters of every pie menu, and which menu is open.
pub struct State {
    registry: Registry,
    painters: HashMap<ActionName, Vec<LabelPainter>>,
    cursor: Arc<dyn CursorProvider>,
    open: Option<ActionName>,
}

impl State {
    pub fn load(config: &Config, cursor: Arc<dyn CursorProvider>) -> Result<Self, RegistryError> {
        let registry = Registry::build(config, cursor.clone())?;
        let painters = create_painters(&registry)?;
        Ok(Self {
            registry,
            painters,
            cursor,
            open: None,
        })
    }

    /// Swaps in a registry built from `config`. On error the current one stays untouched.
    pub fn reload(&mut self, config: &Config) -> Result<(), RegistryError> {
        let registry = Registry::build(config, self.cursor.clone())?;
        let painters = create_painters(&registry)?;
        self.registry.stop_all();
        self.open = None;
        self.registry = registry;
        self.painters = painters;
        Ok(())
    }

    pub fn contains(&self, name: &ActionName) -> bool {
        self.registry.contains(name)
    }

    pub fn has_pie(&self, name: &ActionName) -> bool {
        self.registry.pie(name).is_some()
    }

    /// Starts the named slider. Returns false when there is no such slider.
    pub fn start_slider(&mut self, name: &ActionName) -> bool {
        let Some(handler) = self.registry.slider_mut(name) else {
            return false;
        };
        if let Err(e) = handler.start() {
            log::error!("Failed to start slider '{}': {}", name, e);
        }
        true
    }

    pub fn stop_slider(&mut self, name: &ActionName) -> bool {
        let Some(handler) = self.registry.slider_mut(name) else {
            return false;
        };
        handler.stop();
        true
    }

    /// Opens the named pie menu at `center`, closing any other open menu first.
    pub fn open_pie(&mut self, name: &ActionName, center: Point, scale: f64) -> bool {
        self.cancel();
        let Some(menu) = self.registry.pie_mut(name) else {
            return false;
        };
        match menu.press(center, scale) {
            Ok(()) => {
                self.open = Some(name.clone());
                true
            }
            Err(e) => {
                log::error!("Failed to open pie '{}': {}", name, e);
                false
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open_menu(&self) -> Option<(&PieMenu, &[LabelPainter])> {
        let name = self.open.as_ref()?;
        let menu = self.registry.pie(name)?;
        let painters = self.painters.get(name)?;
        Some((menu, painters.as_slice()))
    }

    /// Returns whether the open menu needs a redraw.
    pub fn update_cursor(&mut self, point: Point) -> bool {
        self.open_menu_mut()
            .is_some_and(|menu| menu.update_cursor(point))
    }

    /// Commits the named menu if it is the open one. Returns false otherwise.
    pub fn release_pie(&mut self, name: &ActionName) -> bool {
        if self.open.as_ref() != Some(name) {
            return false;
        }
        self.commit();
        true
    }

    /// Writes the active value of the open menu, if any, and closes it.
    pub fn commit(&mut self) {
        let Some(name) = self.open.take() else {
            return;
        };
        let Some(menu) = self.registry.pie_mut(&name) else {
            return;
        };
        match menu.release() {
            Ok(Some(value)) => log::info!("Pie '{}' set to {}", name, value),
            Ok(None) => log::debug!("Pie '{}' closed without a selection", name),
            Err(e) => log::error!("Pie '{}' failed to set value: {}", name, e),
        }
    }

    /// Closes the open menu without writing anything.
    pub fn cancel(&mut self) {
        if let Some(menu) = self.open_menu_mut() {
            menu.cancel();
        }
        self.open = None;
    }

    fn open_menu_mut(&mut self) -> Option<&mut PieMenu> {
        let name = self.open.as_ref()?;
        self.registry.pie_mut(name)
    }
}

fn create_painters(
    registry: &Registry,
) -> Result<HashMap<ActionName, Vec<LabelPainter>>, RegistryError> {
    registry
        .pies()
        .map(|menu| {
            let painters = menu
                .labels()
                .iter()
                .map(LabelPainter::new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| RegistryError::Label {
                    name: menu.name().clone(),
                    source,
                })?;
            Ok((menu.name().clone(), painters))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::from_toml;
    use knob::cursor::HyprCursorProvider;
    use std::path::{Path, PathBuf};

    const CENTER: Point = Point { x: 400.0, y: 300.0 };

    fn output_file(test: &str) -> PathBuf {
        std::env::temp_dir().join(format!("glide-{}-{}", test, std::process::id()))
    }

    fn letters_config(output: &Path) -> Config {
        from_toml(&format!(
            r#"
            [[pie]]
            name = "letters"
            values = ["a", "b", "c", "d"]
            controller = {{ kind = "command", get = "echo a", set = "printf %s {{}} > {}" }}

            [[slider]]
            name = "volume"
            values = {{ min = 0, max = 100 }}
            controller = {{ kind = "command", get = "echo 50", set = "true" }}
            "#,
            output.display()
        ))
        .unwrap()
    }

    fn load(output: &Path) -> State {
        State::load(&letters_config(output), Arc::new(HyprCursorProvider)).unwrap()
    }

    #[test]
    fn test_release_commits_active_value() {
        let output = output_file("release");
        let mut state = load(&output);
        let letters = ActionName::new("letters");

        assert!(state.has_pie(&letters));
        assert!(state.open_pie(&letters, CENTER, 1.0));
        let (menu, painters) = state.open_menu().unwrap();
        assert_eq!(painters.len(), menu.labels().len());

        // straight right of the center is the second of four labels
        assert!(state.update_cursor(Point::new(CENTER.x + 100.0, CENTER.y)));
        assert!(state.release_pie(&letters));
        assert!(!state.is_open());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "b");
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn test_cancel_and_foreign_release_commit_nothing() {
        let output = output_file("cancel");
        let mut state = load(&output);
        let letters = ActionName::new("letters");

        state.open_pie(&letters, CENTER, 1.0);
        state.update_cursor(Point::new(CENTER.x, CENTER.y + 100.0));
        assert!(!state.release_pie(&ActionName::new("volume")));
        assert!(state.is_open());

        state.cancel();
        assert!(!state.is_open());
        assert!(!state.update_cursor(Point::new(CENTER.x - 100.0, CENTER.y)));
        assert!(!output.exists());
    }

    #[test]
    fn test_actions_are_routed_by_kind() {
        let mut state = load(&output_file("routing"));
        let volume = ActionName::new("volume");
        assert!(state.contains(&volume));
        assert!(!state.has_pie(&volume));
        assert!(!state.open_pie(&volume, CENTER, 1.0));
        assert!(!state.start_slider(&ActionName::new("letters")));
        assert!(state.stop_slider(&volume));
        assert!(!state.start_slider(&ActionName::new("unknown")));
    }

    #[test]
    fn test_failed_reload_keeps_current_actions() {
        let mut state = load(&output_file("reload"));
        let letters = ActionName::new("letters");
        state.open_pie(&letters, CENTER, 1.0);

        let broken = from_toml(
            r#"
            [[slider]]
            name = "empty"
            values = []
            controller = { kind = "workspace" }
            "#,
        )
        .unwrap();
        assert!(state.reload(&broken).is_err());
        assert!(state.is_open());
        assert!(state.has_pie(&letters));

        assert!(state.reload(&Config::default()).is_ok());
        assert!(!state.is_open());
        assert!(!state.contains(&letters));
    }
}
