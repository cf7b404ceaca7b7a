use crate::config::{Config, PieConfig, SliderConfig};
use knob::cursor::CursorProvider;
use knob::ipc::ActionName;
use knob::pie::{LabelError, PieMenu};
use knob::slider::{Slider, SliderError, SliderHandler, SliderValues};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("slider '{name}': {source}")]
    Slider {
        name: ActionName,
        source: SliderError,
    },
    #[error("pie '{name}': {source}")]
    Label {
        name: ActionName,
        source: LabelError,
    },
    #[error("action '{0}' is defined more than once")]
    Duplicate(ActionName),
}

/// Every configured action, by name.
pub struct Registry {
    sliders: HashMap<ActionName, SliderHandler>,
    pies: HashMap<ActionName, PieMenu>,
}

impl Registry {
    pub fn build(config: &Config, cursor: Arc<dyn CursorProvider>) -> Result<Self, RegistryError> {
        let mut registry = Self {
            sliders: HashMap::new(),
            pies: HashMap::new(),
        };

        for cfg in &config.sliders {
            registry.ensure_unique(&cfg.name)?;
            let handler = SliderHandler::new(build_slider(cfg)?, cursor.clone());
            registry.sliders.insert(cfg.name.clone(), handler);
        }
        for cfg in &config.pies {
            registry.ensure_unique(&cfg.name)?;
            registry.pies.insert(cfg.name.clone(), build_pie(cfg)?);
        }

        log::info!(
            "Registered {} sliders and {} pie menus",
            registry.sliders.len(),
            registry.pies.len()
        );
        Ok(registry)
    }

    fn ensure_unique(&self, name: &ActionName) -> Result<(), RegistryError> {
        if self.contains(name) {
            return Err(RegistryError::Duplicate(name.clone()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &ActionName) -> bool {
        self.sliders.contains_key(name) || self.pies.contains_key(name)
    }

    pub fn slider_mut(&mut self, name: &ActionName) -> Option<&mut SliderHandler> {
        self.sliders.get_mut(name)
    }

    pub fn pie(&self, name: &ActionName) -> Option<&PieMenu> {
        self.pies.get(name)
    }

    pub fn pie_mut(&mut self, name: &ActionName) -> Option<&mut PieMenu> {
        self.pies.get_mut(name)
    }

    pub fn pies(&self) -> impl Iterator<Item = &PieMenu> {
        self.pies.values()
    }

    /// Ends every slider session and closes every pie menu without committing.
    pub fn stop_all(&mut self) {
        self.sliders.values_mut().for_each(SliderHandler::stop);
        self.pies.values_mut().for_each(PieMenu::cancel);
    }
}

fn build_slider(cfg: &SliderConfig) -> Result<Slider, RegistryError> {
    let invalid = |source| RegistryError::Slider {
        name: cfg.name.clone(),
        source,
    };
    let slider = Slider {
        name: cfg.name.clone(),
        values: SliderValues::new(cfg.values.clone()).map_err(invalid)?,
        controller: cfg.controller.build(),
        deadzone: cfg.deadzone,
        pixels_in_unit: cfg.pixels_in_unit,
        sleep_time: cfg.sleep_time(),
        axis: cfg.axis,
    };
    slider.check().map_err(invalid)?;
    Ok(slider)
}

fn build_pie(cfg: &PieConfig) -> Result<PieMenu, RegistryError> {
    PieMenu::new(
        cfg.name.clone(),
        cfg.values.clone(),
        cfg.controller.build(),
        cfg.style.clone(),
    )
    .map_err(|source| RegistryError::Label {
        name: cfg.name.clone(),
        source,
    })
}
