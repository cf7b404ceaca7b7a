use crate::config;
use crate::events::AppEvent;
use crate::gui::pie::{self, State};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gtk::prelude::*;
use gtk4 as gtk;
use knob::cursor::{self, Point};
use knob::ipc::ActionName;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<State>>,
    pub visible: bool,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Press(ActionName),
    Release(ActionName),
    Hide,
    Click(u32),
    CursorMove(Point),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Press(name) => AppMsg::Press(name),
            AppEvent::Release(name) => AppMsg::Release(name),
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (State, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Glide"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "glide-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "glide-drawing-area",

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::CursorMove(Point::new(x, y)));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_released[sender] => move |gesture, _, _, _| {
                            sender.input(AppMsg::Click(gesture.current_button()));
                        }
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            visible: false,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let state = state_draw.borrow();
                let Some((menu, painters)) = state.open_menu() else {
                    return;
                };
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = pie::draw(cr, menu, painters, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Press(name) => self.press(&name),
            AppMsg::Release(name) => {
                let mut state = self.state.borrow_mut();
                if state.stop_slider(&name) {
                    return;
                }
                if state.release_pie(&name) {
                    self.visible = false;
                } else if !state.contains(&name) {
                    log::warn!("Release for unknown action '{}'", name);
                }
            }
            AppMsg::Hide => {
                self.state.borrow_mut().cancel();
                self.visible = false;
            }
            AppMsg::Click(btn) => {
                if !self.visible {
                    return;
                }
                let mut state = self.state.borrow_mut();
                if btn == 3 {
                    state.cancel();
                } else {
                    state.commit();
                }
                self.visible = false;
            }
            AppMsg::CursorMove(point) => {
                if !self.visible {
                    return;
                }
                if self.state.borrow_mut().update_cursor(point) {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => match self.state.borrow_mut().reload(&new_config) {
                    Ok(()) => {
                        self.visible = false;
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Keeping previous configuration: {}", e),
                },
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn press(&mut self, name: &ActionName) {
        let mut state = self.state.borrow_mut();
        if state.start_slider(name) {
            return;
        }
        if !state.has_pie(name) {
            log::warn!("Press for unknown action '{}'", name);
            return;
        }

        let scale = cursor::get_active_monitor()
            .map(|monitor| window::place_on_monitor(&self.root, &monitor))
            .unwrap_or(1.0);
        let center = window::get_cursor_position(&self.root)
            .or_else(cursor::get_cursor_pos_on_active_monitor)
            .unwrap_or_default();

        self.visible = state.open_pie(name, center, scale);
        self.drawing_area.queue_draw();
    }
}
