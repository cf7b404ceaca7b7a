use knob::ipc::{ActionName, Request};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Press(ActionName),
    Release(ActionName),
    Hide,
    ConfigReload,
}

impl From<Request> for AppEvent {
    fn from(request: Request) -> Self {
        match request {
            Request::Press(name) => AppEvent::Press(name),
            Request::Release(name) => AppEvent::Release(name),
            Request::Hide => AppEvent::Hide,
        }
    }
}
