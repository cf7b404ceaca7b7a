pub mod config;
pub mod events;
pub mod registry;

pub mod gui {
    pub mod app;
    pub mod pie;
    pub mod theme;
    pub mod window;
}

pub mod sys {
    pub mod runtime;
    pub mod server;
}
