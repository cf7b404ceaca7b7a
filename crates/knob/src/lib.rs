pub mod controller;
pub mod cursor;
pub mod icon;
pub mod interpreter;
pub mod ipc;
pub mod macros;
pub mod pie;
pub mod slider;
pub mod value;
