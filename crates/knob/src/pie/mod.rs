pub mod angle;
pub mod label;
pub mod menu;
pub mod style;

pub use angle::AngleIterator;
pub use label::{Label, LabelError, LabelHolder};
pub use menu::PieMenu;
pub use style::PieStyle;
