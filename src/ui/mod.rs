// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

pub use layout::{LayoutManager, LayoutMode};
pub use theme::{Theme, ThemeManager};

pub use components::{CommandBar, Dialog, DialogKind, StatusBar, WarningScreen};
