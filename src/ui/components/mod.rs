// UI Components
pub mod command_bar;
pub mod compositor;
pub mod confirmation;
pub mod dialog;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use command_bar::{CommandBar, CommandItem};
pub use compositor::{compose, ComposedView};
pub use confirmation::{ConfirmOption, ConfirmationGate, GateOutcome, SelectionHints};
pub use dialog::{Dialog, DialogKind};
pub use status_bar::StatusBar;
pub use warning::WarningScreen;
