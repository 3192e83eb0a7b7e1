// Data Models
pub mod checked_items;
pub mod file_item;
pub mod revision;
pub mod selection_list;

pub use checked_items::{CheckedItem, CheckedItems, SelectionRegistry};
pub use file_item::{FileItem, FileStatus};
pub use revision::Revision;
pub use selection_list::SelectionList;
