pub mod document;
pub mod table;

pub use document::{to_document, LINES_PER_PAGE};
pub use table::to_table;
