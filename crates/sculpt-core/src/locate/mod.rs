pub mod selection;
pub mod units;
pub mod words;

pub use selection::{validate_selection, Granularity, SelectionAnalysis};
pub use units::{locate_unit, resolve_selection};
pub use words::{is_identifier, locate_word};
