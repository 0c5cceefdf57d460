mod catalogue;
pub mod changes;
pub mod detectors;
pub mod imports;

pub use changes::recommend_changes;
pub use detectors::{get_issues, scan_sources, Detector, DetectorRegistry, ScanResult};
pub use imports::{recommend_imports, referenced_types};
