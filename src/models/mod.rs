pub mod profile;
pub mod request;
pub mod scan_result;

pub use profile::{Profile, ProfileSet};
pub use request::{DateRange, ScanRequest};
pub use scan_result::{ScanResult, ScanStatus};
