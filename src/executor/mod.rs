pub mod batch;
pub mod scanner;

pub use batch::{ArtifactPolicy, BatchExecutor};
pub use scanner::{ProcessScanner, ScanOutput, Scanner};
