pub mod entry;
pub mod writer;

pub use entry::{ManifestEntry, ManualEntry};
pub use writer::{ManifestSummary, ManifestWriter, MANIFEST_HEADER};
