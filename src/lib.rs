pub mod api;
pub mod config;
pub mod manifest;
pub mod pipeline;
pub mod report;
pub mod session;

pub use api::SessionsClient;
pub use config::Config;
pub use manifest::{ManifestEntry, ManifestWriter, ManualEntry};
pub use pipeline::{run, RunSummary};
pub use session::{
    Classification, ClassificationPolicy, ClientMetadata, DurationTotals, Label, LabelCounts,
    SessionMetadata,
};
