//! Session records and classification
//!
//! This module provides:
//! - The session records served by the Spjall sessions API
//! - The manifest labels (`Y`, `P`, `N`)
//! - The classification policy that labels each session
//! - Running duration totals for the collection

mod classifier;
mod label;
mod metadata;
mod totals;

pub use classifier::{Classification, ClassificationPolicy};
pub use label::Label;
pub use metadata::{ClientMetadata, SessionMetadata};
pub use totals::{DurationTotals, LabelCounts};
