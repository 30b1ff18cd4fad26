use crate::session::Label;
use serde::Deserialize;

/// One row of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub session_id: String,
    pub label: Label,
    pub name: Option<String>,
    pub note: Option<String>,
}

impl ManifestEntry {
    /// Row for a session classified from the API
    pub fn session(session_id: impl Into<String>, label: Label) -> Self {
        Self {
            session_id: session_id.into(),
            label,
            name: None,
            note: None,
        }
    }

    /// Render the row without a line terminator.
    ///
    /// Values are written as-is, with no quoting or escaping. Rows without a
    /// name or note keep a trailing empty `name` column; rows with either get
    /// both a `name` and a `note` column.
    pub fn to_line(&self) -> String {
        match (&self.name, &self.note) {
            (None, None) => format!("{},{},", self.session_id, self.label),
            (name, note) => format!(
                "{},{},{},{}",
                self.session_id,
                self.label,
                name.as_deref().unwrap_or_default(),
                note.as_deref().unwrap_or_default()
            ),
        }
    }
}

fn default_counted() -> bool {
    true
}

/// A recording that belongs to the collection but is not (fully) served by the
/// sessions API, appended to the manifest after the classified sessions
#[derive(Debug, Clone, Deserialize)]
pub struct ManualEntry {
    pub session_id: String,
    pub label: Label,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub minutes: u32,

    #[serde(default)]
    pub seconds: u32,

    /// Whether the duration is added to the totals
    #[serde(default = "default_counted")]
    pub counted: bool,
}

impl ManualEntry {
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.minutes * 60 + self.seconds)
    }

    /// Seconds this entry contributes to the totals
    pub fn credited_seconds(&self) -> f64 {
        if self.counted {
            self.duration_seconds()
        } else {
            0.0
        }
    }

    pub fn to_manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            session_id: self.session_id.clone(),
            label: self.label,
            name: self.name.clone(),
            note: self.note.clone(),
        }
    }
}
