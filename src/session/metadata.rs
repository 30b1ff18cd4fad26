use serde::{Deserialize, Serialize};

/// One side of a recorded conversation, as reported by the sessions API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Length of this client's recording. `null` when the side never finished uploading.
    pub duration_seconds: Option<f64>,

    /// Age bracket chosen during setup (e.g. "30-39")
    pub age: Option<String>,

    pub gender: Option<String>,

    /// Sample rate of the recording in Hz
    pub sample_rate: Option<f64>,

    pub session_id: Option<String>,
}

impl ClientMetadata {
    pub fn has_duration(&self) -> bool {
        self.duration_seconds.is_some()
    }

    /// Duration if it was recorded and is non-zero
    pub fn nonzero_duration(&self) -> Option<f64> {
        self.duration_seconds.filter(|secs| *secs != 0.0)
    }
}

/// A recorded conversation between two clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub session_id: String,
    pub client_a: ClientMetadata,
    pub client_b: ClientMetadata,
}
