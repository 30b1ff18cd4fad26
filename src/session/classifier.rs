use super::label::Label;
use super::metadata::SessionMetadata;
use std::collections::HashSet;
use tracing::debug;

/// Result of classifying one session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,

    /// Seconds this session contributes to the totals
    pub credited_seconds: f64,

    /// Whether the session's audio archive should be downloaded
    pub download: bool,
}

impl Classification {
    fn new(label: Label, credited_seconds: f64) -> Self {
        Self {
            label,
            credited_seconds,
            download: false,
        }
    }

    fn with_download(mut self) -> Self {
        self.download = true;
        self
    }
}

/// Hand-curated session ids that override the field checks
#[derive(Debug, Clone, Default)]
pub struct ClassificationPolicy {
    valid: HashSet<String>,
    partial: HashSet<String>,
    invalid: HashSet<String>,
}

impl ClassificationPolicy {
    pub fn new<V, P, I>(valid: V, partial: P, invalid: I) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            valid: valid.into_iter().map(Into::into).collect(),
            partial: partial.into_iter().map(Into::into).collect(),
            invalid: invalid.into_iter().map(Into::into).collect(),
        }
    }

    /// Label a session. Rules are checked in order and the first match wins:
    ///
    /// 1. Listed as partial, or either side has no duration: partial, credited
    ///    with client B's duration, falling back to client A's.
    /// 2. Listed as valid: valid, credited with client A's duration.
    /// 3. Listed as invalid: invalid.
    /// 4. Client A gave an age and client B's age is not blank: valid, credited
    ///    with client A's duration, and its archive should be fetched.
    /// 5. Anything else: invalid.
    pub fn classify(&self, session: &SessionMetadata) -> Classification {
        let id = session.session_id.as_str();
        let (a, b) = (&session.client_a, &session.client_b);

        let (a_secs, b_secs) = match (a.duration_seconds, b.duration_seconds) {
            (Some(a_secs), Some(b_secs)) if !self.partial.contains(id) => (a_secs, b_secs),
            _ => {
                let credited = b
                    .nonzero_duration()
                    .or_else(|| a.nonzero_duration())
                    .unwrap_or(0.0);
                debug!("{} is partial ({}s)", id, credited);
                return Classification::new(Label::Partial, credited);
            }
        };
        debug!("{} has durations {}s / {}s", id, a_secs, b_secs);

        if self.valid.contains(id) {
            return Classification::new(Label::Valid, a_secs);
        }

        if self.invalid.contains(id) {
            return Classification::new(Label::Invalid, 0.0);
        }

        // Client B only has to avoid an explicitly blank age
        let a_has_age = a.age.as_deref().is_some_and(|age| !age.is_empty());
        let b_not_blank = b.age.as_deref() != Some("");
        if a_has_age && b_not_blank {
            debug!("{} is newly valid", id);
            return Classification::new(Label::Valid, a_secs).with_download();
        }

        Classification::new(Label::Invalid, 0.0)
    }

    /// Number of listed session ids
    pub fn len(&self) -> usize {
        self.valid.len() + self.partial.len() + self.invalid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
