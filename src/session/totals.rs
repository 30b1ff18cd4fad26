use super::label::Label;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Running duration totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationTotals {
    /// Valid plus partially valid seconds
    pub total_seconds: f64,

    /// Seconds from sessions labelled valid
    pub valid_seconds: f64,

    /// Seconds from sessions labelled partially valid
    pub partial_seconds: f64,
}

impl DurationTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `seconds` to the overall total and to the accumulator for `label`.
    ///
    /// Invalid recordings are never counted.
    pub fn credit(&mut self, label: Label, seconds: f64) {
        match label {
            Label::Valid => {
                self.valid_seconds += seconds;
                self.total_seconds += seconds;
            }
            Label::Partial => {
                self.partial_seconds += seconds;
                self.total_seconds += seconds;
            }
            Label::Invalid => {}
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.total_seconds / SECONDS_PER_HOUR
    }

    pub fn valid_hours(&self) -> f64 {
        self.valid_seconds / SECONDS_PER_HOUR
    }

    pub fn partial_hours(&self) -> f64 {
        self.partial_seconds / SECONDS_PER_HOUR
    }
}

/// Number of manifest rows written per label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub valid: usize,
    pub partial: usize,
    pub invalid: usize,
}

impl LabelCounts {
    pub fn record(&mut self, label: Label) {
        match label {
            Label::Valid => self.valid += 1,
            Label::Partial => self.partial += 1,
            Label::Invalid => self.invalid += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.partial + self.invalid
    }
}
