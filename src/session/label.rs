use serde::{Deserialize, Serialize};
use std::fmt;

/// How usable a recording is for the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Valid,
    Partial,
    Invalid,
}

impl Label {
    /// Code written to the `usable` column of the manifest
    pub fn code(self) -> &'static str {
        match self {
            Label::Valid => "Y",
            Label::Partial => "P",
            Label::Invalid => "N",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
