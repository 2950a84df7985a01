//! Over/under side of a line.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a numeric line a price is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Over,
    Under,
}

impl Side {
    /// Resolve a vote between the two sides. Ties go to [`Side::Over`].
    #[must_use]
    pub const fn by_majority(over: usize, under: usize) -> Self {
        if over >= under {
            Self::Over
        } else {
            Self::Under
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
