use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest completed (or required) education level.
///
/// Variants are declared in ascending order so the derived `Ord` is the
/// ranking used by scoring. "Unspecified" is not a level: it is represented
/// as `Option::<EducationLevel>::None` wherever a level may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    /// Explicitly stated lack of a formal degree.
    #[serde(rename = "none")]
    NoDegree,
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::NoDegree,
        EducationLevel::HighSchool,
        EducationLevel::Associate,
        EducationLevel::Bachelor,
        EducationLevel::Master,
        EducationLevel::Doctorate,
    ];

    /// Position on the ordered scale, `NoDegree` = 0.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Number of levels `self` falls below `required`; 0 when it meets it.
    pub fn shortfall_to(self, required: EducationLevel) -> u8 {
        required.rank().saturating_sub(self.rank())
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::NoDegree => "no formal degree",
            EducationLevel::HighSchool => "high school",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Doctorate => "doctorate",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
