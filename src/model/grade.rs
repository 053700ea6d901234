//! Letter grades, their grade points and canonical score bands

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of recognized letter grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 12] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::F,
    ];

    pub fn letter(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Grade points on the 4.0 scale.
    pub fn points(self) -> f64 {
        f64::from(self.points_tenths()) / 10.0
    }

    /// Grade points in tenths (A = 40, B+ = 33), exact for weighted sums.
    pub fn points_tenths(self) -> u32 {
        match self {
            Grade::APlus | Grade::A => 40,
            Grade::AMinus => 37,
            Grade::BPlus => 33,
            Grade::B => 30,
            Grade::BMinus => 27,
            Grade::CPlus => 23,
            Grade::C => 20,
            Grade::CMinus => 17,
            Grade::DPlus => 13,
            Grade::D => 10,
            Grade::F => 0,
        }
    }

    /// Inclusive numeric score band a generated score must fall in.
    pub fn score_band(self) -> RangeInclusive<u32> {
        match self {
            Grade::APlus => 97..=100,
            Grade::A => 93..=96,
            Grade::AMinus => 90..=92,
            Grade::BPlus => 87..=89,
            Grade::B => 83..=86,
            Grade::BMinus => 80..=82,
            Grade::CPlus => 77..=79,
            Grade::C => 73..=76,
            Grade::CMinus => 70..=72,
            Grade::DPlus => 67..=69,
            Grade::D => 60..=66,
            Grade::F => 0..=59,
        }
    }

    /// Lenient lookup: surrounding whitespace is ignored, anything else must match exactly.
    pub fn from_letter(s: &str) -> Option<Grade> {
        let s = s.trim();
        Grade::ALL.iter().copied().find(|g| g.letter() == s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGrade(pub String);

impl fmt::Display for UnknownGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown grade {:?}", self.0)
    }
}

impl std::error::Error for UnknownGrade {}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Grade::from_letter(s).ok_or_else(|| UnknownGrade(s.to_string()))
    }
}
