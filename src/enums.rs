//! Closed vocabularies used by the API.
//!
//! Every enum serialises to the same lowercase string the API uses, and
//! exposes `all()` to enumerate its members.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $name {
            /// Every member, in declaration order
            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }

            /// The string the API uses for this value
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(Error::InvalidData(format!(
                        concat!("unknown ", stringify!($name), " value: {}"),
                        other
                    ))),
                }
            }
        }
    };
}

/// Processing status of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    InProgress,
    Error,
    Finished,
    Canceled,
    Paused,
    InQueueToStart,
    /// Wildcard filter value
    Unknown,
}

string_enum!(FileStatus {
    InProgress => "in_progress",
    Error => "error",
    Finished => "finished",
    Canceled => "canceled",
    Paused => "paused",
    InQueueToStart => "in_queue_to_start",
    Unknown => "unknown",
});

impl FileStatus {
    /// Whether a file reported with `status` satisfies this status used as a filter.
    pub fn matches(&self, status: FileStatus) -> bool {
        *self == FileStatus::Unknown || *self == status
    }

    /// No further progress will happen once a file reaches this status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FileStatus::Finished | FileStatus::Canceled | FileStatus::Error
        )
    }
}

/// Quality classification of a verified address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Good,
    Risky,
    Bad,
}

string_enum!(Quality {
    Good => "good",
    Risky => "risky",
    Bad => "bad",
});

/// Result classification of a verified address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailResult {
    Ok,
    CatchAll,
    Unknown,
    Error,
    Disposable,
    Invalid,
}

string_enum!(EmailResult {
    Ok => "ok",
    CatchAll => "catch_all",
    Unknown => "unknown",
    Error => "error",
    Disposable => "disposable",
    Invalid => "invalid",
});

impl EmailResult {
    /// The numeric `resultcode` the API sends alongside the result
    pub fn code(&self) -> u8 {
        match self {
            EmailResult::Ok => 1,
            EmailResult::CatchAll => 2,
            EmailResult::Unknown => 3,
            EmailResult::Error => 4,
            EmailResult::Disposable => 5,
            EmailResult::Invalid => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        EmailResult::all().iter().copied().find(|r| r.code() == code)
    }

    /// Quality the API reports for this result; `Error` carries none.
    pub fn quality(&self) -> Option<Quality> {
        match self {
            EmailResult::Ok => Some(Quality::Good),
            EmailResult::CatchAll | EmailResult::Unknown => Some(Quality::Risky),
            EmailResult::Disposable | EmailResult::Invalid => Some(Quality::Bad),
            EmailResult::Error => None,
        }
    }
}

/// Filter applied when downloading a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFilter {
    Ok,
    OkAndCatchAll,
    Unknown,
    Invalid,
    #[default]
    All,
    Custom,
}

string_enum!(ResultFilter {
    Ok => "ok",
    OkAndCatchAll => "ok_and_catch_all",
    Unknown => "unknown",
    Invalid => "invalid",
    All => "all",
    Custom => "custom",
});

impl ResultFilter {
    /// Results a report downloaded with this filter may contain.
    ///
    /// `Custom` narrows through [`ReportStatus`] values chosen per request,
    /// so on its own it allows everything.
    pub fn allowed_results(&self) -> &'static [EmailResult] {
        match self {
            ResultFilter::Ok => &[EmailResult::Ok],
            ResultFilter::OkAndCatchAll => &[EmailResult::Ok, EmailResult::CatchAll],
            ResultFilter::Unknown => &[EmailResult::Unknown],
            ResultFilter::Invalid => &[EmailResult::Invalid],
            ResultFilter::All | ResultFilter::Custom => EmailResult::all(),
        }
    }

    /// Qualities of the results in [`ResultFilter::allowed_results`]
    pub fn allowed_qualities(&self) -> Vec<Quality> {
        let mut qualities = Vec::new();
        for quality in self.allowed_results().iter().filter_map(EmailResult::quality) {
            if !qualities.contains(&quality) {
                qualities.push(quality);
            }
        }
        qualities
    }

    pub fn permits(&self, result: EmailResult) -> bool {
        self.allowed_results().contains(&result)
    }
}

/// Per-status selection used with [`ResultFilter::Custom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    CatchAll,
    Unknown,
    Invalid,
    Disposable,
}

string_enum!(ReportStatus {
    Ok => "ok",
    CatchAll => "catch_all",
    Unknown => "unknown",
    Invalid => "invalid",
    Disposable => "disposable",
});

impl ReportStatus {
    /// The result rows this status selects
    pub fn result(&self) -> EmailResult {
        match self {
            ReportStatus::Ok => EmailResult::Ok,
            ReportStatus::CatchAll => EmailResult::CatchAll,
            ReportStatus::Unknown => EmailResult::Unknown,
            ReportStatus::Invalid => EmailResult::Invalid,
            ReportStatus::Disposable => EmailResult::Disposable,
        }
    }
}
