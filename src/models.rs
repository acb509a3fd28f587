use crate::enums::{EmailResult, FileStatus, Quality, ReportStatus, ResultFilter};
use crate::error::{Error, Result};
use crate::utils::{
    api_datetime, bool_to_int, empty_as_none, format_datetime, join_values, number_or_string,
    string_or_bool,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Smallest timeout accepted by the single verification endpoint, in seconds
pub const MIN_VERIFY_TIMEOUT: u8 = 2;

/// Largest timeout accepted by the single verification endpoint, in seconds
pub const MAX_VERIFY_TIMEOUT: u8 = 60;

/// Timeout used when none is given
pub const DEFAULT_VERIFY_TIMEOUT: u8 = 20;

/// Largest page the file list endpoint returns
pub const MAX_LIST_LIMIT: u32 = 50;

/// Query parameters as sent; `None` values are dropped by the transport.
pub type QueryParams = Vec<(&'static str, Option<String>)>;

/// Result of a single email verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailVerification {
    /// The address that was checked
    pub email: String,

    /// Quality classification, absent when the check itself failed
    #[serde(default, deserialize_with = "empty_as_none")]
    pub quality: Option<Quality>,

    pub result: EmailResult,

    /// Numeric form of `result`
    pub resultcode: u8,

    /// Finer-grained reason behind `result`
    #[serde(default)]
    pub subresult: String,

    /// Address belongs to a free email provider
    pub free: bool,

    /// Address is a role account (info@, sales@, ...)
    pub role: bool,

    /// Suggested correction for a mistyped address
    #[serde(default)]
    pub didyoumean: String,

    /// Credits remaining after this check
    pub credits: u64,

    /// Time the check took, in seconds
    pub executiontime: u64,

    #[serde(default)]
    pub error: String,

    /// `false` when the check was answered by the test API key
    #[serde(default)]
    pub livemode: bool,
}

/// Remaining API credits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreditsSummary {
    /// Credits usable for single verification
    pub credits: u64,

    #[serde(default)]
    pub bulk_credits: Option<u64>,

    #[serde(default)]
    pub renewing_credits: Option<u64>,

    #[serde(default)]
    pub plan: Option<u64>,
}

/// Info about an uploaded file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileInfo {
    #[serde(deserialize_with = "number_or_string")]
    pub file_id: u64,

    pub file_name: String,

    pub status: FileStatus,

    #[serde(default)]
    pub unique_emails: u64,

    #[serde(with = "api_datetime")]
    pub updated_at: NaiveDateTime,

    #[serde(with = "api_datetime")]
    pub createdate: NaiveDateTime,

    /// Progress, 0 to 100
    pub percent: u8,

    #[serde(default)]
    pub total_rows: u64,

    #[serde(default)]
    pub verified: u64,

    #[serde(default)]
    pub unverified: u64,

    #[serde(default)]
    pub ok: u64,

    #[serde(default)]
    pub catch_all: u64,

    #[serde(default)]
    pub disposable: u64,

    #[serde(default)]
    pub invalid: u64,

    #[serde(default)]
    pub unknown: u64,

    #[serde(default)]
    pub reverify: u64,

    #[serde(default)]
    pub credit: u64,

    #[serde(default)]
    pub estimated_time_sec: u64,

    /// Error message; empty when the file has no error
    #[serde(default, deserialize_with = "string_or_bool")]
    pub error: String,
}

impl FileInfo {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// One page of uploaded files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FileList {
    pub files: Vec<FileInfo>,
    pub total: u64,
}

/// One row of a downloaded report
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportEntry {
    pub email: String,

    #[serde(default, deserialize_with = "empty_as_none")]
    pub quality: Option<Quality>,

    pub result: EmailResult,

    pub free: bool,

    pub role: bool,

    #[serde(default)]
    pub didyoumean: String,
}

/// Acknowledgement returned by stop and delete
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionResponse {
    pub result: String,
}

impl ActionResponse {
    pub fn is_ok(&self) -> bool {
        self.result == "ok"
    }
}

/// Options for uploading a file for bulk verification
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// Path to the file to upload
    pub file_path: String,

    /// Name shown by the API, defaults to the file name of `file_path`
    pub file_name: Option<String>,
}

/// Filters for listing uploaded files
#[derive(Debug, Clone, Default)]
pub struct ListFilesOptions {
    /// Pagination offset (defaults to 0)
    pub offset: Option<u32>,

    /// Page size, at most 50 (defaults to 50)
    pub limit: Option<u32>,

    /// Only these file ids
    pub file_ids: Vec<u64>,

    /// Case-insensitive substring of the file name
    pub name: Option<String>,

    /// Only files in one of these statuses
    pub statuses: Vec<FileStatus>,

    pub updated_at_from: Option<NaiveDateTime>,

    pub updated_at_to: Option<NaiveDateTime>,

    pub create_date_from: Option<NaiveDateTime>,

    pub create_date_to: Option<NaiveDateTime>,

    pub percent_from: Option<u8>,

    pub percent_to: Option<u8>,

    pub has_error: Option<bool>,
}

impl ListFilesOptions {
    /// Reject filter combinations the API could never satisfy
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            if limit > MAX_LIST_LIMIT {
                return Err(Error::InvalidRequest(format!(
                    "limit must be between 0 and {MAX_LIST_LIMIT}, got {limit}"
                )));
            }
        }

        check_order("updated_at", self.updated_at_from, self.updated_at_to)?;
        check_order("create_date", self.create_date_from, self.create_date_to)?;

        for (name, percent) in [
            ("percent_from", self.percent_from),
            ("percent_to", self.percent_to),
        ] {
            if let Some(p) = percent {
                if p > 100 {
                    return Err(Error::InvalidRequest(format!(
                        "{name} must be between 0 and 100, got {p}"
                    )));
                }
            }
        }
        check_order("percent", self.percent_from, self.percent_to)?;

        Ok(())
    }

    /// Query parameters for the file list endpoint, without the API key
    pub fn query_params(&self) -> QueryParams {
        vec![
            ("offset", Some(self.offset.unwrap_or(0).to_string())),
            (
                "limit",
                Some(self.limit.unwrap_or(MAX_LIST_LIMIT).to_string()),
            ),
            ("id", join_values(&self.file_ids)),
            ("name", self.name.clone()),
            ("status", join_values(&self.statuses)),
            ("updated_at_from", format_datetime(self.updated_at_from)),
            ("updated_at_to", format_datetime(self.updated_at_to)),
            ("createdate_from", format_datetime(self.create_date_from)),
            ("createdate_to", format_datetime(self.create_date_to)),
            ("percent_from", self.percent_from.map(|p| p.to_string())),
            ("percent_to", self.percent_to.map(|p| p.to_string())),
            ("has_error", bool_to_int(self.has_error)),
        ]
    }

    /// Whether `file` satisfies every filter that can be checked locally.
    ///
    /// Pagination is not considered.
    pub fn matches(&self, file: &FileInfo) -> bool {
        let in_range = |value: NaiveDateTime, from: Option<NaiveDateTime>, to: Option<NaiveDateTime>| {
            from.map_or(true, |f| value >= f) && to.map_or(true, |t| value <= t)
        };

        (self.file_ids.is_empty() || self.file_ids.contains(&file.file_id))
            && self.name.as_ref().map_or(true, |n| {
                file.file_name.to_lowercase().contains(&n.to_lowercase())
            })
            && (self.statuses.is_empty() || self.statuses.iter().any(|s| s.matches(file.status)))
            && in_range(file.updated_at, self.updated_at_from, self.updated_at_to)
            && in_range(file.createdate, self.create_date_from, self.create_date_to)
            && self.percent_from.map_or(true, |p| file.percent >= p)
            && self.percent_to.map_or(true, |p| file.percent <= p)
            && self.has_error.map_or(true, |e| file.has_error() == e)
    }
}

/// Options for downloading a report
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Which rows to include (defaults to all)
    pub filter: ResultFilter,

    /// Statuses to include, custom filter only
    pub statuses: Vec<ReportStatus>,

    /// Include free-provider addresses, custom filter only
    pub include_free_domains: Option<bool>,

    /// Include role addresses, custom filter only
    pub include_role_emails: Option<bool>,
}

impl ReportOptions {
    pub fn validate(&self) -> Result<()> {
        if self.filter == ResultFilter::Custom {
            return Ok(());
        }

        let custom_only = [
            ("statuses", !self.statuses.is_empty()),
            ("include_free_domains", self.include_free_domains.is_some()),
            ("include_role_emails", self.include_role_emails.is_some()),
        ];
        for (name, set) in custom_only {
            if set {
                return Err(Error::InvalidRequest(format!(
                    "{name} requires the custom filter, got filter {}",
                    self.filter
                )));
            }
        }

        Ok(())
    }

    /// Query parameters for the download endpoint, without the API key
    pub fn query_params(&self) -> QueryParams {
        vec![
            ("filter", Some(self.filter.to_string())),
            ("statuses", join_values(&self.statuses)),
            ("free", bool_to_int(self.include_free_domains)),
            ("role", bool_to_int(self.include_role_emails)),
        ]
    }

    /// Whether a report row could have been returned under these options
    pub fn permits(&self, entry: &ReportEntry) -> bool {
        if self.filter != ResultFilter::Custom {
            return self.filter.permits(entry.result);
        }

        (self.statuses.is_empty() || self.statuses.iter().any(|s| s.result() == entry.result))
            && self.include_free_domains.map_or(true, |free| free || !entry.free)
            && self.include_role_emails.map_or(true, |role| role || !entry.role)
    }
}

/// Options for polling a file until it stops processing
#[derive(Debug, Clone, Default)]
pub struct WaitOptions {
    /// Maximum number of status checks (defaults to 60)
    pub max_attempts: Option<u64>,

    /// Milliseconds between checks (defaults to 5000)
    pub polling_interval: Option<u64>,
}

fn check_order<T: PartialOrd + std::fmt::Display>(
    name: &str,
    from: Option<T>,
    to: Option<T>,
) -> Result<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(Error::InvalidRequest(format!(
            "{name}_from ({from}) must not be after {name}_to ({to})"
        ))),
        _ => Ok(()),
    }
}
