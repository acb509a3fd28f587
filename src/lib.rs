//! # MillionVerifier SDK
//!
//! Typed client for the MillionVerifier email verification API: real-time
//! single verification, plus the bulk workflow of uploading a file of
//! addresses, polling it and downloading the report.
//!
//! ## Single Verification
//!
//! ```no_run
//! use millionverifier::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads MILLION_VERIFIER_API_KEY
//!     let client = Client::new(Config::from_env()?)?;
//!
//!     let verification = client.verify_email("john@example.com", None).await?;
//!     println!("{}: {}", verification.email, verification.result);
//!
//!     let credits = client.check_credits().await?;
//!     println!("Credits left: {}", credits.credits);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Bulk Verification
//!
//! ```no_run
//! use millionverifier::{
//!     Client, Config, ReportOptions, ReportStatus, ResultFilter, UploadOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(Config {
//!         api_key: std::env::var("MILLION_VERIFIER_API_KEY")?,
//!         ..Default::default()
//!     })?;
//!
//!     let file = client
//!         .upload_file(UploadOptions {
//!             file_path: "./leads.txt".to_string(),
//!             file_name: None,
//!         })
//!         .await?;
//!
//!     let info = client.wait_for_file(file.file_id, None).await?;
//!     println!("{} is {}", info.file_name, info.status);
//!
//!     // Deliverable and catch-all rows, without role accounts
//!     let rows = client
//!         .get_report(
//!             info.file_id,
//!             Some(ReportOptions {
//!                 filter: ResultFilter::Custom,
//!                 statuses: vec![ReportStatus::Ok, ReportStatus::CatchAll],
//!                 include_role_emails: Some(false),
//!                 ..Default::default()
//!             }),
//!         )
//!         .await?;
//!
//!     for row in &rows {
//!         println!("{} {}", row.email, row.result);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod enums;
mod error;
mod http;
mod models;
pub mod shape;
pub mod utils;

// Re-exports
pub use client::Client;
pub use config::{Config, API_KEY_ENV_VAR, DEFAULT_BULK_API_URL, DEFAULT_SINGLE_API_URL};
pub use enums::{EmailResult, FileStatus, Quality, ReportStatus, ResultFilter};
pub use error::{ApiErrorKind, Error, Result};
pub use http::{api_paths, ApiHost};
pub use models::{
    ActionResponse, CreditsSummary, EmailVerification, FileInfo, FileList, ListFilesOptions,
    QueryParams, ReportEntry, ReportOptions, UploadOptions, WaitOptions, DEFAULT_VERIFY_TIMEOUT,
    MAX_LIST_LIMIT, MAX_VERIFY_TIMEOUT, MIN_VERIFY_TIMEOUT,
};
pub use shape::{JsonKind, ResponseShape};
