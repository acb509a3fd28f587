use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{api_paths, ApiHost, FilePart, HttpClient};
use crate::models::{
    ActionResponse, CreditsSummary, EmailVerification, FileInfo, FileList, ListFilesOptions,
    QueryParams, ReportEntry, ReportOptions, UploadOptions, WaitOptions, DEFAULT_VERIFY_TIMEOUT,
    MAX_VERIFY_TIMEOUT, MIN_VERIFY_TIMEOUT,
};
use crate::utils::determine_content_type;
use serde_json::Value;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Multipart field the upload endpoint reads the file from
const UPLOAD_FIELD: &str = "file_content";

/// Client for interacting with the MillionVerifier API
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let http_client = HttpClient::new(config)?;
        Ok(Self { http_client })
    }

    /// Verify one address in real time.
    ///
    /// `timeout` is how long, in seconds, the API may spend on the check:
    /// between 2 and 60, 20 when `None`.
    pub async fn verify_email(&self, email: &str, timeout: Option<u8>) -> Result<EmailVerification> {
        let timeout = timeout.unwrap_or(DEFAULT_VERIFY_TIMEOUT);
        if !(MIN_VERIFY_TIMEOUT..=MAX_VERIFY_TIMEOUT).contains(&timeout) {
            return Err(Error::InvalidRequest(format!(
                "timeout must be between {MIN_VERIFY_TIMEOUT} and {MAX_VERIFY_TIMEOUT}, got {timeout}"
            )));
        }
        if email.trim().is_empty() {
            return Err(Error::InvalidRequest("email is required".to_string()));
        }

        self.http_client
            .get(
                ApiHost::Single,
                api_paths::VERIFY,
                vec![
                    ("email", Some(email.to_string())),
                    ("timeout", Some(timeout.to_string())),
                ],
            )
            .await
    }

    /// Check the remaining API credits
    pub async fn check_credits(&self) -> Result<CreditsSummary> {
        self.http_client
            .get(ApiHost::Single, api_paths::CREDITS, vec![])
            .await
    }

    /// Upload a file of addresses for bulk verification
    pub async fn upload_file(&self, options: UploadOptions) -> Result<FileInfo> {
        if !crate::utils::file_exists(&options.file_path) {
            return Err(Error::InvalidFile(format!(
                "File not found: {}",
                options.file_path
            )));
        }

        let path = Path::new(&options.file_path);
        if !path.is_file() {
            return Err(Error::InvalidFile(format!(
                "Not a file: {}",
                options.file_path
            )));
        }

        let file_name = match options.file_name {
            Some(name) => name,
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| Error::InvalidFile("Invalid file name".to_string()))?
                .to_string(),
        };

        let content = tokio::fs::read(path).await?;
        if content.is_empty() {
            return Err(Error::InvalidFile(format!(
                "File is empty: {}",
                options.file_path
            )));
        }

        log::debug!("uploading {} ({} bytes)", file_name, content.len());
        let file = FilePart {
            field: UPLOAD_FIELD,
            file_name,
            content,
            content_type: determine_content_type(path),
        };

        self.http_client
            .post_file(ApiHost::Bulk, api_paths::UPLOAD, vec![], file)
            .await
    }

    /// Get info for an uploaded file
    pub async fn get_file_info(&self, file_id: u64) -> Result<FileInfo> {
        self.http_client
            .get(ApiHost::Bulk, api_paths::FILE_INFO, file_id_param(file_id))
            .await
    }

    /// List uploaded files matching the given filters
    pub async fn list_files(&self, options: Option<ListFilesOptions>) -> Result<FileList> {
        let opts = options.unwrap_or_default();
        opts.validate()?;

        self.http_client
            .get(ApiHost::Bulk, api_paths::FILE_LIST, opts.query_params())
            .await
    }

    /// Get the report rows of a processed file
    pub async fn get_report(
        &self,
        file_id: u64,
        options: Option<ReportOptions>,
    ) -> Result<Vec<ReportEntry>> {
        let opts = options.unwrap_or_default();
        opts.validate()?;

        let mut params = file_id_param(file_id);
        params.extend(opts.query_params());

        self.http_client
            .get(ApiHost::Bulk, api_paths::DOWNLOAD, params)
            .await
    }

    /// Cancel a file in progress.
    ///
    /// Results for the addresses already verified become downloadable shortly after.
    pub async fn stop_file(&self, file_id: u64) -> Result<ActionResponse> {
        self.http_client
            .get(ApiHost::Bulk, api_paths::STOP, file_id_param(file_id))
            .await
    }

    /// Delete an uploaded file
    pub async fn delete_file(&self, file_id: u64) -> Result<ActionResponse> {
        self.http_client
            .get(ApiHost::Bulk, api_paths::DELETE, file_id_param(file_id))
            .await
    }

    /// GET any endpoint and return the body as untyped JSON.
    ///
    /// The API key is attached for `host` as in every other call. Useful for
    /// checking a payload against its [`crate::ResponseShape`] before the
    /// lenient typed models smooth it over.
    pub async fn get_raw(&self, host: ApiHost, path: &str, params: QueryParams) -> Result<Value> {
        self.http_client.get(host, path, params).await
    }

    /// Poll a file until its status is terminal (finished, canceled or error)
    pub async fn wait_for_file(
        &self,
        file_id: u64,
        options: Option<WaitOptions>,
    ) -> Result<FileInfo> {
        let opts = options.unwrap_or_default();
        let max_attempts = opts.max_attempts.unwrap_or(60);
        let polling_interval = opts.polling_interval.unwrap_or(5000);

        let start_time = Instant::now();
        let mut last_status = None;

        for attempt in 0..max_attempts {
            if attempt > 0 {
                sleep(Duration::from_millis(polling_interval)).await;
            }

            let info = self.get_file_info(file_id).await?;
            if info.status.is_terminal() {
                return Ok(info);
            }

            log::debug!("file {file_id} is {} ({}%)", info.status, info.percent);
            last_status = Some(info.status);
        }

        Err(Error::Timeout(format!(
            "file {file_id} still {} after {} seconds",
            last_status.map_or("unchecked", |s| s.as_str()),
            start_time.elapsed().as_secs()
        )))
    }
}

fn file_id_param(file_id: u64) -> QueryParams {
    vec![("file_id", Some(file_id.to_string()))]
}
