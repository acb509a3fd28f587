use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::QueryParams;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, ClientBuilder, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Constants for API paths
pub mod api_paths {
    /// Single email verification (single host)
    pub const VERIFY: &str = "/api/v3";
    /// Remaining credits (single host)
    pub const CREDITS: &str = "/api/v3/credits";
    /// Bulk file upload
    pub const UPLOAD: &str = "/bulkapi/v2/upload";
    /// Info for one uploaded file
    pub const FILE_INFO: &str = "/bulkapi/v2/fileinfo";
    /// Filtered list of uploaded files
    pub const FILE_LIST: &str = "/bulkapi/v2/filelist";
    /// Report for a processed file
    pub const DOWNLOAD: &str = "/bulkapi/v2/download";
    /// Stop a file in progress
    pub const STOP: &str = "/bulkapi/stop";
    /// Delete an uploaded file
    pub const DELETE: &str = "/bulkapi/v2/delete";
}

/// The two hosts the API is split across
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHost {
    Single,
    Bulk,
}

impl ApiHost {
    /// Name of the query parameter carrying the API key on this host
    pub fn auth_param(&self) -> &'static str {
        match self {
            ApiHost::Single => "api",
            ApiHost::Bulk => "key",
        }
    }
}

/// A file attached as one multipart form field
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

/// HTTP client for making API requests
pub struct HttpClient {
    client: ReqwestClient,
    config: Config,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = ClientBuilder::new()
            .user_agent(concat!("millionverifier-rust/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.get_timeout_seconds()))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, host: ApiHost, path: &str) -> String {
        let base = match host {
            ApiHost::Single => self.config.get_single_api_url(),
            ApiHost::Bulk => self.config.get_bulk_api_url(),
        };
        format!("{base}{path}")
    }

    /// Make a GET request to the specified endpoint
    pub async fn get<T: DeserializeOwned>(
        &self,
        host: ApiHost,
        path: &str,
        params: QueryParams,
    ) -> Result<T> {
        self.request(Method::GET, host, path, params, None).await
    }

    /// Make a POST request carrying a multipart file
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        host: ApiHost,
        path: &str,
        params: QueryParams,
        file: FilePart,
    ) -> Result<T> {
        self.request(Method::POST, host, path, params, Some(file))
            .await
    }

    /// Send an authenticated request and parse the JSON body.
    ///
    /// Parameters whose value is `None` are left out of the query entirely.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        host: ApiHost,
        path: &str,
        params: QueryParams,
        file: Option<FilePart>,
    ) -> Result<T> {
        let url = self.url(host, path);
        log::debug!("{method} {url}");

        let mut query: Vec<(&str, String)> = vec![(host.auth_param(), self.config.api_key.clone())];
        query.extend(
            params
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );

        let mut builder = self
            .client
            .request(method.clone(), url.as_str())
            .header("Accept", "application/json")
            .query(&query);

        if let Some(file) = file {
            let part = Part::bytes(file.content)
                .file_name(file.file_name)
                .mime_str(file.content_type)?;
            builder = builder.multipart(Form::new().part(file.field, part));
        }

        let response = self.client.execute(builder.build()?).await?;
        let result = self.handle_response(response).await;
        if let Err(Error::Api { status, .. }) = &result {
            log::warn!("{method} {url} failed with HTTP {status}");
        }
        result
    }

    /// Handle API responses and parse JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            })
        }
    }
}
