//! Blocking client for the OneSky platform API.
//!
//! Every call is signed with `api_key`, a Unix `timestamp` and
//! `dev_hash = md5(timestamp + secret)`.
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::debug;
use md5::{Digest, Md5};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::request::{DownloadRequest, UploadRequest};

/// The two operations a transfer needs from the localization platform.
pub trait LocalizationService {
    /// Uploads a source file. Resolves with the raw response body for any
    /// HTTP status; only transport failures are errors.
    fn post_file(&self, request: &UploadRequest) -> Result<String>;

    /// Exports the translation of a source file. Anything but `200 OK` is
    /// an error.
    fn get_file(&self, request: &DownloadRequest) -> Result<String>;
}

pub struct OneSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
    secret: String,
}

struct Signature {
    timestamp: String,
    dev_hash: String,
}

impl OneSkyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut client_builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));

        if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.is_empty()) {
            client_builder = client_builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        Ok(Self {
            client: client_builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            secret: config.secret.clone(),
        })
    }

    fn sign(&self) -> Signature {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Signature {
            timestamp: timestamp.to_string(),
            dev_hash: dev_hash(timestamp, &self.secret),
        }
    }

    fn project_url(&self, project_id: &str, endpoint: &str) -> String {
        format!("{}/1/projects/{}/{}", self.base_url, project_id, endpoint)
    }
}

pub fn dev_hash(timestamp: u64, secret: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl LocalizationService for OneSkyClient {
    fn post_file(&self, request: &UploadRequest) -> Result<String> {
        let url = self.project_url(&request.project_id, "files");
        let signature = self.sign();

        let file = Part::text(request.content.clone()).file_name(request.file_name.clone());
        let form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", signature.timestamp)
            .text("dev_hash", signature.dev_hash)
            .text("file_format", request.format)
            .text("locale", request.language.clone())
            .text("is_keeping_all_strings", request.keep_strings.to_string())
            .part("file", file);

        debug!("POST {url} ({} bytes, locale {})", request.content.len(), request.language);
        let resp = self.client.post(&url).multipart(form).send()?;
        let status = resp.status();
        let body = resp.text()?;
        debug!("upload answered with HTTP {status}");

        Ok(body)
    }

    fn get_file(&self, request: &DownloadRequest) -> Result<String> {
        let url = self.project_url(&request.project_id, "translations");
        let signature = self.sign();

        debug!("GET {url} (locale {}, file {})", request.language, request.file_name);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("timestamp", signature.timestamp.as_str()),
                ("dev_hash", signature.dev_hash.as_str()),
                ("locale", request.language.as_str()),
                ("source_file_name", request.file_name.as_str()),
            ])
            .send()?;
        let status = resp.status();
        let body = resp.text()?;

        // 202 means the export is still being generated; there is no file yet.
        if status != StatusCode::OK {
            return Err(Error::VendorStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
