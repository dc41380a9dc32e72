//! Typed requests and the response envelope exchanged with OneSky.
use serde::Deserialize;

use crate::error::{Error, Result};

/// The only file format this tool ever uploads.
pub const ANDROID_XML: &str = "ANDROID_XML";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub project_id: String,
    pub file_name: String,
    pub language: String,
    pub format: &'static str,
    pub content: String,
    pub keep_strings: bool,
}

impl UploadRequest {
    pub fn new(
        project_id: &str,
        file_name: &str,
        language: &str,
        content: String,
        keep_strings: bool,
    ) -> Result<Self> {
        require("project id", project_id)?;
        require("file name", file_name)?;
        require("language", language)?;
        Ok(Self {
            project_id: project_id.to_string(),
            file_name: file_name.to_string(),
            language: language.to_string(),
            format: ANDROID_XML,
            content,
            keep_strings,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub project_id: String,
    pub file_name: String,
    pub language: String,
}

impl DownloadRequest {
    pub fn new(project_id: &str, file_name: &str, language: &str) -> Result<Self> {
        require("project id", project_id)?;
        require("file name", file_name)?;
        require("language", language)?;
        Ok(Self {
            project_id: project_id.to_string(),
            file_name: file_name.to_string(),
            language: language.to_string(),
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidRequest { field });
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub meta: ResponseMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMeta {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl ResponseEnvelope {
    pub fn decode(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|source| Error::MalformedResponse {
            body: body.to_string(),
            source,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.meta.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_request_uses_android_xml() {
        let req = UploadRequest::new("1", "strings.xml", "de", "<resources/>".into(), false).unwrap();
        assert_eq!(req.format, "ANDROID_XML");
        assert!(!req.keep_strings);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let err = DownloadRequest::new("1", "  ", "de").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { field: "file name" }));
        let err = UploadRequest::new("", "a.xml", "de", String::new(), true).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { field: "project id" }));
    }

    #[test]
    fn envelope_status_ranges() {
        let ok = ResponseEnvelope::decode(r#"{"meta":{"status":201},"data":{"name":"a.xml"}}"#).unwrap();
        assert!(ok.is_success());

        let bad = ResponseEnvelope::decode(r#"{"meta":{"status":400,"message":"bad locale"}}"#).unwrap();
        assert!(!bad.is_success());
        assert_eq!(bad.meta.message.as_deref(), Some("bad locale"));

        let edge = ResponseEnvelope::decode(r#"{"meta":{"status":300}}"#).unwrap();
        assert!(!edge.is_success());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = ResponseEnvelope::decode("<html>502</html>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { body, .. } if body == "<html>502</html>"));
    }
}
