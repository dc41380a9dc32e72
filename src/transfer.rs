//! Runs the one upload or download an invocation asks for.
use std::fs;
use std::io::Write;

use log::{error, info};

use crate::args::{Action, Invocation};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::onesky::LocalizationService;
use crate::report::Reporter;
use crate::request::{DownloadRequest, ResponseEnvelope, UploadRequest};

/// Performs the transfer and prints exactly one outcome line.
///
/// Every failure is both reported and returned, so the caller can exit
/// with a non-zero status.
pub fn dispatch<W: Write>(
    invocation: &Invocation,
    config: &Config,
    service: &dyn LocalizationService,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let outcome = match invocation.action {
        Action::Upload => upload(invocation, config.keep_strings, service),
        Action::Download => download(invocation, service),
    };

    match &outcome {
        Ok(()) => reporter.success(invocation)?,
        Err(Error::VendorApplication { body, .. }) => {
            reporter.erroneous_response(invocation, body)?
        }
        Err(e) => reporter.error(invocation, e)?,
    }
    if let Err(e) = &outcome {
        error!("{:?} of {:?} failed: {e}", invocation.action, invocation.local_path);
    }

    outcome
}

fn upload(
    invocation: &Invocation,
    keep_strings: bool,
    service: &dyn LocalizationService,
) -> Result<()> {
    let content = fs::read_to_string(&invocation.local_path)
        .map_err(|e| Error::filesystem(&invocation.local_path, e))?;

    let request = UploadRequest::new(
        &invocation.project_id,
        &invocation.remote_file_name,
        &invocation.language,
        content,
        keep_strings,
    )?;
    let body = service.post_file(&request)?;

    let envelope = ResponseEnvelope::decode(&body)?;
    if !envelope.is_success() {
        return Err(Error::VendorApplication {
            status: envelope.meta.status,
            body,
        });
    }

    info!("uploaded {} ({})", request.file_name, request.language);
    Ok(())
}

fn download(invocation: &Invocation, service: &dyn LocalizationService) -> Result<()> {
    let request = DownloadRequest::new(
        &invocation.project_id,
        &invocation.remote_file_name,
        &invocation.language,
    )?;

    if let Some(dir) = invocation
        .local_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        fs::create_dir_all(dir).map_err(|e| Error::filesystem(dir, e))?;
    }

    let content = service.get_file(&request)?;
    fs::write(&invocation.local_path, content.as_bytes())
        .map_err(|e| Error::filesystem(&invocation.local_path, e))?;

    info!(
        "downloaded {} ({}) to {:?}",
        request.file_name, request.language, invocation.local_path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;

    use super::*;

    enum Reply {
        Body(&'static str),
        Status(u16, &'static str),
    }

    struct FakeService {
        reply: Reply,
        uploads: RefCell<Vec<UploadRequest>>,
        downloads: RefCell<Vec<DownloadRequest>>,
    }

    impl FakeService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                uploads: RefCell::new(Vec::new()),
                downloads: RefCell::new(Vec::new()),
            }
        }

        fn answer(&self) -> Result<String> {
            match self.reply {
                Reply::Body(body) => Ok(body.to_string()),
                Reply::Status(status, body) => Err(Error::VendorStatus {
                    status,
                    body: body.to_string(),
                }),
            }
        }

        fn calls(&self) -> usize {
            self.uploads.borrow().len() + self.downloads.borrow().len()
        }
    }

    impl LocalizationService for FakeService {
        fn post_file(&self, request: &UploadRequest) -> Result<String> {
            self.uploads.borrow_mut().push(request.clone());
            self.answer()
        }

        fn get_file(&self, request: &DownloadRequest) -> Result<String> {
            self.downloads.borrow_mut().push(request.clone());
            self.answer()
        }
    }

    fn config(keep_strings: bool) -> Config {
        Config::parse(&format!(
            "secret = \"s\"\napi_key = \"k\"\nkeep_strings = {keep_strings}\n"
        ))
        .unwrap()
    }

    fn invocation(action: Action, path: &Path) -> Invocation {
        Invocation {
            action,
            label: None,
            project_id: "261063".into(),
            local_path: path.to_path_buf(),
            remote_file_name: "app_strings.xml".into(),
            language: "pt-BR".into(),
        }
    }

    fn run(inv: &Invocation, config: &Config, service: &FakeService) -> (Result<()>, String) {
        let mut reporter = Reporter::new(Vec::new(), false);
        let result = dispatch(inv, config, service, &mut reporter);
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        (result, out)
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn upload_success_reports_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        fs::write(&path, "<resources/>").unwrap();
        let service = FakeService::new(Reply::Body(r#"{"meta":{"status":201}}"#));

        let (result, out) = run(&invocation(Action::Upload, &path), &config(true), &service);

        assert!(result.is_ok());
        assert!(out.ends_with("[pt-BR | app_strings.xml] successfully uploaded!\n"));
        assert_eq!(entries(dir.path()), vec!["strings.xml"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<resources/>");

        let uploads = service.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].content, "<resources/>");
        assert_eq!(uploads[0].format, "ANDROID_XML");
        assert_eq!(uploads[0].language, "pt-BR");
        assert!(uploads[0].keep_strings);
    }

    #[test]
    fn upload_error_status_reports_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        fs::write(&path, "<resources/>").unwrap();
        let body = r#"{"meta":{"status":400,"message":"Invalid locale"}}"#;
        let service = FakeService::new(Reply::Body(body));

        let (result, out) = run(&invocation(Action::Upload, &path), &config(false), &service);

        assert!(matches!(result, Err(Error::VendorApplication { status: 400, .. })));
        assert!(out.ends_with(&format!("- Erroneous response received: {body}\n")));
        assert!(!out.contains("successfully"));
        assert!(!service.uploads.borrow()[0].keep_strings);
    }

    #[test]
    fn upload_with_garbage_body_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        fs::write(&path, "<resources/>").unwrap();
        let service = FakeService::new(Reply::Body("Bad Gateway"));

        let (result, out) = run(&invocation(Action::Upload, &path), &config(true), &service);

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
        assert!(out.contains("- Error occurred: malformed response"));
    }

    #[test]
    fn upload_of_missing_file_never_calls_the_service() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xml");
        let service = FakeService::new(Reply::Body(r#"{"meta":{"status":201}}"#));

        let (result, out) = run(&invocation(Action::Upload, &path), &config(true), &service);

        assert!(matches!(result, Err(Error::LocalFilesystem { .. })));
        assert!(out.contains("- Error occurred:"));
        assert_eq!(service.calls(), 0);
    }

    #[test]
    fn download_creates_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("res").join("values-pt-rBR").join("strings.xml");
        let service = FakeService::new(Reply::Body("hello"));

        let (result, out) = run(&invocation(Action::Download, &path), &config(true), &service);
        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
        assert!(out.ends_with("successfully downloaded!\n"));

        fs::write(&path, "a much longer previous translation").unwrap();
        let (result, _) = run(&invocation(Action::Download, &path), &config(true), &service);
        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        let downloads = service.downloads.borrow();
        assert_eq!(downloads.len(), 2);
        assert_eq!(downloads[0].file_name, "app_strings.xml");
        assert_eq!(downloads[0].language, "pt-BR");
        assert_eq!(downloads[0].project_id, "261063");
        assert!(service.uploads.borrow().is_empty());
    }

    #[test]
    fn failed_download_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strings.xml");
        fs::write(&path, "old").unwrap();
        let service = FakeService::new(Reply::Status(202, r#"{"meta":{"status":202}}"#));

        let (result, out) = run(&invocation(Action::Download, &path), &config(true), &service);

        assert!(matches!(result, Err(Error::VendorStatus { status: 202, .. })));
        assert!(out.contains("- Error occurred: OneSky responded with status 202"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }
}
