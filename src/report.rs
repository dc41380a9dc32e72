//! The one line a run prints on stdout.
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::args::{Action, Invocation};
use crate::error::Error;

const SHORT_PATH_COMPONENTS: usize = 3;

pub struct Reporter<W> {
    out: W,
    short_paths: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, short_paths: bool) -> Self {
        Self { out, short_paths }
    }

    pub fn success(&mut self, invocation: &Invocation) -> io::Result<()> {
        let verb = match invocation.action {
            Action::Upload => "uploaded",
            Action::Download => "downloaded",
        };
        let context = self.context(invocation);
        writeln!(self.out, "{context} successfully {verb}!")
    }

    pub fn erroneous_response(&mut self, invocation: &Invocation, body: &str) -> io::Result<()> {
        let context = self.context(invocation);
        writeln!(self.out, "{context} - Erroneous response received: {body}")
    }

    pub fn error(&mut self, invocation: &Invocation, err: &Error) -> io::Result<()> {
        let context = self.context(invocation);
        writeln!(self.out, "{context} - Error occurred: {err}")
    }

    pub fn invalid_action(&mut self, action: &str) -> io::Result<()> {
        writeln!(self.out, "Invalid action received: {action}")
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn context(&self, invocation: &Invocation) -> String {
        let path = display_path(&invocation.local_path, self.short_paths);
        let mut context = match &invocation.label {
            Some(label) => format!("{label}: {path}"),
            None => path,
        };
        context.push_str(&format!(
            " [{} | {}]",
            invocation.language, invocation.remote_file_name
        ));
        context
    }
}

fn display_path(path: &Path, short: bool) -> String {
    let components: Vec<_> = path.components().collect();
    if !short || components.len() <= SHORT_PATH_COMPONENTS {
        return path.display().to_string();
    }
    let tail: PathBuf = components[components.len() - SHORT_PATH_COMPONENTS..]
        .iter()
        .collect();
    format!("...{}{}", MAIN_SEPARATOR, tail.display())
}
