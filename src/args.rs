use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::language::{normalize, LanguageMappings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Upload,
    Download,
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upload" => Ok(Action::Upload),
            "download" => Ok(Action::Download),
            other => Err(Error::InvalidAction {
                action: other.to_string(),
            }),
        }
    }
}

/// Everything one run needs to know about the file being transferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: Action,
    pub label: Option<String>,
    pub project_id: String,
    pub local_path: PathBuf,
    pub remote_file_name: String,
    /// Raw until [`Invocation::with_normalized_language`] rewrites it.
    pub language: String,
}

const REQUIRED_OPERANDS: [&str; 4] = [
    "project id",
    "local file path",
    "remote file name",
    "language code",
];

impl Invocation {
    /// Parses `[label] <project id> <local file> <remote file name> <language>`.
    ///
    /// The action is checked first so an unknown action is reported even
    /// when the operands are incomplete.
    pub fn parse(action: &str, operands: &[String]) -> Result<Self> {
        let action = action.parse::<Action>()?;

        let (label, rest) = match operands.len() {
            n if n > REQUIRED_OPERANDS.len() + 1 => {
                return Err(Error::UnexpectedArgument {
                    value: operands[REQUIRED_OPERANDS.len() + 1].clone(),
                });
            }
            n if n == REQUIRED_OPERANDS.len() + 1 => (Some(operands[0].clone()), &operands[1..]),
            _ => (None, operands),
        };

        let field = |index: usize| -> Result<String> {
            match rest.get(index) {
                Some(value) if !value.is_empty() => Ok(value.clone()),
                _ => Err(Error::MissingArgument {
                    arg: REQUIRED_OPERANDS[index],
                }),
            }
        };

        let project_id = field(0)?;
        let local_path = PathBuf::from(field(1)?);
        let remote_file_name = field(2)?;
        let language = field(3)?;

        Ok(Self {
            action,
            label: label.filter(|l| !l.is_empty()),
            project_id,
            local_path,
            remote_file_name,
            language,
        })
    }

    pub fn with_normalized_language(mut self, mappings: &LanguageMappings) -> Self {
        self.language = normalize(&self.language, mappings).to_string();
        self
    }
}
