//! Upload an Android `strings.xml` to OneSky, or download its translation.
//!
//! One run performs one transfer:
//!
//! ```text
//! onesky-sync [OPTIONS] <upload|download> [LABEL] <PROJECT_ID> <LOCAL_FILE> <REMOTE_FILE_NAME> <LANGUAGE>
//! ```
//!
//! Android resource qualifiers such as `pt-rBR` are rewritten to the
//! spelling OneSky expects (`pt-BR`) before the request is sent.
pub mod args;
pub mod command_handler;
pub mod config;
pub mod error;
pub mod language;
pub mod onesky;
pub mod report;
pub mod request;
pub mod transfer;

pub use command_handler::{handle_transfer, make_app};
pub use error::{Error, Result};
