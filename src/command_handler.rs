use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use crate::args::Invocation;
use crate::config::Config;
use crate::error::Error;
use crate::onesky::OneSkyClient;
use crate::report::Reporter;
use crate::transfer;

pub fn handle_transfer<W: Write>(matches: &ArgMatches, out: W) -> Result<()> {
    let action = matches
        .get_one::<String>("action")
        .map(String::as_str)
        .unwrap_or_default();
    let operands: Vec<String> = matches
        .get_many::<String>("operands")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let mut reporter = Reporter::new(out, matches.get_flag("short-paths"));

    // Nothing is read from disk before the action is known to be valid.
    let invocation = match Invocation::parse(action, &operands) {
        Ok(invocation) => invocation,
        Err(Error::InvalidAction { action }) => {
            reporter.invalid_action(&action)?;
            return Err(Error::InvalidAction { action }.into());
        }
        Err(e) => return Err(e.into()),
    };

    let config_path = Config::resolve_path(matches.get_one::<PathBuf>("config").map(PathBuf::as_path));
    let config = Config::load(&config_path)?;
    let invocation = invocation.with_normalized_language(&config.language_mappings());

    info!(
        "Params: {:?} | {} | {} | {} | {}",
        invocation.action,
        invocation.project_id,
        invocation.local_path.display(),
        invocation.remote_file_name,
        invocation.language
    );

    let client = OneSkyClient::new(&config).context("failed to build the OneSky client")?;
    transfer::dispatch(&invocation, &config, &client, &mut reporter)?;

    Ok(())
}

pub fn make_app() -> Command {
    Command::new("onesky-sync")
        .about("Uploads an Android strings file to OneSky, or downloads its translation.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Credentials file [default: $ONESKY_CONFIG or onesky_keys.toml]"),
        )
        .arg(
            Arg::new("short-paths")
                .long("short-paths")
                .action(ArgAction::SetTrue)
                .help("Show only the last three components of the local path in the report"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log requests and responses"),
        )
        .arg(
            Arg::new("action")
                .value_name("ACTION")
                .required(true)
                .help("upload or download"),
        )
        .arg(
            Arg::new("operands")
                .value_name("ARGS")
                .num_args(0..)
                .help("[LABEL] <PROJECT_ID> <LOCAL_FILE> <REMOTE_FILE_NAME> <LANGUAGE>"),
        )
}
