use env_logger::Builder;
use log::LevelFilter;
use onesky_sync::{handle_transfer, make_app};
use std::io;
use std::process;

fn main() {
    let matches = make_app().get_matches();

    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new().filter(None, level).parse_default_env().init();

    if let Err(e) = handle_transfer(&matches, io::stdout().lock()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
