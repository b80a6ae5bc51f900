//! Prints the battery text the bar would show.
use anyhow::Result;
use clap::{arg, command, value_parser};
use std::path::PathBuf;
use tilerc::utils::{get_help_template, log::setup_logging};
use tilerc_core::status::read_capacity;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = command!("tilerc Battery")
        .about("Reads the battery capacity once")
        .help_template(get_help_template())
        .args(&[
            arg!(-c --config <FILE> "Use this configuration file instead of the default one.")
                .value_parser(value_parser!(PathBuf)),
            arg!(-v --verbose "Log the reader command and failures to stderr."),
        ])
        .get_matches();

    let config = tilerc::load_from(matches.get_one::<PathBuf>("config").map(PathBuf::as_path));
    if matches.get_flag("verbose") {
        setup_logging("debug");
        tracing::debug!("Running `{}`", config.battery.command.join(" "));
    }

    println!("{}", read_capacity(&config.battery).await);
    Ok(())
}
