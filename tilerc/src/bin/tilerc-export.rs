use anyhow::{bail, Context, Result};
use clap::{arg, command, value_parser};
use std::fs;
use std::path::PathBuf;
use tilerc::export::to_json;
use tilerc::utils::file_handler::{load_from_path, to_ron_string};
use tilerc::utils::get_help_template;

fn main() -> Result<()> {
    let matches = command!("tilerc Export")
        .about("Exports the configuration for the window manager runtime")
        .help_template(get_help_template())
        .args(&[
            arg!(-f --format <FORMAT> "Output format: `json` for the runtime, `ron` to migrate a config file.")
                .value_parser(["json", "ron"])
                .default_value("json"),
            arg!(-p --pretty "Pretty print json output."),
            arg!(-o --output <FILE> "Write to this file instead of stdout.")
                .value_parser(value_parser!(PathBuf)),
            arg!([INPUT] "Sets the input file to use. Uses the default location otherwise.")
                .value_parser(value_parser!(PathBuf)),
        ])
        .get_matches();

    let config = match matches.get_one::<PathBuf>("INPUT") {
        Some(path) => load_from_path(path)?,
        None => tilerc::load(),
    };

    let text = match matches.get_one::<String>("format").map(String::as_str) {
        Some("ron") => to_ron_string(&config)?,
        Some("json") | None => to_json(&config, matches.get_flag("pretty"))?,
        Some(other) => bail!("Unknown format `{other}`"),
    };

    match matches.get_one::<PathBuf>("output") {
        Some(output) => {
            fs::write(output, text)
                .with_context(|| format!("Could not write {}", output.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}
