use anyhow::{bail, Result};
use clap::{arg, command};
use tilerc::utils::file_handler::check_config_file;
use tilerc::Config;
use tilerc_core::autostart::OnceMarker;

fn main() -> Result<()> {
    let matches = command!("tilerc Check")
        .about("Checks syntax and consistency of the configuration file")
        .help_template(tilerc::utils::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs received configuration file."),
            arg!(--float <CLASS> "Shows which float rule a window with this WM_CLASS matches."),
            arg!(--title <TITLE> "Window title used together with --float."),
            arg!([INPUT] "Sets the input file to use. Uses the default location otherwise."),
        ])
        .get_matches();

    let config_file = matches.get_one::<String>("INPUT").map(String::as_str);
    let verbose = matches.get_flag("verbose");

    println!(
        "\x1b[0;94m::\x1b[0m tilerc version: {}",
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "\x1b[0;94m::\x1b[0m tilerc git hash: {}",
        git_version::git_version!(fallback = option_env!("GIT_HASH").unwrap_or("NONE"))
    );

    if let Err(err) = check_enabled_features() {
        println!("\x1b[1;91mERROR:\x1b[0m\x1b[1m {err} \x1b[0m");
    }

    println!("\x1b[0;94m::\x1b[0m Loading configuration . . .");
    let passed = match check_config_file(config_file, verbose) {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            if verbose {
                dbg!(&config);
            }
            if let Some(class) = matches.get_one::<String>("float") {
                report_float(&config, class, matches.get_one::<String>("title").map(String::as_str));
            }
            config.report_checks(verbose)
        }
        Err(e) => {
            println!("Configuration failed. Reason: {e:?}");
            false
        }
    };

    println!("\x1b[0;94m::\x1b[0m Checking environment . . .");
    check_runtime_dir(verbose);

    if !passed {
        bail!("Configuration has errors");
    }
    Ok(())
}

fn report_float(config: &Config, class: &str, title: Option<&str>) {
    match config.floating_layout.best_match(Some(class), title) {
        Some(rule) => println!(
            "\x1b[0;94m::\x1b[0m `{class}` floats, matched by {rule:?}"
        ),
        None => println!("\x1b[0;94m::\x1b[0m `{class}` is tiled"),
    }
}

/// The autostart marker and the battery text live in the runtime dir.
fn check_runtime_dir(verbose: bool) {
    match (std::env::var("XDG_RUNTIME_DIR"), OnceMarker::for_session()) {
        (Ok(val), Ok(marker)) => {
            if verbose {
                println!(":: XDG_RUNTIME_DIR: {val}, marker: {:?}", marker.path());
            }
            if marker.path().is_some_and(std::path::Path::exists) {
                println!("\x1b[0;92m    -> Environment OK (autostart already ran in this session) \x1b[0m");
            } else {
                println!("\x1b[0;92m    -> Environment OK \x1b[0m");
            }
        }
        (Ok(val), Err(e)) => {
            if verbose {
                println!(":: XDG_RUNTIME_DIR: {val}, MARKER BAD: {e:?}");
            }
            println!("\x1b[1;93mWARN: XDG_RUNTIME_DIR is set but not usable: {e}\x1b[0m");
        }
        (Err(e), _) => {
            if verbose {
                println!(":: XDG_RUNTIME_DIR_ERROR: {e:?}");
            }
            println!(
                "\x1b[1;93mWARN: XDG_RUNTIME_DIR not set. Autostart can run again in every new tilerc process.\x1b[0m"
            );
        }
    }
}

// this function is called only when specific features are enabled.
#[allow(dead_code)]
fn check_feature<T, E, F>(name: &str, predicate: F) -> Result<()>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Debug,
{
    match predicate() {
        Ok(_) => {
            println!("\x1b[0;92m    -> {name} OK\x1b[0m");
            Ok(())
        }
        Err(err) => bail!("Check for feature {} failed: {:?}", name, err),
    }
}

fn check_enabled_features() -> Result<()> {
    if env!("TILERC_FEATURES").is_empty() {
        println!("\x1b[0;94m::\x1b[0m Built with no enabled features.");
        return Ok(());
    }

    println!(
        "\x1b[0;94m::\x1b[0m Enabled features: {}",
        env!("TILERC_FEATURES")
    );

    println!("\x1b[0;94m::\x1b[0m Checking feature dependencies . . .");

    #[cfg(feature = "journald-log")]
    check_feature("journald-log", tracing_journald::layer)?;
    #[cfg(feature = "file-log")]
    check_feature("file-log", || {
        tilerc::utils::log::file::log_dir().ok_or("Could not create the log directory")
    })?;

    Ok(())
}
