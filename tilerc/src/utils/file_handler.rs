use crate::Config;
use anyhow::{self, Context, Result};
use ron::{
    extensions::Extensions,
    ser::{to_string_pretty, PrettyConfig},
    Options,
};
use std::{
    ffi::OsStr,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use xdg::BaseDirectories;

const COMMENT_HEADER: &str = r"//  _   _ _                   
// | |_(_) | ___ _ __ ___ 
// | __| | |/ _ \ '__/ __|
// | |_| | |  __/ | | (__ 
//  \__|_|_|\___|_|  \___|
// Key bindings, groups, layouts and bar of the tiling session.
// Check this file with `tilerc-check`, reload the session with SIGHUP.

";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    RonFile,
    TomlFile,
}

#[must_use]
pub fn check_file_type(path: &Path) -> ConfigFileType {
    if path.extension() == Some(OsStr::new("toml")) {
        ConfigFileType::TomlFile
    } else {
        ConfigFileType::RonFile
    }
}

/// Path of `config.ron` in the config directory. The directory is created if needed.
///
/// # Errors
///
/// Will error if there is no usable config directory.
pub fn get_default_path() -> Result<PathBuf> {
    let path = BaseDirectories::with_prefix("tilerc")?;
    Ok(path.place_config_file("config.ron")?)
}

/// # Errors
///
/// Function will throw an error if `BaseDirectories` doesn't exist, if user doesn't have
/// permissions to place config.ron, if config.ron cannot be read (access writes, malformed file,
/// etc.).
/// Function can also error from inability to save config.ron (if it is the first time running
/// `tilerc`).
pub fn load_config_file() -> Result<Config> {
    tracing::debug!("Loading config file");

    // the checks and fallback for `toml` can be removed when toml gets eventually deprecated
    let config_file_ron = get_default_path()?;
    let config_file_toml = config_file_ron.with_extension("toml");

    if config_file_ron.exists() {
        tracing::debug!("Config file '{}' found.", config_file_ron.to_string_lossy());
        load_from_path(&config_file_ron)
    } else if config_file_toml.exists() {
        tracing::debug!(
            "Config file '{}' found.",
            config_file_toml.to_string_lossy()
        );
        tracing::info!("You are using TOML as config language which will be deprecated in the future.\nPlease consider migrating you config to RON with `tilerc-export --format ron`.");
        load_from_path(&config_file_toml)
    } else {
        tracing::debug!("Config file not found. Using default config file.");

        let config = Config::default();
        write_to_file(&config_file_ron, &config)?;
        Ok(config)
    }
}

/// Parses a config file, RON unless the extension is `toml`.
///
/// # Errors
///
/// Errors if the file cannot be read or does not parse.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?;
    parse_config(&contents, check_file_type(path))
        .with_context(|| format!("Unable to parse {}", path.display()))
}

/// # Errors
///
/// Errors if `contents` is not a valid configuration.
pub fn parse_config(contents: &str, file_type: ConfigFileType) -> Result<Config> {
    match file_type {
        ConfigFileType::RonFile => {
            let ron = Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
            Ok(ron.from_str(contents)?)
        }
        ConfigFileType::TomlFile => Ok(toml::from_str(contents)?),
    }
}

/// Loads configuration from either specified file (preferred) or default.
/// # Errors
///
/// Errors if file cannot be read. Indicates filesystem error
/// (inadequate permissions, disk full, etc.)
/// If a path is specified and does not exist, returns an error.
pub fn check_config_file(fspath: Option<&str>, verbose: bool) -> Result<Config> {
    let config_filename = if let Some(fspath) = fspath {
        println!("\x1b[1;35mNote: Using file {fspath} \x1b[0m");
        PathBuf::from(fspath)
    } else {
        let ron_file = get_default_path()?;
        let toml_file = ron_file.with_extension("toml");
        if ron_file.exists() {
            ron_file
        } else if toml_file.exists() {
            println!(
                "\x1b[1;93mWARN: TOML as config format is about to be deprecated.
      Please consider migrating to RON with `tilerc-export --format ron`.\x1b[0m"
            );
            toml_file
        } else {
            let config = Config::default();
            write_to_file(&ron_file, &config)?;
            return Ok(config);
        }
    };

    if verbose {
        dbg!(&config_filename);
    }
    load_from_path(&config_filename)
}

/// RON text of `config`, with the comment header.
///
/// # Errors
///
/// Errors if serialization fails.
pub fn to_ron_string(config: &Config) -> Result<String> {
    let ron_pretty_conf = PrettyConfig::new()
        .depth_limit(4)
        .extensions(Extensions::IMPLICIT_SOME);
    let ron = to_string_pretty(&config, ron_pretty_conf)?;
    Ok(String::from(COMMENT_HEADER) + &ron)
}

/// # Errors
/// This function errors when:
/// - serialization of the config fails
/// - writing to file fails
pub fn write_to_file(ron_file: &Path, config: &Config) -> Result<(), anyhow::Error> {
    let ron_with_header = to_ron_string(config)?;
    let mut file = File::create(ron_file)?;
    file.write_all(ron_with_header.as_bytes())?;
    Ok(())
}
