//! lansend-cli library
//!
//! Command-line front end over the `lansend` crate:
//! - `size`: print byte counts in human-readable form.
//! - `inspect`: summarize a `FileRequest` JSON document.
//! - `device`: print the `DeviceMessage` this device announces.
//! - `config`: show or change the persisted device settings.
//!
//! Configuration lives in the TOML file described by
//! [`lansend::DeviceSettings::config_file`].
use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lansend::{format_size, DeviceSettings, FileInfo, FileRequest};
use log::{debug, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "lansend-cli", version)]
#[command(about = "LanSend tool for file requests and device settings", long_about = None)]
pub struct Cli {
    /// Print debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print byte counts in human-readable form
    Size {
        #[arg(required = true)]
        bytes: Vec<u64>,
    },

    /// Summarize a file request stored as JSON
    Inspect { path: PathBuf },

    /// Print the device message of this device
    Device,

    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the current settings
    Show,
    /// Change the alias announced to peers
    SetAlias { alias: String },
    /// Change the port announced to peers
    SetPort { port: u16 },
    /// Set the directory received files are stored in
    SetOutput { dir: PathBuf },
    /// Go back to the default receive directory
    ClearOutput,
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    run(cli.command)
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Size { bytes } => {
            for size in bytes {
                println!("{}", format_size(size));
            }
        }
        Command::Inspect { path } => {
            let content = fs::read_to_string(&path).with_context(|| {
                format!("Failed to read file request: {}", path.display())
            })?;
            let request: FileRequest = serde_json::from_str(&content)
                .with_context(|| {
                    format!("Failed to parse file request: {}", path.display())
                })?;
            debug!(
                "Loaded {} file(s) from {}",
                request.files.len(),
                path.display()
            );
            print!("{}", describe_request(&request));
        }
        Command::Device => {
            let settings = load_settings()?;
            let message = settings.to_device_message();
            println!("{}", serde_json::to_string_pretty(&message)?);
        }
        Command::Config(command) => run_config(command)?,
    }
    Ok(())
}

fn run_config(command: ConfigCommand) -> Result<()> {
    let mut settings = load_settings()?;
    match command {
        ConfigCommand::Show => {
            print!("{}", describe_settings(&settings));
            return Ok(());
        }
        ConfigCommand::SetAlias { alias } => {
            println!("Alias set to: {}", alias);
            settings.alias = alias;
        }
        ConfigCommand::SetPort { port } => {
            println!("Port set to: {}", port);
            settings.port = port;
        }
        ConfigCommand::SetOutput { dir } => {
            println!("Receive directory set to: {}", dir.display());
            settings.store_path = Some(dir);
        }
        ConfigCommand::ClearOutput => {
            println!("Receive directory cleared");
            settings.store_path = None;
        }
    }
    settings.save().context("Failed to save config")
}

fn load_settings() -> Result<DeviceSettings> {
    DeviceSettings::load().context("Failed to load config")
}

/// Renders the sender and the offered files, sorted by name.
pub fn describe_request(request: &FileRequest) -> String {
    let info = &request.info;
    let mut out = format!(
        "From: {} ({}, {}) v{}\nFingerprint: {}\n",
        info.alias,
        info.device_model,
        info.device_type,
        info.version,
        info.fingerprint
    );

    let mut files: Vec<&FileInfo> = request.files.values().collect();
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name).then(a.id.cmp(&b.id)));

    out.push_str(&format!("Files ({}):\n", files.len()));
    for file in files {
        out.push_str(&format!(
            "  {:<32} {:>12}  {}",
            file.file_name,
            file.display_size(),
            file.file_type
        ));
        if let Some(progress) = file.progress() {
            out.push_str(&format!("  [{:.0}%]", progress * 100.0));
        }
        out.push('\n');
    }
    out.push_str(&format!("Total: {}\n", format_size(request.total_size())));
    out
}

pub fn describe_settings(settings: &DeviceSettings) -> String {
    let config_file = DeviceSettings::config_file()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "unavailable".to_string());
    let output = match &settings.store_path {
        Some(dir) => dir.display().to_string(),
        None => format!("{} (default)", settings.receive_dir().display()),
    };

    format!(
        "Config file: {}\nAlias: {}\nDevice model: {}\nDevice type: {}\n\
         Protocol: {}\nPort: {}\nDownload API: {}\nFingerprint: {}\n\
         Receive directory: {}\n",
        config_file,
        settings.alias,
        settings.device_model,
        settings.device_type,
        settings.protocol,
        settings.port,
        settings.download,
        settings.fingerprint,
        output
    )
}
