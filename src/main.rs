//! zenity-launch - show a zenity dialog described in a TOML file
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{error, info};
use zenity_core::{DialogSpec, Error};
use zenity_process::{
    default_config_path, load_config, try_load_config, Launcher, LauncherConfig,
    ToolAvailability,
};

/// Show zenity dialogs and print their results as JSON
#[derive(Parser, Debug)]
#[command(name = "zenity-launch")]
#[command(about = "Show zenity dialogs and print their results as JSON", long_about = None)]
struct Args {
    /// Launcher config file [default: ~/.config/zenity-launcher/config.toml]
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Dialog binary to run; overrides the config file and ZENITY_BINARY
    #[arg(long, value_name = "PATH", global = true)]
    binary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the dialog described in FILE and print the result
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the arguments FILE would be launched with
    Flags {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check that the dialog binary can be started
    Check,
}

/// Forward the dialog's own exit status; other failures map to 255
fn failure_exit_code(error: &Error) -> u8 {
    let code = match error {
        Error::Execution { code, .. } => code.and_then(|c| u8::try_from(c).ok()),
        _ => None,
    };
    code.unwrap_or(u8::MAX)
}

fn launcher_config(args: &Args) -> Result<LauncherConfig> {
    let config = match &args.config {
        Some(path) => try_load_config(path)
            .wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => default_config_path()
            .map(|path| load_config(&path))
            .unwrap_or_default(),
    };

    let config = config.with_env_overrides();
    Ok(match &args.binary {
        Some(binary) => config.with_binary(binary),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    zenity_core::logging::init()?;

    let args = Args::parse();
    let config = launcher_config(&args)?;

    match &args.command {
        Command::Run { file } => {
            let spec = DialogSpec::load(file)
                .wrap_err_with(|| format!("reading dialog {}", file.display()))?;
            info!("Running --{} from {}", spec.kind.selector(), file.display());

            match Launcher::new(config).run(spec).await {
                Ok(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    Ok(ExitCode::from(result.exit_code() as u8))
                }
                Err(e) if e.is_recoverable() => {
                    error!("Dialog failed: {}", e);
                    eprintln!("{}", e);
                    Ok(ExitCode::from(failure_exit_code(&e)))
                }
                Err(e) => {
                    if e.is_fatal() {
                        error!("Cannot show dialogs: {}", e);
                    }
                    Err(e.into())
                }
            }
        }
        Command::Flags { file } => {
            let spec = DialogSpec::load(file)
                .wrap_err_with(|| format!("reading dialog {}", file.display()))?;
            let mut argv = vec![config.binary.display().to_string()];
            argv.extend(config.binary_args.iter().cloned());
            argv.extend(spec.to_flags());
            for arg in argv {
                println!("{}", arg);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let availability = ToolAvailability::check(&config).await;
            match availability.unavailable_message() {
                None => {
                    let binary = availability
                        .binary
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    match &availability.version {
                        Some(version) => println!("{} ({})", binary, version),
                        None => println!("{}", binary),
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Some(message) => {
                    eprintln!("{}", message);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
