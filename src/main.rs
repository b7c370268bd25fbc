//! Flavorize command line entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flavorize::commands::{
    project_root, ConfigureCommand, DetectCommand, ExecCommand, PlanCommand, ProjectOptions,
    ResolveCommand,
};
use flavorize::logging;
use flavorize_core::{Platform, PLUGIN_NAME, VERSION};
use serde::Serialize;
use tracing::{debug, error};

/// Flavorize: build flavor configuration for Android/iOS/Windows/Web builds
#[derive(Parser)]
#[command(name = "flavorize", version, about, long_about = None)]
struct Cli {
    /// Project root (holds pubspec.yaml or android/)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Android module directory (defaults to <project>/android/app)
    #[arg(short, long, global = true)]
    module: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration as JSON
    Resolve,

    /// Detect the flavor and build type of build commands
    Detect {
        #[arg(long, value_enum, default_value_t = PlatformArg::Android)]
        platform: PlatformArg,

        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Apply the configuration to an in-memory host and print its settings
    Configure,

    /// Print the hook tasks and ordering edges of every variant
    Plan,

    /// Run a build command with service file staging and cleanup around it
    Exec {
        /// Platform whose service file is staged (pair with --module for
        /// non-Android modules, e.g. ios/Runner)
        #[arg(long, value_enum, default_value_t = PlatformArg::Android)]
        platform: PlatformArg,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Android,
    Ios,
    Windows,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Android => Platform::Android,
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Web => Platform::Web,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<i32> {
    let options = ProjectOptions {
        project_path: project_root(&cli.project),
        module_path: cli.module,
    };
    debug!("Project root: {:?}", options.project_path);

    match cli.command {
        Commands::Resolve => print_json(&ResolveCommand { options }.execute()?)?,
        Commands::Detect { platform, commands } => {
            let command = DetectCommand {
                options,
                platform: platform.into(),
                commands,
            };
            print_json(&command.execute()?)?
        }
        Commands::Configure => print_json(&ConfigureCommand { options }.execute()?)?,
        Commands::Plan => print_json(&PlanCommand { options }.execute()?)?,
        Commands::Exec { platform, command } => {
            let command = ExecCommand {
                options,
                platform: platform.into(),
                command,
            };
            return command.execute();
        }
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("{} v{} starting...", PLUGIN_NAME, VERSION);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{e:#}");
            std::process::exit(1);
        }
    }
}
