use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rocrate_validate::config::{Profile, ValidatorConfig};
use rocrate_validate::graph::PackageLoader;
use rocrate_validate::output::{OutputFormat, render_json, render_text};
use rocrate_validate::validation::Validator;

#[derive(Parser)]
#[command(
    name = "rocrate-validate",
    about = "A CLI tool that validates RO-Crate metadata packages",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a validator configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Profile to validate against (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    profile: Option<ProfileArg>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an RO-Crate (default command)
    Validate {
        /// Crate directory or its ro-crate-metadata.json file
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Do not check that local data files exist
        #[arg(long)]
        skip_files: bool,

        /// Hide informational findings in text output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect the loaded entity graph
    Inspect {
        /// Crate directory or its ro-crate-metadata.json file
        path: PathBuf,

        #[arg(help = "Entity identifier to print (e.g., './' or '#language_etr')")]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ProfileArg {
    Base,
    Ldac,
    Auto,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Base => Profile::Base,
            ProfileArg::Ldac => Profile::Ldac,
            ProfileArg::Auto => Profile::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ValidatorConfig::from_file(path)?,
        None => ValidatorConfig::default(),
    };
    if let Some(profile) = cli.profile {
        config.profile = profile.into();
    }

    match cli.command {
        Some(Commands::Validate {
            path,
            format,
            skip_files,
            quiet,
        }) => {
            if skip_files {
                config.check_files = false;
            }
            validate_command(config, &path, format.into(), quiet)
        }
        Some(Commands::Inspect { path, id }) => {
            inspect_command(&path, id.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            // Default to validating the current directory
            validate_command(config, Path::new("."), OutputFormat::Text, false)
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("rocrate_validate=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("rocrate_validate=info"), // -v: info messages
        _ => EnvFilter::new("rocrate_validate=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn validate_command(
    config: ValidatorConfig,
    path: &Path,
    format: OutputFormat,
    quiet: bool,
) -> Result<ExitCode> {
    let profile = config.profile;
    let validator = Validator::new(config);
    let report = validator.validate_path(path);

    if let Some(fatal) = &report.fatal {
        eprintln!("{:?}", miette::Report::new(fatal.clone()));
    }

    match format {
        OutputFormat::Text => print!("{}", render_text(&report, !quiet)),
        OutputFormat::Json => println!("{}", render_json(&report, profile)?),
    }

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn inspect_command(path: &Path, id: Option<&str>) -> Result<()> {
    let package = match PackageLoader::load(path) {
        Ok(package) => package,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            anyhow::bail!("Failed to load RO-Crate: {}", path.display());
        }
    };

    match id {
        Some(id) => {
            let Some(entity) = package.graph.dereference(id) else {
                anyhow::bail!("Entity not found: {}", id);
            };
            println!("{}", serde_json::to_string_pretty(entity)?);
        }
        None => {
            for entity in package.graph.entities() {
                println!("{}\t{}", entity.id, entity.types.join(", "));
            }
        }
    }

    Ok(())
}
