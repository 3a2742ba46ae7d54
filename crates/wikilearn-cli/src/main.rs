//! WikiLearn - deployment plugin helper
//!
//! Usage:
//!   wikilearn enable                 # Enable the required host plugins
//!   wikilearn pin repo@develop ...   # Pin development refs to releases
//!   wikilearn metadata               # Print build metadata
//!   wikilearn manifest               # Print plugin registrations

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikilearn_core::commands::EnablePluginsCommand;
use wikilearn_core::config::{WikilearnConfig, load_config};
use wikilearn_core::metadata::{MetadataHook, load_requirements};
use wikilearn_core::pinning::{GitHubReleaseResolver, ReleasePinner};
use wikilearn_core::plugin::{ENV_FILE_NAME, PluginContext, PluginManifest, PluginSettings};

#[derive(Parser)]
#[command(name = "wikilearn", version)]
#[command(about = "WikiLearn plugin commands", long_about = None)]
struct Cli {
    /// Project root holding wikilearn.toml and the requirements directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable all required plugins for WikiLearn
    Enable,

    /// Pin development refs to the latest release tags
    Pin {
        /// Declarations of the form <repo>@<ref>
        #[arg(conflicts_with = "file")]
        declarations: Vec<String>,

        /// Read declarations from a requirements file instead
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the build metadata computed from the project files
    Metadata {
        /// Output format
        #[arg(short = 'o', long, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the plugin's extension-point registrations as JSON
    Manifest,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable lines
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wikilearn=info,wikilearn_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.root)?;

    match cli.command {
        Commands::Enable => run_enable(&config),
        Commands::Pin {
            declarations,
            file,
            format,
        } => run_pin(&config, declarations, file, format),
        Commands::Metadata { format } => run_metadata(&cli.root, config, format),
        Commands::Manifest => run_manifest(&cli.root, &config),
    }
}

fn run_enable(config: &WikilearnConfig) -> Result<()> {
    let command = EnablePluginsCommand::from_config(&config.enable);

    println!("Enabling WikiLearn required plugins...");
    match command.execute() {
        Ok(report) => {
            println!("{} Successfully enabled all plugins", style("✓").green());
            if !report.stdout.is_empty() {
                println!("Output: {}", report.stdout);
            }
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
        }
    }

    println!("\nAll plugins have been processed.");
    println!(
        "Run '{} plugins list' to verify the enabled plugins.",
        command.program()
    );
    Ok(())
}

fn run_pin(
    config: &WikilearnConfig,
    declarations: Vec<String>,
    file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let declarations = match file {
        Some(path) => load_requirements(&path)?,
        None => declarations,
    };
    if declarations.is_empty() {
        anyhow::bail!("No declarations given. Pass <repo>@<ref> arguments or --file");
    }

    let resolver = GitHubReleaseResolver::from_config(&config.release)?;
    let pinner = ReleasePinner::new(resolver)
        .with_development_marker(config.release.development_marker.clone());
    let pinned = pinner.resolve(&declarations)?;

    match format {
        OutputFormat::Table => {
            for (before, after) in declarations.iter().zip(&pinned) {
                if before == after {
                    println!("• {}", after);
                } else {
                    println!("✓ {} -> {}", before, style(after).green());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&pinned)?);
        }
    }
    Ok(())
}

fn run_metadata(root: &Path, config: WikilearnConfig, format: OutputFormat) -> Result<()> {
    let resolver = GitHubReleaseResolver::from_config(&config.release)?;
    let hook = MetadataHook::new(root, config);
    let metadata = hook.update(resolver)?;

    match format {
        OutputFormat::Table => {
            println!("version: {}", metadata.version);
            println!("dependencies:");
            for dep in &metadata.dependencies {
                println!("  {}", dep);
            }
            for (group, deps) in &metadata.optional_dependencies {
                println!("optional-dependencies.{}:", group);
                for dep in deps {
                    println!("  {}", dep);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }
    Ok(())
}

fn run_manifest(root: &Path, config: &WikilearnConfig) -> Result<()> {
    let settings = PluginSettings::from_env_file(&root.join(ENV_FILE_NAME))?;
    let context = PluginContext::for_project(root, config, settings)?;
    let manifest = PluginManifest::init(&context)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&manifest.registrations())?
    );
    Ok(())
}
