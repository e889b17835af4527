use adoption_tracker::{config, load, output, render};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// File name of the build data written between stages.
const MANIFEST_FILE: &str = "adopters.json";

#[derive(Parser)]
#[command(name = "adoption-tracker")]
#[command(about = "Static site generator for the Scala adoption tracker")]
#[command(long_about = "\
Static site generator for the Scala adoption tracker

Every adopter is one YAML file. Entries are validated, sorted by size, and
rendered into a single page grouped by category. Any invalid entry fails the
build.

Site structure:

  site/
  ├── config.toml              # Site config (optional)
  ├── adopters/                # One file per adopter (*.yaml, *.yml)
  │   ├── acme.yaml
  │   └── zenith.yaml
  ├── unverified.yaml          # Unverified {name, website} list (optional)
  └── static/                  # Assets (favicon, logo) → copied to output root

Entry fields:
  name, logoUrl, website, usage   strings (required)
  category                        product company | OSS project | consulting company
  size                            number (required)
  scala3AdoptionStatus            not planned | planned | partial | full (optional)
  sources                         string or list of strings (optional)

Run 'adoption-tracker gen-config' to generate a documented config.toml.")]
#[command(version = env!("BUILD_VERSION"))]
struct Cli {
    /// Site directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "build", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (adopters.json)
    #[arg(long, default_value = ".adoption-tracker-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate entries into adopters.json
    Load,
    /// Produce the HTML site from adopters.json
    Generate,
    /// Run the full pipeline: load → generate
    Build,
    /// Validate the site directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Load => {
            let manifest = load::load(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_load_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join(MANIFEST_FILE);
            let manifest = render::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Loading {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_load_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            render::write_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            output::print_load_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Write the build data as pretty JSON into the temp directory.
fn write_manifest(manifest: &load::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join(MANIFEST_FILE), json)
}
