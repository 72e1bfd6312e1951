//! Harmonia CLI
//!
//! Harmonic resonance analysis of charts read from a YAML or JSON file.
//!
//! ## Usage
//!
//! ```bash
//! harmonia analyze charts.yaml              # aspects and patterns
//! harmonia analyze charts.yaml --patterns   # patterns only
//! harmonia analyze charts.json --json       # machine-readable output
//! harmonia pair 0 90.5                      # one arc
//! harmonia factors 36                       # prime multipliers table
//! harmonia factors 36 --arcs                # unit arc of each harmonic
//! harmonia settings show
//! ```

mod input;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use harmonia_config::{Settings, SettingsStore};
use harmonia_core::harmonics::multipliers_table;
use harmonia_core::{format_degrees_table, AnalysisConfig, Chart, Harmonic};
use harmonia_resonance::ResonanceBatch;
use harmonia_scope::HarmonicService;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harmonia")]
#[command(about = "Harmonic resonance analysis of angular positions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the settings file
#[derive(Args, Debug, Default)]
struct OrbArgs {
    /// Highest harmonic examined
    #[arg(long)]
    edge: Option<u32>,

    /// Circle divisor giving the primal orb (30 gives 12°)
    #[arg(long)]
    divisor: Option<u32>,

    /// Keep the full orb for pairs spanning two charts
    #[arg(long)]
    full_orbs: bool,

    /// Settings file [default: ~/.config/harmonia/settings.yaml]
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse every chart in a file
    Analyze {
        /// YAML or JSON chart file
        file: PathBuf,

        /// Print the aspect table
        #[arg(long)]
        aspects: bool,

        /// Print the pattern table
        #[arg(long)]
        patterns: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        orbs: OrbArgs,
    },

    /// Resonances of the arc between two positions
    Pair {
        #[arg(allow_negative_numbers = true)]
        first: f64,

        #[arg(allow_negative_numbers = true)]
        second: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        orbs: OrbArgs,
    },

    /// Prime multipliers of every number up to a limit
    Factors {
        #[arg(default_value_t = 108)]
        upto: u32,

        /// List each harmonic with its unit arc instead
        #[arg(long)]
        arcs: bool,
    },

    /// Inspect or create the settings file
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the settings in force
    Show {
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Write a settings file with default values
    Init {
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harmonia=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            aspects,
            patterns,
            json,
            orbs,
        } => cmd_analyze(file, aspects, patterns, json, orbs),
        Commands::Pair {
            first,
            second,
            json,
            orbs,
        } => cmd_pair(first, second, json, orbs),
        Commands::Factors { upto, arcs } => cmd_factors(upto, arcs),
        Commands::Settings { command } => cmd_settings(command),
    }
}

fn store_for(path: Option<PathBuf>) -> Result<SettingsStore> {
    Ok(match path {
        Some(path) => SettingsStore::at_path(path),
        None => SettingsStore::default_location()?,
    })
}

/// Settings file plus command-line overrides
fn resolve_settings(orbs: &OrbArgs) -> Result<Settings> {
    let mut settings = store_for(orbs.settings.clone())?.load()?;
    apply_overrides(&mut settings, orbs);
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, orbs: &OrbArgs) {
    if let Some(edge) = orbs.edge {
        settings.edge_harmonic = edge;
    }
    if let Some(divisor) = orbs.divisor {
        settings.orbs_divisor = divisor;
    }
    if orbs.full_orbs {
        settings.half_orbs_for_doubles = false;
    }
}

fn resolve_config(orbs: &OrbArgs) -> Result<AnalysisConfig> {
    let config = resolve_settings(orbs)?.analysis_config()?;
    tracing::info!(
        primal_orb = config.primal_orb(),
        edge_harmonic = config.edge_harmonic(),
        half_orbs_for_doubles = config.half_orbs_for_doubles(),
        "Analysis configuration"
    );
    Ok(config)
}

fn cmd_analyze(
    file: PathBuf,
    aspects: bool,
    patterns: bool,
    json: bool,
    orbs: OrbArgs,
) -> Result<()> {
    let config = resolve_config(&orbs)?;
    let object = input::InputFile::load(&file)?.into_chart_object()?;

    // neither flag: show both
    let (aspects, patterns) = if aspects || patterns {
        (aspects, patterns)
    } else {
        (true, true)
    };

    let mut service = HarmonicService::new(config);

    if json {
        let mut output = serde_json::Map::new();
        if aspects {
            output.insert(
                "aspects".to_string(),
                serde_json::to_value(service.aspect_table(&object)?)?,
            );
        }
        if patterns {
            output.insert(
                "patterns".to_string(),
                serde_json::to_value(service.pattern_table(&object)?)?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if aspects {
        print!("{}", service.aspect_table(&object)?.report());
    }
    if patterns {
        print!("{}", service.pattern_table(&object)?.report());
    }
    Ok(())
}

fn cmd_pair(first: f64, second: f64, json: bool, orbs: OrbArgs) -> Result<()> {
    let config = resolve_config(&orbs)?;
    let chart = Chart::with_points("Pair", [("A", first), ("B", second)])?;
    let points = chart.points();
    let batch = ResonanceBatch::new(&points[0], &points[1], &config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        print!("{}", batch.resonances_output());
        for aspect in batch.aspects() {
            println!("  {}", aspect);
        }
    }
    Ok(())
}

fn cmd_factors(upto: u32, arcs: bool) -> Result<()> {
    if arcs {
        print!("{}", harmonic_arcs_table(upto));
    } else {
        print!("{}", multipliers_table(upto));
    }
    Ok(())
}

/// One line per harmonic: unit arc, decomposition, and a mark on primes
fn harmonic_arcs_table(upto: u32) -> String {
    Harmonic::generate_up_to(upto)
        .into_iter()
        .map(|harmonic| {
            let mark = if harmonic.is_simple() { " *" } else { "" };
            format!(
                "{} {}{}\n",
                format_degrees_table(harmonic.single_pure_arc()),
                harmonic,
                mark
            )
        })
        .collect()
}

fn cmd_settings(command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show { settings } => {
            let store = store_for(settings)?;
            let current = store.load()?;
            println!("# {}", store.path().display());
            print!("{}", current.to_yaml_string()?);
            println!("# primal orb: {}", harmonia_core::format_degrees(current.primal_orb()));
        }
        SettingsCommands::Init { settings, force } => {
            let store = store_for(settings)?;
            if store.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    store.path().display()
                );
            }
            store.save(&Settings::default())?;
            println!("Wrote {}", store.path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides() {
        let mut settings = Settings::default();
        let orbs = OrbArgs {
            edge: Some(24),
            divisor: Some(36),
            full_orbs: true,
            settings: None,
        };
        apply_overrides(&mut settings, &orbs);

        let config = settings.analysis_config().unwrap();
        assert_eq!(config.edge_harmonic(), 24);
        assert_eq!(config.primal_orb(), 10.0);
        assert!(!config.half_orbs_for_doubles());
    }

    #[test]
    fn test_resolve_from_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "edge_harmonic: 12\n").unwrap();

        let orbs = OrbArgs {
            settings: Some(path),
            ..OrbArgs::default()
        };
        let config = resolve_config(&orbs).unwrap();
        assert_eq!(config.edge_harmonic(), 12);
        assert_eq!(config.primal_orb(), 12.0);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let dir = TempDir::new().unwrap();
        let orbs = OrbArgs {
            divisor: Some(0),
            settings: Some(dir.path().join("absent.yaml")),
            ..OrbArgs::default()
        };
        assert!(resolve_config(&orbs).is_err());
    }

    #[test]
    fn test_harmonic_arcs_table() {
        let table = harmonic_arcs_table(12);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[2].starts_with("120°00'00\""));
        assert!(lines[2].ends_with(" *"));
        assert!(lines[3].starts_with("090°00'00\""));
        assert!(lines[11].contains("12 <3x2x2>"));
        assert!(!lines[11].ends_with('*'));
    }

    #[test]
    fn test_factors_arcs_flag() {
        let cli = Cli::try_parse_from(["harmonia", "factors", "24", "--arcs"]).unwrap();
        match cli.command {
            Commands::Factors { upto, arcs } => {
                assert_eq!(upto, 24);
                assert!(arcs);
            }
            _ => panic!("expected factors"),
        }
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["harmonia", "analyze", "c.yaml", "--patterns", "--edge", "36"])
            .unwrap();
        match cli.command {
            Commands::Analyze {
                patterns, orbs, ..
            } => {
                assert!(patterns);
                assert_eq!(orbs.edge, Some(36));
            }
            _ => panic!("expected analyze"),
        }
    }
}
