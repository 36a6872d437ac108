//! ort-workbench: browse dependency-analysis results from the command line
//!
//! Loads a workbench snapshot and prints the dependency tree or one of the
//! filtered record lists.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use ort_workbench::{
    cli::{
        self, IssueFilters, ListOptions, PackageFilters, TreeOptions, ViolationFilters,
        VulnerabilityFilters,
    },
    config::{self, AppConfig, ConfigPreset, Validatable},
    model::{ExclusionStatus, Identifier, ItemStatus, ResolutionStatus, Severity, Tool},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ort-workbench")]
#[command(version)]
#[command(about = "Browse dependency trees, issues, rule violations, vulnerabilities and packages of an analysis result", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred

EXAMPLES:
    # Show the dependency tree and reveal the first match of a search
    ort-workbench tree result.json --search log4j

    # Jump to the third match
    ort-workbench tree result.json --search log4j --next 2

    # Unresolved errors reported by the analyzer
    ort-workbench issues result.json --severity error --tool analyzer --resolution unresolved

    # Packages with vulnerabilities, and the values each filter offers
    ort-workbench packages result.yml --vulnerabilities present --show-options")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset: default, explore, exact
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments shared by the list subcommands
#[derive(Args)]
struct ListArgs {
    /// Path to the snapshot (.json, .yaml or .yml)
    snapshot: PathBuf,

    /// Free-text filter
    #[arg(short, long)]
    text: Option<String>,

    /// Print the available values of every filter
    #[arg(long)]
    show_options: bool,

    /// Match the text filter case-sensitively
    #[arg(long)]
    case_sensitive: bool,
}

impl ListArgs {
    fn options(&self) -> ListOptions {
        ListOptions {
            snapshot: self.snapshot.clone(),
            text: self.text.clone(),
            show_options: self.show_options,
        }
    }

    fn overrides(&self) -> AppConfig {
        AppConfig::builder()
            .text_filter_ignore_case(!self.case_sensitive)
            .build()
    }
}

/// Arguments for the `tree` subcommand
#[derive(Args)]
struct TreeArgs {
    /// Path to the snapshot (.json, .yaml or .yml)
    snapshot: PathBuf,

    /// Search the tree; the first hit is revealed and selected
    #[arg(short, long)]
    search: Option<String>,

    /// Advance to the next search hit N times
    #[arg(short, long, default_value_t = 0, requires = "search")]
    next: usize,

    /// Expand every item
    #[arg(long)]
    expand_all: bool,

    /// Start with every item expanded
    #[arg(long)]
    start_expanded: bool,

    /// Refuse dependency graphs that expand into more items than this
    #[arg(long)]
    max_tree_items: Option<usize>,
}

/// Arguments for the `issues` subcommand
#[derive(Args)]
struct IssuesArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Severity: hint, warning, error
    #[arg(long)]
    severity: Option<Severity>,

    /// Source of the issue
    #[arg(long)]
    source: Option<String>,

    /// Reporting tool: analyzer, scanner, advisor, evaluator
    #[arg(long)]
    tool: Option<Tool>,

    /// Package identifier (type:namespace:name:version)
    #[arg(long)]
    identifier: Option<Identifier>,

    /// Resolution status: resolved, unresolved
    #[arg(long)]
    resolution: Option<ResolutionStatus>,
}

/// Arguments for the `violations` subcommand
#[derive(Args)]
struct ViolationsArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Severity: hint, warning, error
    #[arg(long)]
    severity: Option<Severity>,

    /// Rule name
    #[arg(long)]
    rule: Option<String>,

    /// License
    #[arg(long)]
    license: Option<String>,

    /// License source (declared, detected, concluded)
    #[arg(long)]
    license_source: Option<String>,

    /// Package identifier (type:namespace:name:version)
    #[arg(long)]
    identifier: Option<Identifier>,

    /// Resolution status: resolved, unresolved
    #[arg(long)]
    resolution: Option<ResolutionStatus>,
}

/// Arguments for the `vulnerabilities` subcommand
#[derive(Args)]
struct VulnerabilitiesArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Advisor name
    #[arg(long)]
    advisor: Option<String>,

    /// Severity rating of any reference
    #[arg(long)]
    severity: Option<String>,

    /// Package identifier (type:namespace:name:version)
    #[arg(long)]
    identifier: Option<Identifier>,

    /// Resolution status: resolved, unresolved
    #[arg(long)]
    resolution: Option<ResolutionStatus>,
}

/// Arguments for the `packages` subcommand
#[derive(Args)]
struct PackagesArgs {
    #[command(flatten)]
    list: ListArgs,

    /// Package type (e.g. Maven, NPM)
    #[arg(long = "type")]
    kind: Option<String>,

    /// Namespace
    #[arg(long)]
    namespace: Option<String>,

    /// Declared or concluded license
    #[arg(long)]
    license: Option<String>,

    /// Scope the package appears in
    #[arg(long)]
    scope: Option<String>,

    /// Exclusion status: excluded, included
    #[arg(long)]
    exclusion: Option<ExclusionStatus>,

    /// Has issues: present, absent
    #[arg(long)]
    issues: Option<ItemStatus>,

    /// Has rule violations: present, absent
    #[arg(long)]
    violations: Option<ItemStatus>,

    /// Has vulnerabilities: present, absent
    #[arg(long)]
    vulnerabilities: Option<ItemStatus>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependency tree
    Tree(TreeArgs),

    /// List issues
    Issues(IssuesArgs),

    /// List rule violations
    Violations(ViolationsArgs),

    /// List vulnerabilities
    Vulnerabilities(VulnerabilitiesArgs),

    /// List packages
    Packages(PackagesArgs),

    /// List recently opened snapshots
    Recent,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .ort-workbench.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_preset(name: &str) -> std::result::Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{name}' (expected one of: {})", names.join(", "))
    })
}

/// Load the config file, layer preset and CLI overrides and validate the result.
fn effective_config(
    path: Option<&std::path::Path>,
    preset: Option<ConfigPreset>,
    flags: &AppConfig,
) -> Result<AppConfig> {
    let mut overrides = preset.map(AppConfig::from_preset).unwrap_or_default();
    overrides.merge(flags);
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, &overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", messages.join("\n  "));
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let config_path = cli.config.as_deref();
    let preset = cli.preset;

    match cli.command {
        Commands::Tree(args) => {
            let mut builder = AppConfig::builder().start_expanded(args.start_expanded);
            if let Some(limit) = args.max_tree_items {
                builder = builder.max_tree_items(limit);
            }
            let overrides = builder.build();
            let config = effective_config(config_path, preset, &overrides)?;
            let options = TreeOptions {
                snapshot: args.snapshot,
                search: args.search,
                next_hits: args.next,
                expand_all: args.expand_all,
            };
            cli::run_tree(&options, config)
        }

        Commands::Issues(args) => {
            let config = effective_config(config_path, preset, &args.list.overrides())?;
            let filters = IssueFilters {
                severity: args.severity,
                source: args.source,
                tool: args.tool,
                identifier: args.identifier,
                resolution: args.resolution,
            };
            cli::run_issues(&args.list.options(), filters, config)
        }

        Commands::Violations(args) => {
            let config = effective_config(config_path, preset, &args.list.overrides())?;
            let filters = ViolationFilters {
                severity: args.severity,
                rule: args.rule,
                license: args.license,
                license_source: args.license_source,
                identifier: args.identifier,
                resolution: args.resolution,
            };
            cli::run_violations(&args.list.options(), filters, config)
        }

        Commands::Vulnerabilities(args) => {
            let config = effective_config(config_path, preset, &args.list.overrides())?;
            let filters = VulnerabilityFilters {
                advisor: args.advisor,
                severity: args.severity,
                identifier: args.identifier,
                resolution: args.resolution,
            };
            cli::run_vulnerabilities(&args.list.options(), filters, config)
        }

        Commands::Packages(args) => {
            let config = effective_config(config_path, preset, &args.list.overrides())?;
            let filters = PackageFilters {
                kind: args.kind,
                namespace: args.namespace,
                license: args.license,
                scope: args.scope,
                exclusion: args.exclusion,
                issues: args.issues,
                violations: args.violations,
                vulnerabilities: args.vulnerabilities,
            };
            cli::run_packages(&args.list.options(), filters, config)
        }

        Commands::Recent => cli::run_recent(),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ort-workbench", &mut io::stdout());
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(config_path);
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for path in config::search_locations() {
                    eprintln!("  {}", path.display());
                }
                eprintln!();
                match config::discover_config_file(config_path) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                if let Some(path) = config::WorkbenchSettings::settings_path() {
                    eprintln!("Settings file: {}", path.display());
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".ort-workbench.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema = config::generate_json_schema()?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(())
            }
        },
    }
}
