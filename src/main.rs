use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::warn;

use codetray_lib::editor::Launcher;
use codetray_lib::error::CodetrayError;
use codetray_lib::registry::{ListOrder, ProjectRecord, ProjectRegistry, RegistryStore};
use codetray_lib::settings::{SettingsStore, AUTO_START_ENABLED};
use codetray_lib::{detector, logging};

/// Codetray - cross-platform project launcher
#[derive(Parser, Debug)]
#[command(name = "codetray")]
#[command(about = "Track project folders and open them in your editor", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a project directory
    Add {
        /// Path to the project directory
        path: PathBuf,
    },
    /// Remove a project from the registry
    Remove {
        /// Path of the registered project
        path: PathBuf,
    },
    /// List registered projects
    List {
        /// Sort order for the listing
        #[arg(long, value_enum, default_value_t = SortBy::Added)]
        sort: SortBy,
    },
    /// Open a registered project in the editor
    Open {
        /// Path of the registered project
        path: PathBuf,
    },
    /// Classify a directory without registering it
    Detect {
        /// Path to inspect
        path: PathBuf,
    },
    /// Show usage statistics over the registry
    Stats,
    /// Read or change persisted settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortBy {
    /// Order projects were added in
    Added,
    /// Alphabetical by name
    Name,
    /// Most opened first
    MostUsed,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the current settings
    Get,
    /// Persist the launch-at-login flag read by the tray shell
    Autostart { enabled: bool },
}

fn main() -> ExitCode {
    logging::init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Add { path } => {
            let mut registry = open_registry()?;
            let record = registry.add(&path)?;
            println!("added {}", describe(&record));
        }
        Commands::Remove { path } => {
            let mut registry = open_registry()?;
            let removed = registry.remove(&registry_key(&path))?;
            println!("removed {}", removed.label());
        }
        Commands::List { sort } => {
            let registry = open_registry()?;
            if registry.is_empty() {
                println!("no projects registered");
                return Ok(());
            }
            match sort {
                SortBy::Added => print_records(registry.iter(ListOrder::Insertion)),
                SortBy::Name => print_records(registry.iter(ListOrder::Name)),
                SortBy::MostUsed => {
                    print_records(registry.most_used(usize::MAX).into_iter());
                }
            }
        }
        Commands::Open { path } => {
            let mut registry = open_registry()?;
            let key = registry_key(&path);
            let record = registry
                .find(&key)
                .cloned()
                .ok_or_else(|| CodetrayError::not_found(key))?;

            let mut launcher = Launcher::new();
            launcher.open(Path::new(&record.path))?;

            // A failed usage bump shouldn't undo a successful launch
            if let Err(err) = registry.record_opened(&record.path) {
                warn!("could not record usage for {}: {}", record.path, err);
            }
            println!("opened {}", record.label());
        }
        Commands::Detect { path } => {
            let info = detector::detect(&path);
            match info.framework {
                Some(framework) => println!("{} ({})", info.ecosystem, framework),
                None => println!("{}", info.ecosystem),
            }
        }
        Commands::Stats => {
            let registry = open_registry()?;
            let stats = registry.stats();
            println!("Total projects: {}", stats.total_projects);
            println!("Projects used:  {}", stats.projects_used);
            println!("Total opens:    {}", stats.total_opens);
            if !stats.by_kind.is_empty() {
                println!("\nBy type:");
                for (kind, count) in &stats.by_kind {
                    println!("  {kind}: {count}");
                }
            }
            if !stats.most_used.is_empty() {
                println!("\nMost used:");
                for (name, count) in &stats.most_used {
                    println!("  {name}: {count} opens");
                }
            }
            println!("\nRegistry file: {}", registry.file_path().display());
        }
        Commands::Settings { action } => match action {
            SettingsAction::Get => {
                let store = SettingsStore::load_default()?;
                println!("{}", serde_json::to_string_pretty(store.all())?);
            }
            SettingsAction::Autostart { enabled } => {
                let mut store = SettingsStore::load_default()?;
                store.set(AUTO_START_ENABLED, Value::Bool(enabled))?;
                println!("autoStartEnabled = {enabled}");
            }
        },
    }

    Ok(())
}

/// Open the registry at its default location
///
/// A corrupt registry document is reported but not fatal: the process
/// continues with an empty in-memory registry and the file stays on
/// disk for manual inspection.
fn open_registry() -> anyhow::Result<ProjectRegistry> {
    let store = RegistryStore::at_default_path()
        .context("could not prepare the application data directory")?;

    match ProjectRegistry::open(store.clone()) {
        Ok(registry) => Ok(registry),
        Err(err @ CodetrayError::RegistryCorrupt { .. }) => {
            warn!("{err}");
            eprintln!("warning: {err}; continuing with an empty registry");
            Ok(ProjectRegistry::empty(store))
        }
        Err(err) => Err(err.into()),
    }
}

/// Normalize a user-supplied path to the key the registry stores
///
/// Falls back to the raw string when canonicalization fails, so
/// projects whose directory vanished can still be removed.
fn registry_key(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

fn describe(record: &ProjectRecord) -> String {
    let kind = record
        .ecosystem
        .map(|e| e.to_string())
        .unwrap_or_else(|| "Project".to_string());
    format!("{} [{}] at {}", record.label(), kind, record.path)
}

fn print_records<'a>(records: impl Iterator<Item = &'a ProjectRecord>) {
    for record in records {
        let opens = match record.open_count {
            0 => String::new(),
            n => format!("  ({n} opens)"),
        };
        println!("{:<28} {}{}", record.label(), record.path, opens);
    }
}
