use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pipview::output::{self, TreeStyle};
use pipview::storage::{DocumentStore, FsDocumentStore};
use pipview::utils::AppConfig;
use pipview::{LoadStatus, Session};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipview")]
#[command(about = "Browse and search field catalogs exported as tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog tree
    Tree {
        /// Exported document (HTML or tab-separated text)
        file: PathBuf,

        /// Show every node instead of only the top level
        #[arg(short, long)]
        expand_all: bool,

        /// Print all parsed nodes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search by keyword or by path (e.g. /Pip3A4/ServiceHeader/ProcessControl)
    Search {
        file: PathBuf,

        query: String,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the catalog interactively
    #[cfg(feature = "interactive")]
    View {
        file: PathBuf,

        /// Initial search
        query: Option<String>,
    },
    /// Manage saved documents
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// List saved documents, newest first
    List {
        /// Glob to filter names (e.g. "Pip3*")
        pattern: Option<String>,
    },
    /// Save a document into the store
    Save {
        file: PathBuf,

        /// Name to save under (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Print a saved document's tree
    Show {
        name: String,

        #[arg(short, long)]
        expand_all: bool,
    },
    /// Browse a saved document interactively
    #[cfg(feature = "interactive")]
    View { name: String },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config: {:#}", e);
        AppConfig::default()
    });
    let color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Commands::Tree {
            file,
            expand_all,
            json,
        } => {
            let raw = read_document(&file)?;
            let session = load_session(&raw, &file.display().to_string())?;

            if json {
                println!("{}", serde_json::to_string_pretty(session.store().nodes())?);
            } else {
                print_session(session, expand_all, &config, color)?;
            }
        }
        Commands::Search { file, query, json } => {
            let raw = read_document(&file)?;
            let mut session = load_session(&raw, &file.display().to_string())?;
            let resolution = session.search(&query);

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                output::print_search_summary(&resolution, color)?;
                output::print_tree(
                    &session.visible(),
                    session.store(),
                    session.state(),
                    tree_style(&config),
                    color,
                )?;
            }
        }
        #[cfg(feature = "interactive")]
        Commands::View { file, query } => {
            let raw = read_document(&file)?;
            let title = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            let session = load_session(&raw, &title)?;
            pipview::tui::run(session, title, query)?;
        }
        Commands::Store { action } => {
            handle_store_command(action, &config, color)?;
        }
    }

    Ok(())
}

fn handle_store_command(action: StoreAction, config: &AppConfig, color: bool) -> Result<()> {
    let store = FsDocumentStore::open(config.effective_store_dir()?)?;

    match action {
        StoreAction::List { pattern } => {
            let docs = match pattern {
                Some(pattern) => store.list_matching(&pattern)?,
                None => store.list()?,
            };

            if docs.is_empty() {
                println!("No saved documents in {}", store.dir().display());
                return Ok(());
            }

            for doc in docs {
                println!("{:40} {}", doc.name, doc.updated);
            }
        }
        StoreAction::Save { file, name } => {
            let raw = read_document(&file)?;
            let name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("File has no name; pass --name")?,
            };

            // Only store documents that parse
            pipview::parse(&raw).with_context(|| format!("Failed to parse {}", file.display()))?;

            store.write(&name, &raw)?;
            println!("Saved: {}", name);
        }
        StoreAction::Show { name, expand_all } => {
            let raw = store.read(&name)?;
            let session = load_session(&raw, &name)?;
            print_session(session, expand_all, config, color)?;
        }
        #[cfg(feature = "interactive")]
        StoreAction::View { name } => {
            let raw = store.read(&name)?;
            let session = load_session(&raw, &name)?;
            pipview::tui::run(session, name, None)?;
        }
    }

    Ok(())
}

/// Logs go to stderr; `PIPVIEW_LOG` takes an env-filter directive
fn init_logging() {
    let filter = EnvFilter::try_from_env("PIPVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exports are not always UTF-8; decode lossily rather than refuse
fn read_document(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_session(raw: &str, label: &str) -> Result<Session> {
    let mut session = Session::new();
    let status = session
        .load(raw)
        .with_context(|| format!("Failed to parse {}", label))?;

    if status == LoadStatus::Empty {
        eprintln!("{}: no catalog rows found", label);
    }

    Ok(session)
}

fn print_session(
    mut session: Session,
    expand_all: bool,
    config: &AppConfig,
    color: bool,
) -> Result<()> {
    if expand_all {
        session.expand_all();
    }

    output::print_tree(
        &session.visible(),
        session.store(),
        session.state(),
        tree_style(config),
        color,
    )?;
    Ok(())
}

fn tree_style(config: &AppConfig) -> TreeStyle {
    TreeStyle {
        indent_width: config.indent_width,
        show_descriptions: config.show_descriptions,
    }
}
