use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use minidrive::catalog::{Catalog, Entry};
use minidrive::db::Database;
use minidrive::navigator::NavigationState;
use minidrive::settings::Settings;
use minidrive::ui::{breadcrumb, App};

#[derive(Parser)]
#[command(name = "minidrive")]
#[command(about = "Browse a drive catalog with breadcrumb navigation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to database file
    #[arg(short, long, default_value = "~/.config/minidrive/minidrive.db")]
    db: String,

    /// JSON catalog to browse instead of the configured source
    #[arg(long)]
    catalog: Option<String>,

    /// Path to settings file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Log level (overrides settings)
    #[arg(short, long)]
    log_level: Option<tracing::Level>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive browser
    Browse,
    /// List a folder, reached by folder names from My Drive
    Ls {
        /// Folder names, outermost first
        names: Vec<String>,
    },
    /// Print the whole folder hierarchy
    Tree,
    /// Store a JSON catalog in the database
    Import {
        /// JSON catalog file
        file: PathBuf,
    },
    /// Write the active catalog as JSON
    Export {
        /// Output file
        file: PathBuf,
    },
    /// Store the built-in sample drive in the database
    Seed,
    /// Show where the catalog comes from and what it holds
    Info,
}

/// Where the browsed catalog was loaded from
enum CatalogSource {
    Json(PathBuf),
    Database(PathBuf),
    Sample,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Json(path) => write!(f, "JSON file {}", path.display()),
            CatalogSource::Database(path) => write!(f, "database {}", path.display()),
            CatalogSource::Sample => write!(f, "built-in sample drive"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = match &cli.config {
        Some(config) => expand(config),
        None => Settings::default_path(),
    };
    let settings = Settings::load(&settings_path).context("Failed to load settings")?;

    let level = cli.log_level.unwrap_or_else(|| settings.log_level());
    init_logging(&settings.log_path(), level).context("Failed to set up logging")?;

    let db_path = expand(&cli.db);

    match cli.command {
        None | Some(Commands::Browse) => {
            let (catalog, source) = load_catalog(&cli, &settings, &db_path).await?;
            tracing::info!(%source, "browsing catalog");

            let mut app = App::new(&catalog, settings.ui.clone());
            app.run()?;
        }
        Some(Commands::Ls { ref names }) => {
            let (catalog, _) = load_catalog(&cli, &settings, &db_path).await?;
            let (state, consumed) =
                NavigationState::new().enter_path(&catalog, names.as_slice());

            if consumed < names.len() {
                bail!(
                    "No folder named '{}' in {}",
                    names[consumed],
                    breadcrumb::plain(state.breadcrumb())
                );
            }

            println!("{}", breadcrumb::plain(state.breadcrumb()));
            let items = state.current_items(&catalog);
            if items.is_empty() {
                println!("  This folder is empty. Upload files to get started.");
            } else {
                let name_width = items
                    .iter()
                    .map(|e| e.name.chars().count())
                    .max()
                    .unwrap_or(0);
                for entry in items {
                    println!("  {}", format_row(entry, name_width));
                }
            }
        }
        Some(Commands::Tree) => {
            let (catalog, _) = load_catalog(&cli, &settings, &db_path).await?;

            println!("{}", NavigationState::new().breadcrumb()[0]);
            for (depth, entry) in catalog.walk() {
                println!("{}{} {}", "  ".repeat(depth + 1), icon(entry), entry.name);
            }
        }
        Some(Commands::Import { ref file }) => {
            let catalog = Catalog::load_json(file)?;
            let db = open_db(&db_path).await?;
            let import_id = db
                .save_catalog(&catalog, &file.display().to_string())
                .await?;
            println!(
                "Imported {} entries in {} folders (import {})",
                catalog.entry_count(),
                catalog.len(),
                import_id
            );
        }
        Some(Commands::Export { ref file }) => {
            let (catalog, source) = load_catalog(&cli, &settings, &db_path).await?;
            catalog.save_json(file)?;
            println!(
                "Wrote {} entries from {} to {}",
                catalog.entry_count(),
                source,
                file.display()
            );
        }
        Some(Commands::Seed) => {
            let db = open_db(&db_path).await?;
            let catalog = Catalog::sample();
            db.save_catalog(&catalog, "sample").await?;
            println!(
                "Stored sample drive ({} entries) in {}",
                catalog.entry_count(),
                db_path.display()
            );
        }
        Some(Commands::Info) => {
            let (catalog, source) = load_catalog(&cli, &settings, &db_path).await?;
            println!("Source: {}", source);
            println!("Folders: {}", catalog.len());
            println!("Entries: {}", catalog.entry_count());

            let dangling = catalog.dangling_folders();
            if !dangling.is_empty() {
                println!("\nFolders without a listing (shown as empty):");
                for entry in dangling {
                    println!("  📁 {} ({})", entry.name, entry.id);
                }
            }

            let db = Database::open_existing(&db_path)
                .await
                .with_context(|| format!("Failed to open database {}", db_path.display()))?;
            let latest = match db {
                Some(db) => db.latest_import().await?,
                None => None,
            };
            match latest {
                Some(import) => println!(
                    "\nLast import: {} at {} ({} entries)",
                    import.source,
                    import.imported_at.format("%Y-%m-%d %H:%M:%S"),
                    import.entry_count
                ),
                None => println!("\nNo catalog stored in {}", db_path.display()),
            }
        }
    }

    Ok(())
}

/// `--catalog` beats the settings file, which beats a non-empty database.
/// Without any of those the sample drive is browsed.
async fn load_catalog(
    cli: &Cli,
    settings: &Settings,
    db_path: &Path,
) -> Result<(Catalog, CatalogSource)> {
    let json_path = cli
        .catalog
        .as_deref()
        .map(expand)
        .or_else(|| settings.catalog_path());

    if let Some(path) = json_path {
        let catalog = Catalog::load_json(&path)?;
        return Ok((catalog, CatalogSource::Json(path)));
    }

    let db = open_db(db_path).await?;
    if db.entry_count().await? > 0 {
        let catalog = db.load_catalog().await?;
        for entry in catalog.dangling_folders() {
            tracing::warn!(folder_id = %entry.id, name = %entry.name, "folder has no listing");
        }
        return Ok((catalog, CatalogSource::Database(db_path.to_path_buf())));
    }

    tracing::debug!("no stored catalog, using sample drive");
    Ok((Catalog::sample(), CatalogSource::Sample))
}

async fn open_db(db_path: &Path) -> Result<Database> {
    Database::new(db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    // The terminal belongs to the browser, so logs go to a file
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

fn icon(entry: &Entry) -> &'static str {
    if entry.is_folder() {
        "📁"
    } else {
        "📄"
    }
}

fn format_row(entry: &Entry, name_width: usize) -> String {
    format!(
        "{} {:<width$}  {:>8}  {}",
        icon(entry),
        entry.name,
        entry.size().unwrap_or(""),
        entry.modified_date,
        width = name_width
    )
}
