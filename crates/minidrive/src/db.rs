//! SQLite catalog store
//!
//! Holds a catalog between sessions. It is only ever read into a [`Catalog`]
//! before browsing starts; navigation never touches the database.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

use crate::catalog::{Catalog, Entry, EntryKind};

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct CatalogImport {
    pub id: i64,
    pub source: String,
    pub imported_at: DateTime<Utc>,
    pub folder_count: i64,
    pub entry_count: i64,
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let in_memory = db_path == Path::new(MEMORY_PATH);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        // Every connection to :memory: is its own database
        let max_connections = if in_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        tracing::debug!(path = %db_path.display(), "opened catalog database");

        Ok(Self { pool })
    }

    /// Open the database only if its file is already there, without creating
    /// anything on disk.
    pub async fn open_existing<P: AsRef<Path>>(db_path: P) -> Result<Option<Self>> {
        let db_path = db_path.as_ref();
        let exists = tokio::fs::try_exists(db_path)
            .await
            .with_context(|| format!("Failed to check for {}", db_path.display()))?;

        if !exists {
            return Ok(None);
        }
        Self::new(db_path).await.map(Some)
    }

    /// Wrap an existing pool whose schema is already in place
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the stored catalog with `catalog` and record the import
    pub async fn save_catalog(&self, catalog: &Catalog, source: &str) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM entries").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM folders").execute(&mut *tx).await?;

        for (folder_id, entries) in catalog.iter() {
            sqlx::query("INSERT INTO folders (id) VALUES (?)")
                .bind(folder_id)
                .execute(&mut *tx)
                .await?;

            for (position, entry) in entries.iter().enumerate() {
                let (kind, url, size) = match &entry.kind {
                    EntryKind::File { url, size } => {
                        ("file", Some(url.as_str()), Some(size.as_str()))
                    }
                    EntryKind::Folder => ("folder", None, None),
                };

                sqlx::query(
                    "INSERT INTO entries (folder_id, position, id, name, kind, modified_date, url, size)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(folder_id)
                .bind(position as i64)
                .bind(&entry.id)
                .bind(&entry.name)
                .bind(kind)
                .bind(&entry.modified_date)
                .bind(url)
                .bind(size)
                .execute(&mut *tx)
                .await?;
            }
        }

        let imported_at = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "INSERT INTO imports (source, imported_at, folder_count, entry_count) VALUES (?, ?, ?, ?)",
        )
        .bind(source)
        .bind(&imported_at)
        .bind(catalog.len() as i64)
        .bind(catalog.entry_count() as i64)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            source,
            folders = catalog.len(),
            entries = catalog.entry_count(),
            "stored catalog"
        );

        Ok(result.last_insert_rowid())
    }

    /// Rebuild the stored catalog, preserving each folder's entry order
    pub async fn load_catalog(&self) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        let folder_rows = sqlx::query("SELECT id FROM folders")
            .fetch_all(&self.pool)
            .await?;
        for row in &folder_rows {
            let id: String = row.get("id");
            catalog.insert_folder(&id, Vec::new());
        }

        let rows = sqlx::query(
            "SELECT folder_id, id, name, kind, modified_date, url, size
             FROM entries ORDER BY folder_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: Vec<(String, Vec<Entry>)> = Vec::new();
        for row in &rows {
            let folder_id: String = row.get("folder_id");
            let entry = entry_from_row(row)?;

            match grouped.last_mut() {
                Some((id, entries)) if *id == folder_id => entries.push(entry),
                _ => grouped.push((folder_id, vec![entry])),
            }
        }
        for (folder_id, entries) in grouped {
            catalog.insert_folder(&folder_id, entries);
        }

        Ok(catalog)
    }

    pub async fn entry_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    pub async fn latest_import(&self) -> Result<Option<CatalogImport>> {
        let row = sqlx::query(
            "SELECT id, source, imported_at, folder_count, entry_count
             FROM imports ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let imported_at_str: String = row.get("imported_at");
        let imported_at = DateTime::parse_from_rfc3339(&imported_at_str)
            .with_context(|| format!("Bad import timestamp {}", imported_at_str))?
            .with_timezone(&Utc);

        Ok(Some(CatalogImport {
            id: row.get("id"),
            source: row.get("source"),
            imported_at,
            folder_count: row.get("folder_count"),
            entry_count: row.get("entry_count"),
        }))
    }
}

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Entry> {
    let kind: String = row.get("kind");
    let kind = match kind.as_str() {
        "folder" => EntryKind::Folder,
        "file" => {
            let url: Option<String> = row.get("url");
            let size: Option<String> = row.get("size");
            EntryKind::File {
                url: url.unwrap_or_default(),
                size: size.unwrap_or_default(),
            }
        }
        other => bail!("Unknown entry kind '{}'", other),
    };

    Ok(Entry {
        id: row.get("id"),
        name: row.get("name"),
        kind,
        modified_date: row.get("modified_date"),
    })
}
