//! Loaders that open the result store.
//!
//! A [`StoreLoader`] produces an [`OpenStore`]: a read-only SQLite handle.
//! Two loaders are provided:
//!
//! - [`FileLoader`] opens a database file on the local filesystem.
//! - [`SnapshotLoader`] downloads the database over HTTP and opens the
//!   downloaded copy, which is kept in a private temporary file for as long
//!   as the handle lives.

use std::fmt::Debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rusqlite::{Connection, OpenFlags};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::error::StoreError;
use super::schema;

/// Default database file name used by the local file loader.
pub const DEFAULT_DATABASE_PATH: &str = "status-checker-database.db";

/// Path of the published database snapshot, relative to the dashboard host.
pub const DEFAULT_SNAPSHOT_PATH: &str = "/status-sentinel/status-checker-database.db";

/// An opened, read-only status database.
#[derive(Debug)]
pub struct OpenStore {
    connection: Mutex<Connection>,
    tables: Vec<String>,
    /// Keeps a downloaded snapshot on disk while the connection uses it.
    backing: Option<NamedTempFile>,
}

impl OpenStore {
    /// Open `path` read-only and list its tables.
    ///
    /// Fails with [`StoreError::Unavailable`] if the file is missing, cannot
    /// be read, or is not a SQLite database.
    pub fn open_read_only(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::unavailable(format!(
                "database not found at {}",
                path.display()
            )));
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags).map_err(|e| {
            StoreError::unavailable(format!("cannot open {}: {}", path.display(), e))
        })?;

        // SQLite opens lazily; reading the catalog is what rejects non-database files
        let tables = schema::select_table_names(&connection).map_err(|e| {
            StoreError::unavailable(format!(
                "{} is not a readable status database: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Available tables: {:?}", tables);

        Ok(Self {
            connection: Mutex::new(connection),
            tables,
            backing: None,
        })
    }

    /// Table names found when the store was opened.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Lock the connection for a query.
    pub(crate) fn connection(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Close the connection, then remove any downloaded snapshot.
    pub fn close(self) {
        let connection = self.connection.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Err((_, e)) = connection.close() {
            warn!("Error closing status database: {}", e);
        }
        drop(self.backing);
    }
}

/// Opens the result store.
///
/// Implementations are called at most once per initialization of a
/// [`StatusStore`](super::StatusStore); they do not cache.
#[async_trait]
pub trait StoreLoader: Send + Sync + Debug {
    /// Open the store.
    async fn open(&self) -> Result<OpenStore, StoreError>;

    /// Returns a human-readable description of where the store comes from.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}

/// Opens a database file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
    description: String,
}

impl FileLoader {
    /// Create a loader for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the database path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}

#[async_trait]
impl StoreLoader for FileLoader {
    async fn open(&self) -> Result<OpenStore, StoreError> {
        let path = self.path.clone();
        info!("Opening status database at {}", path.display());

        tokio::task::spawn_blocking(move || OpenStore::open_read_only(&path))
            .await
            .map_err(|e| StoreError::unavailable(format!("open task failed: {}", e)))?
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Downloads the database as a binary snapshot over HTTP.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    url: String,
    client: reqwest::Client,
    description: String,
}

impl SnapshotLoader {
    /// Create a loader that fetches the snapshot from `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let description = format!("snapshot: {}", url);
        Self {
            url,
            client: reqwest::Client::new(),
            description,
        }
    }

    /// Create a loader for the default snapshot path on `base_url`.
    ///
    /// ```
    /// use status_sentinel::SnapshotLoader;
    ///
    /// let loader = SnapshotLoader::from_base("https://status.example.com/");
    /// assert_eq!(
    ///     loader.url(),
    ///     "https://status.example.com/status-sentinel/status-checker-database.db"
    /// );
    /// ```
    pub fn from_base(base_url: &str) -> Self {
        Self::new(format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_SNAPSHOT_PATH))
    }

    /// Returns the snapshot URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StoreLoader for SnapshotLoader {
    async fn open(&self) -> Result<OpenStore, StoreError> {
        info!("Fetching database from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::unavailable(format!(
                "Failed to fetch database: {}",
                status
            )));
        }

        let payload = response.bytes().await?;
        info!("Database size: {} bytes", payload.len());

        tokio::task::spawn_blocking(move || -> Result<OpenStore, StoreError> {
            let mut file = NamedTempFile::new()?;
            file.write_all(&payload)?;
            file.flush()?;

            let mut store = OpenStore::open_read_only(file.path())?;
            store.backing = Some(file);
            Ok(store)
        })
        .await
        .map_err(|e| StoreError::unavailable(format!("open task failed: {}", e)))?
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::fixture;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn scenario_file() -> NamedTempFile {
        let file = NamedTempFile::new().unwrap();
        let conn = Connection::open(file.path()).unwrap();
        fixture::api_scenario(&conn);
        conn.close().unwrap();
        file
    }

    #[test]
    fn test_file_loader_description() {
        let loader = FileLoader::new("/tmp/status.db");
        assert_eq!(loader.path(), Path::new("/tmp/status.db"));
        assert_eq!(loader.description(), "file: /tmp/status.db");
        assert_eq!(FileLoader::default().path(), Path::new(DEFAULT_DATABASE_PATH));
    }

    #[tokio::test]
    async fn test_file_loader_opens_database() {
        let file = scenario_file();
        let store = FileLoader::new(file.path()).open().await.unwrap();
        assert_eq!(store.tables(), ["results", "url"]);
        store.close();
    }

    #[tokio::test]
    async fn test_file_loader_missing_file() {
        let err = FileLoader::new("/nonexistent/path/status.db").open().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().contains("database not found"));
    }

    #[tokio::test]
    async fn test_file_loader_rejects_non_database() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not a sqlite database, just some text padding it out").unwrap();

        let err = FileLoader::new(file.path()).open().await.unwrap_err();
        assert!(err.to_string().contains("not a readable status database"));
    }

    #[tokio::test]
    async fn test_snapshot_loader_fetches_and_opens() {
        let file = scenario_file();
        let body = std::fs::read(file.path()).unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DEFAULT_SNAPSHOT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .expect(1)
            .mount(&server)
            .await;

        let loader = SnapshotLoader::from_base(&server.uri());
        let store = loader.open().await.unwrap();
        assert_eq!(store.tables(), ["results", "url"]);

        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_snapshot_loader_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = SnapshotLoader::from_base(&server.uri()).open().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().contains("Failed to fetch database: 404"));
    }

    #[tokio::test]
    async fn test_snapshot_loader_connection_refused() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let err = SnapshotLoader::new("http://127.0.0.1:9/status.db").open().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
