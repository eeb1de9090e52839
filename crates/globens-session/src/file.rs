//! File-backed token store.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use globens_core::Session;
use uuid::Uuid;

use crate::{TRACING_TARGET_STORE, TokenStore};

/// Token store keeping the session as one JSON record in a file.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the record, so readers observe either the old or the new session. On
/// Unix the record is only readable by its owner.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session".to_owned());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }

    fn try_write(&self, session: &Session) -> io::Result<()> {
        let record = serde_json::to_vec_pretty(session)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let result = write_private(&temp_path, &record)
            .and_then(|()| fs::rename(&temp_path, &self.path));

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn try_load(&self) -> io::Result<Option<Session>> {
        let record = match fs::read(&self.path) {
            Ok(record) => record,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error),
        };

        Ok(Some(serde_json::from_slice(&record)?))
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

impl TokenStore for FileTokenStore {
    fn write(&self, session: &Session) {
        match self.try_write(session) {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET_STORE,
                path = %self.path.display(),
                expires_at = %session.expires_at,
                "Stored session record"
            ),
            Err(error) => tracing::warn!(
                target: TRACING_TARGET_STORE,
                path = %self.path.display(),
                error = %error,
                "Failed to store session record"
            ),
        }
    }

    fn load(&self) -> Option<Session> {
        match self.try_load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_STORE,
                    path = %self.path.display(),
                    error = %error,
                    "Failed to read session record, treating as absent"
                );
                None
            }
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(
                target: TRACING_TARGET_STORE,
                path = %self.path.display(),
                "Removed session record"
            ),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => tracing::warn!(
                target: TRACING_TARGET_STORE,
                path = %self.path.display(),
                error = %error,
                "Failed to remove session record"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use globens_core::TokenPayload;
    use jiff::Timestamp;

    use super::*;

    fn session(token: &str) -> Session {
        let payload = TokenPayload::new(token, 3600).with_refresh_token("refresh");
        Session::from_token(&payload, Timestamp::now())
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));

        assert!(store.load().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileTokenStore::new(&path).write(&session("abc"));

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.read().as_deref(), Some("abc"));
        assert_eq!(
            reopened.session().unwrap().refresh_token.as_deref(),
            Some("refresh")
        );
    }

    #[test]
    fn test_writes_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));

        store.write(&session("first"));
        store.write(&session("second"));

        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);

        let record: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(record["access_token"], "second");
        assert!(record.get("token_expires_at").is_some());
        assert!(record.get("refresh_expires_at").is_some());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/dir/session.json"));

        store.write(&session("abc"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_twice() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.write(&session("abc"));

        store.clear();
        assert!(!store.is_authenticated());
        store.clear();
        assert!(!store.is_authenticated());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.load().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_expired_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));

        let issued_at: Timestamp = "2020-01-01T00:00:00Z".parse().unwrap();
        store.write(&Session::from_token(&TokenPayload::new("old", 60), issued_at));

        assert!(store.read().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_record_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.write(&session("abc"));

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
