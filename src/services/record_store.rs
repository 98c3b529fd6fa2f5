use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use crate::models::records::{BlacklistFile, Dataset, RawRecord, UserRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("{path} is malformed: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error
    }
}

/// Outcome of a blacklist mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistChange {
    Applied,
    Unchanged
}

/// Both player snapshots (read-only) plus the blacklist and its file mirror.
pub struct RecordStore {
    players: Vec<UserRecord>,
    calipso: Vec<UserRecord>,
    blacklist: Mutex<Vec<String>>,
    blacklist_path: PathBuf
}

impl RecordStore {
    pub fn new(players: Vec<UserRecord>, calipso: Vec<UserRecord>, blacklist: Vec<String>, blacklist_path: impl Into<PathBuf>) -> Self {
        RecordStore {
            players,
            calipso,
            blacklist: Mutex::new(blacklist),
            blacklist_path: blacklist_path.into()
        }
    }

    /// Loads every snapshot. A broken file only empties its own dataset.
    pub fn open(data_path: impl AsRef<Path>, calipso_path: impl AsRef<Path>, blacklist_path: impl AsRef<Path>) -> Self {
        let players = load_records(data_path.as_ref(), Dataset::Players);
        let calipso = load_records(calipso_path.as_ref(), Dataset::Calipso);
        let blacklist = load_blacklist(blacklist_path.as_ref());

        RecordStore::new(players, calipso, blacklist, blacklist_path.as_ref())
    }

    #[cfg(test)]
    pub fn players(&self) -> &[UserRecord] {
        &self.players
    }

    #[cfg(test)]
    pub fn calipso(&self) -> &[UserRecord] {
        &self.calipso
    }

    /// First trimmed-identity match, players before calipso.
    pub fn find_by_identity(&self, id: &str) -> Option<&UserRecord> {
        let id = id.trim();

        self.players.iter()
            .find(|r| r.key() == Some(id))
            .or_else(|| self.calipso.iter().find(|r| r.key() == Some(id)))
    }

    /// Exact match on the players snapshot only.
    pub fn find_by_ip(&self, ip: &str) -> Option<&UserRecord> {
        self.players.iter().find(|r| r.ip.as_deref() == Some(ip))
    }

    pub async fn is_blacklisted(&self, id: &str) -> bool {
        self.blacklist.lock().await.iter().any(|o| o == id)
    }

    pub async fn blacklisted(&self) -> Vec<String> {
        self.blacklist.lock().await.clone()
    }

    // The check and the write happen under one lock, so two adds can't both pass the check.
    pub async fn add_blacklisted(&self, id: &str) -> Result<BlacklistChange, StoreError> {
        let mut blacklist = self.blacklist.lock().await;

        if blacklist.iter().any(|o| o == id) {
            return Ok(BlacklistChange::Unchanged);
        }

        blacklist.push(id.to_string());
        if let Err(ex) = persist_blacklist(&self.blacklist_path, &blacklist) {
            blacklist.pop();
            return Err(ex);
        }

        Ok(BlacklistChange::Applied)
    }

    pub async fn remove_blacklisted(&self, id: &str) -> Result<BlacklistChange, StoreError> {
        let mut blacklist = self.blacklist.lock().await;

        let Some(position) = blacklist.iter().position(|o| o == id) else {
            return Ok(BlacklistChange::Unchanged);
        };

        let removed = blacklist.remove(position);
        if let Err(ex) = persist_blacklist(&self.blacklist_path, &blacklist) {
            blacklist.insert(position, removed);
            return Err(ex);
        }

        Ok(BlacklistChange::Applied)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io { path: path.display().to_string(), source })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Json { path: path.display().to_string(), source })
}

pub fn load_records(path: &Path, dataset: Dataset) -> Vec<UserRecord> {
    match read_json::<Vec<RawRecord>>(path) {
        Ok(raw) => {
            let records: Vec<UserRecord> = raw.into_iter().map(|o| o.into_record(dataset)).collect();
            info!("Loaded {} entries from {}", records.len(), path.display());
            debug!("First {} loaded: {:?}", dataset.key_field(),
                records.iter().take(5).map(|o| o.identity.as_deref().unwrap_or("<none>")).collect::<Vec<_>>());
            records
        }
        Err(ex) => {
            error!("Failed to load {}: {}", path.display(), ex);
            vec![]
        }
    }
}

pub fn load_blacklist(path: &Path) -> Vec<String> {
    match read_json::<BlacklistFile>(path) {
        Ok(file) => {
            info!("Loaded {} blacklisted users", file.blacklisted_users.len());
            file.blacklisted_users
        }
        Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!("No blacklist at {}, starting empty", path.display());
            vec![]
        }
        Err(ex) => {
            error!("Failed to load blacklist, using an empty one: {}", ex);
            vec![]
        }
    }
}

pub fn persist_blacklist(path: &Path, blacklist: &[String]) -> Result<(), StoreError> {
    let file = BlacklistFile { blacklisted_users: blacklist.to_vec() };
    let json = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Json { path: path.display().to_string(), source })?;
    fs::write(path, json).map_err(|source| StoreError::Io { path: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(identity: &str, ip: Option<&str>, license: Option<&str>) -> UserRecord {
        UserRecord {
            identity: Some(identity.to_string()),
            ip: ip.map(str::to_string),
            license: license.map(str::to_string),
            steam: None
        }
    }

    #[test]
    fn players_win_over_calipso() {
        let store = RecordStore::new(
            vec![record("100", None, Some("from-players"))],
            vec![record("100", None, Some("from-calipso")), record("200", None, Some("only-calipso"))],
            vec![],
            "unused.json");

        assert_eq!(store.find_by_identity("100").unwrap().license.as_deref(), Some("from-players"));
        assert_eq!(store.find_by_identity("200").unwrap().license.as_deref(), Some("only-calipso"));
        assert!(store.find_by_identity("300").is_none());
    }

    #[test]
    fn identity_match_ignores_surrounding_whitespace() {
        let store = RecordStore::new(vec![record(" 100 ", None, None)], vec![], vec![], "unused.json");

        assert!(store.find_by_identity("100").is_some());
        assert!(store.find_by_identity("  100\n").is_some());
        assert!(store.find_by_identity("10").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let store = RecordStore::new(
            vec![record("1", None, Some("first")), record("1", None, Some("second"))],
            vec![], vec![], "unused.json");

        assert_eq!(store.find_by_identity("1").unwrap().license.as_deref(), Some("first"));
    }

    #[test]
    fn ip_lookup_is_exact_and_skips_calipso() {
        let store = RecordStore::new(
            vec![record("1", Some("1.2.3.4"), None)],
            vec![record("2", Some("5.6.7.8"), None)],
            vec![], "unused.json");

        assert_eq!(store.find_by_ip("1.2.3.4").unwrap().identity.as_deref(), Some("1"));
        assert!(store.find_by_ip(" 1.2.3.4").is_none());
        assert!(store.find_by_ip("5.6.7.8").is_none());
    }

    #[test]
    fn broken_snapshots_degrade_independently() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data.json");
        let calipso = dir.path().join("calipso.json");
        fs::write(&data, "{ not json").unwrap();
        fs::write(&calipso, r#"[{"discord": 42, "license": "L"}]"#).unwrap();

        let store = RecordStore::open(&data, &calipso, dir.path().join("blacklist.json"));

        assert!(store.players().is_empty());
        assert_eq!(store.calipso().len(), 1);
        assert_eq!(store.find_by_identity("42").unwrap().license.as_deref(), Some("L"));
    }

    #[test]
    fn blacklist_without_field_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        fs::write(&path, "{}").unwrap();

        assert!(load_blacklist(&path).is_empty());
        assert!(load_blacklist(&dir.path().join("missing.json")).is_empty());
    }

    #[test]
    fn persisted_blacklist_reloads_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        let entries = vec!["3".to_string(), "1".to_string(), "2".to_string()];

        persist_blacklist(&path, &entries).unwrap();

        assert_eq!(load_blacklist(&path), entries);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"blacklisted_users\""));
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn adding_twice_keeps_one_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        let store = RecordStore::new(vec![], vec![], vec![], &path);

        assert_eq!(store.add_blacklisted("7").await.unwrap(), BlacklistChange::Applied);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(store.add_blacklisted("7").await.unwrap(), BlacklistChange::Unchanged);

        assert_eq!(store.blacklisted().await, vec!["7".to_string()]);
        assert_eq!(fs::read_to_string(&path).unwrap(), written);
        assert!(store.is_blacklisted("7").await);
    }

    #[tokio::test]
    async fn removing_absent_entry_never_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        let store = RecordStore::new(vec![], vec![], vec!["1".to_string()], &path);

        assert_eq!(store.remove_blacklisted("200").await.unwrap(), BlacklistChange::Unchanged);

        assert!(!path.exists());
        assert_eq!(store.blacklisted().await, vec!["1".to_string()]);
    }

    #[tokio::test]
    async fn remove_rewrites_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blacklist.json");
        let store = RecordStore::new(vec![], vec![], vec!["1".to_string(), "2".to_string()], &path);

        assert_eq!(store.remove_blacklisted("1").await.unwrap(), BlacklistChange::Applied);

        assert_eq!(load_blacklist(&path), vec!["2".to_string()]);
        assert!(!store.is_blacklisted("1").await);
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("blacklist.json");
        let store = RecordStore::new(vec![], vec![], vec![], &path);

        assert!(store.add_blacklisted("9").await.is_err());
        assert!(store.blacklisted().await.is_empty());
    }

    #[tokio::test]
    async fn failed_remove_restores_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("blacklist.json");
        let entries = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        let store = RecordStore::new(vec![], vec![], entries.clone(), &path);

        assert!(store.remove_blacklisted("2").await.is_err());
        assert_eq!(store.blacklisted().await, entries);
    }
}
