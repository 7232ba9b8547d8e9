//! JSONL (JSON Lines) storage.
//!
//! JSONL is the source of truth: one file per collection, one JSON document
//! per line. Appends never rewrite existing lines, which keeps match
//! documents immutable and preserves store order for reads.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use super::{MatchRepository, StorageConfig, StorageError, UserRepository};
use crate::models::{MatchId, MatchRecord, User};

/// Document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Matches,
}

impl Collection {
    /// Get the filename for this collection.
    pub fn filename(&self) -> &'static str {
        match self {
            Collection::Users => "users.jsonl",
            Collection::Matches => "matches.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a collection.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.collections_dir().join(collection.filename()))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single document to the file.
    pub fn append(&self, document: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(document)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended document to {:?}", self.path);
        Ok(())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a collection.
    pub fn for_collection(config: &StorageConfig, collection: Collection) -> Self {
        Self::new(config.collections_dir().join(collection.filename()))
    }

    /// Read all documents from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut documents = Vec::new();
        let mut line_num = 0;

        for line in reader.lines() {
            line_num += 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(document) => documents.push(document),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        line_num, self.path, e
                    );
                }
            }
        }

        debug!("Read {} documents from {:?}", documents.len(), self.path);
        Ok(documents)
    }

    /// Read documents matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// The production document store: one JSONL file per collection.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    config: StorageConfig,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    fn users(&self) -> JsonlReader<User> {
        JsonlReader::for_collection(&self.config, Collection::Users)
    }

    fn matches(&self) -> JsonlReader<MatchRecord> {
        JsonlReader::for_collection(&self.config, Collection::Matches)
    }
}

#[async_trait]
impl UserRepository for JsonlStore {
    async fn get(&self, id: &str) -> Result<Option<User>, StorageError> {
        Ok(self.users().read_where(|u| u.id == id)?.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<User>, StorageError> {
        self.users().read_all()
    }

    async fn resolve(&self, ids: &[&str]) -> Result<Vec<String>, StorageError> {
        let found = self.users().read_where(|u| ids.contains(&u.id.as_str()))?;
        Ok(found.into_iter().map(|u| u.id).collect())
    }

    async fn insert(&self, user: User) -> Result<(), StorageError> {
        JsonlWriter::for_collection(&self.config, Collection::Users).append(&user)
    }
}

#[async_trait]
impl MatchRepository for JsonlStore {
    async fn insert(&self, record: MatchRecord) -> Result<MatchId, StorageError> {
        let id = record.id.clone();
        JsonlWriter::for_collection(&self.config, Collection::Matches).append(&record)?;
        Ok(id)
    }

    async fn for_user(
        &self,
        user: &str,
        season: Option<i64>,
    ) -> Result<Vec<MatchRecord>, StorageError> {
        self.matches()
            .read_where(|m| m.involves(user) && season.is_none_or(|s| m.season == Some(s)))
    }

    async fn all(&self) -> Result<Vec<MatchRecord>, StorageError> {
        self.matches().read_all()
    }
}
