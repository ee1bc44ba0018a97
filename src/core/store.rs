use crate::domain::model::{Note, QuickLink, User};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Every persisted record, serialized as one JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub notes: Vec<Note>,
    pub links: Vec<QuickLink>,
    next_user_id: u64,
    next_note_id: u64,
    next_link_id: u64,
}

impl Snapshot {
    pub fn next_user_id(&mut self) -> u64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    pub fn next_note_id(&mut self) -> u64 {
        self.next_note_id += 1;
        self.next_note_id
    }

    pub fn next_link_id(&mut self) -> u64 {
        self.next_link_id += 1;
        self.next_link_id
    }
}

pub struct RecordStore<S: Storage> {
    storage: S,
    file_name: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> RecordStore<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// An absent snapshot file is an empty store.
    pub async fn load(&self) -> Result<Snapshot> {
        match self.storage.read_file(&self.file_name).await? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => Ok(Snapshot::default()),
        }
    }

    /// Loads, applies `mutate`, and writes back. Nothing is written when `mutate` fails.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut snapshot = self.load().await?;
        let output = mutate(&mut snapshot)?;

        let data = serde_json::to_vec_pretty(&snapshot)?;
        tracing::debug!("Writing snapshot ({} bytes) to {}", data.len(), self.file_name);
        self.storage.write_file(&self.file_name, &data).await?;

        Ok(output)
    }
}
