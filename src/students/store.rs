//! Student storage — the `save(record) -> id` collaborator.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::model::StudentRecord;
use crate::error::StoreError;

/// Backend-agnostic student storage.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Persist a record and return its id. A caller-supplied id is kept;
    /// otherwise the store assigns one.
    async fn save(&self, record: &StudentRecord) -> Result<String, StoreError>;

    /// Look up a record by id.
    async fn get(&self, id: &str) -> Result<Option<StudentRecord>, StoreError>;
}

/// Process-local student store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStudentStore {
    students: RwLock<HashMap<String, StudentRecord>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.students.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.students.read().await.is_empty()
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn save(&self, record: &StudentRecord) -> Result<String, StoreError> {
        let id = record
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut stored = record.clone();
        stored.id = Some(id.clone());

        self.students.write().await.insert(id.clone(), stored);
        debug!(student_id = %id, "Student saved");
        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self.students.read().await.get(id).cloned())
    }
}
