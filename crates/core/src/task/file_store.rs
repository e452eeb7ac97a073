//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{CreateTask, Task, TaskFilter, TaskStatus};
use super::query::TaskQuery;
use super::repository::TaskRepository;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of tasks
    cache: RwLock<HashMap<Uuid, Task>>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let tasks: Vec<Task> = serde_json::from_str(&content)?;
            tasks.into_iter().map(|t| (t.id, t)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let content = {
            let cache = self.cache.read().await;
            let tasks: Vec<&Task> = cache.values().collect();
            serde_json::to_string_pretty(&tasks)?
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, new_task: CreateTask, owner_id: &str) -> Result<Task> {
        let task = Task::new(new_task.title, owner_id).with_description(new_task.description);
        {
            let mut cache = self.cache.write().await;
            cache.insert(task.id, task.clone());
        }
        self.persist().await?;
        Ok(task)
    }

    async fn get(&self, id: Uuid, owner_id: &str) -> Result<Task> {
        let cache = self.cache.read().await;
        cache
            .get(&id)
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    async fn list(&self, filter: &TaskFilter, owner_id: &str) -> Result<Vec<Task>> {
        let query = TaskQuery::build(owner_id, filter);
        let cache = self.cache.read().await;
        let mut tasks: Vec<Task> = cache
            .values()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        // Sort by created_at descending (newest first)
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn update_status(&self, id: Uuid, status: TaskStatus, owner_id: &str) -> Result<Task> {
        // Single write-lock acquisition: the lookup and the status write
        // cannot interleave with a concurrent update of the same record.
        let updated = {
            let mut cache = self.cache.write().await;
            let task = cache
                .get_mut(&id)
                .filter(|t| t.owner_id == owner_id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            task.status = status;
            task.updated_at = Utc::now();
            task.clone()
        };
        self.persist().await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<()> {
        let removed = {
            let mut cache = self.cache.write().await;
            let owned = cache.get(&id).is_some_and(|t| t.owner_id == owner_id);
            owned && cache.remove(&id).is_some()
        };
        if !removed {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        self.persist().await?;
        Ok(())
    }
}
