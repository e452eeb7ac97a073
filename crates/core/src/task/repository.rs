//! Task repository trait
//!
//! Defines the interface for task storage operations. Every operation is
//! owner-scoped: the owner id is part of the lookup itself, never a check
//! applied after an unscoped fetch.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{CreateTask, Task, TaskFilter, TaskStatus};
use crate::Result;

/// Repository interface for owner-scoped task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task for the owner, status forced to `Open`
    async fn create(&self, new_task: CreateTask, owner_id: &str) -> Result<Task>;

    /// Look up a task by id AND owner. Fails with `TaskNotFound` whether
    /// the id is absent or the task belongs to someone else.
    async fn get(&self, id: Uuid, owner_id: &str) -> Result<Task>;

    /// List the owner's tasks narrowed by the filter. Never fails for
    /// "no matches".
    async fn list(&self, filter: &TaskFilter, owner_id: &str) -> Result<Vec<Task>>;

    /// Owner-scoped lookup followed by an atomic status write
    async fn update_status(&self, id: Uuid, status: TaskStatus, owner_id: &str) -> Result<Task>;

    /// Delete the task matching id AND owner, `TaskNotFound` if nothing did
    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<()>;
}
