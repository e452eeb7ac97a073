//! Task service
//!
//! Stateless orchestration between the transport layer and the repository.
//! Its one job is forwarding the caller's owner identity into every
//! repository call; errors pass through unchanged. Owner presence is
//! guaranteed by the signatures themselves: there is no method without an
//! owner id.

use std::sync::Arc;

use uuid::Uuid;

use super::model::{CreateTask, Task, TaskFilter, TaskStatus};
use super::repository::TaskRepository;
use crate::Result;

/// Orchestration facade over a concrete repository
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    /// Build the service around the repository it will forward to
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_tasks(&self, filter: &TaskFilter, owner_id: &str) -> Result<Vec<Task>> {
        tracing::debug!(owner_id, ?filter, "listing tasks");
        self.repository.list(filter, owner_id).await
    }

    pub async fn get_task(&self, id: Uuid, owner_id: &str) -> Result<Task> {
        self.repository.get(id, owner_id).await
    }

    pub async fn create_task(&self, new_task: CreateTask, owner_id: &str) -> Result<Task> {
        tracing::debug!(owner_id, title = %new_task.title, "creating task");
        self.repository.create(new_task, owner_id).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: TaskStatus,
        owner_id: &str,
    ) -> Result<Task> {
        tracing::debug!(owner_id, %id, ?status, "updating task status");
        self.repository.update_status(id, status, owner_id).await
    }

    pub async fn delete_task(&self, id: Uuid, owner_id: &str) -> Result<()> {
        tracing::debug!(owner_id, %id, "deleting task");
        self.repository.delete(id, owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::FileTaskStore;
    use crate::Error;
    use tempfile::TempDir;

    async fn build_service() -> (TaskService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTaskStore::new(temp_dir.path().join("tasks.json"))
            .await
            .unwrap();
        (TaskService::new(Arc::new(store)), temp_dir)
    }

    fn new_task(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_tasks_forwards_to_repository() {
        let (service, _temp) = build_service().await;

        service.create_task(new_task("One"), "u1").await.unwrap();
        service.create_task(new_task("Two"), "u1").await.unwrap();

        let tasks = service
            .list_tasks(&TaskFilter::default(), "u1")
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn test_get_task_returns_found_task() {
        let (service, _temp) = build_service().await;

        let created = service.create_task(new_task("Mine"), "u1").await.unwrap();
        let retrieved = service.get_task(created.id, "u1").await.unwrap();
        assert_eq!(retrieved.id, created.id);
    }

    #[tokio::test]
    async fn test_get_task_propagates_not_found_unchanged() {
        let (service, _temp) = build_service().await;

        let result = service.get_task(Uuid::new_v4(), "u1").await;
        assert!(matches!(result.unwrap_err(), Error::TaskNotFound(_)));
    }

    #[tokio::test]
    async fn test_owner_identity_accompanies_every_call() {
        let (service, _temp) = build_service().await;

        let created = service.create_task(new_task("Mine"), "u1").await.unwrap();

        // Each forwarded operation carries the caller's identity into the
        // scoped lookup; a different caller sees nothing.
        assert!(service.get_task(created.id, "u2").await.is_err());
        assert!(service
            .update_status(created.id, TaskStatus::Done, "u2")
            .await
            .is_err());
        assert!(service.delete_task(created.id, "u2").await.is_err());
        assert!(service
            .list_tasks(&TaskFilter::default(), "u2")
            .await
            .unwrap()
            .is_empty());
    }
}
