//! Application state

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tt_core::task::{FileTaskStore, TaskService};
use tt_core::Error;

use crate::auth::AuthStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    data_dir: PathBuf,
    tasks: TaskService,
    auth: AuthStore,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub async fn new(data_dir: PathBuf) -> tt_core::Result<Self> {
        let task_store = FileTaskStore::new(data_dir.join("tasks.json")).await?;
        let tasks = TaskService::new(Arc::new(task_store));

        let auth = AuthStore::new(data_dir.join("users.json"))
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                data_dir,
                tasks,
                auth,
            }),
        })
    }

    /// Get the task service
    pub fn tasks(&self) -> &TaskService {
        &self.inner.tasks
    }

    /// Get the user store
    pub fn auth_store(&self) -> &AuthStore {
        &self.inner.auth
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}
