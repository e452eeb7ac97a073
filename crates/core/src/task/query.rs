//! Owner-scoped task query
//!
//! Builds an executable predicate from the optional list filters plus the
//! mandatory owner. The owner predicate is unconditional; everything else
//! is conjunctive on top of it.

use super::model::{Task, TaskFilter, TaskStatus};

/// A compiled list query. Pure value: building and matching have no side
/// effects and touch no storage.
#[derive(Debug, Clone)]
pub struct TaskQuery {
    owner_id: String,
    status: Option<TaskStatus>,
    /// Search needle, lowercased once at build time
    search: Option<String>,
}

impl TaskQuery {
    /// Compile a query for everything the owner can see, narrowed by the
    /// given filter.
    pub fn build(owner_id: impl Into<String>, filter: &TaskFilter) -> Self {
        Self {
            owner_id: owner_id.into(),
            status: filter.status,
            search: filter.search.as_ref().map(|s| s.to_lowercase()),
        }
    }

    /// Whether the task satisfies every predicate of this query.
    ///
    /// Owner equality first, then status equality, then a case-insensitive
    /// substring match against title or description.
    pub fn matches(&self, task: &Task) -> bool {
        if task.owner_id != self.owner_id {
            return false;
        }

        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !task.title.to_lowercase().contains(search)
                && !task.description.to_lowercase().contains(search)
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(owner: &str, title: &str, description: &str, status: TaskStatus) -> Task {
        let mut task = Task::new(title, owner).with_description(description);
        task.status = status;
        task
    }

    #[test]
    fn test_owner_predicate_is_unconditional() {
        let query = TaskQuery::build("u1", &TaskFilter::default());

        assert!(query.matches(&task("u1", "Buy milk", "", TaskStatus::Open)));
        assert!(!query.matches(&task("u2", "Buy milk", "", TaskStatus::Open)));
    }

    #[test]
    fn test_status_predicate_is_conjunctive() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Done),
            search: None,
        };
        let query = TaskQuery::build("u1", &filter);

        assert!(query.matches(&task("u1", "Ship it", "", TaskStatus::Done)));
        assert!(!query.matches(&task("u1", "Ship it", "", TaskStatus::Open)));
        assert!(!query.matches(&task("u2", "Ship it", "", TaskStatus::Done)));
    }

    #[test]
    fn test_search_matches_title_or_description_case_insensitive() {
        let filter = TaskFilter {
            status: None,
            search: Some("abc".to_string()),
        };
        let query = TaskQuery::build("u1", &filter);

        assert!(query.matches(&task("u1", "xxABCxx", "", TaskStatus::Open)));
        assert!(query.matches(&task("u1", "other", "has AbC inside", TaskStatus::Open)));
        assert!(!query.matches(&task("u1", "other", "nothing here", TaskStatus::Open)));
    }

    #[test]
    fn test_search_is_substring_not_anchored() {
        let filter = TaskFilter {
            status: None,
            search: Some("milk".to_string()),
        };
        let query = TaskQuery::build("u1", &filter);

        assert!(query.matches(&task("u1", "Buy milk today", "", TaskStatus::Open)));
        assert!(query.matches(&task("u1", "milkshake", "", TaskStatus::Open)));
    }

    #[test]
    fn test_both_filters_compose() {
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            search: Some("report".to_string()),
        };
        let query = TaskQuery::build("u1", &filter);

        assert!(query.matches(&task(
            "u1",
            "Quarterly report",
            "",
            TaskStatus::InProgress
        )));
        assert!(!query.matches(&task("u1", "Quarterly report", "", TaskStatus::Done)));
        assert!(!query.matches(&task("u1", "Groceries", "", TaskStatus::InProgress)));
    }

    #[test]
    fn test_absent_filters_reduce_to_owner_only() {
        let query = TaskQuery::build("u1", &TaskFilter::default());

        assert!(query.matches(&task("u1", "anything", "at all", TaskStatus::Done)));
    }
}
