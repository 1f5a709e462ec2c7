use std::fmt;
use std::str::FromStr;

use super::task::{Priority, Task};

/// Completion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::All,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        })
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            other => Err(format!("invalid status '{}' (expected all, completed or pending)", other)),
        }
    }
}

/// Priority filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(Priority::Low),
            Self::Only(Priority::Low) => Self::Only(Priority::Medium),
            Self::Only(Priority::Medium) => Self::Only(Priority::High),
            Self::Only(Priority::High) => Self::All,
        }
    }

    fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(p) => p == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(p) => f.write_str(p.as_str()),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<Priority>().map(Self::Only)
    }
}

/// The active view predicate over the task collection
///
/// One filter per store; it only ever lives in memory and is never written
/// to the tasks file.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title or description
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    /// Exact category match; empty means no constraint
    pub category: String,
}

impl TaskFilter {
    /// Whether a task passes the filter. All four clauses are conjunctive.
    pub fn matches(&self, task: &Task) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle);

        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Pending => !task.completed,
        };

        let matches_category = self.category.is_empty() || task.category == self.category;

        matches_search && matches_status && self.priority.admits(task.priority) && matches_category
    }

    pub fn is_default(&self) -> bool {
        self.search.is_empty()
            && self.status == StatusFilter::All
            && self.priority == PriorityFilter::All
            && self.category.is_empty()
    }
}

/// Partial filter update, merged into the active filter by `set_filter`
#[derive(Debug, Clone, Default)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub priority: Option<PriorityFilter>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn task(title: &str, description: &str, completed: bool, priority: Priority, category: &str) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            priority,
            category: category.to_string(),
            due_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.matches(&task("a", "", false, Priority::Low, "")));
        assert!(filter.matches(&task("b", "", true, Priority::High, "Work")));
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let filter = TaskFilter {
            search: "REPORT".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&task("Quarterly report", "", false, Priority::Medium, "")));
        assert!(filter.matches(&task("Misc", "finish the report draft", false, Priority::Medium, "")));
        assert!(!filter.matches(&task("Groceries", "milk and eggs", false, Priority::Medium, "")));
    }

    #[test]
    fn test_status_filter() {
        let done = task("done", "", true, Priority::Medium, "");
        let open = task("open", "", false, Priority::Medium, "");

        let completed = TaskFilter {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        assert!(completed.matches(&done));
        assert!(!completed.matches(&open));

        let pending = TaskFilter {
            status: StatusFilter::Pending,
            ..Default::default()
        };
        assert!(pending.matches(&open));
        assert!(!pending.matches(&done));
    }

    #[test]
    fn test_priority_filter() {
        let filter = TaskFilter {
            priority: PriorityFilter::Only(Priority::High),
            ..Default::default()
        };
        assert!(filter.matches(&task("a", "", false, Priority::High, "")));
        assert!(!filter.matches(&task("b", "", false, Priority::Medium, "")));
    }

    #[test]
    fn test_category_is_exact_match() {
        let filter = TaskFilter {
            category: "Work".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&task("a", "", false, Priority::Medium, "Work")));
        assert!(!filter.matches(&task("b", "", false, Priority::Medium, "Workout")));
        assert!(!filter.matches(&task("c", "", false, Priority::Medium, "")));
    }

    #[test]
    fn test_clauses_are_conjunctive() {
        let filter = TaskFilter {
            search: "plan".to_string(),
            status: StatusFilter::Pending,
            priority: PriorityFilter::Only(Priority::High),
            category: "Work".to_string(),
        };

        assert!(filter.matches(&task("Plan sprint", "", false, Priority::High, "Work")));
        // Each clause failing alone rejects the task
        assert!(!filter.matches(&task("Sprint", "", false, Priority::High, "Work")));
        assert!(!filter.matches(&task("Plan sprint", "", true, Priority::High, "Work")));
        assert!(!filter.matches(&task("Plan sprint", "", false, Priority::Low, "Work")));
        assert!(!filter.matches(&task("Plan sprint", "", false, Priority::High, "Home")));
    }

    #[test]
    fn test_cycling_covers_all_values() {
        let mut status = StatusFilter::All;
        for _ in 0..3 {
            status = status.next();
        }
        assert_eq!(status, StatusFilter::All);

        let mut priority = PriorityFilter::All;
        for _ in 0..4 {
            priority = priority.next();
        }
        assert_eq!(priority, PriorityFilter::All);
    }
}
