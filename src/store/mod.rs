pub mod storage;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::{FilterPatch, Priority, Task, TaskDraft, TaskFilter, TaskPatch};
use storage::Storage;

/// Aggregate counts over the whole collection, unaffected by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Non-completed high-priority tasks
    pub high_priority: usize,
}

/// Owns the task collection and the active filter
///
/// Every mutation serializes the full collection and hands it to the storage
/// backend before returning. Derived views are recomputed on every read and
/// never cached.
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: TaskFilter,
    storage: Box<dyn Storage>,
}

impl TaskStore {
    /// Restore the collection from storage, seeding sample tasks when the
    /// restored collection is empty
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let mut store = Self {
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            storage,
        };

        if let Some(blob) = store.storage.load() {
            match serde_json::from_str::<Vec<Task>>(&blob) {
                Ok(tasks) => store.tasks = tasks,
                Err(e) => eprintln!("Failed to read saved tasks, starting fresh: {}", e),
            }
        }

        if store.tasks.is_empty() {
            store.seed();
        }

        store
    }

    /// Add a task, assigning a fresh id and timestamps. Returns the new id.
    pub fn add_task(&mut self, draft: TaskDraft) -> Uuid {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            completed: draft.completed,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_at: now,
            updated_at: now,
        };
        let id = task.id;
        self.tasks.push(task);
        self.persist();
        id
    }

    /// Merge a patch into the task with the given id and refresh its
    /// `updated_at`. Unknown ids are a silent no-op; the collection is
    /// persisted either way.
    pub fn update_task(&mut self, id: Uuid, patch: TaskPatch) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(category) = patch.category {
                task.category = category;
            }
            if let Some(due_date) = patch.due_date {
                task.due_date = due_date;
            }
            task.updated_at = Utc::now();
        }
        self.persist();
    }

    /// Remove the task with the given id; no-op when absent
    pub fn delete_task(&mut self, id: Uuid) {
        self.tasks.retain(|t| t.id != id);
        self.persist();
    }

    /// Flip the completion flag of the task with the given id
    pub fn toggle_completion(&mut self, id: Uuid) {
        if let Some(completed) = self.tasks.iter().find(|t| t.id == id).map(|t| t.completed) {
            self.update_task(
                id,
                TaskPatch {
                    completed: Some(!completed),
                    ..Default::default()
                },
            );
        }
    }

    /// Merge a patch into the active filter. Filter state is session-only
    /// and never persisted.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.filter.search = search;
        }
        if let Some(status) = patch.status {
            self.filter.status = status;
        }
        if let Some(priority) = patch.priority {
            self.filter.priority = priority;
        }
        if let Some(category) = patch.category {
            self.filter.category = category;
        }
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching the active filter, ordered by descending priority
    /// weight, then ascending due date. The sort is stable, so tasks tied on
    /// both keys keep their insertion order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|t| self.filter.matches(t)).collect();
        tasks.sort_by(|a, b| {
            b.priority
                .weight()
                .cmp(&a.priority.weight())
                .then(a.due_date.cmp(&b.due_date))
        });
        tasks
    }

    pub fn statistics(&self) -> Stats {
        Stats {
            total: self.tasks.len(),
            completed: self.tasks.iter().filter(|t| t.completed).count(),
            pending: self.tasks.iter().filter(|t| !t.completed).count(),
            high_priority: self
                .tasks
                .iter()
                .filter(|t| t.priority == Priority::High && !t.completed)
                .count(),
        }
    }

    /// Distinct non-empty categories, sorted for a stable picker
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .tasks
            .iter()
            .filter(|t| !t.category.is_empty())
            .map(|t| t.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    fn persist(&self) {
        let blob = match serde_json::to_string_pretty(&self.tasks) {
            Ok(blob) => blob,
            Err(e) => {
                eprintln!("Failed to serialize tasks: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.save(&blob) {
            eprintln!("Failed to save tasks: {}", e);
        }
    }

    /// First-run sample data, inserted through the normal add path so each
    /// task gets a fresh id and timestamps
    fn seed(&mut self) {
        let now = Utc::now();
        let samples = vec![
            TaskDraft::new("Finish project proposal")
                .with_description("Draft the scope and milestones for the next delivery")
                .with_priority(Priority::High)
                .with_category("Work")
                .with_due_date(now + Duration::hours(24)),
            TaskDraft::new("Read the async chapter")
                .with_description("Work through the exercises and take notes")
                .with_priority(Priority::Medium)
                .with_category("Learning")
                .with_due_date(now - Duration::hours(24))
                .completed(true),
            TaskDraft::new("Prepare sprint demo")
                .with_description("Collect screenshots and rehearse the walkthrough")
                .with_priority(Priority::High)
                .with_category("Work")
                .with_due_date(now + Duration::hours(12)),
            TaskDraft::new("Renew gym membership")
                .with_description("Compare the monthly and yearly plans first")
                .with_priority(Priority::Medium)
                .with_category("Personal")
                .with_due_date(now + Duration::hours(72)),
        ];

        for draft in samples {
            self.add_task(draft);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::storage::JsonFileStorage;
    use super::*;
    use crate::models::{PriorityFilter, StatusFilter};
    use anyhow::{Result, bail};
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// In-memory backend whose saved blob can be inspected from the test
    #[derive(Clone, Default)]
    struct MemoryStorage(Rc<RefCell<Option<String>>>);

    impl Storage for MemoryStorage {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn save(&self, blob: &str) -> Result<()> {
            *self.0.borrow_mut() = Some(blob.to_string());
            Ok(())
        }
    }

    /// Backend that rejects every save
    struct FailingStorage;

    impl Storage for FailingStorage {
        fn load(&self) -> Option<String> {
            None
        }

        fn save(&self, _blob: &str) -> Result<()> {
            bail!("disk full")
        }
    }

    fn empty_store() -> (TaskStore, MemoryStorage) {
        let backing = MemoryStorage::default();
        // Pre-populate with an empty array so opening does not seed samples
        backing.save("[]").unwrap();
        let mut store = TaskStore::open(Box::new(backing.clone()));
        store.tasks.clear();
        (store, backing)
    }

    #[test]
    fn test_open_empty_storage_seeds_samples() {
        let backing = MemoryStorage::default();
        let store = TaskStore::open(Box::new(backing.clone()));

        let stats = store.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.high_priority, 2);

        // Seeding goes through add_task, so it persists
        assert!(backing.load().is_some());
    }

    #[test]
    fn test_open_does_not_reseed_existing_tasks() {
        let backing = MemoryStorage::default();
        {
            let mut store = TaskStore::open(Box::new(backing.clone()));
            store.add_task(TaskDraft::new("Only task").with_category("Solo"));
        }

        let store = TaskStore::open(Box::new(backing));
        assert_eq!(store.statistics().total, 5);
        assert!(store.tasks().iter().any(|t| t.title == "Only task"));
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_seed() {
        let backing = MemoryStorage::default();
        backing.save("{ not json").unwrap();

        let store = TaskStore::open(Box::new(backing));
        assert_eq!(store.statistics().total, 4);
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let (mut store, _backing) = empty_store();

        let mut ids = HashSet::new();
        for i in 0..50 {
            ids.insert(store.add_task(TaskDraft::new(format!("task {}", i))));
        }
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_sets_both_timestamps() {
        let (mut store, _backing) = empty_store();

        let id = store.add_task(TaskDraft::new("timestamps"));
        let task = store.get(id).unwrap();
        assert_eq!(task.created_at, task.updated_at);
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_update_merges_fields_and_refreshes_updated_at() {
        let (mut store, _backing) = empty_store();

        let id = store.add_task(
            TaskDraft::new("before")
                .with_description("old")
                .with_category("Home"),
        );
        let created_at = store.get(id).unwrap().created_at;

        store.update_task(
            id,
            TaskPatch {
                title: Some("after".to_string()),
                priority: Some(Priority::High),
                ..Default::default()
            },
        );

        let task = store.get(id).unwrap();
        assert_eq!(task.title, "after");
        assert_eq!(task.priority, Priority::High);
        // Untouched fields survive the merge
        assert_eq!(task.description, "old");
        assert_eq!(task.category, "Home");
        // Creation time is immutable; updated_at moved past it
        assert_eq!(task.created_at, created_at);
        assert!(task.updated_at >= created_at);
    }

    #[test]
    fn test_update_unknown_id_is_a_no_op() {
        let (mut store, _backing) = empty_store();
        let id = store.add_task(TaskDraft::new("keep me"));

        store.update_task(
            Uuid::new_v4(),
            TaskPatch {
                title: Some("ghost".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(store.statistics().total, 1);
        assert_eq!(store.get(id).unwrap().title, "keep me");
    }

    #[test]
    fn test_delete_removes_only_the_matching_task() {
        let (mut store, _backing) = empty_store();
        let a = store.add_task(TaskDraft::new("a"));
        let b = store.add_task(TaskDraft::new("b"));

        store.delete_task(a);
        assert!(store.get(a).is_none());
        assert!(store.get(b).is_some());

        // Deleting again is a no-op
        store.delete_task(a);
        assert_eq!(store.statistics().total, 1);
    }

    #[test]
    fn test_toggle_twice_restores_completion() {
        let (mut store, _backing) = empty_store();
        let id = store.add_task(TaskDraft::new("toggle"));

        store.toggle_completion(id);
        assert!(store.get(id).unwrap().completed);
        store.toggle_completion(id);
        assert!(!store.get(id).unwrap().completed);

        // Unknown id does nothing
        store.toggle_completion(Uuid::new_v4());
        assert_eq!(store.statistics().total, 1);
    }

    #[test]
    fn test_filtered_tasks_respects_predicate_and_order() {
        let (mut store, _backing) = empty_store();
        let now = Utc::now();

        let low = store.add_task(
            TaskDraft::new("low early")
                .with_priority(Priority::Low)
                .with_due_date(now),
        );
        let high_late = store.add_task(
            TaskDraft::new("high late")
                .with_priority(Priority::High)
                .with_due_date(now + Duration::hours(5)),
        );
        let high_early = store.add_task(
            TaskDraft::new("high early")
                .with_priority(Priority::High)
                .with_due_date(now + Duration::hours(1)),
        );

        let ordered: Vec<Uuid> = store.filtered_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ordered, vec![high_early, high_late, low]);

        // Every returned task satisfies the predicate, every omitted one fails it
        store.set_filter(FilterPatch {
            priority: Some(PriorityFilter::Only(Priority::High)),
            ..Default::default()
        });
        let filtered = store.filtered_tasks();
        assert!(filtered.iter().all(|t| store.filter().matches(t)));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sort_is_deterministic_per_read() {
        let (mut store, _backing) = empty_store();
        let now = Utc::now();
        for i in 0..10 {
            store.add_task(
                TaskDraft::new(format!("t{}", i))
                    .with_priority(if i % 2 == 0 { Priority::High } else { Priority::Low })
                    .with_due_date(now + Duration::minutes(i)),
            );
        }

        let first: Vec<Uuid> = store.filtered_tasks().iter().map(|t| t.id).collect();
        let second: Vec<Uuid> = store.filtered_tasks().iter().map(|t| t.id).collect();
        assert_eq!(first, second);

        for pair in store.filtered_tasks().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(
                a.priority.weight() > b.priority.weight()
                    || (a.priority.weight() == b.priority.weight() && a.due_date <= b.due_date)
            );
        }
    }

    #[test]
    fn test_statistics_ignore_the_active_filter() {
        let (mut store, _backing) = empty_store();
        store.add_task(TaskDraft::new("a").with_priority(Priority::High));
        store.add_task(TaskDraft::new("b").completed(true));

        store.set_filter(FilterPatch {
            status: Some(StatusFilter::Completed),
            ..Default::default()
        });

        let stats = store.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.high_priority, 1);
    }

    #[test]
    fn test_distinct_categories_deduplicates_and_skips_empty() {
        let (mut store, _backing) = empty_store();
        store.add_task(TaskDraft::new("a").with_category("Work"));
        store.add_task(TaskDraft::new("b").with_category("Home"));
        store.add_task(TaskDraft::new("c").with_category("Work"));
        store.add_task(TaskDraft::new("d"));

        assert_eq!(store.distinct_categories(), vec!["Home".to_string(), "Work".to_string()]);
    }

    #[test]
    fn test_set_filter_merges_and_never_persists() {
        let (mut store, backing) = empty_store();
        store.add_task(TaskDraft::new("a"));
        let blob_after_add = backing.load().unwrap();

        store.set_filter(FilterPatch {
            search: Some("a".to_string()),
            ..Default::default()
        });
        store.set_filter(FilterPatch {
            status: Some(StatusFilter::Pending),
            ..Default::default()
        });

        // Both fields merged, earlier one retained
        assert_eq!(store.filter().search, "a");
        assert_eq!(store.filter().status, StatusFilter::Pending);

        // The stored blob is untouched and contains no filter state
        let blob = backing.load().unwrap();
        assert_eq!(blob, blob_after_add);
        assert!(!blob.contains("search"));
    }

    #[test]
    fn test_mutations_persist_full_collection() {
        let (mut store, backing) = empty_store();
        let id = store.add_task(TaskDraft::new("persisted"));

        let saved: Vec<Task> = serde_json::from_str(&backing.load().unwrap()).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, id);
        assert_eq!(saved[0].title, "persisted");

        store.delete_task(id);
        let saved: Vec<Task> = serde_json::from_str(&backing.load().unwrap()).unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_the_store_usable() {
        let mut store = TaskStore::open(Box::new(FailingStorage));
        let id = store.add_task(TaskDraft::new("survives"));
        assert!(store.get(id).is_some());
        store.toggle_completion(id);
        assert!(store.get(id).unwrap().completed);
    }

    #[test]
    fn test_persistence_across_instances_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let id;
        {
            let mut store = TaskStore::open(Box::new(JsonFileStorage::new(&path)));
            id = store.add_task(
                TaskDraft::new("Durable task")
                    .with_description("Should survive reload")
                    .with_priority(Priority::High)
                    .with_category("Work"),
            );
        }

        let store = TaskStore::open(Box::new(JsonFileStorage::new(&path)));
        let task = store.get(id).expect("task restored from disk");
        assert_eq!(task.title, "Durable task");
        assert_eq!(task.description, "Should survive reload");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "Work");
    }

    #[test]
    fn test_collection_round_trip_preserves_every_field() {
        let (mut store, backing) = empty_store();
        let now = Utc::now();
        store.add_task(
            TaskDraft::new("full record")
                .with_description("all fields set")
                .with_priority(Priority::Low)
                .with_category("Errands")
                .with_due_date(now + Duration::days(2))
                .completed(true),
        );

        let original = store.tasks()[0].clone();
        let restored: Vec<Task> = serde_json::from_str(&backing.load().unwrap()).unwrap();
        let restored = &restored[0];

        assert_eq!(restored.id, original.id);
        assert_eq!(restored.title, original.title);
        assert_eq!(restored.description, original.description);
        assert_eq!(restored.completed, original.completed);
        assert_eq!(restored.priority, original.priority);
        assert_eq!(restored.category, original.category);
        assert_eq!(restored.due_date, original.due_date);
        assert_eq!(restored.created_at, original.created_at);
        assert_eq!(restored.updated_at, original.updated_at);
    }

    #[test]
    fn test_dashboard_scenario() {
        let (mut store, _backing) = empty_store();

        store.set_filter(FilterPatch {
            status: Some(StatusFilter::Completed),
            ..Default::default()
        });
        assert!(store.filtered_tasks().is_empty());

        let now = Utc::now();
        let a = store.add_task(
            TaskDraft::new("A")
                .with_priority(Priority::High)
                .with_due_date(now + Duration::hours(1)),
        );
        let b = store.add_task(
            TaskDraft::new("B")
                .with_priority(Priority::Low)
                .with_due_date(now + Duration::hours(2))
                .completed(true),
        );

        store.set_filter(FilterPatch {
            status: Some(StatusFilter::All),
            ..Default::default()
        });
        let ordered: Vec<Uuid> = store.filtered_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ordered, vec![a, b]);

        let before = store.statistics();
        store.toggle_completion(a);
        let after = store.statistics();
        assert_eq!(after.pending, before.pending - 1);
        assert_eq!(after.completed, before.completed + 1);
        assert_eq!(after.total, before.total);
    }
}
