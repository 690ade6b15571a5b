use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// View projection over the task list. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Placeholder shown when the filtered view is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Filter::All => "No tasks yet. Press 'a' to add one.",
            Filter::Active => "Nothing active. All done!",
            Filter::Completed => "No completed tasks yet.",
        }
    }
}

/// Aggregate counts shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Hands out task ids that read as creation timestamps (milliseconds) but
/// never repeat, even when several tasks are created within one millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure future ids are greater than every id already in use.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    pub fn next_id(&mut self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    pub fn next_at(&mut self, now_millis: u64) -> u64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

/// The in-memory task list. Persistence is the caller's job; every mutating
/// method reports whether it changed anything so the caller knows when to save.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: Filter,
    ids: IdGenerator,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self::load(tasks).0
    }

    /// Builds a list from saved tasks and returns how many repeated ids had
    /// to be replaced. The first task with a given id keeps it.
    pub fn load(mut tasks: Vec<Task>) -> (Self, usize) {
        let mut ids = IdGenerator::new();
        for task in &tasks {
            ids.observe(task.id);
        }

        let mut seen = HashSet::with_capacity(tasks.len());
        let mut reassigned = 0;
        for task in &mut tasks {
            if !seen.insert(task.id) {
                task.id = ids.next_id();
                seen.insert(task.id);
                reassigned += 1;
            }
        }

        let list = Self {
            tasks,
            filter: Filter::All,
            ids,
        };
        (list, reassigned)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Appends a new task. Returns its id, or `None` when the trimmed text is empty.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: u64) -> bool {
        let orig_len = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < orig_len
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Tasks matching the current filter, in insertion order.
    pub fn visible(&self) -> Vec<&Task> {
        self.filtered(self.filter)
    }

    pub fn filtered(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskStats {
            total,
            active: total - completed,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_trims_and_appends() {
        let mut list = TaskList::new();
        let id = list.add("  buy milk  ").unwrap();

        assert_eq!(list.len(), 1);
        let task = list.get(id).unwrap();
        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let mut list = TaskList::new();
        assert_eq!(list.add(""), None);
        assert_eq!(list.add("   "), None);
        assert_eq!(list.add("\t\n"), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_rapid_adds_get_unique_ids() {
        let mut list = TaskList::new();
        let ids: Vec<u64> = (0..100)
            .map(|i| list.add(&format!("task {}", i)).unwrap())
            .collect();
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_id_generator_follows_clock_but_never_repeats() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(1_000), 1_001);
        assert_eq!(ids.next_at(999), 1_002);
        assert_eq!(ids.next_at(5_000), 5_000);
    }

    #[test]
    fn test_loaded_ids_are_not_reused() {
        let far_future = u64::MAX / 2;
        let mut list = TaskList::from_tasks(vec![Task {
            id: far_future,
            text: "old".to_string(),
            completed: false,
        }]);
        let id = list.add("new").unwrap();
        assert!(id > far_future);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut list = TaskList::new();
        let id = list.add("write report").unwrap();

        assert!(list.toggle(id));
        assert!(list.get(id).unwrap().completed);
        assert!(list.toggle(id));
        assert!(!list.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut list = TaskList::new();
        list.add("a").unwrap();
        let before = list.tasks().to_vec();
        assert!(!list.toggle(42));
        assert_eq!(list.tasks(), before.as_slice());
    }

    #[test]
    fn test_delete() {
        let mut list = TaskList::new();
        let a = list.add("a").unwrap();
        let b = list.add("b").unwrap();

        assert!(list.delete(a));
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].id, b);

        // Deleting again is a no-op.
        assert!(!list.delete(a));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_saved_ids_are_reassigned() {
        let saved = vec![
            Task {
                id: 5,
                text: "a".to_string(),
                completed: false,
            },
            Task {
                id: 5,
                text: "b".to_string(),
                completed: false,
            },
        ];
        let (mut list, reassigned) = TaskList::load(saved);
        assert_eq!(reassigned, 1);
        assert_eq!(list.tasks()[0].id, 5);
        let other = list.tasks()[1].id;
        assert!(other > 5);

        // Each id now names exactly one task.
        assert!(list.toggle(other));
        assert!(!list.get(5).unwrap().completed);
        assert!(list.delete(5));
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].text, "b");

        // A new task does not collide with the reassigned id either.
        let fresh = list.add("c").unwrap();
        assert!(fresh > other);
    }

    #[test]
    fn test_unique_saved_ids_are_kept() {
        let saved = vec![
            Task {
                id: 3,
                text: "a".to_string(),
                completed: true,
            },
            Task {
                id: 9,
                text: "b".to_string(),
                completed: false,
            },
        ];
        let (list, reassigned) = TaskList::load(saved.clone());
        assert_eq!(reassigned, 0);
        assert_eq!(list.tasks(), saved.as_slice());
    }

    #[test]
    fn test_filter_and_stats() {
        let mut list = TaskList::new();
        let a = list.add("a").unwrap();
        list.add("b").unwrap();
        list.add("c").unwrap();
        list.toggle(a);

        assert_eq!(
            list.stats(),
            TaskStats {
                total: 3,
                active: 2,
                completed: 1
            }
        );

        list.set_filter(Filter::Completed);
        let visible: Vec<u64> = list.visible().iter().map(|t| t.id).collect();
        assert_eq!(visible, vec![a]);

        // Filtering never touches the data.
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Active.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: 7,
            text: "x".to_string(),
            completed: true,
        };
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":7,"text":"x","completed":true}"#);
    }

    fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec(("[a-z ]{1,12}", any::<bool>()), 0..30).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (text, completed))| Task {
                    id: i as u64 + 1,
                    text,
                    completed,
                })
                .collect()
        })
    }

    proptest! {
        /// Active and Completed partition All.
        #[test]
        fn prop_filters_partition_all(tasks in tasks_strategy()) {
            let list = TaskList::from_tasks(tasks);
            let ids = |f: Filter| -> HashSet<u64> {
                list.filtered(f).iter().map(|t| t.id).collect()
            };
            let all = ids(Filter::All);
            let active = ids(Filter::Active);
            let completed = ids(Filter::Completed);

            prop_assert!(active.is_disjoint(&completed));
            let union: HashSet<u64> = active.union(&completed).copied().collect();
            prop_assert_eq!(union, all);

            let stats = list.stats();
            prop_assert_eq!(stats.active + stats.completed, stats.total);
        }

        /// Toggling any task twice leaves the list as it was.
        #[test]
        fn prop_toggle_twice_restores(tasks in tasks_strategy(), pick in any::<prop::sample::Index>()) {
            let mut list = TaskList::from_tasks(tasks);
            let before = list.tasks().to_vec();
            if !before.is_empty() {
                let id = before[pick.index(before.len())].id;
                prop_assert!(list.toggle(id));
                prop_assert_ne!(list.tasks(), before.as_slice());
                prop_assert!(list.toggle(id));
            }
            prop_assert_eq!(list.tasks(), before.as_slice());
        }

        #[test]
        fn prop_add_non_blank_increments(text in "[a-zA-Z0-9]{1,20}", pad in " {0,4}") {
            let mut list = TaskList::new();
            list.add("seed");
            let before = list.len();
            let id = list.add(&format!("{pad}{text}{pad}")).unwrap();
            prop_assert_eq!(list.len(), before + 1);
            prop_assert!(!list.get(id).unwrap().completed);
        }
    }
}
