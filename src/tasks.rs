use crate::models::{NewTask, Task, seed_tasks};

/// Ordered task collection, newest first.
///
/// Every operation returns a fresh `TaskList` and leaves `self` untouched, so a
/// caller holding the previous value can tell that a transition happened by
/// comparing the two. Operations on ids that are not present return an equal
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn seeded() -> Self {
        Self::new(seed_tasks())
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Id the next created task receives: one past the current maximum, never below 1
    pub fn next_id(&self) -> i64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0).max(0) + 1
    }

    pub fn toggle_completion(&self, id: i64) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        completed: !task.completed,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        Self { tasks }
    }

    pub fn delete_task(&self, id: i64) -> Self {
        let tasks = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        Self { tasks }
    }

    /// Assign the next id to `payload` and put the new task at the head
    pub fn add_task(&self, payload: NewTask) -> Self {
        let task = payload.into_task(self.next_id());
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task);
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use std::collections::BTreeSet;

    fn ids(list: &TaskList) -> Vec<i64> {
        list.iter().map(|t| t.id).collect()
    }

    fn payload(title: &str) -> NewTask {
        NewTask::new(title, Priority::Medium, "2025-04-01", "Work")
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let list = TaskList::seeded();
        for task in list.iter() {
            let back = list.toggle_completion(task.id).toggle_completion(task.id);
            assert_eq!(back.get(task.id).map(|t| t.completed), Some(task.completed));
        }
    }

    #[test]
    fn toggle_only_touches_matching_record() {
        let list = TaskList::seeded();
        let toggled = list.toggle_completion(3);
        for (before, after) in list.iter().zip(toggled.iter()) {
            if before.id == 3 {
                assert_eq!(after.completed, !before.completed);
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn toggle_leaves_original_untouched() {
        let list = TaskList::seeded();
        let snapshot = list.clone();
        let toggled = list.toggle_completion(1);
        assert_eq!(list, snapshot);
        assert_ne!(toggled, list);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let list = TaskList::seeded();
        let toggled = list.toggle_completion(999);
        assert_eq!(toggled.len(), list.len());
        let before: BTreeSet<i64> = ids(&list).into_iter().collect();
        let after: BTreeSet<i64> = ids(&toggled).into_iter().collect();
        assert_eq!(before, after);
        assert_eq!(toggled, list);
    }

    #[test]
    fn delete_is_idempotent() {
        let list = TaskList::seeded();
        let once = list.delete_task(4);
        let twice = once.delete_task(4);
        assert_eq!(once.len(), 6);
        assert!(once.get(4).is_none());
        assert_eq!(once, twice);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let list = TaskList::seeded();
        assert_eq!(list.delete_task(-5), list);
    }

    #[test]
    fn add_prepends_with_fresh_id() {
        let list = TaskList::seeded();
        let added = list.add_task(payload("Write release notes"));
        assert_eq!(added.len(), list.len() + 1);
        let head = &added.as_slice()[0];
        assert_eq!(head.id, 8);
        assert!(list.iter().all(|t| t.id < head.id));
        assert!(!head.completed);
        assert_eq!(&added.as_slice()[1..], list.as_slice());
    }

    #[test]
    fn add_to_empty_list_starts_at_one() {
        let added = TaskList::default().add_task(payload("first"));
        assert_eq!(ids(&added), vec![1]);
    }

    #[test]
    fn add_ignores_negative_ids_when_picking_next() {
        let list = TaskList::new(vec![payload("odd").into_task(-3)]);
        assert_eq!(list.next_id(), 1);
    }

    #[test]
    fn add_after_deleting_max_reuses_relative_maximum() {
        let list = TaskList::seeded().delete_task(7);
        assert_eq!(list.add_task(payload("again")).as_slice()[0].id, 7);
    }

    #[test]
    fn add_accepts_unknown_category() {
        let added = TaskList::seeded().add_task(NewTask::new("Fix bike", Priority::Low, "soon", "Errands"));
        assert_eq!(added.as_slice()[0].category, "Errands");
    }

    #[test]
    fn ids_stay_unique_over_mixed_operations() {
        let mut list = TaskList::seeded();
        for i in 0..5 {
            list = list.add_task(payload(&format!("t{}", i)));
            list = list.delete_task(2 + i);
            list = list.toggle_completion(1);
        }
        let all = ids(&list);
        let unique: BTreeSet<i64> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }
}
