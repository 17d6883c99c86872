use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories offered by the category filter and the creation dialog.
/// A task's category is a free string and is never checked against this list.
pub const CATEGORIES: &[&str] = &["Work", "Personal", "Health", "Learning"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Next priority in dialog order, wrapping from low back to high
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub date: String, // free-form, the seed uses YYYY-MM-DD
    pub category: String,
}

/// Creation payload: a task without its id. The collection assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
    pub date: String,
    pub category: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, priority: Priority, date: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            priority,
            date: date.into(),
            category: category.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            priority: self.priority,
            date: self.date,
            category: self.category,
        }
    }
}

/// The fixed list every session starts from
pub fn seed_tasks() -> Vec<Task> {
    vec![
        NewTask::new("Complete project proposal", Priority::High, "2025-03-15", "Work")
            .with_description("Finish writing the project proposal for the client meeting")
            .into_task(1),
        Task {
            completed: true,
            ..NewTask::new("Review team presentations", Priority::Medium, "2025-03-14", "Work").into_task(2)
        },
        NewTask::new("Schedule doctor appointment", Priority::Medium, "2025-03-17", "Personal").into_task(3),
        NewTask::new("Go for a 5k run", Priority::Low, "2025-03-15", "Health")
            .with_description("Morning run in the park")
            .into_task(4),
        Task {
            completed: true,
            ..NewTask::new("Learn React hooks", Priority::Medium, "2025-03-12", "Learning").into_task(5)
        },
        NewTask::new("Buy groceries", Priority::High, "2025-03-15", "Personal")
            .with_description("Milk, eggs, bread, fruits")
            .into_task(6),
        NewTask::new("Prepare for team meeting", Priority::High, "2025-03-16", "Work").into_task(7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_unique_ids_in_order() {
        let ids: Vec<i64> = seed_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn seed_completion_matches_original_page() {
        let open: Vec<i64> = seed_tasks().iter().filter(|t| !t.completed).map(|t| t.id).collect();
        assert_eq!(open, vec![1, 3, 4, 6, 7]);
    }

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn priority_cycles_both_ways() {
        for p in Priority::ALL {
            assert_eq!(p.next().previous(), p);
        }
        assert_eq!(Priority::Low.next(), Priority::High);
    }

    #[test]
    fn new_task_keeps_completed_override() {
        let mut payload = NewTask::new("x", Priority::Low, "today", "Errands");
        payload.completed = true;
        let task = payload.into_task(42);
        assert_eq!(task.id, 42);
        assert!(task.completed);
        assert_eq!(task.category, "Errands");
    }
}
