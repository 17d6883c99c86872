use crate::models::{CATEGORIES, Task};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl StatusFilter {
    /// Button order on the task page: All, To Do, Completed
    pub const ORDER: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Incomplete, StatusFilter::Completed];

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Incomplete => "To Do",
            StatusFilter::Completed => "Completed",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Incomplete,
            StatusFilter::Incomplete => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "incomplete" | "todo" => Ok(StatusFilter::Incomplete),
            other => Err(format!("Unknown status filter: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Select entry order: All Categories, then the known categories
    pub fn next(&self) -> Self {
        let current = match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(name) => CATEGORIES.iter().position(|c| *c == name.as_str()),
        };
        let next = match current {
            None => Some(0),
            Some(idx) if idx + 1 < CATEGORIES.len() => Some(idx + 1),
            Some(_) => None,
        };
        match next {
            Some(idx) => CategoryFilter::Category(CATEGORIES[idx].to_string()),
            None => CategoryFilter::All,
        }
    }

    pub fn previous(&self) -> Self {
        let current = match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(name) => CATEGORIES.iter().position(|c| *c == name.as_str()),
        };
        match current {
            None => CategoryFilter::Category(CATEGORIES[CATEGORIES.len() - 1].to_string()),
            Some(0) => CategoryFilter::All,
            Some(idx) => CategoryFilter::Category(CATEGORIES[idx - 1].to_string()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All Categories"),
            CategoryFilter::Category(name) => f.write_str(name),
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.is_empty() && !name.eq_ignore_ascii_case("all") => CategoryFilter::Category(name),
            _ => CategoryFilter::All,
        }
    }
}

pub fn matches_status(task: &Task, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Completed => task.completed,
        StatusFilter::Incomplete => !task.completed,
    }
}

pub fn matches_category(task: &Task, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(name) => task.category == *name,
    }
}

/// Case-insensitive substring match on the title, then on the description if there is one
pub fn matches_search(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query_lower = query.to_lowercase();
    task.title.to_lowercase().contains(&query_lower)
        || task
            .description
            .as_ref()
            .map(|d| d.to_lowercase().contains(&query_lower))
            .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
}

impl TaskFilter {
    /// Derive the visible tasks. Each predicate runs as its own pass so the
    /// three stay independently testable; order is preserved.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|task| matches_status(task, self.status))
            .filter(|task| matches_category(task, &self.category))
            .filter(|task| matches_search(task, &self.search))
            .collect()
    }

    pub fn is_default(&self) -> bool {
        *self == TaskFilter::default()
    }

    pub fn clear(&mut self) {
        *self = TaskFilter::default();
    }

    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.status != StatusFilter::All {
            parts.push(format!("Status: {}", self.status.label()));
        }
        if let CategoryFilter::Category(ref name) = self.category {
            parts.push(format!("Category: {}", name));
        }
        if !self.search.is_empty() {
            parts.push(format!("Search: \"{}\"", self.search));
        }
        if parts.is_empty() {
            "No filters".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// Incomplete tasks within an already filtered view
pub fn remaining_count(filtered: &[&Task]) -> usize {
    filtered.iter().filter(|t| !t.completed).count()
}
