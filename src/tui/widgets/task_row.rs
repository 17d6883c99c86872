use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListItem;

use crate::config::Theme;
use crate::models::{Priority, Task};
use crate::tui::widgets::color::parse_color;

/// Requests a row can make of the collection that owns its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Toggle(i64),
    Delete(i64),
}

/// Lines each row occupies in the list
pub const ROW_HEIGHT: usize = 2;

/// Renders one task read-only. Its actions are already bound to the task id.
pub struct TaskRow<'a> {
    task: &'a Task,
}

impl<'a> TaskRow<'a> {
    pub fn new(task: &'a Task) -> Self {
        Self { task }
    }

    pub fn on_toggle(&self) -> TaskAction {
        TaskAction::Toggle(self.task.id)
    }

    pub fn on_delete(&self) -> TaskAction {
        TaskAction::Delete(self.task.id)
    }

    pub fn to_list_item(&self, theme: &Theme, max_width: usize) -> ListItem<'static> {
        let task = self.task;
        let fg = parse_color(&theme.fg);
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        let title_style = if task.completed {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(fg).add_modifier(Modifier::BOLD)
        };

        let title_width = max_width.saturating_sub(checkbox.chars().count() + 1);
        let first = Line::from(vec![
            Span::styled(format!("{} ", checkbox), Style::default().fg(fg)),
            Span::styled(truncate(&task.title, title_width), title_style),
        ]);

        let mut meta = vec![
            Span::raw("    "),
            Span::styled(format!("{:<6}", task.priority.as_str()), priority_style(task.priority)),
            Span::styled(format!("  {}  {}", task.date, task.category), Style::default().fg(Color::Gray)),
        ];
        if let Some(ref description) = task.description {
            let used: usize = meta.iter().map(|s| s.content.chars().count()).sum();
            let rest = max_width.saturating_sub(used + 3);
            if rest > 3 {
                meta.push(Span::styled(format!(" - {}", truncate(description, rest)), Style::default().fg(Color::DarkGray)));
            }
        }

        ListItem::new(vec![first, Line::from(meta)])
    }
}

fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::High => Color::LightRed,
        Priority::Medium => Color::LightYellow,
        Priority::Low => Color::LightGreen,
    };
    Style::default().fg(color)
}

/// Cut `text` to `max` characters, ending in "..." when shortened
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max.saturating_sub(3)).collect::<String>() + "..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_tasks;

    #[test]
    fn actions_capture_task_id() {
        let seed = seed_tasks();
        let row = TaskRow::new(&seed[3]);
        assert_eq!(row.on_toggle(), TaskAction::Toggle(4));
        assert_eq!(row.on_delete(), TaskAction::Delete(4));
    }

    #[test]
    fn row_is_two_lines() {
        let seed = seed_tasks();
        let item = TaskRow::new(&seed[0]).to_list_item(&Theme::default(), 60);
        assert_eq!(item.height(), ROW_HEIGHT);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Complete project proposal", 10), "Complet...");
    }
}
