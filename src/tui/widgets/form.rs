use ratatui::layout::{Alignment, Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::Config;
use crate::models::{CATEGORIES, NewTask, Priority};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::editor::Editor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    Priority,
    Date,
    Category,
}

/// What the creation dialog hands back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Save(NewTask),
    Cancel,
}

/// State of the "New Task" dialog. It never touches the task list itself.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub current_field: TaskField,
    pub title: Editor,
    pub description: Editor,
    pub priority: Priority,
    pub date: Editor,
    pub category: Editor,
    suggestion_index: Option<usize>,
}

impl TaskForm {
    pub fn new(today: &str) -> Self {
        Self {
            current_field: TaskField::Title,
            title: Editor::new(),
            description: Editor::new(),
            priority: Priority::Medium,
            date: Editor::from_string(today),
            category: Editor::from_string(CATEGORIES[0]),
            suggestion_index: Some(0),
        }
    }

    pub fn navigate_field(&mut self, forward: bool) {
        self.current_field = match (self.current_field, forward) {
            (TaskField::Title, true) => TaskField::Description,
            (TaskField::Description, true) => TaskField::Priority,
            (TaskField::Priority, true) => TaskField::Date,
            (TaskField::Date, true) => TaskField::Category,
            (TaskField::Category, true) => TaskField::Title, // Wrap around
            (TaskField::Title, false) => TaskField::Category, // Wrap around
            (TaskField::Description, false) => TaskField::Title,
            (TaskField::Priority, false) => TaskField::Description,
            (TaskField::Date, false) => TaskField::Priority,
            (TaskField::Category, false) => TaskField::Date,
        };
    }

    /// Editor behind the active field; the priority field has none
    pub fn current_editor(&mut self) -> Option<&mut Editor> {
        match self.current_field {
            TaskField::Title => Some(&mut self.title),
            TaskField::Description => Some(&mut self.description),
            TaskField::Priority => None,
            TaskField::Date => Some(&mut self.date),
            TaskField::Category => {
                self.suggestion_index = None;
                Some(&mut self.category)
            }
        }
    }

    /// Up/Down on the active field: cycle priority or category suggestions
    pub fn cycle(&mut self, forward: bool) {
        match self.current_field {
            TaskField::Priority => {
                self.priority = if forward {
                    self.priority.next()
                } else {
                    self.priority.previous()
                };
            }
            TaskField::Category => {
                let len = CATEGORIES.len();
                let next = match (self.suggestion_index, forward) {
                    (Some(i), true) => (i + 1) % len,
                    (Some(i), false) => (i + len - 1) % len,
                    (None, true) => 0,
                    (None, false) => len - 1,
                };
                self.suggestion_index = Some(next);
                self.category.set_text(CATEGORIES[next]);
            }
            _ => {}
        }
    }

    pub fn cancel(&self) -> FormOutcome {
        FormOutcome::Cancel
    }

    /// Build the new task, or name the missing field.
    /// The category is taken as typed.
    pub fn submit(&self) -> Result<FormOutcome, String> {
        let title = self.title.to_string();
        if title.trim().is_empty() {
            return Err("Title is required".to_string());
        }

        let description = self.description.to_string();
        let mut task = NewTask::new(
            title.trim(),
            self.priority,
            self.date.to_string().trim(),
            self.category.to_string().trim(),
        );
        if !description.trim().is_empty() {
            task = task.with_description(description.trim());
        }
        Ok(FormOutcome::Save(task))
    }
}

/// Centered popup area, sized as a percentage of `area`
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn render_task_form(f: &mut Frame, area: Rect, form: &mut TaskForm, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = if active_theme.highlight_fg.is_empty() {
        get_contrast_text_color(highlight_bg)
    } else {
        parse_color(&active_theme.highlight_fg)
    };
    let highlight_style = Style::default().bg(highlight_bg).fg(highlight_fg);
    let inactive_field_style = Style::default().fg(fg_color).add_modifier(Modifier::DIM);

    let popup = popup_area(area, 60, 80);
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("New Task")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(fg_color).bg(bg_color));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let field_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Description
            Constraint::Length(3), // Priority
            Constraint::Length(3), // Date
            Constraint::Length(3), // Category
            Constraint::Min(0),
        ])
        .split(inner);

    let style_for = |field: TaskField| {
        if form.current_field == field {
            highlight_style
        } else {
            inactive_field_style
        }
    };

    let title_style = style_for(TaskField::Title);
    let desc_style = style_for(TaskField::Description);
    let priority_style = style_for(TaskField::Priority);
    let date_style = style_for(TaskField::Date);
    let category_style = style_for(TaskField::Category);

    let text_fields: [(TaskField, &str, Style, usize); 4] = [
        (TaskField::Title, "Title", title_style, 0),
        (TaskField::Description, "Description (optional)", desc_style, 1),
        (TaskField::Date, "Date (YYYY-MM-DD)", date_style, 3),
        (TaskField::Category, "Category (↑/↓ for suggestions)", category_style, 4),
    ];

    let mut cursor = None;
    for (field, label, style, index) in text_fields {
        let field_area = field_areas[index];
        let viewport = field_area.width.saturating_sub(2) as usize;
        let editor = match field {
            TaskField::Title => &mut form.title,
            TaskField::Description => &mut form.description,
            TaskField::Date => &mut form.date,
            _ => &mut form.category,
        };
        editor.update_horizontal_scroll(viewport);
        let paragraph = Paragraph::new(Line::from(Span::styled(editor.visible_text(viewport), style)))
            .block(Block::default().borders(Borders::ALL).title(label));
        f.render_widget(paragraph, field_area);

        if form.current_field == field {
            let x = field_area.x + 1 + editor.cursor_screen_col() as u16;
            cursor = Some((x.min(field_area.right().saturating_sub(2)), field_area.y + 1));
        }
    }

    let priority_spans: Vec<Span> = Priority::ALL
        .iter()
        .flat_map(|p| {
            let label = format!(" {} ", p.as_str());
            let span = if *p == form.priority {
                Span::styled(label, priority_style.add_modifier(Modifier::REVERSED | Modifier::BOLD))
            } else {
                Span::styled(label, inactive_field_style)
            };
            [span, Span::raw(" ")]
        })
        .collect();
    let priority_paragraph = Paragraph::new(Line::from(priority_spans))
        .block(Block::default().borders(Borders::ALL).title("Priority (↑/↓)"));
    f.render_widget(priority_paragraph, field_areas[2]);

    if let Some(position) = cursor {
        f.set_cursor_position(position);
    }
}
