use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    StatefulWidget,
};
use ratatui::Frame;

use crate::Config;
use crate::models::Task;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::task_row::{ROW_HEIGHT, TaskRow};

pub const EMPTY_MESSAGE: &str = "No tasks found. Create a new task to get started!";

/// Render the "Task List" card: the visible rows, the remaining count and a scrollbar.
pub fn render_task_list(
    f: &mut Frame,
    area: Rect,
    tasks: &[&Task],
    remaining: usize,
    list_state: &mut ListState,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = parse_color(&active_theme.highlight_fg);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(" Task List ").alignment(Alignment::Left))
        .title(Line::from(format!(" {} remaining ", remaining)).alignment(Alignment::Right))
        .style(Style::default().fg(fg_color).bg(bg_color));

    if tasks.is_empty() {
        let paragraph = Paragraph::new(EMPTY_MESSAGE)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let list_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Scrollbar
        ])
        .split(area);
    let list_area = list_areas[0];
    let scrollbar_area = list_areas[1];

    // 2 for borders, 2 for padding
    let max_width = list_area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| TaskRow::new(task).to_list_item(&active_theme, max_width))
        .collect();
    let total_items = items.len();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    StatefulWidget::render(list, list_area, f.buffer_mut(), list_state);

    let visible_items = (list_area.height.saturating_sub(2) as usize) / ROW_HEIGHT;
    if total_items > visible_items && scrollbar_area.width > 0 && list_area.height > 2 {
        let scrollbar_inner_area = Rect::new(
            scrollbar_area.x,
            list_area.y + 1,
            scrollbar_area.width,
            list_area.height.saturating_sub(2),
        );
        let mut scrollbar_state = ScrollbarState::new(total_items)
            .viewport_content_length(visible_items)
            .position(list_state.offset());
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        f.render_stateful_widget(scrollbar, scrollbar_inner_area, &mut scrollbar_state);
    }
}
