use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::Config;
use crate::filter::{StatusFilter, TaskFilter};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};
use crate::tui::widgets::editor::Editor;
use crate::utils::format_key_binding_for_display;

/// Search box, status buttons and category selector above the task list.
/// While searching, `search_editor` is what the user is typing.
pub fn render_filter_bar(
    f: &mut Frame,
    area: Rect,
    filter: &TaskFilter,
    search_editor: Option<&mut Editor>,
    config: &Config,
) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let keys = &config.key_bindings;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Search
            Constraint::Percentage(35), // Status
            Constraint::Percentage(25), // Category
        ])
        .split(area);

    let block_style = Style::default().fg(fg_color).bg(bg_color);

    // Search
    let searching = search_editor.is_some();
    let search_block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Search ({})", format_key_binding_for_display(&keys.search)))
        .border_style(if searching { Style::default().fg(accent) } else { Style::default() })
        .style(block_style);
    let viewport = chunks[0].width.saturating_sub(2) as usize;
    match search_editor {
        Some(editor) => {
            editor.update_horizontal_scroll(viewport);
            let paragraph = Paragraph::new(editor.visible_text(viewport)).block(search_block);
            f.render_widget(paragraph, chunks[0]);
            let x = chunks[0].x + 1 + editor.cursor_screen_col() as u16;
            f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
        }
        None => {
            let content = if filter.search.is_empty() {
                Line::from(Span::styled("Search tasks...", Style::default().add_modifier(Modifier::DIM)))
            } else {
                Line::from(filter.search.chars().take(viewport).collect::<String>())
            };
            f.render_widget(Paragraph::new(content).block(search_block), chunks[0]);
        }
    }

    // Status buttons
    let selected_fg = get_contrast_text_color(highlight_bg);
    let mut status_spans = Vec::new();
    for status in StatusFilter::ORDER {
        let label = format!(" {} ", status.label());
        if status == filter.status {
            status_spans.push(Span::styled(
                label,
                Style::default().fg(selected_fg).bg(highlight_bg).add_modifier(Modifier::BOLD),
            ));
        } else {
            status_spans.push(Span::raw(label));
        }
        status_spans.push(Span::raw(" "));
    }
    let status_paragraph = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Status ({})", format_key_binding_for_display(&keys.status_filter)))
            .style(block_style),
    );
    f.render_widget(status_paragraph, chunks[1]);

    // Category select
    let category_paragraph = Paragraph::new(Line::from(vec![
        Span::raw(filter.category.to_string()),
        Span::styled(" ▾", Style::default().fg(accent)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Category ({})", format_key_binding_for_display(&keys.category_filter)))
            .style(block_style),
    );
    f.render_widget(category_paragraph, chunks[2]);
}
