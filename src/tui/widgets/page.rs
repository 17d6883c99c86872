use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::Config;
use crate::nav::{AUTH_LINKS, HOME_PATH, NAV_LINKS};
use crate::tui::widgets::color::parse_color;
use crate::utils::format_key_binding_for_display;

/// Title shown for a route: the matching link's label, "Home" for `/`
pub fn page_title(path: &str) -> &str {
    if path == HOME_PATH {
        return "Home";
    }
    NAV_LINKS
        .iter()
        .chain(AUTH_LINKS)
        .find(|link| link.path == path)
        .map(|link| link.label)
        .unwrap_or(path)
}

/// Routes without a view of their own
pub fn render_placeholder_page(f: &mut Frame, area: Rect, path: &str, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    let tasks_key = config
        .key_bindings
        .nav_links
        .get(2)
        .map(|k| format_key_binding_for_display(k))
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::styled(page_title(path).to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("Nothing to show here yet."),
        Line::from(format!("Press {} to open your tasks.", tasks_key)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(path.to_string())
                .style(Style::default().fg(fg_color).bg(bg_color)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_links() {
        assert_eq!(page_title("/"), "Home");
        assert_eq!(page_title("/calendar"), "Calendar");
        assert_eq!(page_title("/Login"), "Login / Signup");
        assert_eq!(page_title("/nowhere"), "/nowhere");
        assert_eq!(page_title("/signup"), "Sign Up");
    }
}
