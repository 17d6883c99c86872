use ratatui::widgets::{Block, Borders, Paragraph, Clear};
use ratatui::style::Style;
use ratatui::Frame;
use ratatui::layout::{Rect, Alignment};
use crate::Config;
use crate::tui::widgets::color::parse_color;
use crate::tui::widgets::form::popup_area;
use crate::nav::{AUTH_LINKS, NAV_LINKS};
use crate::utils::format_key_binding_for_display as key;

pub fn render_help(f: &mut Frame, area: Rect, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);

    let popup_area = popup_area(area, 60, 70);

    // Clear the background first so the list does not show through
    f.render_widget(Clear, popup_area);

    let help_text = build_help_text(config);

    let paragraph = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Help - Key Bindings")
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(fg_color).bg(bg_color)))
        .style(Style::default().fg(fg_color).bg(bg_color))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

pub fn build_help_text(config: &Config) -> String {
    let kb = &config.key_bindings;
    let mut text = String::new();

    text.push_str("Navigation:\n");
    text.push_str(&format!("  {}: Home\n", key(&kb.nav_home)));
    for (link, binding) in NAV_LINKS.iter().zip(kb.nav_links.iter()) {
        text.push_str(&format!("  {}: {}\n", key(binding), link.label));
    }
    for (link, binding) in AUTH_LINKS.iter().zip(kb.auth_links.iter()) {
        text.push_str(&format!("  {}: {} (wide terminals)\n", key(binding), link.label));
    }
    text.push_str(&format!("  {}: Menu (narrow terminals)\n", key(&kb.menu)));
    text.push_str(&format!("  {} / {}: Move selection\n", key(&kb.list_up), key(&kb.list_down)));
    text.push('\n');

    text.push_str("Tasks:\n");
    text.push_str(&format!("  {}: New task\n", key(&kb.new)));
    text.push_str(&format!("  {}: Toggle completed\n", key(&kb.toggle_task_status)));
    text.push_str(&format!("  {}: Delete task\n", key(&kb.delete)));
    text.push('\n');

    text.push_str("Filters:\n");
    text.push_str(&format!("  {}: Search (Enter keeps, Esc restores)\n", key(&kb.search)));
    text.push_str(&format!("  {}: Cycle status\n", key(&kb.status_filter)));
    text.push_str(&format!("  {}: Cycle category\n", key(&kb.category_filter)));
    text.push_str(&format!("  {}: Clear filters\n", key(&kb.clear_filters)));
    text.push('\n');

    text.push_str("New Task dialog:\n");
    text.push_str("  Tab / Shift+Tab: Next / previous field\n");
    text.push_str("  Up / Down: Cycle priority or category\n");
    text.push_str(&format!("  {} or Enter: Save\n", key(&kb.save)));
    text.push_str("  Esc: Cancel\n");
    text.push('\n');

    text.push_str("General:\n");
    text.push_str(&format!("  {}: Quit\n", key(&kb.quit)));
    text.push_str(&format!("  {}: Show/hide help\n", key(&kb.help)));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_configured_keys() {
        let mut config = Config::default();
        config.key_bindings.new = "a".to_string();
        let text = build_help_text(&config);
        assert!(text.contains("  a: New task"));
        assert!(text.contains("3: Tasks"));
        assert!(text.contains("Login / Signup"));
        assert!(text.contains("7: Sign Up (wide terminals)"));
    }
}
