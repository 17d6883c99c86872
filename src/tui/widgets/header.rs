use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs};
use ratatui::Frame;

use crate::Config;
use crate::nav::{AUTH_LINKS, Header, NAV_LINKS, is_active};
use crate::tui::widgets::color::{get_contrast_text_color, parse_color};

pub const BRAND: &str = "TaskAI";
const MENU_ICON: &str = "☰";
const CLOSE_ICON: &str = "✕";

/// Header bar: brand on the left, links and the account group (desktop) or the menu toggle (mobile) on the right.
/// Opaque headers get the theme's header background, transparent ones inherit the terminal's.
pub fn render_header(f: &mut Frame, area: Rect, header: &Header, current_path: &str, mobile: bool, config: &Config) {
    let active_theme = config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let accent = parse_color(&active_theme.accent);
    let header_bg = parse_color(&active_theme.header_bg);

    let base_style = if header.is_opaque() {
        Style::default().fg(get_contrast_text_color(header_bg)).bg(header_bg)
    } else {
        Style::default().fg(fg_color)
    };
    f.render_widget(Block::default().style(base_style), area);

    let brand = Line::from(vec![
        Span::styled(" ◆ ", Style::default().fg(accent)),
        Span::styled(BRAND, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    let brand_width = brand.width() as u16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(brand_width + 2), Constraint::Min(1)])
        .split(area);
    f.render_widget(Paragraph::new(brand), chunks[0]);

    if mobile {
        let icon = if header.is_mobile_menu_open() { CLOSE_ICON } else { MENU_ICON };
        let toggle = Paragraph::new(Line::from(format!("{} ", icon)).right_aligned());
        f.render_widget(toggle, chunks[1]);
        return;
    }

    // Account group sits at the far right, nav links just left of it
    let auth = auth_line(current_path, base_style, accent);
    let auth_width = auth.width() as u16;
    let right = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(auth_width)])
        .split(chunks[1]);
    f.render_widget(Paragraph::new(auth), right[1]);

    let titles: Vec<Line> = NAV_LINKS
        .iter()
        .map(|link| Line::from(format!("{} {}", link.icon, link.label)))
        .collect();
    let selected = NAV_LINKS.iter().position(|link| is_active(link, current_path));

    let links_width: u16 = titles.iter().map(|t| t.width() as u16 + 3).sum();
    let links_area = if right[0].width > links_width {
        Rect::new(right[0].right() - links_width, right[0].y, links_width, right[0].height)
    } else {
        right[0]
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(base_style)
        .highlight_style(
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(" ");
    f.render_widget(tabs, links_area);
}

/// "Log In" as a plain link, "Sign Up" as a filled button
fn auth_line(current_path: &str, base_style: Style, accent: Color) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (index, link) in AUTH_LINKS.iter().enumerate() {
        let style = if index == AUTH_LINKS.len() - 1 {
            Style::default().fg(get_contrast_text_color(accent)).bg(accent)
        } else if is_active(link, current_path) {
            base_style.fg(accent).add_modifier(Modifier::BOLD)
        } else {
            base_style
        };
        spans.push(Span::styled(format!(" {} ", link.label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Dropdown listing every link, drawn under the header over the page content
pub fn render_mobile_menu(f: &mut Frame, area: Rect, header: &Header, current_path: &str, config: &Config) {
    if !header.is_mobile_menu_open() {
        return;
    }

    let active_theme = config.get_active_theme();
    let header_bg = parse_color(&active_theme.header_bg);
    let header_fg = get_contrast_text_color(header_bg);
    let accent = parse_color(&active_theme.accent);
    let highlight_bg = parse_color(&active_theme.highlight_bg);
    let highlight_fg = parse_color(&active_theme.highlight_fg);

    let height = (NAV_LINKS.len() as u16 + 2).min(area.height);
    let menu_area = Rect::new(area.x, area.y, area.width, height);
    f.render_widget(Clear, menu_area);

    let items: Vec<ListItem> = NAV_LINKS
        .iter()
        .map(|link| {
            let style = if is_active(link, current_path) {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(header_fg)
            };
            ListItem::new(Line::from(Span::styled(format!(" {}  {}", link.icon, link.label), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .style(Style::default().fg(header_fg).bg(header_bg)),
        )
        .highlight_style(Style::default().fg(highlight_fg).bg(highlight_bg));

    let mut state = ListState::default().with_selected(Some(header.menu_selection()));
    f.render_stateful_widget(list, menu_area, &mut state);
}
