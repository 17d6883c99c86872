use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout as RatLayout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::app::Mode;
use crate::tui::{App, Layout};
use crate::tui::widgets::{
    color::parse_color,
    filter_bar::render_filter_bar,
    form::render_task_form,
    header::{render_header, render_mobile_menu},
    help::render_help,
    page::{page_title, render_placeholder_page},
    status_bar::render_status_bar,
    task_list::render_task_list,
};
use crate::utils::format_key_binding_for_display as key;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let active_theme = app.config.get_active_theme();
    let fg_color = parse_color(&active_theme.fg);
    let bg_color = parse_color(&active_theme.bg);
    f.render_widget(Block::default().style(Style::default().fg(fg_color).bg(bg_color)), area);

    if area.width < Layout::MIN_WIDTH || area.height < Layout::MIN_HEIGHT {
        let message = format!(
            "Terminal too small: {}x{} (need {}x{})",
            area.width, area.height, Layout::MIN_WIDTH, Layout::MIN_HEIGHT
        );
        f.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), area);
        return;
    }

    app.set_viewport_width(area.width);
    let layout = Layout::calculate(area);

    if app.is_task_page() {
        render_task_page(f, app, &layout);
    } else {
        let path = app.router.path().to_string();
        render_placeholder_page(f, layout.page_area, &path, &app.config);
    }

    // Header goes last among page content so the mobile menu overlays the page
    let path = app.router.path().to_string();
    render_header(f, layout.header_area, &app.header, &path, app.ui.is_mobile, &app.config);
    if app.ui.is_mobile {
        render_mobile_menu(f, layout.page_area, &app.header, &path, &app.config);
    }

    match app.ui.mode {
        Mode::Create => {
            if let Some(ref mut form) = app.form {
                render_task_form(f, area, form, &app.config);
            }
        }
        Mode::Help => render_help(f, area, &app.config),
        Mode::View | Mode::Search => {}
    }

    let key_hints = get_key_hints(app);
    render_status_bar(f, layout.status_area, app.status.message.as_ref(), &key_hints, &app.config);
}

fn render_task_page(f: &mut Frame, app: &mut App, layout: &Layout) {
    let active_theme = app.config.get_active_theme();
    let accent = parse_color(&active_theme.accent);

    let title_chunks = RatLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(20)])
        .split(layout.title_area);
    let title = Line::from(Span::styled(
        format!(" {}", page_title(app.router.path())),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title), title_chunks[0]);
    let new_button = Line::from(Span::styled(
        format!("[+ Add Task ({})] ", key(&app.config.key_bindings.new)),
        Style::default().fg(accent),
    ));
    f.render_widget(Paragraph::new(new_button).alignment(Alignment::Right), title_chunks[1]);

    let search_editor = if app.ui.mode == Mode::Search {
        Some(&mut app.search.editor)
    } else {
        None
    };
    render_filter_bar(f, layout.filters_area, &app.filter, search_editor, &app.config);

    let tasks = app.filter.apply(&app.tasks);
    let remaining = crate::filter::remaining_count(&tasks);
    render_task_list(f, layout.main_area, &tasks, remaining, &mut app.ui.list_state, &app.config);
}

fn get_key_hints(app: &App) -> Vec<String> {
    let kb = &app.config.key_bindings;
    match app.ui.mode {
        Mode::Help => {
            vec![format!("Esc or {}: Exit help", key(&kb.help))]
        }
        Mode::Search => {
            vec![
                "Enter: Apply search".to_string(),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::Create => {
            vec![
                "Tab: Next field".to_string(),
                "Shift+Tab: Previous field".to_string(),
                "↑/↓: Cycle".to_string(),
                format!("{}/Enter: Save", key(&kb.save)),
                "Esc: Cancel".to_string(),
            ]
        }
        Mode::View => {
            let mut hints = vec![format!("{}: Quit", key(&kb.quit))];
            if app.header.is_mobile_menu_open() && app.ui.is_mobile {
                hints.push("↑/↓: Choose".to_string());
                hints.push("Enter: Open".to_string());
                hints.push(format!("Esc/{}: Close menu", key(&kb.menu)));
                return hints;
            }
            if app.ui.is_mobile {
                hints.push(format!("{}: Menu", key(&kb.menu)));
            }
            if app.is_task_page() {
                hints.push(format!("{}: New", key(&kb.new)));
                hints.push(format!("{}: Toggle", key(&kb.toggle_task_status)));
                hints.push(format!("{}: Delete", key(&kb.delete)));
                hints.push(format!("{}: Search", key(&kb.search)));
                hints.push(format!("{}: Status", key(&kb.status_filter)));
                hints.push(format!("{}: Category", key(&kb.category_filter)));
                if !app.filter.is_default() {
                    hints.push(format!("{}: Clear ({})", key(&kb.clear_filters), app.filter.summary()));
                }
            }
            hints.push(format!("{}: Help", key(&kb.help)));
            hints
        }
    }
}
