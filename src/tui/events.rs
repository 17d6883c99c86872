use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, size as terminal_size};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;

use crate::tui::App;
use crate::tui::app::Mode;
use crate::tui::error::TuiError;
use crate::tui::layout::Layout;
use crate::tui::widgets::form::TaskField;
use crate::utils::{ParsedKeyBinding, has_primary_modifier, parse_key_binding};

/// Guard that restores the terminal even on panic.
/// Leaving raw mode or the alternate screen behind makes the user's shell unusable.
struct TerminalGuard {
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl TerminalGuard {
    fn new() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        Ok(Self {
            raw_mode_enabled: true,
            alternate_screen_enabled: true,
        })
    }

    /// Restore on normal exit. The guard does nothing on drop afterwards.
    fn restore(&mut self) -> Result<(), TuiError> {
        if self.raw_mode_enabled {
            disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        if self.alternate_screen_enabled {
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.alternate_screen_enabled = false;
        }
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Already in a cleanup path, errors are ignored
        if self.raw_mode_enabled {
            let _ = disable_raw_mode();
        }
        if self.alternate_screen_enabled {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
}

/// Every configured binding must parse before the terminal is taken over
pub fn validate_key_bindings(app: &App) -> Result<(), TuiError> {
    let kb = &app.config.key_bindings;
    let fixed = [
        &kb.quit,
        &kb.new,
        &kb.save,
        &kb.delete,
        &kb.toggle_task_status,
        &kb.search,
        &kb.status_filter,
        &kb.category_filter,
        &kb.clear_filters,
        &kb.list_up,
        &kb.list_down,
        &kb.menu,
        &kb.help,
        &kb.nav_home,
    ];
    for binding in fixed.into_iter().chain(kb.nav_links.iter()).chain(kb.auth_links.iter()) {
        parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    }
    Ok(())
}

pub fn run_event_loop(mut app: App) -> Result<(), TuiError> {
    // Check terminal size before entering alternate screen
    // so the message shows in the normal terminal
    let (width, height) = terminal_size()?;
    if width < Layout::MIN_WIDTH || height < Layout::MIN_HEIGHT {
        return Err(TuiError::RenderError(format!(
            "Terminal size too small. Current: {}x{}, Minimum required: {}x{}. Please resize your terminal window.",
            width, height, Layout::MIN_WIDTH, Layout::MIN_HEIGHT
        )));
    }
    validate_key_bindings(&app)?;

    let mut guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    log::info!("interactive session started on {}", app.router.path());

    loop {
        app.check_status_message_timeout();

        terminal.draw(|f| crate::tui::render::render(f, &mut app))?;
        // The list settles its offset while drawing
        app.sync_scroll();

        // Only Press events, Windows also reports Release
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if handle_key_event(&mut app, key_event)? {
                        break; // Quit requested
                    }
                }
                // Next draw picks up the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    guard.restore()?;
    log::info!("interactive session ended");
    Ok(())
}

/// Route a key press by mode. Returns true when the user asked to quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    match app.ui.mode {
        Mode::Create => handle_create_mode(app, key_event),
        Mode::Search => handle_search_mode(app, key_event),
        Mode::Help => handle_help_mode(app, key_event),
        Mode::View => handle_view_mode(app, key_event),
    }
}

fn is_binding(key_event: KeyEvent, binding: &str) -> Result<bool, TuiError> {
    let parsed = parse_key_binding(binding).map_err(TuiError::KeyBindingError)?;
    Ok(matches_key_event(key_event, &parsed))
}

fn handle_help_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if key_event.code == KeyCode::Esc || is_binding(key_event, &app.config.key_bindings.help)? {
        app.exit_help_mode();
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let editor = &mut app.search.editor;
    match key_event.code {
        KeyCode::Esc => {
            app.cancel_search();
            return Ok(false);
        }
        KeyCode::Enter => {
            app.confirm_search();
            return Ok(false);
        }
        KeyCode::Left => editor.move_cursor_left(),
        KeyCode::Right => editor.move_cursor_right(),
        KeyCode::Home => editor.move_cursor_home(),
        KeyCode::End => editor.move_cursor_end(),
        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => editor.delete_forward(),
        KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => editor.insert_char(c),
        _ => return Ok(false),
    }
    app.update_search();
    Ok(false)
}

fn handle_create_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    if is_binding(key_event, &app.config.key_bindings.save)? {
        app.submit_form();
        return Ok(false);
    }

    let Some(form) = app.form.as_mut() else {
        app.exit_create_mode();
        return Ok(false);
    };

    match key_event.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab if !key_event.modifiers.contains(KeyModifiers::SHIFT) => form.navigate_field(true),
        KeyCode::Tab | KeyCode::BackTab => form.navigate_field(false),
        KeyCode::Up => form.cycle(false),
        KeyCode::Down => form.cycle(true),
        code => {
            let on_priority = form.current_field == TaskField::Priority;
            if let Some(editor) = form.current_editor() {
                match code {
                    KeyCode::Left => editor.move_cursor_left(),
                    KeyCode::Right => editor.move_cursor_right(),
                    KeyCode::Home => editor.move_cursor_home(),
                    KeyCode::End => editor.move_cursor_end(),
                    KeyCode::Backspace => editor.delete_char(),
                    KeyCode::Delete => editor.delete_forward(),
                    KeyCode::Char(c) if !has_primary_modifier(key_event.modifiers) => editor.insert_char(c),
                    _ => {}
                }
            } else if on_priority {
                match code {
                    KeyCode::Left => form.cycle(false),
                    KeyCode::Right | KeyCode::Char(' ') => form.cycle(true),
                    _ => {}
                }
            }
        }
    }
    Ok(false)
}

fn handle_view_mode(app: &mut App, key_event: KeyEvent) -> Result<bool, TuiError> {
    let kb = app.config.key_bindings.clone();

    if is_binding(key_event, &kb.quit)? {
        return Ok(true);
    }

    if is_binding(key_event, &kb.help)? {
        app.enter_help_mode();
        return Ok(false);
    }

    // Mobile menu: open, choose, follow
    if app.ui.is_mobile && is_binding(key_event, &kb.menu)? {
        app.toggle_mobile_menu();
        return Ok(false);
    }
    if app.ui.is_mobile && app.header.is_mobile_menu_open() {
        match key_event.code {
            KeyCode::Esc => app.toggle_mobile_menu(),
            KeyCode::Enter => app.follow_menu_selection(),
            KeyCode::Up => app.header.move_menu_selection(false),
            KeyCode::Down => app.header.move_menu_selection(true),
            _ if is_binding(key_event, &kb.list_up)? => app.header.move_menu_selection(false),
            _ if is_binding(key_event, &kb.list_down)? => app.header.move_menu_selection(true),
            _ => {}
        }
        return Ok(false);
    }

    if is_binding(key_event, &kb.nav_home)? {
        app.navigate_home();
        return Ok(false);
    }
    for (index, binding) in kb.nav_links.iter().enumerate() {
        if is_binding(key_event, binding)? {
            app.navigate_to_link(index);
            return Ok(false);
        }
    }
    if !app.ui.is_mobile {
        for (index, binding) in kb.auth_links.iter().enumerate() {
            if is_binding(key_event, binding)? {
                app.navigate_to_auth_link(index);
                return Ok(false);
            }
        }
    }

    if !app.is_task_page() {
        return Ok(false);
    }

    if is_binding(key_event, &kb.new)? {
        app.enter_create_mode();
    } else if is_binding(key_event, &kb.search)? {
        app.enter_search_mode();
    } else if is_binding(key_event, &kb.status_filter)? {
        app.cycle_status_filter();
    } else if is_binding(key_event, &kb.category_filter)? {
        app.cycle_category_filter(true);
    } else if is_binding(key_event, &kb.clear_filters)? {
        app.clear_filters();
    } else if is_binding(key_event, &kb.toggle_task_status)? {
        app.toggle_selected();
    } else if is_binding(key_event, &kb.delete)? {
        app.delete_selected();
    } else if key_event.code == KeyCode::Up || is_binding(key_event, &kb.list_up)? {
        app.move_selection_up();
    } else if key_event.code == KeyCode::Down || is_binding(key_event, &kb.list_down)? {
        app.move_selection_down();
    }

    Ok(false)
}

fn matches_key_event(key_event: KeyEvent, binding: &ParsedKeyBinding) -> bool {
    // Ctrl on Windows/Linux, Option/Alt on macOS
    if binding.requires_ctrl != has_primary_modifier(key_event.modifiers) {
        return false;
    }
    binding.key_code == key_event.code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::filter::{CategoryFilter, StatusFilter};

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn quit_key_ends_the_loop() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('j')));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn space_toggles_and_d_deletes_selected() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.remaining(), 4);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.tasks.len(), 6);
        assert!(app.tasks.get(1).is_none());
    }

    #[test]
    fn search_typing_filters_live() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.ui.mode, Mode::Search);
        type_text(&mut app, "RUN");
        let ids: Vec<i64> = app.visible_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.filter.search, "RUN");

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filter.search, "RU");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.filter.search, "RUN");
    }

    #[test]
    fn filter_keys_cycle_and_clear() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.filter.status, StatusFilter::Incomplete);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.filter.category, CategoryFilter::Category("Work".to_string()));
        let ids: Vec<i64> = app.visible_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 7]);
        assert_eq!(app.remaining(), 2);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.filter.is_default());
    }

    #[test]
    fn create_dialog_round_trip() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.ui.mode, Mode::Create);
        type_text(&mut app, "Stretch");
        press(&mut app, KeyCode::Tab); // description
        press(&mut app, KeyCode::Tab); // priority
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab); // date
        press(&mut app, KeyCode::Tab); // category
        press(&mut app, KeyCode::Down);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)).unwrap();

        assert_eq!(app.ui.mode, Mode::View);
        let first = &app.tasks.as_slice()[0];
        assert_eq!(first.id, 8);
        assert_eq!(first.title, "Stretch");
        assert_eq!(first.priority, crate::models::Priority::Low);
        assert_eq!(first.category, "Personal");
    }

    #[test]
    fn escape_discards_the_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "q");
        assert_eq!(app.ui.mode, Mode::Create);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.mode, Mode::View);
        assert_eq!(app.tasks.len(), 7);
    }

    #[test]
    fn number_keys_follow_links() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.router.path(), "/dashboard");
        // Task keys do nothing off the task page
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.remaining(), 5);
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.router.path(), "/");
        press(&mut app, KeyCode::Char('3'));
        assert!(app.is_task_page());
    }

    #[test]
    fn account_keys_work_in_the_desktop_layout() {
        let mut app = app();
        app.set_viewport_width(160);
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.router.path(), "/login");
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.router.path(), "/signup");

        app.set_viewport_width(50);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('6'));
        assert!(app.is_task_page());
    }

    #[test]
    fn mobile_menu_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.header.is_mobile_menu_open());

        app.set_viewport_width(50);
        press(&mut app, KeyCode::Char('m'));
        assert!(app.header.is_mobile_menu_open());
        assert_eq!(app.header.menu_selection(), 2);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.router.path(), "/chat");
        assert!(!app.header.is_mobile_menu_open());
    }

    #[test]
    fn help_opens_and_closes() {
        let mut app = app();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.ui.mode, Mode::Help);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.mode, Mode::View);
    }

    #[test]
    fn bad_binding_is_reported() {
        let mut config = Config::default();
        config.key_bindings.quit = "Hyper+q".to_string();
        let mut app = App::new(config);
        assert!(validate_key_bindings(&app).is_err());
        let result = handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(result, Err(TuiError::KeyBindingError(_))));
    }
}
