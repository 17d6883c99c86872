use ratatui::widgets::ListState;
use std::cmp;
use std::time::Instant;

use crate::Config;
use crate::filter::{TaskFilter, remaining_count};
use crate::models::Task;
use crate::nav::{AUTH_LINKS, Header, NAV_LINKS, Router, ScrollSignal, TASKS_PATH};
use crate::tasks::TaskList;
use crate::tui::widgets::editor::Editor;
use crate::tui::widgets::form::{FormOutcome, TaskForm};
use crate::tui::widgets::task_row::{ROW_HEIGHT, TaskAction, TaskRow};
use crate::utils::get_current_date_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Search,
    Create,
    Help,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub mode: Mode,
    pub selected_index: usize,
    pub list_state: ListState,
    pub is_mobile: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: Mode::View,
            selected_index: 0,
            list_state: ListState::default(),
            is_mobile: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

/// Live search edit. `previous_query` is restored when the edit is cancelled.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub editor: Editor,
    pub previous_query: String,
}

pub struct App {
    pub config: Config,

    // Task page state
    pub tasks: TaskList,
    pub filter: TaskFilter,

    // Navigation shell
    pub router: Router,
    pub scroll: ScrollSignal,
    pub header: Header,

    // Grouped state
    pub ui: UiState,
    pub status: StatusState,
    pub search: SearchState,
    pub form: Option<TaskForm>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_tasks(config, TaskList::seeded())
    }

    pub fn with_tasks(config: Config, tasks: TaskList) -> Self {
        let scroll = ScrollSignal::new();
        let header = Header::mount(&scroll, config.scroll_threshold);
        let router = Router::new(config.start_route.clone());

        let mut app = Self {
            config,
            tasks,
            filter: TaskFilter::default(),
            router,
            scroll,
            header,
            ui: UiState::default(),
            status: StatusState::default(),
            search: SearchState::default(),
            form: None,
        };
        app.sync_list_state();
        app
    }

    /// Tasks that pass the current filters, recomputed on every call
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn remaining(&self) -> usize {
        remaining_count(&self.visible_tasks())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.ui.selected_index).copied()
    }

    pub fn is_task_page(&self) -> bool {
        self.router.path() == TASKS_PATH
    }

    /// Apply a row's request to the task list
    pub fn dispatch(&mut self, action: TaskAction) {
        match action {
            TaskAction::Toggle(id) => {
                self.tasks = self.tasks.toggle_completion(id);
                if let Some(task) = self.tasks.get(id) {
                    log::debug!("task {} completed={}", id, task.completed);
                }
            }
            TaskAction::Delete(id) => {
                if let Some(task) = self.tasks.get(id) {
                    let message = format!("Deleted \"{}\"", task.title);
                    self.set_status_message(message);
                }
                self.tasks = self.tasks.delete_task(id);
                log::debug!("task {} deleted", id);
            }
        }
        self.adjust_selected_index();
    }

    pub fn toggle_selected(&mut self) {
        let action = self.selected_task().map(|task| TaskRow::new(task).on_toggle());
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    pub fn delete_selected(&mut self) {
        let action = self.selected_task().map(|task| TaskRow::new(task).on_delete());
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    pub fn adjust_selected_index(&mut self) {
        let len = self.visible_tasks().len();
        self.ui.selected_index = if len == 0 {
            0
        } else {
            cmp::min(self.ui.selected_index, len - 1)
        };
        self.sync_list_state();
    }

    /// Sync ListState with selected_index for proper scrolling
    pub fn sync_list_state(&mut self) {
        if self.visible_tasks().is_empty() {
            self.ui.list_state.select(None);
        } else {
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.ui.selected_index > 0 {
            self.ui.selected_index -= 1;
            self.sync_list_state();
        }
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible_tasks().len();
        if self.ui.selected_index < len.saturating_sub(1) {
            self.ui.selected_index += 1;
            self.sync_list_state();
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }

    // Filters

    pub fn cycle_status_filter(&mut self) {
        self.filter.status = self.filter.status.next();
        log::debug!("status filter -> {:?}", self.filter.status);
        self.ui.selected_index = 0;
        self.adjust_selected_index();
    }

    pub fn cycle_category_filter(&mut self, forward: bool) {
        self.filter.category = if forward {
            self.filter.category.next()
        } else {
            self.filter.category.previous()
        };
        log::debug!("category filter -> {}", self.filter.category);
        self.ui.selected_index = 0;
        self.adjust_selected_index();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        log::debug!("filters cleared");
        self.adjust_selected_index();
    }

    pub fn enter_search_mode(&mut self) {
        self.search = SearchState {
            editor: Editor::from_string(self.filter.search.clone()),
            previous_query: self.filter.search.clone(),
        };
        self.ui.mode = Mode::Search;
    }

    /// Push the edited text into the live filter
    pub fn update_search(&mut self) {
        self.filter.search = self.search.editor.to_string();
        self.ui.selected_index = 0;
        self.adjust_selected_index();
    }

    /// Enter keeps the typed query
    pub fn confirm_search(&mut self) {
        log::debug!("search -> {:?}", self.filter.search);
        self.ui.mode = Mode::View;
    }

    /// Esc restores the query from before the edit
    pub fn cancel_search(&mut self) {
        self.filter.search = std::mem::take(&mut self.search.previous_query);
        self.ui.mode = Mode::View;
        self.adjust_selected_index();
    }

    // Creation dialog

    pub fn enter_create_mode(&mut self) {
        self.form = Some(TaskForm::new(&get_current_date_string()));
        self.ui.mode = Mode::Create;
    }

    pub fn exit_create_mode(&mut self) {
        self.form = None;
        self.ui.mode = Mode::View;
    }

    /// Validate the dialog; errors stay in the dialog and show in the status bar
    pub fn submit_form(&mut self) {
        let result = match self.form {
            Some(ref form) => form.submit(),
            None => return,
        };
        match result {
            Ok(outcome) => self.apply_form_outcome(outcome),
            Err(message) => self.set_status_message(message),
        }
    }

    pub fn cancel_form(&mut self) {
        if let Some(outcome) = self.form.as_ref().map(|form| form.cancel()) {
            self.apply_form_outcome(outcome);
        }
    }

    pub fn apply_form_outcome(&mut self, outcome: FormOutcome) {
        if let FormOutcome::Save(new_task) = outcome {
            let title = new_task.title.clone();
            self.tasks = self.tasks.add_task(new_task);
            log::debug!("task created: {}", title);
            self.set_status_message(format!("Created \"{}\"", title));
            self.ui.selected_index = 0;
            self.adjust_selected_index();
        }
        self.exit_create_mode();
    }

    pub fn enter_help_mode(&mut self) {
        self.ui.mode = Mode::Help;
    }

    pub fn exit_help_mode(&mut self) {
        self.ui.mode = Mode::View;
    }

    // Navigation

    /// Record the terminal width and pick the desktop or mobile header
    pub fn set_viewport_width(&mut self, width: u16) {
        self.ui.is_mobile = width < self.config.mobile_breakpoint;
    }

    pub fn toggle_mobile_menu(&mut self) {
        let path = self.router.path().to_string();
        self.header.toggle_mobile_menu(&path);
    }

    pub fn navigate_to_link(&mut self, index: usize) {
        if let Some(link) = NAV_LINKS.get(index) {
            self.header.follow(link, &mut self.router);
        }
    }

    /// Account links only exist in the desktop header
    pub fn navigate_to_auth_link(&mut self, index: usize) {
        if self.ui.is_mobile {
            return;
        }
        if let Some(link) = AUTH_LINKS.get(index) {
            self.header.follow(link, &mut self.router);
        }
    }

    pub fn navigate_home(&mut self) {
        self.header.follow_home(&mut self.router);
    }

    pub fn follow_menu_selection(&mut self) {
        self.header.follow_selected(&mut self.router);
    }

    /// Broadcast how far the page content is scrolled, in rows.
    /// Only the task page scrolls.
    pub fn sync_scroll(&mut self) {
        let offset = if self.is_task_page() {
            self.ui.list_state.offset() * ROW_HEIGHT
        } else {
            0
        };
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);
        if offset != self.scroll.offset() {
            self.scroll.emit(offset);
        }
    }
}
