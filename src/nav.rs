//! Navigation shell: the header bar, its link list and the scroll signal it watches.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Scroll offset (in rows) past which the header turns opaque
pub const DEFAULT_SCROLL_THRESHOLD: u16 = 10;

pub const HOME_PATH: &str = "/";
pub const TASKS_PATH: &str = "/tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { label: "Dashboard", path: "/dashboard", icon: "▦" },
    NavLink { label: "Calendar", path: "/calendar", icon: "▤" },
    NavLink { label: "Tasks", path: TASKS_PATH, icon: "☑" },
    NavLink { label: "Chat", path: "/chat", icon: "✉" },
    NavLink { label: "Login / Signup", path: "/Login", icon: "⚿" },
];

/// Account links shown at the right edge of the desktop header only
pub const AUTH_LINKS: &[NavLink] = &[
    NavLink { label: "Log In", path: "/login", icon: "" },
    NavLink { label: "Sign Up", path: "/signup", icon: "" },
];

/// Exact path equality; `/tasks/` or `/Tasks` do not activate `/tasks`
pub fn is_active(link: &NavLink, current_path: &str) -> bool {
    link.path == current_path
}

/// Current route. The header reads it and asks it to change, nothing else does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    path: String,
}

impl Router {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn navigate(&mut self, path: &str) {
        if self.path != path {
            log::debug!("navigate {} -> {}", self.path, path);
            self.path = path.to_string();
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

type Listener = Box<dyn FnMut(u16)>;

#[derive(Default)]
struct SignalInner {
    next_id: u64,
    offset: u16,
    listeners: Vec<(u64, Listener)>,
}

/// Broadcasts the content scroll offset to whoever subscribed.
#[derive(Clone, Default)]
pub struct ScrollSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it stays registered until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> ScrollSubscription
    where
        F: FnMut(u16) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Box::new(listener)));
        ScrollSubscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    pub fn emit(&self, offset: u16) {
        let mut inner = self.inner.borrow_mut();
        inner.offset = offset;
        for (_, listener) in inner.listeners.iter_mut() {
            listener(offset);
        }
    }

    pub fn offset(&self) -> u16 {
        self.inner.borrow().offset
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Removes its listener from the signal when dropped.
pub struct ScrollSubscription {
    id: u64,
    signal: Weak<RefCell<SignalInner>>,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Mounted header. Holds the scroll subscription for as long as it lives.
pub struct Header {
    scrolled: Rc<Cell<bool>>,
    mobile_menu_open: bool,
    menu_selection: usize,
    _scroll: ScrollSubscription,
}

impl Header {
    pub fn mount(signal: &ScrollSignal, threshold: u16) -> Self {
        let scrolled = Rc::new(Cell::new(signal.offset() > threshold));
        let flag = Rc::clone(&scrolled);
        let subscription = signal.subscribe(move |offset| flag.set(offset > threshold));
        Self {
            scrolled,
            mobile_menu_open: false,
            menu_selection: 0,
            _scroll: subscription,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    /// Opaque background whenever the page is scrolled or the menu is showing
    pub fn is_opaque(&self) -> bool {
        self.is_scrolled() || self.mobile_menu_open
    }

    /// Open or close the mobile menu. Opening highlights the entry for the current route.
    pub fn toggle_mobile_menu(&mut self, current_path: &str) {
        self.mobile_menu_open = !self.mobile_menu_open;
        if self.mobile_menu_open {
            self.menu_selection = NAV_LINKS
                .iter()
                .position(|link| is_active(link, current_path))
                .unwrap_or(0);
        }
    }

    pub fn menu_selection(&self) -> usize {
        self.menu_selection
    }

    pub fn move_menu_selection(&mut self, forward: bool) {
        let len = NAV_LINKS.len();
        self.menu_selection = if forward {
            (self.menu_selection + 1) % len
        } else {
            (self.menu_selection + len - 1) % len
        };
    }

    /// Follow `link`, closing the mobile menu if it was open
    pub fn follow(&mut self, link: &NavLink, router: &mut Router) {
        if self.mobile_menu_open {
            self.mobile_menu_open = false;
        }
        router.navigate(link.path);
    }

    /// Follow the entry highlighted in the mobile menu
    pub fn follow_selected(&mut self, router: &mut Router) {
        if let Some(link) = NAV_LINKS.get(self.menu_selection) {
            self.follow(link, router);
        }
    }

    pub fn follow_home(&mut self, router: &mut Router) {
        self.mobile_menu_open = false;
        router.navigate(HOME_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(path: &str) -> &'static NavLink {
        NAV_LINKS.iter().find(|l| l.path == path).unwrap()
    }

    #[test]
    fn active_link_requires_exact_path() {
        let tasks = link("/tasks");
        assert!(is_active(tasks, "/tasks"));
        assert!(!is_active(tasks, "/tasks/1"));
        assert!(!is_active(tasks, "/Tasks"));
        assert!(!is_active(link("/Login"), "/login"));
        assert!(is_active(&AUTH_LINKS[0], "/login"));
    }

    #[test]
    fn auth_links_route_through_follow() {
        let signal = ScrollSignal::new();
        let mut header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        let mut router = Router::new("/tasks");
        header.follow(&AUTH_LINKS[1], &mut router);
        assert_eq!(router.path(), "/signup");
        assert!(NAV_LINKS.iter().all(|l| !is_active(l, router.path())));
    }

    #[test]
    fn link_order_is_fixed() {
        let labels: Vec<&str> = NAV_LINKS.iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["Dashboard", "Calendar", "Tasks", "Chat", "Login / Signup"]);
    }

    #[test]
    fn header_turns_opaque_past_threshold() {
        let signal = ScrollSignal::new();
        let header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        assert!(!header.is_opaque());
        signal.emit(10);
        assert!(!header.is_scrolled());
        signal.emit(11);
        assert!(header.is_scrolled());
        assert!(header.is_opaque());
        signal.emit(0);
        assert!(!header.is_opaque());
    }

    #[test]
    fn open_menu_makes_header_opaque() {
        let signal = ScrollSignal::new();
        let mut header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        header.toggle_mobile_menu("/tasks");
        assert!(!header.is_scrolled());
        assert!(header.is_opaque());
        header.toggle_mobile_menu("/tasks");
        assert!(!header.is_opaque());
    }

    #[test]
    fn following_link_closes_menu() {
        let signal = ScrollSignal::new();
        let mut header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        let mut router = Router::new("/tasks");
        header.toggle_mobile_menu(router.path());
        assert_eq!(header.menu_selection(), 2);
        header.move_menu_selection(true);
        header.follow_selected(&mut router);
        assert_eq!(router.path(), "/chat");
        assert!(!header.is_mobile_menu_open());
    }

    #[test]
    fn following_link_with_menu_closed_keeps_it_closed() {
        let signal = ScrollSignal::new();
        let mut header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        let mut router = Router::default();
        header.follow(link("/calendar"), &mut router);
        assert_eq!(router.path(), "/calendar");
        assert!(!header.is_mobile_menu_open());
    }

    #[test]
    fn menu_selection_wraps() {
        let signal = ScrollSignal::new();
        let mut header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        header.toggle_mobile_menu("/nowhere");
        assert_eq!(header.menu_selection(), 0);
        header.move_menu_selection(false);
        assert_eq!(header.menu_selection(), NAV_LINKS.len() - 1);
    }

    #[test]
    fn subscription_lives_exactly_as_long_as_header() {
        let signal = ScrollSignal::new();
        assert_eq!(signal.listener_count(), 0);
        let header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        assert_eq!(signal.listener_count(), 1);
        drop(header);
        assert_eq!(signal.listener_count(), 0);
        signal.emit(50);
    }

    #[test]
    fn remount_does_not_leak_listeners() {
        let signal = ScrollSignal::new();
        for _ in 0..3 {
            let _header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
            assert_eq!(signal.listener_count(), 1);
        }
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn mount_reads_current_offset() {
        let signal = ScrollSignal::new();
        signal.emit(30);
        let header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        assert!(header.is_scrolled());
    }

    #[test]
    fn subscription_outliving_signal_is_harmless() {
        let signal = ScrollSignal::new();
        let header = Header::mount(&signal, DEFAULT_SCROLL_THRESHOLD);
        drop(signal);
        drop(header);
    }
}
