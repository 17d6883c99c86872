use taskai::filter::remaining_count;
use taskai::nav::{Header, NAV_LINKS, Router, ScrollSignal, is_active};
use taskai::{NewTask, Priority, StatusFilter, TaskFilter, TaskList};

#[test]
fn incomplete_filter_counts_every_open_task() {
    let tasks = TaskList::seeded();
    let filter = TaskFilter {
        status: StatusFilter::Incomplete,
        ..TaskFilter::default()
    };
    let visible = filter.apply(&tasks);
    let ids: Vec<i64> = visible.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3, 4, 6, 7]);
    assert_eq!(remaining_count(&visible), visible.len());
}

#[test]
fn add_then_toggle_then_delete() {
    let seed = TaskList::seeded();
    let added = seed.add_task(NewTask::new("Call mom", Priority::Low, "2025-03-18", "Family"));
    assert_eq!(added.as_slice()[0].id, 8);
    assert_eq!(seed.len(), 7);

    let toggled = added.toggle_completion(8);
    assert!(toggled.get(8).is_some_and(|t| t.completed));
    assert!(added.get(8).is_some_and(|t| !t.completed));

    let removed = toggled.delete_task(8);
    assert_eq!(removed, seed);
}

#[test]
fn search_matches_description_case_insensitively() {
    let tasks = TaskList::seeded();
    let filter = TaskFilter {
        search: "MILK".to_string(),
        ..TaskFilter::default()
    };
    let ids: Vec<i64> = filter.apply(&tasks).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![6]);
}

#[test]
fn header_lifecycle() {
    let signal = ScrollSignal::new();
    let mut router = Router::new("/tasks");
    {
        let mut header = Header::mount(&signal, 10);
        assert_eq!(signal.listener_count(), 1);
        assert!(!header.is_opaque());

        signal.emit(11);
        assert!(header.is_opaque());
        signal.emit(10);
        assert!(!header.is_opaque());

        header.toggle_mobile_menu(router.path());
        assert!(header.is_opaque());
        header.follow(&NAV_LINKS[3], &mut router);
        assert!(!header.is_mobile_menu_open());
        assert_eq!(router.path(), "/chat");
        assert!(is_active(&NAV_LINKS[3], router.path()));
        assert!(!is_active(&NAV_LINKS[2], router.path()));
    }
    assert_eq!(signal.listener_count(), 0);
}
