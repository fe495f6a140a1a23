//! Integration tests for the tab bar control.

use std::sync::Arc;

use parking_lot::Mutex;

use horizon_tabbar::prelude::*;
use horizon_tabbar::{PressState, TabBarError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_tabbar=trace")
        .with_test_writer()
        .try_init();
}

fn items(titles: &str) -> Vec<TabBarItem> {
    titles
        .chars()
        .map(|c| TabBarItem::new(c as u64, c.to_string()))
        .collect()
}

fn titles(items: &[TabBarItem]) -> String {
    items.iter().map(|item| item.title.as_str()).collect()
}

/// Records every difference it is handed.
#[derive(Default)]
struct RecordingRenderer {
    visible: Mutex<Vec<Difference<TabBarItem>>>,
    hidden: Mutex<Vec<Difference<TabBarItem>>>,
}

impl TabBarRenderer<TabBarItem> for RecordingRenderer {
    fn apply_visible_difference(&self, difference: &Difference<TabBarItem>) {
        self.visible.lock().push(difference.clone());
    }

    fn apply_hidden_difference(&self, difference: &Difference<TabBarItem>) {
        self.hidden.lock().push(difference.clone());
    }
}

/// Records selection notifications and refuses one index on demand.
#[derive(Default)]
struct SelectionRecorder {
    selected: Mutex<Vec<(String, usize)>>,
    refuse: Mutex<Option<usize>>,
}

impl TabBarDelegate<TabBarItem> for SelectionRecorder {
    fn should_select_item(&self, _item: &TabBarItem, index: usize) -> bool {
        *self.refuse.lock() != Some(index)
    }

    fn did_select_item(&self, item: &TabBarItem, index: usize) {
        self.selected.lock().push((item.title.clone(), index));
    }
}

#[derive(Default)]
struct PressRecorder {
    events: Mutex<Vec<PressEvent>>,
}

impl LongPressHandler for PressRecorder {
    fn long_press_began(&self, event: &PressEvent) {
        self.events.lock().push(*event);
    }

    fn long_press_changed(&self, event: &PressEvent) {
        self.events.lock().push(*event);
    }

    fn long_press_ended(&self, event: &PressEvent) {
        self.events.lock().push(*event);
    }
}

#[test]
fn test_move_and_hidden_insert() {
    init_tracing();
    let renderer = Arc::new(RecordingRenderer::default());
    let tab_bar = TabBar::new().with_renderer(renderer.clone());

    tab_bar.update_items(items("ABCDEF")).unwrap();
    assert_eq!(titles(&tab_bar.visible_items()), "ABCDE");
    assert_eq!(titles(&tab_bar.hidden_items()), "F");

    renderer.visible.lock().clear();
    renderer.hidden.lock().clear();

    tab_bar.update_items(items("ACBDEFG")).unwrap();
    assert_eq!(titles(&tab_bar.visible_items()), "ACBDE");
    assert_eq!(titles(&tab_bar.hidden_items()), "FG");

    let visible = renderer.visible.lock();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].moves().count(), 1);
    assert_eq!(visible[0].len(), 1);
    let mut replayed = items("ABCDE");
    visible[0].apply_to(&mut replayed);
    assert_eq!(titles(&replayed), "ACBDE");

    let hidden = renderer.hidden.lock();
    assert_eq!(hidden.len(), 1);
    let inserts: Vec<(usize, String)> = hidden[0]
        .insertions()
        .map(|(index, item)| (index, item.title.clone()))
        .collect();
    assert_eq!(inserts, vec![(1, "G".to_string())]);
    assert_eq!(hidden[0].len(), 1);
}

#[test]
fn test_selected_item_removed_resets_to_first() {
    let tab_bar = TabBar::new();
    let delegate = Arc::new(SelectionRecorder::default());
    tab_bar.set_delegate(&delegate);

    tab_bar.update_items(items("ABCDE")).unwrap();
    tab_bar.request_select(2).unwrap();
    assert_eq!(tab_bar.selected_item().unwrap().title, "C");
    delegate.selected.lock().clear();

    tab_bar.update_items(items("ABDE")).unwrap();
    assert_eq!(tab_bar.current_selection(), Some(0));
    assert_eq!(*delegate.selected.lock(), vec![("A".to_string(), 0)]);
}

#[test]
fn test_veto_rejects_selection() {
    let tab_bar = TabBar::new();
    let delegate = Arc::new(SelectionRecorder::default());
    tab_bar.set_delegate(&delegate);
    tab_bar.update_items(items("ABCDE")).unwrap();
    tab_bar.request_select(1).unwrap();
    delegate.selected.lock().clear();

    let signalled = Arc::new(Mutex::new(0usize));
    let signalled_clone = signalled.clone();
    tab_bar.tab_selected.connect(move |_| {
        *signalled_clone.lock() += 1;
    });

    *delegate.refuse.lock() = Some(3);
    assert_eq!(tab_bar.request_select(3).unwrap(), SelectOutcome::Rejected);
    assert_eq!(tab_bar.current_selection(), Some(1));
    assert!(delegate.selected.lock().is_empty());
    assert_eq!(*signalled.lock(), 0);
}

#[test]
fn test_selection_follows_moved_item_silently() {
    let tab_bar = TabBar::new();
    let delegate = Arc::new(SelectionRecorder::default());
    tab_bar.set_delegate(&delegate);
    tab_bar.update_items(items("ABCDE")).unwrap();
    tab_bar.request_select(2).unwrap();
    delegate.selected.lock().clear();

    tab_bar.update_items(items("CABDE")).unwrap();
    assert_eq!(tab_bar.current_selection(), Some(0));
    assert_eq!(tab_bar.selected_item().unwrap().title, "C");
    assert!(delegate.selected.lock().is_empty());
}

#[test]
fn test_selected_item_pushed_to_overflow_resets() {
    let tab_bar = TabBar::new().with_max_visible_tabs(3);
    tab_bar.update_items(items("ABC")).unwrap();
    tab_bar.request_select(2).unwrap();

    // C drops into the hidden list.
    tab_bar.update_items(items("XABC")).unwrap();
    assert_eq!(titles(&tab_bar.hidden_items()), "C");
    assert_eq!(tab_bar.current_selection(), Some(0));
    assert_eq!(tab_bar.selected_item().unwrap().title, "X");
}

#[test]
fn test_selection_out_of_range() {
    let tab_bar = TabBar::new();
    tab_bar.update_items(items("AB")).unwrap();
    let err = tab_bar.request_select(2).unwrap_err();
    assert_eq!(err, TabBarError::SelectionOutOfRange { index: 2, visible: 2 });
    assert_eq!(tab_bar.current_selection(), Some(0));
}

#[test]
fn test_emptying_clears_selection() {
    let tab_bar = TabBar::new();
    tab_bar.update_items(items("AB")).unwrap();
    tab_bar.update_items(Vec::new()).unwrap();
    assert_eq!(tab_bar.current_selection(), None);
    assert!(!tab_bar.is_visible());
}

#[test]
fn test_disabled_tab_cannot_be_selected() {
    let tab_bar = TabBar::new();
    let mut list = items("AB");
    list[1] = list[1].clone().with_enabled(false);
    tab_bar.update_items(list).unwrap();

    assert_eq!(tab_bar.request_select(1).unwrap(), SelectOutcome::Rejected);
    assert_eq!(tab_bar.current_selection(), Some(0));
}

#[test]
fn test_press_lifecycle_reaches_handler() {
    let tab_bar = TabBar::new();
    let handler = Arc::new(PressRecorder::default());
    tab_bar.set_long_press_handler(&handler);
    tab_bar.update_items(items("ABC")).unwrap();

    assert!(tab_bar.press_change(Point::ZERO).is_none());
    tab_bar.press_begin(1, Point::new(3.0, 4.0)).unwrap();
    assert!(tab_bar.press_begin(2, Point::ZERO).is_none());
    tab_bar.press_change(Point::new(5.0, 4.0)).unwrap();
    tab_bar.press_end(Point::new(6.0, 4.0)).unwrap();
    assert!(tab_bar.press_end(Point::ZERO).is_none());

    let events = handler.events.lock();
    let phases: Vec<PressPhase> = events.iter().map(|event| event.phase).collect();
    assert_eq!(phases, vec![PressPhase::Began, PressPhase::Changed, PressPhase::Ended]);
    assert!(events.iter().all(|event| event.slot == 1));
    assert_eq!(events[2].location, Point::new(6.0, 4.0));
    assert_eq!(tab_bar.press_state(), PressState::Idle);
    assert_eq!(tab_bar.current_selection(), Some(1));
}

#[test]
fn test_press_capabilities_are_captured_once() {
    struct EndOnly {
        ended: Mutex<usize>,
        others: Mutex<usize>,
    }

    impl LongPressHandler for EndOnly {
        fn long_press_began(&self, _event: &PressEvent) {
            *self.others.lock() += 1;
        }
        fn long_press_ended(&self, _event: &PressEvent) {
            *self.ended.lock() += 1;
        }
        fn capabilities(&self) -> LongPressCapabilities {
            LongPressCapabilities {
                began: false,
                changed: false,
                ended: true,
            }
        }
    }

    let tab_bar = TabBar::new();
    let handler = Arc::new(EndOnly {
        ended: Mutex::new(0),
        others: Mutex::new(0),
    });
    tab_bar.set_long_press_handler(&handler);
    tab_bar.update_items(items("AB")).unwrap();

    tab_bar.press_begin(0, Point::ZERO).unwrap();
    tab_bar.press_cancel().unwrap();

    assert_eq!(*handler.ended.lock(), 1);
    assert_eq!(*handler.others.lock(), 0);
}

#[test]
fn test_press_begin_on_hidden_slot_is_ignored() {
    let tab_bar = TabBar::new().with_max_visible_tabs(2);
    tab_bar.update_items(items("ABCD")).unwrap();
    assert!(tab_bar.press_begin(2, Point::ZERO).is_none());
    assert!(!tab_bar.is_pressing());
}

#[test]
fn test_press_observers_see_repaired_selection() {
    init_tracing();
    let tab_bar = Arc::new(TabBar::new());
    tab_bar.update_items(items("ABCDE")).unwrap();
    tab_bar.request_select(4).unwrap();
    tab_bar.press_begin(4, Point::ZERO).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let weak = Arc::downgrade(&tab_bar);
    let seen_clone = seen.clone();
    tab_bar.long_press.connect(move |event: &PressEvent| {
        if let Some(tab_bar) = weak.upgrade()
            && event.cancelled
        {
            seen_clone
                .lock()
                .push((tab_bar.current_selection(), tab_bar.visible_count()));
        }
    });

    // E goes away while pressed; the slot must not see its stale index.
    tab_bar.update_items(items("ABCD")).unwrap();
    assert_eq!(*seen.lock(), vec![(Some(0), 4)]);
    assert_eq!(tab_bar.current_selection(), Some(0));
}

#[test]
fn test_selection_from_press_observer_survives_update() {
    let tab_bar = Arc::new(TabBar::new());
    let delegate = Arc::new(SelectionRecorder::default());
    tab_bar.set_delegate(&delegate);
    tab_bar.update_items(items("ABCDE")).unwrap();
    tab_bar.request_select(4).unwrap();
    tab_bar.press_begin(4, Point::ZERO).unwrap();
    delegate.selected.lock().clear();

    let result = Arc::new(Mutex::new(None));
    let weak = Arc::downgrade(&tab_bar);
    let result_clone = result.clone();
    tab_bar.long_press.connect(move |event: &PressEvent| {
        if let Some(tab_bar) = weak.upgrade()
            && event.cancelled
        {
            *result_clone.lock() = Some(tab_bar.request_select(event.slot));
        }
    });

    // E moves to the front, so slot 4 now holds D and the press is cancelled.
    tab_bar.update_items(items("EABCD")).unwrap();
    assert_eq!(*result.lock(), Some(Ok(SelectOutcome::Selected(4))));
    assert_eq!(tab_bar.current_selection(), Some(4));
    assert_eq!(tab_bar.selected_item().unwrap().title, "D");
    assert_eq!(*delegate.selected.lock(), vec![("D".to_string(), 4)]);
}

#[test]
fn test_nested_capacity_change_is_rejected() {
    struct Resizer {
        tab_bar: Mutex<std::sync::Weak<TabBar<TabBarItem>>>,
        result: Mutex<Option<Result<(), TabBarError>>>,
    }

    impl TabBarDelegate<TabBarItem> for Resizer {
        fn did_select_item(&self, _item: &TabBarItem, _index: usize) {
            let tab_bar = self.tab_bar.lock().upgrade();
            if let Some(tab_bar) = tab_bar {
                *self.result.lock() = Some(tab_bar.set_max_visible_tabs(1));
            }
        }
    }

    let tab_bar = Arc::new(TabBar::new());
    let delegate = Arc::new(Resizer {
        tab_bar: Mutex::new(Arc::downgrade(&tab_bar)),
        result: Mutex::new(None),
    });
    tab_bar.set_delegate(&delegate);

    tab_bar.update_items(items("ABC")).unwrap();
    assert_eq!(*delegate.result.lock(), Some(Err(TabBarError::ReentrantUpdate)));
    assert_eq!(tab_bar.max_visible_tabs(), 5);
}

#[test]
fn test_vertical_config() {
    let config = TabBarConfig::default()
        .with_orientation(LayoutOrientation::Vertical)
        .with_max_visible_tabs(0);
    let tab_bar = TabBar::with_config(config);
    tab_bar.update_items(items("ABCDEFGH")).unwrap();

    assert!(tab_bar.is_vertical());
    assert_eq!(tab_bar.visible_count(), 8);
    assert!(tab_bar.hidden_items().is_empty());
}
