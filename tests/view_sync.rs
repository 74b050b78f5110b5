use std::cell::RefCell;
use std::rc::Rc;

use skinbridge::view::{
    CONTENT_ID, ELAPSED_TIME_ID, LIST_COUNT_ID, PAUSED_CLASS, PLAYING_CLASS, SEEKABLE_CLASS,
    SUBLIST_COUNT_ID, TIMELINE_ID, TITLE_ID,
};
use skinbridge::{BridgeConfig, DocumentBinding, MediaTime, Node, PageDocument, StyledView};

/// A page handle the test keeps shared access to, so the DOM can be
/// inspected after it has been handed to the view (and after the view has
/// dropped it again on navigation).
#[derive(Clone)]
struct SharedPage {
    page: Rc<RefCell<PageDocument>>,
    writes: Rc<RefCell<Vec<String>>>,
}

impl SharedPage {
    fn new(root: Node) -> Self {
        Self {
            page: Rc::new(RefCell::new(PageDocument::new(root))),
            writes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.page
            .borrow()
            .element(id)
            .map(|n| n.has_class(class))
            .unwrap_or(false)
    }

    fn text(&self, id: &str) -> String {
        self.page
            .borrow()
            .element(id)
            .map(|n| n.text_content())
            .unwrap_or_default()
    }

    fn attr(&self, id: &str, name: &str) -> Option<String> {
        self.page
            .borrow()
            .element(id)
            .and_then(|n| n.attribute(name).map(str::to_string))
    }

    fn writes_matching(&self, needle: &str) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|w| w.contains(needle))
            .count()
    }
}

impl DocumentBinding for SharedPage {
    fn has_element(&self, id: &str) -> bool {
        self.page.borrow().has_element(id)
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.writes.borrow_mut().push(format!("add_class {id} {class}"));
        self.page.borrow_mut().add_class(id, class)
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.writes
            .borrow_mut()
            .push(format!("remove_class {id} {class}"));
        self.page.borrow_mut().remove_class(id, class)
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.writes
            .borrow_mut()
            .push(format!("set_text {id} {text}"));
        self.page.borrow_mut().set_text(id, text)
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> bool {
        self.writes
            .borrow_mut()
            .push(format!("set_attribute {id} {name} {value}"));
        self.page.borrow_mut().set_attribute(id, name, value)
    }
}

fn skin_page() -> SharedPage {
    SharedPage::new(
        Node::element("body").with_child(
            Node::element("div")
                .with_id(CONTENT_ID)
                .with_child(Node::element("span").with_id(ELAPSED_TIME_ID))
                .with_child(
                    Node::element("input")
                        .with_id(TIMELINE_ID)
                        .with_attribute("max", "1"),
                )
                .with_child(Node::element("div").with_id(TITLE_ID))
                .with_child(Node::element("span").with_id(LIST_COUNT_ID))
                .with_child(Node::element("span").with_id(SUBLIST_COUNT_ID)),
        ),
    )
}

fn new_view() -> StyledView<SharedPage> {
    StyledView::new(BridgeConfig::default())
}

#[test]
fn initial_load_flushes_the_deferred_snapshot_once() {
    let mut view = new_view();
    view.setup();
    view.set_viewed_position(0.25);

    let page = skin_page();
    assert!(!view.is_frame_loaded());
    assert_eq!(page.attr(TIMELINE_ID, "value"), None);

    view.on_frame_load_finished(page.clone());

    assert!(view.is_frame_loaded());
    assert!(view.has_loaded_a_first_frame());
    assert_eq!(page.attr(TIMELINE_ID, "value").as_deref(), Some("0.25"));
    assert_eq!(page.writes_matching("set_attribute timeline value"), 1);
}

#[test]
fn deferred_setters_apply_last_write_per_field() {
    let mut view = new_view();
    view.setup();
    view.set_viewed_position(0.1);
    view.set_viewed_position(0.75);
    view.set_window_title("First");
    view.set_window_title("Second");
    view.set_viewed_playing(true);
    view.set_seekable(true);
    view.set_current_time(MediaTime::from_secs(83.0));
    view.set_list_count(12);
    view.set_sublist_count(3);

    let page = skin_page();
    view.on_frame_load_finished(page.clone());

    assert_eq!(view.snapshot().position, 0.75);
    assert_eq!(view.snapshot().title, "Second");
    assert_eq!(page.attr(TIMELINE_ID, "value").as_deref(), Some("0.75"));
    assert_eq!(page.text(TITLE_ID), "Second");
    assert_eq!(page.text(ELAPSED_TIME_ID), "1:23");
    assert_eq!(page.text(LIST_COUNT_ID), "12");
    assert_eq!(page.text(SUBLIST_COUNT_ID), "3");
    assert!(page.has_class(CONTENT_ID, PLAYING_CLASS));
    assert!(!page.has_class(CONTENT_ID, PAUSED_CLASS));
    assert!(page.has_class(CONTENT_ID, SEEKABLE_CLASS));
}

#[test]
fn live_updates_hit_the_dom_immediately() {
    let mut view = new_view();
    view.setup();
    let page = skin_page();
    view.on_frame_load_finished(page.clone());
    assert!(page.has_class(CONTENT_ID, PAUSED_CLASS));

    view.set_viewed_playing(true);
    assert!(page.has_class(CONTENT_ID, PLAYING_CLASS));
    assert!(!page.has_class(CONTENT_ID, PAUSED_CLASS));
    assert_eq!(view.snapshot().playing, true);

    view.set_current_time(MediaTime::from_secs(61.0));
    assert_eq!(page.text(ELAPSED_TIME_ID), "1:01");

    view.set_viewed_position(0.5);
    assert_eq!(page.attr(TIMELINE_ID, "value").as_deref(), Some("0.5"));

    view.set_viewed_playing(false);
    assert!(page.has_class(CONTENT_ID, PAUSED_CLASS));
    assert!(!page.has_class(CONTENT_ID, PLAYING_CLASS));
}

#[test]
fn setup_is_idempotent() {
    let mut view = new_view();
    view.setup();
    view.set_viewed_position(0.3);
    view.setup();

    assert_eq!(view.snapshot().position, 0.3);
    assert!(!view.is_frame_loaded());

    let mut twice = new_view();
    twice.setup();
    twice.setup();
    assert_eq!(twice.snapshot(), new_view().snapshot());
}

#[test]
fn stale_writes_never_touch_the_dropped_page() {
    let mut view = new_view();
    view.setup();
    let old_page = skin_page();
    view.on_frame_load_finished(old_page.clone());
    view.set_viewed_position(0.2);

    view.begin_navigation();
    assert!(!view.is_frame_loaded());

    view.set_viewed_position(0.9);
    view.set_window_title("After");

    // the stale page keeps its last synced state
    assert_eq!(old_page.attr(TIMELINE_ID, "value").as_deref(), Some("0.2"));
    assert_eq!(old_page.text(TITLE_ID), "");
    // the snapshot tracked the writes anyway
    assert_eq!(view.snapshot().position, 0.9);
    assert_eq!(view.snapshot().title, "After");

    // the next load resyncs the fresh page in one flush
    let new_page = skin_page();
    view.on_frame_load_finished(new_page.clone());
    assert_eq!(new_page.attr(TIMELINE_ID, "value").as_deref(), Some("0.9"));
    assert_eq!(new_page.text(TITLE_ID), "After");
    assert!(view.has_loaded_a_first_frame());
}

#[test]
fn duplicate_load_events_for_a_live_page_are_ignored() {
    let mut view = new_view();
    view.setup();
    let page = skin_page();
    view.on_frame_load_finished(page.clone());
    view.set_viewed_position(0.4);

    let other = skin_page();
    view.on_frame_load_finished(other.clone());

    // the live page was not resynced from scratch, the stray one untouched
    assert_eq!(page.writes_matching("set_attribute timeline value"), 2);
    assert_eq!(other.writes_matching("set_attribute"), 0);
}

#[test]
fn missing_required_element_reports_without_crashing() {
    let mut view = new_view();
    view.setup();
    view.on_frame_load_finished(skin_page());

    assert!(!view.element_for_id("nonexistent", true));
    assert!(!view.element_for_id("nonexistent", true));
    assert!(view.element_for_id(CONTENT_ID, true));

    // the view stays fully usable afterwards
    view.set_viewed_playing(true);
    assert_eq!(view.snapshot().playing, true);
}

#[test]
fn skins_without_optional_elements_degrade_to_skipped_writes() {
    let bare = SharedPage::new(
        Node::element("body").with_child(Node::element("div").with_id(CONTENT_ID)),
    );
    let mut view = new_view();
    view.setup();
    view.on_frame_load_finished(bare.clone());

    view.set_current_time(MediaTime::from_secs(10.0));
    view.set_viewed_position(0.5);
    view.set_window_title("Quiet");
    view.set_viewed_playing(true);

    assert!(bare.has_class(CONTENT_ID, PLAYING_CLASS));
    assert_eq!(view.snapshot().title, "Quiet");
}

#[test]
fn content_root_is_the_only_structural_requirement() {
    let headless = SharedPage::new(Node::element("body"));
    let mut view = new_view();
    view.setup();
    view.on_frame_load_finished(headless);

    // nothing to write to, nothing crashes
    view.set_viewed_playing(true);
    view.add_class_to_content("has-video");
    view.remove_class_from_content("has-video");
    assert_eq!(view.snapshot().playing, true);
}

#[test]
fn page_path_joins_root_and_identifier() {
    let mut config = BridgeConfig::default();
    config.skin_root = "styles/base".into();
    config.page_identifier = "window.html".into();
    let view: StyledView<SharedPage> = StyledView::new(config);

    assert_eq!(view.page_name(), "window.html");
    assert_eq!(
        view.page_path(),
        std::path::Path::new("styles/base").join("window.html")
    );
}
