// End-to-end scenarios driven through the public event router

use contents_delegate::client::{Client, DisplayHandler, LoadHandler};
use contents_delegate::contents::{NavigationState, WebContents};
use contents_delegate::event::{NavigationHandle, PageTransition, NET_OK};
use contents_delegate::{
    Browser, BrowserInfo, ContentsDelegate, ContentsObserver, EngineEvent, Frame, FrameHost,
    GlobalFrameId, StateChangeMask,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use url::Url;

// ── Test doubles ──────────────────────────────────────────────────────────────

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct Contents {
    navigation: Cell<NavigationState>,
}

impl WebContents for Contents {
    fn navigation_state(&self) -> NavigationState {
        self.navigation.get()
    }
}

struct Observer {
    name: &'static str,
    log: Log,
    delegate: Weak<ContentsDelegate>,
    this: RefCell<Weak<Observer>>,
    leave_on_change: bool,
}

impl Observer {
    fn register(
        name: &'static str,
        log: &Log,
        delegate: &Rc<ContentsDelegate>,
        leave_on_change: bool,
    ) -> Rc<Self> {
        let observer = Rc::new(Self {
            name,
            log: Rc::clone(log),
            delegate: Rc::downgrade(delegate),
            this: RefCell::new(Weak::new()),
            leave_on_change,
        });
        *observer.this.borrow_mut() = Rc::downgrade(&observer);
        delegate.add_observer(Rc::clone(&observer) as Rc<dyn ContentsObserver>);
        observer
    }
}

impl ContentsObserver for Observer {
    fn on_state_changed(&self, changed: StateChangeMask) {
        self.log
            .borrow_mut()
            .push(format!("{} changed {}", self.name, changed.bits()));

        if self.leave_on_change {
            let this = self.this.borrow().upgrade();
            if let (Some(delegate), Some(this)) = (self.delegate.upgrade(), this) {
                delegate.remove_observer(&(this as Rc<dyn ContentsObserver>));
            }
        }
    }

    fn on_web_contents_destroyed(&self) {
        self.log.borrow_mut().push(format!("{} destroyed", self.name));
    }
}

struct Handlers {
    log: Log,
}

impl DisplayHandler for Handlers {
    fn on_fullscreen_mode_change(&self, _browser: &Browser, fullscreen: bool) {
        self.log.borrow_mut().push(format!("client fullscreen {}", fullscreen));
    }

    fn on_address_change(&self, _browser: &Browser, _frame: &Frame, url: &Url) {
        self.log.borrow_mut().push(format!("client address {}", url));
    }
}

impl LoadHandler for Handlers {
    fn on_load_start(&self, _browser: &Browser, frame: &Frame, _transition: PageTransition) {
        self.log.borrow_mut().push(format!("client load_start {}", frame.id()));
    }

    fn on_load_end(&self, _browser: &Browser, frame: &Frame, http_status: i32) {
        self.log
            .borrow_mut()
            .push(format!("client load_end {} {}", frame.id(), http_status));
    }
}

struct TestClient {
    handlers: Rc<Handlers>,
}

impl Client for TestClient {
    fn display_handler(&self) -> Option<Rc<dyn DisplayHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn DisplayHandler>)
    }

    fn load_handler(&self) -> Option<Rc<dyn LoadHandler>> {
        Some(Rc::clone(&self.handlers) as Rc<dyn LoadHandler>)
    }
}

struct Harness {
    log: Log,
    contents: Rc<Contents>,
    delegate: Rc<ContentsDelegate>,
}

fn harness() -> Harness {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let info = BrowserInfo::new(2);
    let client: Rc<dyn Client> = Rc::new(TestClient {
        handlers: Rc::new(Handlers { log: Rc::clone(&log) }),
    });
    info.set_browser(Some(Rc::new(Browser::new(2, Some(client)))));

    let delegate = Rc::new(ContentsDelegate::new(info));
    let contents = Rc::new(Contents::default());
    delegate.observe_web_contents(Some(Rc::clone(&contents) as Rc<dyn WebContents>));

    for frame in [
        FrameHost::main(GlobalFrameId::new(2, 1)),
        FrameHost::child(GlobalFrameId::new(2, 5), GlobalFrameId::new(2, 1)),
    ] {
        delegate.dispatch(&EngineEvent::FrameCreated { frame });
    }

    Harness {
        log,
        contents,
        delegate,
    }
}

impl Harness {
    fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

fn commit(frame: GlobalFrameId, url: &str) -> EngineEvent {
    EngineEvent::NavigationFinished(NavigationHandle {
        frame,
        is_main_frame: frame.frame_routing_id == 1,
        url: Some(Url::parse(url).unwrap()),
        has_committed: true,
        net_error: NET_OK,
        http_status: 200,
        transition: PageTransition::Link,
    })
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn navigation_then_document_then_fullscreen_twice() {
    let h = harness();
    Observer::register("a", &h.log, &h.delegate, false);

    h.contents.navigation.set(NavigationState {
        is_loading: false,
        can_go_back: true,
        can_go_forward: false,
    });
    h.delegate.dispatch(&commit(GlobalFrameId::new(2, 1), "https://example.org/"));
    assert_eq!(
        h.drain(),
        vec![
            "a changed 1",
            "client load_start 2:1",
            "client address https://example.org/",
        ]
    );

    h.delegate.dispatch(&EngineEvent::DocumentAvailable);
    assert_eq!(h.drain(), vec!["a changed 2"]);

    h.delegate.dispatch(&EngineEvent::EnterFullscreen { requesting_frame: None });
    assert_eq!(h.drain(), vec!["a changed 4", "client fullscreen true"]);

    h.delegate.dispatch(&EngineEvent::EnterFullscreen { requesting_frame: None });
    assert_eq!(h.drain(), vec!["client fullscreen true"]);
}

#[test]
fn deleting_the_focused_frame_reverts_to_main() {
    let h = harness();
    Observer::register("a", &h.log, &h.delegate, false);
    let child = GlobalFrameId::new(2, 5);

    h.delegate.dispatch(&EngineEvent::FrameFocused { frame: child });
    assert_eq!(h.delegate.focused_frame().unwrap().id(), child);
    h.drain();

    h.delegate.dispatch(&EngineEvent::FrameDeleted { frame: child });
    assert_eq!(h.drain(), vec!["a changed 8"]);
    assert!(h.delegate.focused_frame().is_none());
}

#[test]
fn observer_leaving_mid_fan_out_does_not_disturb_others() {
    let h = harness();
    Observer::register("a", &h.log, &h.delegate, true);
    Observer::register("b", &h.log, &h.delegate, false);
    Observer::register("c", &h.log, &h.delegate, true);

    h.delegate.dispatch(&EngineEvent::DocumentAvailable);
    assert_eq!(h.drain(), vec!["a changed 2", "b changed 2", "c changed 2"]);
    assert_eq!(h.delegate.observer_count(), 1);

    h.delegate.dispatch(&EngineEvent::ExitFullscreen);
    h.delegate.dispatch(&EngineEvent::EnterFullscreen { requesting_frame: None });
    assert_eq!(
        h.drain(),
        vec!["client fullscreen false", "b changed 4", "client fullscreen true"]
    );
}

#[test]
fn stop_loading_closes_committed_loads() {
    let h = harness();
    h.contents.navigation.set(NavigationState {
        is_loading: true,
        ..NavigationState::default()
    });
    h.delegate.dispatch(&commit(GlobalFrameId::new(2, 5), "https://example.org/frame"));
    h.drain();

    h.delegate.dispatch(&EngineEvent::StopLoading);
    assert_eq!(h.drain(), vec!["client load_end 2:5 200"]);
    assert!(!h.delegate.is_loading());
}

#[test]
fn nothing_changes_after_destruction() {
    let h = harness();
    Observer::register("a", &h.log, &h.delegate, false);
    Observer::register("b", &h.log, &h.delegate, false);

    h.delegate.dispatch(&EngineEvent::ContentsDestroyed);
    assert_eq!(h.drain(), vec!["a destroyed", "b destroyed"]);

    h.contents.navigation.set(NavigationState {
        is_loading: true,
        can_go_back: true,
        can_go_forward: true,
    });
    h.delegate.dispatch(&EngineEvent::ContentsDestroyed);
    h.delegate.dispatch(&EngineEvent::LoadingStateChanged { to_different_document: true });
    h.delegate.dispatch(&EngineEvent::DocumentAvailable);
    h.delegate.dispatch(&EngineEvent::EnterFullscreen { requesting_frame: None });
    h.delegate.dispatch(&commit(GlobalFrameId::new(2, 1), "https://late.example.org/"));

    assert!(h.drain().is_empty());
    assert!(!h.delegate.is_loading());
    assert!(!h.delegate.has_document());
}
