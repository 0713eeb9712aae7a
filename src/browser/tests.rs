use super::*;
use url::Url;

fn main_id() -> GlobalFrameId {
    GlobalFrameId::new(4, 1)
}

#[test]
fn test_browser_handle_is_optional() {
    let info = BrowserInfo::new(3);
    assert_eq!(info.browser_id(), 3);
    assert!(info.browser().is_none());

    info.set_browser(Some(Rc::new(Browser::new(3, None))));
    let browser = info.browser().unwrap();
    assert_eq!(browser.id(), 3);
    assert!(browser.client().is_none());

    info.set_browser(None);
    assert!(info.browser().is_none());
}

#[test]
fn test_maybe_create_frame_is_idempotent() {
    let info = BrowserInfo::new(1);

    let first = info.maybe_create_frame(FrameHost::main(main_id()));
    let second = info.maybe_create_frame(FrameHost::main(main_id()));

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(info.frame_count(), 1);
    assert!(first.is_main());
}

#[test]
fn test_main_frame_lookup_ignores_children() {
    let info = BrowserInfo::new(1);
    let child = GlobalFrameId::new(4, 2);

    info.maybe_create_frame(FrameHost::child(child, main_id()));
    assert!(info.main_frame().is_none());

    info.maybe_create_frame(FrameHost::main(main_id()));
    assert_eq!(info.main_frame().unwrap().id(), main_id());
    assert_eq!(info.frame_for_host(child).unwrap().parent(), Some(main_id()));
}

#[test]
fn test_remove_frame_drops_registry_reference() {
    let info = BrowserInfo::new(1);
    let frame = info.maybe_create_frame(FrameHost::main(main_id()));
    let weak = Rc::downgrade(&frame);
    drop(frame);

    assert!(weak.upgrade().is_some());
    assert!(info.remove_frame(main_id()).is_some());
    assert!(weak.upgrade().is_none());
    assert!(info.remove_frame(main_id()).is_none());
    assert_eq!(info.frame_count(), 0);
}

#[test]
fn test_pending_load_is_taken_once() {
    let info = BrowserInfo::new(1);
    let frame = info.maybe_create_frame(FrameHost::main(main_id()));
    let url = Url::parse("https://example.com/").unwrap();

    frame.begin_load(Some(url.clone()), 200);
    assert!(frame.is_loading());
    assert_eq!(frame.url(), Some(url.clone()));

    let load = frame.take_pending_load().unwrap();
    assert_eq!(load.http_status, 200);
    assert_eq!(load.url, Some(url));
    assert!(frame.take_pending_load().is_none());
    assert!(!frame.is_loading());
}

#[test]
fn test_frame_id_display() {
    assert_eq!(GlobalFrameId::new(12, 3).to_string(), "12:3");
}

#[test]
fn test_unknown_frame_falls_back() {
    let info = BrowserInfo::new(1);
    let unknown = GlobalFrameId::new(9, 9);

    // Nothing registered: a temporary frame that is not kept
    let temp = info.frame_or_temporary(unknown, true);
    assert_eq!(temp.id(), unknown);
    assert!(temp.is_main());
    assert_eq!(info.frame_count(), 0);

    let main = info.maybe_create_frame(FrameHost::main(main_id()));
    assert!(Rc::ptr_eq(&info.frame_or_temporary(unknown, true), &main));

    let sub = info.frame_or_temporary(unknown, false);
    assert_eq!(sub.id(), unknown);
    assert!(!sub.is_main());
    assert!(sub.parent().is_none());
    assert_eq!(info.frame_count(), 1);

    assert!(Rc::ptr_eq(&info.frame_or_temporary(main_id(), false), &main));
}
