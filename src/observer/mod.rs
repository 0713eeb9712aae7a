// Observer contract and re-entrancy-safe observer list

use crate::state::StateChangeMask;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Interface for parties that want to be informed of changes to the
/// delegate. All methods are called on the control thread.
///
/// An observer must either outlive the delegate or remove itself before it is
/// dropped.
pub trait ContentsObserver {
    /// Called after state has changed and before the associated client
    /// callback runs. `changed` is never empty.
    fn on_state_changed(&self, changed: StateChangeMask);

    /// Called once when the observed content object is destroyed
    fn on_web_contents_destroyed(&self);
}

/// Ordered set of distinct observers.
///
/// Add and remove take `&self`, so an observer may remove itself (or any
/// other observer) while a notification pass is running. Removed entries are
/// tombstoned during iteration and compacted once the outermost pass ends;
/// observers added mid-pass are first notified on the next pass.
pub struct ObserverList<T: ?Sized> {
    entries: RefCell<Vec<Option<Rc<T>>>>,
    iteration_depth: Cell<usize>,
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            iteration_depth: Cell::new(0),
        }
    }

    /// Returns false if the observer was already registered
    pub fn add(&self, observer: Rc<T>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.entries.borrow_mut().push(Some(observer));
        true
    }

    /// Returns false if the observer was not registered
    pub fn remove(&self, observer: &Rc<T>) -> bool {
        let mut entries = self.entries.borrow_mut();
        let Some(index) = entries
            .iter()
            .position(|entry| entry.as_ref().is_some_and(|o| Rc::ptr_eq(o, observer)))
        else {
            return false;
        };

        if self.iteration_depth.get() > 0 {
            entries[index] = None;
        } else {
            entries.remove(index);
        }
        true
    }

    pub fn contains(&self, observer: &Rc<T>) -> bool {
        self.entries
            .borrow()
            .iter()
            .flatten()
            .any(|o| Rc::ptr_eq(o, observer))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every observer registered when the pass starts and still
    /// registered when its turn comes.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        let _pass = IterationGuard::enter(self);
        let end = self.entries.borrow().len();

        for index in 0..end {
            // No borrow may be held while the observer runs
            let observer = self.entries.borrow().get(index).cloned().flatten();
            if let Some(observer) = observer {
                f(&observer);
            }
        }
    }

    fn compact(&self) {
        self.entries.borrow_mut().retain(Option::is_some);
    }
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.len())
            .field("iteration_depth", &self.iteration_depth.get())
            .finish()
    }
}

struct IterationGuard<'a, T: ?Sized> {
    list: &'a ObserverList<T>,
}

impl<'a, T: ?Sized> IterationGuard<'a, T> {
    fn enter(list: &'a ObserverList<T>) -> Self {
        list.iteration_depth.set(list.iteration_depth.get() + 1);
        Self { list }
    }
}

impl<T: ?Sized> Drop for IterationGuard<'_, T> {
    fn drop(&mut self) {
        let depth = self.list.iteration_depth.get() - 1;
        self.list.iteration_depth.set(depth);
        if depth == 0 {
            self.list.compact();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Weak;

    trait Named {
        fn visit(&self);
    }

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        list: RefCell<Weak<ObserverList<dyn Named>>>,
        remove_on_visit: RefCell<Vec<Rc<dyn Named>>>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<Self> {
            Rc::new(Self {
                name,
                log: Rc::clone(log),
                list: RefCell::new(Weak::new()),
                remove_on_visit: RefCell::new(Vec::new()),
            })
        }
    }

    impl Named for Recorder {
        fn visit(&self) {
            self.log.borrow_mut().push(self.name);
            if let Some(list) = self.list.borrow().upgrade() {
                for observer in self.remove_on_visit.borrow().iter() {
                    list.remove(observer);
                }
            }
        }
    }

    fn as_named(r: &Rc<Recorder>) -> Rc<dyn Named> {
        Rc::clone(r) as Rc<dyn Named>
    }

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list: ObserverList<dyn Named> = ObserverList::new();
        let a = as_named(&Recorder::new("a", &log));

        assert!(list.add(Rc::clone(&a)));
        assert!(!list.add(Rc::clone(&a)));
        assert_eq!(list.len(), 1);

        assert!(list.remove(&a));
        assert!(!list.remove(&a));
        assert!(list.is_empty());
    }

    #[test]
    fn test_visits_in_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list: ObserverList<dyn Named> = ObserverList::new();
        for name in ["a", "b", "c"] {
            list.add(as_named(&Recorder::new(name, &log)));
        }

        list.for_each(|o| o.visit());
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_self_removal_during_pass_visits_everyone_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list: Rc<ObserverList<dyn Named>> = Rc::new(ObserverList::new());
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        *b.list.borrow_mut() = Rc::downgrade(&list);
        b.remove_on_visit.borrow_mut().push(as_named(&b));

        list.add(as_named(&a));
        list.add(as_named(&b));
        list.add(as_named(&c));

        list.for_each(|o| o.visit());
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(list.len(), 2);

        log.borrow_mut().clear();
        list.for_each(|o| o.visit());
        assert_eq!(*log.borrow(), vec!["a", "c"]);
    }

    #[test]
    fn test_removed_pending_observer_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list: Rc<ObserverList<dyn Named>> = Rc::new(ObserverList::new());
        let a = Recorder::new("a", &log);
        let b = Recorder::new("b", &log);
        let c = Recorder::new("c", &log);

        *a.list.borrow_mut() = Rc::downgrade(&list);
        a.remove_on_visit.borrow_mut().push(as_named(&b));

        list.add(as_named(&a));
        list.add(as_named(&b));
        list.add(as_named(&c));

        list.for_each(|o| o.visit());
        assert_eq!(*log.borrow(), vec!["a", "c"]);
        assert!(!list.contains(&as_named(&b)));
    }

    #[test]
    fn test_observer_added_during_pass_waits_for_next_pass() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list: ObserverList<dyn Named> = ObserverList::new();
        let late = as_named(&Recorder::new("late", &log));
        list.add(as_named(&Recorder::new("a", &log)));

        list.for_each(|o| {
            o.visit();
            list.add(Rc::clone(&late));
        });
        assert_eq!(*log.borrow(), vec!["a"]);

        log.borrow_mut().clear();
        list.for_each(|o| o.visit());
        assert_eq!(*log.borrow(), vec!["a", "late"]);
    }
}
