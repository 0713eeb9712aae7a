// Trace-driven host harness for the contents delegate

mod logging;
mod trace;

pub use logging::{LoggingClient, TransitionJournal};
pub use trace::{read_trace, TraceError, TraceStep};

use crate::browser::{Browser, BrowserInfo};
use crate::client::Client;
use crate::config::ContentsConfig;
use crate::contents::{NavigationState, WebContents};
use crate::delegate::ContentsDelegate;
use crate::observer::ContentsObserver;
use crate::state::{StateChangeMask, StateSnapshot};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{info, warn};

/// Content object whose navigation state is driven by the trace
#[derive(Debug, Default)]
pub struct ScriptedContents {
    navigation: Cell<NavigationState>,
    title: RefCell<String>,
}

impl ScriptedContents {
    pub fn set_navigation_state(&self, navigation: NavigationState) {
        self.navigation.set(navigation);
    }

    pub fn set_title(&self, title: &str) {
        self.title.replace(title.to_string());
    }
}

impl WebContents for ScriptedContents {
    fn navigation_state(&self) -> NavigationState {
        self.navigation.get()
    }

    fn title(&self) -> String {
        self.title.borrow().clone()
    }
}

/// Outcome of replaying a trace
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    /// Steps applied (including contents updates)
    pub steps: usize,
    /// Steps left unread after the contents were destroyed
    pub skipped: usize,
    pub transitions: Vec<StateChangeMask>,
    pub destroyed: bool,
    pub final_state: StateSnapshot,
}

/// Replays recorded engine traces through a delegate wired to a logging
/// client and a transition journal.
pub struct Replay {
    delegate: Rc<ContentsDelegate>,
    contents: Rc<ScriptedContents>,
    journal: Rc<TransitionJournal>,
    halt_on_destroyed: bool,
}

impl Replay {
    pub fn new(config: &ContentsConfig) -> Self {
        let browser_id = config.replay.browser_id;
        let info = BrowserInfo::new(browser_id);
        let client: Rc<dyn Client> = Rc::new(LoggingClient::new());
        info.set_browser(Some(Rc::new(Browser::new(browser_id, Some(client)))));

        let delegate = Rc::new(ContentsDelegate::with_config(info, config));
        let contents = Rc::new(ScriptedContents::default());
        delegate.observe_web_contents(Some(Rc::clone(&contents) as Rc<dyn WebContents>));

        let journal = Rc::new(TransitionJournal::new(browser_id));
        delegate.add_observer(Rc::clone(&journal) as Rc<dyn ContentsObserver>);

        Self {
            delegate,
            contents,
            journal,
            halt_on_destroyed: config.replay.halt_on_destroyed,
        }
    }

    pub fn delegate(&self) -> &Rc<ContentsDelegate> {
        &self.delegate
    }

    pub fn contents(&self) -> &Rc<ScriptedContents> {
        &self.contents
    }

    pub fn journal(&self) -> &Rc<TransitionJournal> {
        &self.journal
    }

    pub fn apply(&self, step: &TraceStep) {
        match step {
            TraceStep::Contents(navigation) => self.contents.set_navigation_state(*navigation),
            TraceStep::Event(event) => {
                self.delegate.dispatch(event);
            }
        }
    }

    pub fn run(&self, steps: &[TraceStep]) -> ReplaySummary {
        let mut applied = 0;

        for step in steps {
            if self.halt_on_destroyed && self.delegate.is_destroyed() {
                break;
            }
            self.apply(step);
            applied += 1;
        }

        let skipped = steps.len() - applied;
        if skipped > 0 {
            warn!(skipped, "Trace continues after contents destroyed; remaining steps skipped");
        }

        let summary = ReplaySummary {
            steps: applied,
            skipped,
            transitions: self.journal.transitions(),
            destroyed: self.journal.destroyed(),
            final_state: self.delegate.snapshot(),
        };
        info!(
            steps = summary.steps,
            transitions = summary.transitions.len(),
            destroyed = summary.destroyed,
            "Replay finished"
        );
        summary
    }
}
