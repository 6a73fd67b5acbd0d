//! Run state machine and the handle callers use to observe a run.
//!
//! [`RunState`] drives one playback run.  The presentation layer reads it
//! through a [`RunHandle`] to enable or disable playback controls.
//!
//! [`RunHandle`] is cheap to clone (`Arc` clone).  Every clone observes the
//! same run; state changes are published through a `tokio::sync::watch`
//! channel so callers can either poll [`RunHandle::state`] or await
//! [`RunHandle::wait`], or take a receiver from [`RunHandle::subscribe`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// States of one playback run.
///
/// ```text
/// Idle ──step handed to speech──▶ Starting ──audio began──▶ Speaking
///                                     ▲                        │
///                                     │                  utterance done
///                                     │                        ▼
///                                     └──hold over── PausedBetweenSteps
/// Speaking / Paused ──last step done──▶ Done
/// any live state   ──cancel──────────▶ Cancelled
/// any live state   ──speech error────▶ Failed
/// ```
///
/// `Done`, `Cancelled` and `Failed` are terminal: once reached, the state
/// never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Created, no step started yet.
    #[default]
    Idle,
    /// A step was handed to the speech port, which has not started
    /// rendering it yet.
    Starting,
    /// A step's utterance is audible.
    Speaking,
    /// Waiting out the hold that follows a step.
    PausedBetweenSteps,
    /// Every step ran to completion.
    Done,
    /// Stopped by a cancel or by a newer request.
    Cancelled,
    /// Speech failed or was unavailable.
    Failed,
}

impl RunState {
    /// ```
    /// use word_drill::playback::RunState;
    ///
    /// assert!(!RunState::Speaking.is_terminal());
    /// assert!(RunState::Done.is_terminal());
    /// assert!(RunState::Cancelled.is_terminal());
    /// assert!(RunState::Failed.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Cancelled | RunState::Failed)
    }

    /// Short label for status lines.
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Starting => "Loading",
            RunState::Speaking => "Speaking",
            RunState::PausedBetweenSteps => "Paused",
            RunState::Done => "Done",
            RunState::Cancelled => "Cancelled",
            RunState::Failed => "Failed",
        }
    }
}

// ---------------------------------------------------------------------------
// RunId / RunStatus
// ---------------------------------------------------------------------------

/// Identifier of a run, unique per sequencer and increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub(crate) u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {}", self.0)
    }
}

/// Snapshot published on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStatus {
    pub state: RunState,
    /// 0-based index of the current (or last) step.
    pub step: usize,
}

// ---------------------------------------------------------------------------
// RunHandle
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RunInner {
    id: RunId,
    total_steps: usize,
    status: watch::Sender<RunStatus>,
}

/// Shared view of one playback run.
#[derive(Debug, Clone)]
pub struct RunHandle {
    inner: Arc<RunInner>,
}

impl RunHandle {
    pub(crate) fn new(id: RunId, total_steps: usize) -> Self {
        let (status, _) = watch::channel(RunStatus::default());
        Self {
            inner: Arc::new(RunInner {
                id,
                total_steps,
                status,
            }),
        }
    }

    pub fn id(&self) -> RunId {
        self.inner.id
    }

    pub fn total_steps(&self) -> usize {
        self.inner.total_steps
    }

    pub fn status(&self) -> RunStatus {
        *self.inner.status.borrow()
    }

    pub fn state(&self) -> RunState {
        self.status().state
    }

    pub fn step_index(&self) -> usize {
        self.status().step
    }

    /// `true` until the run reaches a terminal state.
    pub fn is_active(&self) -> bool {
        !self.state().is_terminal()
    }

    /// Receiver that sees every status change, for presentation layers that
    /// prefer subscribing over polling.
    pub fn subscribe(&self) -> watch::Receiver<RunStatus> {
        self.inner.status.subscribe()
    }

    /// Wait until the run is over and return how it ended.
    pub async fn wait(&self) -> RunState {
        let mut rx = self.inner.status.subscribe();
        let state = match rx.wait_for(|status| status.state.is_terminal()).await {
            Ok(status) => status.state,
            // The sender lives as long as `self`, so this is unreachable.
            Err(_) => self.state(),
        };
        state
    }

    // -----------------------------------------------------------------------
    // Guarded transitions (sequencer only)
    // -----------------------------------------------------------------------
    //
    // `on_enter` runs while the status is locked, so anything it does is
    // ordered before a concurrent `finish` takes effect.

    /// Enter `Starting` for `step`.  Returns `false` if the run is already
    /// over, in which case the step must not start and `on_enter` is not
    /// called.
    pub(crate) fn begin_step(&self, step: usize, on_enter: impl FnOnce()) -> bool {
        self.inner.status.send_if_modified(|status| {
            if status.state.is_terminal() {
                return false;
            }
            *status = RunStatus {
                state: RunState::Starting,
                step,
            };
            on_enter();
            true
        })
    }

    /// Move from `Starting` to `Speaking`.  Returns `false` (without calling
    /// `on_enter`) unless the run is waiting for audio.
    pub(crate) fn audible(&self, on_enter: impl FnOnce()) -> bool {
        self.inner.status.send_if_modified(|status| {
            if status.state != RunState::Starting {
                return false;
            }
            status.state = RunState::Speaking;
            on_enter();
            true
        })
    }

    /// Enter `PausedBetweenSteps`.  Returns `false` if the run is over.
    pub(crate) fn pause(&self) -> bool {
        self.inner.status.send_if_modified(|status| {
            if status.state.is_terminal() {
                return false;
            }
            status.state = RunState::PausedBetweenSteps;
            true
        })
    }

    /// Move to the terminal `state`.  Only the first terminal transition
    /// wins; later ones return `false` and change nothing.
    pub(crate) fn finish(&self, state: RunState) -> bool {
        debug_assert!(state.is_terminal());
        self.inner.status.send_if_modified(|status| {
            if status.state.is_terminal() {
                return false;
            }
            status.state = state;
            true
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_is_idle_and_active() {
        let run = RunHandle::new(RunId(1), 4);
        assert_eq!(run.state(), RunState::Idle);
        assert_eq!(run.step_index(), 0);
        assert_eq!(run.total_steps(), 4);
        assert!(run.is_active());
    }

    #[test]
    fn steps_and_pauses_update_status() {
        let run = RunHandle::new(RunId(1), 2);
        assert!(run.begin_step(0, || {}));
        assert_eq!(run.state(), RunState::Starting);
        assert!(run.audible(|| {}));
        assert_eq!(run.state(), RunState::Speaking);
        assert!(!run.audible(|| panic!("already speaking")));
        assert!(run.pause());
        assert_eq!(run.state(), RunState::PausedBetweenSteps);
        assert!(run.begin_step(1, || {}));
        assert!(run.audible(|| {}));
        assert_eq!(
            run.status(),
            RunStatus {
                state: RunState::Speaking,
                step: 1
            }
        );
    }

    #[test]
    fn on_enter_runs_only_for_live_runs() {
        let run = RunHandle::new(RunId(5), 2);
        let mut entered = 0;
        run.begin_step(0, || entered += 1);
        run.finish(RunState::Cancelled);
        assert!(!run.begin_step(1, || entered += 1));
        assert!(!run.audible(|| entered += 1));
        assert_eq!(entered, 1);
    }

    #[test]
    fn first_terminal_transition_wins() {
        let run = RunHandle::new(RunId(7), 4);
        run.begin_step(1, || {});
        assert!(run.finish(RunState::Cancelled));
        assert!(!run.finish(RunState::Done));
        assert!(!run.finish(RunState::Failed));
        assert_eq!(run.state(), RunState::Cancelled);
        assert!(!run.is_active());
    }

    #[test]
    fn terminal_run_rejects_new_steps() {
        let run = RunHandle::new(RunId(2), 4);
        run.begin_step(1, || {});
        run.finish(RunState::Cancelled);
        assert!(!run.begin_step(2, || {}));
        assert!(!run.pause());
        assert_eq!(run.step_index(), 1);
    }

    #[test]
    fn clones_share_state() {
        let run = RunHandle::new(RunId(3), 1);
        let other = run.clone();
        run.finish(RunState::Done);
        assert_eq!(other.state(), RunState::Done);
    }

    #[tokio::test]
    async fn wait_resolves_on_terminal_state() {
        let run = RunHandle::new(RunId(4), 1);
        let waiter = {
            let run = run.clone();
            tokio::spawn(async move { run.wait().await })
        };
        run.begin_step(0, || {});
        run.finish(RunState::Failed);
        assert_eq!(waiter.await.unwrap(), RunState::Failed);
        // Already terminal: returns immediately.
        assert_eq!(run.wait().await, RunState::Failed);
    }

    #[test]
    fn run_id_display() {
        assert_eq!(RunId(3).to_string(), "run 3");
    }

    #[test]
    fn labels() {
        assert_eq!(RunState::PausedBetweenSteps.label(), "Paused");
        assert_eq!(RunState::Starting.label(), "Loading");
        assert_eq!(RunState::default().label(), "Idle");
    }
}
