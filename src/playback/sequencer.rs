//! Playback sequencer: runs a [`PlaybackPlan`] against the speech port.
//!
//! # Flow
//!
//! ```text
//! play_single / play_autoplay
//!   └─▶ stop()                       cancel previous run, SpeechPort::stop_all
//!   └─▶ build PlaybackPlan
//!   └─▶ tokio::spawn(execute)
//!         for each step:
//!           begin_step ─▶ StepStarted             [Starting]
//!           select { cancelled | started | speak }
//!             started ─▶ UtteranceStarted         [Speaking]
//!           select { cancelled | sleep(hold) }    [PausedBetweenSteps]
//!         finish ─▶ Finished (+ AwaitingUserAction for autoplay)
//! ```
//!
//! Cancellation is synchronous from the caller's point of view: the handle is
//! `Cancelled` before [`PlaybackSequencer::cancel`] returns, and the spawned
//! task checks the handle before every step so nothing else starts.
//!
//! Step events are sent from inside the run's guarded transitions, so on any
//! runtime flavour they are only sent for a live run and always precede the
//! run's `Finished`.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::PlaybackConfig;
use crate::speech::{SpeechPort, StartSignal};

use super::plan::{PlanKind, PlaybackPlan};
use super::run::{RunHandle, RunId, RunState};

// ---------------------------------------------------------------------------
// PlaybackEvent
// ---------------------------------------------------------------------------

/// Notifications sent to whoever drives the surrounding UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Step `step` (0-based) of `total` was handed to the speech port.
    StepStarted { run: RunId, step: usize, total: usize },
    /// The speech port reports that step `step` is audible.
    UtteranceStarted { run: RunId, step: usize },
    /// The run reached a terminal state.
    Finished { run: RunId, state: RunState },
    /// An autoplay run ended (normally or by failure); the UI should offer
    /// repeat / previous / next.
    AwaitingUserAction { run: RunId },
}

// ---------------------------------------------------------------------------
// PlaybackSequencer
// ---------------------------------------------------------------------------

/// Sole owner of speech output.
///
/// At most one run is live at a time: every new request cancels the previous
/// one first.  Requests spawn onto the current tokio runtime, so they must be
/// made from within one.
pub struct PlaybackSequencer {
    speech: Arc<dyn SpeechPort>,
    config: PlaybackConfig,
    events: mpsc::UnboundedSender<PlaybackEvent>,
    current: Option<RunHandle>,
    next_id: u64,
    supported: bool,
}

impl PlaybackSequencer {
    /// Create a sequencer and the receiving end of its event stream.
    pub fn new(
        speech: Arc<dyn SpeechPort>,
        config: PlaybackConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let supported = speech.is_available();
        if !supported {
            log::warn!("playback: speech output unavailable, playback disabled");
        }
        let (events, rx) = mpsc::unbounded_channel();

        let sequencer = Self {
            speech,
            config,
            events,
            current: None,
            next_id: 1,
            supported,
        };
        (sequencer, rx)
    }

    /// Whether playback can produce audio at all.  UIs disable their playback
    /// controls when this is `false`.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// The most recently started run, live or not.
    pub fn current(&self) -> Option<&RunHandle> {
        self.current.as_ref()
    }

    /// `true` while the most recent run is still live.
    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(RunHandle::is_active)
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Speak `word` once.
    pub fn play_single(&mut self, word: &str) -> RunHandle {
        let plan = PlaybackPlan::single(word, &self.config);
        self.play(plan)
    }

    /// Announce `position` of `total` (0-based position) and repeat `word`.
    pub fn play_autoplay(&mut self, word: &str, position: usize, total: usize) -> RunHandle {
        let plan = PlaybackPlan::autoplay(word, position, total, &self.config);
        self.play(plan)
    }

    /// Run an arbitrary plan, superseding whatever is playing.
    pub fn play(&mut self, plan: PlaybackPlan) -> RunHandle {
        self.stop();

        let id = RunId(self.next_id);
        self.next_id += 1;
        let run = RunHandle::new(id, plan.len());
        self.current = Some(run.clone());

        if !self.supported || plan.is_empty() {
            let reason = if self.supported {
                "nothing to speak"
            } else {
                "speech unavailable"
            };
            log::warn!("playback: {id} rejected ({reason})");
            conclude(&run, RunState::Failed, plan.kind(), &self.events);
            return run;
        }

        log::debug!("playback: {id} starting ({} steps)", plan.len());
        tokio::spawn(execute(
            plan,
            run.clone(),
            Arc::clone(&self.speech),
            self.events.clone(),
        ));
        run
    }

    // -----------------------------------------------------------------------
    // Cancellation
    // -----------------------------------------------------------------------

    /// Cancel `run` and silence speech.  No-op if the run is already over.
    pub fn cancel(&mut self, run: &RunHandle) {
        if conclude(run, RunState::Cancelled, PlanKind::Single, &self.events) {
            log::info!("playback: {} cancelled", run.id());
            self.speech.stop_all();
        }
    }

    /// Cancel the current run, if any, and silence speech.
    pub fn stop(&mut self) {
        if let Some(run) = self.current.take() {
            if conclude(&run, RunState::Cancelled, PlanKind::Single, &self.events) {
                log::info!("playback: {} cancelled", run.id());
            }
        }
        self.speech.stop_all();
    }
}

impl Drop for PlaybackSequencer {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Move `run` to terminal `state` and announce it.  Returns `false` if the
/// run had already ended.
fn conclude(
    run: &RunHandle,
    state: RunState,
    kind: PlanKind,
    events: &mpsc::UnboundedSender<PlaybackEvent>,
) -> bool {
    if !run.finish(state) {
        return false;
    }
    // A closed receiver only means nobody is listening.
    let _ = events.send(PlaybackEvent::Finished { run: run.id(), state });
    if kind == PlanKind::Autoplay && matches!(state, RunState::Done | RunState::Failed) {
        let _ = events.send(PlaybackEvent::AwaitingUserAction { run: run.id() });
    }
    true
}

async fn execute(
    plan: PlaybackPlan,
    run: RunHandle,
    speech: Arc<dyn SpeechPort>,
    events: mpsc::UnboundedSender<PlaybackEvent>,
) {
    let total = plan.len();

    for (index, step) in plan.steps().iter().enumerate() {
        let entered = run.begin_step(index, || {
            let _ = events.send(PlaybackEvent::StepStarted {
                run: run.id(),
                step: index,
                total,
            });
        });
        if !entered {
            return;
        }
        log::debug!("playback: {} step {}/{total} {:?}", run.id(), index + 1, step.text);

        let (signal, mut started) = StartSignal::new();
        let mut utterance = speech.speak(&step.text, &step.language, signal);
        let mut waiting_for_audio = true;
        let announce = || {
            let _ = events.send(PlaybackEvent::UtteranceStarted {
                run: run.id(),
                step: index,
            });
        };

        let spoken = loop {
            tokio::select! {
                biased;
                _ = run.wait() => return,
                fired = &mut started, if waiting_for_audio => {
                    waiting_for_audio = false;
                    if fired.is_ok() {
                        run.audible(announce);
                    }
                }
                result = &mut utterance => {
                    // Started and finished within the same poll.
                    if waiting_for_audio && started.try_recv().is_ok() {
                        run.audible(announce);
                    }
                    break result;
                }
            }
        };
        if let Err(e) = spoken {
            if conclude(&run, RunState::Failed, plan.kind(), &events) {
                log::warn!("playback: {} step {} failed: {e}", run.id(), index + 1);
            }
            return;
        }

        if !step.hold_after.is_zero() {
            if !run.pause() {
                return;
            }
            tokio::select! {
                biased;
                _ = run.wait() => return,
                _ = tokio::time::sleep(step.hold_after) => {}
            }
        }
    }

    if conclude(&run, RunState::Done, plan.kind(), &events) {
        log::debug!("playback: {} done", run.id());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
