use std::{collections::HashSet, sync::Arc, time::Duration};

use shared::domain::SubjectId;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    age::{Clock, SystemClock},
    assembler::DataAssembler,
    carousel::Carousel,
    error::CardError,
    reactions::{ReactionKind, ReactionTracker},
    selector::RandomSelector,
    types::{find_subject, Subject, SubjectImageSet},
    view::{self, CardView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Idle,
    ExitingOut,
    EnteringIn,
}

impl AnimationPhase {
    pub fn css_class(self) -> &'static str {
        match self {
            AnimationPhase::Idle => "",
            AnimationPhase::ExitingOut => "fly-out",
            AnimationPhase::EnteringIn => "fly-in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Ready,
    /// Blocking load error shown instead of the card.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    pub exit_delay: Duration,
    pub enter_duration: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            exit_delay: Duration::from_millis(1000),
            enter_duration: Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomizeOutcome {
    Completed { subject_id: SubjectId },
    /// A transition was already running.
    Rejected { phase: AnimationPhase },
    /// No subjects are ready: the directory was empty or a load is running.
    Ignored,
}

#[derive(Debug, Clone)]
pub enum CardEvent {
    PhaseChanged(AnimationPhase),
    SubjectChanged {
        subject_id: SubjectId,
        image_count: usize,
    },
    Reacted {
        subject_id: SubjectId,
        kind: ReactionKind,
        count: u64,
    },
    Error(String),
}

struct SessionState {
    status: SessionStatus,
    phase: AnimationPhase,
    subjects: Vec<Subject>,
    subject_ids: Vec<SubjectId>,
    /// Selection memory: the subject on the card, excluded from the next draw.
    last_selected: Option<SubjectId>,
    /// Set while `start` is fetching; blocks randomize and a second start.
    loading: bool,
    carousel: Carousel,
    reactions: ReactionTracker,
    selector: RandomSelector,
}

/// Owns the card session and drives the exit -> reload -> enter sequence.
///
/// The state lock is only held for synchronous updates; service calls and
/// animation timers run without it.
pub struct AnimationCoordinator {
    assembler: DataAssembler,
    clock: Arc<dyn Clock>,
    timings: TransitionTimings,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<CardEvent>,
}

impl AnimationCoordinator {
    pub fn new(assembler: DataAssembler, selector: RandomSelector) -> Arc<Self> {
        Self::new_with_dependencies(
            assembler,
            selector,
            Arc::new(SystemClock),
            TransitionTimings::default(),
        )
    }

    pub fn new_with_dependencies(
        assembler: DataAssembler,
        selector: RandomSelector,
        clock: Arc<dyn Clock>,
        timings: TransitionTimings,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            assembler,
            clock,
            timings,
            inner: Mutex::new(SessionState {
                status: SessionStatus::Loading,
                phase: AnimationPhase::Idle,
                subjects: Vec::new(),
                subject_ids: Vec::new(),
                last_selected: None,
                loading: false,
                carousel: Carousel::default(),
                reactions: ReactionTracker::new(),
                selector,
            }),
            events,
        })
    }

    /// Loads subjects, a first random subject, and its images.
    ///
    /// Refused with [`CardError::SessionBusy`] while another load or a
    /// transition is running. Like [`randomize`](Self::randomize), the load
    /// runs on its own task and completes even if the returned future is
    /// dropped.
    pub async fn start(self: &Arc<Self>) -> Result<(), CardError> {
        {
            let mut guard = self.inner.lock().await;
            if guard.loading || guard.phase != AnimationPhase::Idle {
                debug!(
                    phase = ?guard.phase,
                    loading = guard.loading,
                    "start rejected; session busy"
                );
                return Err(CardError::SessionBusy);
            }
            guard.loading = true;
            guard.status = SessionStatus::Loading;
        }

        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.run_start().await }).await?
    }

    async fn run_start(&self) -> Result<(), CardError> {
        match self.load_session().await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, "initial card load failed");
                let mut guard = self.inner.lock().await;
                guard.loading = false;
                guard.status = SessionStatus::Failed(err.to_string());
                let _ = self.events.send(CardEvent::Error(err.to_string()));
                Err(err)
            }
        }
    }

    async fn load_session(&self) -> Result<(), CardError> {
        let subjects = self.assembler.load_subjects().await?;
        let subject_ids = unique_ids(&subjects);

        let selected = {
            let mut guard = self.inner.lock().await;
            match guard.selector.select(&subject_ids, None) {
                Ok(subject_id) => Some(subject_id),
                Err(CardError::EmptyCandidatePool) => None,
                Err(err) => return Err(err),
            }
        };

        let images = match &selected {
            Some(subject_id) => Some(self.assembler.load_images_for(subject_id).await?),
            None => None,
        };

        let mut guard = self.inner.lock().await;
        guard.subjects = subjects;
        guard.subject_ids = subject_ids;
        guard.status = SessionStatus::Ready;
        guard.loading = false;
        match (selected, images) {
            (Some(subject_id), Some(images)) => {
                self.apply_selection(&mut guard, subject_id, images);
            }
            _ => {
                info!("directory returned no subjects; randomize disabled");
                guard.last_selected = None;
                guard.carousel = Carousel::default();
            }
        }
        Ok(())
    }

    /// Runs a full transition to a different random subject.
    ///
    /// The transition body runs on its own task: once accepted it always
    /// completes, even if the returned future is dropped.
    pub async fn randomize(self: &Arc<Self>) -> Result<RandomizeOutcome, CardError> {
        {
            let mut guard = self.inner.lock().await;
            if guard.phase != AnimationPhase::Idle {
                debug!(phase = ?guard.phase, "randomize rejected while transition is running");
                return Ok(RandomizeOutcome::Rejected { phase: guard.phase });
            }
            if guard.loading || guard.subject_ids.is_empty() {
                debug!(loading = guard.loading, "randomize ignored; no subjects ready");
                return Ok(RandomizeOutcome::Ignored);
            }
            self.set_phase(&mut guard, AnimationPhase::ExitingOut);
        }

        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.run_transition().await }).await?
    }

    async fn run_transition(&self) -> Result<RandomizeOutcome, CardError> {
        tokio::time::sleep(self.timings.exit_delay).await;

        let selected = {
            let mut guard = self.inner.lock().await;
            let state = &mut *guard;
            state
                .selector
                .select(&state.subject_ids, state.last_selected.as_ref())
        };
        let subject_id = match selected {
            Ok(subject_id) => subject_id,
            Err(err) => return Err(self.abort_transition(err).await),
        };

        let images = match self.assembler.load_images_for(&subject_id).await {
            Ok(images) => images,
            Err(err) => return Err(self.abort_transition(err).await),
        };

        {
            let mut guard = self.inner.lock().await;
            guard.status = SessionStatus::Ready;
            self.apply_selection(&mut guard, subject_id.clone(), images);
            self.set_phase(&mut guard, AnimationPhase::EnteringIn);
        }

        tokio::time::sleep(self.timings.enter_duration).await;

        let mut guard = self.inner.lock().await;
        self.set_phase(&mut guard, AnimationPhase::Idle);
        Ok(RandomizeOutcome::Completed { subject_id })
    }

    async fn abort_transition(&self, err: CardError) -> CardError {
        warn!(error = %err, "card transition failed; returning to idle");
        let mut guard = self.inner.lock().await;
        guard.status = SessionStatus::Failed(err.to_string());
        self.set_phase(&mut guard, AnimationPhase::Idle);
        let _ = self.events.send(CardEvent::Error(err.to_string()));
        err
    }

    fn apply_selection(
        &self,
        state: &mut SessionState,
        subject_id: SubjectId,
        images: SubjectImageSet,
    ) {
        let image_count = images.len();
        state.carousel.replace(images);
        state.last_selected = Some(subject_id.clone());
        info!(%subject_id, image_count, "card subject loaded");
        let _ = self.events.send(CardEvent::SubjectChanged {
            subject_id,
            image_count,
        });
    }

    fn set_phase(&self, state: &mut SessionState, phase: AnimationPhase) {
        state.phase = phase;
        debug!(?phase, "card animation phase changed");
        let _ = self.events.send(CardEvent::PhaseChanged(phase));
    }

    /// Returns the new zero-based position.
    pub async fn next(&self) -> usize {
        let mut guard = self.inner.lock().await;
        guard.carousel.next();
        guard.carousel.current_index()
    }

    pub async fn previous(&self) -> usize {
        let mut guard = self.inner.lock().await;
        guard.carousel.previous();
        guard.carousel.current_index()
    }

    /// Counts a reaction for the subject on the card. `None` when no subject
    /// is displayed.
    pub async fn react(&self, kind: ReactionKind) -> Option<u64> {
        let mut guard = self.inner.lock().await;
        let subject_id = guard.last_selected.clone()?;
        let count = guard.reactions.increment(&subject_id);
        info!(%subject_id, reaction = kind.label(), count, "reaction recorded");
        let _ = self.events.send(CardEvent::Reacted {
            subject_id,
            kind,
            count,
        });
        Some(count)
    }

    pub async fn phase(&self) -> AnimationPhase {
        self.inner.lock().await.phase
    }

    pub async fn view(&self) -> CardView {
        let today = self.clock.today();
        let guard = self.inner.lock().await;
        let subject = guard
            .last_selected
            .as_ref()
            .and_then(|subject_id| find_subject(&guard.subjects, subject_id));

        CardView {
            status: guard.status.clone(),
            phase: guard.phase,
            display_name: view::display_name(subject),
            age_text: view::age_text(subject, today),
            image_file: view::image_file_name(guard.carousel.current()),
            image_count: guard.carousel.len(),
            position: guard.carousel.current_index(),
            progress: guard.carousel.progress(),
            reaction_count: guard
                .last_selected
                .as_ref()
                .map(|subject_id| guard.reactions.count_for(subject_id))
                .unwrap_or(0),
            can_randomize: guard.phase == AnimationPhase::Idle
                && guard.status != SessionStatus::Loading
                && !guard.subject_ids.is_empty(),
            can_navigate: !guard.carousel.is_empty(),
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CardEvent> {
        self.events.subscribe()
    }
}

/// Directory ids in first-seen order, duplicates dropped.
fn unique_ids(subjects: &[Subject]) -> Vec<SubjectId> {
    let mut seen = HashSet::new();
    subjects
        .iter()
        .filter(|subject| {
            let fresh = seen.insert(subject.id.clone());
            if !fresh {
                warn!(subject_id = %subject.id, "directory returned duplicate subject id");
            }
            fresh
        })
        .map(|subject| subject.id.clone())
        .collect()
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
