//! Workout progression state machine.
//!
//! A session walks every exercise of the plan once per set:
//!
//! ```text
//! Idle --start--> InProgress --complete--> Resting --advance--> InProgress
//!                      ^                       |
//!                      +-------- cancel -------+--> Idle (last exercise of last set: completed)
//! ```
//!
//! The live session data only exists inside the active phases, so an idle
//! machine always reports set 1, exercise 0. The rest countdown lives inside
//! `Resting`; leaving that phase drops it, which is what stops the timer.

use crate::clock::elapsed_seconds;
use crate::rest::{self, RestCountdown, RestTick};
use crate::{Error, ExercisePlanEntry, RestDuration, RestState, Result, WorkoutPlan};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Live data of a session in progress
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub current_set: u32,
    pub current_exercise: usize,
    pub elapsed_seconds: u64,
    pub instructions_visible: bool,
}

impl ActiveSession {
    fn begin(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            current_set: 1,
            current_exercise: 0,
            elapsed_seconds: 0,
            instructions_visible: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    InProgress(ActiveSession),
    Resting {
        session: ActiveSession,
        countdown: RestCountdown,
    },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::InProgress(_) => "in progress",
            Phase::Resting { .. } => "resting",
        }
    }

    fn session(&self) -> Option<&ActiveSession> {
        match self {
            Phase::Idle => None,
            Phase::InProgress(session) | Phase::Resting { session, .. } => Some(session),
        }
    }

    fn session_mut(&mut self) -> Option<&mut ActiveSession> {
        match self {
            Phase::Idle => None,
            Phase::InProgress(session) | Phase::Resting { session, .. } => Some(session),
        }
    }
}

/// A session that ran through every set
#[derive(Clone, Debug, PartialEq)]
pub struct FinishedSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub exercise_names: Vec<String>,
    pub sets: u32,
}

/// Outcome of leaving a rest period
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    NextExercise { index: usize },
    NextSet { set: u32 },
    Completed(FinishedSession),
}

/// Progression through one plan
#[derive(Clone, Debug)]
pub struct Progression {
    plan: WorkoutPlan,
    total_sets: u32,
    phase: Phase,
}

impl Progression {
    pub fn new(plan: WorkoutPlan, total_sets: u32) -> Self {
        Self {
            plan,
            total_sets: total_sets.max(1),
            phase: Phase::Idle,
        }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn total_sets(&self) -> u32 {
        self.total_sets
    }

    /// Swap in a new plan; only allowed between sessions
    pub fn replace_plan(&mut self, plan: WorkoutPlan, total_sets: u32) -> Result<()> {
        if self.is_active() {
            return Err(Error::SessionActive);
        }
        self.plan = plan;
        self.total_sets = total_sets.max(1);
        Ok(())
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase.name()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    pub fn is_resting(&self) -> bool {
        matches!(self.phase, Phase::Resting { .. })
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.phase.session()
    }

    pub fn current_set(&self) -> u32 {
        self.session().map_or(1, |s| s.current_set)
    }

    pub fn current_exercise_index(&self) -> usize {
        self.session().map_or(0, |s| s.current_exercise)
    }

    pub fn current_exercise(&self) -> Option<&ExercisePlanEntry> {
        self.session()
            .and_then(|s| self.plan.get(s.current_exercise))
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.session().map_or(0, |s| s.elapsed_seconds)
    }

    pub fn instructions_visible(&self) -> bool {
        self.session().is_some_and(|s| s.instructions_visible)
    }

    /// Rest display state; `configured` is what a hidden timer resets to
    pub fn rest_state(&self, configured: RestDuration) -> RestState {
        match &self.phase {
            Phase::Resting { countdown, .. } => countdown.state(),
            _ => rest::hidden_state(configured),
        }
    }

    /// Share of the session already behind the user, in percent
    ///
    /// Counts exercises before the current one, so it never reaches 100
    /// while a session is running.
    pub fn progress_percentage(&self) -> f64 {
        let len = self.plan.len();
        if len == 0 {
            return 0.0;
        }
        let done = (self.current_set() as usize - 1) * len + self.current_exercise_index();
        let total = len * self.total_sets as usize;
        done as f64 / total as f64 * 100.0
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.is_active() {
            return Err(self.invalid("start"));
        }
        if self.plan.is_empty() {
            return Err(Error::EmptyPlan(self.plan.day().to_string()));
        }

        self.plan.reset_completion();
        let session = ActiveSession::begin(now);
        tracing::info!(
            session = %session.id,
            "Started {} workout: {} exercises x {} sets",
            self.plan.day(),
            self.plan.len(),
            self.total_sets
        );
        self.phase = Phase::InProgress(session);
        Ok(())
    }

    /// Mark the current exercise done and begin resting
    pub fn complete_current_exercise(&mut self, rest: RestDuration) -> Result<()> {
        let session = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::InProgress(session) => session,
            other => {
                self.phase = other;
                return Err(self.invalid("complete an exercise"));
            }
        };

        self.plan.mark_completed(session.current_exercise);
        tracing::debug!(
            session = %session.id,
            "Completed exercise {} of set {}, resting {}s",
            session.current_exercise + 1,
            session.current_set,
            rest.seconds()
        );
        self.phase = Phase::Resting {
            session,
            countdown: RestCountdown::start(rest),
        };
        Ok(())
    }

    /// Leave the rest period and move to the next exercise, the next set,
    /// or the end of the session
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance> {
        let mut session = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Resting { session, .. } => session,
            other => {
                self.phase = other;
                return Err(self.invalid("advance"));
            }
        };

        session.instructions_visible = false;
        session.elapsed_seconds = elapsed_seconds(session.started_at, now);

        if session.current_exercise + 1 < self.plan.len() {
            session.current_exercise += 1;
            let index = session.current_exercise;
            self.phase = Phase::InProgress(session);
            return Ok(Advance::NextExercise { index });
        }

        if session.current_set < self.total_sets {
            session.current_set += 1;
            session.current_exercise = 0;
            self.plan.reset_completion();
            let set = session.current_set;
            tracing::debug!(session = %session.id, "Starting set {}", set);
            self.phase = Phase::InProgress(session);
            return Ok(Advance::NextSet { set });
        }

        let finished = FinishedSession {
            id: session.id,
            started_at: session.started_at,
            finished_at: now,
            duration_seconds: session.elapsed_seconds,
            exercise_names: self.plan.exercise_names(),
            sets: self.total_sets,
        };
        tracing::info!(
            session = %finished.id,
            "Finished workout in {}s",
            finished.duration_seconds
        );
        Ok(Advance::Completed(finished))
    }

    /// Skip the remainder of the rest period
    pub fn skip_rest(&mut self, now: DateTime<Utc>) -> Result<Advance> {
        if !self.is_resting() {
            return Err(self.invalid("skip rest"));
        }
        self.advance(now)
    }

    /// One-second heartbeat: refresh the session clock, then count down rest
    ///
    /// Returns the advance triggered by the countdown expiring, if any. Does
    /// nothing while idle.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Option<Advance>> {
        let Some(session) = self.phase.session_mut() else {
            return Ok(None);
        };
        session.elapsed_seconds = elapsed_seconds(session.started_at, now);

        let expired = match &mut self.phase {
            Phase::Resting { countdown, .. } => countdown.tick() == RestTick::Expired,
            _ => false,
        };

        if expired {
            self.advance(now).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Abandon the session without recording it
    ///
    /// Returns whether a session was running. Idle stays idle.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => false,
            active => {
                if let Some(session) = active.session() {
                    tracing::info!(session = %session.id, "Cancelled workout");
                }
                self.plan.reset_completion();
                true
            }
        }
    }

    pub fn toggle_instructions(&mut self) -> Result<bool> {
        if let Some(session) = self.phase.session_mut() {
            session.instructions_visible = !session.instructions_visible;
            return Ok(session.instructions_visible);
        }
        Err(self.invalid("show instructions"))
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }
}
