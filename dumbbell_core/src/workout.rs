//! Application state for one user's workout planner.
//!
//! `Workout` owns everything a front end needs: the settings, the plan they
//! generate, the progression state machine, the history recorder and the
//! clock. Its only external dependency is the key-value store behind the
//! history recorder.

use crate::catalog::{get_default_catalog, Catalog};
use crate::clock::Clock;
use crate::generator::{generate, PlanRequest};
use crate::history::HistoryRecorder;
use crate::progression::{Advance, FinishedSession, Progression};
use crate::storage::KeyValueStore;
use crate::types::{coerce_base_weight, is_valid_base_weight, MAX_BASE_WEIGHT};
use crate::{
    Difficulty, Error, ExercisePlanEntry, HistoryRecord, Intensity, RestDuration, RestState,
    Result, SessionSummary, Settings, TrainingDay, WorkoutPlan,
};
use chrono::{DateTime, Utc};

/// Body mass assumed for the energy estimate
const ASSUMED_BODY_MASS_KG: f64 = 70.0;

/// What a one-second tick did
#[derive(Clone, Debug, PartialEq)]
pub enum Tick {
    Idle,
    Working { elapsed_seconds: u64 },
    Resting { remaining_seconds: u32 },
    Advanced(Advance),
    Completed(SessionSummary),
}

/// What leaving a rest period did
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    NextExercise { index: usize },
    NextSet { set: u32 },
    Completed(SessionSummary),
}

/// Approximate kilocalories burned
///
/// Cosmetic figure: MET for the difficulty, scaled by intensity, times an
/// assumed body mass and the duration in hours.
pub fn estimate_calories(
    duration_seconds: u64,
    difficulty: Difficulty,
    intensity: Intensity,
) -> u32 {
    let hours = duration_seconds as f64 / 3600.0;
    (difficulty.met() * intensity.multiplier() * ASSUMED_BODY_MASS_KG * hours).round() as u32
}

/// The planner's application state
pub struct Workout<S, C> {
    catalog: &'static Catalog,
    settings: Settings,
    progression: Progression,
    recorder: HistoryRecorder<S>,
    history: Vec<HistoryRecord>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Workout<S, C> {
    /// Build the state with the default catalog, loading history from `store`
    pub fn new(settings: Settings, store: S, clock: C) -> Self {
        Self::with_catalog(get_default_catalog(), settings, store, clock)
    }

    pub fn with_catalog(
        catalog: &'static Catalog,
        settings: Settings,
        store: S,
        clock: C,
    ) -> Self {
        let recorder = HistoryRecorder::new(store);
        let history = recorder.load();
        let plan = generate(catalog, &PlanRequest::from(&settings));
        let progression = Progression::new(plan, settings.sets);

        Self {
            catalog,
            settings,
            progression,
            recorder,
            history,
            clock,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn plan(&self) -> &WorkoutPlan {
        self.progression.plan()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    pub fn store(&self) -> &S {
        self.recorder.store()
    }

    pub fn is_active(&self) -> bool {
        self.progression.is_active()
    }

    pub fn is_resting(&self) -> bool {
        self.progression.is_resting()
    }

    pub fn current_exercise(&self) -> Option<&ExercisePlanEntry> {
        self.progression.current_exercise()
    }

    /// Instructions for the current exercise, when the user asked for them
    pub fn visible_instructions(&self) -> Option<&str> {
        if !self.progression.instructions_visible() {
            return None;
        }
        self.current_exercise()
            .and_then(|e| self.catalog.instructions_for(&e.name))
    }

    pub fn progress_percentage(&self) -> f64 {
        self.progression.progress_percentage()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.progression.elapsed_seconds()
    }

    pub fn rest_state(&self) -> RestState {
        self.progression.rest_state(self.settings.rest_duration)
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn set_day(&mut self, day: TrainingDay) -> Result<()> {
        self.update_plan_settings(|s| s.day = day)
    }

    pub fn set_base_weight(&mut self, base_weight: u32) -> Result<()> {
        if !is_valid_base_weight(base_weight) {
            return Err(Error::InvalidSetting(format!(
                "base weight must be between 1 and {} lbs",
                MAX_BASE_WEIGHT
            )));
        }
        self.update_plan_settings(|s| s.base_weight = base_weight)
    }

    /// Apply free-form weight input; anything unusable keeps the current weight
    pub fn set_base_weight_input(&mut self, input: &str) -> Result<u32> {
        let weight = coerce_base_weight(input, self.settings.base_weight);
        self.set_base_weight(weight)?;
        Ok(weight)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.update_plan_settings(|s| s.difficulty = difficulty)
    }

    pub fn set_intensity(&mut self, intensity: Intensity) -> Result<()> {
        self.update_plan_settings(|s| s.intensity = intensity)
    }

    /// Takes effect from the next rest period; a running countdown keeps its length
    pub fn set_rest_duration(&mut self, rest: RestDuration) {
        self.settings.rest_duration = rest;
    }

    fn update_plan_settings(&mut self, change: impl FnOnce(&mut Settings)) -> Result<()> {
        if self.is_active() {
            return Err(Error::SessionActive);
        }
        change(&mut self.settings);
        let plan = generate(self.catalog, &PlanRequest::from(&self.settings));
        self.progression.replace_plan(plan, self.settings.sets)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    pub fn start(&mut self) -> Result<()> {
        self.progression.start(self.clock.now())
    }

    pub fn complete_current_exercise(&mut self) -> Result<()> {
        self.progression
            .complete_current_exercise(self.settings.rest_duration)
    }

    pub fn skip_rest(&mut self) -> Result<Step> {
        let now = self.clock.now();
        let advance = self.progression.skip_rest(now)?;
        self.settle(advance, now)
    }

    /// One-second heartbeat from the driver
    pub fn tick(&mut self) -> Result<Tick> {
        let now = self.clock.now();
        match self.progression.tick(now)? {
            Some(advance) => match self.settle(advance, now)? {
                Step::Completed(summary) => Ok(Tick::Completed(summary)),
                Step::NextExercise { index } => {
                    Ok(Tick::Advanced(Advance::NextExercise { index }))
                }
                Step::NextSet { set } => Ok(Tick::Advanced(Advance::NextSet { set })),
            },
            None if self.is_resting() => Ok(Tick::Resting {
                remaining_seconds: self.rest_state().remaining_seconds,
            }),
            None if self.is_active() => Ok(Tick::Working {
                elapsed_seconds: self.elapsed_seconds(),
            }),
            None => Ok(Tick::Idle),
        }
    }

    /// Abandon the running session; nothing is recorded
    pub fn cancel(&mut self) -> bool {
        self.progression.cancel()
    }

    pub fn toggle_instructions(&mut self) -> Result<bool> {
        self.progression.toggle_instructions()
    }

    fn settle(&mut self, advance: Advance, now: DateTime<Utc>) -> Result<Step> {
        match advance {
            Advance::NextExercise { index } => Ok(Step::NextExercise { index }),
            Advance::NextSet { set } => Ok(Step::NextSet { set }),
            Advance::Completed(finished) => self.finalize(finished, now).map(Step::Completed),
        }
    }

    fn finalize(
        &mut self,
        finished: FinishedSession,
        now: DateTime<Utc>,
    ) -> Result<SessionSummary> {
        let record = HistoryRecord {
            date: now,
            day: self.plan().day(),
            exercise_names: finished.exercise_names.clone(),
            duration_seconds: finished.duration_seconds,
            difficulty: self.settings.difficulty,
        };

        self.history = self.recorder.append(record.clone())?;

        Ok(SessionSummary {
            exercise_count: finished.exercise_names.len(),
            set_count: finished.sets,
            duration_seconds: finished.duration_seconds,
            estimated_calories: estimate_calories(
                finished.duration_seconds,
                self.settings.difficulty,
                self.settings.intensity,
            ),
            record,
        })
    }
}
