//! Core domain types for the dumbbell workout planner.
//!
//! This module defines the fundamental types used throughout the system:
//! - Training days, difficulty and intensity labels
//! - Plan entries (reps, load) and the workout plan itself
//! - History records and session summaries
//! - User-adjustable settings

use crate::{Error, Result};
use chrono::{DateTime, Datelike, Local, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Settings Labels
// ============================================================================

/// Day of the week a programme is attached to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TrainingDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl TrainingDay {
    pub const ALL: [TrainingDay; 7] = [
        TrainingDay::Monday,
        TrainingDay::Tuesday,
        TrainingDay::Wednesday,
        TrainingDay::Thursday,
        TrainingDay::Friday,
        TrainingDay::Saturday,
        TrainingDay::Sunday,
    ];

    /// The training day matching the local calendar date
    pub fn today() -> Self {
        Self::from(Local::now().weekday())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingDay::Monday => "Monday",
            TrainingDay::Tuesday => "Tuesday",
            TrainingDay::Wednesday => "Wednesday",
            TrainingDay::Thursday => "Thursday",
            TrainingDay::Friday => "Friday",
            TrainingDay::Saturday => "Saturday",
            TrainingDay::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for TrainingDay {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => TrainingDay::Monday,
            Weekday::Tue => TrainingDay::Tuesday,
            Weekday::Wed => TrainingDay::Wednesday,
            Weekday::Thu => TrainingDay::Thursday,
            Weekday::Fri => TrainingDay::Friday,
            Weekday::Sat => TrainingDay::Saturday,
            Weekday::Sun => TrainingDay::Sunday,
        }
    }
}

impl fmt::Display for TrainingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TrainingDay::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| Error::InvalidSetting(format!("unknown day '{}'", s)))
    }
}

/// Difficulty label, applied multiplicatively to weights
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Weight modifier for this difficulty
    pub fn modifier(&self) -> f64 {
        match self {
            Difficulty::Beginner => 0.8,
            Difficulty::Intermediate => 1.0,
            Difficulty::Advanced => 1.2,
            Difficulty::Expert => 1.4,
        }
    }

    /// Metabolic equivalent used for the energy estimate
    pub fn met(&self) -> f64 {
        match self {
            Difficulty::Beginner => 3.5,
            Difficulty::Intermediate => 5.0,
            Difficulty::Advanced => 6.0,
            Difficulty::Expert => 7.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSetting(format!("unknown difficulty '{}'", s)))
    }
}

/// Session intensity, scaling both reps and load
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Moderate, Intensity::High];

    pub fn multiplier(&self) -> f64 {
        match self {
            Intensity::Low => 0.8,
            Intensity::Moderate => 1.0,
            Intensity::High => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Moderate => "Moderate",
            Intensity::High => "High",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Intensity::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidSetting(format!("unknown intensity '{}'", s)))
    }
}

/// Rest period between exercises, restricted to a small set of choices
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u32", into = "u32")]
pub struct RestDuration(u32);

impl RestDuration {
    pub const CHOICES: [u32; 5] = [15, 30, 45, 60, 90];

    pub fn new(seconds: u32) -> Result<Self> {
        if Self::CHOICES.contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(Error::InvalidSetting(format!(
                "rest duration must be one of {:?} seconds, got {}",
                Self::CHOICES,
                seconds
            )))
        }
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }
}

impl Default for RestDuration {
    fn default() -> Self {
        Self(60)
    }
}

impl TryFrom<u32> for RestDuration {
    type Error = Error;

    fn try_from(seconds: u32) -> Result<Self> {
        Self::new(seconds)
    }
}

impl From<RestDuration> for u32 {
    fn from(rest: RestDuration) -> u32 {
        rest.0
    }
}

// ============================================================================
// Plan Types
// ============================================================================

/// Rep target for one set of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepTarget {
    Count(u32),
    /// Time-based or recovery work with no rep count
    NotApplicable,
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Load carried during an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Load {
    Weight { pounds: u32 },
    Bodyweight,
}

impl Load {
    pub fn is_bodyweight(&self) -> bool {
        matches!(self, Load::Bodyweight)
    }
}

impl fmt::Display for Load {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Load::Weight { pounds } => write!(f, "{} lbs", pounds),
            Load::Bodyweight => f.write_str("Bodyweight"),
        }
    }
}

/// One exercise's parameters for the current session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExercisePlanEntry {
    pub name: String,
    pub muscle_group: String,
    pub sets_planned: u32,
    pub reps: RepTarget,
    pub load: Load,
    pub completed: bool,
}

/// Ordered exercises generated for one day
///
/// Entries are fixed for the lifetime of a session; only the `completed`
/// flags change, and only through the progression state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutPlan {
    day: TrainingDay,
    entries: Vec<ExercisePlanEntry>,
}

impl WorkoutPlan {
    pub fn new(day: TrainingDay, entries: Vec<ExercisePlanEntry>) -> Self {
        Self { day, entries }
    }

    pub fn empty(day: TrainingDay) -> Self {
        Self::new(day, Vec::new())
    }

    pub fn day(&self) -> TrainingDay {
        self.day
    }

    pub fn entries(&self) -> &[ExercisePlanEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ExercisePlanEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ExercisePlanEntry> {
        self.entries
    }

    pub fn exercise_names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub(crate) fn reset_completion(&mut self) {
        for entry in &mut self.entries {
            entry.completed = false;
        }
    }

    pub(crate) fn mark_completed(&mut self, index: usize) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.completed = true;
        }
    }
}

// ============================================================================
// History Types
// ============================================================================

/// Persisted summary of one completed session
///
/// Field names on disk follow the long-standing `workoutHistory` blob layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub day: TrainingDay,
    #[serde(rename = "exercises")]
    pub exercise_names: Vec<String>,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    pub difficulty: Difficulty,
}

/// What the user sees when a session finishes
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub exercise_count: usize,
    pub set_count: u32,
    pub duration_seconds: u64,
    pub estimated_calories: u32,
    pub record: HistoryRecord,
}

/// Visible state of the rest countdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestState {
    pub showing: bool,
    pub remaining_seconds: u32,
}

// ============================================================================
// Settings
// ============================================================================

/// Runtime-adjustable workout settings
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub day: TrainingDay,
    pub base_weight: u32,
    pub difficulty: Difficulty,
    pub intensity: Intensity,
    pub rest_duration: RestDuration,
    pub sets: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day: TrainingDay::today(),
            base_weight: 20,
            difficulty: Difficulty::Intermediate,
            intensity: Intensity::Moderate,
            rest_duration: RestDuration::default(),
            sets: 4,
        }
    }
}

/// Heaviest base weight accepted, in pounds
pub const MAX_BASE_WEIGHT: u32 = 500;

/// Whether `weight` is a usable base weight
pub fn is_valid_base_weight(weight: u32) -> bool {
    (1..=MAX_BASE_WEIGHT).contains(&weight)
}

/// Parse user-entered weight, keeping `previous` for anything that is not a
/// whole number between 1 and `MAX_BASE_WEIGHT`
pub fn coerce_base_weight(input: &str, previous: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(weight) if is_valid_base_weight(weight) => weight,
        _ => {
            tracing::warn!(
                "Ignoring invalid base weight '{}', keeping {}",
                input,
                previous
            );
            previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parsing_is_case_insensitive() {
        assert_eq!("monday".parse::<TrainingDay>().unwrap(), TrainingDay::Monday);
        assert_eq!(" SUNDAY ".parse::<TrainingDay>().unwrap(), TrainingDay::Sunday);
        assert_eq!("wed".parse::<TrainingDay>().unwrap(), TrainingDay::Wednesday);
        assert!("Funday".parse::<TrainingDay>().is_err());
    }

    #[test]
    fn test_rest_duration_choices() {
        for secs in RestDuration::CHOICES {
            assert_eq!(RestDuration::new(secs).unwrap().seconds(), secs);
        }
        assert!(RestDuration::new(20).is_err());
        assert_eq!(RestDuration::default().seconds(), 60);
    }

    #[test]
    fn test_load_and_reps_display() {
        assert_eq!(Load::Weight { pounds: 25 }.to_string(), "25 lbs");
        assert_eq!(Load::Bodyweight.to_string(), "Bodyweight");
        assert_eq!(RepTarget::Count(10).to_string(), "10");
        assert_eq!(RepTarget::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_coerce_base_weight() {
        assert_eq!(coerce_base_weight("35", 20), 35);
        assert_eq!(coerce_base_weight("abc", 20), 20);
        assert_eq!(coerce_base_weight("", 25), 25);
        assert_eq!(coerce_base_weight("0", 25), 25);
        assert_eq!(coerce_base_weight("-5", 25), 25);
    }

    #[test]
    fn test_coerce_base_weight_rejects_huge_values() {
        assert_eq!(coerce_base_weight("500", 20), 500);
        assert_eq!(coerce_base_weight("501", 20), 20);
        assert_eq!(coerce_base_weight("4294967295", 20), 20);
        assert_eq!(coerce_base_weight("99999999999", 20), 20);
    }

    #[test]
    fn test_history_record_uses_stored_field_names() {
        let json = r#"{
            "date": "2024-03-04T10:15:00.000Z",
            "day": "Monday",
            "exercises": ["Bicep Curls", "Hammer Curls"],
            "duration": 1234,
            "difficulty": "Advanced"
        }"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.day, TrainingDay::Monday);
        assert_eq!(record.exercise_names.len(), 2);
        assert_eq!(record.duration_seconds, 1234);
        assert_eq!(record.difficulty, Difficulty::Advanced);
    }

    #[test]
    fn test_difficulty_modifiers_increase() {
        let modifiers: Vec<f64> = Difficulty::ALL.iter().map(|d| d.modifier()).collect();
        assert!(modifiers.windows(2).all(|w| w[0] < w[1]));
    }
}
