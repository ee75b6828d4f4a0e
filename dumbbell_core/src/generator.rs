//! Workout generator: turns a day and load settings into a plan.
//!
//! Each day maps to a fixed exercise list in the catalog, so the same
//! request always produces the same plan. Exercises are classified before
//! any numbers are assigned:
//! - Recovery and time-based work: bodyweight, no rep count
//! - Core-day and crunch-style work: bodyweight, fixed rep count
//! - Everything else: weighted, reps and load scaled by the settings

use crate::catalog::{Catalog, DayFocus};
use crate::{
    Difficulty, ExercisePlanEntry, Intensity, Load, RepTarget, Settings, TrainingDay, WorkoutPlan,
};

/// Reps for weighted exercises at moderate intensity
const BASE_REPS: f64 = 10.0;

/// Reps for bodyweight core work
const CORE_REPS: u32 = 15;

/// Extra pounds for exercises in even positions, so consecutive entries differ
const POSITIONAL_BONUS: u32 = 5;

const UNTIMED_PATTERNS: [&str; 5] = ["recovery", "stretch", "foam rolling", "mobility", "plank"];
const CORE_PATTERNS: [&str; 1] = ["bicycle"];

/// Inputs for a single plan
#[derive(Clone, Copy, Debug)]
pub struct PlanRequest {
    pub day: TrainingDay,
    pub base_weight: u32,
    pub difficulty: Difficulty,
    pub intensity: Intensity,
    pub sets: u32,
}

impl From<&Settings> for PlanRequest {
    fn from(settings: &Settings) -> Self {
        Self {
            day: settings.day,
            base_weight: settings.base_weight,
            difficulty: settings.difficulty,
            intensity: settings.intensity,
            sets: settings.sets,
        }
    }
}

/// How an exercise is loaded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Weighted,
    BodyweightReps,
    Untimed,
}

/// Classify an exercise by the day's focus and its name
pub fn classify(focus: DayFocus, name: &str) -> Classification {
    let lower = name.to_lowercase();

    if focus == DayFocus::Recovery || UNTIMED_PATTERNS.iter().any(|p| lower.contains(p)) {
        Classification::Untimed
    } else if focus == DayFocus::Core || CORE_PATTERNS.iter().any(|p| lower.contains(p)) {
        Classification::BodyweightReps
    } else {
        Classification::Weighted
    }
}

/// Generate the plan for a request
///
/// A day without a programme in the catalog yields an empty plan.
pub fn generate(catalog: &Catalog, request: &PlanRequest) -> WorkoutPlan {
    let Some(program) = catalog.day_program(request.day) else {
        tracing::warn!("No programme for {}, returning an empty plan", request.day);
        return WorkoutPlan::empty(request.day);
    };

    let intensity = request.intensity.multiplier();
    let difficulty = request.difficulty.modifier();

    let entries = program
        .exercises
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let info = catalog.exercise(name);
            let muscle_group = info
                .map(|i| i.muscle_group.clone())
                .unwrap_or_else(|| "General".to_string());
            let load_factor = info.map(|i| i.load_factor).unwrap_or(1.0);

            let (reps, load) = match classify(program.focus, name) {
                Classification::Untimed => (RepTarget::NotApplicable, Load::Bodyweight),
                Classification::BodyweightReps => (RepTarget::Count(CORE_REPS), Load::Bodyweight),
                Classification::Weighted => {
                    let base = if index % 2 == 0 {
                        request.base_weight.saturating_add(POSITIONAL_BONUS)
                    } else {
                        request.base_weight
                    };
                    // `as` saturates, so huge requests clamp rather than wrap
                    let pounds = (base as f64 * load_factor * difficulty * intensity).round();
                    let reps = (BASE_REPS * intensity).round();
                    (
                        RepTarget::Count(reps as u32),
                        Load::Weight {
                            pounds: pounds as u32,
                        },
                    )
                }
            };

            ExercisePlanEntry {
                name: name.clone(),
                muscle_group,
                sets_planned: request.sets,
                reps,
                load,
                completed: false,
            }
        })
        .collect();

    let plan = WorkoutPlan::new(request.day, entries);
    tracing::debug!(
        "Generated {} exercises for {} ({}, {})",
        plan.len(),
        request.day,
        request.difficulty,
        request.intensity
    );
    plan
}

/// Generate plan entries from a free-form day label
///
/// Labels that do not name a day produce an empty list rather than an error.
pub fn generate_for_label(
    catalog: &Catalog,
    day_label: &str,
    base_weight: u32,
    difficulty: Difficulty,
    intensity: Intensity,
    sets: u32,
) -> Vec<ExercisePlanEntry> {
    match day_label.parse::<TrainingDay>() {
        Ok(day) => generate(
            catalog,
            &PlanRequest {
                day,
                base_weight,
                difficulty,
                intensity,
                sets,
            },
        )
        .into_entries(),
        Err(e) => {
            tracing::warn!("{}, returning an empty plan", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build_default_catalog, get_default_catalog};
    use crate::types::MAX_BASE_WEIGHT;

    fn request(day: TrainingDay) -> PlanRequest {
        PlanRequest {
            day,
            base_weight: 20,
            difficulty: Difficulty::Intermediate,
            intensity: Intensity::Moderate,
            sets: 4,
        }
    }

    #[test]
    fn test_monday_matches_positional_loads() {
        let plan = generate(get_default_catalog(), &request(TrainingDay::Monday));

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.entries()[0].name, "Bicep Curls");
        let loads: Vec<Load> = plan.entries().iter().map(|e| e.load).collect();
        assert_eq!(
            loads,
            vec![
                Load::Weight { pounds: 25 },
                Load::Weight { pounds: 20 },
                Load::Weight { pounds: 25 },
                Load::Weight { pounds: 20 },
            ]
        );
        assert!(plan
            .entries()
            .iter()
            .all(|e| e.reps == RepTarget::Count(10) && e.sets_planned == 4 && !e.completed));
    }

    #[test]
    fn test_extreme_base_weight_does_not_overflow() {
        let mut req = request(TrainingDay::Tuesday);
        req.base_weight = u32::MAX;
        req.difficulty = Difficulty::Expert;
        req.intensity = Intensity::High;

        let plan = generate(get_default_catalog(), &req);
        assert_eq!(plan.len(), 4);
        assert!(plan
            .entries()
            .iter()
            .all(|e| e.load == Load::Weight { pounds: u32::MAX }));

        req.base_weight = MAX_BASE_WEIGHT;
        let plan = generate(get_default_catalog(), &req);
        // (500 + 5) * 1.5 * 1.4 * 1.2
        assert_eq!(plan.entries()[0].load, Load::Weight { pounds: 1273 });
    }

    #[test]
    fn test_every_day_has_four_entries_and_consistent_loads() {
        let catalog = get_default_catalog();
        for day in TrainingDay::ALL {
            let plan = generate(catalog, &request(day));
            assert_eq!(plan.len(), 4, "{}", day);

            let focus = catalog.day_program(day).unwrap().focus;
            for entry in plan.entries() {
                let weightless = classify(focus, &entry.name) != Classification::Weighted;
                assert_eq!(entry.load.is_bodyweight(), weightless, "{}", entry.name);
                if entry.reps == RepTarget::NotApplicable {
                    assert!(entry.load.is_bodyweight());
                }
            }
        }
    }

    #[test]
    fn test_recovery_day_is_untimed_bodyweight() {
        let plan = generate(get_default_catalog(), &request(TrainingDay::Sunday));
        for entry in plan.entries() {
            assert_eq!(entry.load, Load::Bodyweight);
            assert_eq!(entry.reps, RepTarget::NotApplicable);
        }
    }

    #[test]
    fn test_core_day_uses_fixed_reps_except_plank() {
        let plan = generate(get_default_catalog(), &request(TrainingDay::Thursday));
        for entry in plan.entries() {
            assert_eq!(entry.load, Load::Bodyweight);
            if entry.name == "Plank" {
                assert_eq!(entry.reps, RepTarget::NotApplicable);
            } else {
                assert_eq!(entry.reps, RepTarget::Count(15));
            }
        }
    }

    #[test]
    fn test_difficulty_and_intensity_scale_load() {
        let catalog = get_default_catalog();
        let mut req = request(TrainingDay::Monday);
        req.difficulty = Difficulty::Advanced;
        req.intensity = Intensity::High;

        let plan = generate(catalog, &req);
        // 25 * 1.2 * 1.2 = 36, 20 * 1.2 * 1.2 = 28.8
        assert_eq!(plan.entries()[0].load, Load::Weight { pounds: 36 });
        assert_eq!(plan.entries()[1].load, Load::Weight { pounds: 29 });
        assert_eq!(plan.entries()[0].reps, RepTarget::Count(12));
    }

    #[test]
    fn test_load_factor_applies_per_exercise() {
        let plan = generate(get_default_catalog(), &request(TrainingDay::Wednesday));
        // Dumbbell Press (1.25) at index 0, Lateral Raises (0.5) at index 1
        assert_eq!(plan.entries()[0].load, Load::Weight { pounds: 31 });
        assert_eq!(plan.entries()[1].load, Load::Weight { pounds: 10 });
    }

    #[test]
    fn test_generation_is_deterministic() {
        let catalog = get_default_catalog();
        let a = generate(catalog, &request(TrainingDay::Saturday));
        let b = generate(catalog, &request(TrainingDay::Saturday));
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_programme_gives_empty_plan() {
        let mut catalog = build_default_catalog();
        catalog.days.remove(&TrainingDay::Friday);

        let plan = generate(&catalog, &request(TrainingDay::Friday));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_unknown_day_label() {
        let catalog = get_default_catalog();
        let plan = generate_for_label(
            catalog,
            "Caturday",
            20,
            Difficulty::Intermediate,
            Intensity::Moderate,
            4,
        );
        assert!(plan.is_empty());

        let plan = generate_for_label(
            catalog,
            "tuesday",
            20,
            Difficulty::Intermediate,
            Intensity::Moderate,
            4,
        );
        assert_eq!(plan.len(), 4);
    }
}
