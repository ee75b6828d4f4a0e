//! Default catalog of exercises, day programmes and the exercise library.
//!
//! This module provides the built-in tables the generator draws from. The
//! tables are plain data; the generator decides reps and loads.

use crate::{Error, Result, TrainingDay};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Training focus of a day's programme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayFocus {
    Arms,
    Legs,
    Shoulders,
    Core,
    FullBody,
    Recovery,
}

/// An exercise that can appear in a day programme
#[derive(Clone, Debug)]
pub struct ExerciseInfo {
    pub name: String,
    pub muscle_group: String,
    pub instructions: String,
    /// Per-exercise-type load modifier (compound lifts carry more, raises less)
    pub load_factor: f64,
}

/// The fixed exercise list for one day
#[derive(Clone, Debug)]
pub struct DayProgram {
    pub focus: DayFocus,
    pub exercises: Vec<String>,
}

/// Muscle groups used to organise the browseable library
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 6] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Legs,
        MuscleGroup::Core,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.to_string().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Core => "Core",
        };
        f.write_str(name)
    }
}

/// A library entry with a suggested rep range
#[derive(Clone, Debug)]
pub struct LibraryExercise {
    pub name: String,
    pub instructions: String,
    pub reps: String,
    pub muscles: String,
}

/// The complete catalog of exercises, day programmes and library
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: HashMap<String, ExerciseInfo>,
    pub days: HashMap<TrainingDay, DayProgram>,
    pub library: BTreeMap<MuscleGroup, Vec<LibraryExercise>>,
}

impl Catalog {
    pub fn day_program(&self, day: TrainingDay) -> Option<&DayProgram> {
        self.days.get(&day)
    }

    pub fn exercise(&self, name: &str) -> Option<&ExerciseInfo> {
        self.exercises.get(name)
    }

    /// Instructions for an exercise, looked up in the programme table first
    /// and then in the library
    pub fn instructions_for(&self, name: &str) -> Option<&str> {
        self.exercises
            .get(name)
            .map(|e| e.instructions.as_str())
            .or_else(|| {
                self.library
                    .values()
                    .flatten()
                    .find(|e| e.name == name)
                    .map(|e| e.instructions.as_str())
            })
    }

    pub fn library_group(&self, group: MuscleGroup) -> &[LibraryExercise] {
        self.library.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check the catalog for internal inconsistencies
    ///
    /// Returns one message per problem; an empty list means the catalog is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for day in TrainingDay::ALL {
            let Some(program) = self.days.get(&day) else {
                errors.push(format!("Day '{}' has no programme", day));
                continue;
            };

            let mut seen = HashSet::new();
            for name in &program.exercises {
                if !self.exercises.contains_key(name) {
                    errors.push(format!(
                        "Day '{}': exercise '{}' not found in catalog",
                        day, name
                    ));
                }
                if !seen.insert(name) {
                    errors.push(format!("Day '{}': exercise '{}' listed twice", day, name));
                }
            }
        }

        for (name, info) in &self.exercises {
            if info.load_factor <= 0.0 {
                errors.push(format!(
                    "Exercise '{}': load factor {} must be positive",
                    name, info.load_factor
                ));
            }
        }

        for group in MuscleGroup::ALL {
            if self.library_group(group).is_empty() {
                errors.push(format!("Library group '{}' has no exercises", group));
            }
        }

        errors
    }

    /// Fail with `Error::CatalogValidation` if `validate` finds any problem
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        for error in &errors {
            tracing::error!("Catalog: {}", error);
        }
        Err(Error::CatalogValidation(format!(
            "{} problem(s): {}",
            errors.len(),
            errors.join("; ")
        )))
    }
}

fn exercise(
    exercises: &mut HashMap<String, ExerciseInfo>,
    name: &str,
    muscle_group: &str,
    load_factor: f64,
    instructions: &str,
) {
    exercises.insert(
        name.into(),
        ExerciseInfo {
            name: name.into(),
            muscle_group: muscle_group.into(),
            instructions: instructions.into(),
            load_factor,
        },
    );
}

fn day(focus: DayFocus, names: [&str; 4]) -> DayProgram {
    DayProgram {
        focus,
        exercises: names.iter().map(|n| n.to_string()).collect(),
    }
}

fn entry(name: &str, reps: &str, muscles: &str, instructions: &str) -> LibraryExercise {
    LibraryExercise {
        name: name.into(),
        instructions: instructions.into(),
        reps: reps.into(),
        muscles: muscles.into(),
    }
}

/// Builds the default catalog
///
/// **Note**: prefer `get_default_catalog()`, which returns a cached reference.
pub fn build_default_catalog() -> Catalog {
    let mut exercises = HashMap::new();
    let e = &mut exercises;

    // ========================================================================
    // Programme exercises
    // ========================================================================

    exercise(
        e,
        "Bicep Curls",
        "Biceps",
        1.0,
        "Stand with a dumbbell in each hand. Curl the weights while keeping your elbows close to your torso.",
    );
    exercise(
        e,
        "Hammer Curls",
        "Biceps, Forearms",
        1.0,
        "Hold the dumbbells with a neutral grip and curl upwards, keeping palms facing each other.",
    );
    exercise(
        e,
        "Concentration Curls",
        "Biceps",
        1.0,
        "Sit down and curl one dumbbell at a time with your elbow braced against your thigh.",
    );
    exercise(
        e,
        "Zottman Curls",
        "Biceps, Forearms",
        1.0,
        "Curl the dumbbells up with a standard grip, then rotate wrists at the top and lower slowly with a reverse grip.",
    );
    exercise(
        e,
        "Goblet Squats",
        "Quadriceps, Glutes, Core",
        1.5,
        "Hold one dumbbell vertically at your chest and perform a squat.",
    );
    exercise(
        e,
        "Dumbbell Lunges",
        "Quadriceps, Glutes, Hamstrings",
        1.25,
        "Hold a dumbbell in each hand and take a big step forward, lowering until both knees are at 90 degrees.",
    );
    exercise(
        e,
        "Romanian Deadlifts",
        "Hamstrings, Lower Back, Glutes",
        1.5,
        "Hold dumbbells in front and hinge at the hips, keeping your back straight and knees slightly bent.",
    );
    exercise(
        e,
        "Step-Ups",
        "Quadriceps, Glutes",
        1.0,
        "Hold dumbbells and step up onto a bench or platform, then step back down.",
    );
    exercise(
        e,
        "Dumbbell Press",
        "Chest, Shoulders, Triceps",
        1.25,
        "Lie on a bench and press dumbbells upward from chest level.",
    );
    exercise(
        e,
        "Lateral Raises",
        "Shoulders",
        0.5,
        "Raise the dumbbells out to your sides until they reach shoulder height.",
    );
    exercise(
        e,
        "Front Raises",
        "Shoulders",
        0.5,
        "Lift the dumbbells in front of you until they reach shoulder height, keeping arms straight.",
    );
    exercise(
        e,
        "Reverse Flys",
        "Rear Deltoids, Upper Back",
        0.5,
        "Bend over slightly and raise the dumbbells out to your sides while squeezing your shoulder blades.",
    );
    exercise(
        e,
        "Russian Twists",
        "Obliques, Core",
        1.0,
        "Sit and lean back slightly with your feet lifted, then twist your torso side to side.",
    );
    exercise(
        e,
        "Plank",
        "Core, Shoulders, Back",
        1.0,
        "Hold a straight line from head to heels on your forearms, engaging your core muscles.",
    );
    exercise(
        e,
        "Bicycle Crunches",
        "Abdominals, Obliques",
        1.0,
        "Lie on your back and bring one knee toward your chest while twisting the opposite elbow toward it, then switch sides.",
    );
    exercise(
        e,
        "Mountain Climbers",
        "Core, Shoulders, Hip Flexors",
        1.0,
        "From a push-up position, rapidly alternate bringing each knee toward your chest.",
    );
    exercise(
        e,
        "Incline Curls",
        "Biceps",
        1.0,
        "Sit on an incline bench and perform dumbbell curls with arms hanging down.",
    );
    exercise(
        e,
        "21s",
        "Biceps",
        1.0,
        "Perform 7 partial curls from bottom to halfway, 7 from halfway to top, then 7 full curls.",
    );
    exercise(
        e,
        "Cross-body Hammer Curls",
        "Biceps, Forearms",
        1.0,
        "Curl the dumbbell across your body towards the opposite shoulder.",
    );
    exercise(
        e,
        "Full Body Circuit",
        "Full Body",
        1.0,
        "Perform each exercise for 45 seconds with minimal rest between exercises, focusing on form and control.",
    );
    exercise(
        e,
        "Dumbbell Thrusters",
        "Shoulders, Quadriceps, Glutes",
        1.0,
        "Hold dumbbells at shoulder height, squat down, then as you stand up, press the weights overhead in one fluid motion.",
    );
    exercise(
        e,
        "Renegade Rows",
        "Back, Core, Chest",
        1.0,
        "In plank position with hands on dumbbells, row one dumbbell up while balancing on the other, then alternate.",
    );
    exercise(
        e,
        "Dumbbell Burpees",
        "Full Body, Cardiovascular",
        0.5,
        "With dumbbells in hand, perform a burpee and add a dumbbell curl and press at the top of the movement.",
    );
    exercise(
        e,
        "Active Recovery",
        "Recovery",
        1.0,
        "Light activity to promote blood flow and recovery without straining muscles.",
    );
    exercise(
        e,
        "Light Stretching",
        "Flexibility",
        1.0,
        "Gentle stretching focusing on major muscle groups to improve flexibility and reduce soreness.",
    );
    exercise(
        e,
        "Foam Rolling",
        "Myofascial Release",
        1.0,
        "Use a foam roller on tight muscles to release tension and improve recovery.",
    );
    exercise(
        e,
        "Mobility Work",
        "Joint Mobility",
        1.0,
        "Exercises focusing on joint mobility to improve range of motion and prevent injury.",
    );

    // ========================================================================
    // Day programmes
    // ========================================================================

    let mut days = HashMap::new();
    days.insert(
        TrainingDay::Monday,
        day(
            DayFocus::Arms,
            ["Bicep Curls", "Hammer Curls", "Concentration Curls", "Zottman Curls"],
        ),
    );
    days.insert(
        TrainingDay::Tuesday,
        day(
            DayFocus::Legs,
            ["Goblet Squats", "Dumbbell Lunges", "Romanian Deadlifts", "Step-Ups"],
        ),
    );
    days.insert(
        TrainingDay::Wednesday,
        day(
            DayFocus::Shoulders,
            ["Dumbbell Press", "Lateral Raises", "Front Raises", "Reverse Flys"],
        ),
    );
    days.insert(
        TrainingDay::Thursday,
        day(
            DayFocus::Core,
            ["Russian Twists", "Plank", "Bicycle Crunches", "Mountain Climbers"],
        ),
    );
    days.insert(
        TrainingDay::Friday,
        day(
            DayFocus::Arms,
            ["Bicep Curls", "Incline Curls", "21s", "Cross-body Hammer Curls"],
        ),
    );
    days.insert(
        TrainingDay::Saturday,
        day(
            DayFocus::FullBody,
            ["Full Body Circuit", "Dumbbell Thrusters", "Renegade Rows", "Dumbbell Burpees"],
        ),
    );
    days.insert(
        TrainingDay::Sunday,
        day(
            DayFocus::Recovery,
            ["Active Recovery", "Light Stretching", "Foam Rolling", "Mobility Work"],
        ),
    );

    // ========================================================================
    // Library
    // ========================================================================

    let mut library = BTreeMap::new();
    library.insert(
        MuscleGroup::Chest,
        vec![
            entry(
                "Dumbbell Bench Press",
                "8-12",
                "Chest, Shoulders, Triceps",
                "Lie on a bench with a dumbbell in each hand at chest level. Press the weights upward until your arms are extended, then lower them back to the starting position.",
            ),
            entry(
                "Dumbbell Flyes",
                "10-15",
                "Chest, Shoulders",
                "Lie on a bench with arms extended above your chest. With a slight bend in your elbows, lower the weights out to the sides in an arc, then bring them back together.",
            ),
            entry(
                "Push-Ups",
                "10-20",
                "Chest, Shoulders, Triceps, Core",
                "Start in a plank position with hands slightly wider than shoulder-width apart. Lower your body until your chest nearly touches the floor, then push back up.",
            ),
            entry(
                "Incline Dumbbell Press",
                "8-12",
                "Upper Chest, Shoulders, Triceps",
                "Lie on an incline bench with a dumbbell in each hand at chest level. Press the weights upward until your arms are extended, then lower them back down.",
            ),
        ],
    );
    library.insert(
        MuscleGroup::Back,
        vec![
            entry(
                "Dumbbell Rows",
                "8-12",
                "Upper Back, Lats, Biceps",
                "Bend at the waist with one knee and hand on a bench. Pull the weight up toward your hip, keeping your elbow close to your body, then lower it back down.",
            ),
            entry(
                "Renegade Rows",
                "8-10 per side",
                "Back, Core, Shoulders",
                "Start in a push-up position with a dumbbell in each hand. Row one dumbbell up toward your hip while balancing on the other hand, then alternate.",
            ),
            entry(
                "Pull-Ups",
                "5-10",
                "Lats, Upper Back, Biceps",
                "Hang from a bar with palms facing away from you. Pull your body up until your chin clears the bar, then lower back down with control.",
            ),
            entry(
                "Lat Pulldowns",
                "10-12",
                "Lats, Upper Back, Biceps",
                "Sit at a lat pulldown machine and grab the bar wider than shoulder-width. Pull the bar down to your chest, then slowly return.",
            ),
        ],
    );
    library.insert(
        MuscleGroup::Shoulders,
        vec![
            entry(
                "Shoulder Press",
                "8-12",
                "Shoulders, Triceps",
                "Sit or stand with a dumbbell in each hand at shoulder height. Press the weights upward until arms are fully extended, then lower them back.",
            ),
            entry(
                "Lateral Raises",
                "12-15",
                "Lateral Deltoids",
                "Stand with dumbbells at your sides. Raise the weights out to the sides until they reach shoulder height, then lower them back down.",
            ),
            entry(
                "Front Raises",
                "12-15",
                "Front Deltoids",
                "Stand with dumbbells in front of your thighs. Raise the weights straight in front of you until they reach shoulder height, then lower them.",
            ),
            entry(
                "Reverse Flyes",
                "12-15",
                "Rear Deltoids, Upper Back",
                "Bend at the waist with dumbbells hanging down. Raise the weights out to the sides, squeezing your shoulder blades together, then lower them.",
            ),
        ],
    );
    library.insert(
        MuscleGroup::Arms,
        vec![
            entry(
                "Bicep Curls",
                "10-12",
                "Biceps",
                "Stand with a dumbbell in each hand, arms extended. Curl the weights toward your shoulders while keeping your upper arms still, then lower them.",
            ),
            entry(
                "Hammer Curls",
                "10-12",
                "Biceps, Forearms",
                "Stand with a dumbbell in each hand, palms facing inward. Curl the weights toward your shoulders with palms facing each other, then lower them.",
            ),
            entry(
                "Tricep Dips",
                "10-15",
                "Triceps",
                "Sit on the edge of a bench with hands gripping the edge beside your hips. Slide off, bend your elbows to lower your body, then push back up.",
            ),
            entry(
                "Skull Crushers",
                "10-12",
                "Triceps",
                "Lie on a bench holding dumbbells above your chest. Bend your elbows to lower the weights toward your forehead, then extend your arms.",
            ),
        ],
    );
    library.insert(
        MuscleGroup::Legs,
        vec![
            entry(
                "Squats",
                "10-15",
                "Quadriceps, Glutes, Hamstrings",
                "Stand with feet shoulder-width apart holding dumbbells. Bend your knees and hips as if sitting in a chair, then push through your heels to stand.",
            ),
            entry(
                "Lunges",
                "10-12 per leg",
                "Quadriceps, Glutes, Hamstrings",
                "Step forward with one leg and lower until both knees are bent at 90 degrees. Push back up and repeat with the other leg.",
            ),
            entry(
                "Romanian Deadlifts",
                "10-12",
                "Hamstrings, Glutes, Lower Back",
                "Stand with dumbbells in front of your thighs. Hinge at your hips to lower the weights along your legs with a straight back, then stand.",
            ),
            entry(
                "Calf Raises",
                "15-20",
                "Calves",
                "Stand with dumbbells at your sides. Raise your heels by pushing through the balls of your feet, then lower back down.",
            ),
        ],
    );
    library.insert(
        MuscleGroup::Core,
        vec![
            entry(
                "Russian Twists",
                "15-20 per side",
                "Obliques, Abdominals",
                "Sit with knees bent and feet lifted slightly. Hold a dumbbell with both hands and twist to touch the weight to the floor on each side.",
            ),
            entry(
                "Plank",
                "30-60 seconds",
                "Core, Shoulders, Back",
                "Start in a push-up position, then lower onto your forearms. Keep your body in a straight line from head to heels.",
            ),
            entry(
                "Bicycle Crunches",
                "15-20 per side",
                "Abdominals, Obliques",
                "Lie on your back with hands behind your head. Bring one knee toward your chest while twisting the opposite elbow toward it, then switch.",
            ),
            entry(
                "Mountain Climbers",
                "20-30 per side",
                "Core, Shoulders, Hip Flexors",
                "Start in a push-up position. Rapidly alternate bringing each knee toward your chest, as if running in place.",
            ),
        ],
    );

    Catalog {
        exercises,
        days,
        library,
    }
}
