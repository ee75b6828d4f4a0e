use clap::{Args, Parser, Subcommand};
use dumbbell_core::generator::generate_for_label;
use dumbbell_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(name = "dumbbell")]
#[command(about = "Dumbbell workout planner and session tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the generated plan for a day (default)
    Plan {
        #[command(flatten)]
        plan: PlanArgs,

        /// Include instructions for each exercise
        #[arg(long)]
        instructions: bool,
    },

    /// Run a workout session
    Start {
        #[command(flatten)]
        plan: PlanArgs,

        /// Rest between exercises in seconds (15, 30, 45, 60 or 90)
        #[arg(long)]
        rest: Option<u32>,

        /// Complete every exercise and skip every rest without waiting for input
        #[arg(long)]
        auto_complete: bool,
    },

    /// List completed workouts
    History {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the exercise library by muscle group
    Library {
        /// Muscle group to list (chest, back, shoulders, arms, legs, core)
        group: Option<String>,
    },
}

#[derive(Args, Clone, Default)]
struct PlanArgs {
    /// Day to plan for (defaults to today)
    #[arg(long)]
    day: Option<String>,

    /// Base dumbbell weight in pounds
    #[arg(long)]
    weight: Option<String>,

    /// Beginner, Intermediate, Advanced or Expert
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Low, Moderate or High
    #[arg(long)]
    intensity: Option<Intensity>,
}

fn main() -> Result<()> {
    dumbbell_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Plan { plan, instructions }) => cmd_plan(&plan, instructions, &config),
        Some(Commands::Start {
            plan,
            rest,
            auto_complete,
        }) => cmd_start(&plan, rest, auto_complete, data_dir, &config),
        Some(Commands::History { json }) => cmd_history(data_dir, json),
        Some(Commands::Library { group }) => cmd_library(group),
        None => cmd_plan(&PlanArgs::default(), false, &config),
    }
}

/// Merge config defaults with command-line overrides
///
/// The day is left to the caller, which decides how to treat unknown labels.
fn resolve_settings(args: &PlanArgs, config: &Config) -> Result<Settings> {
    let mut settings = config.workout.settings()?;

    if let Some(ref input) = args.weight {
        settings.base_weight = coerce_base_weight(input, settings.base_weight);
    }
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(intensity) = args.intensity {
        settings.intensity = intensity;
    }

    Ok(settings)
}

/// The built-in catalog, refused if its tables are inconsistent
fn load_catalog() -> Result<&'static Catalog> {
    let catalog = get_default_catalog();
    catalog.ensure_valid()?;
    Ok(catalog)
}

fn cmd_plan(args: &PlanArgs, instructions: bool, config: &Config) -> Result<()> {
    let settings = resolve_settings(args, config)?;
    let catalog = load_catalog()?;

    let (day_label, entries) = match args.day {
        Some(ref label) => (
            label.clone(),
            generate_for_label(
                catalog,
                label,
                settings.base_weight,
                settings.difficulty,
                settings.intensity,
                settings.sets,
            ),
        ),
        None => (
            settings.day.to_string(),
            generate(catalog, &PlanRequest::from(&settings)).into_entries(),
        ),
    };

    if entries.is_empty() {
        println!("No exercises scheduled for '{}'.", day_label);
        return Ok(());
    }

    println!(
        "\n{} workout ({}, {} intensity, base {} lbs)",
        day_label, settings.difficulty, settings.intensity, settings.base_weight
    );
    println!();
    for (i, entry) in entries.iter().enumerate() {
        print_entry(i, entry);
        if instructions {
            if let Some(text) = catalog.instructions_for(&entry.name) {
                println!("     {}", text);
            }
        }
    }
    println!();
    Ok(())
}

fn cmd_start(
    args: &PlanArgs,
    rest: Option<u32>,
    auto_complete: bool,
    data_dir: PathBuf,
    config: &Config,
) -> Result<()> {
    let mut settings = resolve_settings(args, config)?;
    if let Some(ref label) = args.day {
        settings.day = label.parse()?;
    }
    if let Some(seconds) = rest {
        settings.rest_duration = RestDuration::new(seconds)?;
    }

    let store = FileStore::new(&data_dir);
    let history_path = store.path_for(HISTORY_KEY);
    let mut workout = Workout::with_catalog(load_catalog()?, settings, store, SystemClock);

    if workout.plan().is_empty() {
        println!("No exercises scheduled for {}; nothing to start.", workout.plan().day());
    }
    workout.start()?;

    println!(
        "\n{} workout: {} exercises x {} sets, {}s rest",
        workout.plan().day(),
        workout.plan().len(),
        workout.settings().sets,
        workout.settings().rest_duration.seconds()
    );

    let summary = if auto_complete {
        run_auto(&mut workout)?
    } else {
        run_interactive(&mut workout)?
    };

    match summary {
        Some(summary) => print_summary(&summary, &history_path),
        None => println!("\nWorkout cancelled. Nothing was recorded."),
    }
    Ok(())
}

fn run_auto<S: KeyValueStore>(
    workout: &mut Workout<S, SystemClock>,
) -> Result<Option<SessionSummary>> {
    loop {
        workout.complete_current_exercise()?;
        if let Step::Completed(summary) = workout.skip_rest()? {
            return Ok(Some(summary));
        }
    }
}

fn run_interactive<S: KeyValueStore>(
    workout: &mut Workout<S, SystemClock>,
) -> Result<Option<SessionSummary>> {
    let input = spawn_input_reader();
    let mut schedule = TickSchedule::starting_at(Instant::now());
    let mut prompt = true;

    loop {
        if prompt {
            if workout.is_resting() {
                println!("Rest. Enter or 's' to skip, 'q' to quit.");
            } else {
                print_current(workout)?;
            }
            prompt = false;
        }

        let line = match input.recv_timeout(schedule.wait(Instant::now())) {
            Ok(line) => line,
            Err(RecvTimeoutError::Timeout) => {
                schedule.advance();
                match workout.tick()? {
                    Tick::Resting { remaining_seconds } => {
                        print!("\r  {} ", format_time(remaining_seconds as u64));
                        io::stdout().flush()?;
                    }
                    Tick::Advanced(_) => {
                        println!();
                        prompt = true;
                    }
                    Tick::Completed(summary) => {
                        println!();
                        return Ok(Some(summary));
                    }
                    Tick::Working { .. } | Tick::Idle => {}
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => {
                workout.cancel();
                return Ok(None);
            }
        };

        match (workout.is_resting(), line.trim().to_lowercase().as_str()) {
            (_, "q") => {
                if confirm_cancel(&input)? {
                    workout.cancel();
                    return Ok(None);
                }
                prompt = true;
            }
            (false, "") => {
                workout.complete_current_exercise()?;
                // The countdown gets a full second before its first decrement
                schedule.restart(Instant::now());
                prompt = true;
            }
            (false, "i") => {
                workout.toggle_instructions()?;
                prompt = true;
            }
            (true, "" | "s") => {
                println!();
                if let Step::Completed(summary) = workout.skip_rest()? {
                    return Ok(Some(summary));
                }
                prompt = true;
            }
            (resting, other) => {
                tracing::debug!("Ignoring input '{}'", other);
                if !resting {
                    println!("Enter = done, 'i' = instructions, 'q' = quit");
                }
            }
        }
    }
}

/// Deadline of the next one-second tick
struct TickSchedule {
    next: Instant,
}

impl TickSchedule {
    fn starting_at(now: Instant) -> Self {
        Self { next: now + TICK }
    }

    /// Time left before the next tick is due
    fn wait(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    fn advance(&mut self) {
        self.next += TICK;
    }

    /// Count whole seconds from `now` instead of the old schedule
    fn restart(&mut self, now: Instant) {
        self.next = now + TICK;
    }
}

/// Forward stdin lines to the session loop; the channel closes on EOF
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn confirm_cancel(input: &Receiver<String>) -> Result<bool> {
    print!("Cancel this workout? Progress will not be saved. [y/N] ");
    io::stdout().flush()?;
    Ok(input
        .recv()
        .map(|answer| answer.trim().eq_ignore_ascii_case("y"))
        .unwrap_or(true))
}

fn cmd_history(data_dir: PathBuf, json: bool) -> Result<()> {
    let recorder = HistoryRecorder::new(FileStore::new(&data_dir));
    let records = recorder.load();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    println!("\n{} workouts recorded\n", records.len());
    for record in records.iter().rev() {
        println!(
            "  {}  {:<9}  {:<12}  {}",
            record.date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            record.day,
            record.difficulty,
            format_time(record.duration_seconds)
        );
        println!("      {}", record.exercise_names.join(", "));
    }
    println!();
    Ok(())
}

fn cmd_library(group: Option<String>) -> Result<()> {
    let catalog = load_catalog()?;

    let Some(name) = group else {
        println!("\nMuscle groups:\n");
        for group in MuscleGroup::ALL {
            println!(
                "  {:<10} {} exercises",
                group,
                catalog.library_group(group).len()
            );
        }
        println!();
        return Ok(());
    };

    let group = MuscleGroup::parse(&name)
        .ok_or_else(|| Error::InvalidSetting(format!("unknown muscle group '{}'", name)))?;

    println!("\n{}\n", group);
    for exercise in catalog.library_group(group) {
        println!("  {} ({} reps)", exercise.name, exercise.reps);
        println!("     Muscles: {}", exercise.muscles);
        println!("     {}", exercise.instructions);
    }
    println!();
    Ok(())
}

fn print_entry(index: usize, entry: &ExercisePlanEntry) {
    println!(
        "  {}. {:<26} {} x {:<4} {:<11} {}",
        index + 1,
        entry.name,
        entry.sets_planned,
        entry.reps.to_string(),
        entry.load.to_string(),
        entry.muscle_group
    );
}

fn print_current<S: KeyValueStore>(workout: &Workout<S, SystemClock>) -> Result<()> {
    let progression = workout.progression();
    let Some(entry) = workout.current_exercise() else {
        return Ok(());
    };

    println!("─────────────────────────────────────────");
    println!(
        "Set {}/{}  Exercise {}/{}  {:.0}% done  {}",
        progression.current_set(),
        progression.total_sets(),
        progression.current_exercise_index() + 1,
        workout.plan().len(),
        workout.progress_percentage(),
        format_time(workout.elapsed_seconds())
    );
    println!("  → {}: {} reps @ {}", entry.name, entry.reps, entry.load);
    if let Some(text) = workout.visible_instructions() {
        println!("  ℹ {}", text);
    }
    print!("Enter when done, 'i' for instructions, 'q' to quit > ");
    io::stdout().flush()?;
    Ok(())
}

fn print_summary(summary: &SessionSummary, history_path: &Path) {
    println!("\n✓ Workout complete!");
    println!("  Exercises: {}", summary.exercise_count);
    println!("  Sets: {}", summary.set_count);
    println!("  Duration: {}", format_time(summary.duration_seconds));
    println!("  Estimated energy: ~{} kcal", summary.estimated_calories);
    println!("  History: {}", history_path.display());
}

fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
