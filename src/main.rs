//! PomoPlanner CLI - daily tasks with a Pomodoro focus timer
//!
//! A Pomodoro is one 25 minute work session followed by a 5 minute break.
//! Finishing the break credits the Pomodoro to the selected task.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tokio::sync::mpsc;

use pomoplanner::cli::{run_focus, AddArgs, Cli, Commands, Display, FocusArgs};
use pomoplanner::{
    validate_time, IntervalTicker, PlannerConfig, PomodoroEngine, SessionRunner, TaskDraft, TaskId,
    TaskStore,
};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Everything a command needs besides its own arguments.
struct AppContext {
    config: PlannerConfig,
    store: TaskStore,
}

impl AppContext {
    fn load(cli: &Cli) -> Result<Self> {
        let config = PlannerConfig::load_or_default(cli.config.as_deref())
            .context("failed to load configuration")?;

        let store = match cli.tasks.clone().or_else(|| config.tasks_path.clone()) {
            Some(path) => TaskStore::new(path),
            None => TaskStore::default_location()?,
        };
        tracing::debug!(path = %store.path().display(), "using task file");

        Ok(Self { config, store })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let command = match cli.command.clone() {
        Some(command) => command,
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    match command {
        Commands::CheckTime { time } => {
            let config = PlannerConfig::load_or_default(cli.config.as_deref())
                .context("failed to load configuration")?;
            let minutes = config.parse_mode().minutes(&time);
            Display::show_time_check(&time, validate_time(&time), minutes);
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
        Commands::Today(args) => {
            let ctx = AppContext::load(&cli)?;
            let tasks = ctx.store.load()?;
            let day = args.date.unwrap_or_else(today);
            Display::show_day(day, &tasks.for_day_sorted(day, ctx.config.parse_mode()));
        }
        Commands::Add(args) => {
            let ctx = AppContext::load(&cli)?;
            add_task(&ctx, args)?;
        }
        Commands::Complete { id } => {
            let ctx = AppContext::load(&cli)?;
            let mut tasks = ctx.store.load()?;
            let id = TaskId::from(id);
            tasks.toggle_complete(&id)?;
            ctx.store.save(&tasks)?;
            if let Some(task) = tasks.get(&id) {
                Display::show_completion(task);
            }
        }
        Commands::Stats => {
            let ctx = AppContext::load(&cli)?;
            Display::show_summary(&ctx.store.load()?.summary());
        }
        Commands::Focus(args) => {
            let ctx = AppContext::load(&cli)?;
            focus(&ctx, args).await?;
        }
    }

    Ok(())
}

fn add_task(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let mut tasks = ctx.store.load()?;
    let draft = TaskDraft::new(args.title)
        .with_time(args.time)
        .with_pomodoros(args.pomodoros);

    let task = tasks
        .add(args.date.unwrap_or_else(today), draft)?
        .clone();
    ctx.store
        .save(&tasks)
        .with_context(|| format!("failed to save {}", ctx.store.path().display()))?;

    Display::show_task_added(&task);
    Ok(())
}

async fn focus(ctx: &AppContext, args: FocusArgs) -> Result<()> {
    let tasks = ctx.store.load()?;
    let day = args.date.unwrap_or_else(today);
    let day_tasks = tasks.for_day_sorted(day, ctx.config.parse_mode());
    Display::show_day(day, &day_tasks);

    let (event_tx, mut events) = mpsc::unbounded_channel();
    let engine = PomodoroEngine::new(ctx.config.session(), IntervalTicker::every_second())
        .with_tasks(day_tasks.iter().map(|task| task.id.clone()))
        .with_events(event_tx);
    let (handle, runner) = SessionRunner::spawn(engine);

    if let Some(id) = args.task {
        let id = TaskId::from(id);
        if tasks.get(&id).is_none() {
            tracing::warn!(task_id = %id, "selected task is not in the task file");
        }
        handle.select_task(id).await?;
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let last = run_focus(&handle, &mut events, stdin).await?;
    runner.await.context("focus session task failed")?;

    Display::show_final_counts(&last);

    if args.save {
        // The file may have changed while the session ran.
        let mut tasks = ctx.store.load()?;
        let applied = tasks.apply_credits(&last.counts);
        ctx.store.save(&tasks)?;
        Display::show_credits_saved(applied, ctx.store.path());
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
