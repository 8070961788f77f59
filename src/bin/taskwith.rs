//! Command-line front end for the task board.
//!
//! Usage:
//!
//! ```text
//! taskwith [--database-url URL] list
//! taskwith create --title "Draft spec" --due today --status ToDo --priority High
//! taskwith move <id> InProgress
//! taskwith edit <id> --title "Draft spec v2"
//! taskwith delete <id>
//! ```
//!
//! Without a database URL (flag or `TASKWITH_DATABASE_URL`) tasks live in
//! memory for the duration of one command.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::sync::Arc;
use taskwith::board::{
    adapters::{memory::InMemoryTaskGateway, postgres::PostgresTaskGateway},
    domain::{TaskId, TaskPriority, TaskStatus},
    ports::TaskGateway,
    services::{
        LoadState, Outcome, QuickDate, SubmitOutcome, TaskCard, TaskCardView, TaskCreationForm,
        TaskListStore,
    },
};
use taskwith::config::BoardConfig;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "taskwith", version, about = "Kanban task board")]
struct Cli {
    /// `PostgreSQL` URL; overrides `TASKWITH_DATABASE_URL`.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every column.
    List,
    /// Create a task.
    Create(CreateArgs),
    /// Move a task to another column.
    Move {
        /// Task identifier.
        id: String,
        /// Target column: `ToDo`, `InProgress`, or `Completed`.
        status: TaskStatus,
    },
    /// Change a task's title and message.
    Edit {
        /// Task identifier.
        id: String,
        /// New title.
        #[arg(long)]
        title: String,
        /// New message; omit to keep the current one.
        #[arg(long)]
        message: Option<String>,
    },
    /// Delete a task.
    Delete {
        /// Task identifier.
        id: String,
    },
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Task title.
    #[arg(long)]
    title: String,
    /// Optional description.
    #[arg(long)]
    message: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    #[arg(long, conflicts_with = "due")]
    date: Option<NaiveDate>,
    /// Due date shortcut.
    #[arg(long, value_enum)]
    due: Option<DueShortcut>,
    /// Starting column.
    #[arg(long)]
    status: Option<TaskStatus>,
    /// Priority badge.
    #[arg(long)]
    priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DueShortcut {
    Today,
    Tomorrow,
    #[value(name = "3d")]
    InThreeDays,
    #[value(name = "1w")]
    InOneWeek,
}

impl From<DueShortcut> for QuickDate {
    fn from(value: DueShortcut) -> Self {
        match value {
            DueShortcut::Today => Self::Today,
            DueShortcut::Tomorrow => Self::Tomorrow,
            DueShortcut::InThreeDays => Self::InThreeDays,
            DueShortcut::InOneWeek => Self::InOneWeek,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    taskwith::telemetry::init();
    let cli = Cli::parse();

    let mut config = BoardConfig::from_env().wrap_err("read configuration")?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }

    if let Some(url) = config.database_url.as_deref() {
        let gateway = PostgresTaskGateway::connect(url, config.pool_size)
            .wrap_err("connect to PostgreSQL")?;
        run(Arc::new(gateway), cli.command).await
    } else {
        warn!("no database configured; tasks are kept in memory for this run only");
        let gateway = InMemoryTaskGateway::with_collection(&config.collection);
        run(Arc::new(gateway), cli.command).await
    }
}

async fn run<G: TaskGateway>(gateway: Arc<G>, command: Command) -> Result<()> {
    let mut store = TaskListStore::new(gateway);
    if store.load_all().await == LoadState::Failed {
        return Err(eyre!("could not load tasks; see the log for details"));
    }

    let mut out = io::stdout().lock();
    match command {
        Command::List => write_board(&mut out, &store)?,
        Command::Create(args) => create(&mut out, &mut store, args).await?,
        Command::Move { id, status } => {
            let mut card = card_for(&store, id)?;
            let outcome = card.select_status(&mut store, status).await;
            report(&mut out, card.task_id(), outcome)?;
        }
        Command::Edit { id, title, message } => {
            let mut card = card_for(&store, id)?;
            card.choose_edit(&store)?;
            card.edit_title(title)?;
            if let Some(text) = message {
                card.edit_message(text)?;
            }
            let outcome = card.save(&mut store).await?;
            report(&mut out, card.task_id(), outcome)?;
        }
        Command::Delete { id } => {
            let mut card = card_for(&store, id)?;
            let outcome = card.choose_delete(&mut store).await;
            report(&mut out, card.task_id(), outcome)?;
        }
    }
    Ok(())
}

fn card_for<G: TaskGateway>(store: &TaskListStore<G>, id: String) -> Result<TaskCard> {
    let task_id = TaskId::new(id);
    if store.get(&task_id).is_none() {
        return Err(eyre!("no task with id {task_id}"));
    }
    Ok(TaskCard::new(task_id))
}

async fn create<G: TaskGateway>(
    out: &mut impl Write,
    store: &mut TaskListStore<G>,
    args: CreateArgs,
) -> Result<()> {
    let mut form = TaskCreationForm::new(Arc::new(DefaultClock));
    form.open();
    form.set_title(args.title);
    if let Some(message) = args.message {
        form.set_message(message);
    }
    if let Some(date) = args.date {
        form.set_date(date);
    }
    if let Some(shortcut) = args.due {
        form.pick_quick_date(shortcut.into());
    }
    if let Some(status) = args.status {
        form.set_status(status);
    }
    form.set_priority(args.priority);

    match form.submit(store).await {
        SubmitOutcome::Created(id) => {
            writeln!(out, "created {id}")?;
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let messages: Vec<String> = form.errors().iter().map(ToString::to_string).collect();
            Err(eyre!(messages.join("; ")))
        }
        SubmitOutcome::Failed => Err(eyre!("the store did not accept the task")),
    }
}

fn report(out: &mut impl Write, id: &TaskId, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Applied => writeln!(out, "updated {id}")?,
        Outcome::Removed => writeln!(out, "removed {id}")?,
        Outcome::Unchanged => writeln!(out, "nothing to change for {id}")?,
        Outcome::Failed => return Err(eyre!("the store did not accept the change to {id}")),
    }
    Ok(())
}

fn write_board<G: TaskGateway>(out: &mut impl Write, store: &TaskListStore<G>) -> io::Result<()> {
    for status in TaskStatus::ALL {
        let column = store.column(status);
        writeln!(out, "{} ({})", status.label(), column.len())?;
        for task in column {
            let view = TaskCardView::from_task(task);
            let badge = view
                .priority_badge
                .map(|badge| format!(" [{badge}]"))
                .unwrap_or_default();
            writeln!(out, "  {} {}{badge}  due {}", task.id(), view.title, view.due_date)?;
            if let Some(message) = view.message {
                writeln!(out, "      {message}")?;
            }
        }
    }
    Ok(())
}
