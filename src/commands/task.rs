use super::context::AppContext;
use super::parse_date;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: Option<TaskCommand>,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    #[command(about = "Show tasks in their order")]
    List,
    #[command(about = "Add a task at the end of the list")]
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_date)]
        due: Option<NaiveDate>,
    },
    #[command(about = "Change title, description or due date")]
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        #[arg(long)]
        clear_due: bool,
    },
    #[command(about = "Mark a task done, or reopen a done task")]
    Done { id: String },
    #[command(about = "Delete a task")]
    Delete {
        id: String,
        #[arg(short, long, help = "Do not ask for confirmation")]
        yes: bool,
    },
    #[command(about = "Move a task to a position (0 is the top)")]
    Move { id: String, position: usize },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    match args.command.unwrap_or(TaskCommand::List) {
        TaskCommand::List => handle_list(&ctx).await,
        TaskCommand::Add {
            title,
            description,
            due,
        } => handle_add(&ctx, &title, &description, due).await,
        TaskCommand::Edit {
            id,
            title,
            description,
            due,
            clear_due,
        } => handle_edit(&ctx, &id, title, description, due, clear_due).await,
        TaskCommand::Done { id } => handle_done(&ctx, &id).await,
        TaskCommand::Delete { id, yes } => handle_delete(&ctx, &id, yes).await,
        TaskCommand::Move { id, position } => handle_move(&ctx, &id, position).await,
    }
}

async fn handle_list(ctx: &AppContext) -> Result<()> {
    let manager = ctx.loaded_manager().await?;
    if manager.is_empty() {
        msg_info!(Message::NoTasks);
        return Ok(());
    }

    ctx.profiles().load().await?;
    msg_print!(Message::TasksHeader(ctx.session.greeting_name()), true);
    View::tasks(&manager.sorted_tasks());
    Ok(())
}

async fn handle_add(ctx: &AppContext, title: &str, description: &str, due: Option<NaiveDate>) -> Result<()> {
    // The order comes from the store, no need to load the list.
    let mut manager = ctx.manager();
    let task = manager.add_task(title, description, due).await?;
    msg_success!(Message::TaskCreated(task.title));
    Ok(())
}

async fn handle_edit(
    ctx: &AppContext,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    due: Option<NaiveDate>,
    clear_due: bool,
) -> Result<()> {
    if title.is_none() && description.is_none() && due.is_none() && !clear_due {
        msg_bail_anyhow!(Message::NothingToEdit);
    }

    let mut manager = ctx.loaded_manager().await?;
    let Some(current) = manager.get(id) else {
        msg_bail_anyhow!(Message::TaskNotFound(id.to_string()));
    };

    let title = title.unwrap_or_else(|| current.title.clone());
    let description = description.unwrap_or_else(|| current.description.clone());
    let due = if clear_due { None } else { due.or(current.due_date) };

    let task = manager.edit_task(id, &title, &description, due).await?;
    msg_success!(Message::TaskUpdated(task.title));
    Ok(())
}

async fn handle_done(ctx: &AppContext, id: &str) -> Result<()> {
    let mut manager = ctx.loaded_manager().await?;
    if manager.get(id).is_none() {
        msg_bail_anyhow!(Message::TaskNotFound(id.to_string()));
    }
    manager.toggle_completion(id).await?;
    Ok(())
}

async fn handle_delete(ctx: &AppContext, id: &str, yes: bool) -> Result<()> {
    let mut manager = ctx.loaded_manager().await?;
    let Some(title) = manager.get(id).map(|task| task.title.clone()) else {
        msg_bail_anyhow!(Message::TaskNotFound(id.to_string()));
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(title.clone()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::DeleteCancelled);
        return Ok(());
    }

    manager.delete_task(id).await?;
    msg_success!(Message::TaskDeleted(title));
    Ok(())
}

async fn handle_move(ctx: &AppContext, id: &str, position: usize) -> Result<()> {
    let mut manager = ctx.loaded_manager().await?;
    if manager.get(id).is_none() {
        msg_bail_anyhow!(Message::TaskNotFound(id.to_string()));
    }
    let result = manager.move_task(id, position).await;
    super::reorder::report(&manager, result)
}
