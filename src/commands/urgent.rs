use super::context::AppContext;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct UrgentArgs {
    #[command(subcommand)]
    command: Option<UrgentCommand>,
}

#[derive(Debug, Subcommand)]
enum UrgentCommand {
    #[command(about = "Show the urgent task")]
    Show,
    #[command(about = "Pin a task as urgent, replacing the current one")]
    Set { title: String },
    #[command(about = "Remove the urgent task")]
    Clear,
}

pub async fn cmd(args: UrgentArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    let urgent = ctx.urgent();

    match args.command.unwrap_or(UrgentCommand::Show) {
        UrgentCommand::Show => match urgent.current().await? {
            Some(task) => {
                msg_print!(Message::UrgentTaskHeader, true);
                View::urgent(&task);
            }
            None => msg_info!(Message::NoUrgentTask),
        },
        UrgentCommand::Set { title } => {
            let task = urgent.set(&title).await?;
            msg_success!(Message::UrgentTaskSet(task.title));
        }
        UrgentCommand::Clear => {
            urgent.clear().await?;
            msg_success!(Message::UrgentTaskCleared);
        }
    }
    Ok(())
}
