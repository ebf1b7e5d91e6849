use super::context::AppContext;
use crate::libs::backend::Backend;
use crate::libs::error::{Result as TaskResult, TaskError};
use crate::libs::manager::TaskOrderManager;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ReorderArgs {
    /// Every task id, in the new order
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

pub async fn cmd(args: ReorderArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut manager = ctx.loaded_manager().await?;

    let result = manager.reorder(&args.ids).await;
    report(&manager, result)
}

/// Prints the outcome of a reorder. A store failure keeps the new order in
/// the listing but fails the command.
pub(crate) fn report(manager: &TaskOrderManager<Backend>, result: TaskResult<usize>) -> Result<()> {
    match result {
        Ok(0) => {
            msg_info!(Message::OrderUnchanged);
            Ok(())
        }
        Ok(moved) => {
            msg_success!(Message::TasksReordered(moved));
            View::tasks(&manager.sorted_tasks());
            Ok(())
        }
        Err(TaskError::Persistence(err)) => {
            View::tasks(&manager.sorted_tasks());
            msg_bail_anyhow!(Message::ReorderNotSaved(err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
