use super::context::AppContext;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: Option<ProfileCommand>,
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    #[command(about = "Show the profile")]
    Show,
    #[command(about = "Set the display name, creating the profile if needed")]
    Name { name: String },
}

pub async fn cmd(args: ProfileArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    let profiles = ctx.profiles();

    match args.command.unwrap_or(ProfileCommand::Show) {
        ProfileCommand::Show => match profiles.load().await? {
            Some(profile) => {
                msg_print!(Message::Greeting(ctx.session.greeting_name()), true);
                View::profile(&profile);
            }
            None => msg_info!(Message::ProfileMissing),
        },
        ProfileCommand::Name { name } => {
            if profiles.load().await?.is_some() {
                profiles.rename(&name).await?;
            } else {
                profiles.complete_onboarding(&name).await?;
            }
            msg_success!(Message::ProfileSaved(ctx.session.greeting_name()));
        }
    }
    Ok(())
}
