use super::context::AppContext;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Only write the configuration, skip profile onboarding
    #[arg(long)]
    skip_profile: bool,
}

pub async fn cmd(init_args: InitArgs) -> Result<()> {
    let config = Config::init()?;
    let path = config.save()?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));

    if init_args.skip_profile {
        return Ok(());
    }

    let ctx = AppContext::from_config(config.apply_env()?)?;
    msg_info!(Message::BackendSelected(ctx.backend.kind().to_string()));

    let profiles = ctx.profiles();
    if profiles.load().await?.is_none() {
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDisplayName.to_string())
            .interact_text()?;
        profiles.complete_onboarding(&name).await?;
        msg_success!(Message::ProfileSaved(ctx.session.greeting_name()));
    } else {
        msg_print!(Message::Greeting(ctx.session.greeting_name()));
    }
    Ok(())
}
