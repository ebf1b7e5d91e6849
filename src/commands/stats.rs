use super::context::AppContext;
use super::parse_date;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// UTC day the "today" counters refer to (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: StatsArgs) -> Result<()> {
    let ctx = AppContext::load()?;
    let manager = ctx.loaded_manager().await?;

    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let stats = manager.statistics_on(date);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    msg_print!(Message::StatisticsHeader(date.to_string()), true);
    View::statistics(&stats);
    Ok(())
}
