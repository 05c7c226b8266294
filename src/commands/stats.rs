use anyhow::Result;
use chrono::Local;
use evplan_core::Planner;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(planner: &Planner, json: bool) -> Result<()> {
    let stats = planner.stats(Local::now().date_naive()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if let Some(user) = planner.auth().get_current_user().await {
        println!("{} {}", user.username.bold(), user.email.dimmed());
        println!();
    }

    println!("{}", stats.render());

    Ok(())
}
