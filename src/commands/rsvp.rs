use anyhow::Result;
use evplan_core::Planner;
use owo_colors::OwoColorize;

pub async fn run(planner: &Planner, id: &str) -> Result<()> {
    let event = planner.require_event(id).await?;

    if planner.toggle_rsvp(id).await? {
        println!("  {} {}", "You're going to".green(), event.title.bold());
    } else {
        println!("  {} {}", "RSVP removed for".dimmed(), event.title);
    }

    Ok(())
}
