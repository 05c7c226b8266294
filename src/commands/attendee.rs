use anyhow::Result;
use evplan_core::{Planner, RsvpStatus};
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn add(planner: &Planner, event_id: &str, name: &str) -> Result<()> {
    let attendee = planner.add_attendee(event_id, name).await?;
    println!("  {} {}", "Added".green(), attendee.render());
    Ok(())
}

pub async fn remove(planner: &Planner, event_id: &str, attendee_id: &str) -> Result<()> {
    if !planner.remove_attendee(event_id, attendee_id).await? {
        anyhow::bail!("No attendee '{}' on this event", attendee_id);
    }
    println!("  {} {}", "Removed".red(), attendee_id);
    Ok(())
}

pub async fn status(
    planner: &Planner,
    event_id: &str,
    attendee_id: &str,
    status: RsvpStatus,
) -> Result<()> {
    if !planner.set_rsvp_status(event_id, attendee_id, status).await? {
        anyhow::bail!("No attendee '{}' on this event", attendee_id);
    }
    println!("  {} → {}", attendee_id, status.render());
    Ok(())
}
