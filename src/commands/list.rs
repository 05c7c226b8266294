use anyhow::Result;
use evplan_core::Planner;
use evplan_core::query;
use owo_colors::OwoColorize;

use crate::render::Render;

pub async fn run(planner: &Planner, search: Option<&str>, json: bool) -> Result<()> {
    let events = planner.events().try_get_events().await?;
    let matches = query::search(&events, search.unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        let message = if events.is_empty() {
            "No events yet. Create one with `evplan new`"
        } else {
            "No events match your search"
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    for event in matches {
        println!("{}", event.render());
    }

    Ok(())
}
