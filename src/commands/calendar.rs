use anyhow::Result;
use evplan_core::Planner;
use evplan_core::query;
use owo_colors::OwoColorize;

use super::parse_date;
use crate::render::render_detail;

pub async fn run(planner: &Planner, day: Option<&str>) -> Result<()> {
    let events = planner.events().try_get_events().await?;

    // Picking a marked day opens its first event
    if let Some(day) = day {
        let date = parse_date(day)?;
        match query::first_event_on(&events, date) {
            Some(event) => println!("{}", render_detail(event)),
            None => println!("{}", format!("No events on {}", date).dimmed()),
        }
        return Ok(());
    }

    let marked = query::marked_dates(&events);
    if marked.is_empty() {
        println!("{}", "No events scheduled".dimmed());
        return Ok(());
    }

    for date in marked {
        let titles: Vec<_> = query::events_on(&events, date)
            .into_iter()
            .map(|event| event.title.as_str())
            .collect();

        println!(
            "{} {}  {}",
            "●".blue(),
            date.format("%a %Y-%m-%d").bold(),
            titles.join(", ").dimmed()
        );
    }

    Ok(())
}
