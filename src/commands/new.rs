use anyhow::Result;
use chrono::{Local, NaiveTime, Timelike};
use dialoguer::Input;
use evplan_core::{Attendee, Coordinates, EventDraft, Location, Planner};
use owo_colors::OwoColorize;

use super::{Place, normalize_address, parse_date, parse_time};
use crate::device::TerminalLocation;

pub async fn run(
    planner: &Planner,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    place: Place,
    attendees: Vec<String>,
) -> Result<()> {
    let interactive = title.is_none() || place.name.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- When ---
    let now = Local::now();
    let date = match date {
        Some(d) => parse_date(&d)?,
        None => now.date_naive(),
    };
    let time = match time {
        Some(t) => parse_time(&t)?,
        None => NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or_default(),
    };

    // --- Where ---
    let name = match place.name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("  Where?")
            .interact_text()?,
    };

    let address = match place.address {
        Some(address) => normalize_address(address),
        None if interactive => normalize_address(
            Input::new()
                .with_prompt("  Address? (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?,
        ),
        None => None,
    };

    let position = match (place.latitude, place.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates {
            latitude,
            longitude,
        },
        (None, None) => planner.starting_position(&TerminalLocation).await,
        _ => anyhow::bail!("Give both --lat and --lng, or neither"),
    };

    let attendees = attendees
        .iter()
        .map(|name| Attendee::new(name))
        .collect::<Result<Vec<_>, _>>()?;

    let draft = EventDraft {
        title,
        date,
        time,
        location: Location {
            name,
            address,
            latitude: position.latitude,
            longitude: position.longitude,
        },
        attendees,
    };

    let event = planner.create_event(draft).await?;

    if interactive {
        println!();
    }
    println!(
        "{} {}",
        format!("  Created: {}", event.title).green(),
        event.id.dimmed()
    );

    Ok(())
}
