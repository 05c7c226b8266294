use anyhow::Result;
use dialoguer::Input;
use evplan_core::{EventDraft, Planner};
use owo_colors::OwoColorize;

use super::{Place, normalize_address, parse_date, parse_time};

pub async fn run(
    planner: &Planner,
    id: &str,
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    place: Place,
) -> Result<()> {
    let event = planner.require_event(id).await?;
    let mut draft = EventDraft::from(event);

    let nothing_given = title.is_none()
        && date.is_none()
        && time.is_none()
        && place.name.is_none()
        && place.address.is_none()
        && place.latitude.is_none()
        && place.longitude.is_none();

    if nothing_given {
        prompt_changes(&mut draft)?;
    } else {
        if let Some(title) = title {
            draft.title = title;
        }
        if let Some(date) = date {
            draft.date = parse_date(&date)?;
        }
        if let Some(time) = time {
            draft.time = parse_time(&time)?;
        }
        if let Some(name) = place.name {
            draft.location.name = name;
        }
        if let Some(address) = place.address {
            draft.location.address = normalize_address(address);
        }
        if let Some(latitude) = place.latitude {
            draft.location.latitude = latitude;
        }
        if let Some(longitude) = place.longitude {
            draft.location.longitude = longitude;
        }
    }

    let event = planner.edit_event(id, draft).await?;
    println!("{}", format!("  Updated: {}", event.title).green());

    Ok(())
}

/// Walk through the form with the current values filled in.
fn prompt_changes(draft: &mut EventDraft) -> Result<()> {
    draft.title = Input::new()
        .with_prompt("  Title")
        .default(draft.title.clone())
        .interact_text()?;

    draft.date = prompt_with_retry("  Date", draft.date.format("%Y-%m-%d").to_string(), |s| {
        parse_date(s)
    })?;
    draft.time = prompt_with_retry("  Time", draft.time.format("%H:%M").to_string(), |s| {
        parse_time(s)
    })?;

    draft.location.name = Input::new()
        .with_prompt("  Where?")
        .default(draft.location.name.clone())
        .interact_text()?;

    let address: String = Input::new()
        .with_prompt("  Address? (skip)")
        .default(draft.location.address.clone().unwrap_or_default())
        .show_default(draft.location.address.is_some())
        .allow_empty(true)
        .interact_text()?;
    draft.location.address = normalize_address(address);

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, current: String, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new()
            .with_prompt(prompt)
            .default(current.clone())
            .interact_text()?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}
