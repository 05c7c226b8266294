use anyhow::Result;
use evplan_core::Planner;
use owo_colors::OwoColorize;

use crate::device::IcsCalendar;

/// Folder under the data directory that holds exported calendar files.
const CALENDAR_DIR: &str = "calendar";

pub async fn run(planner: &Planner, id: &str) -> Result<()> {
    let calendar = IcsCalendar::new(planner.config().data_path().join(CALENDAR_DIR));
    let path = planner.add_to_calendar(id, &calendar).await?;

    println!("{}", "  Event added to calendar".green());
    println!("  {}", path.dimmed());

    Ok(())
}
