use anyhow::Result;
use dialoguer::Confirm;
use evplan_core::Planner;
use owo_colors::OwoColorize;

pub async fn run(planner: &Planner, yes: bool) -> Result<()> {
    let count = planner.events().try_get_events().await?.len();
    if count == 0 {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete all {} {}?",
                count,
                if count == 1 { "event" } else { "events" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    planner.events().try_clear_all_data().await?;
    println!("{}", format!("  Cleared {} events", count).red());

    Ok(())
}
