use anyhow::Result;
use dialoguer::Confirm;
use evplan_core::Planner;
use owo_colors::OwoColorize;

pub async fn run(planner: &Planner, id: &str, yes: bool) -> Result<()> {
    let event = planner.require_event(id).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}'?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    planner.delete_event(id).await?;
    println!("{}", format!("  Deleted: {}", event.title).red());

    Ok(())
}
