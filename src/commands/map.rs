use anyhow::Result;
use evplan_core::Planner;
use evplan_core::device::{MapLauncher, MapMode, MapTarget, Platform};

use crate::device::SystemMapLauncher;

pub async fn run(
    planner: &Planner,
    id: &str,
    directions: bool,
    platform: Platform,
    print: bool,
) -> Result<()> {
    let event = planner.require_event(id).await?;
    let target = MapTarget::from_event(&event);
    let mode = if directions { MapMode::Directions } else { MapMode::Pin };

    let launcher = SystemMapLauncher::new(platform);
    println!("{}", launcher.url(&target, mode));

    if !print {
        launcher.open(&target, mode);
    }

    Ok(())
}
