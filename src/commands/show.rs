use anyhow::Result;
use evplan_core::Planner;

use crate::render::render_detail;

pub async fn run(planner: &Planner, id: &str) -> Result<()> {
    let event = planner.require_event(id).await?;
    println!("{}", render_detail(&event));
    Ok(())
}
