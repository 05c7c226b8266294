use std::path::PathBuf;

use anyhow::Result;
use evplan_core::config::PlannerConfig;
use owo_colors::OwoColorize;

/// Settings given on the command line; unset fields are left alone.
#[derive(Default)]
pub struct Changes {
    pub data_dir: Option<PathBuf>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub duration_minutes: Option<i64>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.data_dir.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.duration_minutes.is_none()
    }

    fn apply(self, config: &mut PlannerConfig) {
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(latitude) = self.latitude {
            config.default_latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            config.default_longitude = longitude;
        }
        if let Some(minutes) = self.duration_minutes {
            config.event_duration_minutes = minutes;
        }
    }
}

pub fn run(config: &PlannerConfig, changes: Changes) -> Result<()> {
    let config_path = PlannerConfig::config_path()?;

    if changes.is_empty() {
        print_config(&config_path, config);
        return Ok(());
    }

    let mut updated = config.clone();
    changes.apply(&mut updated);
    updated.save(&config_path)?;

    println!("{}", "  Configuration saved".green());
    print_config(&config_path, &updated);

    Ok(())
}

fn print_config(config_path: &std::path::Path, config: &PlannerConfig) {
    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.data_path().display());
    println!();
    println!("{}", "Defaults".bold());
    println!(
        "  Map center: {}, {}",
        config.default_latitude, config.default_longitude
    );
    println!("  Duration:   {} min", config.event_duration_minutes);
}
