//! Device services backed by the desktop: exported .ics files stand in for
//! the native calendar, and map links open in the default browser.

use std::path::PathBuf;

use async_trait::async_trait;
use evplan_core::Coordinates;
use evplan_core::device::{
    CalendarEntry, CalendarService, DeviceError, LocationService, MapLauncher, MapMode, MapTarget,
    Platform,
};

use crate::ics;

/// A terminal has no position sensor; callers fall back to the configured default.
pub struct TerminalLocation;

#[async_trait]
impl LocationService for TerminalLocation {
    async fn current_position(&self) -> Result<Coordinates, DeviceError> {
        Err(DeviceError::Unavailable("Location".into()))
    }
}

/// Writes each entry as an .ics file that any calendar app can import.
pub struct IcsCalendar {
    dir: PathBuf,
}

impl IcsCalendar {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        IcsCalendar { dir: dir.into() }
    }
}

#[async_trait]
impl CalendarService for IcsCalendar {
    /// Returns the path of the written file.
    async fn create_entry(&self, entry: &CalendarEntry) -> Result<String, DeviceError> {
        let path = self.dir.join(ics::generate_filename(entry));
        let uid = format!(
            "{}@evplan",
            path.file_stem().unwrap_or_default().to_string_lossy()
        );
        let content = ics::generate_ics(entry, &uid);

        let written = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(&path, content).await
        };

        if let Err(e) = written.await {
            tracing::error!(path = %path.display(), error = %e, "could not write calendar file");
            return Err(DeviceError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            });
        }

        Ok(path.display().to_string())
    }
}

/// Opens map links with the system handler for the chosen platform's scheme.
pub struct SystemMapLauncher {
    platform: Platform,
}

impl SystemMapLauncher {
    pub fn new(platform: Platform) -> Self {
        SystemMapLauncher { platform }
    }

    pub fn url(&self, target: &MapTarget, mode: MapMode) -> String {
        match mode {
            MapMode::Pin => target.url(self.platform),
            MapMode::Directions => target.directions_url(self.platform),
        }
    }
}

impl MapLauncher for SystemMapLauncher {
    fn open(&self, target: &MapTarget, mode: MapMode) {
        let url = self.url(target, mode);
        if let Err(e) = open::that(&url) {
            tracing::warn!(url = %url, error = %e, "could not open map link");
        }
    }
}
