//! Device services the front end provides, and the payloads sent to them.
//!
//! The stores never call these. Screens ask for the current position when
//! creating an event, push an event into the native calendar, and hand a
//! place to the platform map viewer.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use thiserror::Error;

use crate::error::{PlannerError, PlannerResult};
use crate::event::{Coordinates, Event};

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("{0} permission is required")]
    PermissionDenied(String),

    #[error("No calendar found")]
    NoCalendar,

    #[error("{0} is unavailable")]
    Unavailable(String),

    #[error("Could not write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, DeviceError>;
}

#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Create a native calendar entry and return its identifier.
    async fn create_entry(&self, entry: &CalendarEntry) -> Result<String, DeviceError>;
}

/// What the map viewer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    Pin,
    Directions,
}

pub trait MapLauncher: Send + Sync {
    /// Hand `target` to the platform map viewer. Fire and forget.
    fn open(&self, target: &MapTarget, mode: MapMode);
}

/// The device position, or `fallback` if it cannot be read.
pub async fn position_or(service: &dyn LocationService, fallback: Coordinates) -> Coordinates {
    match service.current_position().await {
        Ok(position) => position,
        Err(e) => {
            tracing::info!(error = %e, "using fallback position");
            fallback
        }
    }
}

/// Payload for a native calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub title: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub location: String,
    pub notes: String,
}

impl CalendarEntry {
    /// Fails when the end would fall outside the representable date range.
    pub fn from_event(event: &Event, duration: Duration) -> PlannerResult<Self> {
        let start_date = event.starts_at();
        let end_date = start_date.checked_add_signed(duration).ok_or_else(|| {
            PlannerError::Validation(format!(
                "'{}' would end past the last supported date",
                event.title
            ))
        })?;

        Ok(CalendarEntry {
            title: event.title.clone(),
            start_date,
            end_date,
            location: event.location.name.clone(),
            notes: format!("Address: {}", event.location.address_or_name()),
        })
    }
}

/// Platform whose map URL scheme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Ios,
    Android,
    #[default]
    Web,
}

/// A labelled point handed to a map viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTarget {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl MapTarget {
    pub fn from_event(event: &Event) -> Self {
        MapTarget {
            latitude: event.location.latitude,
            longitude: event.location.longitude,
            label: event.location.name.clone(),
        }
    }

    fn lat_lng(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Deep link that drops a pin on the place.
    pub fn url(&self, platform: Platform) -> String {
        let label = utf8_percent_encode(&self.label, URI_COMPONENT);
        match platform {
            Platform::Ios => format!("maps:0,0?q={}@{}", label, self.lat_lng()),
            Platform::Android => format!("geo:0,0?q={}({})", self.lat_lng(), label),
            Platform::Web => format!(
                "https://www.google.com/maps/search/?api=1&query={}",
                self.lat_lng()
            ),
        }
    }

    /// Deep link that asks for directions to the place.
    pub fn directions_url(&self, platform: Platform) -> String {
        match platform {
            Platform::Ios => format!("http://maps.apple.com/?daddr={}", self.lat_lng()),
            Platform::Android | Platform::Web => format!(
                "https://www.google.com/maps/dir/?api=1&destination={}",
                self.lat_lng()
            ),
        }
    }
}
