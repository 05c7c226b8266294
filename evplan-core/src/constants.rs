/// Key of the slot holding the JSON array of events.
pub const EVENTS_KEY: &str = "@events";

/// Key of the slot holding the JSON array of registered users.
pub const USERS_KEY: &str = "@users";

/// Key of the slot holding the logged-in user, absent when logged out.
pub const CURRENT_USER_KEY: &str = "@current_user";

/// Reserved attendee id for the local account holder.
pub const CURRENT_USER_ID: &str = "current-user";

/// Display name used when the local user RSVPs.
pub const CURRENT_USER_NAME: &str = "You";

/// Length of a native calendar entry created from an event.
pub const DEFAULT_EVENT_DURATION_MINUTES: i64 = 120;

/// Longest configurable calendar entry: one year.
pub const MAX_EVENT_DURATION_MINUTES: i64 = 525_600;

/// Map center used before a device location is known.
pub const DEFAULT_LATITUDE: f64 = 33.8547;
pub const DEFAULT_LONGITUDE: f64 = 35.8623;
