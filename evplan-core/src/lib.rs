//! Core of evplan: the local event store and everything it persists.
//!
//! - [`store::EventStore`]: events as one JSON array in a key-value slot
//! - [`auth::AuthStore`]: registered users and the login session
//! - [`kv`]: the key-value adapter both stores persist through
//! - [`planner::Planner`]: the container front ends are built on
//! - [`device`]: location, calendar and map services the front end supplies

pub mod auth;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod event;
pub mod kv;
pub mod planner;
pub mod query;
pub mod slot;
pub mod store;
pub mod user;

pub use error::{PlannerError, PlannerResult};
pub use event::{Attendee, Coordinates, Event, EventDraft, Location, RsvpStatus};
pub use planner::Planner;
pub use user::{Registration, Session, User};
