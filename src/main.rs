mod commands;
mod device;
mod ics;
mod logging;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use evplan_core::config::PlannerConfig;
use evplan_core::device::Platform;
use evplan_core::{Planner, RsvpStatus};

#[derive(Parser)]
#[command(name = "evplan")]
#[command(about = "Plan local events, RSVP and keep track of who's coming")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events
    List {
        /// Only show events whose title or location matches
        #[arg(short, long)]
        search: Option<String>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event with its attendees
    Show { id: String },
    /// Create a new event
    New {
        title: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day (HH:MM, defaults to now)
        #[arg(short, long)]
        time: Option<String>,

        #[command(flatten)]
        place: PlaceArgs,

        /// Invite someone (repeatable)
        #[arg(short = 'i', long = "attendee")]
        attendees: Vec<String>,
    },
    /// Change the title, date, time or place of an event
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        #[command(flatten)]
        place: PlaceArgs,
    },
    /// Delete an event
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Toggle your RSVP on an event
    Rsvp { id: String },
    /// Manage the attendees of an event
    Attendee {
        #[command(subcommand)]
        command: AttendeeCommands,
    },
    /// Show which days have events, or open the first event on a day
    Calendar {
        /// Day to open (YYYY-MM-DD)
        day: Option<String>,
    },
    /// Show your profile counters
    Stats {
        /// Print the counters as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open the location of an event in a map app
    Map {
        id: String,

        /// Ask for directions instead of dropping a pin
        #[arg(long)]
        directions: bool,

        /// URL scheme to use
        #[arg(long, value_enum, default_value_t = PlatformArg::Web)]
        platform: PlatformArg,

        /// Print the link instead of opening it
        #[arg(long)]
        print: bool,
    },
    /// Add an event to your calendar as an .ics file
    Export { id: String },
    /// Delete all events
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or change settings
    Config {
        /// Where events and accounts are stored
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,

        /// Map center used when no position is known
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,

        /// Length of exported calendar entries, in minutes
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Create a local account
    Register {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },
    Login { username: Option<String> },
    Logout,
    /// Show who is logged in
    Whoami,
}

#[derive(Subcommand)]
enum AttendeeCommands {
    /// Invite someone to an event
    Add { event_id: String, name: String },
    /// Remove an attendee from an event
    Remove { event_id: String, attendee_id: String },
    /// Set an attendee's response
    Status {
        event_id: String,
        attendee_id: String,
        status: RsvpStatus,
    },
}

/// Where an event takes place.
#[derive(clap::Args)]
struct PlaceArgs {
    /// Name of the place
    #[arg(short, long)]
    location: Option<String>,

    /// Street address
    #[arg(short, long)]
    address: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    Ios,
    Android,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
            PlatformArg::Web => Platform::Web,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = PlannerConfig::load()?;
    let planner = Planner::open(config);

    match cli.command {
        Commands::List { search, json } => {
            commands::list::run(&planner, search.as_deref(), json).await
        }
        Commands::Show { id } => commands::show::run(&planner, &id).await,
        Commands::New {
            title,
            date,
            time,
            place,
            attendees,
        } => commands::new::run(&planner, title, date, time, place.into(), attendees).await,
        Commands::Edit {
            id,
            title,
            date,
            time,
            place,
        } => commands::edit::run(&planner, &id, title, date, time, place.into()).await,
        Commands::Delete { id, yes } => commands::delete::run(&planner, &id, yes).await,
        Commands::Rsvp { id } => commands::rsvp::run(&planner, &id).await,
        Commands::Attendee { command } => match command {
            AttendeeCommands::Add { event_id, name } => {
                commands::attendee::add(&planner, &event_id, &name).await
            }
            AttendeeCommands::Remove {
                event_id,
                attendee_id,
            } => commands::attendee::remove(&planner, &event_id, &attendee_id).await,
            AttendeeCommands::Status {
                event_id,
                attendee_id,
                status,
            } => commands::attendee::status(&planner, &event_id, &attendee_id, status).await,
        },
        Commands::Calendar { day } => commands::calendar::run(&planner, day.as_deref()).await,
        Commands::Stats { json } => commands::stats::run(&planner, json).await,
        Commands::Map {
            id,
            directions,
            platform,
            print,
        } => commands::map::run(&planner, &id, directions, platform.into(), print).await,
        Commands::Export { id } => commands::export::run(&planner, &id).await,
        Commands::Clear { yes } => commands::clear::run(&planner, yes).await,
        Commands::Config {
            data_dir,
            lat,
            lng,
            duration,
        } => commands::config::run(
            planner.config(),
            commands::config::Changes {
                data_dir,
                latitude: lat,
                longitude: lng,
                duration_minutes: duration,
            },
        ),
        Commands::Register { username, email } => {
            commands::account::register(&planner, username, email).await
        }
        Commands::Login { username } => commands::account::login(&planner, username).await,
        Commands::Logout => commands::account::logout(&planner).await,
        Commands::Whoami => commands::account::whoami(&planner).await,
    }
}

impl From<PlaceArgs> for commands::Place {
    fn from(args: PlaceArgs) -> Self {
        commands::Place {
            name: args.location,
            address: args.address,
            latitude: args.lat,
            longitude: args.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_attendees() {
        let cli = Cli::try_parse_from([
            "evplan", "new", "Picnic", "-d", "2025-05-01", "-l", "Park", "--lat", "-33.5", "-i",
            "Rana", "-i", "Omar",
        ])
        .unwrap();

        match cli.command {
            Commands::New {
                title,
                date,
                place,
                attendees,
                ..
            } => {
                assert_eq!(title.as_deref(), Some("Picnic"));
                assert_eq!(date.as_deref(), Some("2025-05-01"));
                assert_eq!(place.location.as_deref(), Some("Park"));
                assert_eq!(place.lat, Some(-33.5));
                assert_eq!(attendees, vec!["Rana", "Omar"]);
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn test_parse_attendee_status() {
        let cli =
            Cli::try_parse_from(["evplan", "attendee", "status", "1", "2", "maybe"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Attendee {
                command: AttendeeCommands::Status {
                    status: RsvpStatus::Maybe,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_parse_config_changes() {
        let cli = Cli::try_parse_from(["evplan", "config", "--lng", "-0.12", "--duration", "45"])
            .unwrap();

        match cli.command {
            Commands::Config {
                data_dir,
                lat,
                lng,
                duration,
            } => {
                assert!(data_dir.is_none() && lat.is_none());
                assert_eq!(lng, Some(-0.12));
                assert_eq!(duration, Some(45));
            }
            _ => panic!("expected config"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["evplan", "attendee", "status", "1", "2", "perhaps"]).is_err());
    }
}
