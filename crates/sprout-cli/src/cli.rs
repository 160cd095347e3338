use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sprout_core::CareKind;

#[derive(Parser)]
#[command(name = "sprout")]
#[command(about = "Track houseplants and their care schedules from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a plant to the collection
    #[command(alias = "new")]
    Add {
        /// Plant name
        name: String,
        /// Optional species or cultivar
        #[arg(long)]
        species: Option<String>,
        /// Watering interval in days
        #[arg(long, value_name = "DAYS")]
        water_every: Option<i64>,
        /// Fertilizing interval in days
        #[arg(long, value_name = "DAYS")]
        feed_every: Option<i64>,
    },
    /// List plants in the collection
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show due and overdue care actions
    Due {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a care action as done
    Done {
        /// Plant ID or unique ID prefix
        id: String,
        /// Kind of care performed
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Push a care action back by one day
    Snooze {
        /// Plant ID or unique ID prefix
        id: String,
        /// Kind of care to snooze
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Reconcile the local collection with a remote mirror
    Sync {
        /// Remote snapshot endpoint (e.g. <https://api.example.com/sync>)
        #[arg(long, value_name = "URL")]
        remote: String,
    },
    /// Run the background driver: periodic sync plus care alerts
    Watch {
        /// Remote snapshot endpoint (e.g. <https://api.example.com/sync>)
        #[arg(long, value_name = "URL")]
        remote: String,
        /// Seconds between background passes
        #[arg(long, default_value = "60", value_name = "SECONDS")]
        interval: u64,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    /// Watering
    Water,
    /// Fertilizing
    Feed,
}

impl From<KindArg> for CareKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Water => Self::Watering,
            KindArg::Feed => Self::Fertilizing,
        }
    }
}
