use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::payload::RecordType;

pub const DEFAULT_ENDPOINT: &str = "https://api.fanovian.cc:3000/api/fitness/add";

#[derive(Parser, Debug, Clone)]
#[command(name = "fitness-loadtest")]
#[command(about = "Replays one add-fitness-record call per login token", long_about = None)]
pub struct Config {
    /// Record creation endpoint
    #[arg(long, env = "ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Login tokens JSON file (array of {"token": "..."})
    #[arg(long, env = "TOKEN_FILE", default_value = "login_tokens.json")]
    pub token_file: PathBuf,

    /// Worker pool width
    #[arg(long, env = "WORKERS", default_value = "50", value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "TIMEOUT_SECS", default_value = "150")]
    pub timeout_secs: u64,

    /// Record type to submit
    #[arg(long, env = "RECORD_TYPE", value_enum, default_value_t = RecordTypeArg::Weight)]
    pub record_type: RecordTypeArg,

    /// Write the run summary as JSON to this path
    #[arg(long, env = "SUMMARY_FILE")]
    pub summary_file: Option<PathBuf>,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTypeArg {
    Weight,
    BodyFat,
    HeartRate,
    BloodOxygen,
    /// Pick one of the above per task
    Random,
}

impl RecordTypeArg {
    /// `None` means a type is drawn per task.
    pub fn fixed(self) -> Option<RecordType> {
        match self {
            RecordTypeArg::Weight => Some(RecordType::Weight),
            RecordTypeArg::BodyFat => Some(RecordType::BodyFat),
            RecordTypeArg::HeartRate => Some(RecordType::HeartRate),
            RecordTypeArg::BloodOxygen => Some(RecordType::BloodOxygen),
            RecordTypeArg::Random => None,
        }
    }
}
