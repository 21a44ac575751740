//! Concurrent replay of the add-fitness-record call, one request per login
//! token, with latency and throughput aggregation.

pub mod client;
pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod payload;
pub mod runner;
pub mod summary;

pub use client::{HttpRecordClient, RecordClient, RecordResponse};
pub use config::{Config, RecordTypeArg};
pub use credentials::{Credential, CredentialPool};
pub use dispatcher::Dispatcher;
pub use error::{LoadTestError, TransportError};
pub use metrics::Metrics;
pub use payload::{FitnessRecord, RecordType};
pub use runner::{Outcome, TaskResult, TaskRunner};
pub use summary::RunSummary;
