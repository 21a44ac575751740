use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sonic_rs::JsonValueTrait;
use tokio::time::{timeout, Instant};
use tracing::{info, warn};

use crate::client::{RecordClient, RecordResponse};
use crate::config::RecordTypeArg;
use crate::credentials::Credential;
use crate::error::TransportError;
use crate::payload::{FitnessRecord, RecordType};

const LOGGED_BODY_CHARS: usize = 200;

/// How a single task ended. Only [`Outcome::Accepted`] counts as a success.
#[derive(Debug)]
pub enum Outcome {
    Accepted { status: u16 },
    BadStatus { status: u16 },
    /// 2xx but the server answered `success: false`.
    Rejected { status: u16 },
    /// 2xx but the body is not JSON or has no boolean `success`.
    MalformedBody { status: u16 },
    Transport(TransportError),
}

impl Outcome {
    pub fn from_response(response: &RecordResponse) -> Self {
        let status = response.status;
        if !(200..300).contains(&status) {
            return Outcome::BadStatus { status };
        }

        let flag = sonic_rs::from_str::<sonic_rs::Value>(&response.body)
            .ok()
            .and_then(|body| body.get("success").and_then(|v| v.as_bool()));

        match flag {
            Some(true) => Outcome::Accepted { status },
            Some(false) => Outcome::Rejected { status },
            None => Outcome::MalformedBody { status },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Accepted { status }
            | Outcome::BadStatus { status }
            | Outcome::Rejected { status }
            | Outcome::MalformedBody { status } => Some(*status),
            Outcome::Transport(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Transport(TransportError::Timeout(_)))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted { status } => write!(f, "accepted ({})", status),
            Outcome::BadStatus { status } => write!(f, "bad status ({})", status),
            Outcome::Rejected { status } => write!(f, "rejected ({})", status),
            Outcome::MalformedBody { status } => write!(f, "malformed body ({})", status),
            Outcome::Transport(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub struct TaskResult {
    pub index: usize,
    pub elapsed: Duration,
    pub outcome: Outcome,
}

impl TaskResult {
    pub fn success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Runs one add-record call per invocation. Never fails: every error becomes a
/// failed [`TaskResult`].
pub struct TaskRunner {
    client: Arc<dyn RecordClient>,
    timeout: Duration,
    record_type: RecordTypeArg,
}

impl TaskRunner {
    pub fn new(client: Arc<dyn RecordClient>, timeout: Duration, record_type: RecordTypeArg) -> Self {
        Self {
            client,
            timeout,
            record_type,
        }
    }

    pub async fn run(&self, index: usize, credential: &Credential) -> TaskResult {
        let record_type = self.record_type.fixed().unwrap_or_else(RecordType::random);
        let record = FitnessRecord::for_task(index, record_type);

        let start = Instant::now();
        let reply = timeout(self.timeout, self.client.add_record(&credential.token, &record)).await;
        let elapsed = start.elapsed();

        let (outcome, body) = match reply {
            Ok(Ok(response)) => (Outcome::from_response(&response), Some(response.body)),
            Ok(Err(e)) => (Outcome::Transport(e), None),
            Err(_) => (Outcome::Transport(TransportError::Timeout(self.timeout)), None),
        };

        let body = body.as_deref().map(truncate).unwrap_or_default();
        if outcome.is_success() {
            info!(
                "token: {}..., status: {}, elapsed: {:.3}s, response: {}",
                credential.prefix(),
                outcome,
                elapsed.as_secs_f64(),
                body
            );
        } else {
            warn!(
                "token: {}..., status: {}, elapsed: {:.3}s, response: {}",
                credential.prefix(),
                outcome,
                elapsed.as_secs_f64(),
                body
            );
        }

        TaskResult {
            index,
            elapsed,
            outcome,
        }
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(LOGGED_BODY_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
