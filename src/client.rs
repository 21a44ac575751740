use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{LoadTestError, Result, TransportError};
use crate::payload::FitnessRecord;

/// Raw reply to one add-record call.
#[derive(Debug, Clone)]
pub struct RecordResponse {
    pub status: u16,
    pub body: String,
}

/// Issues the add-record call. Swapped for a mock in tests.
#[async_trait]
pub trait RecordClient: Send + Sync {
    async fn add_record(
        &self,
        token: &str,
        record: &FitnessRecord,
    ) -> std::result::Result<RecordResponse, TransportError>;
}

pub struct HttpRecordClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpRecordClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoadTestError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn add_record(
        &self,
        token: &str,
        record: &FitnessRecord,
    ) -> std::result::Result<RecordResponse, TransportError> {
        let body =
            sonic_rs::to_string(record).map_err(|e| TransportError::Request(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        Ok(RecordResponse { status, body })
    }
}

impl HttpRecordClient {
    fn transport_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            e.into()
        }
    }
}
