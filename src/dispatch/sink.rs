use crate::models::QuizResult;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no remote endpoint configured")]
    NotConfigured,

    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("dispatch worker unavailable")]
    WorkerGone,
}

/// Body sent to the remote sheet: the result fields plus the
/// correct/incorrect breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemotePayload {
    #[serde(flatten)]
    pub result: QuizResult,
    pub details: String,
}

/// One-way write target. Success means the request was handed over; the
/// remote side's response is never inspected.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    async fn submit(&self, payload: &RemotePayload) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone)]
pub struct HttpSink {
    url: String,
    client: reqwest::Client,
}

impl HttpSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| DispatchError::Client(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl RemoteSink for HttpSink {
    async fn submit(&self, payload: &RemotePayload) -> Result<(), DispatchError> {
        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        tracing::debug!(status = %resp.status(), "remote sink accepted submission");
        Ok(())
    }
}

/// Stand-in when no endpoint is configured; every submission fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSink;

#[async_trait]
impl RemoteSink for UnconfiguredSink {
    async fn submit(&self, _payload: &RemotePayload) -> Result<(), DispatchError> {
        tracing::warn!("remote sink url not configured");
        Err(DispatchError::NotConfigured)
    }
}
