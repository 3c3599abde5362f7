//! The two-stage request chain behind every submission.
//!
//! A chain POSTs the raw input to the selector endpoint, forwards the
//! reply's `Target`/`Prompt` fields to the target endpoint, and reports each
//! step over an mpsc channel as a [`ChainEvent`]. The first transport or
//! parse failure ends the chain with a single `Failed` event; a selector
//! failure means the target endpoint is never contacted. Chains are never
//! retried or cancelled, and concurrent chains run unordered relative to
//! each other.

use std::error::Error as StdError;
use std::fmt;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{SelectorRequest, TargetRequest};
use crate::core::constants::{SELECTOR_ENDPOINT, TARGET_ENDPOINT};
use crate::utils::url::construct_api_url;

/// Progress report from a running chain, in emission order.
#[derive(Debug, Clone)]
pub enum ChainEvent {
    /// The parsed selector reply, emitted before the target call is issued.
    Selection(Value),
    /// The parsed target reply; the chain is done.
    Completion(Value),
    /// Terminal failure of either step, already formatted for display.
    Failed(String),
}

/// Errors a chain step can hit.
///
/// HTTP status is deliberately not part of the taxonomy: any received body
/// is parsed as JSON regardless of status code, so a non-2xx reply either
/// parses (and the chain advances) or surfaces here as `Parse`.
#[derive(Debug)]
pub enum ChainError {
    Request(reqwest::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Request(source) => write!(f, "request failed: {source}"),
            ChainError::Parse(source) => write!(f, "invalid JSON in response: {source}"),
        }
    }
}

impl StdError for ChainError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ChainError::Request(source) => Some(source),
            ChainError::Parse(source) => Some(source),
        }
    }
}

/// Everything one chain needs; constructed per submission.
pub struct ChainParams {
    pub client: Client,
    pub base_url: String,
    pub user_input: String,
    pub tx: mpsc::UnboundedSender<ChainEvent>,
}

async fn post_json<T: Serialize>(
    client: &Client,
    url: &str,
    body: &T,
) -> Result<Value, ChainError> {
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(ChainError::Request)?;
    let bytes = response.bytes().await.map_err(ChainError::Request)?;
    serde_json::from_slice(&bytes).map_err(ChainError::Parse)
}

/// Runs one selector → target chain to completion.
pub async fn run_chain(params: ChainParams) {
    let ChainParams {
        client,
        base_url,
        user_input,
        tx,
    } = params;

    let selector_url = construct_api_url(&base_url, SELECTOR_ENDPOINT);
    let selection = match post_json(&client, &selector_url, &SelectorRequest { user_input }).await {
        Ok(value) => value,
        Err(e) => {
            let _ = tx.send(ChainEvent::Failed(e.to_string()));
            return;
        }
    };

    let request = TargetRequest::from_selection(&selection);
    let _ = tx.send(ChainEvent::Selection(selection));

    let target_url = construct_api_url(&base_url, TARGET_ENDPOINT);
    match post_json(&client, &target_url, &request).await {
        Ok(value) => {
            let _ = tx.send(ChainEvent::Completion(value));
        }
        Err(e) => {
            let _ = tx.send(ChainEvent::Failed(e.to_string()));
        }
    }
}

/// Spawns an independent chain task. Each submission gets its own task;
/// nothing deduplicates or cancels chains already in flight.
pub fn spawn_chain(params: ChainParams) {
    tokio::spawn(run_chain(params));
}

/// One stop command: `{"prompt": "quit"}` to the target endpoint. The reply
/// body is dropped and a delivery failure leaves no trace in the UI.
pub async fn send_quit(client: &Client, base_url: &str) {
    let url = construct_api_url(base_url, TARGET_ENDPOINT);
    if let Err(e) = client.post(&url).json(&TargetRequest::quit()).send().await {
        debug!("stop command delivery failed: {e}");
    }
}

pub fn spawn_quit(client: Client, base_url: String) {
    tokio::spawn(async move {
        send_quit(&client, &base_url).await;
    });
}
