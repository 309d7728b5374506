//! Shared test harness: a transport that records requests and replays
//! canned responses.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aerodb_client::transport::{Transport, TransportRequest, TransportResponse};
use aerodb_client::{Client, Error, JsonValue, Result};
use async_trait::async_trait;

pub const BASE_URL: &str = "https://db.example.com";

/// Records every request; answers from a queue, then `{"data": []}`
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<TransportRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response
    pub fn respond(&self, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, JsonValue::from(body))));
    }

    /// Queue a transport failure
    pub fn fail(&self, err: Error) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(TransportResponse::new(
                    200,
                    JsonValue::from(serde_json::json!({"data": []})),
                ))
            })
    }
}

pub fn client(mock: &Arc<MockTransport>) -> Client {
    Client::with_transport(BASE_URL, mock.clone())
}

/// Path part of a recorded URL
pub fn path(request: &TransportRequest) -> String {
    url::Url::parse(&request.url).unwrap().path().to_string()
}

/// Decoded query parameters of a recorded URL
pub fn query_pairs(request: &TransportRequest) -> Vec<(String, String)> {
    url::Url::parse(&request.url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub fn param(request: &TransportRequest, key: &str) -> Option<String> {
    query_pairs(request)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Recorded body as serde_json for easy comparison with `json!`
pub fn body(request: &TransportRequest) -> serde_json::Value {
    request
        .body
        .clone()
        .map(serde_json::Value::from)
        .unwrap_or(serde_json::Value::Null)
}
