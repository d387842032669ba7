//! Client test suite
//!
//! A mock [`HttpTransport`] stands in for the embedded server so these tests
//! exercise the client's protocol handling without any network.


use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use url::Url;

use crate::client::transport::{ HttpResponse, HttpTransport };
use crate::errors::Error;

/// Mock transport replaying a queue of canned responses
///
/// Every POST body is recorded so tests can assert on what went over the
/// wire; the queue is shared between POST and GET in call order.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    posted: Mutex<Vec<Value>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    /// Queue a canned response
    pub(crate) fn enqueue(&self, status: StatusCode, body: &str) {
        self.responses.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
    }

    /// Bodies of the requests POSTed so far, in order
    pub(crate) fn posted(&self) -> Vec<Value> {
        self.posted.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<HttpResponse, Error> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Other("mock transport exhausted".to_string()))
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, _url: &Url, body: &Value) -> Result<HttpResponse, Error> {
        self.posted.lock().unwrap().push(body.clone());
        self.next_response()
    }

    async fn get(&self, _url: &Url) -> Result<HttpResponse, Error> {
        self.next_response()
    }
}
