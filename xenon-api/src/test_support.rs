//! In-process transport used by unit tests

use std::cell::RefCell;

use http_client::{HttpError, HttpRequest, HttpResponse, Transport};

/// Answers every call with the same canned response and records requests
pub struct StubTransport {
    status: u16,
    body: String,
    requests: RefCell<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
