//! Shared test fixtures: a scripted transport.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock HTTP client that returns a configurable sequence of responses.
///
/// Once the script is exhausted, the last response is repeated.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    last: Mutex<Option<(http::StatusCode, Vec<u8>)>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Self::new(vec![Ok(response(status, body))])
    }

    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request captured")
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        http::HeaderMap::new(),
        body.as_bytes().to_vec(),
    )
}

#[async_trait]
impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            let last = self.last.lock().unwrap();
            let (status, body) = last.clone().expect("mock client has no scripted response");
            return Ok(HttpResponse::new(status, http::HeaderMap::new(), body));
        }

        let next = responses.remove(0);
        if let Ok(resp) = &next {
            *self.last.lock().unwrap() = Some((resp.status, resp.body.clone()));
        }
        next
    }
}
