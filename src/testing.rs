//! In-memory collaborators for tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::app::{DeliveryError, FetchError};
use crate::domain::{FeedItem, NotificationPayload};
use crate::fetcher::{FeedFetcher, MarkupFetcher};
use crate::notifier::{Delivery, Destination};

pub fn items(titles: &[&str]) -> Vec<FeedItem> {
    titles
        .iter()
        .map(|t| FeedItem::new(*t).with_link(format!("https://example.org/{}", t)))
        .collect()
}

enum FeedResponse {
    Items(Vec<FeedItem>),
    Failure,
}

/// Serves whatever items were last set for a URL. Unknown URLs fail with 404.
#[derive(Default)]
pub struct StaticFeedFetcher {
    feeds: Mutex<HashMap<String, FeedResponse>>,
    calls: Mutex<Vec<String>>,
}

impl StaticFeedFetcher {
    pub fn set_items(&self, url: &str, items: Vec<FeedItem>) {
        self.feeds
            .lock()
            .unwrap()
            .insert(url.to_string(), FeedResponse::Items(items));
    }

    pub fn set_failure(&self, url: &str) {
        self.feeds
            .lock()
            .unwrap()
            .insert(url.to_string(), FeedResponse::Failure);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for StaticFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.feeds.lock().unwrap().get(url) {
            Some(FeedResponse::Items(items)) => Ok(items.clone()),
            Some(FeedResponse::Failure) => Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

pub enum PageResponse {
    Markup(String),
    Timeout,
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct MarkupRequest {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Serves canned pages and records every request. Unknown URLs fail with 404.
#[derive(Default)]
pub struct StaticMarkupFetcher {
    pages: HashMap<String, PageResponse>,
    requests: Mutex<Vec<MarkupRequest>>,
}

impl StaticMarkupFetcher {
    pub fn with_page(self, url: &str, markup: &str) -> Self {
        self.with_response(url, PageResponse::Markup(markup.to_string()))
    }

    pub fn with_response(mut self, url: &str, response: PageResponse) -> Self {
        self.pages.insert(url.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<MarkupRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarkupFetcher for StaticMarkupFetcher {
    async fn fetch_markup(
        &self,
        url: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(MarkupRequest {
            url: url.to_string(),
            user_agent: user_agent.to_string(),
            timeout,
        });

        match self.pages.get(url) {
            Some(PageResponse::Markup(markup)) => Ok(markup.clone()),
            Some(PageResponse::Timeout) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
            Some(PageResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

/// Records sent payloads for known destinations.
#[derive(Default)]
pub struct RecordingDelivery {
    destinations: HashSet<String>,
    rejected_titles: HashSet<String>,
    sent: Mutex<Vec<(String, NotificationPayload)>>,
}

impl RecordingDelivery {
    pub fn with_destination(mut self, id: &str) -> Self {
        self.destinations.insert(id.to_string());
        self
    }

    /// Make sends of items with this title fail.
    pub fn rejecting(mut self, title: &str) -> Self {
        self.rejected_titles.insert(title.to_string());
        self
    }

    pub fn sent(&self) -> Vec<(String, NotificationPayload)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_titles(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, p)| p.title).collect()
    }
}

#[async_trait]
impl Delivery for RecordingDelivery {
    async fn resolve(&self, destination_id: &str) -> Result<Option<Destination>, DeliveryError> {
        Ok(self
            .destinations
            .contains(destination_id)
            .then(|| Destination::new(destination_id)))
    }

    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<(), DeliveryError> {
        if self.rejected_titles.contains(&payload.title) {
            return Err(DeliveryError::Rejected {
                status: StatusCode::FORBIDDEN,
                body: "Missing Permissions".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((destination.id.clone(), payload.clone()));
        Ok(())
    }
}

/// Local HTTP listener answering every request with the same canned response.
pub struct CannedServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    pub async fn respond(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                seen.lock().unwrap().push(request);

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    /// Accepts connections and never answers.
    pub async fn silent() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        Self {
            base_url,
            requests: Arc::default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw requests received so far, head and body.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]);
            let length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.trim().eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
