//! HTTP timeline client.

use super::{ContentSource, FetchRequest, SourceError};
use crate::AccountHandle;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Default user-timeline endpoint.
pub const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1/statuses/user_timeline.json";

/// One entry of a timeline response. Fields other than `text` are ignored.
#[derive(Debug, Deserialize)]
struct TimelineEntry {
    text: String,
}

/// Parses a timeline response body into raw texts.
#[instrument(skip(body), fields(body_length = body.len()))]
pub fn parse_timeline(body: &str) -> Result<Vec<String>, SourceError> {
    let entries: Vec<TimelineEntry> = serde_json::from_str(body).map_err(|e| {
        error!(error = ?e, "Failed to parse timeline response");
        SourceError::Decode {
            message: e.to_string(),
        }
    })?;

    Ok(entries.into_iter().map(|entry| entry.text).collect())
}

/// Fetches user timelines from a bearer-authenticated HTTP API.
#[derive(Debug, Clone)]
pub struct TimelineClient {
    client: reqwest::Client,
    api_url: String,
    bearer_token: String,
}

impl TimelineClient {
    /// Creates a client for `api_url` authenticating with `bearer_token`.
    #[instrument(skip(bearer_token))]
    pub fn new(api_url: String, bearer_token: String) -> Self {
        info!("Creating timeline client");
        Self {
            client: reqwest::Client::new(),
            api_url,
            bearer_token,
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for TimelineClient {
    #[instrument(skip(self, account), fields(account = %account, api_url = %self.api_url))]
    async fn fetch(
        &self,
        account: &AccountHandle,
        request: &FetchRequest,
    ) -> Result<Vec<String>, SourceError> {
        debug!("Sending timeline request");
        let include_reposts = request.include_reposts().to_string();
        let count = request.max_items().to_string();

        let url = reqwest::Url::parse_with_params(
            &self.api_url,
            &[
                ("screen_name", account.as_str()),
                ("include_rts", include_reposts.as_str()),
                ("count", count.as_str()),
            ],
        )
        .map_err(|e| {
            error!(error = ?e, "Invalid timeline URL");
            SourceError::Transport {
                message: format!("invalid API URL {}: {}", self.api_url, e),
            }
        })?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Timeline request failed");
                SourceError::Transport {
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(status = %status, "Timeline API rejected request");
            return Err(SourceError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read timeline response");
            SourceError::Transport {
                message: e.to_string(),
            }
        })?;

        let texts = parse_timeline(&body)?;
        info!(count = texts.len(), "Fetched timeline");
        Ok(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves one canned HTTP response and returns the raw request it received.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let url = format!("http://{}/t.json", listener.local_addr().expect("No address"));

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Failed to accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buf).expect("Failed to read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream
                .write_all(response.as_bytes())
                .expect("Failed to write response");
            String::from_utf8(request).expect("Request not UTF-8")
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_bearer_token() {
        let (url, server) = serve_once("200 OK", r#"[{"text": "hello"}, {"text": "again"}]"#);
        let client = TimelineClient::new(url, "tok".to_string());

        let texts = client
            .fetch(&AccountHandle::from("kanyewest"), &FetchRequest::default())
            .await
            .unwrap();

        assert_eq!(texts, vec!["hello".to_string(), "again".to_string()]);
        let request = server.join().expect("Server thread panicked");
        assert!(
            request.starts_with("GET /t.json?screen_name=kanyewest&include_rts=false&count=3200 "),
            "{}",
            request
        );
        assert!(request.to_lowercase().contains("authorization: bearer tok\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_passes_request_parameters() {
        let (url, server) = serve_once("200 OK", "[]");
        let client = TimelineClient::new(url, "tok".to_string());

        client
            .fetch(&AccountHandle::from("elonmusk"), &FetchRequest::new(true, 10))
            .await
            .unwrap();

        let request = server.join().expect("Server thread panicked");
        assert!(request.starts_with("GET /t.json?screen_name=elonmusk&include_rts=true&count=10 "));
    }

    #[tokio::test]
    async fn test_fetch_maps_non_200_to_rejected() {
        let (url, server) = serve_once("404 Not Found", r#"{"errors": []}"#);
        let client = TimelineClient::new(url, "tok".to_string());

        let result = client
            .fetch(&AccountHandle::from("ghost"), &FetchRequest::default())
            .await;

        assert_eq!(result, Err(SourceError::Rejected { status: 404 }));
        let request = server.join().expect("Server thread panicked");
        assert!(request.starts_with("GET /t.json?screen_name=ghost&include_rts=false&count=3200 "));
        assert!(request.to_lowercase().contains("authorization: bearer tok\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_bad_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", "not json");
        let client = TimelineClient::new(url, "tok".to_string());

        let result = client
            .fetch(&AccountHandle::from("kanyewest"), &FetchRequest::default())
            .await;

        assert!(matches!(result, Err(SourceError::Decode { .. })));
        server.join().expect("Server thread panicked");
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let url = format!("http://{}/t.json", listener.local_addr().expect("No address"));
        drop(listener);
        let client = TimelineClient::new(url, "tok".to_string());

        let result = client
            .fetch(&AccountHandle::from("kanyewest"), &FetchRequest::default())
            .await;

        assert!(matches!(result, Err(SourceError::Transport { .. })));
    }

    #[test]
    fn test_parse_timeline_reads_text_fields() {
        let body = r#"[
            {"id": 1, "text": "first", "retweet_count": 4},
            {"id": 2, "text": "second @pal"}
        ]"#;
        let texts = parse_timeline(body).unwrap();
        assert_eq!(texts, vec!["first".to_string(), "second @pal".to_string()]);
    }

    #[test]
    fn test_parse_timeline_empty_array() {
        assert!(parse_timeline("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_timeline_rejects_error_object() {
        let body = r#"{"errors": [{"code": 34, "message": "Sorry, that page does not exist."}]}"#;
        assert!(matches!(
            parse_timeline(body),
            Err(SourceError::Decode { .. })
        ));
    }
}
