//! HTTP directory client.
//!
//! Performs a single GET against the configured base URL and decodes a JSON
//! array of users. There is no retry and no pagination.

use std::time::Duration;

use reqwest::Client;
use reqwest::header;

use crate::config::Config;
use crate::error::{MailformError, Result};

use super::{User, UserSource};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Directory backed by a remote users endpoint
pub struct HttpDirectory {
    client: Client,
    url: Option<String>,
    /// Cosmetic delay so the loading state is visible
    delay: Duration,
}

impl HttpDirectory {
    /// Create a directory client from configuration
    ///
    /// A missing URL is not an error here; fetches will resolve empty.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.directory_timeout())
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: config.directory_url(),
            delay: config.fetch_delay(),
        })
    }

    /// Create a directory client for a fixed URL with default timeouts
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let mut directory = Self::from_config(&Config::default())?;
        directory.url = Some(url.into());
        Ok(directory)
    }

    /// Set the artificial delay applied before a fetch resolves
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Fetch the directory, surfacing the failure reason
    pub async fn try_fetch_users(&self) -> Result<Vec<User>> {
        let url = self
            .url
            .as_deref()
            .ok_or(MailformError::DirectoryNotConfigured)?;

        let response = self
            .client
            .get(url)
            .header(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            )
            .send()
            .await?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(MailformError::Api(format!(
                "failed to fetch users: HTTP {status}"
            )));
        }

        let users: Vec<User> = response.json().await?;
        Ok(users)
    }
}

impl UserSource for HttpDirectory {
    async fn fetch_users(&self) -> Vec<User> {
        match self.try_fetch_users().await {
            Ok(users) => {
                tracing::debug!(count = users.len(), "fetched user directory");
                users
            }
            Err(e) => {
                tracing::warn!("Failed to fetch users: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the URL to hit.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                read.extend_from_slice(&buf[..n]);
                if n == 0 || read.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/users")
    }

    #[tokio::test]
    async fn test_fetch_users_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"Ann","email":"ann@x.com"},{"id":2,"name":"Bob","email":"bob@x.com"}]"#,
        )
        .await;

        let directory = HttpDirectory::new(url).unwrap();
        let users = directory.fetch_users().await;
        assert_eq!(
            users,
            vec![
                User::new(1, "Ann", "ann@x.com"),
                User::new(2, "Bob", "bob@x.com")
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_users_server_error() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let directory = HttpDirectory::new(url).unwrap();

        let err = directory.try_fetch_users().await.unwrap_err();
        assert!(matches!(err, MailformError::Api(_)));
    }

    #[tokio::test]
    async fn test_fetch_users_bad_json_is_empty() {
        let url = serve_once("200 OK", r#"{"users": "nope"}"#).await;
        let directory = HttpDirectory::new(url).unwrap();
        assert!(directory.fetch_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_users_connection_refused_is_empty() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let directory = HttpDirectory::new(format!("http://{addr}/users")).unwrap();
        assert!(directory.fetch_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_users_without_url() {
        let mut directory = HttpDirectory::new("http://unused").unwrap();
        directory.url = None;

        assert!(matches!(
            directory.try_fetch_users().await,
            Err(MailformError::DirectoryNotConfigured)
        ));
        assert!(directory.fetch_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_users_applies_delay() {
        let url = serve_once("200 OK", "[]").await;
        let directory = HttpDirectory::new(url)
            .unwrap()
            .with_delay(Duration::from_millis(50));

        let started = std::time::Instant::now();
        assert!(directory.fetch_users().await.is_empty());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
