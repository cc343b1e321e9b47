use crate::error::{Error, Result};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Whether `source` names a remote document rather than a local file
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Read book text from a local file or download it
pub async fn load_text(source: &str, max_attempts: usize) -> Result<String> {
    if is_remote(source) {
        download_text(source, max_attempts).await
    } else {
        ::log::info!("Reading text from {}", source);
        Ok(tokio::fs::read_to_string(source).await?)
    }
}

/// Download a text document, retrying transport errors, non-success statuses
/// and truncated bodies
pub async fn download_text(url: &str, max_attempts: usize) -> Result<String> {
    let client = Client::new();
    let attempts = max_attempts.max(1);
    let mut delay_ms = 750u64;

    for attempt in 1..=attempts {
        ::log::info!("Downloading {} (attempt {} of {})", url, attempt, attempts);

        let outcome = match client.get(url).header(USER_AGENT, BROWSER_USER_AGENT).send().await {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(text) => return Ok(text),
                Err(e) => e.into(),
            },
            Ok(resp) => Error::Http(format!("{} returned {}", url, resp.status())),
            Err(e) => e.into(),
        };

        if attempt == attempts {
            return Err(outcome);
        }
        ::log::warn!("Download failed: {}", outcome);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        delay_ms = (delay_ms * 7 / 4).min(5000);
    }

    Err(Error::Http(format!("failed to download {}", url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned response per connection, in order
    async fn serve(responses: Vec<&'static str>) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/book.txt", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = [0u8; 1024];
                let _ = socket.read(&mut request).await.unwrap();
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });
        (url, server)
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/book.txt"));
        assert!(is_remote("http://example.com/book.txt"));
        assert!(!is_remote("book.txt"));
        assert!(!is_remote("/tmp/https/book.txt"));
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "Chapter 1").unwrap();

        let text = load_text(path.to_str().unwrap(), 1).await.unwrap();
        assert_eq!(text, "Chapter 1");
    }

    #[tokio::test]
    async fn test_missing_local_file() {
        let err = load_text("/nonexistent/book.txt", 1).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_truncated_body_is_retried() {
        let (url, server) = serve(vec![
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nChap",
            "HTTP/1.1 200 OK\r\nContent-Length: 9\r\nConnection: close\r\n\r\nChapter 1",
        ])
        .await;

        let text = download_text(&url, 2).await.unwrap();
        assert_eq!(text, "Chapter 1");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_truncated_body_fails_after_last_attempt() {
        let (url, server) = serve(vec![
            "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nChap",
        ])
        .await;

        let err = download_text(&url, 1).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        server.await.unwrap();
    }
}
