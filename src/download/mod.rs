//! Download module.
//!
//! This module provides:
//! - Per-entry outcome tracking and run statistics
//! - Streaming media file downloading
//! - Whole-post orchestration

pub mod media;
pub mod post;
pub mod state;

pub use media::download_entry;
pub use post::{download_entries, download_from_url};
pub use state::{DownloadOutcome, DownloadResult, RunStats};

/// Minimal HTTP fixture for download tests: serves one canned response to
/// every connection on a loopback port.
#[cfg(test)]
pub(crate) mod testutil {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Spawn a loopback server and return a URL pointing at it.
    ///
    /// `declared_len` overrides the advertised Content-Length; declaring
    /// more bytes than `body` carries makes the client observe a transfer
    /// failure when the connection closes early.
    pub(crate) async fn serve(
        body: Vec<u8>,
        declared_len: Option<usize>,
        content_type: &str,
    ) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let content_type = content_type.to_string();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                let content_type = content_type.clone();

                tokio::spawn(async move {
                    let mut request = [0u8; 4096];
                    let _ = stream.read(&mut request).await;

                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: {}\r\nConnection: close\r\n\r\n",
                        declared_len.unwrap_or(body.len()),
                        content_type
                    );
                    let _ = stream.write_all(head.as_bytes()).await;
                    let _ = stream.write_all(&body).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{}/media", addr)
    }
}
