//! Base HTTP client shared by the CoinGecko and DefiLlama clients

use crate::errors::ApiError;
use reqwest::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = concat!("yieldwatch/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with a fixed per-request timeout
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, String> {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Turn a non-2xx response into `ApiError::HttpStatus`
pub fn check_status(response: Response, endpoint: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    #[test]
    fn test_zero_timeout_is_clamped() {
        let client = HttpClient::new(0).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(1));
    }

    /// Serve one canned HTTP response on a local port
    fn serve_once(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let reply = format!(
                    "HTTP/1.1 {}\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{{}}",
                    status_line
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_check_status_maps_error_codes() {
        let client = HttpClient::new(5).unwrap();

        let url = serve_once("503 Service Unavailable");
        let response = client.client().get(&url).send().await.unwrap();
        match check_status(response, "test/endpoint") {
            Err(ApiError::HttpStatus { endpoint, status }) => {
                assert_eq!(endpoint, "test/endpoint");
                assert_eq!(status, 503);
            }
            other => panic!("expected HttpStatus, got {:?}", other.map(|r| r.status())),
        }

        let url = serve_once("200 OK");
        let response = client.client().get(&url).send().await.unwrap();
        assert!(check_status(response, "test/endpoint").is_ok());
    }
}
