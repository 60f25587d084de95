use std::time::Duration;

use name_pair_types::{FetchFailure, page_text, proxy_url};
use tracing::{debug, info};

/// Fetches pages through a CORS-style "raw" proxy.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: reqwest::Client,
    proxy: String,
    timeout: Duration,
}

impl ProxyFetcher {
    pub fn new(proxy: impl Into<String>, timeout: Duration) -> Result<Self, FetchFailure> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("name_pair_extract/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchFailure::Network(e.to_string()))?;
        Ok(Self {
            client,
            proxy: proxy.into(),
            timeout,
        })
    }

    /// Raw proxy body for `target`. Non-2xx statuses are failures.
    pub async fn fetch_html(&self, target: &str) -> Result<String, FetchFailure> {
        let target = target.trim();
        url::Url::parse(target).map_err(|e| FetchFailure::InvalidUrl(format!("{target}: {e}")))?;
        let request_url = proxy_url(&self.proxy, target)?;
        debug!(%request_url, "requesting via proxy");

        let resp = self
            .client
            .get(&request_url)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout(self.timeout_ms())
            } else {
                FetchFailure::Decode(e.to_string())
            }
        })?;
        info!(bytes = body.len(), status = status.as_u16(), "proxy responded");
        Ok(body)
    }

    /// Fetch `target` and strip it to page text.
    pub async fn fetch_text(&self, target: &str) -> Result<String, FetchFailure> {
        let html = self.fetch_html(target).await?;
        page_text(&html)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn map_reqwest(&self, e: reqwest::Error) -> FetchFailure {
        if e.is_timeout() {
            FetchFailure::Timeout(self.timeout_ms())
        } else {
            FetchFailure::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn fetcher(addr: SocketAddr, timeout: Duration) -> ProxyFetcher {
        ProxyFetcher::new(format!("http://{addr}/raw?url="), timeout).unwrap()
    }

    #[tokio::test]
    async fn passes_decoded_target_and_strips_markup() {
        let app = Router::new().route(
            "/raw",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let target = q.get("url").cloned().unwrap_or_default();
                format!(
                    "<html><head><title>x</title></head><body><p>{target}</p>\
                     <p>沈宜嘉=Thẩm Nghi Gia</p></body></html>"
                )
            }),
        );
        let addr = serve(app).await;
        let f = fetcher(addr, Duration::from_secs(5));

        let text = f
            .fetch_text("https://truyenfull.vn/truyen?chuong=1 (moi)")
            .await
            .unwrap();
        assert_eq!(
            text,
            "https://truyenfull.vn/truyen?chuong=1 (moi)沈宜嘉=Thẩm Nghi Gia"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let app = Router::new().route("/raw", get(|| async { (StatusCode::BAD_GATEWAY, "down") }));
        let addr = serve(app).await;
        let err = fetcher(addr, Duration::from_secs(5))
            .fetch_text("https://example.com/")
            .await
            .unwrap_err();
        assert_eq!(err, FetchFailure::Status(502));
    }

    #[tokio::test]
    async fn blank_page_is_empty_content() {
        let app = Router::new().route("/raw", get(|| async { "<html><body>\n</body></html>" }));
        let addr = serve(app).await;
        let err = fetcher(addr, Duration::from_secs(5))
            .fetch_text("https://example.com/")
            .await
            .unwrap_err();
        assert_eq!(err, FetchFailure::EmptyContent);
    }

    #[tokio::test]
    async fn slow_proxy_times_out() {
        let app = Router::new().route(
            "/raw",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let addr = serve(app).await;
        let err = fetcher(addr, Duration::from_millis(200))
            .fetch_html("https://example.com/")
            .await
            .unwrap_err();
        assert_eq!(err, FetchFailure::Timeout(200));
        assert_eq!(err.to_string(), "request timed out after 200 ms");
    }

    #[tokio::test]
    async fn refused_connection_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = fetcher(addr, Duration::from_secs(2))
            .fetch_html("https://example.com/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchFailure::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn invalid_target_never_hits_the_network() {
        let f = ProxyFetcher::new("http://127.0.0.1:9/raw?url=", Duration::from_secs(1)).unwrap();
        let err = f.fetch_html("truyenfull.vn/no-scheme").await.unwrap_err();
        assert!(matches!(err, FetchFailure::InvalidUrl(_)));
    }
}
