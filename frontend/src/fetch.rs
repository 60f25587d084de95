use gloo_net::http::Request;
use name_pair_types::{DEFAULT_PROXY, FetchFailure, page_text, proxy_url};

const TIMEOUT_MS: u32 = 30_000;

/// Fetch `target` through the proxy and strip it to page text.
pub async fn fetch_page_text(target: &str) -> Result<String, FetchFailure> {
    let request_url = proxy_url(DEFAULT_PROXY, target)?;
    let signal = web_sys::AbortSignal::timeout_with_u32(TIMEOUT_MS);

    let resp = Request::get(&request_url)
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| {
            if signal.aborted() {
                FetchFailure::Timeout(u64::from(TIMEOUT_MS))
            } else {
                FetchFailure::Network(e.to_string())
            }
        })?;

    if !resp.ok() {
        return Err(FetchFailure::Status(resp.status()));
    }

    let html = resp
        .text()
        .await
        .map_err(|e| FetchFailure::Decode(e.to_string()))?;
    page_text(&html)
}
