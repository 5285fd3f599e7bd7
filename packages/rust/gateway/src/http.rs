//! Low-level GET helper shared by the backend clients.

use std::time::Duration;

use rand::Rng;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use content_resolver_shared::{ResolverError, Result};

/// User-Agent string for backend requests.
const USER_AGENT: &str = concat!("content-resolver/", env!("CARGO_PKG_VERSION"));

/// Header carrying the correlation id to the backends.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build a reqwest client with the backend transport timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| ResolverError::config(format!("failed to build HTTP client: {e}")))
}

/// Append `path` to the base URL, keeping any path prefix the base carries.
pub(crate) fn endpoint(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let joined = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    url
}

/// Derive the id sent to a backend from the inbound request id.
///
/// Each outbound call gets its own suffix so concurrent calls made for one
/// inbound request can be told apart in backend logs.
pub fn outbound_request_id(inbound: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1000);
    format!("{inbound}-{n}")
}

/// Issue a GET and return the body and headers of a 200 response.
///
/// `uri` is the content URI being fetched and is what errors report.
pub(crate) async fn get(
    client: &Client,
    url: Url,
    query: &[(&str, &str)],
    uri: &str,
    request_id: Option<&str>,
) -> Result<(Vec<u8>, HeaderMap)> {
    debug!(%url, uri, "calling backend");

    let mut request = client.get(url.clone()).query(query);
    if let Some(id) = request_id {
        request = request.header(REQUEST_ID_HEADER, outbound_request_id(id));
    }

    let response = request
        .send()
        .await
        .map_err(|e| ResolverError::network(uri, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        // Read the body so the connection can be reused.
        let _ = response.bytes().await;
        warn!(%url, uri, status = status.as_u16(), "unexpected status from backend");
        return Err(ResolverError::UnexpectedStatus {
            uri: uri.to_string(),
            status: status.as_u16(),
        });
    }

    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(|e| ResolverError::network(uri, format!("failed to read body: {e}")))?;

    Ok((body.to_vec(), headers))
}

/// Decode a JSON body, tagging failures with the operation and URI.
pub(crate) fn decode<T: DeserializeOwned>(operation: &'static str, uri: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| ResolverError::decode(operation, uri, e))
}
