use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::AppError;

use super::types::Envelope;

/// Market-data client over a prioritized list of interchangeable mirror
/// hosts. Each lookup walks the list sequentially, one timeout-bounded
/// attempt per host, and returns the first validated response.
pub struct BybitClient {
    http: reqwest::Client,
    mirrors: Vec<Url>,
    timeout: Duration,
}

impl BybitClient {
    pub fn new(mirrors: &[String], timeout_ms: u64) -> Result<Self, AppError> {
        if mirrors.is_empty() {
            return Err(AppError::Config("mirror list is empty".to_string()));
        }
        let mirrors = mirrors
            .iter()
            .map(|m| {
                Url::parse(m).map_err(|e| AppError::Config(format!("bad mirror url '{m}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            http: reqwest::Client::new(),
            mirrors,
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Fetch one logical resource, failing over across mirrors. Only
    /// total exhaustion surfaces as an error; per-host failures are
    /// logged and swallowed.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let mut last_failure = String::new();
        for mirror in &self.mirrors {
            match self.attempt(mirror, path, params).await {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    tracing::debug!(host = %mirror, path, %reason, "mirror attempt failed");
                    last_failure = reason;
                }
            }
        }
        tracing::warn!(path, last = %last_failure, "all mirrors exhausted");
        Err(AppError::UpstreamExhausted {
            hosts: self.mirrors.len(),
            last: last_failure,
        })
    }

    /// One attempt against one host. Any failure is reduced to a reason
    /// string for the exhaustion diagnostic.
    async fn attempt<T: DeserializeOwned>(
        &self,
        mirror: &Url,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, String> {
        let url = mirror
            .join(path)
            .map_err(|e| format!("bad path '{path}': {e}"))?;

        let request = async {
            let resp = self
                .http
                .get(url)
                .query(params)
                .send()
                .await
                .map_err(|e| format!("transport: {e}"))?;
            let status = resp.status();
            // Body first: degraded mirrors serve interstitial HTML with
            // arbitrary status codes.
            let body = resp
                .text()
                .await
                .map_err(|e| format!("body read: {e}"))?;
            if !status.is_success() {
                return Err(format!("HTTP {status}"));
            }
            Ok(body)
        };
        let body = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| format!("timed out after {}ms", self.timeout.as_millis()))??;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| format!("malformed body: {e}"))?;
        if envelope.ret_code != 0 {
            return Err(format!(
                "retCode {}: {}",
                envelope.ret_code, envelope.ret_msg
            ));
        }
        let result = envelope
            .result
            .ok_or_else(|| "null result in success envelope".to_string())?;
        serde_json::from_value(result).map_err(|e| format!("unexpected result shape: {e}"))
    }

    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_mirror_list() {
        assert!(matches!(
            BybitClient::new(&[], 1000),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn rejects_invalid_mirror_url() {
        let mirrors = vec!["not a url".to_string()];
        assert!(matches!(
            BybitClient::new(&mirrors, 1000),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn keeps_mirror_priority_order() {
        let mirrors = vec![
            "https://api.bybit.com".to_string(),
            "https://api.bytick.com".to_string(),
        ];
        let client = BybitClient::new(&mirrors, 1000).unwrap();
        assert_eq!(client.mirror_count(), 2);
        assert_eq!(client.mirrors[0].host_str(), Some("api.bybit.com"));
        assert_eq!(client.mirrors[1].host_str(), Some("api.bytick.com"));
    }
}
