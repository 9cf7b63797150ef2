use anyhow::Context;
use logbook_core::model::{LogRecord, NewLogRecord};
use reqwest::Response;

/// HTTP client for a running `logbook run`.
pub struct LogbookClient {
    http: reqwest::Client,
    base_url: String,
}

impl LogbookClient {
    pub fn new(addr: &str) -> Self {
        let base_url = if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.trim_end_matches('/').to_string()
        } else {
            format!("http://{addr}")
        };
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn search(&self, query: &[(&str, String)]) -> anyhow::Result<Vec<LogRecord>> {
        let resp = self
            .http
            .get(format!("{}/logs", self.base_url))
            .query(query)
            .send()
            .await
            .with_context(|| format!("connect logbook server {}", self.base_url))?;
        Ok(check(resp).await?.json().await?)
    }

    pub async fn send(&self, record: &NewLogRecord) -> anyhow::Result<LogRecord> {
        let resp = self
            .http
            .post(format!("{}/logs", self.base_url))
            .json(record)
            .send()
            .await
            .with_context(|| format!("connect logbook server {}", self.base_url))?;
        Ok(check(resp).await?.json().await?)
    }
}

async fn check(resp: Response) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    anyhow::bail!("server returned {status}: {}", body.trim())
}
