use crate::sync_error::{SyncError, SyncResult};
use bytes::Bytes;
use json::Value;

/// Request/response calls shared by the photo source and the cloud disk.
/// The production implementation is `reqwest::Client`.
#[async_trait::async_trait]
pub(crate) trait HttpClient: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, String)],
    ) -> SyncResult<Value>;

    async fn put_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, String)],
    ) -> SyncResult<Value>;

    async fn get_bytes(&self, url: &str) -> SyncResult<Bytes>;

    /// Sends `body` and returns the response status code.
    async fn put_bytes(&self, url: &str, body: Bytes) -> SyncResult<u16>;
}

#[async_trait::async_trait]
impl HttpClient for reqwest::Client {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, String)],
    ) -> SyncResult<Value> {
        let mut builder = reqwest::Client::get(self, url).query(query);
        for (k, v) in headers {
            builder = builder.header(*k, v.as_str());
        }
        let resp = builder.send().await?;
        Ok(resp.json().await?)
    }

    async fn put_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: &[(&str, String)],
    ) -> SyncResult<Value> {
        let mut builder = reqwest::Client::put(self, url).query(query);
        for (k, v) in headers {
            builder = builder.header(*k, v.as_str());
        }
        let resp = builder.send().await?;
        Ok(resp.json().await?)
    }

    async fn get_bytes(&self, url: &str) -> SyncResult<Bytes> {
        let resp = reqwest::Client::get(self, url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::UnexpectedResponse(format!(
                "GET {} returned {}",
                url, status
            )));
        }
        Ok(resp.bytes().await?)
    }

    async fn put_bytes(&self, url: &str, body: Bytes) -> SyncResult<u16> {
        let resp = reqwest::Client::put(self, url).body(body).send().await?;
        Ok(resp.status().as_u16())
    }
}

/// Looks up the API's `error` field, returning a printable description.
pub(crate) fn error_field(value: &Value) -> Option<String> {
    let err = value.get("error")?;
    let described = err
        .get("error_msg")
        .or_else(|| err.get("description"))
        .or_else(|| value.get("description"))
        .and_then(Value::as_str);

    Some(match described {
        Some(msg) => msg.to_owned(),
        None => err.to_string(),
    })
}
