use crate::config::SourceCredentials;
use crate::http::{error_field, HttpClient};
use crate::model::photo::PhotoItem;
use crate::sync_error::{SyncError, SyncResult};
use bytes::Bytes;
use json::Value;

pub(crate) static VK_API: &str = "https://api.vk.com/method/";

/// Client for the `photos.get` method of the photo source.
pub(crate) struct VkSource<'a, C: HttpClient> {
    http: &'a C,
    base_url: &'a str,
    credentials: &'a SourceCredentials,
}

impl<'a, C: HttpClient> VkSource<'a, C> {
    pub(crate) fn new(http: &'a C, base_url: &'a str, credentials: &'a SourceCredentials) -> Self {
        VkSource { http, base_url, credentials }
    }

    fn common_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("owner_id", self.credentials.owner_id.clone()),
            ("access_token", self.credentials.access_token.clone()),
            ("v", self.credentials.api_version.clone()),
        ]
    }

    /// Up to `count` photos of one album.
    pub(crate) async fn album_photos(&self, album_id: &str, count: u32) -> SyncResult<Vec<PhotoItem>> {
        let url = format!("{}photos.get", self.base_url);
        let mut params = self.common_params();
        params.push(("count", count.to_string()));
        params.push(("album_id", album_id.to_owned()));
        params.push(("extended", "1".to_owned()));

        let body = self.http.get_json(&url, &params, &[]).await?;
        parse_items(body)
    }

    pub(crate) async fn fetch(&self, url: &str) -> SyncResult<Bytes> {
        self.http.get_bytes(url).await
    }
}

fn parse_items(mut body: Value) -> SyncResult<Vec<PhotoItem>> {
    if let Some(reason) = error_field(&body) {
        return Err(SyncError::SourceAccessDenied(reason));
    }

    let items = body
        .get_mut("response")
        .and_then(|r| r.get_mut("items"))
        .map(Value::take)
        .ok_or_else(|| SyncError::UnexpectedResponse("photos.get without response.items".into()))?;

    Ok(json::from_value(items)?)
}
