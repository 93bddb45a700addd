use crate::http::{error_field, HttpClient};
use crate::sync_error::{SyncError, SyncResult};
use bytes::Bytes;

pub(crate) static YANDEX_API: &str = "https://cloud-api.yandex.net/";

pub(crate) struct StoreClient<'a, C: HttpClient> {
    http: &'a C,
    base_url: &'a str,
    token: &'a str,
}

impl<'a, C: HttpClient> StoreClient<'a, C> {
    pub(crate) fn new(http: &'a C, base_url: &'a str, token: &'a str) -> Self {
        StoreClient { http, base_url, token }
    }

    fn auth(&self) -> [(&'static str, String); 1] {
        [("Authorization", format!("OAuth {}", self.token))]
    }

    pub(crate) async fn create_folder(&self, path: &str) -> SyncResult<()> {
        let url = format!("{}v1/disk/resources", self.base_url);
        let res = self
            .http
            .put_json(&url, &[("path", path.to_owned())], &self.auth())
            .await?;

        match error_field(&res) {
            Some(reason) => Err(SyncError::RemoteAccessDenied(reason)),
            None => Ok(()),
        }
    }

    /// Asks the disk where `path` may be uploaded to.
    pub(crate) async fn upload_url(&self, path: &str) -> SyncResult<String> {
        let url = format!("{}v1/disk/resources/upload", self.base_url);
        let res = self
            .http
            .get_json(&url, &[("path", path.to_owned())], &self.auth())
            .await?;

        if let Some(reason) = error_field(&res) {
            return Err(SyncError::RemoteAccessDenied(reason));
        }

        res.get("href")
            .and_then(|h| h.as_str())
            .map(String::from)
            .ok_or_else(|| SyncError::UnexpectedResponse(format!("no upload href for {}", path)))
    }

    pub(crate) async fn put(&self, path: &str, name: &str, body: Bytes) -> SyncResult<()> {
        let href = self.upload_url(path).await?;
        let status = self.http.put_bytes(&href, body).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(SyncError::UploadFailed { name: name.to_owned(), status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::{Call, MockHttp};

    #[tokio::test]
    async fn folder_error_is_remote_access_denied() {
        let http = MockHttp::new(vec![json::json!({
            "error": "UnauthorizedError",
            "description": "Unauthorized",
            "message": "Не авторизован."
        })]);
        let store = StoreClient::new(&http, YANDEX_API, "bad");

        match store.create_folder("photos_20240101_000000").await {
            Err(SyncError::RemoteAccessDenied(msg)) => assert_eq!(msg, "Unauthorized"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn put_fetches_href_then_sends_bytes() {
        let http = MockHttp::new(vec![json::json!({
            "href": "https://uploader.test/upload/abc",
            "method": "PUT",
            "templated": false
        })]);
        let store = StoreClient::new(&http, YANDEX_API, "token");

        store.put("photos/5.jpg", "5.jpg", Bytes::from_static(b"jpeg")).await.unwrap();

        let calls = http.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].query_value("path"), Some("photos/5.jpg"));
        assert_eq!(
            calls[1],
            Call::PutBytes {
                url: "https://uploader.test/upload/abc".into(),
                body: Bytes::from_static(b"jpeg"),
            }
        );
    }

    #[tokio::test]
    async fn rejected_stream_is_upload_failure() {
        let mut http = MockHttp::new(vec![json::json!({"href": "https://uploader.test/x"})]);
        http.upload_status = 507;
        let store = StoreClient::new(&http, YANDEX_API, "token");

        match store.put("photos/9.jpg", "9.jpg", Bytes::new()).await {
            Err(SyncError::UploadFailed { name, status }) => {
                assert_eq!(name, "9.jpg");
                assert_eq!(status, 507);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
