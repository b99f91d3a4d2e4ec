use crate::config::Config;
use crate::constant;
use crate::error::{DriveError, Result};
use crate::model::{Page, ParentList, RemoteObject};
use crate::service::DirectoryService;
use diagnostics::*;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

use oauth2::{
    AuthUrl, ClientId, ClientSecret, RefreshToken, TokenResponse, TokenUrl, basic::BasicClient,
    reqwest::http_client,
};

/// Blocking Drive v2 API client
pub struct DriveClient {
    client: reqwest::blocking::Client,
    base_url: Url,
    token: String,
}

impl DriveClient {
    /// Create a client that sends `token` as its bearer credential.
    pub fn new(base_url: &str, token: String) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DriveError::config(format!("invalid base url {base_url:?}: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(constant::TIMEOUT_SECONDS))
            .build()
            .map_err(|e| DriveError::config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Authenticate with the configured credentials.
    ///
    /// A configured access token is used as-is, otherwise the refresh
    /// token is exchanged for a new access token.
    pub fn connect(config: &Config) -> Result<Self> {
        let token = match config.access_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => exchange_refresh_token(config)?,
        };
        Self::new(&config.base_url, token)
    }

    pub fn files_url(&self, cursor: Option<&str>) -> Result<Url> {
        let mut url = self.endpoint(&["files"])?;
        if let Some(cursor) = cursor {
            url.query_pairs_mut().append_pair("pageToken", cursor);
        }
        Ok(url)
    }

    pub fn file_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&["files", id])
    }

    pub fn parents_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&["files", id, "parents"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DriveError::config(format!("base url {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET `url` and decode the JSON body. `id` names the object the
    /// request is about, so a 404 can be reported as `NotFound`.
    fn call_api<T: for<'de> serde::Deserialize<'de>>(&self, url: Url, id: Option<&str>) -> Result<T> {
        debug!("GET {url}", url: url.as_str());
        let resp = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| DriveError::transient(format!("request to {url} failed: {e}")))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(DriveError::not_found(id));
            }
        }
        if !status.is_success() {
            let text = resp.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DriveError::transient(format!("HTTP {status} from {url}: {text}")));
        }

        let text = resp
            .text()
            .map_err(|e| DriveError::transient(format!("cannot read response from {url}: {e}")))?;
        serde_json::from_str(&text)
            .map_err(|e| DriveError::transient(format!("cannot parse response from {url}: {e}")))
    }
}

impl DirectoryService for DriveClient {
    fn list_page(&self, cursor: Option<&str>) -> Result<Page> {
        self.call_api(self.files_url(cursor)?, None)
    }

    fn get_object(&self, id: &str) -> Result<RemoteObject> {
        self.call_api(self.file_url(id)?, Some(id))
    }

    fn list_parents(&self, id: &str) -> Result<Vec<String>> {
        let parents: ParentList = self.call_api(self.parents_url(id)?, Some(id))?;
        Ok(parents.items.into_iter().map(|p| p.id).collect())
    }
}

fn exchange_refresh_token(config: &Config) -> Result<String> {
    let refresh_token = config
        .refresh_token
        .clone()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DriveError::config("either access_token or refresh_token is required"))?;

    let oauth = BasicClient::new(
        ClientId::new(config.client_id.clone()),
        Some(ClientSecret::new(config.client_secret.clone())),
        AuthUrl::new(constant::AUTH_URL.to_string())
            .map_err(|e| DriveError::config(format!("invalid authorization url: {e}")))?,
        Some(
            TokenUrl::new(constant::TOKEN_URL.to_string())
                .map_err(|e| DriveError::config(format!("invalid token url: {e}")))?,
        ),
    );

    let token = oauth
        .exchange_refresh_token(&RefreshToken::new(refresh_token))
        .request(http_client)
        .map_err(|e| DriveError::Auth {
            message: format!("{e:?}"),
        })?;

    info!("Obtained access token");
    Ok(token.access_token().secret().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DriveClient {
        DriveClient::new(base, "token".to_string()).expect("client")
    }

    #[test]
    fn test_url_construction() {
        let c = client(constant::BASE_URL);
        assert_eq!(
            c.files_url(None).expect("url").as_str(),
            "https://www.googleapis.com/drive/v2/files"
        );
        assert_eq!(
            c.files_url(Some("a+b/c=")).expect("url").as_str(),
            "https://www.googleapis.com/drive/v2/files?pageToken=a%2Bb%2Fc%3D"
        );
        assert_eq!(
            c.file_url("0B12").expect("url").as_str(),
            "https://www.googleapis.com/drive/v2/files/0B12"
        );
        assert_eq!(
            c.parents_url("0B12").expect("url").as_str(),
            "https://www.googleapis.com/drive/v2/files/0B12/parents"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let c = client("http://localhost:8080/drive/v2/");
        assert_eq!(
            c.file_url("x").expect("url").as_str(),
            "http://localhost:8080/drive/v2/files/x"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            DriveClient::new("not a url", "t".to_string()),
            Err(DriveError::Config { .. })
        ));
    }

    #[test]
    fn test_unreachable_service_is_transient() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let c = client("http://127.0.0.1:9/drive/v2");
        let err = c.list_page(None).expect_err("no server");
        assert!(err.is_retryable());
    }
}
