use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    Error, Result,
    api::{Backend, Format, GitStatus, Profile},
};

/// [`Backend`] backed by the Profilarr JSON API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        // Without a trailing slash `Url::join` would replace the last path segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&normalized).map_err(|err| Error::InvalidUrl {
            url: base_url.into(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|err| Error::InvalidUrl {
            url: format!("{}{path}", self.base_url),
            reason: err.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;

        check_status(&url, response)?
            .json()
            .await
            .map_err(|source| Error::Decode {
                url: url.to_string(),
                source,
            })
    }
}

fn check_status(url: &Url, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            url: url.to_string(),
            status,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn profiles(&self) -> Result<Vec<Profile>> {
        self.get_json("profile").await
    }

    async fn formats(&self) -> Result<Vec<Format>> {
        self.get_json("format").await
    }

    async fn git_status(&self) -> Result<GitStatus> {
        self.get_json("git/status").await
    }

    #[instrument(skip_all, fields(id = profile.id, name = %profile.name))]
    async fn save_profile(&self, profile: &Profile) -> Result<()> {
        let (url, builder) = if profile.is_persisted() {
            let url = self.endpoint(&format!("profile/{}", profile.id))?;
            debug!(%url, "PUT");
            (url.clone(), self.client.put(url))
        } else {
            let url = self.endpoint("profile")?;
            debug!(%url, "POST");
            (url.clone(), self.client.post(url))
        };

        let response = builder
            .json(profile)
            .send()
            .await
            .map_err(|source| Error::Request {
                url: url.to_string(),
                source,
            })?;

        check_status(&url, response)?;

        Ok(())
    }
}
