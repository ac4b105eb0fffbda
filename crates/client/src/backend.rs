use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::model::Instituicao;
use crate::payload::InstituicaoPayload;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Repository client for the institution backend.
///
/// Thin wrapper over the REST surface; no retries and no caching, every call
/// is a single independent request.
#[derive(Debug, Clone)]
pub struct InstituicaoApi {
    base_url: Url,
    http: Client,
}

impl InstituicaoApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self {
            base_url: Url::parse(base_url)?,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /api/instituicao` — the full collection, both variants mixed.
    pub async fn list(&self) -> Result<Vec<Instituicao>, ClientError> {
        let url = self.endpoint("/api/instituicao")?;
        debug!(%url, "listing institutions");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(resp.json().await?)
    }

    /// `GET /api/instituicao/{id}` — one record, used to hydrate edit/view.
    pub async fn fetch_one(&self, id: u64) -> Result<Instituicao, ClientError> {
        let url = self.endpoint(&format!("/api/instituicao/{id}"))?;
        debug!(%url, "fetching institution");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(resp.json().await?)
    }

    /// Create a record via the endpoint matching the payload's variant.
    pub async fn create(&self, payload: &InstituicaoPayload) -> Result<(), ClientError> {
        let resp = match payload {
            InstituicaoPayload::Brasileira(body) => {
                let url = self.endpoint("/api/instituicao/brasileira")?;
                debug!(%url, "creating domestic institution");
                self.http.post(url).json(body).send().await?
            }
            InstituicaoPayload::Estrangeira(body) => {
                let url = self.endpoint("/api/instituicao/estrangeira")?;
                debug!(%url, "creating foreign institution");
                self.http.post(url).json(body).send().await?
            }
        };
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(())
    }

    /// Update a record via the endpoint matching the payload's variant.
    pub async fn update(&self, id: u64, payload: &InstituicaoPayload) -> Result<(), ClientError> {
        let resp = match payload {
            InstituicaoPayload::Brasileira(body) => {
                let url = self.endpoint(&format!("/api/instituicao/brasileira/{id}"))?;
                debug!(%url, "updating domestic institution");
                self.http.put(url).json(body).send().await?
            }
            InstituicaoPayload::Estrangeira(body) => {
                let url = self.endpoint(&format!("/api/instituicao/estrangeira/{id}"))?;
                debug!(%url, "updating foreign institution");
                self.http.put(url).json(body).send().await?
            }
        };
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(())
    }

    /// `DELETE /api/instituicao/{id}` — deactivation, not removal.
    pub async fn deactivate(&self, id: u64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/instituicao/{id}"))?;
        debug!(%url, "deactivating institution");
        let resp = self.http.delete(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(())
    }

    /// `PUT /api/instituicao/reativar/{id}`.
    pub async fn reactivate(&self, id: u64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/instituicao/reativar/{id}"))?;
        debug!(%url, "reactivating institution");
        let resp = self.http.put(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_against_the_base_url() {
        let api = InstituicaoApi::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            api.endpoint("/api/instituicao/reativar/5").unwrap().as_str(),
            "http://127.0.0.1:8080/api/instituicao/reativar/5"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected_up_front() {
        assert!(InstituicaoApi::new("not a url").is_err());
    }
}
