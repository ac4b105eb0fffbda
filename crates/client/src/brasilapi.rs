//! CEP → address lookup client (BrasilAPI).

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ClientError;
use crate::model::CountryVariant;

pub const DEFAULT_CEP_URL: &str = "https://brasilapi.com.br/api/cep/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const CEP_LEN: usize = 8;

/// Address data returned for a CEP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Endereco {
    #[serde(default)]
    pub cep: String,
    pub state: String,
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub neighborhood: String,
}

/// Auto-fill trigger predicate: the country must be the domestic one and the
/// code exactly eight ASCII digits. Anything else must not fire a lookup.
pub fn should_lookup_cep(pais: &str, cep: &str) -> bool {
    CountryVariant::of(pais).is_domestic()
        && cep.len() == CEP_LEN
        && cep.chars().all(|c| c.is_ascii_digit())
}

/// Client for the public CEP lookup service.
#[derive(Debug, Clone)]
pub struct CepClient {
    base_url: Url,
    http: Client,
}

impl CepClient {
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

    /// `GET {base}/{cep}`. Callers gate on [`should_lookup_cep`]; this method
    /// does not re-check the trigger condition.
    pub async fn lookup(&self, cep: &str) -> Result<Endereco, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(cep);
        debug!(%url, "looking up CEP");
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PAIS_BRASIL;

    #[test]
    fn lookup_fires_only_for_domestic_eight_digit_codes() {
        assert!(should_lookup_cep(PAIS_BRASIL, "79002090"));

        // wrong country
        assert!(!should_lookup_cep("Estados Unidos", "79002090"));
        // incomplete
        assert!(!should_lookup_cep(PAIS_BRASIL, "7900209"));
        // too long
        assert!(!should_lookup_cep(PAIS_BRASIL, "790020900"));
        // formatted / non-numeric
        assert!(!should_lookup_cep(PAIS_BRASIL, "79002-09"));
        assert!(!should_lookup_cep(PAIS_BRASIL, "7900209a"));
        assert!(!should_lookup_cep(PAIS_BRASIL, ""));
    }

    #[test]
    fn endereco_deserializes_service_shape() {
        let json = r#"{
            "cep": "79002090",
            "state": "MS",
            "city": "Campo Grande",
            "neighborhood": "Centro",
            "street": "Rua Quatorze de Julho",
            "service": "viacep"
        }"#;
        let endereco: Endereco = serde_json::from_str(json).unwrap();
        assert_eq!(endereco.state, "MS");
        assert_eq!(endereco.street, "Rua Quatorze de Julho");
    }
}
