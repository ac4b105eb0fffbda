//! Country metadata client (IBGE países service).
//!
//! The service item nests the fields we need: the abbreviated display name
//! under `nome.abreviado` and the ISO alpha-2 code under
//! `id."ISO-3166-1-ALPHA-2"`. Only those two are deserialized.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_COUNTRIES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/paises/paises";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// One country as consumed by the UI: display name + alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pais {
    pub nome: String,
    pub alpha2: String,
}

#[derive(Debug, Deserialize)]
struct PaisItem {
    id: PaisId,
    nome: PaisNome,
}

#[derive(Debug, Deserialize)]
struct PaisId {
    #[serde(rename = "ISO-3166-1-ALPHA-2")]
    alpha2: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaisNome {
    abreviado: Option<String>,
}

/// Client for the public country list service.
#[derive(Debug, Clone)]
pub struct CountriesClient {
    url: Url,
    http: Client,
}

impl CountriesClient {
    pub fn new(url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self {
            url: Url::parse(url)?,
            http,
        })
    }

    /// Fetch the country list, dropping items without a usable name or code.
    pub async fn list(&self) -> Result<Vec<Pais>, ClientError> {
        debug!(url = %self.url, "fetching country list");
        let resp = self.http.get(self.url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(ClientError::from_status(&resp));
        }
        let items: Vec<PaisItem> = resp.json().await?;
        let paises = items
            .into_iter()
            .filter_map(|item| {
                let nome = item.nome.abreviado?;
                let alpha2 = item.id.alpha2?;
                Some(Pais { nome, alpha2 })
            })
            .collect();
        Ok(paises)
    }
}

/// Deduplicate country names preserving first-seen order; the service repeats
/// names for territories sharing a designation.
pub fn dedup_country_names(paises: &[Pais]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for pais in paises {
        if seen.insert(pais.nome.clone()) {
            names.push(pais.nome.clone());
        }
    }
    names
}

/// Terminal stand-in for the original flag image CDN: turn an ISO alpha-2
/// code into its Unicode regional-indicator pair. Non-letter codes yield None.
pub fn flag_emoji(alpha2: &str) -> Option<String> {
    let code = alpha2.trim();
    if code.len() != 2 {
        return None;
    }
    let mut flag = String::with_capacity(8);
    for c in code.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return None;
        }
        let ri = char::from_u32(0x1F1E6 + (upper as u32 - 'A' as u32))?;
        flag.push(ri);
    }
    Some(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn items_without_name_or_code_are_dropped() {
        let json = r#"[
            {"id": {"ISO-3166-1-ALPHA-2": "BR"}, "nome": {"abreviado": "Brasil"}},
            {"id": {"ISO-3166-1-ALPHA-2": null}, "nome": {"abreviado": "Atlântida"}},
            {"id": {"ISO-3166-1-ALPHA-2": "US"}, "nome": {"abreviado": "Estados Unidos"}}
        ]"#;
        let items: Vec<PaisItem> = serde_json::from_str(json).unwrap();
        let paises: Vec<Pais> = items
            .into_iter()
            .filter_map(|item| {
                Some(Pais {
                    nome: item.nome.abreviado?,
                    alpha2: item.id.alpha2?,
                })
            })
            .collect();
        assert_eq!(paises.len(), 2);
        assert_eq!(paises[0].nome, "Brasil");
    }

    #[test]
    fn dedup_preserves_first_seen_order() {
        let paises = vec![
            Pais { nome: "Brasil".into(), alpha2: "BR".into() },
            Pais { nome: "Reino Unido".into(), alpha2: "GB".into() },
            Pais { nome: "Reino Unido".into(), alpha2: "IM".into() },
            Pais { nome: "Estados Unidos".into(), alpha2: "US".into() },
        ];
        assert_eq!(
            dedup_country_names(&paises),
            vec!["Brasil", "Reino Unido", "Estados Unidos"]
        );
    }

    #[test]
    fn flag_emoji_maps_alpha2_codes() {
        assert_eq!(flag_emoji("BR").unwrap(), "\u{1F1E7}\u{1F1F7}");
        assert_eq!(flag_emoji("us").unwrap(), "\u{1F1FA}\u{1F1F8}");
        assert_eq!(flag_emoji(""), None);
        assert_eq!(flag_emoji("B1"), None);
        assert_eq!(flag_emoji("BRA"), None);
    }
}
