use serde::{Deserialize, Serialize};

/// Country name the backend uses to mark domestic records.
pub const PAIS_BRASIL: &str = "Brasil";

/// Read model returned by the backend for both record variants
/// (`GET /api/instituicao` and `GET /api/instituicao/{id}`).
///
/// Field names follow the wire format. `cnpj`, `bairro` and `numero` are only
/// populated for domestic records; foreign records carry their state/region in
/// `estado`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instituicao {
    pub id: u64,
    pub nome: String,
    pub sigla: String,
    pub status: bool,
    pub pais: String,
    #[serde(default)]
    pub cep: Option<String>,
    pub logradouro: String,
    #[serde(default)]
    pub complemento: Option<String>,
    pub estado: String,
    pub municipio: String,
    #[serde(default)]
    pub cnpj: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
}

impl Instituicao {
    /// Variant derived from the record's live country value.
    pub fn variant(&self) -> CountryVariant {
        CountryVariant::of(&self.pais)
    }
}

/// The two mutually exclusive shapes an institution's address/tax fields take.
///
/// Always derived from the current `pais` value, never cached: validation and
/// payload construction match exhaustively on this, so a country edit in the
/// form can never diverge from the shape that gets submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryVariant {
    Domestic,
    Foreign,
}

impl CountryVariant {
    pub fn of(pais: &str) -> Self {
        if pais == PAIS_BRASIL {
            Self::Domestic
        } else {
            Self::Foreign
        }
    }

    pub fn is_domestic(self) -> bool {
        matches!(self, Self::Domestic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn variant_follows_live_country_value() {
        assert_eq!(CountryVariant::of("Brasil"), CountryVariant::Domestic);
        assert_eq!(CountryVariant::of("Estados Unidos"), CountryVariant::Foreign);
        // Case and spelling matter; only the exact backend marker is domestic.
        assert_eq!(CountryVariant::of("brasil"), CountryVariant::Foreign);
        assert_eq!(CountryVariant::of(""), CountryVariant::Foreign);
    }

    #[test]
    fn read_model_accepts_foreign_records_without_domestic_fields() {
        let json = r#"{
            "id": 7,
            "nome": "Stanford University",
            "sigla": "SU",
            "status": true,
            "pais": "Estados Unidos",
            "cep": "94305",
            "logradouro": "450 Serra Mall",
            "complemento": null,
            "estado": "California",
            "municipio": "Stanford",
            "cnpj": null,
            "bairro": null,
            "numero": null
        }"#;
        let inst: Instituicao = serde_json::from_str(json).unwrap();
        assert_eq!(inst.variant(), CountryVariant::Foreign);
        assert_eq!(inst.cnpj, None);
        assert_eq!(inst.estado, "California");
    }
}
