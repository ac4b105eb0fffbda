//! Wire payload shapes for create/update calls.
//!
//! The backend exposes two disjoint endpoints with two disjoint body shapes;
//! both nest the shared display fields under `instituicao`.

use serde::Serialize;

use crate::draft::InstituicaoDraft;
use crate::model::{CountryVariant, PAIS_BRASIL};
use crate::validation::{FieldError, validate_draft};

/// Shared display fields nested in both payload variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstituicaoBase {
    pub nome: String,
    pub sigla: String,
}

/// Body for `POST/PUT /api/instituicao/brasileira`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstituicaoBrasileiraPayload {
    pub instituicao: InstituicaoBase,
    pub pais: String,
    pub cnpj: String,
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub estado: String,
    pub municipio: String,
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
}

/// Body for `POST/PUT /api/instituicao/estrangeira`. The draft's `estado`
/// field travels as `estadoRegiao`; `cnpj`, `bairro` and `numero` do not
/// exist in this shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstituicaoEstrangeiraPayload {
    pub instituicao: InstituicaoBase,
    pub pais: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    pub logradouro: String,
    #[serde(rename = "estadoRegiao")]
    pub estado_regiao: String,
    pub municipio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
}

/// A validated, variant-tagged request body ready for the repository client.
#[derive(Debug, Clone, PartialEq)]
pub enum InstituicaoPayload {
    Brasileira(InstituicaoBrasileiraPayload),
    Estrangeira(InstituicaoEstrangeiraPayload),
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl InstituicaoPayload {
    /// Validate the draft and shape it into the payload matching its current
    /// country variant. The variant is derived here, at submission time, from
    /// the live `pais` value.
    pub fn from_draft(draft: &InstituicaoDraft) -> Result<Self, Vec<FieldError>> {
        validate_draft(draft)?;

        let base = InstituicaoBase {
            nome: draft.nome.trim().to_string(),
            sigla: draft.sigla.trim().to_string(),
        };

        let payload = match draft.variant() {
            CountryVariant::Domestic => Self::Brasileira(InstituicaoBrasileiraPayload {
                instituicao: base,
                pais: PAIS_BRASIL.to_string(),
                cnpj: draft.cnpj.clone(),
                cep: draft.cep.clone(),
                logradouro: draft.logradouro.trim().to_string(),
                bairro: draft.bairro.trim().to_string(),
                estado: draft.estado.trim().to_string(),
                municipio: draft.municipio.trim().to_string(),
                numero: draft.numero.trim().to_string(),
                complemento: non_empty(&draft.complemento),
            }),
            CountryVariant::Foreign => Self::Estrangeira(InstituicaoEstrangeiraPayload {
                instituicao: base,
                pais: draft.pais.trim().to_string(),
                cep: non_empty(&draft.cep),
                logradouro: draft.logradouro.trim().to_string(),
                estado_regiao: draft.estado.trim().to_string(),
                municipio: draft.municipio.trim().to_string(),
                complemento: non_empty(&draft.complemento),
            }),
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn domestic_draft() -> InstituicaoDraft {
        InstituicaoDraft {
            nome: "Universidade Federal".into(),
            sigla: "UFMS".into(),
            pais: "Brasil".into(),
            cnpj: "12345678000199".into(),
            cep: "79002090".into(),
            logradouro: "Rua Quatorze de Julho".into(),
            bairro: "Centro".into(),
            estado: "Mato Grosso do Sul".into(),
            municipio: "Campo Grande".into(),
            numero: "123".into(),
            ..Default::default()
        }
    }

    fn foreign_draft() -> InstituicaoDraft {
        InstituicaoDraft {
            nome: "Stanford University".into(),
            sigla: "SU".into(),
            pais: "Estados Unidos".into(),
            logradouro: "450 Serra Mall".into(),
            estado: "California".into(),
            municipio: "Stanford".into(),
            // Stale leftovers from a country switch; must not leak into the body.
            cnpj: "12345678000199".into(),
            bairro: "Centro".into(),
            numero: "99".into(),
            ..Default::default()
        }
    }

    #[test]
    fn domestic_payload_includes_cnpj_and_omits_estado_regiao() {
        let payload = InstituicaoPayload::from_draft(&domestic_draft()).unwrap();
        let InstituicaoPayload::Brasileira(body) = payload else {
            panic!("expected domestic payload");
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["cnpj"], "12345678000199");
        assert_eq!(json["estado"], "Mato Grosso do Sul");
        assert!(json.get("estadoRegiao").is_none());
        assert_eq!(json["instituicao"]["nome"], "Universidade Federal");
    }

    #[test]
    fn foreign_payload_maps_estado_and_drops_domestic_fields() {
        let payload = InstituicaoPayload::from_draft(&foreign_draft()).unwrap();
        let InstituicaoPayload::Estrangeira(body) = payload else {
            panic!("expected foreign payload");
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["estadoRegiao"], "California");
        assert!(json.get("cnpj").is_none());
        assert!(json.get("bairro").is_none());
        assert!(json.get("numero").is_none());
        assert!(json.get("estado").is_none());
    }

    #[test]
    fn variant_is_recomputed_from_live_pais() {
        // A draft that was filled as domestic, then had its country edited,
        // must come out foreign at submission time.
        let mut draft = domestic_draft();
        draft.pais = "Portugal".into();
        let payload = InstituicaoPayload::from_draft(&draft).unwrap();
        assert!(matches!(payload, InstituicaoPayload::Estrangeira(_)));
    }

    #[test]
    fn invalid_draft_yields_no_partial_payload() {
        let mut draft = domestic_draft();
        draft.cnpj.clear();
        assert!(InstituicaoPayload::from_draft(&draft).is_err());
    }

    #[test]
    fn empty_optionals_are_skipped_on_the_wire() {
        let payload = InstituicaoPayload::from_draft(&foreign_draft()).unwrap();
        let InstituicaoPayload::Estrangeira(body) = payload else {
            unreachable!()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("cep").is_none());
        assert!(json.get("complemento").is_none());
    }
}
