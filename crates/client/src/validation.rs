//! Field validation mirroring the backend's rules, applied before submission
//! so the user gets one blocking message instead of a rejected request.
//!
//! Limits come from the backend's column definitions: shared fields are the
//! same for both variants, address rules differ per [`CountryVariant`].

use crate::draft::InstituicaoDraft;
use crate::model::CountryVariant;

/// A single validation failure, keyed by the draft field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn require_max(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "não pode ser vazio"));
    } else if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("deve ter no máximo {max} caracteres"),
        ));
    }
}

fn optional_max(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if !value.is_empty() && value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("deve ter no máximo {max} caracteres"),
        ));
    }
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Validate a draft against the rules of its current country variant.
///
/// Returns every violation found; an empty error list means the draft can be
/// turned into a wire payload.
pub fn validate_draft(draft: &InstituicaoDraft) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    require_max(&mut errors, "nome", &draft.nome, 32);
    require_max(&mut errors, "sigla", &draft.sigla, 8);
    if draft.pais.trim().is_empty() {
        errors.push(FieldError::new("pais", "não pode ser vazio"));
    }

    match draft.variant() {
        CountryVariant::Domestic => {
            if !all_digits(&draft.cnpj) || draft.cnpj.len() != 14 {
                errors.push(FieldError::new("cnpj", "deve conter exatamente 14 dígitos"));
            }
            if !all_digits(&draft.cep) || draft.cep.len() != 8 {
                errors.push(FieldError::new("cep", "deve conter exatamente 8 dígitos"));
            }
            require_max(&mut errors, "logradouro", &draft.logradouro, 32);
            require_max(&mut errors, "bairro", &draft.bairro, 32);
            require_max(&mut errors, "estado", &draft.estado, 32);
            require_max(&mut errors, "municipio", &draft.municipio, 32);
            require_max(&mut errors, "numero", &draft.numero, 8);
            optional_max(&mut errors, "complemento", &draft.complemento, 16);
        }
        CountryVariant::Foreign => {
            if !draft.cep.is_empty() && (!all_digits(&draft.cep) || draft.cep.len() > 9) {
                errors.push(FieldError::new("cep", "deve conter apenas dígitos (máximo 9)"));
            }
            require_max(&mut errors, "logradouro", &draft.logradouro, 32);
            require_max(&mut errors, "estado", &draft.estado, 32);
            require_max(&mut errors, "municipio", &draft.municipio, 32);
            optional_max(&mut errors, "complemento", &draft.complemento, 32);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            complemento: String::new(),
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
            ..Default::default()
        }
    }

    #[test]
    fn valid_drafts_pass() {
        assert!(validate_draft(&domestic_draft()).is_ok());
        assert!(validate_draft(&foreign_draft()).is_ok());
    }

    #[test]
    fn domestic_requires_cnpj_and_numeric_cep() {
        let mut draft = domestic_draft();
        draft.cnpj = "12.345.678/0001-99".into();
        draft.cep = "7900-209".into();
        let errors = validate_draft(&draft).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"cnpj"));
        assert!(fields.contains(&"cep"));
    }

    #[test]
    fn foreign_does_not_require_cnpj_bairro_numero_or_cep() {
        let mut draft = foreign_draft();
        draft.cnpj = String::new();
        draft.bairro = String::new();
        draft.numero = String::new();
        draft.cep = String::new();
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn foreign_cep_must_be_digits_only_when_present() {
        let mut draft = foreign_draft();
        draft.cep = "CA-94305".into();
        let errors = validate_draft(&draft).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "cep"));

        draft.cep = "94305".into();
        assert!(validate_draft(&draft).is_ok());
        draft.cep = "1234567890".into();
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn shared_limits_apply_to_both_variants() {
        let mut draft = foreign_draft();
        draft.nome = "x".repeat(33);
        draft.sigla = String::new();
        let errors = validate_draft(&draft).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"nome"));
        assert!(fields.contains(&"sigla"));
    }

    #[test]
    fn domestic_complemento_is_shorter_than_foreign() {
        let mut br = domestic_draft();
        br.complemento = "x".repeat(17);
        assert!(validate_draft(&br).is_err());

        let mut fo = foreign_draft();
        fo.complemento = "x".repeat(17);
        assert!(validate_draft(&fo).is_ok());
        fo.complemento = "x".repeat(33);
        assert!(validate_draft(&fo).is_err());
    }
}
