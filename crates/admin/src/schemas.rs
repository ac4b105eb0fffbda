//! Static schema registry for the institution form.
//!
//! One schema for the institution data step and two for the address step
//! (domestic vs. foreign layout). Which address schema applies is decided at
//! render time from the live `pais` value.

use instituto_client::PAIS_BRASIL;

use crate::components::form::{FormField, FormFieldKind, FormSchema};

/// Field keys shared between the schemas and the form page.
pub mod keys {
    pub const NOME: &str = "nome";
    pub const SIGLA: &str = "sigla";
    pub const PAIS: &str = "pais";
    pub const CEP: &str = "cep";
    pub const LOGRADOURO: &str = "logradouro";
    pub const NUMERO: &str = "numero";
    pub const COMPLEMENTO: &str = "complemento";
    pub const BAIRRO: &str = "bairro";
    pub const ESTADO: &str = "estado";
    pub const MUNICIPIO: &str = "municipio";
    pub const CNPJ: &str = "cnpj";
}

/// Country options offered until the IBGE list arrives (or when it fails).
pub fn fallback_countries() -> Vec<String> {
    [
        PAIS_BRASIL,
        "Argentina",
        "Chile",
        "Colômbia",
        "Estados Unidos",
        "França",
        "Alemanha",
        "Portugal",
        "Reino Unido",
        "Uruguai",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn required_max(
    label: &'static str,
    max: usize,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |v: &str| {
        if v.trim().is_empty() {
            Err(format!("O campo {label} é obrigatório"))
        } else if v.chars().count() > max {
            Err(format!("Máximo de {max} caracteres"))
        } else {
            Ok(())
        }
    }
}

fn optional_max(max: usize) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |v: &str| {
        if v.chars().count() > max {
            Err(format!("Máximo de {max} caracteres"))
        } else {
            Ok(())
        }
    }
}

fn optional_digits(max: usize) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |v: &str| {
        if v.is_empty() || (v.len() <= max && v.bytes().all(|b| b.is_ascii_digit())) {
            Ok(())
        } else {
            Err(format!("Deve conter apenas dígitos (máximo {max})"))
        }
    }
}

fn exact_digits(
    len: usize,
    message: &'static str,
) -> impl Fn(&str) -> Result<(), String> + Send + Sync + 'static {
    move |v: &str| {
        if v.len() == len && v.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Step 1: institution data.
pub fn institution_schema(countries: Vec<String>) -> FormSchema {
    FormSchema::new(
        "Dados da Instituição",
        vec![
            FormField::new(keys::NOME, "Nome", FormFieldKind::Text)
                .validator(required_max("Nome", 32)),
            FormField::new(keys::SIGLA, "Sigla", FormFieldKind::Text)
                .validator(required_max("Sigla", 8)),
            FormField::new(
                keys::PAIS,
                "País",
                FormFieldKind::Select { options: countries },
            ),
        ],
    )
}

/// Step 2, domestic layout.
pub fn address_schema_brasil() -> FormSchema {
    FormSchema::new(
        "Endereço",
        vec![
            FormField::new(keys::CEP, "CEP", FormFieldKind::Text)
                .help("8 dígitos; preenche o endereço automaticamente")
                .validator(exact_digits(8, "CEP deve ter 8 dígitos")),
            FormField::new(keys::LOGRADOURO, "Logradouro", FormFieldKind::Text)
                .validator(required_max("Logradouro", 32)),
            FormField::new(keys::NUMERO, "Número", FormFieldKind::Text)
                .validator(required_max("Número", 8)),
            FormField::new(keys::COMPLEMENTO, "Complemento", FormFieldKind::Text)
                .validator(optional_max(16)),
            FormField::new(keys::BAIRRO, "Bairro", FormFieldKind::Text)
                .validator(required_max("Bairro", 32)),
            FormField::new(keys::ESTADO, "Estado", FormFieldKind::Text)
                .validator(required_max("Estado", 32)),
            FormField::new(keys::MUNICIPIO, "Município", FormFieldKind::Text)
                .validator(required_max("Município", 32)),
            FormField::new(keys::CNPJ, "CNPJ", FormFieldKind::Text)
                .validator(exact_digits(14, "CNPJ deve ter 14 dígitos")),
        ],
    )
}

/// Step 2, foreign layout.
pub fn address_schema_estrangeira() -> FormSchema {
    FormSchema::new(
        "Endereço",
        vec![
            FormField::new(keys::CEP, "Código postal", FormFieldKind::Text)
                .validator(optional_digits(9)),
            FormField::new(keys::LOGRADOURO, "Logradouro", FormFieldKind::Text)
                .validator(required_max("Logradouro", 32)),
            FormField::new(keys::COMPLEMENTO, "Complemento", FormFieldKind::Text)
                .validator(optional_max(32)),
            FormField::new(keys::ESTADO, "Estado/Região", FormFieldKind::Text)
                .validator(required_max("Estado/Região", 32)),
            FormField::new(keys::MUNICIPIO, "Município", FormFieldKind::Text)
                .validator(required_max("Município", 32)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_countries_start_with_brasil() {
        let countries = fallback_countries();
        assert_eq!(countries[0], PAIS_BRASIL);
    }

    #[test]
    fn domestic_schema_requires_cnpj_digits() {
        let schema = address_schema_brasil();
        let cnpj = schema.field_by_key(keys::CNPJ).unwrap();
        let validator = cnpj.validator.as_ref().unwrap();
        assert!(validator("12345678000199").is_ok());
        assert!(validator("123").is_err());
        assert!(validator("1234567800019a").is_err());
    }

    #[test]
    fn foreign_postal_code_is_optional_but_digits_only() {
        let schema = address_schema_estrangeira();
        let cep = schema.field_by_key(keys::CEP).unwrap();
        let validator = cep.validator.as_ref().unwrap();
        assert!(validator("").is_ok());
        assert!(validator("94305").is_ok());
        assert!(validator("CA-94305").is_err());
        assert!(validator("1234567890").is_err());
    }

    #[test]
    fn foreign_schema_has_no_domestic_only_fields() {
        let schema = address_schema_estrangeira();
        assert!(schema.field_by_key(keys::CNPJ).is_none());
        assert!(schema.field_by_key(keys::BAIRRO).is_none());
        assert!(schema.field_by_key(keys::NUMERO).is_none());
    }

    #[test]
    fn required_fields_reject_blank_and_overlong_values() {
        let schema = institution_schema(fallback_countries());
        let nome = schema.field_by_key(keys::NOME).unwrap();
        let validator = nome.validator.as_ref().unwrap();
        assert!(validator("").is_err());
        assert!(validator("   ").is_err());
        assert!(validator(&"x".repeat(33)).is_err());
        assert!(validator("Universidade Federal").is_ok());
    }
}
