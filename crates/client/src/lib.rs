//! Domain model and HTTP clients for the institution records backend.
//!
//! This crate is UI-free. It provides:
//! - the read model (`Instituicao`) and the draft type edited by the admin UI
//! - the tagged [`CountryVariant`] with exhaustive payload/validation handling
//! - the two wire payload shapes the backend accepts
//! - clients for the backend REST API and the two public reference services
//!   (IBGE country list, BrasilAPI CEP lookup)

mod backend;
mod brasilapi;
mod draft;
mod error;
mod ibge;
mod model;
mod payload;
mod validation;

pub use backend::InstituicaoApi;
pub use brasilapi::{CepClient, DEFAULT_CEP_URL, Endereco, should_lookup_cep};
pub use draft::InstituicaoDraft;
pub use error::ClientError;
pub use ibge::{CountriesClient, DEFAULT_COUNTRIES_URL, Pais, dedup_country_names, flag_emoji};
pub use model::{CountryVariant, Instituicao, PAIS_BRASIL};
pub use payload::{InstituicaoBrasileiraPayload, InstituicaoEstrangeiraPayload, InstituicaoPayload};
pub use validation::{FieldError, validate_draft};
