//! Background request helpers.
//!
//! Every call runs on a spawned tokio task and completes by sending an
//! `Action` back into the UI loop. Each task races the owning page's
//! `CancellationToken`, so requests belonging to a page die with it; a
//! cancelled completion is never delivered.

use instituto_client::{
    CepClient, CountriesClient, InstituicaoApi, InstituicaoPayload,
};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::{action::Action, config::AppConfig};

/// The HTTP clients shared by all pages.
#[derive(Debug, Clone)]
pub struct Services {
    pub api: InstituicaoApi,
    pub countries: CountriesClient,
    pub cep: CepClient,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self, instituto_client::ClientError> {
        Ok(Self {
            api: InstituicaoApi::new(&config.base_url)?,
            countries: CountriesClient::new(&config.countries_url)?,
            cep: CepClient::new(&config.cep_url)?,
        })
    }
}

/// Fetch the full institution collection. Failures are logged only; the page
/// keeps its last known state.
pub fn fetch_institutions(
    api: InstituicaoApi,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = api.list() => match result {
                Ok(items) => {
                    let _ = tx.send(Action::InstitutionsLoaded(items));
                }
                Err(err) => warn!("falha ao listar instituições: {err}"),
            }
        }
    });
}

/// Fetch the IBGE country list. Failures are logged only; callers keep the
/// static fallback options.
pub fn fetch_countries(
    client: CountriesClient,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = client.list() => match result {
                Ok(paises) => {
                    let _ = tx.send(Action::CountriesLoaded(paises));
                }
                Err(err) => warn!("falha ao buscar lista de países: {err}"),
            }
        }
    });
}

/// Fetch a single institution for the edit/view form.
pub fn fetch_record(
    api: InstituicaoApi,
    id: u64,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = api.fetch_one(id) => match result {
                Ok(record) => {
                    let _ = tx.send(Action::RecordLoaded(Box::new(record)));
                }
                Err(err) => {
                    error!("falha ao carregar instituição {id}: {err}");
                    let _ = tx.send(Action::MutationFailed(format!(
                        "Não foi possível carregar a instituição: {err}"
                    )));
                }
            }
        }
    });
}

/// Resolve a CEP. Failures are logged only; the address fields stay as typed.
pub fn resolve_cep(
    client: CepClient,
    cep: String,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = client.lookup(&cep) => match result {
                Ok(endereco) => {
                    let _ = tx.send(Action::CepResolved(Box::new(endereco)));
                }
                Err(err) => warn!("falha na consulta de CEP {cep}: {err}"),
            }
        }
    });
}

/// Activate or deactivate an institution. The local row is only flipped when
/// the backend confirmed the change.
pub fn toggle_status(
    api: InstituicaoApi,
    id: u64,
    activate: bool,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        let call = async {
            if activate {
                api.reactivate(id).await
            } else {
                api.deactivate(id).await
            }
        };
        tokio::select! {
            _ = token.cancelled() => {}
            result = call => match result {
                Ok(()) => {
                    let _ = tx.send(Action::StatusToggled { id, active: activate });
                }
                Err(err) => {
                    error!("falha ao alterar status da instituição {id}: {err}");
                    let _ = tx.send(Action::MutationFailed(format!(
                        "Não foi possível alterar o status: {err}"
                    )));
                }
            }
        }
    });
}

/// Create (id None) or update (id Some) an institution.
pub fn save_institution(
    api: InstituicaoApi,
    id: Option<u64>,
    payload: InstituicaoPayload,
    tx: UnboundedSender<Action>,
    token: CancellationToken,
) {
    tokio::spawn(async move {
        let call = async {
            match id {
                Some(id) => api.update(id, &payload).await,
                None => api.create(&payload).await,
            }
        };
        tokio::select! {
            _ = token.cancelled() => {}
            result = call => match result {
                Ok(()) => {
                    let _ = tx.send(Action::Saved { created: id.is_none() });
                }
                Err(err) => {
                    error!("falha ao salvar instituição: {err}");
                    let _ = tx.send(Action::MutationFailed(format!(
                        "Não foi possível salvar a instituição: {err}"
                    )));
                }
            }
        }
    });
}
