use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use instituto_client::{
    CountryVariant, Endereco, Instituicao, InstituicaoDraft, InstituicaoPayload,
    dedup_country_names, should_lookup_cep,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::{
    action::{Action, FormMode, Route},
    components::form::FormEditor,
    components::stepper::Stepper,
    pages::Page,
    schemas::{self, keys},
    services::{self, Services},
    tui::{EventResponse, Frame},
};

const STEP_DATA: usize = 0;
const STEP_ADDRESS: usize = 1;
const STEP_DONE: usize = 2;

/// Two-step institution form: "Dados da Instituição", then "Endereço".
///
/// The same page serves create, edit and view mode. Edit and view hydrate
/// from a single record fetch and render nothing until it arrives; view is
/// read-only and cannot submit. Each step keeps its own `FormEditor`, so
/// moving back and forth preserves every entered value.
pub struct FormPage {
    services: Services,
    tx: UnboundedSender<Action>,
    token: CancellationToken,

    mode: FormMode,
    record_id: Option<u64>,
    step: usize,
    stepper: Stepper,
    data: FormEditor,
    address: FormEditor,
    /// Which layout the address editor currently holds.
    address_variant: CountryVariant,
    hydrated: bool,
    /// The (pais, cep) pair that last fired a lookup, to fire once per change.
    last_cep_key: Option<(String, String)>,
}

impl FormPage {
    pub fn new(
        services: Services,
        tx: UnboundedSender<Action>,
        mode: FormMode,
        record_id: Option<u64>,
    ) -> Self {
        let read_only = mode.is_read_only();
        let mut data =
            FormEditor::new(schemas::institution_schema(schemas::fallback_countries()))
                .read_only(read_only);
        data.set_value(keys::PAIS, instituto_client::PAIS_BRASIL);
        let address = FormEditor::new(schemas::address_schema_brasil()).read_only(read_only);

        Self {
            services,
            tx,
            token: CancellationToken::new(),
            mode,
            record_id,
            step: STEP_DATA,
            stepper: Stepper::new(vec!["Dados da Instituição", "Endereço"]),
            data,
            address,
            address_variant: CountryVariant::Domestic,
            hydrated: record_id.is_none(),
            last_cep_key: None,
        }
    }

    fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => " Nova Instituição ",
            FormMode::Edit => " Editar Instituição ",
            FormMode::View => " Visualizar Instituição ",
        }
    }

    fn active_editor(&mut self) -> &mut FormEditor {
        if self.step == STEP_DATA {
            &mut self.data
        } else {
            &mut self.address
        }
    }

    fn is_editing(&self) -> bool {
        self.data.is_editing() || self.address.is_editing()
    }

    /// Current draft assembled from both step editors.
    fn draft(&self) -> InstituicaoDraft {
        InstituicaoDraft {
            id: self.record_id,
            nome: self.data.value(keys::NOME).to_string(),
            sigla: self.data.value(keys::SIGLA).to_string(),
            pais: self.data.value(keys::PAIS).to_string(),
            cep: self.address.value(keys::CEP).to_string(),
            logradouro: self.address.value(keys::LOGRADOURO).to_string(),
            bairro: self.address.value(keys::BAIRRO).to_string(),
            estado: self.address.value(keys::ESTADO).to_string(),
            municipio: self.address.value(keys::MUNICIPIO).to_string(),
            numero: self.address.value(keys::NUMERO).to_string(),
            complemento: self.address.value(keys::COMPLEMENTO).to_string(),
            cnpj: self.address.value(keys::CNPJ).to_string(),
        }
    }

    fn hydrate(&mut self, record: &Instituicao) {
        let draft = InstituicaoDraft::from_record(record);
        self.data.set_value(keys::NOME, draft.nome);
        self.data.set_value(keys::SIGLA, draft.sigla);
        self.data.set_value(keys::PAIS, draft.pais.clone());
        self.address.set_value(keys::CEP, draft.cep.clone());
        self.address.set_value(keys::LOGRADOURO, draft.logradouro);
        self.address.set_value(keys::BAIRRO, draft.bairro);
        self.address.set_value(keys::ESTADO, draft.estado);
        self.address.set_value(keys::MUNICIPIO, draft.municipio);
        self.address.set_value(keys::NUMERO, draft.numero);
        self.address.set_value(keys::COMPLEMENTO, draft.complemento);
        self.address.set_value(keys::CNPJ, draft.cnpj);
        self.hydrated = true;
        // A hydrated CEP must not fire a lookup until the user changes it.
        self.last_cep_key = Some((draft.pais, draft.cep));
        self.sync_address_schema();
    }

    /// Swap the address layout when the live country crossed the
    /// domestic/foreign line. Captured values survive the swap.
    fn sync_address_schema(&mut self) {
        let variant = CountryVariant::of(self.data.value(keys::PAIS));
        if variant != self.address_variant {
            let schema = match variant {
                CountryVariant::Domestic => schemas::address_schema_brasil(),
                CountryVariant::Foreign => schemas::address_schema_estrangeira(),
            };
            self.address.set_schema(schema);
            self.address_variant = variant;
        }
    }

    /// Fire a CEP lookup when country and CEP form a new triggering pair.
    fn maybe_lookup_cep(&mut self) {
        let pais = self.data.value(keys::PAIS).to_string();
        let cep = self.address.value(keys::CEP).to_string();
        if should_lookup_cep(&pais, &cep) {
            let key = (pais, cep.clone());
            if self.last_cep_key.as_ref() != Some(&key) {
                self.last_cep_key = Some(key);
                services::resolve_cep(
                    self.services.cep.clone(),
                    cep,
                    self.tx.clone(),
                    self.token.clone(),
                );
            }
        } else {
            self.last_cep_key = None;
        }
    }

    fn apply_endereco(&mut self, endereco: &Endereco) {
        self.address.set_value(keys::ESTADO, endereco.state.clone());
        self.address
            .set_value(keys::MUNICIPIO, endereco.city.clone());
        self.address
            .set_value(keys::LOGRADOURO, endereco.street.clone());
        self.address
            .set_value(keys::BAIRRO, endereco.neighborhood.clone());
    }

    fn advance(&mut self) -> Option<Action> {
        match self.step {
            STEP_DATA => {
                if !self.mode.is_read_only() && !self.data.validate() {
                    return Some(Action::Update);
                }
                self.step = STEP_ADDRESS;
                self.sync_address_schema();
                Some(Action::Update)
            }
            STEP_ADDRESS if !self.mode.is_read_only() => self.submit(),
            _ => None,
        }
    }

    fn retreat(&mut self) -> Option<Action> {
        if self.step > STEP_DATA {
            self.step -= 1;
            Some(Action::Update)
        } else {
            None
        }
    }

    fn submit(&mut self) -> Option<Action> {
        // Inline feedback first, then the authoritative draft validation.
        self.address.validate();
        match InstituicaoPayload::from_draft(&self.draft()) {
            Ok(payload) => {
                let id = match self.mode {
                    FormMode::Edit => self.record_id,
                    _ => None,
                };
                services::save_institution(
                    self.services.api.clone(),
                    id,
                    payload,
                    self.tx.clone(),
                    self.token.clone(),
                );
                None
            }
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(|e| format!("• {}", e.message))
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(Action::Alert {
                    title: "Dados inválidos".into(),
                    message,
                })
            }
        }
    }
}

impl Page for FormPage {
    fn name(&self) -> &str {
        "formulario"
    }

    fn on_enter(&mut self) -> Result<()> {
        services::fetch_countries(
            self.services.countries.clone(),
            self.tx.clone(),
            self.token.clone(),
        );
        if let Some(id) = self.record_id {
            services::fetch_record(
                self.services.api.clone(),
                id,
                self.tx.clone(),
                self.token.clone(),
            );
        }
        Ok(())
    }

    fn on_exit(&mut self) -> Result<()> {
        self.token.cancel();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        if !self.hydrated {
            if key.code == KeyCode::Esc {
                return Ok(Some(EventResponse::Stop(Action::Navigate(Route::List))));
            }
            return Ok(None);
        }

        if self.is_editing() {
            let response = self.active_editor().handle_key_events(key)?;
            self.sync_address_schema();
            self.maybe_lookup_cep();
            return Ok(response);
        }

        match key.code {
            KeyCode::F(2) => Ok(self.advance().map(EventResponse::Stop)),
            KeyCode::F(3) => Ok(self.retreat().map(EventResponse::Stop)),
            KeyCode::Esc => Ok(Some(EventResponse::Stop(Action::Navigate(Route::List)))),
            _ => {
                let response = if self.step == STEP_DONE {
                    None
                } else {
                    self.active_editor().handle_key_events(key)?
                };
                self.sync_address_schema();
                self.maybe_lookup_cep();
                Ok(response)
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::CountriesLoaded(paises) => {
                let names = dedup_country_names(&paises);
                self.data.set_select_options(keys::PAIS, names);
                Ok(Some(Action::Update))
            }
            Action::RecordLoaded(record) => {
                self.hydrate(&record);
                Ok(Some(Action::Update))
            }
            Action::CepResolved(endereco) => {
                self.apply_endereco(&endereco);
                Ok(Some(Action::Update))
            }
            Action::Saved { created } => {
                self.step = STEP_DONE;
                let message = if created {
                    "Instituição criada com sucesso."
                } else {
                    "Instituição atualizada com sucesso."
                };
                Ok(Some(Action::Alert {
                    title: "Sucesso".into(),
                    message: message.into(),
                }))
            }
            Action::MutationFailed(message) => Ok(Some(Action::Alert {
                title: "Erro".into(),
                message,
            })),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let block = Block::default().title(self.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if !self.hydrated {
            frame.render_widget(Paragraph::new("Carregando..."), inner);
            return Ok(());
        }

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.stepper.select(self.step.min(STEP_ADDRESS));
        self.stepper.draw(frame, chunks[0]);

        if self.step == STEP_DONE {
            frame.render_widget(Paragraph::new("Concluído."), chunks[2]);
        } else {
            self.sync_address_schema();
            self.active_editor().draw(frame, chunks[2])?;
        }

        let hints = match (self.step, self.mode.is_read_only()) {
            (STEP_DATA, _) => "F2: Avançar  Esc: Voltar à lista",
            (STEP_ADDRESS, true) => "F3: Voltar  Esc: Voltar à lista",
            (STEP_ADDRESS, false) => "F2: Salvar  F3: Voltar  Esc: Voltar à lista",
            _ => "Esc: Voltar à lista",
        };
        frame.render_widget(
            Paragraph::new(Line::from(hints).fg(Color::DarkGray)),
            chunks[3],
        );

        Ok(())
    }
}
