use std::collections::HashMap;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use instituto_client::{Instituicao, Pais, flag_emoji};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::{
    action::{Action, FormMode, PopupResult, Route},
    pages::Page,
    services::{self, Services},
    tui::{EventResponse, Frame},
};

const PAGE_SIZES: [usize; 3] = [5, 10, 15];

/// Paginated institution list with per-row status toggling.
///
/// The whole collection is fetched once and sliced locally; the backend has
/// no server-side pagination.
pub struct ListPage {
    services: Services,
    tx: UnboundedSender<Action>,
    token: CancellationToken,

    items: Vec<Instituicao>,
    flags: HashMap<String, String>,
    page: usize,
    page_size: usize,
    selected: usize,
    /// Toggle waiting for the confirm popup: (id, activate).
    pending_toggle: Option<(u64, bool)>,
}

/// Start/end of the visible slice for a page.
fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let start = (page * page_size).min(len);
    let end = (start + page_size).min(len);
    (start, end)
}

/// Pagination footer label, `0-0 de 0` when the collection is empty.
fn page_label(len: usize, page: usize, page_size: usize) -> String {
    if len == 0 {
        return "0-0 de 0".into();
    }
    let (start, end) = page_bounds(len, page, page_size);
    format!("{}-{} de {}", start + 1, end, len)
}

impl ListPage {
    pub fn new(services: Services, tx: UnboundedSender<Action>) -> Self {
        Self {
            services,
            tx,
            token: CancellationToken::new(),
            items: Vec::new(),
            flags: HashMap::new(),
            page: 0,
            page_size: PAGE_SIZES[0],
            selected: 0,
            pending_toggle: None,
        }
    }

    fn visible(&self) -> &[Instituicao] {
        let (start, end) = page_bounds(self.items.len(), self.page, self.page_size);
        &self.items[start..end]
    }

    fn selected_item(&self) -> Option<&Instituicao> {
        self.visible().get(self.selected)
    }

    fn last_page(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.items.len() - 1) / self.page_size
        }
    }

    fn clamp_cursor(&mut self) {
        self.page = self.page.min(self.last_page());
        let visible_len = self.visible().len();
        self.selected = self.selected.min(visible_len.saturating_sub(1));
    }

    fn cycle_page_size(&mut self) {
        let idx = PAGE_SIZES
            .iter()
            .position(|s| *s == self.page_size)
            .unwrap_or(0);
        self.page_size = PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()];
        // Changing the page size always jumps back to the first page.
        self.page = 0;
        self.selected = 0;
    }

    fn country_cell(&self, pais: &str) -> String {
        match self.flags.get(pais) {
            Some(flag) => format!("{flag} {pais}"),
            None => pais.to_string(),
        }
    }

    fn request_toggle(&mut self) -> Option<Action> {
        let item = self.selected_item()?;
        let activate = !item.status;
        self.pending_toggle = Some((item.id, activate));
        let question = if activate {
            "Você realmente deseja ativar esta instituição?"
        } else {
            "Você realmente deseja inativar esta instituição?"
        };
        Some(Action::Confirm {
            title: if activate { "Ativar" } else { "Inativar" }.into(),
            question: question.into(),
        })
    }
}

impl Page for ListPage {
    fn name(&self) -> &str {
        "instituicoes"
    }

    fn on_enter(&mut self) -> Result<()> {
        services::fetch_institutions(
            self.services.api.clone(),
            self.tx.clone(),
            self.token.clone(),
        );
        services::fetch_countries(
            self.services.countries.clone(),
            self.tx.clone(),
            self.token.clone(),
        );
        Ok(())
    }

    fn on_exit(&mut self) -> Result<()> {
        self.token.cancel();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<EventResponse<Action>>> {
        let action = match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Some(Action::Update)
            }
            KeyCode::Down => {
                let max = self.visible().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
                Some(Action::Update)
            }
            KeyCode::Left => {
                if self.page > 0 {
                    self.page -= 1;
                    self.selected = 0;
                }
                Some(Action::Update)
            }
            KeyCode::Right => {
                if self.page < self.last_page() {
                    self.page += 1;
                    self.selected = 0;
                }
                Some(Action::Update)
            }
            KeyCode::Char('s') => {
                self.cycle_page_size();
                Some(Action::Update)
            }
            KeyCode::Char('r') => {
                services::fetch_institutions(
                    self.services.api.clone(),
                    self.tx.clone(),
                    self.token.clone(),
                );
                None
            }
            KeyCode::Char('a') => Some(Action::Navigate(Route::Form {
                mode: FormMode::Create,
                id: None,
            })),
            KeyCode::Char('v') => self.selected_item().map(|item| {
                Action::Navigate(Route::Form {
                    mode: FormMode::View,
                    id: Some(item.id),
                })
            }),
            KeyCode::Char('e') => match self.selected_item() {
                // Only active institutions can be edited.
                Some(item) if item.status => Some(Action::Navigate(Route::Form {
                    mode: FormMode::Edit,
                    id: Some(item.id),
                })),
                _ => None,
            },
            KeyCode::Char('d') => self.request_toggle(),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => return Ok(None),
        };
        Ok(action.map(EventResponse::Stop))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::InstitutionsLoaded(items) => {
                self.items = items;
                self.clamp_cursor();
                Ok(Some(Action::Update))
            }
            Action::CountriesLoaded(paises) => {
                self.flags = country_flags(&paises);
                Ok(Some(Action::Update))
            }
            Action::PopupResult(PopupResult::Confirmed) => {
                if let Some((id, activate)) = self.pending_toggle.take() {
                    services::toggle_status(
                        self.services.api.clone(),
                        id,
                        activate,
                        self.tx.clone(),
                        self.token.clone(),
                    );
                }
                Ok(None)
            }
            Action::PopupResult(PopupResult::Cancelled) => {
                self.pending_toggle = None;
                Ok(None)
            }
            Action::StatusToggled { id, active } => {
                // Flip only the confirmed row; no refetch.
                if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.status = active;
                }
                Ok(Some(Action::Update))
            }
            Action::MutationFailed(message) => Ok(Some(Action::Alert {
                title: "Erro".into(),
                message,
            })),
            _ => Ok(None),
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let header = Row::new(["Nome", "Sigla", "País", "Status"].map(Cell::from))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .visible()
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let status = if item.status { "Ativa" } else { "Inativa" };
                let status_style = if item.status {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };
                let row = Row::new(vec![
                    Cell::from(item.nome.clone()),
                    Cell::from(item.sigla.clone()),
                    Cell::from(self.country_cell(&item.pais)),
                    Cell::from(Span::styled(status, status_style)),
                ]);
                if idx == self.selected {
                    row.style(Style::default().bg(Color::DarkGray))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Length(8),
                Constraint::Fill(1),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Instituições ")
                .borders(Borders::ALL),
        );
        frame.render_widget(table, chunks[0]);

        let footer = Line::from(vec![
            Span::raw(page_label(self.items.len(), self.page, self.page_size)),
            Span::raw("   "),
            Span::styled(
                format!("{} por página", self.page_size),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[1]);

        let hints = Line::from(
            "↑/↓: Selecionar  ←/→: Página  s: Tamanho  a: Adicionar  v: Visualizar  e: Editar  d: Inativar/Ativar  r: Atualizar  q: Sair",
        )
        .fg(Color::DarkGray);
        frame.render_widget(Paragraph::new(hints), chunks[2]);

        Ok(())
    }
}

fn country_flags(paises: &[Pais]) -> HashMap<String, String> {
    paises
        .iter()
        .filter_map(|p| flag_emoji(&p.alpha2).map(|flag| (p.nome.clone(), flag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(id: u64, status: bool) -> Instituicao {
        Instituicao {
            id,
            nome: format!("Instituição {id}"),
            sigla: format!("I{id}"),
            status,
            pais: "Brasil".into(),
            cep: Some("30130010".into()),
            logradouro: "Av. Afonso Pena".into(),
            complemento: None,
            estado: "MG".into(),
            municipio: "Belo Horizonte".into(),
            cnpj: Some("12345678000199".into()),
            bairro: Some("Centro".into()),
            numero: Some("100".into()),
        }
    }

    fn page_with_items(n: u64) -> ListPage {
        let services = Services {
            api: instituto_client::InstituicaoApi::new("http://127.0.0.1:8080").unwrap(),
            countries: instituto_client::CountriesClient::new(
                instituto_client::DEFAULT_COUNTRIES_URL,
            )
            .unwrap(),
            cep: instituto_client::CepClient::new(instituto_client::DEFAULT_CEP_URL).unwrap(),
        };
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let mut page = ListPage::new(services, tx);
        page.items = (1..=n).map(|i| sample(i, true)).collect();
        page
    }

    #[test]
    fn label_shows_slice_and_total() {
        assert_eq!(page_label(12, 0, 5), "1-5 de 12");
        assert_eq!(page_label(12, 1, 5), "6-10 de 12");
        assert_eq!(page_label(12, 2, 5), "11-12 de 12");
    }

    #[test]
    fn label_is_zero_form_when_empty() {
        assert_eq!(page_label(0, 0, 5), "0-0 de 0");
    }

    #[test]
    fn bounds_clamp_to_collection_end() {
        assert_eq!(page_bounds(7, 1, 5), (5, 7));
        assert_eq!(page_bounds(7, 3, 5), (7, 7));
    }

    #[test]
    fn changing_page_size_resets_to_first_page() {
        let mut page = page_with_items(30);
        page.page = 2;
        page.selected = 3;
        page.cycle_page_size();
        assert_eq!(page.page_size, 10);
        assert_eq!(page.page, 0);
        assert_eq!(page.selected, 0);
    }

    #[test]
    fn page_size_cycles_through_the_three_options() {
        let mut page = page_with_items(1);
        assert_eq!(page.page_size, 5);
        page.cycle_page_size();
        assert_eq!(page.page_size, 10);
        page.cycle_page_size();
        assert_eq!(page.page_size, 15);
        page.cycle_page_size();
        assert_eq!(page.page_size, 5);
    }

    #[test]
    fn status_toggle_flips_only_the_confirmed_row() {
        let mut page = page_with_items(3);
        page.update(Action::StatusToggled {
            id: 2,
            active: false,
        })
        .unwrap();
        assert!(page.items[0].status);
        assert!(!page.items[1].status);
        assert!(page.items[2].status);
    }

    #[test]
    fn failed_toggle_keeps_the_row_status_and_alerts() {
        let mut page = page_with_items(1);
        let action = page.request_toggle().unwrap();
        assert!(matches!(action, Action::Confirm { .. }));

        let next = page
            .update(Action::MutationFailed("falha na requisição".into()))
            .unwrap();
        assert!(page.items[0].status);
        assert!(matches!(next, Some(Action::Alert { ref title, .. }) if title == "Erro"));
    }

    #[test]
    fn cancelled_confirm_drops_the_pending_toggle() {
        let mut page = page_with_items(1);
        let action = page.request_toggle().unwrap();
        assert!(matches!(action, Action::Confirm { .. }));
        assert!(page.pending_toggle.is_some());
        page.update(Action::PopupResult(PopupResult::Cancelled))
            .unwrap();
        assert!(page.pending_toggle.is_none());
    }

    #[test]
    fn reload_clamps_page_and_selection() {
        let mut page = page_with_items(12);
        page.page = 2;
        page.selected = 1;
        let remaining: Vec<Instituicao> = (1..=3).map(|i| sample(i, true)).collect();
        page.update(Action::InstitutionsLoaded(remaining)).unwrap();
        assert_eq!(page.page, 0);
        assert_eq!(page.selected, 1);
    }

    #[test]
    fn edit_is_refused_for_inactive_rows() {
        let mut page = page_with_items(1);
        page.items[0].status = false;
        let response = page
            .handle_key_events(KeyEvent::new(
                KeyCode::Char('e'),
                crossterm::event::KeyModifiers::NONE,
            ))
            .unwrap();
        assert!(response.is_none());
    }

    #[test]
    fn country_cell_prepends_known_flag() {
        let mut page = page_with_items(1);
        page.update(Action::CountriesLoaded(vec![Pais {
            nome: "Brasil".into(),
            alpha2: "BR".into(),
        }]))
        .unwrap();
        assert_eq!(page.country_cell("Brasil"), "🇧🇷 Brasil");
        assert_eq!(page.country_cell("Atlântida"), "Atlântida");
    }
}
