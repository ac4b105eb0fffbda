use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

use crate::{
    action::{Action, Route},
    cli::Cli,
    components::{
        Component,
        popup::{PopupComponent, render_backdrop},
        popups::{AlertPopup, ConfirmPopup},
    },
    config::Config,
    pages::{FormPage, ListPage, Page},
    services::Services,
    tui::{Event, EventResponse, Frame, Tui},
};

/// The application: one active page, an optional modal popup, and the action
/// loop gluing events, pages and background completions together.
pub struct App {
    pub config: Config,
    services: Services,
    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
    page: Box<dyn Page>,
    popup: Option<Box<dyn PopupComponent>>,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Config::new()?;
        if let Some(base_url) = &cli.base_url {
            config.config.base_url = base_url.clone();
        }
        let services = Services::from_config(&config.config)?;
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let page = Box::new(ListPage::new(services.clone(), action_tx.clone()));

        Ok(Self {
            config,
            services,
            action_tx,
            action_rx,
            page,
            popup: None,
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.config.config.tick_rate)
            .frame_rate(self.config.config.frame_rate);
        tui.enter()?;

        self.page.on_enter()?;

        loop {
            if let Some(event) = tui.next().await {
                self.handle_event(event)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action, &mut tui)?;
            }

            if self.should_suspend {
                tui.suspend()?;
                self.action_tx.send(Action::Resume)?;
                tui = Tui::new()?
                    .tick_rate(self.config.config.tick_rate)
                    .frame_rate(self.config.config.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// Route an event popup-first, then to the active page, then to the
    /// app-level fallbacks.
    fn handle_event(&mut self, event: Event) -> Result<()> {
        let mut stop_propagation = false;

        if let Some(popup) = &mut self.popup {
            if let Some(response) = popup.handle_events(event.clone())? {
                match response {
                    EventResponse::Continue(action) => {
                        self.action_tx.send(action)?;
                    }
                    EventResponse::Stop(action) => {
                        self.action_tx.send(action)?;
                        stop_propagation = true;
                    }
                }
            }
            // A modal popup swallows key input even when it produced nothing.
            if popup.is_modal() && matches!(event, Event::Key(_)) {
                stop_propagation = true;
            }
        }

        if !stop_propagation {
            if let Some(response) = self.page.handle_events(event.clone())? {
                match response {
                    EventResponse::Continue(action) => {
                        self.action_tx.send(action)?;
                    }
                    EventResponse::Stop(action) => {
                        self.action_tx.send(action)?;
                        stop_propagation = true;
                    }
                }
            }
        }

        if !stop_propagation {
            match event {
                Event::Quit => self.action_tx.send(Action::Quit)?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Key(key) => {
                    if let Some(action) = global_key_action(key) {
                        self.action_tx.send(action)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action, tui: &mut Tui) -> Result<()> {
        if action != Action::Tick && action != Action::Render {
            debug!("{action:?}");
        }

        match &action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::Resize(w, h) => {
                tui.resize(Rect::new(0, 0, *w, *h))?;
                self.render(tui)?;
            }
            Action::Render => {
                self.render(tui)?;
            }
            Action::Error(message) => {
                error!("{message}");
                self.popup = Some(Box::new(AlertPopup::new("Erro", message.clone())));
            }
            Action::Alert { title, message } => {
                self.popup = Some(Box::new(AlertPopup::new(title.clone(), message.clone())));
            }
            Action::Confirm { title, question } => {
                self.popup = Some(Box::new(ConfirmPopup::new(title.clone(), question.clone())));
            }
            Action::ClosePopup => {
                self.popup = None;
            }
            Action::PopupResult(_) => {
                // The popup answered; close it and let the page react below.
                self.popup = None;
            }
            Action::Navigate(route) => {
                self.navigate(*route)?;
                return Ok(());
            }
            _ => {}
        }

        // Popups only consume input events; background completions always go
        // to the page, even while a dialog is open.
        if let Some(next) = self.page.update(action)? {
            self.action_tx.send(next)?;
        }
        Ok(())
    }

    fn navigate(&mut self, route: Route) -> Result<()> {
        self.page.on_exit()?;
        self.popup = None;
        self.page = match route {
            Route::List => Box::new(ListPage::new(self.services.clone(), self.action_tx.clone())),
            Route::Form { mode, id } => Box::new(FormPage::new(
                self.services.clone(),
                self.action_tx.clone(),
                mode,
                id,
            )),
        };
        self.page.on_enter()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        tui.draw(|frame| {
            if let Err(err) = self.draw(frame) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {err:?}")));
            }
        })?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<()> {
        let area = frame.area();
        self.page.draw(frame, area)?;

        if let Some(popup) = &mut self.popup {
            render_backdrop(frame, area);
            popup.draw(frame, area)?;
        }
        Ok(())
    }
}

/// App-level key fallbacks, applied when neither popup nor page consumed the
/// key.
fn global_key_action(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => Some(Action::Suspend),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let services = Services {
            api: instituto_client::InstituicaoApi::new("http://127.0.0.1:8080").unwrap(),
            countries: instituto_client::CountriesClient::new(
                instituto_client::DEFAULT_COUNTRIES_URL,
            )
            .unwrap(),
            cep: instituto_client::CepClient::new(instituto_client::DEFAULT_CEP_URL).unwrap(),
        };
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let page = Box::new(ListPage::new(services.clone(), action_tx.clone()));
        App {
            config: Config::default(),
            services,
            action_tx,
            action_rx,
            page,
            popup: None,
            should_quit: false,
            should_suspend: false,
        }
    }

    #[tokio::test]
    async fn completions_reach_the_page_while_a_popup_is_open() {
        let mut app = test_app();
        app.popup = Some(Box::new(ConfirmPopup::new(
            "Confirmação",
            "Você realmente deseja inativar esta instituição?",
        )));

        let mut tui = Tui::new().unwrap();
        app.handle_action(Action::MutationFailed("falhou".into()), &mut tui)
            .unwrap();

        let next = app.action_rx.try_recv().unwrap();
        assert!(matches!(next, Action::Alert { ref title, .. } if title == "Erro"));
    }

    #[test]
    fn ctrl_c_and_ctrl_z_map_to_app_actions() {
        let quit = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(global_key_action(quit), Some(Action::Quit));
        let suspend = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(global_key_action(suspend), Some(Action::Suspend));
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(global_key_action(plain), None);
    }
}
