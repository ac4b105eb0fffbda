use instituto_client::{Endereco, Instituicao, Pais};
use strum::Display;

/// Result emitted by a modal popup back into the action loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupResult {
    Confirmed,
    Cancelled,
}

/// How the institution form was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    View,
}

impl FormMode {
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::View)
    }
}

/// Navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Form { mode: FormMode, id: Option<u64> },
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    /// Generic "state changed, redraw" signal from components.
    Update,
    /// Open a blocking acknowledge popup.
    Alert { title: String, message: String },
    /// Open an OK/Cancel popup; the answer comes back as `PopupResult`.
    Confirm { title: String, question: String },
    ClosePopup,
    PopupResult(PopupResult),
    Navigate(Route),

    // Completions of background requests; read-only fetch failures never
    // produce an action, they are logged at the call site only.
    InstitutionsLoaded(Vec<Instituicao>),
    CountriesLoaded(Vec<Pais>),
    RecordLoaded(Box<Instituicao>),
    CepResolved(Box<Endereco>),

    // Mutations: success flows as data, failure as a user-facing message.
    StatusToggled { id: u64, active: bool },
    Saved { created: bool },
    MutationFailed(String),
}
