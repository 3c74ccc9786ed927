//! Wizard state: an explicit screen container for the intake flow, plus the
//! in-flight token guard that supersedes stale plan responses.

use uuid::Uuid;

use crate::chat::FormSession;
use crate::intake::IntakeRecord;
use crate::plan::{RequiredForm, TaxPlan};

/// Identifies one in-flight plan request. A response is applied only while
/// its token is still the current one; anything else arrived too late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(Uuid);

impl RequestToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// The linear screen sequence: intro → intake → loading → results ⇄ filing.
/// Each variant carries exactly the payload that screen needs.
#[derive(Debug, Clone)]
pub enum Screen {
    Intro,
    Intake,
    Loading,
    Results(TaxPlan),
    Filing { plan: TaxPlan, session: FormSession },
}

/// Single-user interaction state. Nothing here outlives the session, and
/// nothing is shared across users.
#[derive(Debug)]
pub struct Wizard {
    screen: Screen,
    error: Option<String>,
    in_flight: Option<RequestToken>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            error: None,
            in_flight: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reset path: from any screen back to a fresh intake form. Discards the
    /// plan, any filing session, and any pending request.
    pub fn reset(&mut self) {
        self.screen = Screen::Intake;
        self.error = None;
        self.in_flight = None;
    }

    /// Submits the intake record: moves to the loading screen and hands back
    /// the token plus the summary text to send. Returns `None` while a plan
    /// request is already pending (double-submit guard).
    pub fn submit(&mut self, record: &IntakeRecord) -> Option<(RequestToken, String)> {
        if self.in_flight.is_some() {
            return None;
        }
        let token = RequestToken::new();
        self.in_flight = Some(token);
        self.error = None;
        self.screen = Screen::Loading;
        Some((token, record.summary()))
    }

    /// Applies a plan result. Returns `false` for stale tokens, which are
    /// ignored entirely. A failure returns the user to the intake form with
    /// a message; an empty `requiredForms` list is a valid "no filing
    /// needed" result, not an error.
    pub fn apply_plan(&mut self, token: RequestToken, result: Result<TaxPlan, String>) -> bool {
        if self.in_flight != Some(token) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(plan) => {
                self.error = None;
                self.screen = Screen::Results(plan);
            }
            Err(message) => {
                self.error = Some(message);
                self.screen = Screen::Intake;
            }
        }
        true
    }

    /// Opens an independent chat session for one of the plan's forms.
    /// Sessions never share history with each other or with the plan turn.
    pub fn open_form(&mut self, form: &RequiredForm) {
        if let Screen::Results(plan) = &self.screen {
            self.screen = Screen::Filing {
                plan: plan.clone(),
                session: FormSession::new(&form.form_id, &form.form_title),
            };
        }
    }

    /// Returns from a filing session to the results screen. The session and
    /// its history are discarded, not persisted.
    pub fn close_form(&mut self) {
        if let Screen::Filing { plan, .. } = &self.screen {
            self.screen = Screen::Results(plan.clone());
        }
    }

    /// The active filing session, when on the filing screen.
    pub fn session_mut(&mut self) -> Option<&mut FormSession> {
        match &mut self.screen {
            Screen::Filing { session, .. } => Some(session),
            _ => None,
        }
    }
}
