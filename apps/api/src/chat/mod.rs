//! Chat proxy and the client-side form session it serves.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::llm_client::Content;

/// Supported system-instruction locales. A closed set: anything else falls
/// back to English rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Zh,
}

impl Language {
    /// Maps a language tag onto the closed locale set, defaulting to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "es" => Language::Es,
            "zh" => Language::Zh,
            _ => Language::En,
        }
    }
}

/// An in-progress per-form assistant conversation.
///
/// The visible transcript opens with a canned greeting. Every outgoing
/// request re-injects a two-turn preamble naming the form ahead of the
/// visible history: the provider is stateless per call, so form context must
/// travel with every request even though the transcript never shows it.
///
/// Sessions are independent; no history is shared with other forms or with
/// the plan-generation turn, and the whole session is discarded when the user
/// navigates back.
#[derive(Debug, Clone)]
pub struct FormSession {
    form_id: String,
    form_title: String,
    history: Vec<Content>,
}

impl FormSession {
    pub fn new(form_id: impl Into<String>, form_title: impl Into<String>) -> Self {
        let form_id = form_id.into();
        let greeting = format!(
            "Hi! I'm here to help you with Form {form_id}.\n\nAsk me anything about this form, like \"How do I fill out line 10?\" or \"What does 'dependent' mean?\""
        );
        Self {
            form_id,
            form_title: form_title.into(),
            history: vec![Content::model(greeting)],
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn form_title(&self) -> &str {
        &self.form_title
    }

    /// The visible transcript (greeting included, preamble excluded).
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Appends a user turn to the visible transcript. Turns are append-only;
    /// nothing is ever edited or removed.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(Content::user(text));
    }

    /// Appends an assistant reply to the visible transcript.
    pub fn push_reply(&mut self, text: impl Into<String>) {
        self.history.push(Content::model(text));
    }

    /// History for the next request: the two-turn form-context preamble
    /// followed by the visible transcript. The new user message is NOT
    /// included; the proxy appends it. The preamble is rebuilt on every
    /// call and never persisted as a visible turn.
    pub fn request_history(&self) -> Vec<Content> {
        let mut contents = Vec::with_capacity(self.history.len() + 2);
        contents.push(Content::user(format!(
            "I am asking about Form {} ({}).",
            self.form_id, self.form_title
        )));
        contents.push(Content::model(
            "Got it. I'm ready to help you with that form. What's your question?",
        ));
        contents.extend(self.history.iter().cloned());
        contents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::Role;

    #[test]
    fn language_tag_falls_back_to_english() {
        assert_eq!(Language::from_tag("en"), Language::En);
        assert_eq!(Language::from_tag("es"), Language::Es);
        assert_eq!(Language::from_tag("ZH"), Language::Zh);
        assert_eq!(Language::from_tag("fr"), Language::En);
        assert_eq!(Language::from_tag("pt-BR"), Language::En);
        assert_eq!(Language::from_tag(""), Language::En);
    }

    #[test]
    fn language_serializes_as_lowercase_tag() {
        assert_eq!(serde_json::to_value(Language::Es).unwrap(), "es");
        assert_eq!(serde_json::to_value(Language::default()).unwrap(), "en");
    }

    #[test]
    fn new_session_opens_with_a_greeting_naming_the_form() {
        let session = FormSession::new("Form 1040-NR", "U.S. Nonresident Alien Income Tax Return");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, Role::Model);
        assert!(session.history()[0].text().unwrap().contains("Form 1040-NR"));
    }

    #[test]
    fn preamble_is_prepended_for_empty_visible_history() {
        let mut session = FormSession::new("Form 8843", "Statement for Exempt Individuals");
        session.history.clear(); // simulate a transcript with no turns at all

        let request = session.request_history();
        assert_eq!(request.len(), 2);
        assert_eq!(request[0].role, Role::User);
        assert_eq!(
            request[0].text().unwrap(),
            "I am asking about Form 8843 (Statement for Exempt Individuals)."
        );
        assert_eq!(request[1].role, Role::Model);
        assert!(request[1].text().unwrap().starts_with("Got it."));
    }

    #[test]
    fn preamble_is_prepended_ahead_of_nonempty_history_on_every_call() {
        let mut session = FormSession::new("Form 1040", "U.S. Individual Income Tax Return");
        session.push_user("What is line 10?");
        session.push_reply("Line 10 is adjustments to income.");

        for _ in 0..2 {
            let request = session.request_history();
            assert!(request[0].text().unwrap().starts_with("I am asking about Form 1040"));
            assert!(request[1].text().unwrap().starts_with("Got it."));
            // greeting + two visible turns follow the preamble
            assert_eq!(request.len(), 5);
        }
    }

    #[test]
    fn preamble_never_enters_the_visible_transcript() {
        let session = FormSession::new("Form 1040", "U.S. Individual Income Tax Return");
        let _ = session.request_history();
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn transcript_is_append_only() {
        let mut session = FormSession::new("Form 1040", "U.S. Individual Income Tax Return");
        session.push_user("first");
        session.push_reply("second");
        session.push_user("third");
        let texts: Vec<&str> = session
            .history()
            .iter()
            .skip(1)
            .map(|c| c.text().unwrap())
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }
}
