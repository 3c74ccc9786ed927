//! Plan proxy: the TaxPlan schema types, the strict client-side parse, and
//! the route handler that relays the provider's raw JSON text.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

/// A single form the user must file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredForm {
    pub form_id: String,
    pub form_title: String,
    pub reason: String,
}

/// One actionable step in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub step_title: String,
    pub step_details: String,
}

/// The structured filing plan produced from one intake submission.
///
/// An empty `required_forms` list is a valid "no filing needed" outcome, not
/// an error. The disclaimer is mandatory: a payload without it fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxPlan {
    pub disclaimer: String,
    pub analysis_summary: String,
    pub required_forms: Vec<RequiredForm>,
    pub next_steps: Vec<NextStep>,
    /// Clarifying questions; the model may omit them entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_questions: Option<Vec<String>>,
}

/// Parses the plan endpoint's relayed text into a [`TaxPlan`].
///
/// This is the only local schema check in the system: the proxy relays the
/// provider's text uninspected, and a parse failure here is the distinct
/// client-side "format" error. No repair is ever attempted.
pub fn parse_plan(text: &str) -> Result<TaxPlan, serde_json::Error> {
    serde_json::from_str(text)
}
