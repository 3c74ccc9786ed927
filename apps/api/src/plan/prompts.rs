//! Prompt constants and the advisory response schema for the plan proxy.

use serde_json::{json, Value};

use crate::chat::Language;

/// Fixed system instruction for plan generation. Mandates the plain-language
/// tone, the non-advisor disclaimer, and the inference of forms and steps
/// from the user's situation.
pub const PLAN_SYSTEM_PROMPT: &str = "You are 'TaxPal,' a friendly and professional AI assistant. Your goal is to help users with low financial literacy understand their U.S. tax filing requirements.
You are NOT a licensed tax advisor or CPA. You MUST include a disclaimer in your summary that your advice is for informational purposes ONLY and the user should consult a qualified professional for financial advice.
Your tone must be simple, encouraging, and clear. Avoid all complex jargon.
The user will provide their information. Your task is to analyze it and return a JSON object with a plan.
Focus on identifying the correct forms and next steps based on their specific situation (e.g., nationality, income types, SSN status, years in US).";

/// Plan system instruction for the requested locale. Unsupported tags have
/// already been folded into the default by [`Language::from_tag`]; the plan
/// shape itself stays fixed, only the output language shifts.
pub fn system_prompt(language: Language) -> String {
    match language {
        Language::En => PLAN_SYSTEM_PROMPT.to_string(),
        Language::Es => format!(
            "{PLAN_SYSTEM_PROMPT}\nIMPORTANT: Generate every text field of the JSON object in Spanish."
        ),
        Language::Zh => format!(
            "{PLAN_SYSTEM_PROMPT}\nIMPORTANT: Generate every text field of the JSON object in Chinese."
        ),
    }
}

/// Advisory JSON schema forwarded in `generationConfig.responseSchema`.
/// The provider treats it as a constraint on its output; this service never
/// validates against it; the caller's parse attempt is the only local check.
pub fn tax_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "disclaimer": {
                "type": "STRING",
                "description": "A mandatory, friendly disclaimer that this is not professional tax advice. Start with 'Please remember...'"
            },
            "analysisSummary": {
                "type": "STRING",
                "description": "A simple, one-paragraph summary of the user's tax situation in plain English."
            },
            "requiredForms": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "formId": {
                            "type": "STRING",
                            "description": "The official form name, e.g., 'Form 1040-NR'"
                        },
                        "formTitle": {
                            "type": "STRING",
                            "description": "The full title of the form, e.g., 'U.S. Nonresident Alien Income Tax Return'"
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "A simple, one-sentence explanation of *why* this user needs this form based on their inputs."
                        }
                    },
                    "required": ["formId", "formTitle", "reason"]
                }
            },
            "nextSteps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "stepTitle": {
                            "type": "STRING",
                            "description": "Short title for the step (e.g., 'Gather W-2s')"
                        },
                        "stepDetails": {
                            "type": "STRING",
                            "description": "Detailed explanation of how to complete this step. Include full URLs (e.g., 'https://www.irs.gov/...') if helpful for things like tax treaties."
                        }
                    },
                    "required": ["stepTitle", "stepDetails"]
                }
            },
            "keyQuestions": {
                "type": "ARRAY",
                "items": {
                    "type": "STRING",
                    "description": "A clarifying question to ask the user to further refine the process, e.g., 'Were you physically present in the U.S. for more than 183 days last year?'"
                }
            }
        },
        "required": ["disclaimer", "analysisSummary", "requiredForms", "nextSteps"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_the_mandatory_plan_fields() {
        let schema = tax_plan_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["disclaimer", "analysisSummary", "requiredForms", "nextSteps"]
        );
        // keyQuestions is described but optional
        assert!(schema["properties"].get("keyQuestions").is_some());
        assert!(!required.contains(&"keyQuestions"));
    }

    #[test]
    fn every_form_field_is_mandatory_in_the_schema() {
        let schema = tax_plan_schema();
        let required = schema["properties"]["requiredForms"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 3);
    }

    #[test]
    fn localized_instructions_extend_the_fixed_prompt() {
        assert_eq!(system_prompt(Language::En), PLAN_SYSTEM_PROMPT);
        assert!(system_prompt(Language::Es).starts_with(PLAN_SYSTEM_PROMPT));
        assert!(system_prompt(Language::Es).contains("Spanish"));
        assert!(system_prompt(Language::Zh).contains("Chinese"));
    }
}
