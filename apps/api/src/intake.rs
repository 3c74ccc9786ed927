//! Intake record: the user's self-reported tax situation and the labeled
//! free-text summary the plan proxy receives.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current job status, as offered by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Employed,
    SelfEmployed,
    Student,
    Unemployed,
    Retired,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobStatus::Employed => "Employed",
            JobStatus::SelfEmployed => "Self-Employed",
            JobStatus::Student => "Student",
            JobStatus::Unemployed => "Unemployed",
            JobStatus::Retired => "Retired",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingStatus {
    Rent,
    Own,
}

impl fmt::Display for HousingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HousingStatus::Rent => "Rent",
            HousingStatus::Own => "Own",
        })
    }
}

/// Income source tags. Labels match the intake form's checkbox values, which
/// is what the model sees in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeSource {
    Wages,
    SelfEmployment,
    Investment,
    Rental,
    Crypto,
    Other,
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IncomeSource::Wages => "W-2 Salary (from an employer)",
            IncomeSource::SelfEmployment => "Self-Employment / Freelance (1099-NEC/MISC)",
            IncomeSource::Investment => "Stock Investments (Dividends/Capital Gains)",
            IncomeSource::Rental => "Rental Income",
            IncomeSource::Crypto => "Cryptocurrency",
            IncomeSource::Other => "Other",
        })
    }
}

/// Filing status (expanded intake variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FilingStatus::Single => "Single",
            FilingStatus::MarriedFilingJointly => "Married Filing Jointly",
            FilingStatus::MarriedFilingSeparately => "Married Filing Separately",
            FilingStatus::HeadOfHousehold => "Head of Household",
            FilingStatus::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        })
    }
}

/// Rough annual income bracket (expanded intake variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeBracket {
    Under25k,
    From25kTo50k,
    From50kTo100k,
    From100kTo200k,
    Over200k,
}

impl fmt::Display for IncomeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IncomeBracket::Under25k => "Under $25,000",
            IncomeBracket::From25kTo50k => "$25,000 to $50,000",
            IncomeBracket::From50kTo100k => "$50,000 to $100,000",
            IncomeBracket::From100kTo200k => "$100,000 to $200,000",
            IncomeBracket::Over200k => "Over $200,000",
        })
    }
}

/// One user's self-reported tax situation. Plain data owned by a single
/// interactive session; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    pub nationality: String,
    /// Two-letter state code, or "N/A" for non-residents.
    pub state: String,
    /// Meaningful only when `nationality` is non-domestic; absence elsewhere
    /// is not an error.
    #[serde(default)]
    pub years_in_us: Option<u32>,
    pub job_status: JobStatus,
    pub has_ssn: bool,
    pub is_student: bool,
    pub housing_status: HousingStatus,
    pub owns_car: bool,
    #[serde(default)]
    pub income_sources: Vec<IncomeSource>,
    #[serde(default)]
    pub filing_status: Option<FilingStatus>,
    #[serde(default)]
    pub income_bracket: Option<IncomeBracket>,
    #[serde(default)]
    pub dependents: Option<String>,
    #[serde(default)]
    pub specifics: String,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

impl IntakeRecord {
    /// True when nationality normalizes to the domestic value.
    pub fn is_domestic(&self) -> bool {
        let nationality = self.nationality.trim();
        nationality.eq_ignore_ascii_case("usa") || nationality.eq_ignore_ascii_case("us")
    }

    /// Builds the free-text situation paragraph sent to the plan endpoint.
    ///
    /// Field order and presence mirror the intake form. "Years in US" is
    /// emitted only for non-domestic nationality; when unset there, it
    /// renders as an explicit "Not specified" rather than an empty field.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Here is my tax situation. Please analyze it and provide a plan.".to_string(),
            format!("- Nationality: {}", self.nationality),
        ];

        if !self.is_domestic() {
            let years = self
                .years_in_us
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Not specified".to_string());
            lines.push(format!("- Years in US: {years}"));
        }

        lines.push(format!("- State: {}", self.state));
        lines.push(format!("- Job Status: {}", self.job_status));
        lines.push(format!("- Has SSN/ITIN: {}", yes_no(self.has_ssn)));
        lines.push(format!("- Is a student: {}", yes_no(self.is_student)));
        lines.push(format!("- Housing Status: {}", self.housing_status));
        lines.push(format!("- Owns a car: {}", yes_no(self.owns_car)));

        if let Some(filing_status) = self.filing_status {
            lines.push(format!("- Filing Status: {filing_status}"));
        }
        if let Some(income_bracket) = self.income_bracket {
            lines.push(format!("- Income Bracket: {income_bracket}"));
        }
        if let Some(dependents) = &self.dependents {
            lines.push(format!("- Dependents: {dependents}"));
        }

        let sources = if self.income_sources.is_empty() {
            "None listed".to_string()
        } else {
            self.income_sources
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!("- Income Sources: {sources}"));

        let details = self.specifics.trim();
        lines.push(format!(
            "- Other details: {}",
            if details.is_empty() { "None" } else { details }
        ));

        lines.join("\n")
    }
}
