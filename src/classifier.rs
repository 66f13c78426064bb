use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Outcome of classifying a single ledger record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Classification {
    /// Routine operating cost (salaries, services, supplies). Consolidated
    /// into a single "Operations" leaf per sub-unit group.
    Operational,

    /// Programmatic spending (transfer payments, capital, named programs and
    /// grants). Kept as an individually labeled leaf.
    Substantive,
}

/// The substring patterns that drive classification. Externally supplied so
/// the same pipeline can be reused across fiscal datasets; `Default` carries
/// the rule set derived from the public accounts standard account layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct ClassificationRules {
    #[schemars(
        description = "Account-name substrings (case-insensitive) that mark a record as Operational. Checked first."
    )]
    pub operational_keywords: Vec<String>,

    #[schemars(
        description = "Account-name substring (case-insensitive) that marks transfer-payment spending as Substantive."
    )]
    pub transfer_marker: String,

    #[schemars(
        description = "Account names (case-insensitive, exact match) always treated as Substantive."
    )]
    pub capital_account_names: Vec<String>,

    #[schemars(
        description = "Account-detail keywords (case-insensitive) that mark named programs, grants and benefits as Substantive."
    )]
    pub substantive_detail_keywords: Vec<String>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            operational_keywords: vec![
                "salaries and wages".to_string(),
                "employee benefits".to_string(),
                "transportation and communication".to_string(),
                "services".to_string(),
                "supplies and equipment".to_string(),
                "recoveries".to_string(),
                "other transactions".to_string(),
                "amortization".to_string(),
                "bad debt expense".to_string(),
            ],
            transfer_marker: "transfer payments".to_string(),
            capital_account_names: vec!["capital expense".to_string(), "capital".to_string()],
            substantive_detail_keywords: vec![
                "program".to_string(),
                "grant".to_string(),
                "fund".to_string(),
                "transfer".to_string(),
                "payment".to_string(),
                "subsidy".to_string(),
                "benefit".to_string(),
                "insurance".to_string(),
                "pension".to_string(),
            ],
        }
    }
}

impl ClassificationRules {
    /// Classifies one (account name, account detail) pair. Pure and total:
    /// every input resolves to exactly one outcome, first match wins.
    pub fn classify(&self, account_name: &str, account_detail: Option<&str>) -> Classification {
        let name_lower = account_name.to_lowercase();

        if self
            .operational_keywords
            .iter()
            .any(|kw| name_lower.contains(&kw.to_lowercase()))
        {
            return Classification::Operational;
        }

        if name_lower.contains(&self.transfer_marker.to_lowercase()) {
            return Classification::Substantive;
        }

        if self
            .capital_account_names
            .iter()
            .any(|cap| name_lower == cap.to_lowercase())
        {
            return Classification::Substantive;
        }

        if let Some(detail) = account_detail.filter(|d| !d.is_empty()) {
            let detail_lower = detail.to_lowercase();
            if self
                .substantive_detail_keywords
                .iter()
                .any(|kw| detail_lower.contains(&kw.to_lowercase()))
            {
                return Classification::Substantive;
            }
        }

        Classification::Operational
    }

    /// True when the account name is transfer-payment spending, which uses the
    /// account detail alone as its category label.
    pub fn is_transfer(&self, account_name: &str) -> bool {
        account_name
            .to_lowercase()
            .contains(&self.transfer_marker.to_lowercase())
    }
}
