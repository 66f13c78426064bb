use crate::classifier::ClassificationRules;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One normalized row of government spending or revenue. Produced by the
/// external normalization step, consumed read-only by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LedgerRecord {
    #[schemars(
        description = "Ordered organizational levels, outermost first (e.g. [ministry, program]). At least one level."
    )]
    pub organization_path: Vec<String>,

    #[schemars(description = "Activity or item this spending belongs to, if the source export carried one.")]
    pub activity: Option<String>,

    #[schemars(description = "Sub-item within the activity, if any.")]
    pub sub_item: Option<String>,

    #[schemars(
        description = "Standard account name (e.g. 'Salaries and wages', 'Transfer payments')."
    )]
    pub account_name: String,

    #[schemars(
        description = "Account detail naming the specific program, grant or expense, if any."
    )]
    pub account_detail: Option<String>,

    #[schemars(
        description = "Expenditure category tag (e.g. 'Operating' or 'Capital'). Part of the aggregation key so operating and capital line items never merge."
    )]
    pub expenditure: Option<String>,

    #[schemars(
        description = "Signed amount in dollars. Negative values are valid recoveries/netting, not errors."
    )]
    pub amount: f64,
}

impl LedgerRecord {
    /// First organizational level (ministry).
    pub fn unit(&self) -> Option<&str> {
        self.organization_path.first().map(String::as_str)
    }

    /// Second organizational level (program), if present.
    pub fn sub_unit(&self) -> Option<&str> {
        self.organization_path.get(1).map(String::as_str)
    }

    /// Account detail, with blank values treated as absent.
    pub fn detail(&self) -> Option<&str> {
        self.account_detail
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}

fn default_materiality_threshold() -> f64 {
    1_000_000.0
}

fn default_tolerance() -> f64 {
    0.01
}

/// The full tunable surface of the pipeline. Both the rule set and the
/// threshold are supplied per invocation so the same build reuses across
/// fiscal datasets; nothing here is process-global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct AggregationConfig {
    #[schemars(description = "Substring rules splitting records into Operational vs Substantive.")]
    #[serde(default)]
    pub rules: ClassificationRules,

    #[schemars(
        description = "Dollar cutoff below which an individually computed substantive category is folded into 'Other'. Applied per sub-unit group, by magnitude."
    )]
    #[serde(default = "default_materiality_threshold")]
    pub materiality_threshold: f64,

    #[schemars(
        description = "Absolute dollar tolerance for the end-of-pipeline sum-preservation check. The effective tolerance also scales with the input total (one cent per billion dollars)."
    )]
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            rules: ClassificationRules::default(),
            materiality_threshold: default_materiality_threshold(),
            tolerance: default_tolerance(),
        }
    }
}

impl AggregationConfig {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AggregationConfig)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
