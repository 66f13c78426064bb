use crate::error::Result;
use crate::schema::{AggregationConfig, LedgerRecord};
use crate::tree::TreeNode;
use crate::{build_flow_tree, REVENUE_ROOT, SPENDING_ROOT};
use serde::{Deserialize, Serialize};

/// Fixed divisor for the display totals. Presentation-layer only: the trees
/// themselves stay in exact dollars.
pub const DOLLARS_PER_BILLION: f64 = 1e9;

/// The full output contract: one spending tree and one revenue tree, built by
/// two independent pipeline invocations, plus their summary totals in
/// billions of dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowDataset {
    pub total: f64,
    pub spending: f64,
    pub revenue: f64,
    pub spending_data: TreeNode,
    pub revenue_data: TreeNode,
}

impl FlowDataset {
    pub fn from_records(
        spending_records: &[LedgerRecord],
        revenue_records: &[LedgerRecord],
        config: &AggregationConfig,
    ) -> Result<Self> {
        let spending_data = build_flow_tree(SPENDING_ROOT, spending_records, config)?;
        let revenue_data = build_flow_tree(REVENUE_ROOT, revenue_records, config)?;

        let spending = spending_data.leaf_sum() / DOLLARS_PER_BILLION;
        let revenue = revenue_data.leaf_sum() / DOLLARS_PER_BILLION;

        Ok(Self {
            total: spending.max(revenue),
            spending,
            revenue,
            spending_data,
            revenue_data,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
