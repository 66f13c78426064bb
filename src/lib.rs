//! # Fiscal Flow Builder
//!
//! A library for aggregating normalized government ledger records (ministry,
//! program, account, amount) into weighted hierarchical trees suitable for
//! flow-diagram visualization, with a hard sum-preservation guarantee.
//!
//! ## Core Concepts
//!
//! - **Ledger Record**: one normalized row of spending or revenue, signed
//!   dollars (negative values are valid recoveries)
//! - **Classification**: each record is Operational (routine cost, netted
//!   into one "Operations" leaf per group) or Substantive (kept as its own
//!   labeled leaf)
//! - **Materiality**: substantive categories below a dollar threshold fold
//!   into a per-group "Other" leaf without losing their value
//! - **Chain Flattening**: single-child branch chains collapse to reduce
//!   structural noise, never changing any amount
//! - **Validation**: the final tree's leaf sum must equal the input total
//!   computed before any aggregation, within tolerance; a mismatch aborts
//!   the run rather than publish a silently-wrong tree
//!
//! ## Example
//!
//! ```rust,ignore
//! use fiscal_flow_builder::*;
//!
//! let records = read_ledger_file("clean_expenses_2024.csv")?;
//! let config = AggregationConfig::default();
//! let tree = build_flow_tree("Spending", &records, &config)?;
//! println!("{}", serde_json::to_string_pretty(&tree)?);
//! ```

pub mod builder;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod flatten;
pub mod ingestion;
pub mod schema;
pub mod threshold;
pub mod tree;
pub mod validator;

pub use builder::{CategoryKey, HierarchyBuilder, UNSPECIFIED_LABEL};
pub use classifier::{Classification, ClassificationRules};
pub use dataset::{FlowDataset, DOLLARS_PER_BILLION};
pub use error::{FlowTreeError, Result};
pub use flatten::flatten_chains;
pub use ingestion::{read_ledger_csv, read_ledger_file};
pub use schema::{AggregationConfig, LedgerRecord};
pub use threshold::apply_materiality;
pub use tree::{TreeNode, PATH_DELIMITER};
pub use validator::{effective_tolerance, validate};

use log::{debug, info};

/// Root label for the spending tree of a [`FlowDataset`].
pub const SPENDING_ROOT: &str = "Spending";
/// Root label for the revenue tree of a [`FlowDataset`].
pub const REVENUE_ROOT: &str = "Revenue";

pub struct FlowTreeProcessor;

impl FlowTreeProcessor {
    /// Runs the full pipeline: build → threshold → flatten → validate.
    /// The validator runs unconditionally; on a mismatch no tree is returned.
    pub fn process(
        root_name: &str,
        records: &[LedgerRecord],
        config: &AggregationConfig,
    ) -> Result<TreeNode> {
        validate_config_integrity(config)?;

        info!(
            "Aggregating {} ledger records under root '{}'",
            records.len(),
            root_name
        );

        // Independent total, computed before any aggregation stage runs.
        let expected_total: f64 = records.iter().map(|r| r.amount).sum();

        let built = HierarchyBuilder::new(&config.rules).build(root_name, records);
        debug!("built tree: {} nodes", built.node_count());

        let thresholded = apply_materiality(built, config.materiality_threshold);
        debug!("thresholded tree: {} nodes", thresholded.node_count());

        let flattened = flatten_chains(thresholded);
        debug!("flattened tree: {} nodes", flattened.node_count());

        let tolerance = effective_tolerance(config.tolerance, expected_total);
        validate(&flattened, expected_total, tolerance)?;

        info!(
            "Pipeline complete: {} nodes, leaf sum {:.2}",
            flattened.node_count(),
            flattened.leaf_sum()
        );

        Ok(flattened)
    }
}

/// Front door for a single tree. See [`FlowDataset::from_records`] for the
/// two-tree spending/revenue output contract.
pub fn build_flow_tree(
    root_name: &str,
    records: &[LedgerRecord],
    config: &AggregationConfig,
) -> Result<TreeNode> {
    FlowTreeProcessor::process(root_name, records, config)
}

fn validate_config_integrity(config: &AggregationConfig) -> Result<()> {
    if !config.materiality_threshold.is_finite() || config.materiality_threshold < 0.0 {
        return Err(FlowTreeError::InvalidThreshold(config.materiality_threshold));
    }
    if !config.tolerance.is_finite() || config.tolerance < 0.0 {
        return Err(FlowTreeError::InvalidTolerance(config.tolerance));
    }
    Ok(())
}
