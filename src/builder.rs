use crate::classifier::{Classification, ClassificationRules};
use crate::schema::LedgerRecord;
use crate::tree::{TreeNode, PATH_DELIMITER};
use std::collections::HashMap;

/// Label used when a record carries no value for a grouping level.
pub const UNSPECIFIED_LABEL: &str = "(Unspecified)";

/// Typed aggregation key for substantive categories. Amounts are summed only
/// when the full tuple matches; the label alone is display-only, so distinct
/// line items that happen to share a label never merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey {
    pub label: String,
    pub expenditure: Option<String>,
    pub activity: Option<String>,
    pub sub_item: Option<String>,
}

#[derive(Default)]
struct SubUnitGroup {
    operations_total: f64,
    category_order: Vec<CategoryKey>,
    categories: HashMap<CategoryKey, f64>,
}

impl SubUnitGroup {
    fn add_operational(&mut self, amount: f64) {
        self.operations_total += amount;
    }

    fn add_substantive(&mut self, key: CategoryKey, amount: f64) {
        if let Some(total) = self.categories.get_mut(&key) {
            *total += amount;
        } else {
            self.category_order.push(key.clone());
            self.categories.insert(key, amount);
        }
    }
}

#[derive(Default)]
struct UnitGroup {
    sub_order: Vec<String>,
    subs: HashMap<String, SubUnitGroup>,
}

impl UnitGroup {
    fn sub_group(&mut self, sub_unit: &str) -> &mut SubUnitGroup {
        if !self.subs.contains_key(sub_unit) {
            self.sub_order.push(sub_unit.to_string());
        }
        self.subs.entry(sub_unit.to_string()).or_default()
    }
}

/// Groups ledger records by unit and sub-unit, nets Operational records into
/// one "Operations" leaf per group, and keeps one leaf per distinct
/// substantive aggregation key. Units and categories are emitted in
/// first-seen order, so the output is deterministic given deterministic
/// input order.
pub struct HierarchyBuilder<'a> {
    rules: &'a ClassificationRules,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(rules: &'a ClassificationRules) -> Self {
        Self { rules }
    }

    pub fn build(&self, root_name: &str, records: &[LedgerRecord]) -> TreeNode {
        let mut unit_order: Vec<String> = Vec::new();
        let mut units: HashMap<String, UnitGroup> = HashMap::new();

        for record in records {
            let unit = record.unit().unwrap_or(UNSPECIFIED_LABEL);
            let sub_unit = record.sub_unit().unwrap_or(UNSPECIFIED_LABEL);

            if !units.contains_key(unit) {
                unit_order.push(unit.to_string());
            }
            let group = units
                .entry(unit.to_string())
                .or_default()
                .sub_group(sub_unit);

            match self.rules.classify(&record.account_name, record.detail()) {
                Classification::Operational => group.add_operational(record.amount),
                Classification::Substantive => {
                    let key = CategoryKey {
                        label: self.category_label(record),
                        expenditure: record.expenditure.clone(),
                        activity: record.activity.clone(),
                        sub_item: record.sub_item.clone(),
                    };
                    group.add_substantive(key, record.amount);
                }
            }
        }

        let mut unit_nodes = Vec::new();
        for unit in &unit_order {
            let unit_group = &units[unit];
            let mut sub_nodes = Vec::new();
            for sub_unit in &unit_group.sub_order {
                let group = &unit_group.subs[sub_unit];
                let prefix = format!("{unit}{PATH_DELIMITER}{sub_unit}");

                let mut leaves = Vec::new();
                if group.operations_total != 0.0 {
                    leaves.push(TreeNode::leaf(
                        format!("{prefix}{PATH_DELIMITER}Operations"),
                        group.operations_total,
                    ));
                }
                for key in &group.category_order {
                    leaves.push(TreeNode::leaf(
                        format!("{prefix}{PATH_DELIMITER}{}", key.label),
                        group.categories[key],
                    ));
                }

                // A group that emitted nothing contributed zero net amount.
                if !leaves.is_empty() {
                    sub_nodes.push(TreeNode::branch(prefix, leaves));
                }
            }
            if !sub_nodes.is_empty() {
                unit_nodes.push(TreeNode::branch(unit.clone(), sub_nodes));
            }
        }

        TreeNode::branch(root_name, unit_nodes)
    }

    /// Display label for a substantive record: transfer payments surface the
    /// detail alone, otherwise "name: detail" when a detail exists, otherwise
    /// the account name.
    fn category_label(&self, record: &LedgerRecord) -> String {
        match record.detail() {
            Some(detail) if self.rules.is_transfer(&record.account_name) => detail.to_string(),
            Some(detail) => format!("{}: {}", record.account_name, detail),
            None => record.account_name.clone(),
        }
    }
}
