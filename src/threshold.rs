use crate::tree::{TreeNode, PATH_DELIMITER};

fn is_operations_label(name: &str) -> bool {
    name.rsplit(PATH_DELIMITER).next().unwrap_or(name) == "Operations"
}

/// Folds immaterial substantive leaves into a per-group "Other" leaf. Within
/// each branch, leaf children whose magnitude is below `limit` are removed
/// and their amounts accumulated into one leaf named
/// `"<branch name> → Other"`, emitted only when the accumulated sum is
/// non-zero. The group's "Operations" leaf always passes through, as do
/// leaves at or above the limit. Strictly sum-preserving: node count and
/// naming change, dollar totals never do.
pub fn apply_materiality(node: TreeNode, limit: f64) -> TreeNode {
    match node {
        TreeNode::Leaf { .. } => node,
        TreeNode::Branch { name, children } => {
            let mut kept = Vec::with_capacity(children.len());
            let mut minor_total = 0.0;
            let mut saw_minor = false;

            for child in children {
                match child {
                    TreeNode::Branch { .. } => kept.push(apply_materiality(child, limit)),
                    TreeNode::Leaf { ref name, amount }
                        if !is_operations_label(name) && amount.abs() < limit =>
                    {
                        minor_total += amount;
                        saw_minor = true;
                    }
                    leaf => kept.push(leaf),
                }
            }

            if saw_minor && minor_total != 0.0 {
                kept.push(TreeNode::leaf(
                    format!("{name}{PATH_DELIMITER}Other"),
                    minor_total,
                ));
            }

            TreeNode::branch(name, kept)
        }
    }
}
