use serde::{Deserialize, Serialize};

/// Delimiter used in path-qualified node labels ("Ministry → Program → Other").
pub const PATH_DELIMITER: &str = " → ";

/// One node of the output hierarchy. A node carries either an amount (leaf)
/// or children (branch), never both and never neither; the enum makes the
/// invariant unrepresentable. Untagged serialization gives the wire shape the
/// flow-diagram renderer expects: `{"name", "amount"}` or
/// `{"name", "children"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf { name: String, amount: f64 },
    Branch { name: String, children: Vec<TreeNode> },
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>, amount: f64) -> Self {
        TreeNode::Leaf {
            name: name.into(),
            amount,
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Branch {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::Leaf { name, .. } => name,
            TreeNode::Branch { name, .. } => name,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Final delimiter-separated segment of the label ("Operations" for
    /// "Roads → Maintenance → Operations").
    pub fn label_segment(&self) -> &str {
        self.name()
            .rsplit(PATH_DELIMITER)
            .next()
            .unwrap_or_else(|| self.name())
    }

    /// Sum of all leaf amounts in the subtree. Walks with an explicit work
    /// stack so the result never depends on call-stack depth.
    pub fn leaf_sum(&self) -> f64 {
        let mut total = 0.0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf { amount, .. } => total += amount,
                TreeNode::Branch { children, .. } => stack.extend(children.iter()),
            }
        }
        total
    }

    /// Count of all nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let TreeNode::Branch { children, .. } = node {
                stack.extend(children.iter());
            }
        }
        count
    }
}
