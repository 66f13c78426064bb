use crate::tree::{TreeNode, PATH_DELIMITER};

/// Collapses redundant single-child chains, bottom-up. A branch whose only
/// child is another branch merges with it: the merged node takes the
/// grandchildren and a name joining the parent's label with the child's final
/// path segment (so the "Operations" segment stays qualified by its parent
/// context). A branch whose only child is a leaf is kept as-is: that chain
/// says "this whole group is one bucket", and collapsing it would disguise a
/// legitimate solitary leaf as its own parent. Sum-preserving and idempotent.
///
/// Recursion depth is bounded by the organizational nesting of the built tree
/// (unit → sub-unit → leaf), so no explicit work stack is needed here.
pub fn flatten_chains(node: TreeNode) -> TreeNode {
    match node {
        TreeNode::Leaf { .. } => node,
        TreeNode::Branch { name, children } => {
            let mut children: Vec<TreeNode> =
                children.into_iter().map(flatten_chains).collect();

            if children.len() == 1 {
                match children.pop() {
                    Some(TreeNode::Branch {
                        name: child_name,
                        children: grandchildren,
                    }) => {
                        let segment = child_name
                            .rsplit(PATH_DELIMITER)
                            .next()
                            .unwrap_or(child_name.as_str());
                        return TreeNode::branch(
                            format!("{name}{PATH_DELIMITER}{segment}"),
                            grandchildren,
                        );
                    }
                    // A solitary leaf child is a meaningful bucket, not noise.
                    Some(leaf) => children.push(leaf),
                    None => {}
                }
            }

            TreeNode::branch(name, children)
        }
    }
}
