//! Rendering binary trees as head-marked s-expressions.

use udtree::graph::{DepTree, HeadMap};

use crate::binarize::{BinaryNode, BinaryTree, NodeId};

/// Renderer for bracketed, head-marked expressions.
///
/// At every binary split, the branch whose leaves contain the node's
/// semantic head (looked up in the frozen [`HeadMap`]) is flagged with
/// `-H`. Lift markers never reach the output: branch labels are stored
/// with the marker already stripped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SexpEmitter;

impl SexpEmitter {
    pub fn new() -> Self {
        SexpEmitter
    }

    /// Render `btree` as a single-line s-expression.
    ///
    /// `tree` supplies the part-of-speech tags of the leaves; `heads`
    /// is the head map captured before any lifting.
    pub fn emit(&self, tree: &DepTree, btree: &BinaryTree, heads: &HeadMap) -> String {
        let mut out = String::new();
        self.emit_node(tree, btree, heads, btree.root(), false, &mut out);
        out
    }

    fn emit_node(
        &self,
        tree: &DepTree,
        btree: &BinaryTree,
        heads: &HeadMap,
        id: NodeId,
        is_head: bool,
        out: &mut String,
    ) {
        let flag = if is_head { "-H" } else { "" };

        match btree.node(id) {
            BinaryNode::Leaf { idx } => {
                let token = tree.token(*idx).expect("binary leaf without a backing token");

                out.push('(');
                out.push_str(token.upos());
                out.push_str(flag);
                out.push(' ');
                out.push_str(&escape_form(token.form()));
                out.push(')');
            }
            BinaryNode::Branch {
                idx,
                relation,
                children,
                ..
            } => {
                // The fold does not order the children by position;
                // the subtree whose governing token comes first in the
                // sentence is the left branch.
                let (first, second) = (children[0], children[1]);
                let (left, right) = if btree.node(first).idx() < btree.node(second).idx() {
                    (first, second)
                } else {
                    (second, first)
                };

                let head_idx = heads.head_of(*idx);
                let left_is_head = btree.leaf_indices(left).contains(&head_idx);

                out.push('(');
                out.push_str(relation);
                out.push_str(flag);
                out.push(' ');
                self.emit_node(tree, btree, heads, left, left_is_head, out);
                self.emit_node(tree, btree, heads, right, !left_is_head, out);
                out.push(')');
            }
        }
    }
}

/// Replace literal parentheses in a surface form, to keep the bracket
/// structure parseable.
fn escape_form(form: &str) -> String {
    form.replace('(', "-LRB-").replace(')', "-RRB-")
}

#[cfg(test)]
mod tests {
    use udtree::graph::{DepTree, DepTriple, HeadMap};
    use udtree::token::Token;

    use super::{escape_form, SexpEmitter};
    use crate::binarize::Binarizer;
    use crate::oblique::ObliquenessTable;

    fn emit(tree: &DepTree) -> String {
        let table = ObliquenessTable::ud2();
        let heads = HeadMap::from_tree(tree).unwrap();
        let btree = Binarizer::new(&table).binarize(tree).unwrap();
        SexpEmitter::new().emit(tree, &btree, &heads)
    }

    #[test]
    fn simple_sentence() {
        let mut tree: DepTree = vec![
            Token::new("A", "NOUN"),
            Token::new("B", "VERB"),
            Token::new("C", "NOUN"),
        ]
        .into_iter()
        .collect();
        tree.attach(DepTriple::new(0, "root", 2)).unwrap();
        tree.attach(DepTriple::new(2, "nsubj", 1)).unwrap();
        tree.attach(DepTriple::new(2, "obj", 3)).unwrap();

        assert_eq!(emit(&tree), "(nsubj (NOUN A)(obj-H (VERB-H B)(NOUN C)))");
    }

    #[test]
    fn every_split_marks_one_head() {
        let mut tree: DepTree = (0..5).map(|i| Token::new(format!("w{}", i + 1), "X")).collect();
        tree.attach(DepTriple::new(0, "root", 3)).unwrap();
        tree.attach(DepTriple::new(3, "amod", 1)).unwrap();
        tree.attach(DepTriple::new(3, "det", 2)).unwrap();
        tree.attach(DepTriple::new(3, "case", 4)).unwrap();
        tree.attach(DepTriple::new(3, "nmod", 5)).unwrap();

        // A strictly binary tree over five leaves has four splits.
        let sexp = emit(&tree);
        assert_eq!(sexp.matches("-H").count(), 4);
    }

    #[test]
    fn lift_marker_is_stripped_from_output() {
        let mut tree: DepTree = (0..2).map(|i| Token::new(format!("w{}", i + 1), "X")).collect();
        tree.attach(DepTriple::new(0, "root", 1)).unwrap();
        tree.attach(DepTriple::new(1, "obj*", 2)).unwrap();

        let sexp = emit(&tree);
        assert_eq!(sexp, "(obj (X-H w1)(X w2))");
    }

    #[test]
    fn subtypes_are_kept_in_output() {
        let mut tree: DepTree = (0..2).map(|i| Token::new(format!("w{}", i + 1), "X")).collect();
        tree.attach(DepTriple::new(0, "root", 1)).unwrap();
        tree.attach(DepTriple::new(1, "nmod:poss", 2)).unwrap();

        let sexp = emit(&tree);
        assert_eq!(sexp, "(nmod:poss (X-H w1)(X w2))");
    }

    #[test]
    fn parentheses_in_forms_are_escaped() {
        assert_eq!(escape_form("(a)"), "-LRB-a-RRB-");

        let mut tree: DepTree = vec![Token::new("(", "PUNCT")].into_iter().collect();
        tree.attach(DepTriple::new(0, "root", 1)).unwrap();

        assert_eq!(emit(&tree), "(PUNCT -LRB-)");
    }
}
