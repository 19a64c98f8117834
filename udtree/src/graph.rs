//! Dependency trees.

use std::borrow::Borrow;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use crate::error::GraphError;
use crate::token::Token;

/// Dependency tree node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// Root node.
    Root,

    /// Token node.
    Token(Token),
}

impl Node {
    pub fn is_root(&self) -> bool {
        !self.is_token()
    }

    pub fn is_token(&self) -> bool {
        match self {
            Node::Root => false,
            Node::Token(_) => true,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }

    pub fn token_mut(&mut self) -> Option<&mut Token> {
        match self {
            Node::Root => None,
            Node::Token(token) => Some(token),
        }
    }
}

/// A dependency triple.
///
/// A dependency triple consists of: a head index; a dependent index; and
/// the dependency relation between them.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct DepTriple<S> {
    head: usize,
    dependent: usize,
    relation: S,
}

impl<S> DepTriple<S> {
    /// Construct a new dependency triple.
    pub fn new(head: usize, relation: S, dependent: usize) -> Self {
        DepTriple {
            head,
            dependent,
            relation,
        }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }
}

impl<S> DepTriple<S>
where
    S: Borrow<str>,
{
    /// Get the dependency relation.
    pub fn relation(&self) -> &str {
        self.relation.borrow()
    }
}

/// Sentence metadata.
///
/// Treebank sentences carry a `sent_id` and the raw `text`; both are
/// consumed only for output headers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    sent_id: Option<String>,
    text: Option<String>,
}

impl Metadata {
    pub fn sent_id(&self) -> Option<&str> {
        self.sent_id.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_sent_id(&mut self, sent_id: Option<impl Into<String>>) {
        self.sent_id = sent_id.map(Into::into);
    }

    pub fn set_text(&mut self, text: Option<impl Into<String>>) {
        self.text = text.map(Into::into);
    }
}

/// Incoming edge of a node.
#[derive(Clone, Debug, Eq, PartialEq)]
struct HeadRel {
    head: usize,
    relation: String,
}

/// A dependency tree.
///
/// `DepTree` stores one sentence's dependency graph in an explicit
/// arena: node 0 is a synthetic root, tokens occupy the slots 1..n in
/// sentence order. Each non-root node has at most one incoming edge,
/// stored as a parallel array of head links. This enforces
/// single-headedness by construction; connectedness and acyclicity are
/// checked by [`validate`](DepTree::validate).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DepTree {
    nodes: Vec<Node>,
    heads: Vec<Option<HeadRel>>,
    metadata: Metadata,
}

#[allow(clippy::len_without_is_empty)]
impl DepTree {
    /// Construct a new tree that only holds the synthetic root:
    ///
    /// ```
    /// use udtree::graph::{DepTree, Node};
    ///
    /// let tree = DepTree::new();
    /// assert_eq!(tree[0], Node::Root);
    /// ```
    pub fn new() -> Self {
        DepTree {
            nodes: vec![Node::Root],
            heads: vec![None],
            metadata: Metadata::default(),
        }
    }

    /// Add a new token to the tree.
    ///
    /// Tokens should always be pushed in sentence order.
    ///
    /// Returns the index of the token. The first pushed token has index 1,
    /// since index 0 is reserved by the root of the tree.
    pub fn push(&mut self, token: Token) -> usize {
        self.nodes.push(Node::Token(token));
        self.heads.push(None);
        self.nodes.len() - 1
    }

    /// Get the number of nodes in the tree.
    ///
    /// This is equal to the number of tokens, plus one root node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get the sentence metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get the sentence metadata mutably.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Add a dependency relation between `head` and `dependent`.
    ///
    /// If `dependent` already has a head relation, this relation is
    /// replaced to ensure single-headedness.
    pub fn attach<S>(&mut self, triple: DepTriple<S>) -> Result<(), GraphError>
    where
        S: Into<String>,
    {
        if triple.head() >= self.nodes.len() {
            return Err(GraphError::HeadOutOfBounds {
                head: triple.head(),
                node_count: self.nodes.len(),
            });
        }

        if triple.dependent() >= self.nodes.len() {
            return Err(GraphError::DependentOutOfBounds {
                dependent: triple.dependent(),
                node_count: self.nodes.len(),
            });
        }

        self.heads[triple.dependent] = Some(HeadRel {
            head: triple.head,
            relation: triple.relation.into(),
        });

        Ok(())
    }

    /// Remove the relation of a token to its head.
    ///
    /// Returns the removed triple iff the token had a head.
    pub fn detach(&mut self, dependent: usize) -> Option<DepTriple<String>> {
        self.heads
            .get_mut(dependent)
            .and_then(Option::take)
            .map(|rel| DepTriple::new(rel.head, rel.relation, dependent))
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<&str>> {
        self.heads
            .get(dependent)
            .and_then(Option::as_ref)
            .map(|rel| DepTriple::new(rel.head, rel.relation.as_str(), dependent))
    }

    /// Return the relation of `dependent` to its head, if any.
    pub fn relation(&self, dependent: usize) -> Option<&str> {
        self.heads
            .get(dependent)
            .and_then(Option::as_ref)
            .map(|rel| rel.relation.as_str())
    }

    /// Return an iterator over the dependents of `head`.
    ///
    /// Dependents are returned in ascending index order.
    pub fn dependents(&self, head: usize) -> impl Iterator<Item = DepTriple<&str>> + '_ {
        self.heads.iter().enumerate().filter_map(move |(idx, rel)| {
            rel.as_ref().filter(|rel| rel.head == head).map(|rel| {
                DepTriple::new(rel.head, rel.relation.as_str(), idx)
            })
        })
    }

    /// Return the single dependent of the synthetic root.
    pub fn root(&self) -> Result<usize, GraphError> {
        let mut roots = self.dependents(0).map(|t| t.dependent());

        let root = roots.next().ok_or(GraphError::MissingRootEdge)?;

        let mut rest: Vec<_> = roots.collect();
        if rest.is_empty() {
            Ok(root)
        } else {
            rest.insert(0, root);
            Err(GraphError::MultipleRootEdges { dependents: rest })
        }
    }

    /// Get the token at `idx`, if `idx` is a token node.
    pub fn token(&self, idx: usize) -> Option<&Token> {
        self.nodes.get(idx).and_then(Node::token)
    }

    /// Get an iterator over the tokens in the tree.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.nodes.iter().filter_map(Node::token)
    }

    /// Check the structural invariants of the tree.
    ///
    /// A valid tree has exactly one root edge, a head for every token,
    /// and every token is dominated by the synthetic root.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.root()?;

        for node in 1..self.len() {
            // Walking n head links from a node of a valid tree must
            // arrive at the root.
            let mut current = node;
            for _ in 0..self.len() {
                current = match self.head(current) {
                    Some(triple) => triple.head(),
                    None => return Err(GraphError::Headless { node: current }),
                };

                if current == 0 {
                    break;
                }
            }

            if current != 0 {
                return Err(GraphError::Cycle { node });
            }
        }

        Ok(())
    }
}

impl FromIterator<Token> for DepTree {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        let mut tree = DepTree::new();
        for token in iter {
            tree.push(token);
        }
        tree
    }
}

impl Index<usize> for DepTree {
    type Output = Node;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.nodes[idx]
    }
}

impl IndexMut<usize> for DepTree {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.nodes[idx]
    }
}

/// A frozen `dependent -> head` mapping.
///
/// The map is captured from a tree's edges before any lifting and is
/// never mutated; head-branch marking during rendering always consults
/// this map, not the possibly rewritten tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeadMap {
    heads: Vec<usize>,
}

impl HeadMap {
    /// Capture the head of every token in `tree`.
    pub fn from_tree(tree: &DepTree) -> Result<HeadMap, GraphError> {
        let mut heads = Vec::with_capacity(tree.len());
        heads.push(0);

        for node in 1..tree.len() {
            let triple = tree.head(node).ok_or(GraphError::Headless { node })?;
            heads.push(triple.head());
        }

        Ok(HeadMap { heads })
    }

    /// Get the head of `dependent` at capture time.
    ///
    /// Panics if `dependent` is not a node of the captured tree.
    pub fn head_of(&self, dependent: usize) -> usize {
        self.heads[dependent]
    }

    /// Get the number of nodes in the captured tree.
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    /// Returns `true` iff the captured tree had no tokens.
    pub fn is_empty(&self) -> bool {
        self.heads.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::{DepTree, DepTriple, GraphError, HeadMap, Node, Token};

    fn example_tree() -> DepTree {
        // "A B C" headed by B.
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

        tree
    }

    #[test]
    fn attach_replaces_existing_head() {
        let mut tree = example_tree();
        assert_eq!(tree.head(1), Some(DepTriple::new(2, "nsubj", 1)));

        tree.attach(DepTriple::new(3, "dep", 1)).unwrap();
        assert_eq!(tree.head(1), Some(DepTriple::new(3, "dep", 1)));
    }

    #[test]
    fn attach_rejects_out_of_bounds() {
        let mut tree = example_tree();
        assert_eq!(
            tree.attach(DepTriple::new(4, "dep", 1)),
            Err(GraphError::HeadOutOfBounds {
                head: 4,
                node_count: 4
            })
        );
        assert_eq!(
            tree.attach(DepTriple::new(1, "dep", 4)),
            Err(GraphError::DependentOutOfBounds {
                dependent: 4,
                node_count: 4
            })
        );
    }

    #[test]
    fn dependents_in_index_order() {
        let tree = example_tree();
        let deps: Vec<_> = tree.dependents(2).collect();
        assert_eq!(
            deps,
            vec![DepTriple::new(2, "nsubj", 1), DepTriple::new(2, "obj", 3)]
        );

        assert!(tree.dependents(1).next().is_none());
    }

    #[test]
    fn detach_removes_head() {
        let mut tree = example_tree();
        assert_eq!(
            tree.detach(1),
            Some(DepTriple::new(2, "nsubj".to_owned(), 1))
        );
        assert_eq!(tree.detach(1), None);
        assert_eq!(tree.head(1), None);
    }

    #[test]
    fn root_edge() {
        let tree = example_tree();
        assert_eq!(tree.root(), Ok(2));

        let mut tree = tree;
        tree.attach(DepTriple::new(0, "root", 1)).unwrap();
        assert_eq!(
            tree.root(),
            Err(GraphError::MultipleRootEdges {
                dependents: vec![1, 2]
            })
        );
    }

    #[test]
    fn validate_accepts_tree() {
        assert_eq!(example_tree().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_headless() {
        let mut tree = example_tree();
        tree.detach(3);
        assert_eq!(tree.validate(), Err(GraphError::Headless { node: 3 }));
    }

    #[test]
    fn validate_rejects_missing_root_edge() {
        let tree: DepTree = vec![Token::new("A", "X")].into_iter().collect();
        assert_eq!(tree.validate(), Err(GraphError::MissingRootEdge));
    }

    #[test]
    fn validate_rejects_cycle() {
        let mut tree = example_tree();
        // 1 and 3 now head each other; both are unreachable from 0.
        tree.attach(DepTriple::new(3, "dep", 1)).unwrap();
        tree.attach(DepTriple::new(1, "dep", 3)).unwrap();
        assert_eq!(tree.validate(), Err(GraphError::Cycle { node: 1 }));
    }

    #[test]
    fn head_map_is_frozen() {
        let mut tree = example_tree();
        let map = HeadMap::from_tree(&tree).unwrap();
        assert_eq!(map.head_of(1), 2);
        assert_eq!(map.head_of(2), 0);
        assert_eq!(map.head_of(3), 2);

        tree.detach(1);
        tree.attach(DepTriple::new(3, "dep*", 1)).unwrap();
        assert_eq!(map.head_of(1), 2);
    }

    #[test]
    fn tokens_iterate_in_order() {
        let tree = example_tree();
        let forms: Vec<_> = tree.tokens().map(Token::form).collect();
        assert_eq!(forms, vec!["A", "B", "C"]);
        assert_eq!(tree[0], Node::Root);
    }
}
