//! CoNLL-U format reader.

use std::collections::HashMap;
use std::io;

use udtree::graph::{DepTree, DepTriple};
use udtree::token::Token;

use crate::error::{IOError, ParseError};

/// A trait for objects that can read CoNLL-U `DepTree`s.
pub trait ReadSentence {
    /// Read a `DepTree` from this object.
    ///
    /// # Errors
    ///
    /// A call to `read_sentence` may generate an error to indicate that
    /// the operation could not be completed.
    fn read_sentence(&mut self) -> Result<Option<DepTree>, IOError>;

    /// Get an iterator over the sentences in this reader.
    fn sentences(self) -> Sentences<Self>
    where
        Self: Sized,
    {
        Sentences { reader: self }
    }
}

/// A reader for CoNLL-U sentences.
///
/// The reader is lenient: multi-word ranges and empty nodes are
/// skipped, and a token whose index or head field is not an integer is
/// dropped silently. This mirrors the treebank conversion tooling this
/// reader feeds; dropping a token can leave dangling head references,
/// which surface as [`ParseError::UnknownHead`].
pub struct Reader<R> {
    read: R,
}

impl<R: io::BufRead> Reader<R> {
    /// Construct a new reader from an object that implements the
    /// `io::BufRead` trait.
    pub fn new(read: R) -> Reader<R> {
        Reader { read }
    }
}

impl<R: io::BufRead> IntoIterator for Reader<R> {
    type Item = Result<DepTree, IOError>;
    type IntoIter = Sentences<Reader<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences()
    }
}

impl<R: io::BufRead> ReadSentence for Reader<R> {
    fn read_sentence(&mut self) -> Result<Option<DepTree>, IOError> {
        let mut line = String::new();
        let mut tree = DepTree::new();

        // Declared token indices can have gaps once a malformed token
        // is dropped; edges are resolved against declared indices at
        // the end of the sentence.
        let mut positions = HashMap::new();
        let mut edges = Vec::new();

        loop {
            line.clear();

            // End of reader.
            if self.read.read_line(&mut line)? == 0 {
                if tree.len() == 1 {
                    return Ok(None);
                }

                add_edges(&mut tree, &positions, edges)?;

                return Ok(Some(tree));
            }

            let trimmed = line.trim();

            // The blank line is a sentence separator. We want to be robust
            // in the case a CoNLL file is malformed and has two newlines as
            // a separator.
            if trimmed.is_empty() {
                if tree.len() == 1 {
                    continue;
                }

                add_edges(&mut tree, &positions, edges)?;

                return Ok(Some(tree));
            }

            if let Some(stripped) = trimmed.strip_prefix('#') {
                parse_comment(stripped, &mut tree);
                continue;
            }

            let fields: Vec<&str> = trimmed.split('\t').collect();
            if fields.len() < 8 {
                return Err(ParseError::MissingFields {
                    line: trimmed.to_owned(),
                }
                .into());
            }

            // Multi-word ranges (1-2) and empty nodes (5.1) do not
            // take part in the dependency tree.
            if fields[0].contains('-') || fields[0].contains('.') {
                continue;
            }

            // Lenient: a token with a non-integer index or head field
            // is dropped.
            let (idx, head) = match (fields[0].parse::<usize>(), fields[6].parse::<usize>()) {
                (Ok(idx), Ok(head)) => (idx, head),
                _ => continue,
            };

            let slot = tree.push(Token::new(fields[1], fields[3]));
            positions.insert(idx, slot);
            edges.push((head, fields[7].to_owned(), slot));
        }
    }
}

fn add_edges(
    tree: &mut DepTree,
    positions: &HashMap<usize, usize>,
    edges: Vec<(usize, String, usize)>,
) -> Result<(), ParseError> {
    for (head, relation, dependent) in edges {
        let head_slot = if head == 0 {
            0
        } else {
            *positions
                .get(&head)
                .ok_or(ParseError::UnknownHead { head })?
        };

        tree.attach(DepTriple::new(head_slot, relation, dependent))?;
    }

    Ok(())
}

/// Pick up `sent_id` and `text` comments; all other comments are
/// skipped.
fn parse_comment(comment: &str, tree: &mut DepTree) {
    let comment = comment.trim();

    if let Some(idx) = comment.find(" = ") {
        let (attr, val) = (&comment[..idx], &comment[idx + 3..]);
        match attr {
            "sent_id" => tree.metadata_mut().set_sent_id(Some(val)),
            "text" => tree.metadata_mut().set_text(Some(val)),
            _ => (),
        }
    }
}

/// An iterator over the sentences in a `Reader`.
pub struct Sentences<R>
where
    R: ReadSentence,
{
    reader: R,
}

impl<R> Iterator for Sentences<R>
where
    R: ReadSentence,
{
    type Item = Result<DepTree, IOError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_sentence() {
            Ok(None) => None,
            Ok(Some(sent)) => Some(Ok(sent)),
            Err(e) => Some(Err(e)),
        }
    }
}
