//! Tokens in the dependency tree.

use std::mem;

/// A dependency tree token.
///
/// Only the fields that binarization needs are stored: the word form
/// and the universal part-of-speech tag. The token's index and its
/// head relation live in the tree, not in the token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    form: String,
    upos: String,
}

impl Token {
    /// Create a new token.
    pub fn new(form: impl Into<String>, upos: impl Into<String>) -> Token {
        Token {
            form: form.into(),
            upos: upos.into(),
        }
    }

    /// Get the word form or punctuation symbol.
    pub fn form(&self) -> &str {
        self.form.as_ref()
    }

    /// Get the universal part-of-speech tag.
    pub fn upos(&self) -> &str {
        self.upos.as_ref()
    }

    /// Set the word form or punctuation symbol.
    ///
    /// Returns the form that is replaced.
    pub fn set_form(&mut self, form: impl Into<String>) -> String {
        mem::replace(&mut self.form, form.into())
    }

    /// Set the universal part-of-speech tag.
    ///
    /// Returns the tag that is replaced.
    pub fn set_upos(&mut self, upos: impl Into<String>) -> String {
        mem::replace(&mut self.upos, upos.into())
    }
}
