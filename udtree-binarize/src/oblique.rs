//! The obliqueness hierarchy.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::{is_lifted, Error};

/// Score assigned to lifted relations.
///
/// Lifted arcs combine last, outermost of all siblings.
pub const LIFTED_SCORE: u32 = u32::MAX;

/// The universal dependency relations of UD v2, ordered by obliqueness.
///
/// Lower priority means closer to the governing word, so function-word
/// relations come first and loose relations last.
const UD2_HIERARCHY: &[(&str, u32)] = &[
    ("fixed", 1),
    ("goeswith", 2),
    ("reparandum", 3),
    ("flat", 4),
    ("compound", 5),
    ("clf", 6),
    ("det", 7),
    ("case", 8),
    ("aux", 9),
    ("cop", 10),
    ("mark", 11),
    ("amod", 12),
    ("nummod", 13),
    ("advmod", 14),
    ("nmod", 15),
    ("appos", 16),
    ("acl", 17),
    ("obl", 18),
    ("iobj", 19),
    ("obj", 20),
    ("xcomp", 21),
    ("ccomp", 22),
    ("csubj", 23),
    ("nsubj", 24),
    ("expl", 25),
    ("advcl", 26),
    ("dislocated", 27),
    ("vocative", 28),
    ("discourse", 29),
    ("orphan", 30),
    ("list", 31),
    ("conj", 32),
    ("cc", 33),
    ("parataxis", 34),
    ("punct", 35),
    ("root", 36),
    ("dep", 37),
];

/// One record of an externally stored hierarchy.
#[derive(Debug, Deserialize)]
struct Entry {
    name: String,
    priority: u32,
}

/// Mapping from base relation names to obliqueness priorities.
///
/// The table is constructed once at startup and passed into the
/// [`Binarizer`](crate::Binarizer) by reference; it is immutable after
/// construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObliquenessTable {
    priorities: HashMap<String, u32>,
}

impl ObliquenessTable {
    /// Construct a table from `(name, priority)` pairs.
    ///
    /// A relation listed twice is a configuration error.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut priorities = HashMap::new();

        for (name, priority) in entries {
            let name = name.into();
            if priorities.insert(name.clone(), priority).is_some() {
                return Err(Error::DuplicateRelation { name });
            }
        }

        Ok(ObliquenessTable { priorities })
    }

    /// Read a table from a JSON array of `{"name", "priority"}` records.
    pub fn from_json(read: impl Read) -> Result<Self, Error> {
        let entries: Vec<Entry> = serde_json::from_reader(read)?;
        Self::from_entries(entries.into_iter().map(|e| (e.name, e.priority)))
    }

    /// The built-in UD v2 hierarchy.
    pub fn ud2() -> Self {
        ObliquenessTable {
            priorities: UD2_HIERARCHY
                .iter()
                .map(|&(name, priority)| (name.to_owned(), priority))
                .collect(),
        }
    }

    /// Get the priority of a base relation name, if present.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.priorities.get(name).copied()
    }

    /// Score a relation label as it appears on an arc.
    ///
    /// Lifted relations score [`LIFTED_SCORE`]. Otherwise the sub-type
    /// suffix is stripped (`nmod:poss` scores as `nmod`) and the base
    /// name is looked up; an absent base name is a fatal configuration
    /// error.
    pub fn score(&self, relation: &str) -> Result<u32, Error> {
        if is_lifted(relation) {
            return Ok(LIFTED_SCORE);
        }

        let base = relation.split(':').next().unwrap_or(relation);
        self.get(base).ok_or_else(|| Error::UnknownRelation {
            relation: relation.to_owned(),
        })
    }
}
