use crate::error::BuildError;
use crate::TermId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term to column id mapping. Ids are handed out in first-seen order and form
/// the dense range `[0, len)`.
///
/// Serialized as the id-ordered term list so identical builds produce
/// identical bytes; the lookup map is rebuilt on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
}

impl Vocabulary {
    pub fn new() -> Self { Self::default() }

    /// Return the id of `term`, assigning the next sequential id if unseen.
    pub fn get_or_create(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.terms.push(term.to_string());
        self.ids.insert(term.to_string(), id);
        id
    }

    pub fn get(&self, term: &str) -> Option<TermId> { self.ids.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id as usize).map(String::as_str) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId, t.as_str()))
    }
}

/// Rebuild from an id-ordered term list. Duplicate terms are rejected since
/// they would leave ids without a lookup entry.
impl TryFrom<Vec<String>> for Vocabulary {
    type Error = BuildError;

    fn try_from(terms: Vec<String>) -> Result<Self, Self::Error> {
        let mut ids = HashMap::with_capacity(terms.len());
        for (i, t) in terms.iter().enumerate() {
            if ids.insert(t.clone(), i as TermId).is_some() {
                return Err(BuildError::InconsistentModel(format!("duplicate vocabulary term {t:?}")));
            }
        }
        Ok(Self { terms, ids })
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self { vocab.terms }
}
