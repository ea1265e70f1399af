use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::grading::normalize;
use crate::model::ids::VerbId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerbError {
    #[error("base form cannot be empty")]
    EmptyBase,

    #[error("{field} forms cannot be empty")]
    EmptyForms { field: &'static str },

    #[error("{field} forms contain an empty alternative")]
    EmptyAlternative { field: &'static str },
}

//
// ─── FORM SET ──────────────────────────────────────────────────────────────────
//

/// Accepted spellings for one principal form.
///
/// Forms are stored normalized and deduplicated. Source order is kept so the
/// canonical display (`was/were`) reads the way the dictionary lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSet(Vec<String>);

impl FormSet {
    /// Build a set from alternative spellings.
    ///
    /// # Errors
    ///
    /// Returns `VerbError::EmptyForms` if no alternatives are given and
    /// `VerbError::EmptyAlternative` if any alternative is blank.
    pub fn new<I, S>(field: &'static str, forms: I) -> Result<Self, VerbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for form in forms {
            let form = normalize(form.as_ref());
            if form.is_empty() {
                return Err(VerbError::EmptyAlternative { field });
            }
            if !normalized.contains(&form) {
                normalized.push(form);
            }
        }

        if normalized.is_empty() {
            return Err(VerbError::EmptyForms { field });
        }
        Ok(Self(normalized))
    }

    /// Split a `/`-delimited source string (`"was/were"`) into a set.
    ///
    /// # Errors
    ///
    /// Same as [`FormSet::new`].
    pub fn parse_delimited(field: &'static str, raw: &str) -> Result<Self, VerbError> {
        if raw.trim().is_empty() {
            return Err(VerbError::EmptyForms { field });
        }
        Self::new(field, raw.split('/'))
    }

    /// Membership test against an already normalized answer.
    #[must_use]
    pub fn contains(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.0.iter().any(|form| form == normalized)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

//
// ─── VERB ──────────────────────────────────────────────────────────────────────
//

/// An irregular verb: base form plus accepted preterit and participle spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    id: VerbId,
    base: String,
    preterit: FormSet,
    participle: FormSet,
}

impl Verb {
    /// # Errors
    ///
    /// Returns `VerbError::EmptyBase` if the base form is blank.
    pub fn new(
        id: VerbId,
        base: impl Into<String>,
        preterit: FormSet,
        participle: FormSet,
    ) -> Result<Self, VerbError> {
        let base = base.into().trim().to_string();
        if base.is_empty() {
            return Err(VerbError::EmptyBase);
        }
        Ok(Self {
            id,
            base,
            preterit,
            participle,
        })
    }

    /// Convenience constructor from `/`-delimited alternatives.
    ///
    /// # Errors
    ///
    /// Returns `VerbError` if any of the three parts is blank.
    pub fn parse(id: VerbId, base: &str, preterit: &str, participle: &str) -> Result<Self, VerbError> {
        let preterit = FormSet::parse_delimited("preterit", preterit)?;
        let participle = FormSet::parse_delimited("participle", participle)?;
        Self::new(id, base, preterit, participle)
    }

    #[must_use]
    pub fn id(&self) -> VerbId {
        self.id
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn preterit(&self) -> &FormSet {
        &self.preterit
    }

    #[must_use]
    pub fn participle(&self) -> &FormSet {
        &self.participle
    }

    /// One-line answer key, e.g. `go : went, gone`.
    #[must_use]
    pub fn answer_line(&self) -> String {
        format!("{} : {}, {}", self.base, self.preterit, self.participle)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_forms_split_into_alternatives() {
        let verb = Verb::parse(VerbId::new(1), "be", "was/were", "been").unwrap();
        assert_eq!(verb.preterit().len(), 2);
        assert!(verb.preterit().contains("was"));
        assert!(verb.preterit().contains("were"));
        assert_eq!(verb.answer_line(), "be : was/were, been");
    }

    #[test]
    fn forms_are_normalized_and_deduplicated() {
        let forms = FormSet::new("preterit", [" Dreamt", "dreamed", "DREAMT "]).unwrap();
        assert_eq!(forms.iter().collect::<Vec<_>>(), vec!["dreamt", "dreamed"]);
    }

    #[test]
    fn blank_parts_are_rejected() {
        assert_eq!(
            Verb::parse(VerbId::new(1), "  ", "went", "gone").unwrap_err(),
            VerbError::EmptyBase
        );
        assert_eq!(
            Verb::parse(VerbId::new(1), "go", "", "gone").unwrap_err(),
            VerbError::EmptyForms { field: "preterit" }
        );
        assert_eq!(
            Verb::parse(VerbId::new(1), "be", "was/", "been").unwrap_err(),
            VerbError::EmptyAlternative { field: "preterit" }
        );
    }

    #[test]
    fn empty_answer_is_never_a_member() {
        let forms = FormSet::new("participle", ["gone"]).unwrap();
        assert!(!forms.contains(""));
    }
}
