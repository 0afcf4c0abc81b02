use super::super::domain::{DocumentEvidence, FieldTag};
use super::rules::DocumentRequirement;

/// How a document requirement was (or was not) met.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMatch {
    Field(FieldTag),
    Keyword {
        document: String,
        keyword: &'static str,
    },
    Missing,
}

impl DocumentMatch {
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, DocumentMatch::Missing)
    }
}

/// Field tags are authoritative; keywords over lowercased identifiers are only
/// consulted when none of the preferred fields were submitted.
pub fn verify(requirement: &DocumentRequirement, evidence: &DocumentEvidence) -> DocumentMatch {
    if let Some(tag) = requirement
        .fields
        .iter()
        .copied()
        .find(|tag| evidence.has_field(*tag))
    {
        return DocumentMatch::Field(tag);
    }

    for document in evidence.documents() {
        let lowered = document.to_lowercase();
        if let Some(keyword) = requirement
            .keywords
            .iter()
            .copied()
            .find(|keyword| lowered.contains(keyword))
        {
            return DocumentMatch::Keyword {
                document: document.clone(),
                keyword,
            };
        }
    }

    DocumentMatch::Missing
}

pub fn satisfied(requirement: &DocumentRequirement, evidence: &DocumentEvidence) -> bool {
    verify(requirement, evidence).is_satisfied()
}
