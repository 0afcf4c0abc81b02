use std::collections::BTreeMap;

use super::domain::{DocumentEvidence, FieldTag};

/// Normalize `(field, identifier)` pairs into the evidence consumed by the rule table.
///
/// Blank identifiers are dropped. Identifiers on unknown fields stay in the ordered
/// sequence for keyword matching but never enter the field map. When a known field
/// repeats, the last identifier wins in the map.
pub fn extract_evidence<I, F, D>(pairs: I) -> DocumentEvidence
where
    I: IntoIterator<Item = (Option<F>, D)>,
    F: AsRef<str>,
    D: Into<String>,
{
    let mut documents = Vec::new();
    let mut by_field = BTreeMap::new();

    for (field, identifier) in pairs {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            continue;
        }

        if let Some(tag) = field.as_ref().and_then(|f| FieldTag::from_field(f.as_ref())) {
            by_field.insert(tag, identifier.clone());
        }
        documents.push(identifier);
    }

    DocumentEvidence::from_parts(documents, by_field)
}
