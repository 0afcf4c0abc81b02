use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Loan products offered at the desk. Each one owns a full row in the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCategory {
    Agriculture,
    Home,
    Education,
    Business,
}

impl LoanCategory {
    pub const fn ordered() -> [Self; 4] {
        [Self::Agriculture, Self::Home, Self::Education, Self::Business]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Agriculture => "agriculture",
            Self::Home => "home",
            Self::Education => "education",
            Self::Business => "business",
        }
    }

    /// Case-insensitive lookup of the wire name; unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.label() == normalized)
    }
}

impl fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Financial facts the rule table is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInput {
    pub category: LoanCategory,
    pub amount: u64,
    /// Monthly income.
    pub income: u64,
    /// Count of existing obligations.
    pub liabilities: u64,
}

/// Upload form fields whose purpose is known to the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldTag {
    LandOwnership,
    CropPlan,
    PropertyDoc,
    ItReturns,
    AdmissionLetter,
    GuarantorProof,
    BusinessReg,
    GstReturns,
}

impl FieldTag {
    pub const ALL: [FieldTag; 8] = [
        FieldTag::LandOwnership,
        FieldTag::CropPlan,
        FieldTag::PropertyDoc,
        FieldTag::ItReturns,
        FieldTag::AdmissionLetter,
        FieldTag::GuarantorProof,
        FieldTag::BusinessReg,
        FieldTag::GstReturns,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldTag::LandOwnership => "land_ownership",
            FieldTag::CropPlan => "crop_plan",
            FieldTag::PropertyDoc => "property_doc",
            FieldTag::ItReturns => "it_returns",
            FieldTag::AdmissionLetter => "admission_letter",
            FieldTag::GuarantorProof => "guarantor_proof",
            FieldTag::BusinessReg => "business_reg",
            FieldTag::GstReturns => "gst_returns",
        }
    }

    /// Exact match against the whitelisted form field names.
    pub fn from_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == field)
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence of submitted supporting documents.
///
/// `documents` keeps every identifier in submission order. `by_field` only holds
/// identifiers that arrived on a whitelisted form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEvidence {
    documents: Vec<String>,
    by_field: BTreeMap<FieldTag, String>,
}

impl DocumentEvidence {
    pub fn from_parts(documents: Vec<String>, by_field: BTreeMap<FieldTag, String>) -> Self {
        Self {
            documents,
            by_field,
        }
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn by_field(&self) -> &BTreeMap<FieldTag, String> {
        &self.by_field
    }

    pub fn field(&self, tag: FieldTag) -> Option<&str> {
        self.by_field.get(&tag).map(String::as_str)
    }

    pub fn has_field(&self, tag: FieldTag) -> bool {
        self.by_field.contains_key(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_documents(self) -> Vec<String> {
        self.documents
    }
}

/// A single uploaded file as reported by the upload handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDocument {
    /// Form field the file arrived on, if any.
    #[serde(default)]
    pub field: Option<String>,
    pub file_name: String,
}

impl UploadedDocument {
    pub fn tagged(field: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            file_name: file_name.into(),
        }
    }

    pub fn untagged(file_name: impl Into<String>) -> Self {
        Self {
            field: None,
            file_name: file_name.into(),
        }
    }
}

/// Raw submission as received from the form or API, before intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSubmission {
    pub applicant: String,
    pub category: String,
    pub amount: i64,
    pub income: i64,
    pub liabilities: i64,
    #[serde(default)]
    pub documents: Vec<UploadedDocument>,
}

/// Status persisted alongside each application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanApplicationStatus {
    Approved,
    Rejected,
}

impl LoanApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanApplicationStatus::Approved => "approved",
            LoanApplicationStatus::Rejected => "rejected",
        }
    }
}
