use super::super::domain::{FieldTag, LoanCategory};
use super::policy::RejectionReason;
use serde::Serialize;

/// Applies to every category before any category row is consulted.
pub const COMMON_LIABILITY_CAP: u64 = 12;

/// Document class required by a rule, satisfied by any of `fields` or a keyword hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentRequirement {
    pub fields: &'static [FieldTag],
    pub keywords: &'static [&'static str],
    pub failure: RejectionReason,
}

impl DocumentRequirement {
    pub(crate) fn field_list(&self) -> String {
        self.fields
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Additional requirement for amounts strictly above `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountTier {
    pub threshold: u64,
    pub requirement: DocumentRequirement,
}

/// One row of the eligibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRules {
    pub category: LoanCategory,
    pub income_floor: u64,
    pub liability_cap: u64,
    pub primary: DocumentRequirement,
    pub high_amount: AmountTier,
}

static AGRICULTURE: CategoryRules = CategoryRules {
    category: LoanCategory::Agriculture,
    income_floor: 15_000,
    liability_cap: 5,
    primary: DocumentRequirement {
        fields: &[FieldTag::LandOwnership],
        keywords: &["land", "patta", "chitta", "adangal", "ownership", "property"],
        failure: RejectionReason::MissingLandOwnership,
    },
    high_amount: AmountTier {
        threshold: 1_000_000,
        requirement: DocumentRequirement {
            fields: &[FieldTag::CropPlan],
            keywords: &["crop", "subsidy", "cultivation", "plan"],
            failure: RejectionReason::MissingCropPlan,
        },
    },
};

static HOME: CategoryRules = CategoryRules {
    category: LoanCategory::Home,
    income_floor: 30_000,
    liability_cap: 8,
    primary: DocumentRequirement {
        fields: &[FieldTag::PropertyDoc],
        keywords: &["property", "house", "home", "deed", "title", "ownership"],
        failure: RejectionReason::MissingPropertyDocument,
    },
    high_amount: AmountTier {
        threshold: 5_000_000,
        requirement: DocumentRequirement {
            fields: &[FieldTag::ItReturns],
            keywords: &["it", "return", "income", "tax"],
            failure: RejectionReason::MissingItReturns,
        },
    },
};

static EDUCATION: CategoryRules = CategoryRules {
    category: LoanCategory::Education,
    income_floor: 20_000,
    liability_cap: 10,
    primary: DocumentRequirement {
        fields: &[FieldTag::AdmissionLetter],
        keywords: &["admission", "college", "university", "institute", "course"],
        failure: RejectionReason::MissingAdmissionLetter,
    },
    high_amount: AmountTier {
        threshold: 500_000,
        requirement: DocumentRequirement {
            fields: &[FieldTag::GuarantorProof],
            keywords: &["guarantor", "guarantee", "sponsor"],
            failure: RejectionReason::MissingGuarantorProof,
        },
    },
};

static BUSINESS: CategoryRules = CategoryRules {
    category: LoanCategory::Business,
    income_floor: 50_000,
    liability_cap: 12,
    primary: DocumentRequirement {
        fields: &[FieldTag::BusinessReg],
        keywords: &[
            "business",
            "registration",
            "udyam",
            "msme",
            "gst",
            "company",
            "firm",
        ],
        failure: RejectionReason::MissingBusinessRegistration,
    },
    high_amount: AmountTier {
        threshold: 2_000_000,
        requirement: DocumentRequirement {
            fields: &[FieldTag::GstReturns, FieldTag::ItReturns],
            keywords: &["gst", "it", "return", "financial", "balance", "profit"],
            failure: RejectionReason::MissingFinancialReturns,
        },
    },
};

pub fn rules_for(category: LoanCategory) -> &'static CategoryRules {
    match category {
        LoanCategory::Agriculture => &AGRICULTURE,
        LoanCategory::Home => &HOME,
        LoanCategory::Education => &EDUCATION,
        LoanCategory::Business => &BUSINESS,
    }
}

/// Serializable rendition of a table row for the rules endpoint and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTableEntry {
    pub category: LoanCategory,
    pub income_floor: u64,
    pub liability_cap: u64,
    pub primary: RequirementView,
    pub high_amount_threshold: u64,
    pub high_amount: RequirementView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementView {
    pub fields: Vec<FieldTag>,
    pub keywords: Vec<&'static str>,
    pub failure_reason: &'static str,
}

impl From<&DocumentRequirement> for RequirementView {
    fn from(requirement: &DocumentRequirement) -> Self {
        Self {
            fields: requirement.fields.to_vec(),
            keywords: requirement.keywords.to_vec(),
            failure_reason: requirement.failure.message(),
        }
    }
}

impl From<&CategoryRules> for RuleTableEntry {
    fn from(rules: &CategoryRules) -> Self {
        Self {
            category: rules.category,
            income_floor: rules.income_floor,
            liability_cap: rules.liability_cap,
            primary: RequirementView::from(&rules.primary),
            high_amount_threshold: rules.high_amount.threshold,
            high_amount: RequirementView::from(&rules.high_amount.requirement),
        }
    }
}

pub fn rule_table() -> Vec<RuleTableEntry> {
    LoanCategory::ordered()
        .into_iter()
        .map(|category| RuleTableEntry::from(rules_for(category)))
        .collect()
}
