use crate::infra::{parse_document_arg, InMemoryApplicationRepository, InMemoryNoticePublisher};
use clap::Args;
use loan_desk::config::IntakeConfig;
use loan_desk::error::AppError;
use loan_desk::workflows::lending::applications::intake::parse_number_field;
use loan_desk::workflows::lending::applications::{
    rule_table, DecisionEngine, FieldTag, IntakeGuard, LoanApplicationService, LoanSubmission,
    RuleTableEntry, UploadedDocument,
};
use std::sync::Arc;

const DEMO_REVIEWER: &str = "reviewer@loandesk.local";

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Loan type: agriculture, home, education, or business
    #[arg(long)]
    pub(crate) category: String,
    /// Requested amount
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) amount: String,
    /// Monthly income
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) income: String,
    /// Count of existing loans
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) liabilities: String,
    /// Uploaded document as `field=file` or a bare file name (repeatable)
    #[arg(long = "document", value_parser = parse_document_arg)]
    pub(crate) documents: Vec<UploadedDocument>,
    /// Print every check that ran, not just the decision
    #[arg(long)]
    pub(crate) trail: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the stored records as JSON status payloads
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        category,
        amount,
        income,
        liabilities,
        documents,
        trail,
    } = args;

    let submission = LoanSubmission {
        applicant: "cli".to_string(),
        category,
        amount: parse_number_field("amount", &amount)?,
        income: parse_number_field("income", &income)?,
        liabilities: parse_number_field("liabilities", &liabilities)?,
        documents,
    };

    let validated = IntakeGuard.validate(submission)?;
    let outcome = DecisionEngine::new().assess(&validated.input, &validated.evidence);

    println!(
        "{}: {}",
        outcome.decision.status().label(),
        outcome.decision.reason()
    );
    if trail {
        for record in &outcome.checks {
            let mark = if record.passed { "pass" } else { "FAIL" };
            println!("  [{mark}] {:?}: {}", record.check, record.notes);
        }
    }

    Ok(())
}

pub(crate) fn run_rules() -> Result<(), AppError> {
    for entry in rule_table() {
        render_rule(&entry);
    }
    Ok(())
}

fn render_rule(entry: &RuleTableEntry) {
    println!("{}", entry.category);
    println!(
        "  income floor {} | liability cap {}",
        entry.income_floor, entry.liability_cap
    );
    println!(
        "  requires {} or a file named like {}",
        join_fields(&entry.primary.fields),
        entry.primary.keywords.join(", ")
    );
    println!(
        "  above {}: {} or a file named like {}",
        entry.high_amount_threshold,
        join_fields(&entry.high_amount.fields),
        entry.high_amount.keywords.join(", ")
    );
}

fn join_fields(fields: &[FieldTag]) -> String {
    fields
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(" or ")
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let notices = Arc::new(InMemoryNoticePublisher::default());
    let service = LoanApplicationService::new(
        repository,
        notices.clone(),
        IntakeConfig {
            reviewer_email: Some(DEMO_REVIEWER.to_string()),
        },
    );

    println!("Loan desk demo");
    for submission in demo_submissions() {
        let label = format!(
            "{} {} (income {}, {} existing loans)",
            submission.category, submission.amount, submission.income, submission.liabilities
        );
        match service.submit(submission) {
            Ok(record) => println!(
                "- {} {label} -> {}: {}",
                record.application_id.0,
                record.status().label(),
                record.decision.reason()
            ),
            Err(err) => println!("- {label} -> not evaluated: {err}"),
        }
    }

    let notices = notices.events();
    println!("\nSubmitter notices:");
    for notice in &notices {
        println!("  - {} [{:?}] {}", notice.applicant, notice.level, notice.message);
    }

    let records = match service.list(DEMO_REVIEWER) {
        Ok(records) => records,
        Err(err) => {
            println!("  Repository unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nReviewer view: {} application(s) on file", records.len());
    if args.json {
        let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
        match serde_json::to_string_pretty(&views) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("  Status payload unavailable: {}", err),
        }
    }

    Ok(())
}

fn demo_submissions() -> Vec<LoanSubmission> {
    vec![
        LoanSubmission {
            applicant: "farmer@gmail.com".to_string(),
            category: "agriculture".to_string(),
            amount: 900_000,
            income: 20_000,
            liabilities: 2,
            documents: vec![UploadedDocument::untagged("patta_card.pdf")],
        },
        LoanSubmission {
            applicant: "farmer@gmail.com".to_string(),
            category: "agriculture".to_string(),
            amount: 1_200_000,
            income: 20_000,
            liabilities: 2,
            documents: vec![UploadedDocument::untagged("patta_card.pdf")],
        },
        LoanSubmission {
            applicant: "owner@gmail.com".to_string(),
            category: "home".to_string(),
            amount: 3_000_000,
            income: 25_000,
            liabilities: 1,
            documents: vec![UploadedDocument::untagged("deed.pdf")],
        },
        LoanSubmission {
            applicant: "founder@gmail.com".to_string(),
            category: "business".to_string(),
            amount: 2_500_000,
            income: 60_000,
            liabilities: 3,
            documents: vec![
                UploadedDocument::tagged("gst_returns", "gst_filing.pdf"),
                UploadedDocument::tagged("business_reg", "udyam_cert.pdf"),
            ],
        },
        LoanSubmission {
            applicant: "student@gmail.com".to_string(),
            category: "education".to_string(),
            amount: 400_000,
            income: 30_000,
            liabilities: 13,
            documents: Vec::new(),
        },
        LoanSubmission {
            applicant: "unknown@gmail.com".to_string(),
            category: "vehicle".to_string(),
            amount: 500_000,
            income: 40_000,
            liabilities: 0,
            documents: vec![UploadedDocument::untagged("rc_book.pdf")],
        },
    ]
}
