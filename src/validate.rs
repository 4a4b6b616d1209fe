//! Cross-field checks on a claim session.
//!
//! These run only when a caller asks for them; the renderer never does.

use std::fmt;

use chrono::NaiveDate;

use crate::session::{ClaimSession, Money};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// Form label of the offending field.
    pub field: String,
    pub message: String,
}

impl Finding {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

fn check_required(value: &str, label: &str, findings: &mut Vec<Finding>) {
    if value.trim().is_empty() {
        findings.push(Finding::new(label, "is required"));
    }
}

fn check_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    from_label: &str,
    to_label: &str,
    findings: &mut Vec<Finding>,
) {
    if let (Some(from), Some(to)) = (from, to)
        && to < from
    {
        findings.push(Finding::new(
            to_label,
            format!("{to} is before {from_label} ({from})"),
        ));
    }
}

fn check_non_negative(amount: Money, label: &str, findings: &mut Vec<Finding>) {
    if amount.is_negative() {
        findings.push(Finding::new(label, format!("{amount} is negative")));
    }
}

pub fn validate(session: &ClaimSession) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_required(&session.client.name, "Client's Name", &mut findings);
    check_required(&session.insurance.policy_number, "Policy Number", &mut findings);
    check_required(&session.authorization.signature, "Authorized Signature", &mut findings);

    let details = &session.details;
    check_range(
        details.unable_to_work_from,
        details.unable_to_work_to,
        "Unable to Work From",
        "Unable to Work To",
        &mut findings,
    );
    check_range(
        details.hospitalization_from,
        details.hospitalization_to,
        "Hospitalization From",
        "Hospitalization To",
        &mut findings,
    );

    for (amount, label) in [
        (session.damage.total_repair_cost, "Total Estimated Repair Cost"),
        (session.damage.medium_deformation, "Medium Deformation"),
        (details.total_charge, "Total Charge"),
        (details.amount_paid, "Amount Paid"),
    ] {
        check_non_negative(amount, label, &mut findings);
    }

    match (details.balance_due, details.computed_balance()) {
        (_, None) => findings.push(Finding::new(
            "Balance Due",
            "Total Charge minus Amount Paid is out of range",
        )),
        (Some(given), Some(expected)) => {
            check_non_negative(given, "Balance Due", &mut findings);
            if given != expected {
                findings.push(Finding::new(
                    "Balance Due",
                    format!("{given} does not equal Total Charge minus Amount Paid ({expected})"),
                ));
            }
        }
        (None, Some(computed)) => check_non_negative(computed, "Balance Due", &mut findings),
    }

    findings
}
