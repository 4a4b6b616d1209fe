//! Typed values collected by the claim form before submission.
//!
//! A [`ClaimSession`] is built once per submission and consumed by
//! [`ClaimSession::into_claim_form`], which formats every value to display
//! text. The renderer only ever sees the resulting strings.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::error::Error;
use crate::model::{ClaimForm, Section};

/// Currency amount in integer cents. Displays with exactly two decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest magnitude accepted from input. Twice this still fits in i64,
    /// so the difference of two parsed amounts cannot overflow.
    pub const MAX_CENTS: i64 = 999_999_999_999_999;

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX_CENTS as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Money::from_f64)
            .ok_or_else(|| format!("'{s}' is not a currency amount"))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Money::from_f64(v)
                .ok_or_else(|| serde::de::Error::custom(format!("{v} is not a currency amount"))),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum Sex {
    #[default]
    M,
    F,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::M => "M",
            Sex::F => "F",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum FraudStatus {
    #[default]
    No,
    Yes,
    #[serde(rename = "Pending Investigation", alias = "PendingInvestigation")]
    PendingInvestigation,
}

impl fmt::Display for FraudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FraudStatus::No => "No",
            FraudStatus::Yes => "Yes",
            FraudStatus::PendingInvestigation => "Pending Investigation",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientInfo {
    /// "Last Name, First Name, Middle Initial"
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Sex,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsuranceInfo {
    pub insured_name: String,
    pub policy_number: String,
    /// Designated by NUCC; optional.
    pub claim_code: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DamageEstimate {
    pub total_repair_cost: Money,
    pub medium_deformation: Money,
}

impl Default for DamageEstimate {
    fn default() -> Self {
        Self {
            total_repair_cost: Money::from_cents(473_83),
            medium_deformation: Money::from_cents(473_83),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdditionalDetails {
    pub illness_date: Option<NaiveDate>,
    pub unable_to_work_from: Option<NaiveDate>,
    pub unable_to_work_to: Option<NaiveDate>,
    pub hospitalization_from: Option<NaiveDate>,
    pub hospitalization_to: Option<NaiveDate>,
    pub total_charge: Money,
    pub amount_paid: Money,
    /// Explicit balance; when absent it is total charge minus amount paid.
    pub balance_due: Option<Money>,
}

impl AdditionalDetails {
    /// Total charge minus amount paid, or `None` if that overflows.
    pub fn computed_balance(&self) -> Option<Money> {
        self.total_charge.checked_sub(self.amount_paid)
    }

    /// The explicit balance if given, otherwise the computed one.
    pub fn balance_due(&self) -> Option<Money> {
        self.balance_due.or_else(|| self.computed_balance())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Authorization {
    pub signature: String,
    pub claim_date: Option<NaiveDate>,
}

/// All values of one claim submission.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClaimSession {
    pub client: ClientInfo,
    pub insurance: InsuranceInfo,
    pub damage: DamageEstimate,
    pub fraud_status: FraudStatus,
    pub details: AdditionalDetails,
    pub authorization: Authorization,
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

impl ClaimSession {
    /// Format every value and assemble the fixed six-section form.
    pub fn into_claim_form(self) -> Result<ClaimForm, Error> {
        let ClaimSession {
            client,
            insurance,
            damage,
            fraud_status,
            details,
            authorization,
        } = self;
        let balance_due = details.balance_due().ok_or_else(|| {
            Error::InvalidInput(format!(
                "Balance Due out of range: {} minus {}",
                details.total_charge, details.amount_paid
            ))
        })?;

        Ok(ClaimForm::new()
            .section(
                Section::new("Client Information")
                    .field("Client's Name", client.name)
                    .field("Birth Date", date_text(client.birth_date))
                    .field("Sex", client.sex.to_string())
                    .field("Telephone", client.phone)
                    .field("Address", client.address)
                    .field("City", client.city)
                    .field("State", client.state)
                    .field("ZIP Code", client.zip_code),
            )
            .section(
                Section::new("Insurance Information")
                    .field("Insured's Name", insurance.insured_name)
                    .field("Policy Number", insurance.policy_number)
                    .field("Claim Code", insurance.claim_code),
            )
            .section(
                Section::new("Damage Detection and Cost Estimation")
                    .field("Total Estimated Repair Cost", damage.total_repair_cost.to_string())
                    .field("Medium Deformation", damage.medium_deformation.to_string()),
            )
            .section(
                Section::new("Fraud Detection")
                    .field("Is Claim Fraudulent", fraud_status.to_string()),
            )
            .section(
                Section::new("Additional Claim Details")
                    .field("Date of Illness/Injury", date_text(details.illness_date))
                    .field("Unable to Work From", date_text(details.unable_to_work_from))
                    .field("Unable to Work To", date_text(details.unable_to_work_to))
                    .field("Hospitalization From", date_text(details.hospitalization_from))
                    .field("Hospitalization To", date_text(details.hospitalization_to))
                    .field("Total Charge", details.total_charge.to_string())
                    .field("Amount Paid", details.amount_paid.to_string())
                    .field("Balance Due", balance_due.to_string()),
            )
            .section(
                Section::new("Signature and Authorization")
                    .field("Authorized Signature", authorization.signature)
                    .field("Date of Claim", date_text(authorization.claim_date)),
            ))
    }
}
