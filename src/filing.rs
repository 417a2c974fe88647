use crate::tax::paye::TaxAssessment;
use chrono::{DateTime, Utc};
use payec_derive::FormSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use thiserror::Error;

/// Form field metadata generated by the FormSchema derive
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Naira amount
    Amount,
    /// Non-negative whole number
    Count,
    /// Boolean flag
    Flag,
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Amount => "amount",
            FieldKind::Count => "count",
            FieldKind::Flag => "flag",
            FieldKind::Text => "text",
        };
        f.pad(name)
    }
}

/// Raw filing as collected from a form: every value is an optional free
/// string, exactly as the CSV and JSON wire formats carry them. Parsing
/// into a typed [`TaxInput`] happens in [`FilingRecord::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, FormSchema)]
pub struct FilingRecord {
    /// Taxpayer first name, used to label output only
    #[serde(default)]
    pub first_name: Option<String>,
    /// Taxpayer last name, used to label output only
    #[serde(default)]
    pub last_name: Option<String>,
    /// Tax Identification Number, carried through verbatim
    #[serde(default)]
    pub tin: Option<String>,
    /// Annual basic salary in Naira
    #[serde(default)]
    pub basic_salary: Option<String>,
    /// Annual housing allowance in Naira
    #[serde(default)]
    pub housing_allowance: Option<String>,
    /// Annual transport allowance in Naira
    #[serde(default)]
    pub transport_allowance: Option<String>,
    /// Other annual allowances in Naira
    #[serde(default)]
    pub other_allowances: Option<String>,
    /// Annual pension contribution in Naira
    #[serde(default)]
    pub pension_contribution: Option<String>,
    /// Annual National Housing Fund contribution in Naira
    #[serde(default)]
    pub nhf_contribution: Option<String>,
    /// Annual life insurance premium in Naira
    #[serde(default)]
    pub life_insurance_premium: Option<String>,
    /// Number of dependents (relief capped at 10)
    #[serde(default)]
    pub number_of_dependents: Option<String>,
    /// Whether the taxpayer is registered disabled (true/false/yes/no/1/0)
    #[serde(default)]
    pub is_disabled: Option<String>,
}

/// Typed input to the assessment core. All amounts are annual Naira
/// figures; the core clamps negatives to zero so any `TaxInput` is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FormSchema)]
pub struct TaxInput {
    /// Annual basic salary
    pub basic_salary: Decimal,
    /// Annual housing allowance
    pub housing_allowance: Decimal,
    /// Annual transport allowance
    pub transport_allowance: Decimal,
    /// Other annual allowances
    pub other_allowances: Decimal,
    /// Annual pension contribution
    pub pension_contribution: Decimal,
    /// Annual National Housing Fund contribution
    pub nhf_contribution: Decimal,
    /// Annual life insurance premium
    pub life_insurance_premium: Decimal,
    /// Number of dependents
    pub number_of_dependents: u32,
    /// Whether the taxpayer is registered disabled
    pub is_disabled: bool,
}

/// Why a raw field would be coerced by the lenient parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueReason {
    NotANumber,
    Negative,
    NotACount,
    NotAFlag,
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            IssueReason::NotANumber => "not a number, would be treated as 0",
            IssueReason::Negative => "negative, would be treated as 0",
            IssueReason::NotACount => "not a whole number, would be treated as 0",
            IssueReason::NotAFlag => "not a yes/no value, would be treated as no",
        };
        write!(f, "{}", message)
    }
}

/// A field the strict surface flags instead of silently coercing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub value: String,
    pub reason: IssueReason,
}

impl FilingRecord {
    /// Lenient-zero normalization: the public input policy. Blank or
    /// unparsable amounts become 0, negatives clamp to 0, unrecognised
    /// flags are false. Thousands separators and a leading currency sign
    /// are stripped before parsing. Every coercion is logged.
    pub fn normalize(&self) -> TaxInput {
        TaxInput {
            basic_salary: lenient_amount("basic_salary", self.basic_salary.as_deref()),
            housing_allowance: lenient_amount("housing_allowance", self.housing_allowance.as_deref()),
            transport_allowance: lenient_amount(
                "transport_allowance",
                self.transport_allowance.as_deref(),
            ),
            other_allowances: lenient_amount("other_allowances", self.other_allowances.as_deref()),
            pension_contribution: lenient_amount(
                "pension_contribution",
                self.pension_contribution.as_deref(),
            ),
            nhf_contribution: lenient_amount("nhf_contribution", self.nhf_contribution.as_deref()),
            life_insurance_premium: lenient_amount(
                "life_insurance_premium",
                self.life_insurance_premium.as_deref(),
            ),
            number_of_dependents: lenient_count(
                "number_of_dependents",
                self.number_of_dependents.as_deref(),
            ),
            is_disabled: lenient_flag(self.is_disabled.as_deref()),
        }
    }

    /// Strict variant of the input policy: report every field the lenient
    /// parse would coerce, without computing anything.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        let amounts = [
            ("basic_salary", &self.basic_salary),
            ("housing_allowance", &self.housing_allowance),
            ("transport_allowance", &self.transport_allowance),
            ("other_allowances", &self.other_allowances),
            ("pension_contribution", &self.pension_contribution),
            ("nhf_contribution", &self.nhf_contribution),
            ("life_insurance_premium", &self.life_insurance_premium),
        ];
        for (field, value) in amounts {
            let Some(raw) = present(value.as_deref()) else {
                continue;
            };
            match parse_amount(raw) {
                Some(amount) if amount < Decimal::ZERO => issues.push(FieldIssue {
                    field,
                    value: raw.to_string(),
                    reason: IssueReason::Negative,
                }),
                Some(_) => {}
                None => issues.push(FieldIssue {
                    field,
                    value: raw.to_string(),
                    reason: IssueReason::NotANumber,
                }),
            }
        }
        if let Some(raw) = present(self.number_of_dependents.as_deref()) {
            if raw.parse::<u32>().is_err() {
                issues.push(FieldIssue {
                    field: "number_of_dependents",
                    value: raw.to_string(),
                    reason: IssueReason::NotACount,
                });
            }
        }
        if let Some(raw) = present(self.is_disabled.as_deref()) {
            if parse_flag(raw).is_none() {
                issues.push(FieldIssue {
                    field: "is_disabled",
                    value: raw.to_string(),
                    reason: IssueReason::NotAFlag,
                });
            }
        }
        issues
    }

    /// Taxpayer name for labelling output
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => None,
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}

/// Parse an amount string after stripping a leading naira sign and
/// thousands separators. None when unparsable.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('\u{20A6}')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.trim().parse().ok()
}

fn lenient_amount(field: &'static str, value: Option<&str>) -> Decimal {
    let Some(raw) = present(value) else {
        return Decimal::ZERO;
    };
    match parse_amount(raw) {
        Some(amount) if amount < Decimal::ZERO => {
            log::warn!("{}: negative amount {:?} treated as 0", field, raw);
            Decimal::ZERO
        }
        Some(amount) => amount,
        None => {
            log::warn!("{}: unparsable amount {:?} treated as 0", field, raw);
            Decimal::ZERO
        }
    }
}

fn lenient_count(field: &'static str, value: Option<&str>) -> u32 {
    let Some(raw) = present(value) else {
        return 0;
    };
    match raw.parse() {
        Ok(count) => count,
        Err(_) => {
            log::warn!("{}: unparsable count {:?} treated as 0", field, raw);
            0
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" | "" => Some(false),
        _ => None,
    }
}

fn lenient_flag(value: Option<&str>) -> bool {
    value.and_then(parse_flag).unwrap_or(false)
}

/// Deterministic reference for a filing: SHA-256 of the normalized input,
/// truncated to 12 hex characters. Identical inputs share a reference.
pub fn filing_reference(input: &TaxInput) -> String {
    let canonical = serde_json::to_string(input).expect("TaxInput serializes");
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)[..12].to_string()
}

/// Serialized (input, assessment) pair a caller may persist verbatim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingOutput {
    pub reference: String,
    pub computed_at: DateTime<Utc>,
    pub tax_year: i32,
    pub taxpayer: Option<String>,
    pub input: TaxInput,
    pub assessment: TaxAssessment,
}

/// Failure reading a filing document, surfaced to the command layer
#[derive(Debug, Error)]
pub enum FilingError {
    #[error("invalid filing JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid filing CSV")]
    Csv(#[from] csv::Error),
}

/// Read a single filing document (JSON object)
pub fn read_filing_json<R: Read>(reader: R) -> Result<FilingRecord, FilingError> {
    let record = serde_json::from_reader(reader)?;
    Ok(record)
}

/// Read a batch of filings (CSV with headers)
pub fn read_filings_csv<R: Read>(reader: R) -> Result<Vec<FilingRecord>, FilingError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: FilingRecord = result?;
        records.push(record);
    }
    Ok(records)
}
