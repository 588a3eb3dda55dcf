use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status given to a freshly added shipment.
pub const DEFAULT_STATUS: &str = "Pending";

/// How the buyer pays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentTerm {
    /// Letter of credit
    #[serde(rename = "LC")]
    LetterOfCredit,
    /// Cash against documents
    #[serde(rename = "CAD")]
    CashAgainstDocuments,
    /// Telegraphic transfer
    #[serde(rename = "TT")]
    TelegraphicTransfer,
}

impl PaymentTerm {
    pub const ALL: [PaymentTerm; 3] = [
        PaymentTerm::LetterOfCredit,
        PaymentTerm::CashAgainstDocuments,
        PaymentTerm::TelegraphicTransfer,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PaymentTerm::LetterOfCredit => "LC",
            PaymentTerm::CashAgainstDocuments => "CAD",
            PaymentTerm::TelegraphicTransfer => "TT",
        }
    }
}

impl fmt::Display for PaymentTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for PaymentTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PaymentTerm::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Unvalidated shipment input.
#[derive(Clone, Debug)]
pub struct ShipmentDraft {
    pub shipment_id: String,
    pub buyer: String,
    pub contract_date: NaiveDate,
    pub etd: NaiveDate,
    pub payment_term: String,
}

/// A stored shipment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: String,
    pub buyer: String,
    pub contract_date: NaiveDate,
    /// Estimated time of departure
    pub etd: NaiveDate,
    pub payment_term: PaymentTerm,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}
