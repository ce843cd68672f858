//! Domain models for cashflow ledger lines and their recurrence tags.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Concept text marking the synthetic first entry of a quarter that carries
/// the previous quarter's closing balance.
pub const CARRY_OVER_CONCEPT: &str = "Carry over";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowEntry {
    pub id: String,
    pub date: NaiveDate,
    pub concept: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<f64>,
    /// Running balance after this entry is applied. Authoritative as stored;
    /// never recomputed from the income/expense history.
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_sequence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodicity: Option<Periodicity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_ghost: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl CashflowEntry {
    pub fn new(date: NaiveDate, concept: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            concept: concept.into(),
            income: None,
            expense: None,
            balance: 0.0,
            category: None,
            bank_name: None,
            bank_sequence: None,
            periodicity: None,
            invoice_id: None,
            expense_id: None,
            is_ghost: false,
        }
    }

    pub fn with_income(mut self, amount: f64) -> Self {
        self.income = Some(amount);
        self
    }

    pub fn with_expense(mut self, amount: f64) -> Self {
        self.expense = Some(amount);
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank_name = Some(bank.into());
        self
    }

    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = Some(periodicity);
        self
    }

    /// Income amount with absence treated as zero.
    pub fn income_amount(&self) -> f64 {
        self.income.unwrap_or(0.0)
    }

    /// Expense amount with absence treated as zero.
    pub fn expense_amount(&self) -> f64 {
        self.expense.unwrap_or(0.0)
    }

    /// Partition key for per-bank balance chains. A missing bank name is the
    /// single implicit bank, keyed by the empty string.
    pub fn bank_key(&self) -> &str {
        self.bank_name.as_deref().unwrap_or("")
    }

    pub fn is_carry_over(&self) -> bool {
        self.concept == CARRY_OVER_CONCEPT
    }

    /// A real entry moves money: it is not the carry-over line and carries an
    /// income or an expense.
    pub fn is_real(&self) -> bool {
        !self.is_carry_over() && (self.income.is_some() || self.expense.is_some())
    }

    /// Clones this entry into a forecast placeholder on `date`. Ghosts keep
    /// concept, amounts, category, bank, and periodicity, but never join the
    /// balance chain and never reference source documents.
    pub fn ghost_on(&self, date: NaiveDate) -> CashflowEntry {
        CashflowEntry {
            id: format!("ghost-{}-{}", self.id, date),
            date,
            concept: self.concept.clone(),
            income: self.income,
            expense: self.expense,
            balance: 0.0,
            category: self.category.clone(),
            bank_name: self.bank_name.clone(),
            bank_sequence: None,
            periodicity: self.periodicity,
            invoice_id: None,
            expense_id: None,
            is_ghost: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Recurrence tag marking an entry as a template for forecast generation.
pub enum Periodicity {
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
    #[serde(rename = "1y")]
    Yearly,
}

impl Periodicity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "1mo",
            Periodicity::Quarterly => "3mo",
            Periodicity::Yearly => "1y",
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Periodicity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1mo" => Ok(Periodicity::Monthly),
            "3mo" => Ok(Periodicity::Quarterly),
            "1y" => Ok(Periodicity::Yearly),
            other => Err(format!("unknown periodicity `{}`", other)),
        }
    }
}
