// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Travel,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Education,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Food,
        ExpenseCategory::Travel,
        ExpenseCategory::Shopping,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Bills,
        ExpenseCategory::Health,
        ExpenseCategory::Education,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Bills => "Bills",
            ExpenseCategory::Health => "Health",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("Unknown expense category '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Salary,
    Freelance,
    Investment,
    Business,
    Gift,
    HomeMaker,
    Other,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 7] = [
        IncomeCategory::Salary,
        IncomeCategory::Freelance,
        IncomeCategory::Investment,
        IncomeCategory::Business,
        IncomeCategory::Gift,
        IncomeCategory::HomeMaker,
        IncomeCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeCategory::Salary => "Salary",
            IncomeCategory::Freelance => "Freelance",
            IncomeCategory::Investment => "Investment",
            IncomeCategory::Business => "Business",
            IncomeCategory::Gift => "Gift",
            IncomeCategory::HomeMaker => "HomeMaker",
            IncomeCategory::Other => "Other",
        }
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncomeCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("Unknown income category '{}'", s)))
    }
}

/// Where a borrowing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowSource {
    Bank,
    Friends,
    #[serde(rename = "Third Party")]
    ThirdParty,
}

impl BorrowSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowSource::Bank => "Bank",
            BorrowSource::Friends => "Friends",
            BorrowSource::ThirdParty => "Third Party",
        }
    }
}

impl fmt::Display for BorrowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorrowSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "").as_str() {
            "bank" => Ok(BorrowSource::Bank),
            "friend" | "friends" => Ok(BorrowSource::Friends),
            "thirdparty" => Ok(BorrowSource::ThirdParty),
            _ => Err(CoreError::Validation(format!(
                "Unknown borrowing source '{}', expected Bank, Friends or Third Party",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanDirection {
    Lending,
    Borrowing,
}

impl LoanDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanDirection::Lending => "lending",
            LoanDirection::Borrowing => "borrowing",
        }
    }
}

impl fmt::Display for LoanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lending" => Ok(LoanDirection::Lending),
            "borrowing" => Ok(LoanDirection::Borrowing),
            _ => Err(CoreError::Validation(format!(
                "Unknown loan direction '{}', expected 'lending' or 'borrowing'",
                s
            ))),
        }
    }
}

/// Stored lifecycle status. Overdue is never stored; see [`EffectiveStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Paid,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Paid => "paid",
        }
    }
}

impl FromStr for LoanStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(LoanStatus::Pending),
            "paid" => Ok(LoanStatus::Paid),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{}', expected 'pending' or 'paid'",
                s
            ))),
        }
    }
}

/// Display-time status: the stored status, except pending loans past their
/// due date report overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Pending,
    Paid,
    Overdue,
}

impl EffectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveStatus::Pending => "pending",
            EffectiveStatus::Paid => "paid",
            EffectiveStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectiveStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(EffectiveStatus::Pending),
            "paid" => Ok(EffectiveStatus::Paid),
            "overdue" => Ok(EffectiveStatus::Overdue),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{}', expected 'pending', 'paid' or 'overdue'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "loan-due")]
    LoanDue,
    #[serde(rename = "suggestion")]
    Suggestion,
    #[serde(rename = "system")]
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::LoanDue => "loan-due",
            NotificationKind::Suggestion => "suggestion",
            NotificationKind::System => "system",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "loan-due" => Ok(NotificationKind::LoanDue),
            "suggestion" => Ok(NotificationKind::Suggestion),
            "system" => Ok(NotificationKind::System),
            _ => Err(CoreError::Validation(format!(
                "Unknown notification kind '{}'",
                s
            ))),
        }
    }
}

/// Severity tag on an advisory message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Success,
    Tip,
    Reminder,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Success => "success",
            Severity::Tip => "tip",
            Severity::Reminder => "reminder",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub id: i64,
    pub name: String,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub id: i64,
    pub source: String,
    pub category: IncomeCategory,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub direction: LoanDirection,
    pub counterparty_name: String,
    pub amount: Decimal,
    /// Percent per month, simple interest.
    pub interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub paid_date: Option<NaiveDate>,
    pub counterparty_address: Option<String>,
    pub counterparty_phone: Option<String>,
    pub source: Option<BorrowSource>,
    pub notes: Option<String>,
    /// Derived from principal, rate and term at load; never the stored truth.
    pub total_payable: Decimal,
}

impl Loan {
    pub fn effective(&self, today: NaiveDate) -> EffectiveStatus {
        match self.status {
            LoanStatus::Paid => EffectiveStatus::Paid,
            LoanStatus::Pending if self.due_date < today => EffectiveStatus::Overdue,
            LoanStatus::Pending => EffectiveStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub loan_id: Option<i64>,
    pub is_read: bool,
    pub created_at: String,
}
