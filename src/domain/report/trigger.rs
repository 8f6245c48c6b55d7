use std::fmt;

use crate::domain::AppError;

/// Comparison operator in a trigger rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        }
    }
}

/// Predicate deciding whether a report's result set fires an alert.
///
/// The grammar is deliberately closed: `row_count <op> <count>` with one of
/// `> >= < <= == !=` and a non-negative integer threshold. Rules come from
/// config files, so nothing here ever evaluates arbitrary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerRule {
    op: Comparison,
    threshold: u64,
}

impl TriggerRule {
    pub fn new(op: Comparison, threshold: u64) -> Self {
        Self { op, threshold }
    }

    pub fn parse(input: &str) -> Result<Self, AppError> {
        let invalid = || AppError::InvalidTriggerRule(input.to_string());
        let rest = input.trim().strip_prefix("row_count").ok_or_else(invalid)?;
        let rest = rest.trim_start();
        let (op, rest) = if let Some(r) = rest.strip_prefix(">=") {
            (Comparison::Ge, r)
        } else if let Some(r) = rest.strip_prefix("<=") {
            (Comparison::Le, r)
        } else if let Some(r) = rest.strip_prefix("==") {
            (Comparison::Eq, r)
        } else if let Some(r) = rest.strip_prefix("!=") {
            (Comparison::Ne, r)
        } else if let Some(r) = rest.strip_prefix('>') {
            (Comparison::Gt, r)
        } else if let Some(r) = rest.strip_prefix('<') {
            (Comparison::Lt, r)
        } else {
            return Err(invalid());
        };
        let threshold: u64 = rest.trim().parse().map_err(|_| invalid())?;
        Ok(Self { op, threshold })
    }

    pub fn evaluate(&self, row_count: usize) -> bool {
        let n = row_count as u64;
        match self.op {
            Comparison::Gt => n > self.threshold,
            Comparison::Ge => n >= self.threshold,
            Comparison::Lt => n < self.threshold,
            Comparison::Le => n <= self.threshold,
            Comparison::Eq => n == self.threshold,
            Comparison::Ne => n != self.threshold,
        }
    }
}

impl Default for TriggerRule {
    /// Fire whenever the result set is non-empty.
    fn default() -> Self {
        Self { op: Comparison::Gt, threshold: 0 }
    }
}

impl fmt::Display for TriggerRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row_count {} {}", self.op.as_str(), self.threshold)
    }
}
