//! Filter clause parsing and predicate evaluation.
//!
//! A filter expression is an ordered list of clauses, each
//! `(column, operator, literal)` plus the join operator to the next clause.
//! Evaluation is a strict left fold with no precedence and no parentheses:
//! `acc = r0; acc = acc AND/OR r1; ...` — so `c0 AND c1 OR c2` means
//! `(c0 AND c1) OR c2`, never `c0 AND (c1 OR c2)`.

use crate::errors::{CsvMillError, Result};
use crate::row::{field_at, field_count, is_numeric};

/// Comparison operator of a single clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Le,
    Lt,
    Ge,
    Gt,
    Eq,
    Ne,
}

impl FilterOp {
    /// Parses the operator token as it appears on the command line.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "le" => Ok(Self::Le),
            "lt" => Ok(Self::Lt),
            "ge" => Ok(Self::Ge),
            "gt" => Ok(Self::Gt),
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            other => Err(CsvMillError::UnknownOperator { operator: other.to_string() }),
        }
    }

    /// Ordering operators only compare numbers.
    #[must_use]
    pub fn requires_numeric(self) -> bool {
        matches!(self, Self::Le | Self::Lt | Self::Ge | Self::Gt)
    }

    fn token(self) -> &'static str {
        match self {
            Self::Le => "le",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Eq => "eq",
            Self::Ne => "ne",
        }
    }
}

/// Join operator between one clause and the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOp {
    And,
    Or,
}

impl JoinOp {
    /// Parses the join token as it appears on the command line.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(CsvMillError::UnknownJoinOperator { operator: other.to_string() }),
        }
    }

    fn apply(self, acc: bool, next: bool) -> bool {
        match self {
            Self::And => acc && next,
            Self::Or => acc || next,
        }
    }
}

/// One filter test plus its join operator to the next clause.
#[derive(Debug, Clone)]
pub struct FilterClause {
    /// Column name as configured (kept for error messages).
    pub column: String,
    /// Zero-based column index resolved against the header.
    pub column_index: usize,
    /// Comparison operator.
    pub op: FilterOp,
    /// Literal to compare against.
    pub value: String,
    /// Join operator to the following clause; `None` on the last clause.
    pub join_to_next: Option<JoinOp>,
}

/// Ordered sequence of clauses, evaluated as a strict left fold.
#[derive(Debug, Clone, Default)]
pub struct FilterExpr {
    clauses: Vec<FilterClause>,
}

impl FilterExpr {
    /// Parses filter clause specs of the form `"COLUMN OP VALUE [AND|OR]"`,
    /// resolving column names against the header. Every clause but the last
    /// must carry a join operator; the last must not.
    pub fn parse(specs: &[String], header: &[String]) -> Result<Self> {
        let mut clauses = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let tokens: Vec<&str> = spec.split_whitespace().collect();
            if tokens.len() < 3 || tokens.len() > 4 {
                return Err(CsvMillError::InvalidParameter {
                    parameter: "filter".to_string(),
                    reason: format!("'{spec}' is not of the form 'COLUMN OP VALUE [AND|OR]'"),
                });
            }

            let column_index = header
                .iter()
                .position(|name| name == tokens[0])
                .ok_or_else(|| CsvMillError::ColumnNotFound { name: tokens[0].to_string() })?;
            let op = FilterOp::parse(tokens[1])?;
            let value = tokens[2].to_string();

            // Numeric operators are checked against their literal eagerly so a
            // bad configuration fails before the pipeline starts.
            if op.requires_numeric() && parse_number(&value, op).is_err() {
                return Err(CsvMillError::NonNumericComparison {
                    value,
                    operator: op.token().to_string(),
                });
            }

            let join_to_next = match (tokens.len(), i + 1 < specs.len()) {
                (4, true) => Some(JoinOp::parse(tokens[3])?),
                (4, false) => {
                    return Err(CsvMillError::InvalidParameter {
                        parameter: "filter".to_string(),
                        reason: format!("'{spec}' has a join operator but no following clause"),
                    });
                }
                (_, true) => {
                    return Err(CsvMillError::InvalidParameter {
                        parameter: "filter".to_string(),
                        reason: format!("'{spec}' needs a join operator (AND or OR) to the next clause"),
                    });
                }
                (_, false) => None,
            };

            clauses.push(FilterClause {
                column: tokens[0].to_string(),
                column_index,
                op,
                value,
                join_to_next,
            });
        }
        Ok(Self { clauses })
    }

    /// True if no clauses are configured; every row then passes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Evaluates the expression against a row: each clause produces a
    /// boolean, folded left-to-right through the per-clause join operators.
    /// An empty expression passes everything.
    pub fn matches(&self, row: &str) -> Result<bool> {
        let Some((first, rest)) = self.clauses.split_first() else {
            return Ok(true);
        };

        let mut acc = eval_clause(first, row)?;
        for (prev, clause) in self.clauses.iter().zip(rest) {
            let next = eval_clause(clause, row)?;
            // Parsing guarantees every non-final clause carries a join.
            if let Some(join) = prev.join_to_next {
                acc = join.apply(acc, next);
            }
        }
        Ok(acc)
    }
}

fn eval_clause(clause: &FilterClause, row: &str) -> Result<bool> {
    let field = field_at(row, clause.column_index).ok_or(CsvMillError::MalformedRow {
        column: clause.column_index,
        found: field_count(row),
    })?;

    match clause.op {
        FilterOp::Le | FilterOp::Lt | FilterOp::Ge | FilterOp::Gt => {
            let lhs = parse_number(field, clause.op)?;
            let rhs = parse_number(&clause.value, clause.op)?;
            Ok(match clause.op {
                FilterOp::Le => lhs <= rhs,
                FilterOp::Lt => lhs < rhs,
                FilterOp::Ge => lhs >= rhs,
                FilterOp::Gt => lhs > rhs,
                FilterOp::Eq | FilterOp::Ne => unreachable!(),
            })
        }
        FilterOp::Eq | FilterOp::Ne => {
            // Numeric when the extracted value looks numeric, exact string
            // comparison otherwise.
            let equal = if is_numeric(field) {
                parse_number(field, clause.op)? == parse_number(&clause.value, clause.op)?
            } else {
                field == clause.value
            };
            Ok(if clause.op == FilterOp::Eq { equal } else { !equal })
        }
    }
}

fn parse_number(value: &str, op: FilterOp) -> Result<f64> {
    if !is_numeric(value) {
        return Err(CsvMillError::NonNumericComparison {
            value: value.to_string(),
            operator: op.token().to_string(),
        });
    }
    value.parse::<f64>().map_err(|_| CsvMillError::NonNumericComparison {
        value: value.to_string(),
        operator: op.token().to_string(),
    })
}
