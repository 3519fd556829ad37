use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::domain::{Amount, BlockHeight, UserId};

/// A single ledger operation in a replay script.
///
/// JSON form is tagged by `op`, e.g. `{"op":"issue","user":"user-1","amount":1000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Issue { user: UserId, amount: Amount },
    Accrue { user: UserId, height: BlockHeight },
    Balance { user: UserId, height: BlockHeight },
    Reset,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Issue { .. } => "issue",
            Operation::Accrue { .. } => "accrue",
            Operation::Balance { .. } => "balance",
            Operation::Reset => "reset",
        }
    }
}

/// Column order of CSV scripts.
pub const CSV_HEADER: [&str; 3] = ["op", "user", "value"];

/// Input encodings accepted for scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Json,
    Csv,
}

impl ScriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptFormat::Json => "json",
            ScriptFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ScriptFormat::Json),
            "csv" => Some(ScriptFormat::Csv),
            _ => None,
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
    }
}

impl std::fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error on line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Line {line}: unknown operation '{op}'")]
    UnknownOperation { line: usize, op: String },

    #[error("Line {line}: invalid {field}: {message}")]
    InvalidField {
        line: usize,
        field: &'static str,
        message: String,
    },
}

/// Ordered list of operations to replay against a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Parse a script in the given format.
    pub fn read<R: Read>(reader: R, format: ScriptFormat) -> Result<Self, ScriptError> {
        match format {
            ScriptFormat::Json => Self::from_json_reader(reader),
            ScriptFormat::Csv => Self::from_csv_reader(reader),
        }
    }

    /// Parse a JSON array of tagged operations.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ScriptError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parse CSV with header `op,user,value`.
    /// `value` holds the amount for `issue` and the block height for
    /// `accrue` and `balance`; `reset` rows leave both columns empty.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ScriptError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let header = csv_reader
            .headers()
            .map_err(|source| ScriptError::Csv { line: 1, source })?
            .iter()
            .collect::<Vec<_>>()
            .join(",");
        if header != CSV_HEADER.join(",") {
            return Err(ScriptError::InvalidField {
                line: 1,
                field: "header",
                message: format!("expected '{}', got '{}'", CSV_HEADER.join(","), header),
            });
        }

        let mut operations = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing
            let record = result.map_err(|source| ScriptError::Csv { line, source })?;

            let op = record.get(0).unwrap_or("");
            let user = record.get(1).unwrap_or("");
            let value = record.get(2).unwrap_or("");

            let operation = match op.to_lowercase().as_str() {
                "issue" => Operation::Issue {
                    user: require_user(line, user)?,
                    amount: parse_integer(line, "amount", value)?,
                },
                "accrue" => Operation::Accrue {
                    user: require_user(line, user)?,
                    height: parse_integer(line, "height", value)?,
                },
                "balance" => Operation::Balance {
                    user: require_user(line, user)?,
                    height: parse_integer(line, "height", value)?,
                },
                "reset" => Operation::Reset,
                _ => {
                    return Err(ScriptError::UnknownOperation {
                        line,
                        op: op.to_string(),
                    });
                }
            };
            operations.push(operation);
        }

        Ok(Self::new(operations))
    }
}

fn require_user(line: usize, user: &str) -> Result<UserId, ScriptError> {
    if user.is_empty() {
        return Err(ScriptError::InvalidField {
            line,
            field: "user",
            message: "must not be empty".to_string(),
        });
    }
    Ok(user.to_string())
}

fn parse_integer(line: usize, field: &'static str, value: &str) -> Result<i64, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidField {
        line,
        field,
        message: format!("expected an integer, got '{}'", value),
    })
}
