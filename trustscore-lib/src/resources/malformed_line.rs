use core::fmt::{Display, Formatter};

/// Why an input line could not be turned into a resource group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The model field (the last one) is empty
    MissingModel,

    /// The line has more than three comma-separated fields
    TooManyFields(usize),
}

/// An input line that was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the input file
    pub line: usize,
    pub reason: MalformedReason,
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingModel => write!(f, "no model URL"),
            Self::TooManyFields(n) => write!(f, "expected at most 3 comma-separated fields, found {n}"),
        }
    }
}

impl Display for MalformedLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl core::error::Error for MalformedLine {}
