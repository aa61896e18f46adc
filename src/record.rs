use serde::{Deserialize, Serialize};

use crate::span::SourceLoc;

/// One accepted replacement for one literal.
///
/// Records are handed to the recorder as soon as they are produced; the
/// operator never holds on to them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutantRecord {
    /// Short, stable identifier of the operator that produced the mutant.
    pub operator_name: String,

    /// Start location of the mutated literal.
    pub start: SourceLoc,

    /// End location of the mutated literal.
    pub end: SourceLoc,

    /// Literal text exactly as spelled in the source.
    pub original_token: String,

    /// Replacement text, cast-wrapped where the literal's type requires it.
    pub replacement_token: String,

    /// Proteum-style line number of the enclosing statement.
    pub line_number: u32,

    /// Name of the enclosing function, or the global-scope sentinel.
    pub enclosing_function: String,
}

/// Append-only recorder collaborator.
///
/// Never rejects an entry; downstream materialization decides what to do
/// with the records.
#[derive(Debug, Default)]
pub struct MutantLog {
    entries: Vec<MutantRecord>,
}

impl MutantLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one mutant record.
    #[allow(clippy::too_many_arguments)]
    pub fn add_mutant_entry(
        &mut self,
        operator_name: &str,
        start: SourceLoc,
        end: SourceLoc,
        original_token: &str,
        replacement_token: String,
        line_number: u32,
        enclosing_function: &str,
    ) {
        self.entries.push(MutantRecord {
            operator_name: operator_name.to_string(),
            start,
            end,
            original_token: original_token.to_string(),
            replacement_token,
            line_number,
            enclosing_function: enclosing_function.to_string(),
        });
    }

    /// Records accumulated so far, in emission order.
    pub fn entries(&self) -> &[MutantRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the log, yielding the records in emission order.
    pub fn into_entries(self) -> Vec<MutantRecord> {
        self.entries
    }
}

/// Format one record as a single, readable line.
pub fn format_record(index: usize, r: &MutantRecord) -> String {
    format!(
        "#{index} [{start}..{end}] {op} line {line} in {func}: {orig:?} -> {repl:?}",
        start = r.start,
        end = r.end,
        op = r.operator_name,
        line = r.line_number,
        func = r.enclosing_function,
        orig = r.original_token,
        repl = r.replacement_token,
    )
}
