use serde::{Deserialize, Serialize};

use crate::context::{ContextKind, StatementContext};
use crate::node::ExpressionNode;
use crate::operator::ConstReplacement;
use crate::record::{MutantLog, MutantRecord};
use crate::span::SourceRange;
use crate::switches::SwitchCaseRegistry;
use crate::symbols::SymbolTable;

/// One event emitted by the external tree-walker.
///
/// A trace is the serialized form of the traversal contract: the walker
/// reports context changes in forward source order and announces every
/// literal it visits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraversalEvent {
    /// The walker entered construct `context` covering `range`.
    SetContext {
        context: ContextKind,
        range: SourceRange,
    },

    /// The walker entered a loop body.
    EnterLoop { label: String, range: SourceRange },

    /// The walker entered a function definition.
    EnterFunction { name: String, range: SourceRange },

    /// Proteum-style line number of the statement about to be visited.
    SetLine { line: u32 },

    /// The walker entered a `switch`; `labels` are the case-label values
    /// already known for it.
    OpenSwitch { id: u64, labels: Vec<String> },

    /// The walker visited a literal expression.
    VisitLiteral { node: ExpressionNode },
}

/// Serialized description of one mutation pass over a translation unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramTrace {
    /// Raw option tokens for the operator (keywords, `part` directives,
    /// explicit allow-list values).
    #[serde(default)]
    pub options: Vec<String>,

    /// Optional source-token domain allow-list.
    #[serde(default)]
    pub domain: Vec<String>,

    /// Optional global mutation window; whole unit when absent.
    #[serde(default)]
    pub window: Option<SourceRange>,

    /// Global scalar constants of the unit, in declaration order.
    #[serde(default)]
    pub constants: Vec<ExpressionNode>,

    /// Traversal events in forward source order.
    #[serde(default)]
    pub events: Vec<TraversalEvent>,
}

/// What one replay produced.
#[derive(Debug)]
pub struct ReplayOutcome {
    /// Literals the walker visited.
    pub visited: usize,

    /// Literals that passed the eligibility predicates.
    pub eligible: usize,

    /// Visited literals that were inside a loop body.
    pub literals_in_loops: usize,

    /// Mutant records, in emission order.
    pub records: Vec<MutantRecord>,
}

/// Drive the tracker and operator with a recorded traversal.
pub fn replay(trace: &ProgramTrace) -> ReplayOutcome {
    let mut operator = ConstReplacement::new();
    operator.configure(&trace.options);
    if !trace.domain.is_empty() {
        operator.set_domain(trace.domain.iter().cloned());
    }
    if let Some(window) = trace.window {
        operator.set_mutation_window(window);
    }

    let mut symbols = SymbolTable::new();
    for constant in &trace.constants {
        symbols.add_global_scalar_constant(constant.clone());
    }

    let mut ctx = StatementContext::new();
    let mut switches = SwitchCaseRegistry::new();
    let mut log = MutantLog::new();

    let mut visited = 0;
    let mut eligible = 0;
    let mut literals_in_loops = 0;

    for event in &trace.events {
        match event {
            TraversalEvent::SetContext { context, range } => {
                ctx.set_range(*context, Some(*range));
            }
            TraversalEvent::EnterLoop { label, range } => {
                ctx.enter_loop(label.clone(), *range);
            }
            TraversalEvent::EnterFunction { name, range } => {
                ctx.set_function(name.clone(), *range);
            }
            TraversalEvent::SetLine { line } => {
                ctx.set_proteum_line(*line);
            }
            TraversalEvent::OpenSwitch { id, labels } => {
                switches.open_switch(*id);
                for label in labels {
                    switches.add_case_label(label.clone());
                }
            }
            TraversalEvent::VisitLiteral { node } => {
                visited += 1;

                if ctx.is_in_loop(node.range.start) {
                    literals_in_loops += 1;
                }

                if operator.is_eligible(node, &ctx) {
                    eligible += 1;
                    operator.mutate(node, &ctx, &symbols, &switches, &mut log);
                }
            }
        }
    }

    ReplayOutcome {
        visited,
        eligible,
        literals_in_loops,
        records: log.into_entries(),
    }
}
