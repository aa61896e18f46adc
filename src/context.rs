use serde::{Deserialize, Serialize};

use crate::span::{SourceLoc, SourceRange};

/// Function name reported for locations outside any tracked function.
pub const GLOBAL_SCOPE: &str = "global_scope";

/// Named syntactic contexts the tracker keeps a range slot for.
///
/// The traversal replaces a slot every time it re-enters the construct, so
/// each slot always holds the most recently entered instance. Case values
/// get their own slot, distinct from the switch condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    EnumDecl,
    ArrayDeclSize,
    FieldDecl,
    SwitchCondition,
    CaseValue,
    SwitchCaseBody,
    ArraySubscript,
    NonFloatingExpr,
    AssignmentLhs,
    SpecialAssignmentRhs,
    AddressOf,
    IncDec,
    Lambda,
    DeclStmt,
    Typedef,
}

impl ContextKind {
    const COUNT: usize = 15;

    fn index(self) -> usize {
        self as usize
    }
}

/// Statement-context bookkeeping for one traversal of a translation unit.
///
/// Single-threaded and single-pass: the external tree-walker mutates this
/// on construct enter/exit, and the mutation operators query it when they
/// visit a literal. The loop stack prunes itself lazily and therefore
/// requires queries to arrive in monotonic traversal order.
#[derive(Debug)]
pub struct StatementContext {
    ranges: [SourceRange; ContextKind::COUNT],
    loop_stack: Vec<(String, SourceRange)>,
    function_name: String,
    function_range: SourceRange,
    proteum_line: u32,
}

impl Default for StatementContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementContext {
    /// Fresh tracker with every slot degenerate and no function entered.
    pub fn new() -> Self {
        Self {
            ranges: [SourceRange::degenerate(); ContextKind::COUNT],
            loop_stack: Vec::new(),
            function_name: GLOBAL_SCOPE.to_string(),
            function_range: SourceRange::degenerate(),
            proteum_line: 0,
        }
    }

    /// Replace the slot for `kind`; the previous range is discarded.
    ///
    /// `None` is a no-op, matching the traversal's habit of forwarding
    /// optional ranges straight through.
    pub fn set_range(&mut self, kind: ContextKind, range: Option<SourceRange>) {
        if let Some(range) = range {
            self.ranges[kind.index()] = range;
        }
    }

    /// True if `loc` lies inside the current range for `kind`.
    ///
    /// Callers pass a node's begin location; begin-location containment is
    /// the only containment test the tracker answers.
    pub fn is_in(&self, kind: ContextKind, loc: SourceLoc) -> bool {
        self.ranges[kind.index()].contains(loc)
    }

    /// Push a loop body range; loops nest, so entries stack.
    pub fn enter_loop(&mut self, label: impl Into<String>, range: SourceRange) {
        self.loop_stack.push((label.into(), range));
    }

    /// True if `loc` is inside some loop entered earlier in the traversal.
    ///
    /// Stale entries are popped from the top first. Correct only when
    /// queries arrive in forward traversal order consistent with the nested
    /// push order.
    pub fn is_in_loop(&mut self, loc: SourceLoc) -> bool {
        while let Some((_, range)) = self.loop_stack.last() {
            if range.contains(loc) {
                break;
            }
            self.loop_stack.pop();
        }

        !self.loop_stack.is_empty()
    }

    /// Number of loop entries currently on the stack (after pruning).
    pub fn loop_depth(&self) -> usize {
        self.loop_stack.len()
    }

    /// Record the function the traversal is currently inside.
    pub fn set_function(&mut self, name: impl Into<String>, range: SourceRange) {
        self.function_name = name.into();
        self.function_range = range;
    }

    /// Name of the function containing `loc`, or the global-scope sentinel.
    pub fn containing_function(&self, loc: SourceLoc) -> &str {
        if self.function_range.contains(loc) {
            &self.function_name
        } else {
            GLOBAL_SCOPE
        }
    }

    /// Proteum-style line number of the statement being visited.
    pub fn proteum_line(&self) -> u32 {
        self.proteum_line
    }

    pub fn set_proteum_line(&mut self, line: u32) {
        self.proteum_line = line;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> SourceRange {
        SourceRange { start, end }
    }

    #[test]
    fn fresh_tracker_contains_nothing() {
        let ctx = StatementContext::new();

        assert!(!ctx.is_in(ContextKind::EnumDecl, 0));
        assert!(!ctx.is_in(ContextKind::ArrayDeclSize, 100));
        assert_eq!(ctx.containing_function(5), GLOBAL_SCOPE);
    }

    #[test]
    fn set_range_replaces_the_slot() {
        let mut ctx = StatementContext::new();

        ctx.set_range(ContextKind::FieldDecl, Some(range(10, 20)));
        assert!(ctx.is_in(ContextKind::FieldDecl, 15));

        // Re-entering the construct discards the old range entirely.
        ctx.set_range(ContextKind::FieldDecl, Some(range(40, 50)));
        assert!(!ctx.is_in(ContextKind::FieldDecl, 15));
        assert!(ctx.is_in(ContextKind::FieldDecl, 45));
    }

    #[test]
    fn set_range_none_is_a_no_op() {
        let mut ctx = StatementContext::new();
        ctx.set_range(ContextKind::Lambda, Some(range(5, 9)));

        ctx.set_range(ContextKind::Lambda, None);
        assert!(ctx.is_in(ContextKind::Lambda, 6));
    }

    #[test]
    fn case_value_has_its_own_slot() {
        let mut ctx = StatementContext::new();

        ctx.set_range(ContextKind::SwitchCondition, Some(range(10, 20)));
        ctx.set_range(ContextKind::CaseValue, Some(range(30, 35)));

        assert!(ctx.is_in(ContextKind::SwitchCondition, 12));
        assert!(!ctx.is_in(ContextKind::SwitchCondition, 32));
        assert!(ctx.is_in(ContextKind::CaseValue, 32));
    }

    #[test]
    fn loop_stack_prunes_stale_entries_from_the_top() {
        let mut ctx = StatementContext::new();

        ctx.enter_loop("outer", range(0, 100));
        ctx.enter_loop("inner", range(20, 40));

        assert!(ctx.is_in_loop(30));
        assert_eq!(ctx.loop_depth(), 2);

        // Past the inner loop but still inside the outer one.
        assert!(ctx.is_in_loop(60));
        assert_eq!(ctx.loop_depth(), 1);

        // Past everything.
        assert!(!ctx.is_in_loop(150));
        assert_eq!(ctx.loop_depth(), 0);
    }

    #[test]
    fn containing_function_uses_the_tracked_range() {
        let mut ctx = StatementContext::new();
        ctx.set_function("compute", range(100, 200));

        assert_eq!(ctx.containing_function(150), "compute");
        assert_eq!(ctx.containing_function(250), GLOBAL_SCOPE);
        assert_eq!(ctx.containing_function(99), GLOBAL_SCOPE);
    }
}
