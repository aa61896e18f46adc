use crate::context::{ContextKind, StatementContext};
use crate::node::ExpressionNode;
use crate::numeric::{
    CandidateValue, NumericCandidatePool, normalize_node, parse_float_token, parse_int_token,
};
use crate::policy::SelectionPolicy;
use crate::record::MutantLog;
use crate::span::SourceRange;
use crate::switches::SwitchCaseRegistry;
use crate::symbols::SymbolTable;

/// Stable identifier for the global-constant replacement operator.
pub const OPERATOR_NAME: &str = "global_const_replacement";

/// Constant-replacement mutation operator.
///
/// Replaces eligible scalar literals with other global scalar constants of
/// the translation unit, filtered for validity and narrowed by the
/// configured selection policy.
#[derive(Debug)]
pub struct ConstReplacement {
    policy: SelectionPolicy,
    window: SourceRange,
}

impl Default for ConstReplacement {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstReplacement {
    /// Operator with an empty policy and a window covering the whole unit.
    pub fn new() -> Self {
        Self {
            policy: SelectionPolicy::default(),
            window: SourceRange::whole_unit(),
        }
    }

    /// Rebuild the selection policy from raw option tokens.
    ///
    /// The domain allow-list comes from a separate configuration surface
    /// and survives reconfiguration.
    pub fn configure<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domain = std::mem::take(&mut self.policy.domain_allow_list);
        self.policy = SelectionPolicy::from_tokens(tokens);
        self.policy.domain_allow_list = domain;
    }

    /// Restrict mutation to literals whose source token appears in `tokens`.
    pub fn set_domain<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.domain_allow_list = tokens.into_iter().map(Into::into).collect();
    }

    /// Restrict mutation to literals lying entirely inside `window`.
    pub fn set_mutation_window(&mut self, window: SourceRange) {
        self.window = window;
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// True if this operator may mutate `node` at its current location.
    ///
    /// Only integer, floating and character literals qualify, and only
    /// outside enum declarations, array-size expressions and field
    /// declarations. A non-empty domain further restricts by source token.
    pub fn is_eligible(&self, node: &ExpressionNode, ctx: &StatementContext) -> bool {
        if !node.is_scalar_literal() {
            return false;
        }

        if !self.window.contains_range(&node.range) {
            return false;
        }

        let loc = node.range.start;
        if ctx.is_in(ContextKind::EnumDecl, loc)
            || ctx.is_in(ContextKind::ArrayDeclSize, loc)
            || ctx.is_in(ContextKind::FieldDecl, loc)
        {
            return false;
        }

        let domain = &self.policy.domain_allow_list;
        domain.is_empty() || domain.contains(&node.spelling)
    }

    /// Compute the valid replacement tokens for `node`.
    ///
    /// Candidates come from the global scalar constants; validity filters
    /// run first (integral-only contexts, same-value, duplicate case label,
    /// explicit allow-list), then the selection policy narrows what is
    /// left. Every returned string is already cast-wrapped where the
    /// literal's type requires it.
    pub fn replacements(
        &self,
        node: &ExpressionNode,
        ctx: &StatementContext,
        symbols: &SymbolTable,
        switches: &SwitchCaseRegistry,
    ) -> Vec<String> {
        let loc = node.range.start;

        // These positions require an integral value, so floating candidates
        // must not be offered there.
        let skip_float = ctx.is_in(ContextKind::ArraySubscript, loc)
            || ctx.is_in(ContextKind::SwitchCondition, loc)
            || ctx.is_in(ContextKind::SwitchCaseBody, loc)
            || ctx.is_in(ContextKind::NonFloatingExpr, loc);

        let is_case_label = ctx.is_in(ContextKind::CaseValue, loc);

        // Characters normalize to their integer value so a mutation to the
        // same underlying constant is caught by the equality filter.
        let original = normalize_node(node).unwrap_or_else(|| node.spelling.clone());

        let allow = &self.policy.value_allow_list;

        let mut survivors = Vec::new();
        let mut pool = NumericCandidatePool::new();

        for cand in symbols.global_scalar_constants() {
            if skip_float && cand.is_floating() {
                continue;
            }

            // Unparsable constants are dropped, never fatal.
            let Some(normalized) = normalize_node(cand) else {
                continue;
            };

            if normalized == original {
                continue;
            }

            // A replacement that duplicates a sibling case label would not
            // compile; consult the enclosing switch.
            if is_case_label && switches.is_duplicate_label(&normalized) {
                continue;
            }

            if !allow.is_empty()
                && !allow.contains(&normalized)
                && !allow.contains(&cand.spelling)
            {
                continue;
            }

            if cand.is_floating() {
                if let Some(value) = parse_float_token(&cand.spelling) {
                    pool.push_float(normalized.clone(), value);
                }
            } else if let Some(value) = parse_int_token(&cand.spelling) {
                pool.push_int(normalized.clone(), value);
            }

            survivors.push(normalized);
        }

        let selected = if self.policy.has_selection() {
            let original_value = if node.is_floating() {
                parse_float_token(&node.spelling).map(CandidateValue::Float)
            } else {
                parse_int_token(&node.spelling).map(CandidateValue::Int)
            };

            let mixed = !skip_float && pool.has_floats();
            pool.select(&self.policy, original_value, mixed)
        } else {
            survivors
        };

        selected
            .into_iter()
            .map(|text| wrap_cast(node, text))
            .collect()
    }

    /// Emit one mutant record per accepted replacement.
    pub fn mutate(
        &self,
        node: &ExpressionNode,
        ctx: &StatementContext,
        symbols: &SymbolTable,
        switches: &SwitchCaseRegistry,
        log: &mut MutantLog,
    ) {
        for replacement in self.replacements(node, ctx, symbols, switches) {
            log.add_mutant_entry(
                OPERATOR_NAME,
                node.range.start,
                node.range.end,
                &node.spelling,
                replacement,
                ctx.proteum_line(),
                ctx.containing_function(node.range.start),
            );
        }
    }
}

/// Wrap a replacement in an explicit cast where the literal's type needs it.
///
/// Plain `int` literals are replaced verbatim; enum types and every other
/// scalar kind get a cast to the desugared type so the mutant keeps the
/// original's type. `_Bool` is spelled `bool` in the cast.
fn wrap_cast(node: &ExpressionNode, replacement: String) -> String {
    if !node.ty.is_enum && node.ty.desugared == "int" {
        return replacement;
    }

    let ty = node.ty.desugared.replace("_Bool", "bool");
    format!("static_cast<{ty}>({replacement})")
}
