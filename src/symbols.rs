use crate::node::ExpressionNode;

/// Symbol-table collaborator: the global scalar constants of the
/// translation unit, in traversal order.
///
/// The parser fills this before the mutation pass; the engine only reads it.
#[derive(Debug, Default)]
pub struct SymbolTable {
    globals: Vec<ExpressionNode>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one global scalar constant, preserving declaration order.
    pub fn add_global_scalar_constant(&mut self, node: ExpressionNode) {
        self.globals.push(node);
    }

    /// Every global scalar constant, in the order declared.
    pub fn global_scalar_constants(&self) -> &[ExpressionNode] {
        &self.globals
    }
}
