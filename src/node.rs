use serde::{Deserialize, Serialize};

use crate::span::SourceRange;

/// Syntactic class of an expression node, as reported by the parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExprKind {
    /// Integer literal (decimal, hex, octal or binary spelling).
    Integer,

    /// Floating-point literal.
    Floating,

    /// Character literal (for example `'a'`).
    Character,

    /// Boolean literal.
    Boolean,

    /// Anything else (identifiers, calls, compound expressions, ...).
    Other,
}

/// Static type information the parser attaches to an expression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Type spelling as written in the source (for example `size_t`).
    pub spelling: String,

    /// Fully desugared spelling (for example `unsigned long`).
    pub desugared: String,

    /// True when the type is an enumeration type.
    pub is_enum: bool,
}

impl TypeDescriptor {
    /// Descriptor for the default signed-integer type.
    pub fn plain_int() -> Self {
        Self {
            spelling: "int".to_string(),
            desugared: "int".to_string(),
            is_enum: false,
        }
    }
}

/// Handle to a parsed expression, provided by the parser collaborator.
///
/// The engine never walks the AST itself; everything it needs about a node
/// is carried here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpressionNode {
    /// Source range the node covers.
    pub range: SourceRange,

    /// Literal text exactly as spelled in the source.
    pub spelling: String,

    /// Syntactic class of the node.
    pub kind: ExprKind,

    /// Static type of the node.
    pub ty: TypeDescriptor,
}

impl ExpressionNode {
    /// True for the literal classes the constant-replacement operator targets.
    pub fn is_scalar_literal(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Integer | ExprKind::Floating | ExprKind::Character
        )
    }

    /// True for floating-point literals.
    pub fn is_floating(&self) -> bool {
        self.kind == ExprKind::Floating
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{float_lit, int_lit};
    use super::*;

    #[test]
    fn scalar_literal_classes() {
        assert!(int_lit("5", 0).is_scalar_literal());
        assert!(float_lit("2.5", 0).is_scalar_literal());

        let other = ExpressionNode {
            range: SourceRange { start: 0, end: 1 },
            spelling: "x".to_string(),
            kind: ExprKind::Other,
            ty: TypeDescriptor::plain_int(),
        };
        assert!(!other.is_scalar_literal());
    }

    #[test]
    fn node_roundtrips_through_json() {
        let node = int_lit("0x10", 12);

        let json = serde_json::to_string(&node).unwrap();
        let back: ExpressionNode = serde_json::from_str(&json).unwrap();

        assert_eq!(back, node);
    }
}
