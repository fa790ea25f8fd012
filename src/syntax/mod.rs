//! Tree capabilities the folding engine reads.
//!
//! The engine never touches a concrete CST. It reads nodes through
//! [`SourceUnit`], a narrow read-only view: node kind, range, text,
//! parent/children navigation, and the handful of semantic queries the
//! generators need (qualified names, declared variables, modifiers,
//! parameters).
//!
//! [`JavaSource`] implements it over the bundled rowan parser.

use std::fmt::Debug;
use std::hash::Hash;

use crate::base::TextRange;

mod java;

pub use java::JavaSource;

/// Coarse classification of tree nodes, as far as folding cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A written type (`int`, `java.util.List<String>`, `String[]`)
    TypeElement,
    /// Object or array creation (`new Foo()`)
    NewExpression,
    /// A possibly qualified reference to a type or package
    CodeReference,
    /// A local variable declaration statement
    DeclarationStatement,
    /// One declared variable of a declaration statement
    LocalVariable,
    /// `for (T x : xs)` loop
    ForeachStatement,
    /// Any other statement
    Statement,
    ParameterList,
    Parameter,
    ModifierList,
    Method,
    Lambda,
    Literal,
    Other,
}

impl NodeKind {
    /// Check if this kind is a statement of any sort.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::DeclarationStatement | Self::ForeachStatement | Self::Statement
        )
    }
}

/// Modifier keywords the engine asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Final,
    Abstract,
}

/// Read-only view of a parsed file.
///
/// Node handles are cheap to clone and compare; the engine uses them as map
/// keys when grouping candidates by their enclosing statement or parameter
/// list.
pub trait SourceUnit {
    type Node: Clone + Eq + Hash + Debug;

    /// The root node of the file.
    fn root(&self) -> Self::Node;

    fn kind(&self, node: &Self::Node) -> NodeKind;

    /// The node's range, excluding surrounding trivia.
    fn range(&self, node: &Self::Node) -> TextRange;

    /// The node's rendered source text.
    fn text(&self, node: &Self::Node) -> String;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// All nodes of `kind`, in document order.
    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Self::Node> {
        let mut result = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if self.kind(&node) == kind {
                result.push(node.clone());
            }
            let mut children = self.children(&node);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// The first direct child of `kind`.
    fn child_of_kind(&self, node: &Self::Node, kind: NodeKind) -> Option<Self::Node> {
        self.children(node)
            .into_iter()
            .find(|child| self.kind(child) == kind)
    }

    /// Strict ancestors of `node`, nearest first.
    fn ancestors(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_ {
        std::iter::successors(self.parent(&node), move |n| self.parent(n))
    }

    /// Canonical fully qualified name of a code reference, resolved the way
    /// the compiler would see it. `None` when it cannot be resolved.
    fn qualified_name(&self, reference: &Self::Node) -> Option<String>;

    /// Variables declared by a declaration statement, in order.
    fn declared_variables(&self, declaration: &Self::Node) -> Vec<Self::Node>;

    /// Initializer expression of a variable.
    fn initializer(&self, variable: &Self::Node) -> Option<Self::Node>;

    /// The loop variable of a for-each statement.
    fn iteration_parameter(&self, foreach: &Self::Node) -> Option<Self::Node>;

    /// Range of the identifier naming a variable or parameter.
    fn name_identifier(&self, variable: &Self::Node) -> Option<TextRange>;

    /// Modifier list of a variable, parameter or method.
    fn modifier_list(&self, owner: &Self::Node) -> Option<Self::Node>;

    fn has_modifier(&self, owner: &Self::Node, modifier: Modifier) -> bool;

    /// Modifier keywords of a modifier list with their ranges.
    fn modifier_tokens(&self, modifier_list: &Self::Node) -> Vec<(Modifier, TextRange)>;

    /// Parameters of a parameter list, in order.
    fn parameters(&self, list: &Self::Node) -> Vec<Self::Node>;

    /// Check if `expr` is exactly the `null` literal.
    fn is_null_literal(&self, expr: &Self::Node) -> bool {
        self.kind(expr) == NodeKind::Literal && self.text(expr) == "null"
    }
}
