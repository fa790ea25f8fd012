use super::*;

ast_node!(Block, BLOCK);

impl Block {
    /// Get the statements of this block, in source order.
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| n.kind().is_statement())
    }
}

// ============================================================================
// Local variables
// ============================================================================

ast_node!(LocalVariableDecl, LOCAL_VARIABLE_DECL);

impl LocalVariableDecl {
    children_method!(variables, Variable);
}

// A single declarator of a local variable declaration. Only the first
// declarator of `int a = 1, b = 2;` carries the modifier list and the type.
ast_node!(Variable, LOCAL_VARIABLE);

impl Variable {
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(ty, TypeElement);
    name_token_method!();

    /// The expression after `=`, if any.
    pub fn initializer(&self) -> Option<SyntaxNode> {
        child_after_token(&self.0, SyntaxKind::EQ)
    }

    /// The declaration statement this variable belongs to.
    pub fn declaration(&self) -> Option<LocalVariableDecl> {
        self.0.parent().and_then(LocalVariableDecl::cast)
    }
}

// ============================================================================
// Loops
// ============================================================================

ast_node!(ForeachStatement, FOREACH_STMT);

impl ForeachStatement {
    first_child_method!(parameter, Parameter);

    /// The expression being iterated over.
    pub fn iterated(&self) -> Option<SyntaxNode> {
        child_after_token(&self.0, SyntaxKind::COLON)
    }
}
