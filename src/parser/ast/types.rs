use super::*;

// ============================================================================
// Type elements
// ============================================================================

ast_node!(TypeElement, TYPE);

impl TypeElement {
    first_child_method!(code_reference, CodeReference);

    /// The primitive keyword token (`int`, `void`, ...), if this is a
    /// primitive type.
    pub fn primitive(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_primitive_type())
    }

    /// Check if this is an array type (`int[]`, `String[][]`).
    pub fn is_array(&self) -> bool {
        has_token(&self.0, SyntaxKind::L_BRACKET)
    }
}

// ============================================================================
// Code references
// ============================================================================

ast_node!(CodeReference, CODE_REFERENCE);

impl CodeReference {
    first_child_method!(qualifier, CodeReference);
    first_child_method!(type_arguments, TypeArguments);

    /// The identifier this reference ends with.
    pub fn name(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::IDENT)
    }

    /// The innermost, leftmost reference of a qualified chain.
    ///
    /// For `java.util.List` this is the reference covering just `java`.
    pub fn leftmost(&self) -> CodeReference {
        let mut current = self.clone();
        while let Some(qualifier) = current.qualifier() {
            current = qualifier;
        }
        current
    }

    /// The identifiers of the chain from left to right, type arguments
    /// excluded.
    pub fn segments(&self) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Some(self.clone());
        while let Some(reference) = current {
            if let Some(name) = reference.name() {
                segments.push(name.text().to_string());
            }
            current = reference.qualifier();
        }
        segments.reverse();
        segments
    }
}

ast_node!(TypeArguments, TYPE_ARGUMENTS);

impl TypeArguments {
    children_method!(types, TypeElement);
}

// ============================================================================
// Object creation
// ============================================================================

ast_node!(NewExpr, NEW_EXPR);

impl NewExpr {
    first_child_method!(code_reference, CodeReference);

    /// Check if this creates an array (`new int[3]`, `new String[] {..}`).
    pub fn is_array(&self) -> bool {
        has_token(&self.0, SyntaxKind::L_BRACKET)
    }
}

ast_node!(Literal, LITERAL);

impl Literal {
    has_token_method!(is_null, NULL_KW, "null");
}

ast_node!(LambdaExpr, LAMBDA_EXPR);

impl LambdaExpr {
    first_child_method!(parameter_list, ParameterList);
}
