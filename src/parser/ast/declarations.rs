use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    first_child_method!(package, PackageDecl);
    children_method!(imports, ImportDecl);
    children_method!(classes, ClassDecl);
}

ast_node!(PackageDecl, PACKAGE_DECL);

impl PackageDecl {
    first_child_method!(target, CodeReference);
}

// ============================================================================
// Imports
// ============================================================================

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    has_token_method!(is_static, STATIC_KW, "import static a.B.c;");
    has_token_method!(is_wildcard, STAR, "import a.b.*;");
    first_child_method!(target, CodeReference);

    /// The simple name this import brings into scope, if it imports a
    /// single type.
    pub fn imported_name(&self) -> Option<String> {
        if self.is_wildcard() || self.is_static() {
            return None;
        }
        self.target()?.name().map(|t| t.text().to_string())
    }

    /// The fully qualified name being imported, without any `.*` suffix.
    pub fn qualified_name(&self) -> Option<String> {
        self.target().map(|t| t.segments().join("."))
    }
}

// ============================================================================
// Types and members
// ============================================================================

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    has_token_method!(is_interface, INTERFACE_KW, "interface Runnable {}");
    has_token_method!(is_enum, ENUM_KW, "enum Color {}");
    first_child_method!(modifier_list, ModifierList);
    name_token_method!();
}

ast_node!(Method, METHOD);

impl Method {
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(parameter_list, ParameterList);
    first_child_method!(return_type, TypeElement);
    first_child_method!(body, Block);

    /// Get the method name token.
    pub fn name(&self) -> Option<SyntaxToken> {
        // The name is the identifier directly before the parameter list
        self.0
            .children_with_tokens()
            .take_while(|e| e.kind() != SyntaxKind::PARAMETER_LIST)
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .last()
    }

    /// Check whether the method has no implementation: either declared
    /// `abstract`, or a body-less method of an interface.
    pub fn is_abstract(&self) -> bool {
        if self
            .modifier_list()
            .is_some_and(|m| m.has(SyntaxKind::ABSTRACT_KW))
        {
            return true;
        }
        if self.body().is_some() {
            return false;
        }
        let is_static_or_default = self.modifier_list().is_some_and(|m| {
            m.has(SyntaxKind::STATIC_KW) || m.has(SyntaxKind::DEFAULT_KW)
        });
        !is_static_or_default && self.enclosing_class().is_some_and(|c| c.is_interface())
    }

    /// The class, interface or enum that declares this method.
    pub fn enclosing_class(&self) -> Option<ClassDecl> {
        self.0.ancestors().skip(1).find_map(ClassDecl::cast)
    }
}

// ============================================================================
// Modifiers
// ============================================================================

ast_node!(ModifierList, MODIFIER_LIST);

impl ModifierList {
    has_token_method!(is_final, FINAL_KW, "final int x = 1;");

    /// Check for a modifier keyword of the given kind.
    pub fn has(&self, keyword: SyntaxKind) -> bool {
        has_token(&self.0, keyword)
    }

    /// The token of a modifier keyword of the given kind.
    pub fn keyword(&self, keyword: SyntaxKind) -> Option<SyntaxToken> {
        find_token(&self.0, keyword)
    }

    children_method!(annotations, Annotation);
}

ast_node!(Annotation, ANNOTATION);

impl Annotation {
    first_child_method!(target, CodeReference);
}

// ============================================================================
// Parameters
// ============================================================================

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    children_method!(parameters, Parameter);

    /// Check if there are no parameters between the parentheses.
    pub fn is_empty(&self) -> bool {
        self.parameters().next().is_none()
    }
}

ast_node!(Parameter, PARAMETER);

impl Parameter {
    first_child_method!(modifier_list, ModifierList);
    first_child_method!(ty, TypeElement);
    has_token_method!(is_varargs, ELLIPSIS, "String... args");
    name_token_method!();
}
