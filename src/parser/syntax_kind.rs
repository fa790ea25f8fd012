//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! for the Java subset the folding engine understands.

/// All syntax kinds (tokens and nodes) of the Java CST
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,         // identifier
    INT_NUMBER,    // 42, 0x2A, 42L
    FLOAT_NUMBER,  // 3.14, 1e9, 2f
    STRING,        // "hello"
    TEXT_BLOCK,    // """ ... """
    CHAR,          // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,       // {
    R_BRACE,       // }
    L_PAREN,       // (
    R_PAREN,       // )
    L_BRACKET,     // [
    R_BRACKET,     // ]
    SEMICOLON,     // ;
    COMMA,         // ,
    DOT,           // .
    ELLIPSIS,      // ...
    AT,            // @
    COLON,         // :
    COLON_COLON,   // ::
    QUESTION,      // ?
    ARROW,         // ->
    EQ,            // =
    EQ_EQ,         // ==
    BANG_EQ,       // !=
    LT,            // <
    GT,            // >
    LT_EQ,         // <=
    GT_EQ,         // >=
    PLUS,          // +
    MINUS,         // -
    STAR,          // *
    SLASH,         // /
    PERCENT,       // %
    AMP,           // &
    PIPE,          // |
    CARET,         // ^
    BANG,          // !
    TILDE,         // ~
    AMP_AMP,       // &&
    PIPE_PIPE,     // ||
    PLUS_PLUS,     // ++
    MINUS_MINUS,   // --
    LT_LT,         // <<
    ASSIGN_OP,     // += -= *= /= %= &= |= ^= <<= >>= >>>=

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    ABSTRACT_KW,
    BOOLEAN_KW,
    BREAK_KW,
    BYTE_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINAL_KW,
    FINALLY_KW,
    FLOAT_KW,
    FOR_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORT_KW,
    INSTANCEOF_KW,
    INT_KW,
    INTERFACE_KW,
    LONG_KW,
    NATIVE_KW,
    NEW_KW,
    NULL_KW,
    PACKAGE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RETURN_KW,
    SHORT_KW,
    STATIC_KW,
    STRICTFP_KW,
    SUPER_KW,
    SWITCH_KW,
    SYNCHRONIZED_KW,
    THIS_KW,
    THROW_KW,
    THROWS_KW,
    TRANSIENT_KW,
    TRUE_KW,
    TRY_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    // =========================================================================
    // NODES - declarations
    // =========================================================================
    SOURCE_FILE,
    PACKAGE_DECL,
    IMPORT_DECL,
    CLASS_DECL,
    CLASS_BODY,
    ENUM_CONSTANT,
    FIELD_DECL,
    METHOD,
    MODIFIER_LIST,
    ANNOTATION,
    TYPE_PARAMETERS,
    PARAMETER_LIST,
    PARAMETER,
    THROWS_LIST,
    EXTENDS_LIST,

    // =========================================================================
    // NODES - types
    // =========================================================================
    TYPE,
    CODE_REFERENCE,
    TYPE_ARGUMENTS,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    BLOCK,
    BLOCK_STMT,
    LOCAL_VARIABLE_DECL,
    LOCAL_VARIABLE,
    FOREACH_STMT,
    FOR_STMT,
    IF_STMT,
    WHILE_STMT,
    DO_WHILE_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    RETURN_STMT,
    THROW_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    SWITCH_STMT,
    EXPR_STMT,
    EMPTY_STMT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    LITERAL,
    NAME_REF,
    FIELD_ACCESS,
    CALL_EXPR,
    ARG_LIST,
    NEW_EXPR,
    ARRAY_INIT,
    ARRAY_ACCESS,
    METHOD_REF,
    LAMBDA_EXPR,
    PAREN_EXPR,
    CAST_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    BINARY_EXPR,
    ASSIGN_EXPR,
    CONDITIONAL_EXPR,
    INSTANCEOF_EXPR,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword token
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this keyword can appear in a modifier list
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::STATIC_KW
                | Self::FINAL_KW
                | Self::ABSTRACT_KW
                | Self::SYNCHRONIZED_KW
                | Self::NATIVE_KW
                | Self::TRANSIENT_KW
                | Self::VOLATILE_KW
                | Self::STRICTFP_KW
                | Self::DEFAULT_KW
        )
    }

    /// Check if this is a primitive type keyword (including `void`)
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::BOOLEAN_KW
                | Self::BYTE_KW
                | Self::CHAR_KW
                | Self::SHORT_KW
                | Self::INT_KW
                | Self::LONG_KW
                | Self::FLOAT_KW
                | Self::DOUBLE_KW
                | Self::VOID_KW
        )
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_NUMBER
                | Self::FLOAT_NUMBER
                | Self::STRING
                | Self::TEXT_BLOCK
                | Self::CHAR
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Check if this is a statement node
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::BLOCK_STMT
                | Self::LOCAL_VARIABLE_DECL
                | Self::FOREACH_STMT
                | Self::FOR_STMT
                | Self::IF_STMT
                | Self::WHILE_STMT
                | Self::DO_WHILE_STMT
                | Self::TRY_STMT
                | Self::RETURN_STMT
                | Self::THROW_STMT
                | Self::BREAK_STMT
                | Self::CONTINUE_STMT
                | Self::SWITCH_STMT
                | Self::EXPR_STMT
                | Self::EMPTY_STMT
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // SAFETY: SyntaxKind is repr(u16) and we checked bounds
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLanguage {}

impl rowan::Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip_through_rowan() {
        for kind in [SyntaxKind::WHITESPACE, SyntaxKind::FINAL_KW, SyntaxKind::ERROR] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(SyntaxKind::from(raw), kind);
        }
    }

    #[test]
    fn test_kind_classification() {
        assert!(SyntaxKind::FINAL_KW.is_keyword());
        assert!(SyntaxKind::FINAL_KW.is_modifier());
        assert!(!SyntaxKind::IDENT.is_keyword());
        assert!(SyntaxKind::VOID_KW.is_primitive_type());
        assert!(SyntaxKind::NULL_KW.is_literal());
        assert!(SyntaxKind::FOREACH_STMT.is_statement());
        assert!(!SyntaxKind::PARAMETER_LIST.is_statement());
    }
}
