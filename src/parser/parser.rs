//! Recursive descent parser for Java
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia is attached to the innermost node that is open when the next
//! significant token is consumed, and nodes are opened only after leading
//! trivia has been consumed. Every node therefore starts and ends on a
//! significant token, which keeps node ranges tight.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Java source code into a CST
pub fn parse_java(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Binding power of a binary operator, `None` if `kind` is not one.
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT
        | SyntaxKind::GT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT_EQ
        | SyntaxKind::INSTANCEOF_KW => 7,
        SyntaxKind::LT_LT => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    };
    Some(prec)
}

/// Tokens allowed between the angle brackets of a type argument list.
fn is_type_argument_token(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::DOT
            | SyntaxKind::COMMA
            | SyntaxKind::QUESTION
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::L_BRACKET
            | SyntaxKind::R_BRACKET
            | SyntaxKind::AMP
    ) || kind.is_primitive_type()
}

/// Tokens that can start the operand of a cast.
fn starts_cast_operand(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::L_PAREN
            | SyntaxKind::THIS_KW
            | SyntaxKind::SUPER_KW
            | SyntaxKind::NEW_KW
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
    ) || kind.is_literal()
}

const STATEMENT_RECOVERY: &[SyntaxKind] = &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE];

const EXPRESSION_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACE,
    SyntaxKind::R_BRACKET,
    SyntaxKind::COMMA,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Kind of the `n`-th significant token ahead, skipping trivia.
    /// Returns `ERROR` past the end of input.
    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn peek(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek())
    }

    fn at_eof(&self) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .all(|t| t.kind.is_trivia())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn skip_trivia(&mut self) {
        while let Some(token) = self.current() {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Consume the next significant token together with the trivia before it.
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.kind.is_trivia())
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Report an error and wrap tokens up to a recovery point in an ERROR node.
    /// Consumes at least one token unless already at a recovery token.
    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        if self.at_eof() || self.at_any(recovery) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Lookahead scanning (no tokens consumed)
    // =========================================================================

    /// Scan a type starting at significant token `n`; returns the index just
    /// past it, or `None` if no type starts there.
    fn scan_type(&self, mut n: usize) -> Option<usize> {
        let kind = self.nth(n);
        if kind.is_primitive_type() {
            n += 1;
        } else if kind == SyntaxKind::IDENT {
            n += 1;
            loop {
                if self.nth(n) == SyntaxKind::LT {
                    n = self.scan_type_arguments(n)?;
                }
                if self.nth(n) == SyntaxKind::DOT && self.nth(n + 1) == SyntaxKind::IDENT {
                    n += 2;
                } else {
                    break;
                }
            }
        } else {
            return None;
        }
        while self.nth(n) == SyntaxKind::L_BRACKET && self.nth(n + 1) == SyntaxKind::R_BRACKET {
            n += 2;
        }
        Some(n)
    }

    /// Scan a balanced `<...>` starting at token `n`.
    fn scan_type_arguments(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(n + 1);
                    }
                }
                kind if is_type_argument_token(kind) => {}
                _ => return None,
            }
            n += 1;
        }
    }

    /// `Type name` followed by something only a declarator can be followed by.
    fn at_local_variable_decl(&self) -> bool {
        let kind = self.peek();
        if kind == SyntaxKind::FINAL_KW || kind == SyntaxKind::AT {
            return true;
        }
        let Some(n) = self.scan_type(0) else {
            return false;
        };
        self.nth(n) == SyntaxKind::IDENT
            && matches!(
                self.nth(n + 1),
                SyntaxKind::EQ
                    | SyntaxKind::SEMICOLON
                    | SyntaxKind::COMMA
                    | SyntaxKind::COLON
                    | SyntaxKind::L_BRACKET
            )
    }

    /// Modifiers followed by `class`, `interface`, `enum` or `@interface`.
    fn at_type_declaration(&self) -> bool {
        let mut n = 0;
        while self.nth(n).is_modifier() {
            n += 1;
        }
        matches!(
            self.nth(n),
            SyntaxKind::CLASS_KW | SyntaxKind::INTERFACE_KW | SyntaxKind::ENUM_KW
        ) || (self.nth(n) == SyntaxKind::AT && self.nth(n + 1) == SyntaxKind::INTERFACE_KW)
    }

    /// Index just past the `)` matching the `(` at token `n`.
    fn scan_parens(&self, mut n: usize) -> Option<usize> {
        let mut depth = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(n + 1);
                    }
                }
                SyntaxKind::SEMICOLON | SyntaxKind::L_BRACE | SyntaxKind::R_BRACE => return None,
                SyntaxKind::ERROR if n > 0 && self.at_eof_from(n) => return None,
                _ => {}
            }
            n += 1;
        }
    }

    fn at_eof_from(&self, n: usize) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .is_none()
    }

    fn at_lambda(&self) -> bool {
        match self.peek() {
            SyntaxKind::IDENT => self.nth(1) == SyntaxKind::ARROW,
            SyntaxKind::L_PAREN => self
                .scan_parens(0)
                .is_some_and(|n| self.nth(n) == SyntaxKind::ARROW),
            _ => false,
        }
    }

    fn at_cast(&self) -> bool {
        if !self.at(SyntaxKind::L_PAREN) {
            return false;
        }
        let primitive = self.nth(1).is_primitive_type();
        let Some(n) = self.scan_type(1) else {
            return false;
        };
        if self.nth(n) != SyntaxKind::R_PAREN {
            return false;
        }
        primitive || starts_cast_operand(self.nth(n + 1))
    }

    /// `for (... : ...)` as opposed to a classic `for (;;)`.
    fn at_foreach_header(&self) -> bool {
        let mut n = 2; // past `for` and `(`
        let mut depth = 0usize;
        loop {
            match self.nth(n) {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                SyntaxKind::COLON if depth == 0 => return true,
                SyntaxKind::SEMICOLON | SyntaxKind::L_BRACE => return false,
                _ if self.at_eof_from(n) => return false,
                _ => {}
            }
            n += 1;
        }
    }

    // =========================================================================
    // Grammar rules - declarations
    // =========================================================================

    /// SourceFile = PackageDecl? ImportDecl* TypeDecl*
    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());

        while !self.at_eof() {
            let pos_before = self.pos;
            match self.peek() {
                SyntaxKind::PACKAGE_KW => self.parse_package_decl(),
                SyntaxKind::IMPORT_KW => self.parse_import_decl(),
                SyntaxKind::SEMICOLON => self.bump(),
                _ if self.at_type_declaration() || self.at(SyntaxKind::AT) => {
                    let checkpoint = self.checkpoint();
                    self.parse_modifier_list();
                    self.parse_type_declaration_rest(checkpoint);
                }
                kind => self.error_recover(
                    format!("unexpected token at top level: {:?}", kind),
                    &[
                        SyntaxKind::CLASS_KW,
                        SyntaxKind::INTERFACE_KW,
                        SyntaxKind::ENUM_KW,
                        SyntaxKind::IMPORT_KW,
                    ],
                ),
            }
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.peek()));
                self.bump();
            }
        }

        self.skip_trivia();
        self.finish_node();
    }

    /// PackageDecl = 'package' QualifiedName ';'
    fn parse_package_decl(&mut self) {
        self.start_node(SyntaxKind::PACKAGE_DECL);
        self.bump();
        self.parse_code_reference(false);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ImportDecl = 'import' 'static'? QualifiedName ('.' '*')? ';'
    fn parse_import_decl(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump();
        self.eat(SyntaxKind::STATIC_KW);
        self.parse_code_reference(false);
        if self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::STAR {
            self.bump();
            self.bump();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// ModifierList = (Modifier | Annotation)*
    ///
    /// Always produces a node, empty when there are no modifiers, so that
    /// every declaration has a modifier list anchored at its start.
    fn parse_modifier_list(&mut self) {
        self.start_node(SyntaxKind::MODIFIER_LIST);
        loop {
            if self.peek().is_modifier() {
                self.bump();
            } else if self.at(SyntaxKind::AT) && self.nth(1) != SyntaxKind::INTERFACE_KW {
                self.parse_annotation();
            } else {
                break;
            }
        }
        self.finish_node();
    }

    /// Annotation = '@' QualifiedName ('(' ... ')')?
    fn parse_annotation(&mut self) {
        self.start_node(SyntaxKind::ANNOTATION);
        self.bump();
        self.parse_code_reference(false);
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        }
        self.finish_node();
    }

    /// Everything after the modifier list of a class, interface, enum or
    /// annotation type.
    fn parse_type_declaration_rest(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::CLASS_DECL);
        self.eat(SyntaxKind::AT);
        let is_enum = self.at(SyntaxKind::ENUM_KW);
        if self.at_any(&[SyntaxKind::CLASS_KW, SyntaxKind::INTERFACE_KW, SyntaxKind::ENUM_KW]) {
            self.bump();
        } else {
            self.error("expected class, interface or enum");
        }
        self.expect(SyntaxKind::IDENT);
        if self.at(SyntaxKind::LT) {
            self.parse_type_parameters();
        }
        while self.at_any(&[SyntaxKind::EXTENDS_KW, SyntaxKind::IMPLEMENTS_KW]) {
            self.start_node(SyntaxKind::EXTENDS_LIST);
            self.bump();
            self.parse_type();
            while self.eat(SyntaxKind::COMMA) {
                self.parse_type();
            }
            self.finish_node();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_class_body(is_enum);
        } else {
            self.error("expected class body");
        }
        self.finish_node();
    }

    /// TypeParameters = '<' ... '>' (kept opaque)
    fn parse_type_parameters(&mut self) {
        self.start_node(SyntaxKind::TYPE_PARAMETERS);
        let mut depth = 0usize;
        while !self.at_eof() {
            match self.peek() {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
        self.finish_node();
    }

    /// ClassBody = '{' EnumConstants? Member* '}'
    fn parse_class_body(&mut self, is_enum: bool) {
        self.start_node(SyntaxKind::CLASS_BODY);
        self.expect(SyntaxKind::L_BRACE);

        if is_enum {
            while self.at(SyntaxKind::IDENT) || self.at(SyntaxKind::AT) {
                self.start_node(SyntaxKind::ENUM_CONSTANT);
                self.parse_modifier_list();
                self.expect(SyntaxKind::IDENT);
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
                if self.at(SyntaxKind::L_BRACE) {
                    self.parse_class_body(false);
                }
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.eat(SyntaxKind::SEMICOLON);
        }

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_member();
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.peek()));
                self.bump();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Member = ';' | Initializer | TypeDecl | Method | Constructor | Field
    fn parse_member(&mut self) {
        if self.eat(SyntaxKind::SEMICOLON) {
            return;
        }
        let checkpoint = self.checkpoint();
        self.parse_modifier_list();

        if self.at_type_declaration() {
            self.parse_type_declaration_rest(checkpoint);
            return;
        }

        if self.at(SyntaxKind::L_BRACE) {
            // Instance or static initializer
            self.parse_block();
            return;
        }

        if self.at(SyntaxKind::LT) {
            self.start_node_at(checkpoint, SyntaxKind::METHOD);
            self.parse_type_parameters();
            if !(self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN) {
                self.parse_type();
            }
            self.expect(SyntaxKind::IDENT);
            self.parse_method_rest();
            self.finish_node();
            return;
        }

        // Constructor
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::METHOD);
            self.bump();
            self.parse_method_rest();
            self.finish_node();
            return;
        }

        if self.scan_type(0).is_none() {
            self.error_recover(
                format!("expected member declaration, found {:?}", self.peek()),
                &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE],
            );
            self.eat(SyntaxKind::SEMICOLON);
            return;
        }

        self.parse_type();
        if self.at(SyntaxKind::IDENT) && self.nth(1) == SyntaxKind::L_PAREN {
            self.start_node_at(checkpoint, SyntaxKind::METHOD);
            self.bump();
            self.parse_method_rest();
            self.finish_node();
        } else {
            self.start_node_at(checkpoint, SyntaxKind::FIELD_DECL);
            loop {
                self.expect(SyntaxKind::IDENT);
                self.parse_dims();
                if self.eat(SyntaxKind::EQ) {
                    self.parse_variable_initializer();
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.expect(SyntaxKind::SEMICOLON);
            self.finish_node();
        }
    }

    /// Everything after a method's name: parameters, throws and body.
    fn parse_method_rest(&mut self) {
        self.parse_parameter_list();
        self.parse_dims();
        if self.at(SyntaxKind::THROWS_KW) {
            self.start_node(SyntaxKind::THROWS_LIST);
            self.bump();
            self.parse_code_reference(true);
            while self.eat(SyntaxKind::COMMA) {
                self.parse_code_reference(true);
            }
            self.finish_node();
        }
        if self.eat(SyntaxKind::DEFAULT_KW) {
            self.parse_expr();
        }
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.expect(SyntaxKind::SEMICOLON);
        }
    }

    /// ParameterList = '(' (Parameter (',' Parameter)*)? ')'
    fn parse_parameter_list(&mut self) {
        self.start_node(SyntaxKind::PARAMETER_LIST);
        self.expect(SyntaxKind::L_PAREN);
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.parse_parameter();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Parameter = ModifierList Type '...'? Name Dims
    fn parse_parameter(&mut self) {
        self.start_node(SyntaxKind::PARAMETER);
        self.parse_modifier_list();
        self.parse_type();
        self.eat(SyntaxKind::ELLIPSIS);
        self.expect(SyntaxKind::IDENT);
        self.parse_dims();
        self.finish_node();
    }

    fn parse_dims(&mut self) {
        while self.at(SyntaxKind::L_BRACKET) && self.nth(1) == SyntaxKind::R_BRACKET {
            self.bump();
            self.bump();
        }
    }

    // =========================================================================
    // Grammar rules - types
    // =========================================================================

    /// Type = (PrimitiveType | CodeReference | Wildcard) ('[' ']')*
    fn parse_type(&mut self) {
        self.start_node(SyntaxKind::TYPE);
        let kind = self.peek();
        if kind.is_primitive_type() {
            self.bump();
        } else if kind == SyntaxKind::IDENT {
            self.parse_code_reference(true);
        } else if kind == SyntaxKind::QUESTION {
            self.bump();
            if self.eat(SyntaxKind::EXTENDS_KW) || self.eat(SyntaxKind::SUPER_KW) {
                self.parse_type();
            }
        } else {
            self.error(format!("expected type, found {:?}", kind));
        }
        self.parse_dims();
        self.finish_node();
    }

    /// CodeReference = Ident TypeArguments? ('.' Ident TypeArguments?)*
    ///
    /// Qualified references nest to the left: `a.b.C` is
    /// `CODE_REFERENCE(CODE_REFERENCE(CODE_REFERENCE(a) . b) . C)`.
    fn parse_code_reference(&mut self, type_arguments: bool) {
        let checkpoint = self.checkpoint();
        self.start_node(SyntaxKind::CODE_REFERENCE);
        self.expect(SyntaxKind::IDENT);
        if type_arguments && self.at(SyntaxKind::LT) {
            self.parse_type_arguments();
        }
        self.finish_node();

        while self.at(SyntaxKind::DOT) && self.nth(1) == SyntaxKind::IDENT {
            self.start_node_at(checkpoint, SyntaxKind::CODE_REFERENCE);
            self.bump();
            self.bump();
            if type_arguments && self.at(SyntaxKind::LT) {
                self.parse_type_arguments();
            }
            self.finish_node();
        }
    }

    /// TypeArguments = '<' (Type (',' Type)*)? '>'
    fn parse_type_arguments(&mut self) {
        self.start_node(SyntaxKind::TYPE_ARGUMENTS);
        self.bump();
        if !self.at(SyntaxKind::GT) {
            loop {
                self.parse_type();
                while self.eat(SyntaxKind::AMP) {
                    self.parse_type();
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - statements
    // =========================================================================

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_statement();
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.peek()));
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.peek() {
            SyntaxKind::L_BRACE => {
                self.start_node(SyntaxKind::BLOCK_STMT);
                self.parse_block();
                self.finish_node();
            }
            SyntaxKind::SEMICOLON => {
                self.start_node(SyntaxKind::EMPTY_STMT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IF_KW => self.parse_if_statement(),
            SyntaxKind::WHILE_KW => {
                self.start_node(SyntaxKind::WHILE_STMT);
                self.bump();
                self.parse_condition();
                self.parse_statement();
                self.finish_node();
            }
            SyntaxKind::DO_KW => {
                self.start_node(SyntaxKind::DO_WHILE_STMT);
                self.bump();
                self.parse_statement();
                self.expect(SyntaxKind::WHILE_KW);
                self.parse_condition();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::FOR_KW => self.parse_for_statement(),
            SyntaxKind::TRY_KW => self.parse_try_statement(),
            SyntaxKind::SWITCH_KW => self.parse_switch_statement(),
            SyntaxKind::RETURN_KW => {
                self.start_node(SyntaxKind::RETURN_STMT);
                self.bump();
                if !self.at(SyntaxKind::SEMICOLON) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            SyntaxKind::THROW_KW => {
                self.start_node(SyntaxKind::THROW_STMT);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            kind @ (SyntaxKind::BREAK_KW | SyntaxKind::CONTINUE_KW) => {
                let node = if kind == SyntaxKind::BREAK_KW {
                    SyntaxKind::BREAK_STMT
                } else {
                    SyntaxKind::CONTINUE_STMT
                };
                self.start_node(node);
                self.bump();
                self.eat(SyntaxKind::IDENT);
                self.expect(SyntaxKind::SEMICOLON);
                self.finish_node();
            }
            _ if self.at_type_declaration() => {
                let checkpoint = self.checkpoint();
                self.parse_modifier_list();
                self.parse_type_declaration_rest(checkpoint);
            }
            _ if self.at_local_variable_decl() => self.parse_local_variable_decl(),
            _ => {
                self.start_node(SyntaxKind::EXPR_STMT);
                self.parse_expr();
                if !self.eat(SyntaxKind::SEMICOLON) {
                    self.error_recover("expected ';'", STATEMENT_RECOVERY);
                    self.eat(SyntaxKind::SEMICOLON);
                }
                self.finish_node();
            }
        }
    }

    /// '(' Expr ')'
    fn parse_condition(&mut self) {
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expr();
        self.expect(SyntaxKind::R_PAREN);
    }

    fn parse_if_statement(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump();
        self.parse_condition();
        self.parse_statement();
        if self.eat(SyntaxKind::ELSE_KW) {
            self.parse_statement();
        }
        self.finish_node();
    }

    /// LocalVariableDecl = LocalVariable (',' LocalVariable)* ';'
    fn parse_local_variable_decl(&mut self) {
        self.start_node(SyntaxKind::LOCAL_VARIABLE_DECL);
        self.parse_local_variable(true);
        while self.eat(SyntaxKind::COMMA) {
            self.parse_local_variable(false);
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// LocalVariable = (ModifierList Type)? Name Dims ('=' Initializer)?
    ///
    /// Only the first declarator of a declaration carries the modifiers and
    /// the type.
    fn parse_local_variable(&mut self, first: bool) {
        self.start_node(SyntaxKind::LOCAL_VARIABLE);
        if first {
            self.parse_modifier_list();
            self.parse_type();
        }
        self.expect(SyntaxKind::IDENT);
        self.parse_dims();
        if self.eat(SyntaxKind::EQ) {
            self.parse_variable_initializer();
        }
        self.finish_node();
    }

    fn parse_variable_initializer(&mut self) {
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_array_init();
        } else {
            self.parse_expr();
        }
    }

    fn parse_for_statement(&mut self) {
        if self.at_foreach_header() {
            self.start_node(SyntaxKind::FOREACH_STMT);
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            self.parse_parameter();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.expect(SyntaxKind::R_PAREN);
            self.parse_statement();
            self.finish_node();
            return;
        }

        self.start_node(SyntaxKind::FOR_STMT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        if self.at_local_variable_decl() {
            self.parse_local_variable_decl();
        } else {
            if !self.at(SyntaxKind::SEMICOLON) {
                self.parse_expr_list();
            }
            self.expect(SyntaxKind::SEMICOLON);
        }
        if !self.at(SyntaxKind::SEMICOLON) {
            self.parse_expr();
        }
        self.expect(SyntaxKind::SEMICOLON);
        if !self.at(SyntaxKind::R_PAREN) {
            self.parse_expr_list();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.parse_statement();
        self.finish_node();
    }

    fn parse_try_statement(&mut self) {
        self.start_node(SyntaxKind::TRY_STMT);
        self.bump();
        if self.at(SyntaxKind::L_PAREN) {
            // Resources are kept as plain tokens
            let mut depth = 0usize;
            while !self.at_eof() {
                match self.peek() {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => depth = depth.saturating_sub(1),
                    _ => {}
                }
                self.bump();
                if depth == 0 {
                    break;
                }
            }
        }
        self.parse_block();
        while self.at(SyntaxKind::CATCH_KW) {
            self.start_node(SyntaxKind::CATCH_CLAUSE);
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            self.start_node(SyntaxKind::PARAMETER);
            self.parse_modifier_list();
            self.parse_type();
            while self.eat(SyntaxKind::PIPE) {
                self.parse_type();
            }
            self.expect(SyntaxKind::IDENT);
            self.finish_node();
            self.expect(SyntaxKind::R_PAREN);
            self.parse_block();
            self.finish_node();
        }
        if self.eat(SyntaxKind::FINALLY_KW) {
            self.parse_block();
        }
        self.finish_node();
    }

    /// Switch with either `case X:` or `case X ->` labels.
    fn parse_switch_statement(&mut self) {
        self.start_node(SyntaxKind::SWITCH_STMT);
        self.bump();
        self.parse_condition();
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            if self.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
                self.bump();
                while !self.at_eof() && !self.at_any(&[SyntaxKind::COLON, SyntaxKind::ARROW]) {
                    let label_pos = self.pos;
                    self.parse_conditional();
                    self.eat(SyntaxKind::COMMA);
                    if self.pos == label_pos {
                        break;
                    }
                }
                if !self.eat(SyntaxKind::COLON) {
                    self.expect(SyntaxKind::ARROW);
                }
            } else {
                self.parse_statement();
            }
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.peek()));
                self.bump();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    // =========================================================================
    // Grammar rules - expressions
    // =========================================================================

    fn parse_expr_list(&mut self) {
        self.parse_expr();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_expr();
        }
    }

    /// Expr = Lambda | Conditional (AssignOp Expr)?
    fn parse_expr(&mut self) {
        if self.at_lambda() {
            self.parse_lambda();
            return;
        }
        let checkpoint = self.checkpoint();
        self.parse_conditional();
        if self.at_any(&[SyntaxKind::EQ, SyntaxKind::ASSIGN_OP]) {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump();
            self.parse_expr();
            self.finish_node();
        }
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPR);
            self.bump();
            self.parse_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_expr();
            self.finish_node();
        }
    }

    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        loop {
            let op = self.peek();
            // `>>` and `>>>` arrive as consecutive `>` tokens
            let shift = op == SyntaxKind::GT && self.nth(1) == SyntaxKind::GT;
            let precedence = if shift {
                8
            } else {
                match binary_precedence(op) {
                    Some(p) => p,
                    None => break,
                }
            };
            if precedence < min_precedence {
                break;
            }
            if op == SyntaxKind::INSTANCEOF_KW {
                self.start_node_at(checkpoint, SyntaxKind::INSTANCEOF_EXPR);
                self.bump();
                self.eat(SyntaxKind::FINAL_KW);
                self.parse_type();
                self.eat(SyntaxKind::IDENT);
                self.finish_node();
                continue;
            }
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump();
            if shift {
                while self.at(SyntaxKind::GT) {
                    self.bump();
                }
            }
            self.parse_binary(precedence + 1);
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        match self.peek() {
            SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS => {
                self.start_node(SyntaxKind::PREFIX_EXPR);
                self.bump();
                self.parse_unary();
                self.finish_node();
            }
            _ if self.at_cast() => {
                self.start_node(SyntaxKind::CAST_EXPR);
                self.bump();
                self.parse_type();
                self.expect(SyntaxKind::R_PAREN);
                self.parse_unary();
                self.finish_node();
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_primary();
        loop {
            match self.peek() {
                SyntaxKind::DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::FIELD_ACCESS);
                    self.bump();
                    if self.at(SyntaxKind::LT) {
                        self.parse_type_arguments();
                    }
                    match self.peek() {
                        SyntaxKind::IDENT
                        | SyntaxKind::CLASS_KW
                        | SyntaxKind::THIS_KW
                        | SyntaxKind::SUPER_KW => self.bump(),
                        SyntaxKind::NEW_KW => self.parse_new_expr(),
                        _ => self.error("expected member name"),
                    }
                    self.finish_node();
                    if self.at(SyntaxKind::L_PAREN) {
                        self.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                        self.parse_arg_list();
                        self.finish_node();
                    }
                }
                SyntaxKind::L_BRACKET => {
                    self.start_node_at(checkpoint, SyntaxKind::ARRAY_ACCESS);
                    self.bump();
                    self.parse_expr();
                    self.expect(SyntaxKind::R_BRACKET);
                    self.finish_node();
                }
                SyntaxKind::COLON_COLON => {
                    self.start_node_at(checkpoint, SyntaxKind::METHOD_REF);
                    self.bump();
                    if !self.eat(SyntaxKind::IDENT) {
                        self.expect(SyntaxKind::NEW_KW);
                    }
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    self.start_node_at(checkpoint, SyntaxKind::POSTFIX_EXPR);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_primary(&mut self) {
        let kind = self.peek();
        match kind {
            _ if kind.is_literal() => {
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::IDENT | SyntaxKind::THIS_KW | SyntaxKind::SUPER_KW => {
                let checkpoint = self.checkpoint();
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.finish_node();
                if self.at(SyntaxKind::L_PAREN) {
                    self.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                    self.parse_arg_list();
                    self.finish_node();
                }
            }
            _ if kind.is_primitive_type() => {
                // `int.class`, `int[]::new`
                self.start_node(SyntaxKind::NAME_REF);
                self.bump();
                self.parse_dims();
                self.finish_node();
            }
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::NEW_KW => self.parse_new_expr(),
            SyntaxKind::L_BRACE => self.parse_array_init(),
            _ => self.error_recover(
                format!("expected expression, found {:?}", kind),
                EXPRESSION_RECOVERY,
            ),
        }
    }

    /// NewExpr = 'new' (PrimitiveType | CodeReference) (DimExprs ArrayInit? | Args ClassBody?)
    fn parse_new_expr(&mut self) {
        self.start_node(SyntaxKind::NEW_EXPR);
        self.bump();
        if self.peek().is_primitive_type() {
            self.bump();
        } else {
            self.parse_code_reference(true);
        }
        if self.at(SyntaxKind::L_BRACKET) {
            while self.eat(SyntaxKind::L_BRACKET) {
                if !self.at(SyntaxKind::R_BRACKET) {
                    self.parse_expr();
                }
                self.expect(SyntaxKind::R_BRACKET);
            }
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_array_init();
            }
        } else {
            self.parse_arg_list();
            if self.at(SyntaxKind::L_BRACE) {
                self.parse_class_body(false);
            }
        }
        self.finish_node();
    }

    /// ArgList = '(' (Expr (',' Expr)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.expect(SyntaxKind::L_PAREN);
        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            let pos_before = self.pos;
            self.parse_expr();
            if !self.eat(SyntaxKind::COMMA) && self.pos == pos_before {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// ArrayInit = '{' (Initializer (',' Initializer)* ','?)? '}'
    fn parse_array_init(&mut self) {
        self.start_node(SyntaxKind::ARRAY_INIT);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos;
            self.parse_variable_initializer();
            if !self.eat(SyntaxKind::COMMA) && self.pos == pos_before {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Lambda = (Ident | '(' LambdaParameters ')') '->' (Block | Expr)
    ///
    /// Lambda parameters get their own PARAMETER_LIST so that they look like
    /// any other parameter list to tree consumers.
    fn parse_lambda(&mut self) {
        self.start_node(SyntaxKind::LAMBDA_EXPR);
        self.start_node(SyntaxKind::PARAMETER_LIST);
        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::PARAMETER);
            self.start_node(SyntaxKind::MODIFIER_LIST);
            self.finish_node();
            self.bump();
            self.finish_node();
        } else {
            self.expect(SyntaxKind::L_PAREN);
            while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
                let pos_before = self.pos;
                if self.at(SyntaxKind::IDENT)
                    && matches!(self.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN)
                {
                    self.start_node(SyntaxKind::PARAMETER);
                    self.start_node(SyntaxKind::MODIFIER_LIST);
                    self.finish_node();
                    self.bump();
                    self.finish_node();
                } else {
                    self.parse_parameter();
                }
                if !self.eat(SyntaxKind::COMMA) && self.pos == pos_before {
                    break;
                }
            }
            self.expect(SyntaxKind::R_PAREN);
        }
        self.finish_node();
        self.expect(SyntaxKind::ARROW);
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxNode;

    fn find(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
        root.descendants().filter(|n| n.kind() == kind).collect()
    }

    fn class(body: &str) -> String {
        format!("class A {{\n{body}\n}}\n")
    }

    #[test]
    fn test_parse_is_lossless() {
        let source = class(
            "  void run(final int a, String b) {\n    for (Object o : list) { o.hashCode(); }\n  }",
        );
        let parse = parse_java(&source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_parse_imports_and_package() {
        let parse = parse_java("package a.b;\nimport java.util.List;\nimport static x.Y.*;\n");
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        assert_eq!(find(&root, SyntaxKind::PACKAGE_DECL).len(), 1);
        assert_eq!(find(&root, SyntaxKind::IMPORT_DECL).len(), 2);
    }

    #[test]
    fn test_parse_qualified_reference_nests_left() {
        let parse = parse_java(&class("java.util.List<String> items;"));
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        let ty = find(&root, SyntaxKind::TYPE).into_iter().next().unwrap();
        let outer = ty.first_child().unwrap();
        assert_eq!(outer.kind(), SyntaxKind::CODE_REFERENCE);
        assert_eq!(outer.text().to_string(), "java.util.List<String>");
        let middle = outer.first_child().unwrap();
        assert_eq!(middle.text().to_string(), "java.util");
        let inner = middle.first_child().unwrap();
        assert_eq!(inner.text().to_string(), "java");
        assert!(inner.first_child().is_none());
    }

    #[test]
    fn test_node_ranges_exclude_surrounding_trivia() {
        let source = class("  void f() {\n    String   s = \"x\" ;\n  }");
        let parse = parse_java(&source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        let var = find(&root, SyntaxKind::LOCAL_VARIABLE).pop().unwrap();
        assert_eq!(var.text().to_string(), "String   s = \"x\"");
    }

    #[test]
    fn test_parse_local_declarations_and_foreach() {
        let source = class(
            "  void f(java.util.List<String> xs) {\n    final String a = \"x\";\n    int i = 0, j;\n    for (String x : xs) {}\n    for (int k = 0; k < 3; k++) {}\n  }",
        );
        let parse = parse_java(&source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        assert_eq!(find(&root, SyntaxKind::LOCAL_VARIABLE_DECL).len(), 3);
        assert_eq!(find(&root, SyntaxKind::FOREACH_STMT).len(), 1);
        assert_eq!(find(&root, SyntaxKind::FOR_STMT).len(), 1);
    }

    #[test]
    fn test_parse_expression_statements() {
        let source = class(
            "  void f() {\n    list.stream()\n        .map(x -> x + 1)\n        .forEach(System.out::println);\n    x = (String) y;\n    new Foo<>(a, b);\n  }",
        );
        let parse = parse_java(&source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        assert_eq!(find(&root, SyntaxKind::EXPR_STMT).len(), 3);
        assert_eq!(find(&root, SyntaxKind::LAMBDA_EXPR).len(), 1);
        assert_eq!(find(&root, SyntaxKind::CAST_EXPR).len(), 1);
        assert_eq!(find(&root, SyntaxKind::NEW_EXPR).len(), 1);
    }

    #[test]
    fn test_parse_interface_and_enum() {
        let source = "interface I {\n  void f(int a);\n  default int g() { return 1; }\n}\nenum E { A, B(1) { }; int x; }\n";
        let parse = parse_java(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        let root = parse.syntax();
        assert_eq!(find(&root, SyntaxKind::CLASS_DECL).len(), 2);
        assert_eq!(find(&root, SyntaxKind::ENUM_CONSTANT).len(), 2);
        assert_eq!(find(&root, SyntaxKind::METHOD).len(), 2);
    }

    #[test]
    fn test_parse_recovers_from_garbage() {
        let source = class("  void f() {\n    int x = ;\n    ) )\n    int y = 2;\n  }");
        let parse = parse_java(&source);
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), source);
        let root = parse.syntax();
        assert!(!find(&root, SyntaxKind::LOCAL_VARIABLE_DECL).is_empty());
    }
}
