//! [`SourceUnit`] over the bundled Java CST.

use rustc_hash::FxHashMap;

use super::{Modifier, NodeKind, SourceUnit};
use crate::base::TextRange;
use crate::parser::{
    AstNode, CodeReference, ForeachStatement, LocalVariableDecl, Method, ModifierList, Parse,
    Parameter, ParameterList, SourceFile, SyntaxKind, SyntaxNode, Variable, parse_java,
};

/// A parsed Java file together with its single-type imports.
#[derive(Debug, Clone)]
pub struct JavaSource {
    root: SyntaxNode,
    /// Simple name → fully qualified name, from `import a.b.C;`
    imports: FxHashMap<String, String>,
}

impl JavaSource {
    /// Parse `text` with the bundled parser.
    ///
    /// Syntax errors are tolerated: folding works on whatever tree the
    /// parser recovered.
    pub fn parse(text: &str) -> Self {
        Self::new(&parse_java(text))
    }

    pub fn new(parse: &Parse) -> Self {
        Self::from_root(parse.syntax())
    }

    pub fn from_root(root: SyntaxNode) -> Self {
        let imports = SourceFile::cast(root.clone())
            .map(|file| {
                file.imports()
                    .filter_map(|import| Some((import.imported_name()?, import.qualified_name()?)))
                    .collect()
            })
            .unwrap_or_default();
        Self { root, imports }
    }

    /// The fully qualified name a simple name was imported as.
    pub fn resolve_import(&self, simple_name: &str) -> Option<&str> {
        self.imports.get(simple_name).map(String::as_str)
    }
}

fn modifier_of(kind: SyntaxKind) -> Option<Modifier> {
    match kind {
        SyntaxKind::FINAL_KW => Some(Modifier::Final),
        SyntaxKind::ABSTRACT_KW => Some(Modifier::Abstract),
        _ => None,
    }
}

impl SourceUnit for JavaSource {
    type Node = SyntaxNode;

    fn root(&self) -> SyntaxNode {
        self.root.clone()
    }

    fn kind(&self, node: &SyntaxNode) -> NodeKind {
        match node.kind() {
            SyntaxKind::TYPE => NodeKind::TypeElement,
            SyntaxKind::NEW_EXPR => NodeKind::NewExpression,
            SyntaxKind::CODE_REFERENCE => NodeKind::CodeReference,
            SyntaxKind::LOCAL_VARIABLE_DECL => NodeKind::DeclarationStatement,
            SyntaxKind::LOCAL_VARIABLE => NodeKind::LocalVariable,
            SyntaxKind::FOREACH_STMT => NodeKind::ForeachStatement,
            SyntaxKind::PARAMETER_LIST => NodeKind::ParameterList,
            SyntaxKind::PARAMETER => NodeKind::Parameter,
            SyntaxKind::MODIFIER_LIST => NodeKind::ModifierList,
            SyntaxKind::METHOD => NodeKind::Method,
            SyntaxKind::LAMBDA_EXPR => NodeKind::Lambda,
            SyntaxKind::LITERAL => NodeKind::Literal,
            kind if kind.is_statement() => NodeKind::Statement,
            _ => NodeKind::Other,
        }
    }

    fn range(&self, node: &SyntaxNode) -> TextRange {
        node.text_range()
    }

    fn text(&self, node: &SyntaxNode) -> String {
        node.text().to_string()
    }

    fn parent(&self, node: &SyntaxNode) -> Option<SyntaxNode> {
        node.parent()
    }

    fn children(&self, node: &SyntaxNode) -> Vec<SyntaxNode> {
        node.children().collect()
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<SyntaxNode> {
        self.root
            .descendants()
            .filter(|node| self.kind(node) == kind)
            .collect()
    }

    /// Resolution rules, without a classpath:
    /// - a chain whose first segment is a single-type import expands through
    ///   that import (`Entry` with `import java.util.Map.Entry;`)
    /// - a chain starting with a lowercase segment is taken as already fully
    ///   qualified (`java.util.List`)
    /// - anything else (`Outer.Inner`, unimported `Foo`) is unresolved
    fn qualified_name(&self, reference: &SyntaxNode) -> Option<String> {
        let reference = CodeReference::cast(reference.clone())?;
        let segments = reference.segments();
        let (first, rest) = segments.split_first()?;

        if let Some(imported) = self.resolve_import(first) {
            let mut name = imported.to_string();
            for segment in rest {
                name.push('.');
                name.push_str(segment);
            }
            return Some(name);
        }

        if first.chars().next().is_some_and(char::is_lowercase) {
            return Some(segments.join("."));
        }
        None
    }

    fn declared_variables(&self, declaration: &SyntaxNode) -> Vec<SyntaxNode> {
        LocalVariableDecl::cast(declaration.clone())
            .map(|decl| decl.variables().map(|v| v.syntax().clone()).collect())
            .unwrap_or_default()
    }

    fn initializer(&self, variable: &SyntaxNode) -> Option<SyntaxNode> {
        Variable::cast(variable.clone())?.initializer()
    }

    fn iteration_parameter(&self, foreach: &SyntaxNode) -> Option<SyntaxNode> {
        ForeachStatement::cast(foreach.clone())?
            .parameter()
            .map(|p| p.syntax().clone())
    }

    fn name_identifier(&self, variable: &SyntaxNode) -> Option<TextRange> {
        let name = match variable.kind() {
            SyntaxKind::LOCAL_VARIABLE => Variable::cast(variable.clone())?.name(),
            SyntaxKind::PARAMETER => Parameter::cast(variable.clone())?.name(),
            _ => None,
        };
        name.map(|token| token.text_range())
    }

    fn modifier_list(&self, owner: &SyntaxNode) -> Option<SyntaxNode> {
        if let Some(list) = owner.children().find_map(ModifierList::cast) {
            return Some(list.syntax().clone());
        }
        // Later declarators share the modifiers written on the first one
        let variable = Variable::cast(owner.clone())?;
        let first = variable.declaration()?.variables().next()?;
        first.modifier_list().map(|list| list.syntax().clone())
    }

    fn has_modifier(&self, owner: &SyntaxNode, modifier: Modifier) -> bool {
        if modifier == Modifier::Abstract {
            if let Some(method) = Method::cast(owner.clone()) {
                return method.is_abstract();
            }
        }
        self.modifier_list(owner)
            .is_some_and(|list| self.modifier_tokens(&list).iter().any(|(m, _)| *m == modifier))
    }

    fn modifier_tokens(&self, modifier_list: &SyntaxNode) -> Vec<(Modifier, TextRange)> {
        modifier_list
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter_map(|t| Some((modifier_of(t.kind())?, t.text_range())))
            .collect()
    }

    fn parameters(&self, list: &SyntaxNode) -> Vec<SyntaxNode> {
        ParameterList::cast(list.clone())
            .map(|list| list.parameters().map(|p| p.syntax().clone()).collect())
            .unwrap_or_default()
    }
}
