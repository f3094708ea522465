//! Typed views over syntax nodes.
//!
//! Each wrapper is a zero-cost newtype around a [`SyntaxNode`] of one
//! [`SyntaxKind`]; casting checks the kind.

use smol_str::SmolStr;

use super::{SyntaxKind, SyntaxNode, SyntaxToken};

pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(syntax: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

mod support {
    use super::{AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

    pub(super) fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
        node.children().find_map(N::cast)
    }

    pub(super) fn children<N: AstNode>(node: &SyntaxNode) -> impl Iterator<Item = N> + use<N> {
        node.children().filter_map(N::cast)
    }

    pub(super) fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|tok| tok.kind() == kind)
    }
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            syntax: SyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                Self::can_cast(syntax.kind()).then_some(Self { syntax })
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.syntax
            }
        }
    };
}

ast_node!(
    /// The root of every tree.
    SourceFile => SourceFile
);
ast_node!(
    /// A named `class` or `interface`.
    ClassDecl => ClassDecl
);
ast_node!(ClassBody => ClassBody);
ast_node!(
    /// An anonymous structure type, `{ var x:Int; }`.
    AnonymousType => AnonymousType
);
ast_node!(MethodDecl => MethodDecl);
ast_node!(VarDecl => VarDecl);
ast_node!(ParamList => ParamList);
ast_node!(Param => Param);
ast_node!(TypeTag => TypeTag);
ast_node!(Block => Block);
ast_node!(
    /// The identifier a declaration introduces.
    Name => Name
);
ast_node!(
    /// A use of a name.
    Reference => Reference
);

impl SourceFile {
    /// Top-level named classes in source order.
    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> + use<> {
        support::children(self.syntax())
    }
}

impl ClassDecl {
    pub fn name(&self) -> Option<Name> {
        support::child(self.syntax())
    }

    pub fn is_interface(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::InterfaceKw).is_some()
    }

    pub fn extends(&self) -> Option<Reference> {
        self.syntax()
            .children()
            .find(|n| n.kind() == SyntaxKind::ExtendsClause)
            .and_then(|clause| support::child(&clause))
    }

    pub fn implements(&self) -> Vec<Reference> {
        self.syntax()
            .children()
            .find(|n| n.kind() == SyntaxKind::ImplementsClause)
            .map(|clause| support::children(&clause).collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<ClassBody> {
        support::child(self.syntax())
    }

    pub fn members(&self) -> Vec<Member> {
        self.body()
            .map(|body| support::children(body.syntax()).collect())
            .unwrap_or_default()
    }
}

impl AnonymousType {
    pub fn members(&self) -> impl Iterator<Item = Member> + use<> {
        support::children(self.syntax())
    }
}

impl MethodDecl {
    pub fn name(&self) -> Option<Name> {
        support::child(self.syntax())
    }

    pub fn params(&self) -> Vec<Param> {
        support::child::<ParamList>(self.syntax())
            .map(|list| support::children(list.syntax()).collect())
            .unwrap_or_default()
    }

    pub fn return_type(&self) -> Option<TypeTag> {
        support::child(self.syntax())
    }

    pub fn body(&self) -> Option<Block> {
        support::child(self.syntax())
    }

    pub fn is_static(&self) -> bool {
        support::token(self.syntax(), SyntaxKind::StaticKw).is_some()
    }
}

impl VarDecl {
    pub fn name(&self) -> Option<Name> {
        support::child(self.syntax())
    }

    pub fn type_tag(&self) -> Option<TypeTag> {
        support::child(self.syntax())
    }
}

impl Param {
    pub fn name(&self) -> Option<Name> {
        support::child(self.syntax())
    }

    pub fn type_tag(&self) -> Option<TypeTag> {
        support::child(self.syntax())
    }
}

impl TypeTag {
    pub fn reference(&self) -> Option<Reference> {
        support::child(self.syntax())
    }

    pub fn anonymous_type(&self) -> Option<AnonymousType> {
        support::child(self.syntax())
    }
}

impl Name {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Ident)
    }

    pub fn text(&self) -> SmolStr {
        self.ident_token()
            .map(|tok| SmolStr::new(tok.text()))
            .unwrap_or_default()
    }
}

impl Reference {
    /// The identifier being referenced. Missing only in hand-built trees.
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        support::token(self.syntax(), SyntaxKind::Ident)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident_token().map(|tok| SmolStr::new(tok.text()))
    }
}

// ============================================================================
// UNIONS
// ============================================================================

/// A class-like declaration: a named class or an anonymous structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassLike {
    Class(ClassDecl),
    Anonymous(AnonymousType),
}

impl AstNode for ClassLike {
    fn can_cast(kind: SyntaxKind) -> bool {
        ClassDecl::can_cast(kind) || AnonymousType::can_cast(kind)
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            SyntaxKind::ClassDecl => Some(ClassLike::Class(ClassDecl { syntax })),
            SyntaxKind::AnonymousType => Some(ClassLike::Anonymous(AnonymousType { syntax })),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            ClassLike::Class(it) => it.syntax(),
            ClassLike::Anonymous(it) => it.syntax(),
        }
    }
}

impl ClassLike {
    /// `None` for anonymous structures.
    pub fn name(&self) -> Option<Name> {
        match self {
            ClassLike::Class(it) => it.name(),
            ClassLike::Anonymous(_) => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, ClassLike::Anonymous(_))
    }

    pub fn members(&self) -> Vec<Member> {
        match self {
            ClassLike::Class(it) => it.members(),
            ClassLike::Anonymous(it) => it.members().collect(),
        }
    }
}

/// A declaration inside a class body or anonymous structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Method(MethodDecl),
    Var(VarDecl),
    Class(ClassDecl),
}

impl AstNode for Member {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::MethodDecl | SyntaxKind::VarDecl | SyntaxKind::ClassDecl
        )
    }

    fn cast(syntax: SyntaxNode) -> Option<Self> {
        match syntax.kind() {
            SyntaxKind::MethodDecl => Some(Member::Method(MethodDecl { syntax })),
            SyntaxKind::VarDecl => Some(Member::Var(VarDecl { syntax })),
            SyntaxKind::ClassDecl => Some(Member::Class(ClassDecl { syntax })),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Member::Method(it) => it.syntax(),
            Member::Var(it) => it.syntax(),
            Member::Class(it) => it.syntax(),
        }
    }
}

impl Member {
    pub fn name(&self) -> Option<Name> {
        match self {
            Member::Method(it) => it.name(),
            Member::Var(it) => it.name(),
            Member::Class(it) => it.name(),
        }
    }
}

/// The name node of any declaration kind that has one.
pub fn declaration_name(node: &SyntaxNode) -> Option<Name> {
    match node.kind() {
        SyntaxKind::ClassDecl
        | SyntaxKind::MethodDecl
        | SyntaxKind::VarDecl
        | SyntaxKind::Param => support::child(node),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn test_class_accessors() {
        let file = parse("interface Shape extends Base implements A, B { var x:Int; function f(); }")
            .tree();
        let class = file.classes().next().unwrap();

        assert_eq!(class.name().unwrap().text(), "Shape");
        assert!(class.is_interface());
        assert_eq!(class.extends().unwrap().text().unwrap(), "Base");
        let implements: Vec<_> = class
            .implements()
            .iter()
            .filter_map(Reference::text)
            .collect();
        assert_eq!(implements, vec!["A", "B"]);
        assert_eq!(class.members().len(), 2);
    }

    #[test]
    fn test_method_accessors() {
        let file = parse("class A { static function f(a:Int, b:{ var c:Int; }):Void {} }").tree();
        let Member::Method(method) = file.classes().next().unwrap().members().remove(0) else {
            panic!("expected a method");
        };

        assert_eq!(method.name().unwrap().text(), "f");
        assert!(method.is_static());
        let params = method.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name().unwrap().text(), "a");
        assert!(params[1].type_tag().unwrap().anonymous_type().is_some());
        assert_eq!(
            method.return_type().unwrap().reference().unwrap().text().unwrap(),
            "Void"
        );
        assert!(method.body().is_some());
    }

    #[test]
    fn test_class_like_cast() {
        let file = parse("class A { var p:{ var x:Int; }; }").tree();
        let root = file.syntax().clone();

        let named: Vec<_> = root.descendants().filter_map(ClassLike::cast).collect();
        assert_eq!(named.len(), 2);
        assert!(!named[0].is_anonymous());
        assert!(named[1].is_anonymous());
        assert!(named[1].name().is_none());
        assert_eq!(named[1].members().len(), 1);
    }

    #[test]
    fn test_declaration_name() {
        let file = parse("class A { function f(p) {} }").tree();
        let names: Vec<_> = file
            .syntax()
            .descendants()
            .filter_map(|n| declaration_name(&n))
            .map(|n| n.text())
            .collect();
        assert_eq!(names, vec!["A", "f", "p"]);
    }
}
