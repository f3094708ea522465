//! Composite method view used by call and method hierarchies.

use smol_str::SmolStr;

use crate::syntax::ast::{AstNode, ClassLike, Member, MethodDecl, Param};
use crate::syntax::{SyntaxKind, SyntaxNode};

/// A method declaration together with the declaration list it belongs to.
///
/// Built on demand by the hierarchy queries; it holds cursors into the tree
/// and has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodView {
    method: MethodDecl,
}

impl MethodView {
    pub fn new(method: MethodDecl) -> Self {
        Self { method }
    }

    pub fn method(&self) -> &MethodDecl {
        &self.method
    }

    pub fn syntax(&self) -> &SyntaxNode {
        self.method.syntax()
    }

    pub fn name(&self) -> Option<SmolStr> {
        self.method.name().map(|name| name.text())
    }

    pub fn params(&self) -> Vec<Param> {
        self.method.params()
    }

    pub fn is_static(&self) -> bool {
        self.method.is_static()
    }

    /// The class body or anonymous structure that lists this method.
    pub fn declaration_list(&self) -> Option<SyntaxNode> {
        self.syntax()
            .parent()
            .filter(|parent| matches!(parent.kind(), SyntaxKind::ClassBody | SyntaxKind::AnonymousType))
    }

    /// All declarations in the method's declaration list, in source order,
    /// the method itself included.
    pub fn declarations(&self) -> Vec<Member> {
        self.declaration_list()
            .map(|list| list.children().filter_map(Member::cast).collect())
            .unwrap_or_default()
    }

    /// The class-like declaration owning the declaration list.
    pub fn containing_class(&self) -> Option<ClassLike> {
        let list = self.declaration_list()?;
        match list.kind() {
            SyntaxKind::AnonymousType => ClassLike::cast(list),
            _ => list.parent().and_then(ClassLike::cast),
        }
    }

    /// Other methods with the same name in the same declaration list.
    pub fn overloads(&self) -> Vec<MethodDecl> {
        let Some(name) = self.name() else {
            return Vec::new();
        };
        self.declarations()
            .into_iter()
            .filter_map(|member| match member {
                Member::Method(method) if method != self.method => Some(method),
                _ => None,
            })
            .filter(|method| method.name().is_some_and(|n| n.text() == name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    fn method_named(source: &str, name: &str) -> MethodView {
        parse(source)
            .syntax_node()
            .descendants()
            .filter_map(MethodDecl::cast)
            .find(|m| m.name().is_some_and(|n| n.text() == name))
            .map(MethodView::new)
            .unwrap()
    }

    #[test]
    fn test_view_of_class_method() {
        let view = method_named(
            "class Foo { var x:Int; static function bar(a, b) {} function baz() {} }",
            "bar",
        );

        assert_eq!(view.name().as_deref(), Some("bar"));
        assert!(view.is_static());
        assert_eq!(view.params().len(), 2);
        assert_eq!(view.declarations().len(), 3);

        let class = view.containing_class().unwrap();
        assert_eq!(class.name().unwrap().text(), "Foo");
        assert!(view.overloads().is_empty());
    }

    #[test]
    fn test_view_of_anonymous_structure_method() {
        let view = method_named("class Foo { var cb:{ function run():Void; }; }", "run");

        let class = view.containing_class().unwrap();
        assert!(class.is_anonymous());
        assert_eq!(view.declaration_list().unwrap().kind(), SyntaxKind::AnonymousType);
    }

    #[test]
    fn test_overloads_share_name() {
        let view = method_named("class Foo { function f() {} function g() {} function f(x) {} }", "f");
        let overloads = view.overloads();
        assert_eq!(overloads.len(), 1);
        assert_eq!(overloads[0].params().len(), 1);
    }
}
