//! Syntax kinds and the rowan language marker.

use bitflags::bitflags;

/// Every token and node kind the parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    Whitespace = 0,
    Comment,

    // Literals and identifiers
    Ident,
    Number,
    String,

    // Keywords
    ClassKw,
    InterfaceKw,
    ExtendsKw,
    ImplementsKw,
    FunctionKw,
    VarKw,
    NewKw,
    ReturnKw,
    StaticKw,
    PublicKw,
    PrivateKw,
    OverrideKw,
    InlineKw,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Eq,
    /// Any other operator character (`+`, `<`, `!`, ...).
    Op,
    /// A character the lexer does not understand.
    Error,

    // Nodes
    SourceFile,
    ClassDecl,
    ExtendsClause,
    ImplementsClause,
    ClassBody,
    AnonymousType,
    MethodDecl,
    VarDecl,
    ParamList,
    Param,
    TypeTag,
    Block,
    ExprStmt,
    ReturnStmt,
    Name,
    Reference,
    CallExpr,
    NewExpr,
    FieldExpr,
    ParenExpr,
    BinExpr,
    ArgList,
    Literal,
    ErrorNode,

    /// Parser sentinel for end of input; never stored in a tree.
    Eof,
    #[doc(hidden)]
    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::StaticKw
                | SyntaxKind::PublicKw
                | SyntaxKind::PrivateKw
                | SyntaxKind::OverrideKw
                | SyntaxKind::InlineKw
        )
    }

    /// Keyword kind for an identifier-shaped word, if it is reserved.
    pub fn from_keyword(word: &str) -> Option<SyntaxKind> {
        Some(match word {
            "class" => SyntaxKind::ClassKw,
            "interface" => SyntaxKind::InterfaceKw,
            "extends" => SyntaxKind::ExtendsKw,
            "implements" => SyntaxKind::ImplementsKw,
            "function" => SyntaxKind::FunctionKw,
            "var" => SyntaxKind::VarKw,
            "new" => SyntaxKind::NewKw,
            "return" => SyntaxKind::ReturnKw,
            "static" => SyntaxKind::StaticKw,
            "public" => SyntaxKind::PublicKw,
            "private" => SyntaxKind::PrivateKw,
            "override" => SyntaxKind::OverrideKw,
            "inline" => SyntaxKind::InlineKw,
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// Rowan language marker for the Haxe-like class language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HaxeLanguage {}

impl rowan::Language for HaxeLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants
            // below `__Last`.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::ErrorNode
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<HaxeLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<HaxeLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<HaxeLanguage>;

// ============================================================================
// NODE KINDS
// ============================================================================

/// Coarse classification of tree elements used by the hierarchy queries.
///
/// Many syntax kinds collapse onto `Other`; the queries only ever ask about
/// files, class-like declarations, methods and references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    ClassDecl,
    AnonymousClassDecl,
    MethodDecl,
    Reference,
    /// Any token.
    Leaf,
    Other,
}

impl NodeKind {
    pub fn of_kind(kind: SyntaxKind) -> NodeKind {
        match kind {
            SyntaxKind::SourceFile => NodeKind::File,
            SyntaxKind::ClassDecl => NodeKind::ClassDecl,
            SyntaxKind::AnonymousType => NodeKind::AnonymousClassDecl,
            SyntaxKind::MethodDecl => NodeKind::MethodDecl,
            SyntaxKind::Reference => NodeKind::Reference,
            _ => NodeKind::Other,
        }
    }

    pub fn of_node(node: &SyntaxNode) -> NodeKind {
        NodeKind::of_kind(node.kind())
    }

    pub fn of_element(element: &SyntaxElement) -> NodeKind {
        match element {
            rowan::NodeOrToken::Node(node) => NodeKind::of_node(node),
            rowan::NodeOrToken::Token(_) => NodeKind::Leaf,
        }
    }

    pub fn is_class_like(self) -> bool {
        matches!(self, NodeKind::ClassDecl | NodeKind::AnonymousClassDecl)
    }

    pub fn is_method_like(self) -> bool {
        self == NodeKind::MethodDecl
    }
}

bitflags! {
    /// A set of [`NodeKind`]s, used as predicate and boundary by the scope walker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KindSet: u8 {
        const FILE = 1 << 0;
        const CLASS_DECL = 1 << 1;
        const ANONYMOUS_CLASS_DECL = 1 << 2;
        const METHOD_DECL = 1 << 3;
        const REFERENCE = 1 << 4;
        const LEAF = 1 << 5;
        const OTHER = 1 << 6;

        const CLASS_LIKE = Self::CLASS_DECL.bits() | Self::ANONYMOUS_CLASS_DECL.bits();
    }
}

impl KindSet {
    pub fn contains_kind(self, kind: NodeKind) -> bool {
        self.contains(KindSet::from(kind))
    }
}

impl From<NodeKind> for KindSet {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::File => KindSet::FILE,
            NodeKind::ClassDecl => KindSet::CLASS_DECL,
            NodeKind::AnonymousClassDecl => KindSet::ANONYMOUS_CLASS_DECL,
            NodeKind::MethodDecl => KindSet::METHOD_DECL,
            NodeKind::Reference => KindSet::REFERENCE,
            NodeKind::Leaf => KindSet::LEAF,
            NodeKind::Other => KindSet::OTHER,
        }
    }
}
