//! Recursive-descent outline parser producing a rowan green tree.
//!
//! The grammar covers class structure and enough of expressions to place
//! references: class/interface declarations (nested classes allowed),
//! fields, methods with parameters and bodies, anonymous structure types,
//! calls, `new`, field access and binary operators. Parsing never fails:
//! unexpected tokens are wrapped in `ErrorNode`s and reported as
//! [`ParseError`]s next to the tree. Nesting deeper than [`MAX_DEPTH`]
//! levels is swallowed into a single `ErrorNode` rather than recursed into.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::ast::{AstNode, SourceFile};
use super::lexer::{Token, lex};
use super::{SyntaxKind, SyntaxNode};

/// A recoverable syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}..{}", u32::from(.range.start()), u32::from(.range.end()))]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Result of parsing one document.
///
/// The green tree is immutable and thread-safe; [`Parse::syntax_node`]
/// builds a fresh cursor root over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax_node(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> SourceFile {
        SourceFile::cast(self.syntax_node()).expect("parser always produces a SourceFile root")
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_parts(self) -> (GreenNode, Vec<ParseError>) {
        (self.green, self.errors)
    }
}

/// Nesting limit for classes, blocks, anonymous types and expressions.
pub const MAX_DEPTH: usize = 256;

/// Parse a document.
pub fn parse(text: &str) -> Parse {
    Parser::new(text).parse()
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    offset: TextSize,
    depth: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: lex(text),
            pos: 0,
            offset: TextSize::from(0),
            depth: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> Parse {
        self.builder.start_node(SyntaxKind::SourceFile.into());
        while !self.at(SyntaxKind::Eof) {
            if self.at_class_start() {
                self.class_decl();
            } else {
                self.bump_error("expected a class or interface declaration");
            }
        }
        self.eat_trivia();
        self.builder.finish_node();

        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn at_class_start(&self) -> bool {
        let mut n = 0;
        while self.nth(n).is_modifier() {
            n += 1;
        }
        matches!(self.nth(n), SyntaxKind::ClassKw | SyntaxKind::InterfaceKw)
    }

    fn class_decl(&mut self) {
        if !self.enter() {
            return;
        }
        let cp = self.checkpoint();
        self.modifiers();
        self.builder.start_node_at(cp, SyntaxKind::ClassDecl.into());
        self.bump(); // `class` or `interface`
        self.name("expected a class name");

        if self.at(SyntaxKind::ExtendsKw) {
            self.start_node(SyntaxKind::ExtendsClause);
            self.bump();
            self.type_reference();
            self.finish_node();
        }
        if self.at(SyntaxKind::ImplementsKw) {
            self.start_node(SyntaxKind::ImplementsClause);
            self.bump();
            self.type_reference();
            while self.eat(SyntaxKind::Comma) {
                self.type_reference();
            }
            self.finish_node();
        }

        if self.at(SyntaxKind::LBrace) {
            self.start_node(SyntaxKind::ClassBody);
            self.bump();
            self.members();
            self.expect(SyntaxKind::RBrace, "expected `}`");
            self.finish_node();
        } else {
            self.error("expected a class body");
        }
        self.finish_node();
        self.leave();
    }

    /// Members up to (not including) the closing brace.
    fn members(&mut self) {
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            let mut n = 0;
            while self.nth(n).is_modifier() {
                n += 1;
            }
            match self.nth(n) {
                SyntaxKind::FunctionKw => self.method_decl(),
                SyntaxKind::VarKw => self.var_decl(),
                SyntaxKind::ClassKw | SyntaxKind::InterfaceKw => self.class_decl(),
                _ => self.bump_error("expected a member declaration"),
            }
        }
    }

    fn modifiers(&mut self) {
        while self.current().is_modifier() {
            self.bump();
        }
    }

    fn method_decl(&mut self) {
        let cp = self.checkpoint();
        self.modifiers();
        self.builder.start_node_at(cp, SyntaxKind::MethodDecl.into());
        self.bump(); // `function`
        self.name("expected a method name");
        self.param_list();
        if self.at(SyntaxKind::Colon) {
            self.type_tag();
        }
        if self.at(SyntaxKind::LBrace) {
            self.block();
        } else {
            self.expect(SyntaxKind::Semicolon, "expected a method body or `;`");
        }
        self.finish_node();
    }

    fn var_decl(&mut self) {
        let cp = self.checkpoint();
        self.modifiers();
        self.builder.start_node_at(cp, SyntaxKind::VarDecl.into());
        self.bump(); // `var`
        self.name("expected a variable name");
        if self.at(SyntaxKind::Colon) {
            self.type_tag();
        }
        if self.eat(SyntaxKind::Eq) {
            self.expr();
        }
        self.expect(SyntaxKind::Semicolon, "expected `;`");
        self.finish_node();
    }

    fn param_list(&mut self) {
        if !self.at(SyntaxKind::LParen) {
            self.error("expected a parameter list");
            return;
        }
        self.start_node(SyntaxKind::ParamList);
        self.bump();
        while self.at(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::Param);
            self.name("expected a parameter name");
            if self.at(SyntaxKind::Colon) {
                self.type_tag();
            }
            if self.eat(SyntaxKind::Eq) {
                self.expr();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)`");
        self.finish_node();
    }

    fn type_tag(&mut self) {
        self.start_node(SyntaxKind::TypeTag);
        self.bump(); // `:`
        if self.at(SyntaxKind::LBrace) {
            if self.enter() {
                self.start_node(SyntaxKind::AnonymousType);
                self.bump();
                self.members();
                self.expect(SyntaxKind::RBrace, "expected `}`");
                self.finish_node();
                self.leave();
            }
        } else {
            self.type_reference();
        }
        self.finish_node();
    }

    fn type_reference(&mut self) {
        if self.at(SyntaxKind::Ident) {
            self.reference();
        } else {
            self.error("expected a type name");
        }
    }

    fn name(&mut self, message: &str) {
        if self.at(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::Name);
            self.bump();
            self.finish_node();
        } else {
            self.error(message);
        }
    }

    fn reference(&mut self) {
        self.start_node(SyntaxKind::Reference);
        self.bump();
        self.finish_node();
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn block(&mut self) {
        if !self.enter() {
            return;
        }
        self.start_node(SyntaxKind::Block);
        self.bump(); // `{`
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            let before = self.pos;
            self.stmt();
            if self.pos == before {
                self.bump_error("unexpected token");
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}`");
        self.finish_node();
        self.leave();
    }

    fn stmt(&mut self) {
        match self.current() {
            SyntaxKind::VarKw => self.var_decl(),
            SyntaxKind::LBrace => self.block(),
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::ReturnKw => {
                self.start_node(SyntaxKind::ReturnStmt);
                self.bump();
                if !self.at(SyntaxKind::Semicolon) {
                    self.expr();
                }
                self.expect(SyntaxKind::Semicolon, "expected `;`");
                self.finish_node();
            }
            SyntaxKind::FunctionKw | SyntaxKind::ClassKw => {
                self.bump_error("declarations are not allowed in a method body");
            }
            _ => {
                self.start_node(SyntaxKind::ExprStmt);
                self.expr();
                self.expect(SyntaxKind::Semicolon, "expected `;`");
                self.finish_node();
            }
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn expr(&mut self) {
        if !self.enter() {
            return;
        }
        let cp = self.checkpoint();
        self.postfix_expr();
        while matches!(self.current(), SyntaxKind::Op | SyntaxKind::Eq) {
            self.builder.start_node_at(cp, SyntaxKind::BinExpr.into());
            self.bump();
            self.postfix_expr();
            self.finish_node();
        }
        self.leave();
    }

    fn postfix_expr(&mut self) {
        let cp = self.checkpoint();
        if !self.primary_expr() {
            return;
        }
        loop {
            match self.current() {
                SyntaxKind::Dot => {
                    self.builder.start_node_at(cp, SyntaxKind::FieldExpr.into());
                    self.bump();
                    if self.at(SyntaxKind::Ident) {
                        self.reference();
                    } else {
                        self.error("expected a field name");
                    }
                    self.finish_node();
                }
                SyntaxKind::LParen => {
                    self.builder.start_node_at(cp, SyntaxKind::CallExpr.into());
                    self.arg_list();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    /// Returns `false` when no expression could be started.
    fn primary_expr(&mut self) -> bool {
        // prefix operators
        while self.at(SyntaxKind::Op) {
            self.bump();
        }
        match self.current() {
            SyntaxKind::Ident => self.reference(),
            SyntaxKind::Number | SyntaxKind::String => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::NewKw => {
                self.start_node(SyntaxKind::NewExpr);
                self.bump();
                self.type_reference();
                if self.at(SyntaxKind::LParen) {
                    self.arg_list();
                }
                self.finish_node();
            }
            SyntaxKind::LParen => {
                self.start_node(SyntaxKind::ParenExpr);
                self.bump();
                self.expr();
                self.expect(SyntaxKind::RParen, "expected `)`");
                self.finish_node();
            }
            SyntaxKind::Semicolon | SyntaxKind::RBrace | SyntaxKind::RParen | SyntaxKind::Eof => {
                self.error("expected an expression");
                return false;
            }
            _ => {
                self.bump_error("expected an expression");
                return false;
            }
        }
        true
    }

    fn arg_list(&mut self) {
        self.start_node(SyntaxKind::ArgList);
        self.bump(); // `(`
        if !self.at(SyntaxKind::RParen) {
            self.expr();
            while self.eat(SyntaxKind::Comma) {
                self.expr();
            }
        }
        self.expect(SyntaxKind::RParen, "expected `)`");
        self.finish_node();
    }

    // ------------------------------------------------------------------------
    // Nesting
    // ------------------------------------------------------------------------

    /// Step one level deeper, or swallow the construct if that is too deep.
    fn enter(&mut self) -> bool {
        if self.depth >= MAX_DEPTH {
            self.skip_too_deep();
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Wrap the construct at the cursor in one `ErrorNode`: everything up to
    /// the end of its first bracketed group, or up to a `;`, `,` or closing
    /// bracket that belongs to an enclosing level.
    fn skip_too_deep(&mut self) {
        self.error("nesting too deep");
        self.start_node(SyntaxKind::ErrorNode);
        let mut open = 0usize;
        loop {
            match self.current() {
                SyntaxKind::Eof => break,
                SyntaxKind::LParen | SyntaxKind::LBrace => open += 1,
                SyntaxKind::RParen | SyntaxKind::RBrace => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                    if open == 0 {
                        self.bump();
                        break;
                    }
                }
                SyntaxKind::Semicolon | SyntaxKind::Comma if open == 0 => break,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    // ------------------------------------------------------------------------
    // Token plumbing
    // ------------------------------------------------------------------------

    /// Index of the `n`-th non-trivia token at or after `pos`.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| self.pos + i)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map_or(SyntaxKind::Eof, |i| self.tokens[i].kind)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) {
        if !self.eat(kind) {
            self.error(message);
        }
    }

    fn eat_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.push_token();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        if self.pos < self.tokens.len() {
            self.push_token();
        }
    }

    fn push_token(&mut self) {
        let token = self.tokens[self.pos];
        self.builder.token(token.kind.into(), token.text);
        self.offset += TextSize::of(token.text);
        self.pos += 1;
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    /// Range of the next non-trivia token, or an empty range at end of input.
    fn current_range(&self) -> TextRange {
        let Some(index) = self.nth_index(0) else {
            let end = self.offset
                + self.tokens[self.pos..]
                    .iter()
                    .map(|t| TextSize::of(t.text))
                    .sum::<TextSize>();
            return TextRange::empty(end);
        };
        let start = self.offset
            + self.tokens[self.pos..index]
                .iter()
                .map(|t| TextSize::of(t.text))
                .sum::<TextSize>();
        TextRange::at(start, TextSize::of(self.tokens[index].text))
    }

    fn error(&mut self, message: &str) {
        let range = self.current_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    /// Report an error and consume the offending token into an `ErrorNode`.
    fn bump_error(&mut self, message: &str) {
        self.error(message);
        self.start_node(SyntaxKind::ErrorNode);
        self.bump();
        self.finish_node();
    }
}
