//! Tokenizer built on logos.

use logos::Logos;

use super::SyntaxKind;

/// A lexed token borrowing its text from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[token("//", line_comment)]
    #[token("/*", block_comment)]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r#"'([^'\\]|\\.)*'"#)]
    String,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,

    #[regex(r"[+\-*/%<>!&|^~?]")]
    Op,
}

fn line_comment(lex: &mut logos::Lexer<RawToken>) {
    let rest = lex.remainder();
    lex.bump(rest.find('\n').unwrap_or(rest.len()));
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) {
    // An unterminated block comment runs to the end of input.
    let rest = lex.remainder();
    lex.bump(rest.find("*/").map_or(rest.len(), |end| end + 2));
}

impl From<RawToken> for SyntaxKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Whitespace => SyntaxKind::Whitespace,
            RawToken::Comment => SyntaxKind::Comment,
            RawToken::Ident => SyntaxKind::Ident,
            RawToken::Number => SyntaxKind::Number,
            RawToken::String => SyntaxKind::String,
            RawToken::LBrace => SyntaxKind::LBrace,
            RawToken::RBrace => SyntaxKind::RBrace,
            RawToken::LParen => SyntaxKind::LParen,
            RawToken::RParen => SyntaxKind::RParen,
            RawToken::Semicolon => SyntaxKind::Semicolon,
            RawToken::Colon => SyntaxKind::Colon,
            RawToken::Comma => SyntaxKind::Comma,
            RawToken::Dot => SyntaxKind::Dot,
            RawToken::Eq => SyntaxKind::Eq,
            RawToken::Op => SyntaxKind::Op,
        }
    }
}

/// Split `input` into tokens. Unknown characters become `SyntaxKind::Error`
/// tokens, so the concatenated token texts always reproduce the input.
pub(crate) fn lex(input: &str) -> Vec<Token<'_>> {
    let mut lexer = RawToken::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(RawToken::Ident) => SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Ident),
            Ok(raw) => raw.into(),
            Err(()) => SyntaxKind::Error,
        };
        tokens.push(Token { kind, text });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex(input)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("class Foo extends Bar"),
            vec![
                SyntaxKind::ClassKw,
                SyntaxKind::Ident,
                SyntaxKind::ExtendsKw,
                SyntaxKind::Ident,
            ]
        );
    }

    #[test]
    fn test_comments_are_single_tokens() {
        let tokens = lex("// line\n/* block */x");
        assert_eq!(tokens[0].kind, SyntaxKind::Comment);
        assert_eq!(tokens[0].text, "// line");
        assert_eq!(tokens[2].kind, SyntaxKind::Comment);
        assert_eq!(tokens[2].text, "/* block */");
        assert_eq!(tokens[3].kind, SyntaxKind::Ident);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = lex("/* open");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::Comment);
    }

    #[test]
    fn test_unknown_character_is_error_token() {
        let tokens = lex("a # b");
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::Error && t.text == "#"));
    }

    #[test]
    fn test_lexing_is_lossless() {
        let input = "class A { function f(x:Int):Void { trace(\"hi\" + 1.5); } }";
        let rebuilt: String = lex(input).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }
}
