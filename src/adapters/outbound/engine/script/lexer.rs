use crate::shared::Result;
use logos::Logos;

/// A piece of a string literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrPart {
    Literal(String),
    /// `$name`, `$a.b` or `${a.b}` inside a double-quoted string
    Interpolation(String),
}

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f\x{FEFF}]+")]
pub enum TokenKind {
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"'([^'\\\n]|\\(.|\n))*'", quoted)]
    #[regex(r#""([^"\\\n]|\\(.|\n))*""#, quoted)]
    #[token("'''", triple_quoted)]
    #[token("\"\"\"", triple_quoted)]
    Str(Vec<StrPart>),

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?", |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9][0-9A-Za-z_]*", |lex| lex.slice().to_string())]
    Number(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Assign,
    #[token(".")]
    #[token("?.")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("\n")]
    Newline,

    /// Any operator the evaluator does not interpret
    #[regex(r"[+\-*%<>!&|^~?=.@#]+", |lex| lex.slice().to_string(), priority = 1)]
    #[token("/", |lex| lex.slice().to_string())]
    Op(String),

    /// Dropped by [`tokenize`]
    #[regex(r"//[^\n]*")]
    #[token("/*", block_comment)]
    Comment,

    /// A backslash-newline joining two physical lines; dropped by [`tokenize`]
    #[regex(r"\\\r?\n")]
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Splits build-script source into tokens
///
/// Comments are dropped, line continuations are joined and bracket balance is
/// checked, so the parser only ever sees well-nested input.
///
/// # Errors
/// Returns an error for unterminated strings or comments and for unbalanced
/// brackets, naming the offending line
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let body = match source.strip_prefix("#!") {
        Some(rest) => &rest[rest.find('\n').unwrap_or(rest.len())..],
        None => source,
    };

    let mut lexer = TokenKind::lexer(body);
    let mut tokens = Vec::new();
    let mut brackets: Vec<(char, usize)> = Vec::new();
    let mut line = 1;
    let mut counted = 0;

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        line += body[counted..span.start].matches('\n').count();
        counted = span.start;

        let kind = kind.map_err(|()| unexpected(&body[span.start..], line))?;
        match kind {
            TokenKind::Comment | TokenKind::Continuation => continue,
            TokenKind::LBrace => brackets.push(('{', line)),
            TokenKind::LParen => brackets.push(('(', line)),
            TokenKind::LBracket => brackets.push(('[', line)),
            TokenKind::RBrace => close_bracket(&mut brackets, '{', '}', line)?,
            TokenKind::RParen => close_bracket(&mut brackets, '(', ')', line)?,
            TokenKind::RBracket => close_bracket(&mut brackets, '[', ']', line)?,
            _ => {}
        }
        tokens.push(Token { kind, line });
    }

    if let Some((open, line)) = brackets.last() {
        anyhow::bail!("line {}: unclosed '{}'", line, open);
    }

    Ok(tokens)
}

fn close_bracket(
    brackets: &mut Vec<(char, usize)>,
    expected: char,
    close: char,
    line: usize,
) -> Result<()> {
    match brackets.pop() {
        Some((open, _)) if open == expected => Ok(()),
        Some((open, opened)) => anyhow::bail!(
            "line {}: unexpected '{}', '{}' opened at line {} is still open",
            line,
            close,
            open,
            opened
        ),
        None => anyhow::bail!("line {}: unexpected '{}'", line, close),
    }
}

fn unexpected(rest: &str, line: usize) -> anyhow::Error {
    if rest.starts_with("/*") {
        anyhow::anyhow!("line {}: unterminated block comment", line)
    } else if rest.starts_with(['\'', '"']) {
        anyhow::anyhow!("line {}: unterminated string literal", line)
    } else {
        let found = rest.chars().next().unwrap_or_default();
        anyhow::anyhow!("line {}: unexpected character '{}'", line, found)
    }
}

fn block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

fn quoted(lex: &mut logos::Lexer<'_, TokenKind>) -> Vec<StrPart> {
    let slice = lex.slice();
    string_parts(&slice[1..slice.len() - 1], slice.starts_with('"'))
}

fn triple_quoted(lex: &mut logos::Lexer<'_, TokenKind>) -> Option<Vec<StrPart>> {
    let delimiter = lex.slice();
    let remainder = lex.remainder();
    let end = remainder.find(delimiter)?;
    lex.bump(end + delimiter.len());
    Some(string_parts(&remainder[..end], delimiter.starts_with('"')))
}

/// Pieces of a string body between its quotes
#[derive(Logos, Debug, PartialEq)]
enum Fragment {
    #[regex(r"[^\\$]+")]
    Text,
    #[regex(r"\\u[0-9a-fA-F]{4}")]
    Unicode,
    #[regex(r"\\(.|\n)")]
    Escape,
    #[regex(r"\$\{[^}]*\}")]
    Braced,
    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*", property_path)]
    Property,
    #[token("$")]
    Dollar,
}

/// Extends `$a` over trailing `.b.c` segments
fn property_path(lex: &mut logos::Lexer<'_, Fragment>) {
    let mut rest = lex.remainder();
    while let Some(tail) = rest.strip_prefix('.') {
        if !tail.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            break;
        }
        let len = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        lex.bump(len + 1);
        rest = &tail[len..];
    }
}

fn string_parts(body: &str, interpolated: bool) -> Vec<StrPart> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut fragments = Fragment::lexer(body);

    while let Some(fragment) = fragments.next() {
        let slice = fragments.slice();
        let expression = match fragment {
            Ok(Fragment::Escape) => {
                match slice[1..].chars().next() {
                    Some('n') => literal.push('\n'),
                    Some('t') => literal.push('\t'),
                    Some('r') => literal.push('\r'),
                    Some('\n') | None => {}
                    Some(other) => literal.push(other),
                }
                continue;
            }
            Ok(Fragment::Unicode) => {
                match u32::from_str_radix(&slice[2..], 16).ok().and_then(char::from_u32) {
                    Some(c) => literal.push(c),
                    None => literal.push_str(slice),
                }
                continue;
            }
            Ok(Fragment::Braced) if interpolated => slice[2..slice.len() - 1].trim(),
            Ok(Fragment::Property) if interpolated => &slice[1..],
            _ => {
                literal.push_str(slice);
                continue;
            }
        };

        if !literal.is_empty() {
            parts.push(StrPart::Literal(std::mem::take(&mut literal)));
        }
        parts.push(StrPart::Interpolation(expression.to_string()));
    }

    if !literal.is_empty() || parts.is_empty() {
        parts.push(StrPart::Literal(literal));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Ident(s.to_string())
    }

    fn literal(s: &str) -> TokenKind {
        TokenKind::Str(vec![StrPart::Literal(s.to_string())])
    }

    #[test]
    fn test_command_expression() {
        assert_eq!(
            kinds("runtime 'com.acme:widget:1.2.0'"),
            vec![ident("runtime"), literal("com.acme:widget:1.2.0")]
        );
    }

    #[test]
    fn test_named_arguments_and_assignment() {
        assert_eq!(
            kinds("apply plugin: 'java'\nurl = uri(\"x\")"),
            vec![
                ident("apply"),
                ident("plugin"),
                TokenKind::Colon,
                literal("java"),
                TokenKind::Newline,
                ident("url"),
                TokenKind::Assign,
                ident("uri"),
                TokenKind::LParen,
                literal("x"),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(
            kinds("// header\nmavenCentral() /* inline\n comment */ jcenter()"),
            vec![
                TokenKind::Newline,
                ident("mavenCentral"),
                TokenKind::LParen,
                TokenKind::RParen,
                ident("jcenter"),
                TokenKind::LParen,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_doc_comment_is_dropped() {
        assert_eq!(kinds("/** docs */ x / y"), vec![ident("x"), TokenKind::Op("/".to_string()), ident("y")]);
    }

    #[test]
    fn test_block_comment_advances_line_numbers() {
        let tokens = tokenize("/* one\ntwo\n*/ x").unwrap();
        assert_eq!(tokens[0].kind, ident("x"));
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_shebang_and_line_continuation() {
        let tokens = tokenize("#!/usr/bin/env groovy\nruntime \\\n 'a:b:1'").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Newline, ident("runtime"), literal("a:b:1")]
        );
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn test_interpolation_parts() {
        assert_eq!(
            kinds("\"com.acme:widget:$widgetVersion\""),
            vec![TokenKind::Str(vec![
                StrPart::Literal("com.acme:widget:".to_string()),
                StrPart::Interpolation("widgetVersion".to_string()),
            ])]
        );
        assert_eq!(
            kinds("\"${project.version}-x\""),
            vec![TokenKind::Str(vec![
                StrPart::Interpolation("project.version".to_string()),
                StrPart::Literal("-x".to_string()),
            ])]
        );
    }

    #[test]
    fn test_dotted_interpolation_stops_before_trailing_dot() {
        assert_eq!(
            kinds("\"$versions.widget.\""),
            vec![TokenKind::Str(vec![
                StrPart::Interpolation("versions.widget".to_string()),
                StrPart::Literal(".".to_string()),
            ])]
        );
    }

    #[test]
    fn test_single_quotes_do_not_interpolate() {
        assert_eq!(kinds("'$version'"), vec![literal("$version")]);
    }

    #[test]
    fn test_escapes_and_plain_dollar() {
        assert_eq!(kinds(r#""a\"b\$c $ d""#), vec![literal("a\"b$c $ d")]);
        assert_eq!(kinds(r"'\u0041\n'"), vec![literal("A\n")]);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(kinds("''"), vec![literal("")]);
    }

    #[test]
    fn test_triple_quoted_string_spans_lines() {
        let tokens = tokenize("'''a\nb''' x").unwrap();
        assert_eq!(tokens[0].kind, literal("a\nb"));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("a\n\nb").unwrap();
        assert_eq!(tokens.last().unwrap().line, 3);
    }

    #[test]
    fn test_operators_are_opaque() {
        assert_eq!(
            kinds("a == b << c"),
            vec![
                ident("a"),
                TokenKind::Op("==".to_string()),
                ident("b"),
                TokenKind::Op("<<".to_string()),
                ident("c"),
            ]
        );
    }

    #[test]
    fn test_safe_navigation_is_a_dot() {
        assert_eq!(
            kinds("a?.b"),
            vec![ident("a"), TokenKind::Dot, ident("b")]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("x = 1.8"),
            vec![ident("x"), TokenKind::Assign, TokenKind::Number("1.8".to_string())]
        );
    }

    #[test]
    fn test_unterminated_string_fails() {
        let err = tokenize("dependencies {\n runtime 'a:b:1\n}").unwrap_err();
        assert!(err.to_string().contains("line 2: unterminated string literal"));

        let err = tokenize("x = '''open").unwrap_err();
        assert!(err.to_string().contains("line 1: unterminated string literal"));
    }

    #[test]
    fn test_unterminated_block_comment_fails() {
        assert!(tokenize("/* open").unwrap_err().to_string().contains("block comment"));
    }

    #[test]
    fn test_unbalanced_brackets_fail() {
        let err = tokenize("repositories {\n mavenCentral()\n").unwrap_err();
        assert!(err.to_string().contains("unclosed '{'"));

        let err = tokenize("a(]").unwrap_err();
        assert!(err.to_string().contains("unexpected ']'"));

        assert!(tokenize("}").is_err());
    }
}
