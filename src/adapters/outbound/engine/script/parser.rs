use super::lexer::{StrPart, Token, TokenKind};
use crate::shared::Result;

/// A top-level or block statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `a.b args...`, `a.b(args) { ... }` or a bare `a.b`
    Call {
        target: Vec<String>,
        args: Vec<Arg>,
        closure: Option<Vec<Statement>>,
        line: usize,
    },
    /// `a.b = value`, `def a = value`
    Assign {
        target: Vec<String>,
        value: Expr,
        local: bool,
        line: usize,
    },
    /// Anything the evaluator does not model, with the closures found inside it
    Other {
        line: usize,
        closures: Vec<Vec<Statement>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Expr),
    Named(String, Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(Vec<StrPart>),
    Number(String),
    Bool(bool),
    Null,
    Path(Vec<String>),
    Call {
        target: Vec<String>,
        args: Vec<Arg>,
    },
    List(Vec<Expr>),
    Map(Vec<(String, Expr)>),
    Closure(Vec<Statement>),
    /// `a + b + ...`
    Concat(Vec<Expr>),
    /// An expression using operators the evaluator does not model
    Unsupported,
}

/// Keywords that introduce a typed local declaration, like `def`
const DECLARATION_KEYWORDS: &[&str] = &["def", "final", "String", "var", "int", "boolean"];

/// Parses a token stream into statements
///
/// The grammar covers the declarative subset of build scripts: method calls
/// with or without parentheses, named arguments, trailing closures, and
/// assignments. Statements outside that subset are kept as
/// [`Statement::Other`] together with any closures they carry, so the
/// evaluator can tell whether skipping them would lose declarations.
///
/// # Errors
/// Returns an error naming the line of an unexpected token
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Statement>> {
    let mut parser = Parser { tokens, pos: 0 };
    let statements = parser.block()?;
    if let Some(token) = parser.peek() {
        anyhow::bail!("line {}: unexpected {:?}", token.line, token.kind);
    }
    Ok(statements)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.eat(&kind) {
            return Ok(());
        }
        let line = self.current_line();
        match self.peek_kind() {
            Some(found) => anyhow::bail!("line {}: expected {:?}, found {:?}", line, kind, found),
            None => anyhow::bail!("line {}: expected {:?}, found end of script", line, kind),
        }
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek_kind(), Some(TokenKind::Newline)) {
            self.pos += 1;
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            None | Some(TokenKind::Newline) | Some(TokenKind::Semicolon) | Some(TokenKind::RBrace)
        )
    }

    /// Statements until a closing brace or the end of input
    fn block(&mut self) -> Result<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while matches!(
                self.peek_kind(),
                Some(TokenKind::Newline) | Some(TokenKind::Semicolon)
            ) {
                self.pos += 1;
            }
            if matches!(self.peek_kind(), None | Some(TokenKind::RBrace)) {
                return Ok(statements);
            }
            statements.push(self.statement()?);
        }
    }

    fn closure_body(&mut self) -> Result<Vec<Statement>> {
        self.expect(TokenKind::LBrace)?;
        self.skip_closure_parameters();
        let body = self.block()?;
        self.expect(TokenKind::RBrace)?;
        Ok(body)
    }

    /// Skips a `a, b ->` parameter list at the start of a closure
    fn skip_closure_parameters(&mut self) {
        let mut offset = 0;
        while let Some(kind) = self.peek_kind_at(offset) {
            match kind {
                TokenKind::Ident(_) | TokenKind::Comma | TokenKind::Newline => offset += 1,
                TokenKind::Op(op) if op == "->" => {
                    self.pos += offset + 1;
                    return;
                }
                _ => return,
            }
        }
    }

    /// Consumes tokens up to the end of the statement, returning the closures
    /// it contains
    fn skip_rest_of_statement(&mut self) -> Vec<Vec<Statement>> {
        let mut closures = Vec::new();
        let mut depth = 0usize;
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::LBrace => {
                    let start = self.pos;
                    match self.closure_body() {
                        Ok(body) => {
                            closures.push(body);
                            continue;
                        }
                        Err(_) => {
                            self.pos = start;
                            depth += 1;
                        }
                    }
                }
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 {
                        return closures;
                    }
                    depth -= 1;
                }
                TokenKind::Newline | TokenKind::Semicolon if depth == 0 => return closures,
                _ => {}
            }
            self.pos += 1;
        }
        closures
    }

    fn statement(&mut self) -> Result<Statement> {
        let line = self.current_line();

        let local = match self.peek_kind() {
            Some(TokenKind::Ident(word)) if DECLARATION_KEYWORDS.contains(&word.as_str()) => {
                // `def x = ...` or `String x = ...`, but not `def` used as a name
                if matches!(self.peek_kind_at(1), Some(TokenKind::Ident(_))) {
                    self.pos += 1;
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        let Some(target) = self.dotted_path() else {
            let closures = self.skip_rest_of_statement();
            return Ok(Statement::Other { line, closures });
        };

        let statement = match self.peek_kind() {
            Some(TokenKind::Assign) => {
                self.pos += 1;
                self.skip_newlines();
                let value = self.expression()?;
                Statement::Assign {
                    target,
                    value,
                    local,
                    line,
                }
            }
            _ if local => {
                // `def x` without initializer
                Statement::Assign {
                    target,
                    value: Expr::Null,
                    local,
                    line,
                }
            }
            Some(TokenKind::LParen) => {
                let args = self.parenthesized_args()?;
                let closure = self.trailing_closure()?;
                Statement::Call {
                    target,
                    args,
                    closure,
                    line,
                }
            }
            Some(TokenKind::LBrace) => Statement::Call {
                target,
                args: Vec::new(),
                closure: Some(self.closure_body()?),
                line,
            },
            _ if self.at_statement_end() => Statement::Call {
                target,
                args: Vec::new(),
                closure: None,
                line,
            },
            Some(TokenKind::LBracket) | Some(TokenKind::Op(_)) | Some(TokenKind::Dot) => {
                let closures = self.skip_rest_of_statement();
                return Ok(Statement::Other { line, closures });
            }
            _ => {
                let args = self.command_args()?;
                let closure = self.trailing_closure()?;
                Statement::Call {
                    target,
                    args,
                    closure,
                    line,
                }
            }
        };

        // Trailing chains such as `version '1.0' apply false` carry nothing we model
        if !self.at_statement_end() {
            let trailing = self.skip_rest_of_statement();
            if !trailing.is_empty() {
                // `if (..) { } else { }`
                let mut closures = match statement {
                    Statement::Call {
                        closure: Some(body),
                        ..
                    } => vec![body],
                    _ => Vec::new(),
                };
                closures.extend(trailing);
                return Ok(Statement::Other { line, closures });
            }
        }
        Ok(statement)
    }

    /// `ident (. ident)*`
    fn dotted_path(&mut self) -> Option<Vec<String>> {
        let Some(TokenKind::Ident(first)) = self.peek_kind().cloned() else {
            return None;
        };
        self.pos += 1;
        let mut path = vec![first];
        while matches!(self.peek_kind(), Some(TokenKind::Dot)) {
            match self.peek_kind_at(1) {
                Some(TokenKind::Ident(next)) => {
                    path.push(next.clone());
                    self.pos += 2;
                }
                // `a.'quoted'` style access
                Some(TokenKind::Str(parts)) => {
                    let name = parts
                        .iter()
                        .map(|p| match p {
                            StrPart::Literal(s) | StrPart::Interpolation(s) => s.as_str(),
                        })
                        .collect::<String>();
                    path.push(name);
                    self.pos += 2;
                }
                _ => break,
            }
        }
        Some(path)
    }

    fn trailing_closure(&mut self) -> Result<Option<Vec<Statement>>> {
        if matches!(self.peek_kind(), Some(TokenKind::LBrace)) {
            Ok(Some(self.closure_body()?))
        } else {
            Ok(None)
        }
    }

    fn parenthesized_args(&mut self) -> Result<Vec<Arg>> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            args.push(self.argument()?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                return Ok(args);
            }
        }
    }

    /// Arguments of a call without parentheses, up to the end of the line
    fn command_args(&mut self) -> Result<Vec<Arg>> {
        let mut args = vec![self.argument()?];
        while self.eat(&TokenKind::Comma) {
            self.skip_newlines();
            args.push(self.argument()?);
        }
        Ok(args)
    }

    fn argument(&mut self) -> Result<Arg> {
        let key = match (self.peek_kind(), self.peek_kind_at(1)) {
            (Some(TokenKind::Ident(name)), Some(TokenKind::Colon)) => Some(name.clone()),
            (Some(TokenKind::Str(parts)), Some(TokenKind::Colon)) => Some(literal_text(parts)),
            _ => None,
        };

        match key {
            Some(key) => {
                self.pos += 2;
                self.skip_newlines();
                Ok(Arg::Named(key, self.expression()?))
            }
            None => Ok(Arg::Positional(self.expression()?)),
        }
    }

    fn at_expression_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            None | Some(TokenKind::Newline)
                | Some(TokenKind::Semicolon)
                | Some(TokenKind::Comma)
                | Some(TokenKind::Colon)
                | Some(TokenKind::RParen)
                | Some(TokenKind::RBracket)
                | Some(TokenKind::RBrace)
                | Some(TokenKind::LBrace)
                // Command chains such as `id 'x' version '1.0'`
                | Some(TokenKind::Ident(_))
        )
    }

    /// Consumes the remainder of an expression the evaluator cannot model
    fn skip_expression(&mut self) {
        let mut depth = 0usize;
        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Newline | TokenKind::Semicolon | TokenKind::Comma if depth == 0 => {
                    return
                }
                _ => {}
            }
            self.pos += 1;
        }
    }

    fn expression(&mut self) -> Result<Expr> {
        let first = self.primary()?;
        if self.at_expression_end() {
            return Ok(first);
        }

        let mut operands = vec![first];
        loop {
            match self.peek_kind() {
                Some(TokenKind::Op(op)) if op == "+" => {
                    self.pos += 1;
                    self.skip_newlines();
                    operands.push(self.primary()?);
                    if self.at_expression_end() {
                        return Ok(Expr::Concat(operands));
                    }
                }
                _ => {
                    self.skip_expression();
                    return Ok(Expr::Unsupported);
                }
            }
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let line = self.current_line();
        let Some(token) = self.peek().cloned() else {
            anyhow::bail!("line {}: expected an expression, found end of script", line);
        };

        let expr = match token.kind {
            TokenKind::Str(parts) => {
                self.pos += 1;
                Expr::Str(parts)
            }
            TokenKind::Number(n) => {
                self.pos += 1;
                Expr::Number(n)
            }
            TokenKind::Ident(word) if word == "true" || word == "false" => {
                self.pos += 1;
                Expr::Bool(word == "true")
            }
            TokenKind::Ident(word) if word == "null" => {
                self.pos += 1;
                Expr::Null
            }
            TokenKind::Ident(word) if word == "new" => {
                self.skip_expression();
                Expr::Unsupported
            }
            TokenKind::Ident(_) => {
                let target = self.dotted_path().unwrap_or_default();
                if matches!(self.peek_kind(), Some(TokenKind::LParen)) {
                    let args = self.parenthesized_args()?;
                    if matches!(self.peek_kind(), Some(TokenKind::LBrace)) {
                        self.closure_body()?;
                    }
                    Expr::Call { target, args }
                } else {
                    Expr::Path(target)
                }
            }
            TokenKind::LBracket => self.list_or_map()?,
            TokenKind::LBrace => Expr::Closure(self.closure_body()?),
            TokenKind::LParen => {
                self.pos += 1;
                self.skip_newlines();
                let inner = self.expression()?;
                self.skip_newlines();
                self.expect(TokenKind::RParen)?;
                inner
            }
            TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::Comma
            | TokenKind::Newline
            | TokenKind::Semicolon => {
                anyhow::bail!("line {}: expected an expression, found {:?}", line, token.kind)
            }
            _ => {
                self.skip_expression();
                return Ok(Expr::Unsupported);
            }
        };

        // Method chains such as `uri('x').toString()` are not modelled
        if matches!(self.peek_kind(), Some(TokenKind::Dot)) {
            self.skip_expression();
            return Ok(Expr::Unsupported);
        }
        Ok(expr)
    }

    fn list_or_map(&mut self) -> Result<Expr> {
        self.expect(TokenKind::LBracket)?;
        self.skip_newlines();

        // `[:]`
        if self.eat(&TokenKind::Colon) {
            self.skip_newlines();
            self.expect(TokenKind::RBracket)?;
            return Ok(Expr::Map(Vec::new()));
        }

        let mut items = Vec::new();
        let mut entries = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(&TokenKind::RBracket) {
                break;
            }
            match self.argument()? {
                Arg::Positional(expr) => items.push(expr),
                Arg::Named(key, expr) => entries.push((key, expr)),
            }
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                self.skip_newlines();
                self.expect(TokenKind::RBracket)?;
                break;
            }
        }

        match (items.is_empty(), entries.is_empty()) {
            (_, true) => Ok(Expr::List(items)),
            (true, false) => Ok(Expr::Map(entries)),
            (false, false) => Ok(Expr::Unsupported),
        }
    }
}

fn literal_text(parts: &[StrPart]) -> String {
    parts
        .iter()
        .map(|p| match p {
            StrPart::Literal(s) => s.clone(),
            StrPart::Interpolation(s) => format!("${{{}}}", s),
        })
        .collect()
}
