use gravel_core::{TextRange, TextSize};
use serde::{Deserialize, Serialize};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexError {
    pub message: String,
    pub range: TextRange,
}

/// Tokenize `input`, including trivia. The final token is always `Eof`.
pub fn lex(input: &str) -> Vec<Token> {
    lex_with_errors(input).0
}

pub fn lex_with_errors(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.errors)
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            errors: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(SyntaxKind::Eof, start);
        };

        let kind = match c {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                SyntaxKind::Whitespace
            }
            '/' if self.peek_nth(1) == Some('/') => {
                self.eat_while(|c| c != '\n' && c != '\r');
                SyntaxKind::LineComment
            }
            '/' if self.peek_nth(1) == Some('*') => self.block_comment(start),
            '"' | '\'' => self.string(start, c),
            c if c.is_ascii_digit() => self.number(),
            c if c == '_' || c == '$' || unicode_ident::is_xid_start(c) => {
                self.eat_while(|c| c == '$' || unicode_ident::is_xid_continue(c));
                SyntaxKind::from_keyword(&self.input[start..self.pos])
                    .unwrap_or(SyntaxKind::Identifier)
            }
            _ => self.punctuation(start),
        };

        self.token(kind, start)
    }

    fn token(&self, kind: SyntaxKind, start: usize) -> Token {
        Token {
            kind,
            range: TextRange::new(
                TextSize::from(start as u32),
                TextSize::from(self.pos as u32),
            ),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while self.peek().is_some_and(&mut pred) {
            self.bump();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn error(&mut self, message: &str, start: usize) {
        self.errors.push(LexError {
            message: message.to_string(),
            range: TextRange::new(
                TextSize::from(start as u32),
                TextSize::from(self.pos as u32),
            ),
        });
    }

    fn block_comment(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.starts_with("/**") && !self.starts_with("/**/") {
            SyntaxKind::DocComment
        } else {
            SyntaxKind::BlockComment
        };
        self.pos += 2;
        loop {
            if self.starts_with("*/") {
                self.pos += 2;
                return kind;
            }
            if self.bump().is_none() {
                self.error("unterminated block comment", start);
                return kind;
            }
        }
    }

    fn string(&mut self, start: usize, quote: char) -> SyntaxKind {
        let triple: String = std::iter::repeat(quote).take(3).collect();
        if self.starts_with(&triple) {
            self.pos += 3;
            while !self.starts_with(&triple) {
                match self.bump() {
                    Some('\\') => {
                        self.bump();
                    }
                    Some('$') if quote == '"' && self.peek() == Some('{') => self.interpolation(),
                    Some(_) => {}
                    None => {
                        self.error("unterminated string literal", start);
                        return SyntaxKind::StringLiteral;
                    }
                }
            }
            self.pos += 3;
            return SyntaxKind::StringLiteral;
        }

        self.bump();
        loop {
            let c = match self.peek() {
                Some('\n' | '\r') | None => {
                    self.error("unterminated string literal", start);
                    return SyntaxKind::StringLiteral;
                }
                Some(c) => c,
            };
            self.bump();
            match c {
                c if c == quote => return SyntaxKind::StringLiteral,
                '\\' => {
                    self.bump();
                }
                '$' if quote == '"' && self.peek() == Some('{') => self.interpolation(),
                _ => {}
            }
        }
    }

    /// Skips a `${ ... }` GString placeholder; the cursor is on the `{`.
    fn interpolation(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn number(&mut self) -> SyntaxKind {
        if self.starts_with("0x") || self.starts_with("0X") {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            self.eat_suffix("lLgGiI");
            return SyntaxKind::IntLiteral;
        }

        self.eat_while(|c| c.is_ascii_digit() || c == '_');
        let mut kind = SyntaxKind::IntLiteral;

        // `1..5` is a range, not a decimal literal.
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
            kind = SyntaxKind::DecimalLiteral;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = usize::from(matches!(self.peek_nth(1), Some('+' | '-')));
            if self.peek_nth(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1 + sign;
                self.eat_while(|c| c.is_ascii_digit());
                kind = SyntaxKind::DecimalLiteral;
            }
        }

        if self.eat_suffix("dDfF") {
            kind = SyntaxKind::DecimalLiteral;
        } else {
            self.eat_suffix("lLgGiI");
        }
        kind
    }

    fn eat_suffix(&mut self, suffixes: &str) -> bool {
        match self.peek() {
            Some(c) if suffixes.contains(c) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    fn punctuation(&mut self, start: usize) -> SyntaxKind {
        const TWO_CHAR: &[(&str, SyntaxKind)] = &[
            ("->", SyntaxKind::Arrow),
            ("?.", SyntaxKind::SafeDot),
            ("?:", SyntaxKind::Elvis),
            ("..", SyntaxKind::Range),
            ("<<", SyntaxKind::LeftShift),
            ("==", SyntaxKind::EqEq),
            ("!=", SyntaxKind::BangEq),
            ("<=", SyntaxKind::LessEq),
            (">=", SyntaxKind::GreaterEq),
            ("&&", SyntaxKind::AmpAmp),
            ("||", SyntaxKind::PipePipe),
            ("++", SyntaxKind::PlusPlus),
            ("--", SyntaxKind::MinusMinus),
            ("+=", SyntaxKind::PlusEq),
            ("-=", SyntaxKind::MinusEq),
            ("*=", SyntaxKind::StarEq),
            ("/=", SyntaxKind::SlashEq),
        ];

        if let Some((op, kind)) = TWO_CHAR.iter().find(|(op, _)| self.starts_with(op)) {
            self.pos += op.len();
            return *kind;
        }

        let Some(c) = self.bump() else {
            return SyntaxKind::Eof;
        };
        match c {
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            '[' => SyntaxKind::LBracket,
            ']' => SyntaxKind::RBracket,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            '?' => SyntaxKind::Question,
            ':' => SyntaxKind::Colon,
            '+' => SyntaxKind::Plus,
            '-' => SyntaxKind::Minus,
            '*' => SyntaxKind::Star,
            '/' => SyntaxKind::Slash,
            '%' => SyntaxKind::Percent,
            '!' => SyntaxKind::Bang,
            '=' => SyntaxKind::Eq,
            '<' => SyntaxKind::Less,
            '>' => SyntaxKind::Greater,
            _ => {
                self.error("unexpected character", start);
                SyntaxKind::Error
            }
        }
    }
}
