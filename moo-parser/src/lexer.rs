/// Regex-free scanner for MOO-style source buffers.
///
/// Every call to [`scan`] classifies exactly one token starting at a byte
/// offset. Literal classes are tried in a fixed order (string, identifier,
/// float, integer, object reference), then operators, then punctuation; the
/// first class that matches wins. The scanner never fails: bytes that match
/// nothing come back as [`TokenKind::Illegal`].
use crate::token::{self, Token, TokenKind};

/// Scan one token from `source` starting at `pos`.
///
/// Returns the token and the offset just past it.
///
/// ```
/// use moo_parser::lexer::scan;
/// use moo_parser::token::TokenKind;
///
/// let (tok, next) = scan(b"  foo.bar", 0);
/// assert_eq!(tok.kind, TokenKind::Identifier);
/// assert_eq!(tok.offset, 2);
/// assert_eq!(next, 5);
/// ```
pub fn scan(source: &[u8], pos: usize) -> (Token, usize) {
    let start = skip_whitespace(source, pos);
    if start >= source.len() {
        let end = source.len();
        return (Token::new(TokenKind::EndOfInput, "", end), end);
    }
    let rest = &source[start..];

    let Some((kind, len)) = lex_literal(rest)
        .or_else(|| lex_operator(rest))
        .or_else(|| token::punctuation(rest[0]).map(|kind| (kind, 1)))
    else {
        let (len, lexeme) = lex_illegal(rest);
        return (Token::new(TokenKind::Illegal, lexeme, start), start + len);
    };

    let lexeme = String::from_utf8_lossy(&rest[..len]).into_owned();
    (Token::new(kind, lexeme, start), start + len)
}

/// Unmatched input: a whole UTF-8 character when the bytes form one,
/// otherwise the single byte as `\xNN`.
fn lex_illegal(rest: &[u8]) -> (usize, String) {
    let width = match rest[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    };
    match rest.get(..width).map(std::str::from_utf8) {
        Some(Ok(ch)) => (width, ch.to_owned()),
        _ => (1, format!("\\x{:02X}", rest[0])),
    }
}

fn skip_whitespace(source: &[u8], mut pos: usize) -> usize {
    while let Some(b' ' | b'\t' | b'\r' | b'\n') = source.get(pos).copied() {
        pos += 1;
    }
    pos
}

fn lex_literal(rest: &[u8]) -> Option<(TokenKind, usize)> {
    if let Some(len) = lex_string(rest) {
        return Some((TokenKind::StringLiteral, len));
    }
    if let Some(len) = lex_ident(rest) {
        let kind = std::str::from_utf8(&rest[..len])
            .ok()
            .and_then(token::keyword)
            .unwrap_or(TokenKind::Identifier);
        return Some((kind, len));
    }
    if let Some(len) = lex_float(rest) {
        return Some((TokenKind::FloatLiteral, len));
    }
    let digits = count_while(rest, |ch| ch.is_ascii_digit());
    if digits > 0 {
        return Some((TokenKind::IntLiteral, digits));
    }
    lex_object_ref(rest).map(|len| (TokenKind::ObjectRefLiteral, len))
}

/// `".*"`: greedy up to the last quote before the end of the line.
fn lex_string(rest: &[u8]) -> Option<usize> {
    if rest.first() != Some(&b'"') {
        return None;
    }
    let line_end = rest.iter().position(|&ch| ch == b'\n').unwrap_or(rest.len());
    let close = rest[1..line_end].iter().rposition(|&ch| ch == b'"')?;
    Some(close + 2)
}

fn lex_ident(rest: &[u8]) -> Option<usize> {
    match rest.first() {
        Some(ch) if ch.is_ascii_alphabetic() || *ch == b'_' => {
            Some(count_while(rest, |ch| ch.is_ascii_alphanumeric() || ch == b'_'))
        }
        _ => None,
    }
}

/// `[0-9]+\.[0-9]+`
fn lex_float(rest: &[u8]) -> Option<usize> {
    let whole = count_while(rest, |ch| ch.is_ascii_digit());
    if whole == 0 || rest.get(whole) != Some(&b'.') {
        return None;
    }
    let frac = count_while(&rest[whole + 1..], |ch| ch.is_ascii_digit());
    if frac == 0 {
        return None;
    }
    Some(whole + 1 + frac)
}

/// `#[0-9-]+`
fn lex_object_ref(rest: &[u8]) -> Option<usize> {
    if rest.first() != Some(&b'#') {
        return None;
    }
    let body = count_while(&rest[1..], |ch| ch.is_ascii_digit() || ch == b'-');
    if body == 0 {
        return None;
    }
    Some(body + 1)
}

/// Maximal run of operator glyphs, narrowed to its longest registered prefix.
fn lex_operator(rest: &[u8]) -> Option<(TokenKind, usize)> {
    let run = count_while(rest, is_operator_glyph);
    (1..=run).rev().find_map(|len| {
        std::str::from_utf8(&rest[..len])
            .ok()
            .and_then(token::operator)
            .map(|kind| (kind, len))
    })
}

fn is_operator_glyph(ch: u8) -> bool {
    matches!(
        ch,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>' | b'=' | b'!' | b'&' | b'|' | b'.'
    )
}

fn count_while(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&ch| pred(ch)).count()
}

/// Cursor over a source buffer that hands out one token per call.
///
/// Iterating yields every token up to and including the first
/// [`TokenKind::EndOfInput`].
pub struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            pos: 0,
            finished: false,
        }
    }

    /// Tokenize a whole buffer eagerly. The last token is always `EndOfInput`.
    pub fn tokenize(source: &[u8]) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    pub fn next_token(&mut self) -> Token {
        let (tok, next) = scan(self.source, self.pos);
        self.pos = next;
        tok
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let tok = self.next_token();
        self.finished = tok.kind == TokenKind::EndOfInput;
        Some(tok)
    }
}
