//! SQL tokenizer implementation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Keyword, Span, Token, TokenKind, TokenStream};
use crate::parser::ParseError;

/// Bytes treated as whitespace between tokens.
const WHITESPACE: &[u8] = b" \n\r\t\x0b\x0c";

/// Bytes that may appear in operators.
const OPERATOR_CHARS: &[u8] = b"~!@#^&|`?+-*/%<>=";

/// Bytes returned as [`TokenKind::Special`] when standing alone.
const SPECIAL_CHARS: &[u8] = b",()[].;:+-*/%^<>=";

/// Operator bytes allowing an operator to end in `+` or `-`.
const NON_STANDARD_OPERATOR_CHARS: &[u8] = b"~!@#^&|`?%";

/// Options affecting how the source is split into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerOptions {
    /// When true, backslashes in plain `'...'` literals are taken literally.
    pub standard_conforming_strings: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            standard_conforming_strings: true,
        }
    }
}

/// How the body of a quoted literal is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quoting {
    /// No escapes at all: `b'...'`, `x'...'`.
    Raw,
    /// Only doubled quotes: standard strings, `u&'...'`.
    Standard,
    /// Doubled quotes and backslash escapes: `e'...'`.
    Backslash,
}

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    options: LexerOptions,
    tokens: Vec<Token>,
    /// Indexes of `u&` tokens awaiting escape processing, with an identifier flag.
    unicode: Vec<(usize, bool)>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, LexerOptions::default())
    }

    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn with_options(input: &'a str, options: LexerOptions) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            options,
            tokens: Vec::new(),
            unicode: Vec::new(),
        }
    }

    /// Returns the byte at the current position.
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Returns the byte `n` positions after the current one.
    fn peek_at(&self, n: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + n).copied()
    }

    fn rest(&self) -> &'a [u8] {
        let input = self.input;
        &input.as_bytes()[self.pos..]
    }

    fn error(&self, message: impl Into<String>, position: usize) -> ParseError {
        ParseError::at_position(message, self.input, position)
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn push(&mut self, kind: TokenKind) {
        let token = Token::new(kind, self.make_span());
        self.tokens.push(token);
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| WHITESPACE.contains(&b)) {
            self.pos += 1;
        }
    }

    /// Tokenizes the entire input.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for the first malformed construct found.
    pub fn tokenize(mut self) -> Result<TokenStream<'a>, ParseError> {
        self.skip_whitespace();
        while self.pos < self.input.len() {
            self.start = self.pos;
            self.next_token()?;
            self.skip_whitespace();
        }
        self.start = self.pos;
        self.push(TokenKind::Eof);

        if !self.unicode.is_empty() {
            self.unescape_unicode_tokens()?;
        }
        trace!(count = self.tokens.len(), "tokenized input");
        Ok(TokenStream::new(self.tokens, self.input))
    }

    /// Scans the token starting at the current position.
    fn next_token(&mut self) -> Result<(), ParseError> {
        let Some(c) = self.peek() else {
            return Ok(());
        };
        let next = self.peek_at(1);

        match c {
            b'-' if next == Some(b'-') => {
                while self.peek().is_some_and(|b| b != b'\n' && b != b'\r') {
                    self.pos += 1;
                }
                Ok(())
            }
            b'/' if next == Some(b'*') => self.skip_block_comment(),
            b'\'' => self.scan_string(0, None),
            b'"' => self.scan_quoted_identifier(0),
            b'b' | b'B' | b'e' | b'E' | b'n' | b'N' | b'x' | b'X' if next == Some(b'\'') => {
                self.scan_string(1, Some(c.to_ascii_lowercase()))
            }
            b'u' | b'U' if next == Some(b'&') && matches!(self.peek_at(2), Some(b'"' | b'\'')) => {
                if self.peek_at(2) == Some(b'"') {
                    self.unicode.push((self.tokens.len(), true));
                    self.scan_quoted_identifier(2)
                } else if self.options.standard_conforming_strings {
                    self.unicode.push((self.tokens.len(), false));
                    self.scan_string(2, Some(b'u'))
                } else {
                    Err(self.error(
                        "String constants with Unicode escapes cannot be used \
                         when standard_conforming_strings is off.",
                        self.pos,
                    ))
                }
            }
            b'$' => self.scan_dollar(),
            b':' => {
                match next {
                    Some(b':') => {
                        self.pos += 2;
                        self.push(TokenKind::Typecast);
                    }
                    Some(b'=') => {
                        self.pos += 2;
                        self.push(TokenKind::ColonEquals);
                    }
                    Some(b) if is_ident_start(b) => {
                        self.pos += 1;
                        let name = self.scan_ident_chars();
                        self.push(TokenKind::NamedParam(name.to_string()));
                    }
                    _ => {
                        self.pos += 1;
                        self.push(TokenKind::Special(':'));
                    }
                }
                Ok(())
            }
            b'.' if next == Some(b'.') => Err(self.error("Unexpected '..'", self.pos)),
            b'.' if next.is_some_and(|b| b.is_ascii_digit()) => self.scan_number(),
            b'0'..=b'9' => self.scan_number(),
            _ if OPERATOR_CHARS.contains(&c) => {
                self.scan_operator();
                Ok(())
            }
            _ if SPECIAL_CHARS.contains(&c) => {
                self.pos += 1;
                self.push(TokenKind::Special(char::from(c)));
                Ok(())
            }
            _ if is_ident_start(c) => {
                self.scan_identifier();
                Ok(())
            }
            _ => {
                let ch = self.input[self.pos..].chars().next().unwrap_or('?');
                Err(self.error(format!("Unexpected '{ch}'"), self.pos))
            }
        }
    }

    /// Skips a possibly nested `/* ... */` comment.
    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let begin = self.pos;
        let mut depth = 0usize;
        while self.pos < self.input.len() {
            match (self.peek(), self.peek_at(1)) {
                (Some(b'/'), Some(b'*')) => {
                    depth += 1;
                    self.pos += 2;
                }
                (Some(b'*'), Some(b'/')) => {
                    depth -= 1;
                    self.pos += 2;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => self.pos += 1,
            }
        }
        Err(self.error("Unterminated /* comment", begin))
    }

    fn scan_ident_chars(&mut self) -> &'a str {
        let input = self.input;
        let begin = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        &input[begin..self.pos]
    }

    /// Scans an identifier or keyword, folding it to lowercase.
    fn scan_identifier(&mut self) {
        let text = self.scan_ident_chars().to_ascii_lowercase();
        match Keyword::from_str(&text) {
            Some(keyword) => self.push(TokenKind::Keyword(keyword)),
            None => self.push(TokenKind::Identifier(text)),
        }
    }

    /// Scans a double-quoted identifier, `skip` bytes after the current position.
    fn scan_quoted_identifier(&mut self, skip: usize) -> Result<(), ParseError> {
        self.pos += skip + 1;
        let mut value = String::new();
        loop {
            let rest = &self.input[self.pos..];
            let Some(quote) = rest.find('"') else {
                return Err(self.error("Unterminated quoted identifier", self.start));
            };
            value.push_str(&rest[..quote]);
            self.pos += quote + 1;
            if self.peek() == Some(b'"') {
                value.push('"');
                self.pos += 1;
            } else {
                break;
            }
        }
        if value.is_empty() {
            return Err(self.error("Zero-length quoted identifier", self.start));
        }
        self.push(TokenKind::Identifier(value));
        Ok(())
    }

    /// Scans a single-quoted literal along with any continuation literals.
    ///
    /// `prefix` is one of `b`, `e`, `n`, `x`, `u` (for `u&`), `skip` is its length.
    fn scan_string(&mut self, skip: usize, prefix: Option<u8>) -> Result<(), ParseError> {
        let quoting = match prefix {
            Some(b'b' | b'x') => Quoting::Raw,
            Some(b'e') => Quoting::Backslash,
            Some(b'u') => Quoting::Standard,
            _ if self.options.standard_conforming_strings => Quoting::Standard,
            _ => Quoting::Backslash,
        };

        self.pos += skip;
        let mut value = String::new();
        loop {
            let body_start = self.pos + 1;
            let body = self.scan_quoted_body(quoting)?;
            match quoting {
                Quoting::Raw => value.push_str(body),
                Quoting::Standard => value.push_str(&body.replace("''", "'")),
                Quoting::Backslash => value.push_str(&self.unescape_c_style(body, body_start)?),
            }
            match self.continuation_start() {
                Some(next) => self.pos = next,
                None => break,
            }
        }

        let kind = match prefix {
            Some(b'b') => TokenKind::BinaryString(value),
            Some(b'x') => TokenKind::HexString(value),
            Some(b'n') => TokenKind::NationalString(value),
            _ => TokenKind::String(value),
        };
        self.push(kind);
        Ok(())
    }

    /// Scans `'...'` at the current position and returns the text between quotes.
    fn scan_quoted_body(&mut self, quoting: Quoting) -> Result<&'a str, ParseError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let begin = self.pos + 1;
        let mut i = begin;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' if quoting == Quoting::Backslash => i += 2,
                b'\'' if quoting != Quoting::Raw && bytes.get(i + 1) == Some(&b'\'') => i += 2,
                b'\'' => {
                    self.pos = i + 1;
                    return Ok(&input[begin..i]);
                }
                _ => i += 1,
            }
        }
        Err(self.error("Unterminated string literal", self.start))
    }

    /// Looks for a string literal continuing the current one.
    ///
    /// Two literals separated only by whitespace that includes at least one
    /// newline are treated as one. Returns the position of the opening quote.
    fn continuation_start(&self) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut i = self.pos;
        while bytes.get(i).is_some_and(|b| b" \t\x0b\x0c".contains(b)) {
            i += 1;
        }
        if bytes.get(i) == Some(&b'-') && bytes.get(i + 1) == Some(&b'-') {
            while bytes.get(i).is_some_and(|&b| b != b'\n' && b != b'\r') {
                i += 1;
            }
        }
        if !matches!(bytes.get(i), Some(b'\n' | b'\r')) {
            return None;
        }
        loop {
            match (bytes.get(i), bytes.get(i + 1)) {
                (Some(b), _) if WHITESPACE.contains(b) => i += 1,
                (Some(b'-'), Some(b'-')) => {
                    while bytes.get(i).is_some_and(|&b| b != b'\n' && b != b'\r') {
                        i += 1;
                    }
                    bytes.get(i)?;
                }
                (Some(b'\''), _) => return Some(i),
                _ => return None,
            }
        }
    }

    /// Replaces backslash escapes in the body of an `e'...'` literal.
    fn unescape_c_style(&self, escaped: &str, position: usize) -> Result<String, ParseError> {
        let bytes = escaped.as_bytes();
        let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
        let mut decoder = SurrogateDecoder::default();
        let mut i = 0;

        while i < bytes.len() {
            let b = bytes[i];
            if b != b'\\' {
                if decoder.pending() {
                    break;
                }
                out.push(b);
                i += if b == b'\'' { 2 } else { 1 };
                continue;
            }
            let Some(&kind) = bytes.get(i + 1) else {
                break;
            };
            if kind != b'u' && kind != b'U' && decoder.pending() {
                break;
            }
            match kind {
                b'b' => out.push(0x08),
                b'f' => out.push(0x0c),
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'v' => out.push(0x0b),
                b'x' if bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit) => {
                    let digits = count_matching(&bytes[i + 2..], 2, u8::is_ascii_hexdigit);
                    out.push(low_byte(parse_radix(&escaped[i + 2..i + 2 + digits], 16)));
                    i += 2 + digits;
                    continue;
                }
                b'0'..=b'7' => {
                    let digits = count_matching(&bytes[i + 1..], 3, |b| (b'0'..=b'7').contains(b));
                    out.push(low_byte(parse_radix(&escaped[i + 1..i + 1 + digits], 8)));
                    i += 1 + digits;
                    continue;
                }
                b'u' | b'U' => {
                    let expected = if kind == b'u' { 4 } else { 8 };
                    let digits = count_matching(&bytes[i + 2..], expected, u8::is_ascii_hexdigit);
                    if digits < expected {
                        return Err(self.error("Invalid Unicode escape value", position + i));
                    }
                    let codepoint = parse_radix(&escaped[i + 2..i + 2 + digits], 16);
                    if let Some(ch) = decoder
                        .push(codepoint)
                        .map_err(|msg| self.error(msg, position + i))?
                    {
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                    }
                    i += 2 + digits;
                    continue;
                }
                _ => {
                    // Any other escaped character stands for itself
                    let len = utf8_len(kind);
                    out.extend_from_slice(&bytes[i + 1..(i + 1 + len).min(bytes.len())]);
                    i += 1 + len;
                    continue;
                }
            }
            i += 2;
        }

        if decoder.pending() {
            return Err(self.error("Unfinished Unicode surrogate pair", position));
        }
        String::from_utf8(out)
            .map_err(|_| self.error("Invalid byte sequence in string literal", position))
    }

    /// Scans a positional parameter or a dollar-quoted string.
    fn scan_dollar(&mut self) -> Result<(), ParseError> {
        let rest = self.rest();
        if rest.get(1).is_some_and(u8::is_ascii_digit) {
            let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
            if rest.get(1 + digits).copied().is_some_and(is_ident_char) {
                return Err(self.error("Trailing junk after positional parameter", self.pos));
            }
            let number = self.input[self.pos + 1..self.pos + 1 + digits]
                .parse::<u32>()
                .map_err(|_| self.error("Positional parameter number is too large", self.pos))?;
            self.pos += 1 + digits;
            self.push(TokenKind::PositionalParam(number));
            return Ok(());
        }

        let tag_len = if rest.get(1).copied().is_some_and(is_ident_start) {
            1 + rest[1..]
                .iter()
                .take_while(|&&b| is_ident_char(b) && b != b'$')
                .count()
        } else {
            1
        };
        if rest.get(tag_len) != Some(&b'$') {
            return Err(self.error("Unexpected '$'", self.pos));
        }
        let delimiter = &self.input[self.pos..=self.pos + tag_len];
        let body_start = self.pos + delimiter.len();
        let Some(end) = self.input[body_start..].find(delimiter) else {
            return Err(self.error("Unterminated dollar-quoted string", self.pos));
        };
        let body = self.input[body_start..body_start + end].to_string();
        self.pos = body_start + end + delimiter.len();
        self.push(TokenKind::String(body));
        Ok(())
    }

    /// Scans a numeric literal.
    fn scan_number(&mut self) -> Result<(), ParseError> {
        let bytes = self.input.as_bytes();
        let begin = self.pos;
        let mut i = begin;
        let radix_digits: Option<fn(&u8) -> bool> =
            match (bytes.get(i), bytes.get(i + 1).map(u8::to_ascii_lowercase)) {
                (Some(b'0'), Some(b'x')) => Some(u8::is_ascii_hexdigit),
                (Some(b'0'), Some(b'o')) => Some(|b: &u8| (b'0'..=b'7').contains(b)),
                (Some(b'0'), Some(b'b')) => Some(|b: &u8| *b == b'0' || *b == b'1'),
                _ => None,
            };

        let non_decimal = radix_digits.and_then(|is_digit| {
            let end = digits_with_separators(bytes, i + 2, is_digit);
            (end > i + 2).then_some(end)
        });
        if let Some(end) = non_decimal {
            i = end;
        } else {
            if bytes[i] == b'.' {
                i = digits_with_separators(bytes, i + 1, u8::is_ascii_digit);
            } else {
                i = digits_with_separators(bytes, i, u8::is_ascii_digit);
                if bytes.get(i) == Some(&b'.') && bytes.get(i + 1) != Some(&b'.') {
                    i = digits_with_separators(bytes, i + 1, u8::is_ascii_digit);
                }
            }
            if matches!(bytes.get(i), Some(b'e' | b'E')) {
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+' | b'-')) {
                    j += 1;
                }
                let end = digits_with_separators(bytes, j, u8::is_ascii_digit);
                if end > j {
                    i = end;
                }
            }
        }

        if bytes.get(i).copied().is_some_and(is_ident_char) {
            let junk_end = i + bytes[i..].iter().take_while(|&&b| is_ident_char(b)).count();
            return Err(self.error(
                format!(
                    "Trailing junk after numeric literal: '{}'",
                    &self.input[begin..junk_end]
                ),
                begin,
            ));
        }

        let text = self.input[begin..i].to_string();
        self.pos = i;
        if text.bytes().all(|b| b.is_ascii_digit()) {
            self.push(TokenKind::Integer(text));
        } else {
            self.push(TokenKind::Float(text));
        }
        Ok(())
    }

    /// Scans an operator.
    ///
    /// Operators cannot contain `--` or `/*`, and a multi-character operator
    /// may only end in `+` or `-` if it also contains one of `~!@#^&|` `` ` `` `?%`.
    fn scan_operator(&mut self) {
        let rest = self.rest();
        let mut length = rest.iter().take_while(|b| OPERATOR_CHARS.contains(b)).count();
        let op = &rest[..length];
        for comment in [b"--", b"/*"] {
            if let Some(at) = op.windows(2).position(|w| w == comment) {
                if at > 0 {
                    length = length.min(at);
                }
            }
        }
        if length > 1
            && matches!(op[length - 1], b'+' | b'-')
            && !op[..length - 1]
                .iter()
                .any(|b| NON_STANDARD_OPERATOR_CHARS.contains(b))
        {
            while length > 1 && matches!(op[length - 1], b'+' | b'-') {
                length -= 1;
            }
        }

        let input = self.input;
        let text = &input[self.pos..self.pos + length];
        self.pos += length;
        let kind = match text {
            _ if length == 1 && SPECIAL_CHARS.contains(&op[0]) => TokenKind::Special(char::from(op[0])),
            "=>" => TokenKind::EqualsGreater,
            "<=" | ">=" | "!=" | "<>" => TokenKind::Inequality(text.to_string()),
            _ => TokenKind::Operator(text.to_string()),
        };
        self.push(kind);
    }

    /// Applies `u&` escapes to the tokens recorded during the main pass,
    /// consuming any trailing `UESCAPE 'c'` clauses.
    fn unescape_unicode_tokens(&mut self) -> Result<(), ParseError> {
        let pending = std::mem::take(&mut self.unicode);
        for &(index, identifier) in pending.iter().rev() {
            let has_uescape = self.tokens[index + 1].is_keyword(Keyword::Uescape);
            let escape = if has_uescape {
                let escape_token = self.tokens.get(index + 2).ok_or_else(|| {
                    ParseError::unexpected_eof(self.input)
                })?;
                let valid_string = matches!(escape_token.kind, TokenKind::String(_))
                    && !pending.iter().any(|&(i, _)| i == index + 2);
                if !valid_string {
                    return Err(self.error(
                        "UESCAPE must be followed by a simple string literal",
                        escape_token.span.start,
                    ));
                }
                let text = escape_token.text().unwrap_or_default();
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None)
                        if !c.is_ascii_hexdigit()
                            && !c.is_whitespace()
                            && !matches!(c, '"' | '\'' | '+') =>
                    {
                        c
                    }
                    _ => {
                        return Err(self.error(
                            "Invalid Unicode escape character",
                            escape_token.span.start,
                        ))
                    }
                }
            } else {
                '\\'
            };

            let token = &self.tokens[index];
            let raw = token.text().unwrap_or_default();
            let value = self.unescape_unicode(raw, escape, token.span.start + 3)?;
            let span = if has_uescape {
                token.span.merge(self.tokens[index + 2].span)
            } else {
                token.span
            };
            self.tokens[index] = Token::new(
                if identifier {
                    TokenKind::Identifier(value)
                } else {
                    TokenKind::String(value)
                },
                span,
            );
            if has_uescape {
                self.tokens.drain(index + 1..=index + 2);
            }
        }
        Ok(())
    }

    /// Replaces `\XXXX` and `\+XXXXXX` escapes (with a custom escape character).
    fn unescape_unicode(&self, raw: &str, escape: char, base: usize) -> Result<String, ParseError> {
        let mut out = String::with_capacity(raw.len());
        let mut decoder = SurrogateDecoder::default();
        let mut chars = raw.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != escape {
                if decoder.pending() {
                    break;
                }
                out.push(c);
                continue;
            }
            let rest = &raw[offset + c.len_utf8()..];
            let (digits, skip) = if rest.starts_with(escape) {
                if decoder.pending() {
                    break;
                }
                out.push(escape);
                chars.next();
                continue;
            } else if rest.starts_with('+') && hex_prefix(&rest[1..]) >= 6 {
                (&rest[1..7], 7)
            } else if hex_prefix(rest) >= 4 {
                (&rest[..4], 4)
            } else {
                return Err(self.error("Invalid Unicode escape", base + offset));
            };
            let codepoint = parse_radix(digits, 16);
            if let Some(ch) = decoder
                .push(codepoint)
                .map_err(|msg| self.error(msg, base + offset))?
            {
                out.push(ch);
            }
            for _ in 0..skip {
                chars.next();
            }
        }

        if decoder.pending() {
            return Err(self.error("Unfinished Unicode surrogate pair", base));
        }
        Ok(out)
    }
}

/// Combines UTF-16 surrogate pairs given as separate escapes.
#[derive(Default)]
struct SurrogateDecoder {
    first: Option<u32>,
}

impl SurrogateDecoder {
    const fn pending(&self) -> bool {
        self.first.is_some()
    }

    fn push(&mut self, codepoint: u32) -> Result<Option<char>, &'static str> {
        let is_first = (0xD800..=0xDBFF).contains(&codepoint);
        let is_second = (0xDC00..=0xDFFF).contains(&codepoint);
        if self.first.is_some() != is_second {
            return Err("Invalid Unicode surrogate pair");
        }
        if let Some(first) = self.first.take() {
            let combined = ((first & 0x3FF) << 10) + 0x10000 + (codepoint & 0x3FF);
            return char::from_u32(combined)
                .map(Some)
                .ok_or("Invalid Unicode codepoint");
        }
        if is_first {
            self.first = Some(codepoint);
            return Ok(None);
        }
        char::from_u32(codepoint)
            .map(Some)
            .ok_or("Invalid Unicode codepoint")
    }
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit() || b == b'$'
}

/// Returns the end of a digit run that may contain single `_` separators.
fn digits_with_separators(bytes: &[u8], from: usize, is_digit: fn(&u8) -> bool) -> usize {
    let mut i = from;
    if !bytes.get(i).is_some_and(is_digit) {
        return i;
    }
    i += 1;
    loop {
        match bytes.get(i) {
            Some(b) if is_digit(b) => i += 1,
            Some(b'_') if bytes.get(i + 1).is_some_and(is_digit) => i += 2,
            _ => return i,
        }
    }
}

fn count_matching(bytes: &[u8], max: usize, pred: impl Fn(&u8) -> bool) -> usize {
    bytes.iter().take(max).take_while(|b| pred(b)).count()
}

fn hex_prefix(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_hexdigit).count()
}

fn parse_radix(digits: &str, radix: u32) -> u32 {
    u32::from_str_radix(digits, radix).unwrap_or(u32::MAX)
}

const fn low_byte(value: u32) -> u8 {
    value.to_le_bytes()[0]
}

const fn utf8_len(first: u8) -> usize {
    match first {
        0xF0..=0xFF => 4,
        0xE0..=0xEF => 3,
        0xC0..=0xDF => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap_or_else(|e| panic!("Failed to tokenize {input}: {e}"))
            .into_tokens()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(input: &str) -> ParseError {
        match Lexer::new(input).tokenize() {
            Ok(_) => panic!("Expected lexer error for: {input}"),
            Err(e) => e,
        }
    }

    fn string(s: &str) -> TokenKind {
        TokenKind::String(s.to_string())
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(s.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            token_kinds("select -- comment\nfrom /* a /* nested */ comment */ x"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                ident("x"),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            lex_err("select /* unterminated /* */").message,
            "Unterminated /* comment"
        );
    }

    #[test]
    fn test_identifiers_fold_case() {
        assert_eq!(
            token_kinds(r#"Foo "Bar" "quo""te" _x$1"#),
            vec![
                ident("foo"),
                ident("Bar"),
                ident("quo\"te"),
                ident("_x$1"),
                TokenKind::Eof,
            ]
        );
        assert_eq!(lex_err(r#"select """#).message, "Zero-length quoted identifier");
        assert_eq!(lex_err(r#"select "foo"#).message, "Unterminated quoted identifier");
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            token_kinds(r"'it''s' b'0101' X'FF' n'nat' e'a\tb\'c'"),
            vec![
                string("it's"),
                TokenKind::BinaryString("0101".into()),
                TokenKind::HexString("FF".into()),
                TokenKind::NationalString("nat".into()),
                string("a\tb'c"),
                TokenKind::Eof,
            ]
        );
        assert_eq!(lex_err("select 'foo").message, "Unterminated string literal");
    }

    #[test]
    fn test_c_style_escapes() {
        assert_eq!(
            token_kinds(r"e'\x41\101B\U00000043\q'"),
            vec![string("AABCq"), TokenKind::Eof]
        );
        assert_eq!(
            token_kinds(r"e'😀'"),
            vec![string("\u{1F600}"), TokenKind::Eof]
        );
        assert_eq!(lex_err(r"e'\u12'").message, "Invalid Unicode escape value");
        assert_eq!(lex_err(r"e'\uD83D'").message, "Unfinished Unicode surrogate pair");
        assert_eq!(lex_err(r"e'\uDE00'").message, "Invalid Unicode surrogate pair");
    }

    #[test]
    fn test_standard_conforming_strings_off() {
        let options = LexerOptions {
            standard_conforming_strings: false,
        };
        let stream = Lexer::with_options(r"'a\'b'", options).tokenize().unwrap();
        assert_eq!(stream.into_tokens()[0].kind, string("a'b"));
        assert!(Lexer::with_options("u&'x'", options).tokenize().is_err());
        assert_eq!(token_kinds(r"'a\nb'"), vec![string(r"a\nb"), TokenKind::Eof]);
    }

    #[test]
    fn test_string_continuation() {
        assert_eq!(
            token_kinds("'foo'\n  'bar' -- comment\n\n 'baz'"),
            vec![string("foobarbaz"), TokenKind::Eof]
        );
        // No newline between the parts: two separate literals
        assert_eq!(
            token_kinds("'foo' 'bar'"),
            vec![string("foo"), string("bar"), TokenKind::Eof]
        );
        // Comments using /* */ do not allow continuation
        assert_eq!(
            token_kinds("'foo' /* x */\n'bar'"),
            vec![string("foo"), string("bar"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_dollar_quoted() {
        assert_eq!(
            token_kinds("$$it's$$ $tag$a $$ b$tag$ $_1$x$_1$"),
            vec![string("it's"), string("a $$ b"), string("x"), TokenKind::Eof]
        );
        assert_eq!(
            lex_err("select $foo$ bar").message,
            "Unterminated dollar-quoted string"
        );
    }

    #[test]
    fn test_parameters() {
        assert_eq!(
            token_kinds("$1 :foo :: := :"),
            vec![
                TokenKind::PositionalParam(1),
                TokenKind::NamedParam("foo".into()),
                TokenKind::Typecast,
                TokenKind::ColonEquals,
                TokenKind::Special(':'),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            lex_err("select $1a").message,
            "Trailing junk after positional parameter"
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("1 1.5 .5 1e10 2.E-3 0x1F 1_000"),
            vec![
                TokenKind::Integer("1".into()),
                TokenKind::Float("1.5".into()),
                TokenKind::Float(".5".into()),
                TokenKind::Float("1e10".into()),
                TokenKind::Float("2.E-3".into()),
                TokenKind::Float("0x1F".into()),
                TokenKind::Float("1_000".into()),
                TokenKind::Eof,
            ]
        );
        assert!(lex_err("select 123abc")
            .message
            .starts_with("Trailing junk after numeric literal"));
        assert_eq!(lex_err("select 1..2").message, "Unexpected '..'");
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("a <= b <> c != d => e @> f ||/ g"),
            vec![
                ident("a"),
                TokenKind::Inequality("<=".into()),
                ident("b"),
                TokenKind::Inequality("<>".into()),
                ident("c"),
                TokenKind::Inequality("!=".into()),
                ident("d"),
                TokenKind::EqualsGreater,
                ident("e"),
                TokenKind::Operator("@>".into()),
                ident("f"),
                TokenKind::Operator("||/".into()),
                ident("g"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operator_trailing_sign() {
        // "+-" has no non-standard characters, so the trailing sign is a separate token
        assert_eq!(
            token_kinds("1 *- 2"),
            vec![
                TokenKind::Integer("1".into()),
                TokenKind::Special('*'),
                TokenKind::Special('-'),
                TokenKind::Integer("2".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            token_kinds("a @- b"),
            vec![
                ident("a"),
                TokenKind::Operator("@-".into()),
                ident("b"),
                TokenKind::Eof,
            ]
        );
        // A comment start ends the operator
        assert_eq!(
            token_kinds("a +-- comment\n b"),
            vec![ident("a"), TokenKind::Special('+'), ident("b"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(
            token_kinds(r#"u&'d\0061t\+000061' U&"d!0061t" uescape '!'"#),
            vec![string("data"), ident("dat"), TokenKind::Eof]
        );
        assert_eq!(
            lex_err(r"select u&'\00zz'").message,
            "Invalid Unicode escape"
        );
        assert_eq!(
            lex_err(r"select u&'x' uescape 'a'").message,
            "Invalid Unicode escape character"
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("SELECT id").tokenize().unwrap().into_tokens();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
        assert_eq!(tokens[2].span, Span::new(9, 9));
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex_err("select \\");
        assert_eq!(err.message, "Unexpected '\\'");
        assert_eq!(err.span.start, 7);
    }
}
