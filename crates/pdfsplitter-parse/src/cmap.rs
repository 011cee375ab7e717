//! ToUnicode CMap parsing.
//!
//! Only the `bfchar` and `bfrange` sections matter for text recovery; every
//! other CMap construct is skipped. Malformed entries are dropped one at a
//! time so a single bad line does not lose the whole map.

use std::collections::HashMap;

/// Largest `bfrange` span expanded into individual entries.
const MAX_RANGE_SPAN: u32 = 0xFFFF;

/// Character code to Unicode mapping from a `/ToUnicode` stream.
#[derive(Debug, Clone, Default)]
pub(crate) struct ToUnicodeMap {
    mappings: HashMap<u32, String>,
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Hex(&'a str),
    ArrayStart,
    ArrayEnd,
    Keyword(&'a str),
}

impl ToUnicodeMap {
    /// Parse CMap program bytes.
    pub(crate) fn parse(data: &[u8]) -> Self {
        let text = String::from_utf8_lossy(data);
        let tokens = tokenize(&text);
        let mut mappings = HashMap::new();

        let mut i = 0;
        while i < tokens.len() {
            match tokens[i] {
                Token::Keyword("beginbfchar") => i = parse_bfchar(&tokens, i + 1, &mut mappings),
                Token::Keyword("beginbfrange") => {
                    i = parse_bfrange(&tokens, i + 1, &mut mappings)
                }
                _ => i += 1,
            }
        }

        Self { mappings }
    }

    pub(crate) fn get(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.mappings.len()
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
                    i += 1;
                }
            }
            b'<' if bytes.get(i + 1) == Some(&b'<') => i += 2,
            b'>' if bytes.get(i + 1) == Some(&b'>') => i += 2,
            b'<' => {
                let start = i + 1;
                let end = text[start..].find('>').map_or(bytes.len(), |n| start + n);
                tokens.push(Token::Hex(&text[start..end]));
                i = end + 1;
            }
            b'[' => {
                tokens.push(Token::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(Token::ArrayEnd);
                i += 1;
            }
            b'(' => {
                // Literal strings carry no mappings; skip with nesting.
                let mut depth = 0usize;
                while i < bytes.len() {
                    match bytes[i] {
                        b'\\' => i += 1,
                        b'(' => depth += 1,
                        b')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                i += 1;
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
                if i == start {
                    i += 1;
                } else {
                    tokens.push(Token::Keyword(&text[start..i]));
                }
            }
        }
    }

    tokens
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'%' | b'/')
}

fn parse_bfchar(tokens: &[Token<'_>], mut i: usize, out: &mut HashMap<u32, String>) -> usize {
    while i < tokens.len() {
        match (&tokens[i], tokens.get(i + 1)) {
            (Token::Keyword("endbfchar"), _) => return i + 1,
            (Token::Hex(src), Some(Token::Hex(dst))) => {
                if let (Some(code), Some(text)) = (parse_code(src), decode_utf16_hex(dst)) {
                    out.insert(code, text);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    i
}

fn parse_bfrange(tokens: &[Token<'_>], mut i: usize, out: &mut HashMap<u32, String>) -> usize {
    while i < tokens.len() {
        let (Token::Hex(lo), Some(Token::Hex(hi))) = (&tokens[i], tokens.get(i + 1)) else {
            if tokens[i] == Token::Keyword("endbfrange") {
                return i + 1;
            }
            i += 1;
            continue;
        };
        i += 2;

        let range = match (parse_code(lo), parse_code(hi)) {
            (Some(lo), Some(hi)) if lo <= hi && hi - lo <= MAX_RANGE_SPAN => Some((lo, hi)),
            _ => None,
        };

        match tokens.get(i) {
            Some(Token::Hex(dst)) => {
                if let (Some((lo, hi)), Some(units)) = (range, hex_to_units(dst)) {
                    expand_incrementing(lo, hi, &units, out);
                }
                i += 1;
            }
            Some(Token::ArrayStart) => {
                i += 1;
                let mut code = range.map(|(lo, _)| lo);
                while let Some(Token::Hex(dst)) = tokens.get(i) {
                    if let (Some(c), Some((_, hi))) = (code, range) {
                        if c <= hi {
                            if let Some(text) = decode_utf16_hex(dst) {
                                out.insert(c, text);
                            }
                        }
                        code = c.checked_add(1);
                    }
                    i += 1;
                }
                if tokens.get(i) == Some(&Token::ArrayEnd) {
                    i += 1;
                }
            }
            _ => {}
        }
    }
    i
}

/// Map `lo..=hi` to `units`, incrementing the last UTF-16 unit per code.
fn expand_incrementing(lo: u32, hi: u32, units: &[u16], out: &mut HashMap<u32, String>) {
    let Some((&last, prefix)) = units.split_last() else {
        return;
    };
    for offset in 0..=(hi - lo) {
        let mut mapped = prefix.to_vec();
        mapped.push(last.wrapping_add(offset as u16));
        out.insert(lo + offset, String::from_utf16_lossy(&mapped));
    }
}

fn parse_code(hex: &str) -> Option<u32> {
    let digits: String = hex.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

fn hex_to_units(hex: &str) -> Option<Vec<u16>> {
    let mut digits: Vec<u8> = hex.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.is_empty() {
        return None;
    }
    // A two-digit destination is a single byte value.
    if digits.len() == 2 {
        digits.splice(0..0, *b"00");
    }
    if digits.len() % 4 != 0 {
        return None;
    }
    digits
        .chunks(4)
        .map(|chunk| {
            let s = std::str::from_utf8(chunk).ok()?;
            u16::from_str_radix(s, 16).ok()
        })
        .collect()
}

fn decode_utf16_hex(hex: &str) -> Option<String> {
    hex_to_units(hex).map(|units| String::from_utf16_lossy(&units))
}
