use super::PropertiesDocument;
use std::str::Chars;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PropertiesParseError {
    #[error("line {line}: malformed \\uXXXX escape")]
    MalformedUnicodeEscape { line: usize },
    #[error("line {line}: property key must not be empty")]
    EmptyKey { line: usize },
}

/// Parses `.properties` text. Later duplicates of a key replace earlier ones.
pub fn parse_properties(input: &str) -> Result<PropertiesDocument, PropertiesParseError> {
    let mut document = PropertiesDocument::new();
    for (line, logical) in logical_lines(input) {
        let (raw_key, raw_value) = split_key_value(&logical);
        let key = unescape(raw_key, line)?;
        if key.is_empty() {
            return Err(PropertiesParseError::EmptyKey { line });
        }
        let value = unescape(raw_value, line)?;
        document.insert(key, value);
    }
    Ok(document)
}

/// Joins continuation lines and drops blanks and comments. Each item carries the
/// 1-based number of the line it started on.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, natural) in input.lines().enumerate() {
        let trimmed = natural.trim_start_matches([' ', '\t', '\u{c}']);
        let (start, mut buffer) = match pending.take() {
            Some(open) => open,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        if ends_with_continuation(trimmed) {
            buffer.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buffer));
        } else {
            buffer.push_str(trimmed);
            out.push((start, buffer));
        }
    }

    if let Some(open) = pending {
        out.push(open);
    }
    out
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\u{c}' => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\u{c}']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\u{c}']))
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(unicode_escape(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decodes the four hex digits after `\u`. A high surrogate must be followed by a
/// `\uXXXX` low surrogate and the pair decodes to one character.
fn unicode_escape(chars: &mut Chars<'_>, line: usize) -> Result<char, PropertiesParseError> {
    let malformed = PropertiesParseError::MalformedUnicodeEscape { line };
    let high = code_unit(chars).ok_or(malformed.clone())?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high).ok_or(malformed);
    }

    if !chars.as_str().starts_with("\\u") {
        return Err(malformed);
    }
    chars.nth(1);
    let low = code_unit(chars)
        .filter(|low| (0xDC00..=0xDFFF).contains(low))
        .ok_or(malformed.clone())?;
    char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)).ok_or(malformed)
}

fn code_unit(chars: &mut Chars<'_>) -> Option<u32> {
    let hex = chars.by_ref().take(4).collect::<String>();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
