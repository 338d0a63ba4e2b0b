//! String literal decoding.
//!
//! Single-quoted bodies only know `\\` and `\'`; every other backslash is
//! kept as written. Double-quoted bodies decode the usual escape set and
//! reject sequences this decoder does not understand, so that a literal is
//! either decoded exactly or not folded at all.

use critic_repr::{QuoteStyle, StringLit};

/// Decode the body of a literal (text between the quotes).
///
/// Returns `None` on a malformed `\x` escape or, for double quotes, any
/// escape outside `\" \$ \n \r \t \\ \' \xHH`. A double-quoted `\'` is not
/// an escape and decodes to the two characters backslash and quote.
#[must_use]
pub fn interpret_string(body: &str, quote: QuoteStyle) -> Option<Vec<u8>> {
    if !body.contains('\\') {
        return Some(body.as_bytes().to_vec());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    let mut buf = [0u8; 4];
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        let Some(next) = chars.next() else {
            // Lone trailing backslash.
            out.push(b'\\');
            break;
        };
        match quote {
            QuoteStyle::Single => match next {
                '\\' | '\'' => out.push(next as u8),
                other => {
                    out.push(b'\\');
                    out.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
                }
            },
            QuoteStyle::Double => match next {
                '\\' => out.push(b'\\'),
                '"' => out.push(b'"'),
                '$' => out.push(b'$'),
                'n' => out.push(b'\n'),
                'r' => out.push(b'\r'),
                't' => out.push(b'\t'),
                '\'' => out.extend_from_slice(b"\\'"),
                'x' => out.push(hex_byte(chars.next()?, chars.next()?)?),
                _ => return None,
            },
        }
    }
    Some(out)
}

/// Two hex digits to a byte.
fn hex_byte(hi: char, lo: char) -> Option<u8> {
    let hi = hi.to_digit(16)?;
    let lo = lo.to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

/// Does a double-quoted body interpolate at runtime?
///
/// A `$` counts unless an odd run of backslashes precedes it.
#[must_use]
pub fn is_dynamic(body: &str) -> bool {
    let mut backslashes = 0usize;
    for b in body.bytes() {
        match b {
            b'\\' => backslashes += 1,
            b'$' if backslashes % 2 == 0 => return true,
            _ => backslashes = 0,
        }
    }
    false
}

/// Decode a whole literal. `None` for malformed, interpolated or
/// undecodable literals.
#[must_use]
pub fn decode_literal(lit: &StringLit) -> Option<Vec<u8>> {
    let quote = lit.quote()?;
    let body = lit.body()?;
    if quote.interpolates() && is_dynamic(body) {
        return None;
    }
    interpret_string(body, quote)
}
