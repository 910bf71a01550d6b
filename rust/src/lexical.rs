//! Comment and literal boundaries, so text searches only see code.

use std::ops::Range;

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End of the comment, string or char literal that starts at byte `i`, or
/// `None` when `i` starts ordinary code. Unterminated forms run to the end.
pub fn literal_end(text: &str, i: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    match (bytes.get(i).copied()?, bytes.get(i + 1).copied()) {
        (b'/', Some(b'/')) => Some(text[i..].find('\n').map_or(text.len(), |n| i + n)),
        (b'/', Some(b'*')) => Some(block_comment_end(bytes, i)),
        (b'"', _) => Some(string_end(bytes, i + 1)),
        (b'r', _) => raw_string_end(bytes, i),
        (b'\'', _) => char_end(text, i),
        _ => None,
    }
}

fn block_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i + 1 < bytes.len() {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'*') => {
                depth += 1;
                i += 2;
            }
            (b'*', b'/') => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

fn string_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// `r"..."`, `r#"..."#` and their `br` forms.
fn raw_string_end(bytes: &[u8], i: usize) -> Option<usize> {
    let prefix = if i > 0 && bytes[i - 1] == b'b' { i - 1 } else { i };
    if prefix > 0 && is_ident_byte(bytes[prefix - 1]) {
        return None;
    }
    let hashes = bytes[i + 1..].iter().take_while(|&&b| b == b'#').count();
    let open = i + 1 + hashes;
    if bytes.get(open) != Some(&b'"') {
        return None;
    }
    let mut j = open + 1;
    while j < bytes.len() {
        let closed = bytes[j + 1..].iter().take_while(|&&b| b == b'#').count() >= hashes;
        if bytes[j] == b'"' && closed {
            return Some(j + 1 + hashes);
        }
        j += 1;
    }
    Some(bytes.len())
}

/// Char literals only; a lifetime such as `'a` is code.
fn char_end(text: &str, i: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(i + 1) == Some(&b'\\') {
        let close = text.get(i + 3..)?.find('\'')?;
        return Some(i + 3 + close + 1);
    }
    let c = text[i + 1..].chars().next()?;
    let after = i + 1 + c.len_utf8();
    (bytes.get(after) == Some(&b'\'')).then_some(after + 1)
}

/// Byte ranges of every comment and string or char literal in `text`.
pub fn non_code_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match literal_end(text, i) {
            Some(end) => {
                ranges.push(i..end);
                i = end;
            }
            None => i += 1,
        }
    }
    ranges
}

/// Whether `offset` falls inside one of the sorted `ranges`.
pub fn is_masked(ranges: &[Range<usize>], offset: usize) -> bool {
    let idx = ranges.partition_point(|r| r.end <= offset);
    ranges.get(idx).map_or(false, |r| r.start <= offset)
}
