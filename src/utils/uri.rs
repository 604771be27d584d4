use crate::errors::RunError;

// Matches the browser's encodeURIComponent unreserved set.
fn is_unescaped_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn to_hex_upper(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'A' + nibble - 10) as char,
    }
}

fn from_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

pub fn encode_uri_component(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for b in src.as_bytes() {
        if is_unescaped_byte(*b) {
            out.push(*b as char);
        } else {
            out.push('%');
            out.push(to_hex_upper((*b >> 4) & 0x0F));
            out.push(to_hex_upper(*b & 0x0F));
        }
    }
    out
}

fn parse_percent_byte(bytes: &[u8], offset: usize) -> Result<u8, RunError> {
    let hi = bytes
        .get(offset + 1)
        .copied()
        .and_then(from_hex_digit)
        .ok_or_else(|| RunError::config("Malformed URI sequence"))?;
    let lo = bytes
        .get(offset + 2)
        .copied()
        .and_then(from_hex_digit)
        .ok_or_else(|| RunError::config("Malformed URI sequence"))?;
    Ok((hi << 4) | lo)
}

fn utf8_sequence_len(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

pub fn decode_uri_component(src: &str) -> Result<String, RunError> {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            let ch = src[i..]
                .chars()
                .next()
                .ok_or_else(|| RunError::config("Malformed URI sequence"))?;
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        let first = parse_percent_byte(bytes, i)?;
        let len = utf8_sequence_len(first)
            .ok_or_else(|| RunError::config("Malformed URI sequence"))?;
        let mut chunk = Vec::with_capacity(len);
        chunk.push(first);
        let mut next = i + 3;
        for _ in 1..len {
            if next >= bytes.len() || bytes[next] != b'%' {
                return Err(RunError::config("Malformed URI sequence"));
            }
            chunk.push(parse_percent_byte(bytes, next)?);
            next += 3;
        }
        let decoded = std::str::from_utf8(&chunk)
            .map_err(|_| RunError::config("Malformed URI sequence"))?;
        out.push_str(decoded);
        i = next;
    }

    Ok(out)
}
