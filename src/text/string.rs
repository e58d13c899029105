/// Polynomial string hash over UTF-16 code units (`h = 31 * h + unit`),
/// wrapping on overflow. The empty string hashes to 0.
///
/// The result may be negative; callers reducing it to a slot index must
/// mask it first (see [`slot_index`]).
pub fn string_hash(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Reduce a string hash to an index in `[0, capacity)`.
pub fn slot_index(value: &str, capacity: usize) -> usize {
    let masked = (string_hash(value) & i32::MAX) as usize;
    masked % capacity.max(1)
}

/// Escape decoded text: every quote, backslash and control character.
pub fn escape_string_into(out: &mut String, value: &str) {
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        if ch == '\\' || needs_escape(ch) {
            out.push_str(&value[start..idx]);
            push_escape(out, ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(&value[start..]);
}

/// Escape text whose backslash sequences are already escapes, as kept by a
/// parser that does not decode them.
///
/// A backslash and the character after it are copied unchanged. A bare `"`
/// and control characters are escaped. A trailing lone backslash is doubled.
pub fn escape_verbatim_into(out: &mut String, value: &str) {
    let mut start = 0;
    let mut after_backslash = false;
    for (idx, ch) in value.char_indices() {
        if after_backslash {
            after_backslash = false;
        } else if ch == '\\' {
            after_backslash = true;
        } else if needs_escape(ch) {
            out.push_str(&value[start..idx]);
            push_escape(out, ch);
            start = idx + ch.len_utf8();
        }
    }
    out.push_str(&value[start..]);
    if after_backslash {
        out.push('\\');
    }
}

fn needs_escape(ch: char) -> bool {
    ch == '"' || (ch as u32) < 0x20
}

fn push_escape(out: &mut String, ch: char) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        c => push_unicode_escape(out, c as u32),
    }
}

fn push_unicode_escape(out: &mut String, code: u32) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.push_str("\\u");
    for shift in [12, 8, 4, 0] {
        out.push(HEX[((code >> shift) & 0xf) as usize] as char);
    }
}
