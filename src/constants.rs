pub const DEFAULT_CAPACITY: usize = 16;

pub const LOAD_FACTOR: f64 = 0.75;

pub const DEFAULT_MAX_DEPTH: usize = 128;

pub const DEFAULT_INDENT: usize = 0;

#[inline]
pub fn is_json_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '\r' | '\t')
}

#[inline]
pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '-')
}
