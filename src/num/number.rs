use std::str::FromStr;

use num_bigint::BigInt;

use crate::Value;

/// Build an `Int` or `Real` from the text the number scanner accepted.
///
/// The text is `Real` when it contains `.`, `e` or `E`. Returns `None` when
/// the text is not a valid literal of the chosen kind (`-`, `1-2`, `1.2.3`)
/// or when a real overflows to infinity (`1e400`).
pub fn number_from_literal(text: &str) -> Option<Value> {
    if is_real_literal(text) {
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Value::Real)
    } else {
        BigInt::from_str(text).ok().map(Value::Int)
    }
}

pub fn is_real_literal(text: &str) -> bool {
    text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

pub fn format_int_into(out: &mut String, value: &BigInt) {
    match i64::try_from(value) {
        Ok(small) => {
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(small));
        }
        Err(_) => out.push_str(&value.to_string()),
    }
}

pub fn format_real_into(out: &mut String, value: f64) {
    if !value.is_finite() {
        out.push_str("null");
        return;
    }
    let mut buffer = ryu::Buffer::new();
    out.push_str(buffer.format_finite(value));
}
