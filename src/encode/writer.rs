use crate::num::number::{format_int_into, format_real_into};
use crate::table::HashTable;
use crate::text::string::{escape_string_into, escape_verbatim_into};
use crate::types::Value;
use crate::RenderOptions;

pub(crate) struct Writer {
    buffer: String,
    indent_unit: String,
    indent_cache: Vec<String>,
    escape_backslashes: bool,
}

impl Writer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            buffer: String::new(),
            indent_unit: " ".repeat(options.indent.get_spaces()),
            indent_cache: vec![String::new()],
            escape_backslashes: options.escape_backslashes,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Str(s) => self.write_quoted_string(s),
            Value::Int(n) => format_int_into(&mut self.buffer, n),
            Value::Real(f) => format_real_into(&mut self.buffer, *f),
            Value::Array(items) => self.write_array(items, depth),
            Value::Object(table) => self.write_object(table, depth),
            Value::Const(constant) => self.buffer.push_str(constant.as_str()),
        }
    }

    fn write_quoted_string(&mut self, s: &str) {
        self.buffer.push('"');
        if self.escape_backslashes {
            escape_string_into(&mut self.buffer, s);
        } else {
            escape_verbatim_into(&mut self.buffer, s);
        }
        self.buffer.push('"');
    }

    fn write_array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.buffer.push_str("[]");
            return;
        }
        self.buffer.push('[');
        for (idx, item) in items.iter().enumerate() {
            self.write_member_break(idx == 0, depth + 1);
            self.write_value(item, depth + 1);
        }
        self.write_closing_break(depth);
        self.buffer.push(']');
    }

    fn write_object(&mut self, table: &HashTable, depth: usize) {
        if table.is_empty() {
            self.buffer.push_str("{}");
            return;
        }
        self.buffer.push('{');
        for (idx, (key, value)) in table.iter().enumerate() {
            self.write_member_break(idx == 0, depth + 1);
            self.write_quoted_string(key);
            self.buffer.push_str(": ");
            self.write_value(value, depth + 1);
        }
        self.write_closing_break(depth);
        self.buffer.push('}');
    }

    // Compact: ", " between members. Indented: ",\n" plus indentation.
    fn write_member_break(&mut self, first: bool, depth: usize) {
        if self.indent_unit.is_empty() {
            if !first {
                self.buffer.push_str(", ");
            }
            return;
        }
        if !first {
            self.buffer.push(',');
        }
        self.buffer.push('\n');
        self.write_indent(depth);
    }

    fn write_closing_break(&mut self, depth: usize) {
        if self.indent_unit.is_empty() {
            return;
        }
        self.buffer.push('\n');
        self.write_indent(depth);
    }

    fn write_indent(&mut self, depth: usize) {
        if depth == 0 {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer.push_str(&self.indent_cache[depth]);
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => format!("{prev}{}", self.indent_unit),
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Indent;

    fn render(value: &Value, spaces: usize) -> String {
        let mut writer = Writer::new(&RenderOptions::new().with_indent(Indent::spaces(spaces)));
        writer.write_value(value, 0);
        writer.finish()
    }

    #[rstest::rstest]
    fn test_write_scalars() {
        assert_eq!(render(&Value::from("a\"b"), 0), r#""a\"b""#);
        assert_eq!(render(&Value::from(-3i64), 0), "-3");
        assert_eq!(render(&Value::from(0.5), 0), "0.5");
        assert_eq!(render(&Value::NULL, 0), "null");
        assert_eq!(render(&Value::TRUE, 4), "true");
    }

    #[rstest::rstest]
    fn test_write_string_escape_modes() {
        let value = Value::from(r#"C:\dir "q""#);
        assert_eq!(render(&value, 0), r#""C:\dir \"q\"""#);

        let options = RenderOptions::new().with_escape_backslashes(true);
        let mut writer = Writer::new(&options);
        writer.write_value(&value, 0);
        assert_eq!(writer.finish(), r#""C:\\dir \"q\"""#);
    }

    #[rstest::rstest]
    fn test_write_compact_containers() {
        let value = Value::Array(vec![
            Value::from(1i64),
            Value::Array(vec![]),
            Value::Object(HashTable::new()),
            Value::Object([("k", Value::FALSE)].into_iter().collect()),
        ]);
        assert_eq!(render(&value, 0), r#"[1, [], {}, {"k": false}]"#);
    }

    #[rstest::rstest]
    fn test_write_indented_containers() {
        let inner: HashTable = [("k", Value::Array(vec![Value::from(1i64), Value::NULL]))]
            .into_iter()
            .collect();
        let value = Value::Array(vec![Value::Object(inner), Value::Array(vec![])]);
        let expected = "[\n  {\n    \"k\": [\n      1,\n      null\n    ]\n  },\n  []\n]";
        assert_eq!(render(&value, 2), expected);
    }
}
