//! A JSON document model backed by its own open-addressing hash table.
//!
//! ```
//! let value = jsonhash::parse(r#"{"a": 1, "b": 2.5, "c": [true, false, null]}"#).unwrap();
//! assert_eq!(value.get("a").and_then(|v| v.as_i64()), Some(1));
//! assert_eq!(value.get("c").and_then(|c| c.get_index(2)), Some(&jsonhash::Value::NULL));
//! ```

pub mod constants;
pub mod decode;
pub mod encode;
pub mod error;
pub mod num;
pub mod options;
pub mod table;
pub mod text;
pub mod types;

use std::io::{Read, Write};

pub use crate::error::{Error, ErrorKind};
pub use crate::options::{Indent, ParseOptions, RenderOptions};
pub use crate::table::HashTable;
pub use crate::types::{Constant, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    decode::from_str(input, options)
}

pub fn from_slice(input: &[u8]) -> Result<Value> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<Value> {
    decode::from_slice(input, options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Value> {
    decode::from_reader(reader, options)
}

pub fn to_string(value: &Value) -> String {
    to_string_with_options(value, &RenderOptions::default())
}

pub fn to_string_with_options(value: &Value, options: &RenderOptions) -> String {
    encode::to_string(value, options)
}

pub fn to_vec(value: &Value) -> Vec<u8> {
    to_vec_with_options(value, &RenderOptions::default())
}

pub fn to_vec_with_options(value: &Value, options: &RenderOptions) -> Vec<u8> {
    encode::to_vec(value, options)
}

pub fn to_writer<W: Write>(writer: W, value: &Value) -> Result<()> {
    to_writer_with_options(writer, value, &RenderOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    value: &Value,
    options: &RenderOptions,
) -> Result<()> {
    encode::to_writer(writer, value, options)
}
