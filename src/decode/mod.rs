pub mod cursor;
pub mod parser;

use std::io::{self, Read};

pub use cursor::{Cursor, ReadSource, Source, StrSource};
pub use parser::Parser;

use crate::{Error, ParseOptions, Result, Value};

pub fn from_str(input: &str, options: &ParseOptions) -> Result<Value> {
    from_source(StrSource::new(input), options)
}

pub fn from_slice(input: &[u8], options: &ParseOptions) -> Result<Value> {
    match std::str::from_utf8(input) {
        Ok(text) => from_str(text, options),
        Err(err) => {
            let valid = String::from_utf8_lossy(&input[..err.valid_up_to()]);
            Err(Error::read(
                io::Error::new(io::ErrorKind::InvalidData, err),
                valid.chars().count(),
            ))
        }
    }
}

pub fn from_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Value> {
    from_source(ReadSource::new(reader), options)
}

pub fn from_source<S: Source>(source: S, options: &ParseOptions) -> Result<Value> {
    Parser::new(source, options).parse_document()
}
