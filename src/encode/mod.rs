pub(crate) mod writer;

use std::io::Write;

use crate::{Error, RenderOptions, Result, Value};

use writer::Writer;

pub fn to_string(value: &Value, options: &RenderOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_value(value, 0);
    writer.finish()
}

pub fn to_vec(value: &Value, options: &RenderOptions) -> Vec<u8> {
    to_string(value, options).into_bytes()
}

pub fn to_writer<W: Write>(mut writer: W, value: &Value, options: &RenderOptions) -> Result<()> {
    let rendered = to_string(value, options);
    writer
        .write_all(rendered.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(Error::write)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_to_writer_writes_rendered_text() {
        let value = crate::parse(r#"["a", 1]"#).unwrap();
        let mut out = Vec::new();
        to_writer(&mut out, &value, &RenderOptions::default()).unwrap();
        assert_eq!(out, br#"["a", 1]"#);
        assert_eq!(to_vec(&value, &RenderOptions::default()), out);
    }

    #[rstest::rstest]
    fn test_to_writer_reports_write_failure() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = to_writer(Closed, &Value::NULL, &RenderOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Write);
    }
}
