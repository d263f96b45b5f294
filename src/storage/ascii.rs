// SPDX-License-Identifier: PMPL-1.0-or-later

//! JSON formatter for the data file layout: zero-indent pretty printing with
//! every character outside printable ASCII written as a `\uXXXX` escape.

use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::{self, Write};

pub struct AsciiFormatter {
    pretty: PrettyFormatter<'static>,
}

impl AsciiFormatter {
    pub fn new() -> Self {
        Self {
            pretty: PrettyFormatter::with_indent(b""),
        }
    }
}

impl Default for AsciiFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch < '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn encode<T: Serialize>(value: &T) -> String {
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, AsciiFormatter::new());
        value.serialize(&mut serializer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn ascii_is_written_verbatim() {
        assert_eq!(encode(&"English"), "\"English\"");
        assert_eq!(encode(&"a \"quoted\" \\ name"), "\"a \\\"quoted\\\" \\\\ name\"");
    }

    #[test]
    fn non_ascii_is_escaped() {
        assert_eq!(encode(&"Español"), "\"Espa\\u00f1ol\"");
        assert_eq!(encode(&"日本語"), "\"\\u65e5\\u672c\\u8a9e\"");
        assert_eq!(encode(&"\u{7f}"), "\"\\u007f\"");
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        assert_eq!(encode(&"𐐷"), "\"\\ud801\\udc37\"");
    }

    #[test]
    fn escaped_text_parses_back() {
        let original = "Português (Brasil) 中文 𐐷";
        let decoded: String = serde_json::from_str(&encode(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn zero_indent_layout() {
        let value = serde_json::json!({"b": [1, 2], "a": []});
        assert_eq!(encode(&value), "{\n\"a\": [],\n\"b\": [\n1,\n2\n]\n}");
    }
}
