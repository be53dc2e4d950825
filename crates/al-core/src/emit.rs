//! Streaming JSON emitter.
//!
//! Writes the structural value model to an output sink with fixed
//! formatting rules:
//! - 2-space indentation
//! - explicit nulls: a `Null` member is written, never omitted
//! - object member order follows record insertion order
//! - numbers written bare, without quoting
//!
//! The emitter tracks open containers and rejects structural misuse
//! (a value without a pending name inside an object, mismatched closes,
//! trailing data after the root value). There is no recovery for a sink
//! failure partway through: the document is abandoned and the run reports
//! a fatal error rather than leaving an intentionally malformed document.

use al_common::{Error, Number, Result, Value};
use std::io::Write;

const INDENT: &str = "  ";

#[derive(Debug)]
enum Container {
    Object { first: bool, pending_name: bool },
    Array { first: bool },
}

/// A streaming JSON writer over any [`Write`] sink.
pub struct JsonEmitter<W: Write> {
    out: W,
    stack: Vec<Container>,
    root_written: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(out: W) -> Self {
        JsonEmitter {
            out,
            stack: Vec::new(),
            root_written: false,
        }
    }

    /// Open an object.
    pub fn begin_object(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.write_all(b"{")?;
        self.stack.push(Container::Object {
            first: true,
            pending_name: false,
        });
        Ok(())
    }

    /// Close the current object.
    pub fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Container::Object {
                first,
                pending_name: false,
            }) => {
                if !first {
                    self.newline_indent(self.stack.len())?;
                }
                self.out.write_all(b"}")?;
                Ok(())
            }
            Some(Container::Object { pending_name: true, .. }) => {
                Err(Error::Emit("member name written without a value".into()))
            }
            _ => Err(Error::Emit("end_object outside an object".into())),
        }
    }

    /// Open an array.
    pub fn begin_array(&mut self) -> Result<()> {
        self.before_value()?;
        self.out.write_all(b"[")?;
        self.stack.push(Container::Array { first: true });
        Ok(())
    }

    /// Close the current array.
    pub fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Container::Array { first }) => {
                if !first {
                    self.newline_indent(self.stack.len())?;
                }
                self.out.write_all(b"]")?;
                Ok(())
            }
            _ => Err(Error::Emit("end_array outside an array".into())),
        }
    }

    /// Write a member name inside the current object.
    pub fn name(&mut self, name: &str) -> Result<()> {
        let depth = self.stack.len();
        let was_first = match self.stack.last_mut() {
            Some(Container::Object {
                first,
                pending_name,
            }) => {
                if *pending_name {
                    return Err(Error::Emit("two member names in a row".into()));
                }
                let was_first = *first;
                *first = false;
                *pending_name = true;
                was_first
            }
            _ => return Err(Error::Emit("member name outside an object".into())),
        };
        if !was_first {
            self.out.write_all(b",")?;
        }
        self.newline_indent(depth)?;
        write_escaped(&mut self.out, name)?;
        self.out.write_all(b": ")?;
        Ok(())
    }

    /// Write a complete value, recursing through sequences and records.
    pub fn value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.scalar("null"),
            Value::Bool(true) => self.scalar("true"),
            Value::Bool(false) => self.scalar("false"),
            Value::Number(Number::Int(n)) => self.scalar(&n.to_string()),
            Value::Number(Number::Float(n)) => {
                // JSON has no representation for non-finite numbers; fail
                // safe to null rather than produce an invalid document.
                if n.is_finite() {
                    self.scalar(&format_float(*n))
                } else {
                    self.scalar("null")
                }
            }
            Value::String(s) => {
                self.before_value()?;
                write_escaped(&mut self.out, s)?;
                Ok(())
            }
            Value::Sequence(items) => {
                self.begin_array()?;
                for item in items {
                    self.value(item)?;
                }
                self.end_array()
            }
            Value::Record(rec) => {
                self.begin_object()?;
                for (name, member) in rec.iter() {
                    self.name(name)?;
                    self.value(member)?;
                }
                self.end_object()
            }
        }
    }

    /// Verify the document is structurally complete and flush the sink.
    pub fn finish(mut self) -> Result<()> {
        if !self.stack.is_empty() {
            return Err(Error::Emit("document has unclosed containers".into()));
        }
        if !self.root_written {
            return Err(Error::Emit("document is empty".into()));
        }
        self.out.flush()?;
        Ok(())
    }

    fn scalar(&mut self, text: &str) -> Result<()> {
        self.before_value()?;
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Separator and position bookkeeping before any value is written.
    fn before_value(&mut self) -> Result<()> {
        let depth = self.stack.len();
        let array_was_first = match self.stack.last_mut() {
            Some(Container::Object { pending_name, .. }) => {
                if !*pending_name {
                    return Err(Error::Emit("value in object without a member name".into()));
                }
                *pending_name = false;
                None
            }
            Some(Container::Array { first }) => {
                let was_first = *first;
                *first = false;
                Some(was_first)
            }
            None => {
                if self.root_written {
                    return Err(Error::Emit("trailing data after root value".into()));
                }
                self.root_written = true;
                None
            }
        };
        if let Some(was_first) = array_was_first {
            if !was_first {
                self.out.write_all(b",")?;
            }
            self.newline_indent(depth)?;
        }
        Ok(())
    }

    fn newline_indent(&mut self, depth: usize) -> Result<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..depth {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }
}

/// Render a finite float as a JSON number.
fn format_float(n: f64) -> String {
    let text = n.to_string();
    // Rust renders 1.0 as "1"; keep a fractional part so the value reads
    // back as floating.
    if text.contains('.') || text.contains('e') || text.contains('E') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Write a JSON string literal with minimal escaping.
fn write_escaped<W: Write>(out: &mut W, s: &str) -> Result<()> {
    out.write_all(b"\"")?;
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let escape: Option<String> = match ch {
            '"' => Some("\\\"".into()),
            '\\' => Some("\\\\".into()),
            '\n' => Some("\\n".into()),
            '\r' => Some("\\r".into()),
            '\t' => Some("\\t".into()),
            '\u{8}' => Some("\\b".into()),
            '\u{c}' => Some("\\f".into()),
            c if (c as u32) < 0x20 => Some(format!("\\u{:04x}", c as u32)),
            _ => None,
        };
        if let Some(esc) = escape {
            out.write_all(s[start..i].as_bytes())?;
            out.write_all(esc.as_bytes())?;
            start = i + ch.len_utf8();
        }
    }
    out.write_all(s[start..].as_bytes())?;
    out.write_all(b"\"")?;
    Ok(())
}
