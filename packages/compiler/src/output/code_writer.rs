//! Code Writer
//!
//! Primitive text operations used to render generated C# declarations, and the
//! default line-buffered implementation.

const INDENT_WITH: &str = "    ";
const GLOBAL_PREFIX: &str = "global::";

/// Text sink for generated code.
///
/// Operations append at the current position and return the writer so calls chain.
pub trait CodeWriter {
    /// Raw text, no escaping
    fn write(&mut self, text: &str) -> &mut Self;

    /// Raw text followed by a line break
    fn write_line(&mut self, text: &str) -> &mut Self;

    /// A double-quoted, escaped string literal
    fn write_string_literal(&mut self, literal: &str) -> &mut Self {
        let escaped = escape_string_literal(literal);
        self.write(&escaped)
    }

    /// Hide what follows from source-level debugging.
    fn write_line_hidden(&mut self) -> &mut Self {
        self.write_line("#line hidden")
    }

    /// `#pragma <value>` on its own line, e.g. `warning disable 0414`
    fn write_pragma(&mut self, value: &str) -> &mut Self {
        self.write("#pragma ").write_line(value)
    }

    /// A fully-qualified type reference
    fn write_global_type(&mut self, type_name: &str) -> &mut Self {
        self.write(GLOBAL_PREFIX).write(type_name)
    }

    /// `new global::<type>(`
    fn write_start_new_object(&mut self, type_name: &str) -> &mut Self {
        self.write("new ").write_global_type(type_name).write("(")
    }

    fn write_parameter_separator(&mut self) -> &mut Self {
        self.write(", ")
    }

    /// Close an invocation; `end_line` terminates the statement.
    fn write_end_method_invocation(&mut self, end_line: bool) -> &mut Self {
        self.write(")");
        if end_line {
            self.write_line(";");
        }
        self
    }

    /// `<name> = `
    fn write_start_assignment(&mut self, name: &str) -> &mut Self {
        self.write(name).write(" = ")
    }
}

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

/// Default writer: an indented buffer of lines.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl SourceWriter {
    pub fn create_root() -> Self {
        SourceWriter::new(0)
    }

    pub fn new(indent: usize) -> Self {
        SourceWriter {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map(|l| l.parts.is_empty()).unwrap_or(true)
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            let indent = self.indent;
            self.current_line_mut().indent = indent;
        }
    }

    /// Everything written so far. Completed lines end with `\n`.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        let count = self.lines.len();
        for (i, line) in self.lines.iter().enumerate() {
            if !line.parts.is_empty() {
                out.push_str(&INDENT_WITH.repeat(line.indent));
                out.push_str(&line.parts.concat());
            }
            if i + 1 < count {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        SourceWriter::create_root()
    }
}

impl CodeWriter for SourceWriter {
    fn write(&mut self, text: &str) -> &mut Self {
        self.print(text, false);
        self
    }

    fn write_line(&mut self, text: &str) -> &mut Self {
        self.print(text, true);
        self
    }
}

/// Quote and escape `input` as a C# regular string literal.
pub fn escape_string_literal(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escaped.push('"');
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            '\u{2028}' | '\u{2029}' => escaped.push_str(&format!("\\u{:04x}", ch as u32)),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}
