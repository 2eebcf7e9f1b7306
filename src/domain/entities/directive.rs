//! Directive entity - one `= name args...` instruction from a source header

/// A directive parsed from a source file's header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Zero-based line index within the header
    pub line: usize,
    /// Directive name (`require`, `depend_on`, ...)
    pub name: String,
    /// Tokenized arguments
    pub args: Vec<String>,
}

impl Directive {
    pub fn new(line: usize, name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            line,
            name: name.into(),
            args,
        }
    }
}

/// A source split into its comment header and untouched body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSource {
    /// The leading run of comments and blank lines, verbatim
    pub header: String,
    /// Everything after the header, byte-for-byte
    pub body: String,
    /// Directives found in the header, in line order
    pub directives: Vec<Directive>,
}

impl ParsedSource {
    /// Header with each directive line emptied (line breaks kept), followed by the body
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.body.len());
        let mut directive_lines = self.directives.iter().map(|d| d.line).peekable();

        for (index, line) in self.header.split_inclusive('\n').enumerate() {
            if directive_lines.peek() == Some(&index) {
                directive_lines.next();
                if line.ends_with('\n') {
                    out.push('\n');
                }
            } else {
                out.push_str(line);
            }
        }

        out.push_str(&self.body);
        out
    }
}
