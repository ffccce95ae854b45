use bibmerge_core::{BibEntry, EntryType, Field};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no @entry found")]
    NoEntry,
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

const NON_ENTRY_BLOCKS: [&str; 3] = ["comment", "preamble", "string"];

/// Parses the first entry of a BibTeX document. Text outside `@` blocks and
/// `@comment`, `@preamble` and `@string` blocks are skipped, as BibTeX itself
/// does.
pub fn parse_entry(input: &str) -> Result<BibEntry, ParseError> {
    let mut parser = Parser { input, pos: 0 };
    loop {
        let start = input[parser.pos..]
            .find('@')
            .ok_or(ParseError::NoEntry)?;
        parser.pos += start + 1;

        let checkpoint = parser.pos;
        let kind = parser.identifier("entry type")?;
        if !NON_ENTRY_BLOCKS.contains(&kind.to_lowercase().as_str()) {
            parser.pos = checkpoint;
            return parser.entry();
        }
        parser.skip_block()?;
    }
}

/// Writes `entry` as a BibTeX entry with fields in entry order.
pub fn write_entry(entry: &BibEntry) -> String {
    let mut out = format!(
        "@{}{{{},\n",
        entry.entry_type().name(),
        entry.citation_key().unwrap_or("")
    );
    for (field, value) in entry.fields() {
        if braces_balance(value) {
            out.push_str(&format!("  {} = {{{}}},\n", field.name(), value));
        } else {
            out.push_str(&format!("  {} = \"{}\",\n", field.name(), value));
        }
    }
    out.push_str("}\n");
    out
}

/// Whether `value` can sit inside `{...}`: no `}` closes more than was opened.
fn braces_balance(value: &str) -> bool {
    let mut depth = 0usize;
    for c in value.chars() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return false,
            '}' => depth -= 1,
            _ => {}
        }
    }
    depth == 0
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn entry(&mut self) -> Result<BibEntry, ParseError> {
        let kind = self.identifier("entry type")?;
        self.skip_whitespace();
        let close = match self.bump() {
            Some('{') => '}',
            Some('(') => ')',
            _ => return Err(self.error("expected '{' or '(' after entry type")),
        };

        let mut entry = BibEntry::new(EntryType::parse(kind));
        self.skip_whitespace();
        let key = self.take_while(|c| c != ',' && c != close && !c.is_whitespace());
        entry.set_citation_key(key);

        loop {
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(c) if c == close => return Ok(entry),
                Some(c) => return Err(self.error(&format!("unexpected '{c}'"))),
                None => return Err(self.error("unterminated entry")),
            }

            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(entry);
            }

            let name = self.identifier("field name")?;
            self.skip_whitespace();
            if self.bump() != Some('=') {
                return Err(self.error(&format!("expected '=' after field '{name}'")));
            }
            self.skip_whitespace();
            let value = self.value(close)?;
            entry.set_field(Field::new(name), normalize_whitespace(&value));
        }
    }

    fn value(&mut self, close: char) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('{') => {
                    self.bump();
                    value.push_str(&self.delimited('}')?);
                }
                Some('"') => {
                    self.bump();
                    value.push_str(&self.delimited('"')?);
                }
                Some(_) => {
                    let bare =
                        self.take_while(|c| c != ',' && c != close && c != '#' && !c.is_whitespace());
                    if bare.is_empty() {
                        return Err(self.error("expected field value"));
                    }
                    value.push_str(bare);
                }
                None => return Err(self.error("unterminated field value")),
            }

            self.skip_whitespace();
            if self.peek() == Some('#') {
                self.bump();
                self.skip_whitespace();
                continue;
            }
            return Ok(value);
        }
    }

    /// Reads up to the matching `end`, keeping nested braces verbatim.
    fn delimited(&mut self, end: char) -> Result<String, ParseError> {
        let mut depth = 0usize;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' if depth > 0 => depth -= 1,
                c if c == end && depth == 0 => return Ok(out),
                _ => {}
            }
            out.push(c);
        }
        Err(self.error("unbalanced braces in field value"))
    }

    /// Steps over the body of a block whose type was just read. `@comment`
    /// without a delimiter runs to the end of its line.
    fn skip_block(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => {
                self.bump();
                self.delimited('}')?;
            }
            Some('(') => {
                self.bump();
                self.delimited(')')?;
            }
            _ => {
                self.take_while(|c| c != '\n');
            }
        }
        Ok(())
    }

    fn identifier(&mut self, what: &str) -> Result<&'a str, ParseError> {
        let ident = self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'));
        if ident.is_empty() {
            return Err(self.error(&format!("expected {what}")));
        }
        Ok(ident)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::Syntax {
            line: self.input[..self.pos].matches('\n').count() + 1,
            message: message.to_string(),
        }
    }
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
