use crate::ParserError;

/// Parser that can parse a `&str`
/// 
/// `line` and `column` are 0-based, `column` counts bytes from the start of the current line.
pub struct StrParser<'a> {
    pub line   : usize,
    pub column : usize,
    pub string : &'a str
}

impl<'a> StrParser<'a> {
    /// Create a new parser
    pub fn new(string: &'a str) -> Self {
        Self { line: 0, column: 0, string }
    }

    /// Create a parser for a single line of a larger document
    pub fn for_line(string: &'a str, line: usize) -> Self {
        Self { line, column: 0, string }
    }

    /// Try to consume a given character
    pub fn consume_char(&mut self, ch: char) -> bool {
        if self.string.starts_with(ch) {
            self.consume_count(ch.len_utf8());
            true
        } else {
            false
        }
    }

    /// Try to consume a given string
    pub fn consume_str(&mut self, s: &str) -> bool {
        if self.string.starts_with(s) {
            self.consume_count(s.len());
            true
        } else {
            false
        }
    }

    /// Consume `count` bytes
    pub fn consume_count(&mut self, count: usize) {
        let s = &self.string[..count];
        match s.rfind('\n') {
            Some(idx) => {
                self.line += s.matches('\n').count();
                self.column = count - idx - 1;
            },
            None => self.column += count,
        }
        self.string = &self.string[count..];
    }

    /// Skip to the next end-of-line, the newline itself is not consumed
    pub fn consume_to_eol(&mut self) {
        let idx = self.string.find('\n').unwrap_or(self.string.len());
        self.consume_count(idx);
    }

    /// Consume whitespace, newlines are only consumed when `include_newline` is set
    pub fn consume_whitespace(&mut self, include_newline: bool) {
        let idx = self.string.find(|ch: char| !ch.is_whitespace() || (!include_newline && ch == '\n')).unwrap_or(self.string.len());
        self.consume_count(idx);
    }
    
    /// Move the parser to the end (finish parsing)
    pub fn end(&mut self) {
        self.consume_count(self.string.len());
    }

    /// Check if there is still data to parse
    pub fn can_parse(&self) -> bool {
        !self.string.is_empty()
    }

    /// Create an error at the current line and column
    pub fn error(&self, msg: &'static str) -> ParserError {
        ParserError { line: self.line, column: self.column, msg }
    }

    /// Extract a substring between a starting and ending delimiter on the current line.
    /// 
    /// Delimiters preceded by a `\` are skipped, the delimiters themselves are consumed but not returned.
    pub fn extract_string(&mut self, start_delimiter: &str, end_delimiter: &str) -> Option<&'a str> {
        if !self.string.starts_with(start_delimiter) {
            return None;
        }

        let body = &self.string[start_delimiter.len()..];
        let mut search_from = 0;
        let end = loop {
            let idx = search_from + body[search_from..].find(end_delimiter)?;
            if idx == 0 || body.as_bytes()[idx - 1] != b'\\' {
                break idx;
            }
            search_from = idx + end_delimiter.len();
        };

        let res = &body[..end];
        if res.contains('\n') {
            return None;
        }
        self.consume_count(start_delimiter.len() + end + end_delimiter.len());
        Some(res)
    }

    /// Extract until a character is reached, the character itself is not consumed
    pub fn extract_until(&mut self, delimiter: char) -> &'a str {
        let idx = self.string.find(delimiter).unwrap_or(self.string.len());
        let res = &self.string[..idx];
        self.consume_count(idx);
        res
    }

    /// Extract until the first character matching `pred`, the character itself is not consumed
    pub fn extract_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let idx = self.string.find(|ch: char| !pred(ch)).unwrap_or(self.string.len());
        let res = &self.string[..idx];
        self.consume_count(idx);
        res
    }

    /// Split the remaining text into fields on `separator`, returning the byte span of each field relative to the current position.
    /// 
    /// The parser is moved to the end.
    pub fn split_fields(&mut self, separator: char) -> Vec<(usize, usize)> {
        let base = self.column;
        let mut spans = Vec::new();
        loop {
            let start = self.column - base;
            self.extract_until(separator);
            spans.push((start, self.column - base));
            if !self.consume_char(separator) {
                return spans;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut parser = StrParser::new("ab\ncd");
        assert!(parser.consume_str("ab"));
        assert_eq!((parser.line, parser.column), (0, 2));
        assert!(parser.consume_char('\n'));
        assert_eq!((parser.line, parser.column), (1, 0));
        assert_eq!(parser.extract_until('d'), "c");
        assert_eq!(parser.error("oops"), ParserError { line: 1, column: 1, msg: "oops" });
    }

    #[test]
    fn extracts_escaped_strings() {
        let mut parser = StrParser::new(r#""a\"b" rest"#);
        assert_eq!(parser.extract_string("\"", "\""), Some(r#"a\"b"#));
        assert_eq!(parser.string, " rest");
    }

    #[test]
    fn splits_fields() {
        let mut parser = StrParser::new("0041;A;;Lu");
        let spans = parser.split_fields(';');
        assert_eq!(spans, vec![(0, 4), (5, 6), (7, 7), (8, 10)]);
        assert!(!parser.can_parse());
    }
}
