//! Input line tokenization
//!
//! Splits a partial command line into whitespace-delimited tokens while
//! tracking, for each token, its byte offset and whether it was
//! terminated by whitespace. The final token of a line that does not end
//! in whitespace is "in progress": it is never matched against the
//! grammar, only used as a prefix filter for the suggestion list.
//!
//! Quoted spans (single or double) form one token with the quotes
//! stripped, so `"my env"` matches a grammar entry named `my env`. An
//! unmatched quote swallows the rest of the line as one literal
//! in-progress token; broken input degrades, it never errors.

/// One whitespace-delimited unit of the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text with surrounding quotes removed
    pub text: String,

    /// True when the token was terminated by whitespace
    pub is_complete: bool,

    /// Byte offset of the token's first character in the input line
    pub start: usize,
}

impl Token {
    /// Whether the token looks like an option rather than a value.
    pub fn is_flag_like(&self) -> bool {
        self.text.starts_with('-')
    }
}

/// Tokenized view of one input line.
#[derive(Debug, Clone, Default)]
pub struct TokenLine {
    tokens: Vec<Token>,
    prefix_start: usize,
}

impl TokenLine {
    /// Tokenize a raw input line.
    ///
    /// Empty input yields an empty line; there are no error conditions.
    pub fn parse(line: &str) -> Self {
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < line.len() {
            let c = next_char(line, i);
            if c.is_whitespace() {
                i += c.len_utf8();
                continue;
            }
            let (token, end) = scan_token(line, i);
            i = end;
            tokens.push(token);
        }

        let prefix_start = match tokens.last() {
            Some(token) if !token.is_complete => token.start,
            _ => line.len(),
        };
        Self { tokens, prefix_start }
    }

    /// All tokens, in input order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The whitespace-terminated tokens, in input order.
    pub fn completed(&self) -> &[Token] {
        match self.tokens.last() {
            Some(token) if !token.is_complete => &self.tokens[..self.tokens.len() - 1],
            _ => &self.tokens,
        }
    }

    /// The first completed token, which selects the tool grammar.
    pub fn first_completed(&self) -> Option<&Token> {
        self.completed().first()
    }

    /// Text of the in-progress token, or "" when the line ends in
    /// whitespace.
    pub fn prefix(&self) -> &str {
        match self.tokens.last() {
            Some(token) if !token.is_complete => &token.text,
            _ => "",
        }
    }

    /// Byte offset where a completion would be inserted: the start of
    /// the in-progress token, or the end of the line.
    pub fn prefix_start(&self) -> usize {
        self.prefix_start
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn next_char(line: &str, i: usize) -> char {
    line[i..].chars().next().unwrap_or(' ')
}

/// Scan one token starting at a non-whitespace byte offset.
///
/// Returns the token and the byte offset just past it.
fn scan_token(line: &str, start: usize) -> (Token, usize) {
    let mut text = String::new();
    let mut i = start;

    while i < line.len() {
        let c = next_char(line, i);
        if c.is_whitespace() {
            break;
        }
        if c == '"' || c == '\'' {
            let body_start = i + c.len_utf8();
            match line[body_start..].find(c) {
                Some(offset) => {
                    text.push_str(&line[body_start..body_start + offset]);
                    i = body_start + offset + c.len_utf8();
                }
                None => {
                    // Unmatched quote: the rest of the line is one
                    // literal in-progress token, as typed.
                    text.push_str(&line[i..]);
                    i = line.len();
                }
            }
            continue;
        }
        text.push(c);
        i += c.len_utf8();
    }

    let token = Token {
        text,
        is_complete: i < line.len(),
        start,
    };
    (token, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &TokenLine) -> Vec<&str> {
        line.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let line = TokenLine::parse("");
        assert!(line.is_empty());
        assert_eq!(line.prefix(), "");
        assert_eq!(line.prefix_start(), 0);
    }

    #[test]
    fn test_whitespace_only_input() {
        let line = TokenLine::parse("   ");
        assert!(line.is_empty());
        assert_eq!(line.prefix(), "");
        assert_eq!(line.prefix_start(), 3);
    }

    #[test]
    fn test_single_word_in_progress() {
        let line = TokenLine::parse("conda");
        assert_eq!(texts(&line), vec!["conda"]);
        assert!(!line.tokens()[0].is_complete);
        assert!(line.completed().is_empty());
        assert_eq!(line.prefix(), "conda");
        assert_eq!(line.prefix_start(), 0);
    }

    #[test]
    fn test_trailing_space_completes_last_token() {
        let line = TokenLine::parse("conda ");
        assert_eq!(texts(&line), vec!["conda"]);
        assert!(line.tokens()[0].is_complete);
        assert_eq!(line.completed().len(), 1);
        assert_eq!(line.prefix(), "");
        assert_eq!(line.prefix_start(), 6);
    }

    #[test]
    fn test_multiple_tokens_with_prefix() {
        let line = TokenLine::parse("conda i");
        assert_eq!(texts(&line), vec!["conda", "i"]);
        assert_eq!(line.completed().len(), 1);
        assert_eq!(line.prefix(), "i");
        assert_eq!(line.prefix_start(), 6);
    }

    #[test]
    fn test_all_tokens_complete() {
        let line = TokenLine::parse("conda env remove ");
        assert_eq!(texts(&line), vec!["conda", "env", "remove"]);
        assert!(line.tokens().iter().all(|t| t.is_complete));
        assert_eq!(line.prefix(), "");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let line = TokenLine::parse("conda \t  env");
        assert_eq!(texts(&line), vec!["conda", "env"]);
        assert_eq!(line.tokens()[1].start, 9);
        assert_eq!(line.prefix(), "env");
    }

    #[test]
    fn test_start_positions() {
        let line = TokenLine::parse("conda env remove");
        let starts: Vec<usize> = line.tokens().iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0, 6, 10]);
    }

    #[test]
    fn test_first_completed_is_tool_token() {
        assert_eq!(
            TokenLine::parse("conda i").first_completed().unwrap().text,
            "conda"
        );
        assert!(TokenLine::parse("conda").first_completed().is_none());
    }

    #[test]
    fn test_quoted_span_is_one_token() {
        let line = TokenLine::parse("conda activate \"my env\" ");
        assert_eq!(texts(&line), vec!["conda", "activate", "my env"]);
        assert!(line.tokens()[2].is_complete);
        assert_eq!(line.tokens()[2].start, 15);
    }

    #[test]
    fn test_single_quotes() {
        let line = TokenLine::parse("conda activate 'my env'");
        assert_eq!(line.prefix(), "my env");
    }

    #[test]
    fn test_unmatched_quote_degrades_to_literal() {
        let line = TokenLine::parse("conda activate \"my env");
        assert_eq!(texts(&line), vec!["conda", "activate", "\"my env"]);
        assert!(!line.tokens()[2].is_complete);
        assert_eq!(line.prefix(), "\"my env");
        assert_eq!(line.prefix_start(), 15);
    }

    #[test]
    fn test_embedded_quote_joins_token() {
        let line = TokenLine::parse("conda run --cwd \"a b\"/src ");
        assert_eq!(texts(&line), vec!["conda", "run", "--cwd", "a b/src"]);
    }

    #[test]
    fn test_flag_like_tokens() {
        let line = TokenLine::parse("conda list --name -n -");
        let flags: Vec<bool> = line.tokens().iter().map(|t| t.is_flag_like()).collect();
        assert_eq!(flags, vec![false, false, true, true, true]);
    }
}
