//! Glob syntax tree
//!
//! Rule text is parsed in a single pass into a small list of [`Token`]s and
//! lowered once into a regular expression. Malformed syntax never fails: an
//! unterminated `[` or `{` is taken literally and parsing resumes right
//! after it.

/// One element of a parsed glob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text, `/` included
    Literal(String),
    /// `?`: one character other than `/`
    AnyChar,
    /// `*`: any run of characters other than `/`
    AnyRun,
    /// `**`: any number of path segments. `dir` is set when the stars were
    /// followed by `/`, in which case zero segments are allowed as well.
    Recursive { dir: bool },
    /// `[abc]`, `[a-z]`, `[^abc]` or `[!abc]`
    Class { negated: bool, items: Vec<ClassItem> },
    /// `{a,b,c}`; each alternative is a glob of its own
    Alternation(Vec<Vec<Token>>),
}

/// Member of a character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassItem {
    Char(char),
    Range(char, char),
}

/// A parsed glob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    tokens: Vec<Token>,
}

impl Glob {
    /// Parse glob text. Never fails.
    pub fn parse(text: &str) -> Self {
        let mut parser = Parser {
            chars: text.chars().collect(),
            pos: 0,
        };
        Self {
            tokens: parser.sequence(false),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Lower to an unanchored regular expression fragment
    pub fn to_regex(&self) -> String {
        let mut out = String::new();
        lower(&self.tokens, &mut out);
        out
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn sequence(&mut self, in_group: bool) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(c) = self.peek() {
            if in_group && (c == ',' || c == '}') {
                break;
            }
            self.pos += 1;

            match c {
                '\\' => {
                    let escaped = match self.peek() {
                        Some(next) => {
                            self.pos += 1;
                            next
                        },
                        None => '\\',
                    };
                    push_literal(&mut tokens, escaped);
                },
                '?' => tokens.push(Token::AnyChar),
                '*' => {
                    if self.peek() == Some('*') {
                        while self.peek() == Some('*') {
                            self.pos += 1;
                        }
                        let dir = self.peek() == Some('/');
                        if dir {
                            self.pos += 1;
                        }
                        tokens.push(Token::Recursive { dir });
                    } else {
                        tokens.push(Token::AnyRun);
                    }
                },
                '[' => match self.class() {
                    Some(token) => tokens.push(token),
                    None => push_literal(&mut tokens, '['),
                },
                '{' => match self.alternation() {
                    Some(token) => tokens.push(token),
                    None => push_literal(&mut tokens, '{'),
                },
                other => push_literal(&mut tokens, other),
            }
        }

        tokens
    }

    /// Parse a class body after its `[`. Restores the position and returns
    /// `None` when the class is never closed.
    fn class(&mut self) -> Option<Token> {
        let start = self.pos;
        let negated = matches!(self.peek(), Some('^') | Some('!'));
        if negated {
            self.pos += 1;
        }

        let mut items = Vec::new();
        let mut first = true;
        loop {
            let Some(mut c) = self.peek() else {
                self.pos = start;
                return None;
            };
            self.pos += 1;

            // a `]` right after the opening bracket is a member, not the end
            if c == ']' && !first {
                break;
            }
            first = false;

            if c == '\\' {
                let Some(next) = self.peek() else {
                    self.pos = start;
                    return None;
                };
                self.pos += 1;
                c = next;
            }

            let range_end = match (self.peek(), self.chars.get(self.pos + 1)) {
                (Some('-'), Some(&end)) if end != ']' => Some(end),
                _ => None,
            };
            match range_end {
                Some(end) => {
                    self.pos += 2;
                    if c <= end {
                        items.push(ClassItem::Range(c, end));
                    } else {
                        items.extend([ClassItem::Char(c), ClassItem::Char('-'), ClassItem::Char(end)]);
                    }
                },
                None => items.push(ClassItem::Char(c)),
            }
        }

        Some(Token::Class { negated, items })
    }

    /// Parse a brace group after its `{`. Restores the position and returns
    /// `None` when the group is never closed.
    fn alternation(&mut self) -> Option<Token> {
        let start = self.pos;
        let mut alternatives = Vec::new();

        loop {
            alternatives.push(self.sequence(true));
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Some(Token::Alternation(alternatives));
                },
                _ => {
                    self.pos = start;
                    return None;
                },
            }
        }
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}

fn lower(tokens: &[Token], out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(&regex::escape(text)),
            Token::AnyChar => out.push_str("[^/]"),
            Token::AnyRun => out.push_str("[^/]*"),
            Token::Recursive { dir: true } => out.push_str("(?:.*/)?"),
            Token::Recursive { dir: false } => out.push_str(".*"),
            Token::Class { negated, items } => {
                out.push('[');
                if *negated {
                    out.push('^');
                }
                for item in items {
                    match *item {
                        ClassItem::Char(c) => push_class_char(out, c),
                        ClassItem::Range(from, to) => {
                            push_class_char(out, from);
                            out.push('-');
                            push_class_char(out, to);
                        },
                    }
                }
                // a negated class still never crosses a separator
                if *negated {
                    out.push('/');
                }
                out.push(']');
            },
            Token::Alternation(alternatives) => {
                out.push_str("(?:");
                for (index, alternative) in alternatives.iter().enumerate() {
                    if index > 0 {
                        out.push('|');
                    }
                    lower(alternative, out);
                }
                out.push(')');
            },
        }
    }
}

fn push_class_char(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
