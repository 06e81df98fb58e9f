//!
//! Tokenizer for `key="value"` / `key=value` header parameters
//!

use std::{borrow::Cow, fmt::Write, str::CharIndices};

#[derive(Clone, Copy, Debug)]
enum State {
    SeekKey,
    InKey { start: usize },
    SeekEquals { key: (usize, usize) },
    SeekValueStart { key: (usize, usize) },
    InQuotedValue { key: (usize, usize), start: usize, escaped: bool },
    InQuotedEscape { key: (usize, usize), start: usize },
    InBareValue { key: (usize, usize), start: usize },
}

#[inline]
fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

#[inline]
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == ','
}

fn unescape(raw: &str) -> String {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                unescaped.push(next);
            }
        } else {
            unescaped.push(ch);
        }
    }
    unescaped
}

struct ParseIter<'a> {
    /// Characters of the input along with their byte offsets
    chars: CharIndices<'a>,

    /// Reference to the original input
    input: &'a str,

    /// The previous pair ended with a closing quote and has to be followed by a separator
    needs_separator: bool,

    /// Marker whether we encountered any illegal character
    ///
    /// If we did, the iterator will stop yielding any results
    is_broken: bool,
}

impl<'a> ParseIter<'a> {
    fn broken(&mut self) -> Option<Result<(&'a str, Cow<'a, str>), ()>> {
        self.is_broken = true;
        Some(Err(()))
    }

    fn pair(&self, key: (usize, usize), value: Cow<'a, str>) -> (&'a str, Cow<'a, str>) {
        let input = self.input;
        (&input[key.0..key.1], value)
    }
}

impl<'a> Iterator for ParseIter<'a> {
    type Item = Result<(&'a str, Cow<'a, str>), ()>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_broken {
            return None;
        }

        let input = self.input;
        let mut state = State::SeekKey;
        loop {
            let Some((idx, ch)) = self.chars.next() else {
                return match state {
                    State::SeekKey => None,
                    State::InBareValue { key, start } => {
                        Some(Ok(self.pair(key, Cow::Borrowed(&input[start..]))))
                    }
                    _ => self.broken(),
                };
            };

            state = match state {
                State::SeekKey if is_separator(ch) => {
                    self.needs_separator = false;
                    State::SeekKey
                }
                State::SeekKey if is_key_char(ch) && !self.needs_separator => {
                    State::InKey { start: idx }
                }
                State::SeekKey => return self.broken(),

                State::InKey { start } if is_key_char(ch) => State::InKey { start },
                State::InKey { start } if ch == '=' => State::SeekValueStart { key: (start, idx) },
                State::InKey { start } if ch.is_whitespace() => State::SeekEquals { key: (start, idx) },
                State::InKey { .. } => return self.broken(),

                State::SeekEquals { key } if ch.is_whitespace() => State::SeekEquals { key },
                State::SeekEquals { key } if ch == '=' => State::SeekValueStart { key },
                State::SeekEquals { .. } => return self.broken(),

                State::SeekValueStart { key } if ch.is_whitespace() => State::SeekValueStart { key },
                State::SeekValueStart { key } if ch == '"' => State::InQuotedValue {
                    key,
                    start: idx + 1,
                    escaped: false,
                },
                State::SeekValueStart { .. } if ch == ',' => return self.broken(),
                State::SeekValueStart { key } => State::InBareValue { key, start: idx },

                State::InQuotedValue { key, start, .. } if ch == '\\' => {
                    State::InQuotedEscape { key, start }
                }
                State::InQuotedValue { key, start, escaped } if ch == '"' => {
                    let raw = &input[start..idx];
                    let value = if escaped {
                        Cow::Owned(unescape(raw))
                    } else {
                        Cow::Borrowed(raw)
                    };

                    self.needs_separator = true;
                    return Some(Ok(self.pair(key, value)));
                }
                state @ State::InQuotedValue { .. } => state,

                State::InQuotedEscape { key, start } => State::InQuotedValue {
                    key,
                    start,
                    escaped: true,
                },

                State::InBareValue { key, start } if is_separator(ch) => {
                    return Some(Ok(self.pair(key, Cow::Borrowed(&input[start..idx]))));
                }
                State::InBareValue { .. } if ch == '"' => return self.broken(),
                state @ State::InBareValue { .. } => state,
            };
        }
    }
}

/// Parameters of a parsed header value
#[derive(Debug)]
pub struct Params<'a> {
    pairs: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> Params<'a> {
    /// Parse a header value into its parameters
    ///
    /// Returns `None` if the value is malformed or contains a parameter more than once
    pub fn parse(input: &'a str) -> Option<Self> {
        let iter = ParseIter {
            chars: input.char_indices(),
            input,
            needs_separator: false,
            is_broken: false,
        };

        let mut pairs: Vec<(&'a str, Cow<'a, str>)> = Vec::new();
        for pair in iter {
            let (key, value) = pair.ok()?;
            if pairs.iter().any(|(existing, _)| *existing == key) {
                return None;
            }

            pairs.push((key, value));
        }

        Some(Self { pairs })
    }

    /// Value of the parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_ref())
    }
}

/// Strip a leading `Signature` auth scheme from the header value, if present
pub fn strip_scheme(input: &str) -> &str {
    let trimmed = input.trim_start();
    let Some((scheme, rest)) = trimmed.split_once(char::is_whitespace) else {
        return if trimmed.eq_ignore_ascii_case(crate::SCHEME) {
            ""
        } else {
            trimmed
        };
    };

    // `signature = "..."` is a parameter, not the scheme
    if scheme.eq_ignore_ascii_case(crate::SCHEME) && !rest.trim_start().starts_with('=') {
        rest
    } else {
        trimmed
    }
}

/// Write `key="value"` into the buffer, escaping quotes and backslashes
pub fn write_quoted(buffer: &mut String, key: &str, value: &str) {
    let _ = write!(buffer, "{key}=\"");
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            buffer.push('\\');
        }
        buffer.push(ch);
    }
    buffer.push('"');
}
