use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::error::{Error, Result};

/// A Unicode-style date pattern (`MM/dd/yy`, `h:mm a`) compiled once into
/// chrono's strftime syntax.
///
/// Supported fields: `y yy yyyy`, `M MM MMM MMMM`, `d dd`, `E EEE EEEE`,
/// `H HH`, `h hh`, `m mm`, `s ss`, `a`. Text in single quotes is literal and
/// `''` is a quote. Any other unquoted ASCII letter is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    strftime.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some(q) = chars.next() {
                    if q == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            strftime.push('\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    push_literal(&mut strftime, q);
                }
                if !closed {
                    return Err(invalid("unterminated quoted literal".to_string()));
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                push_literal(&mut strftime, c);
                continue;
            }

            let mut width = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                width += 1;
            }

            let directive = field_directive(c, width).ok_or_else(|| {
                invalid(format!(
                    "unsupported field {:?}",
                    std::iter::repeat_n(c, width).collect::<String>()
                ))
            })?;
            strftime.push_str(directive);
        }

        Ok(Self {
            source: pattern.to_string(),
            strftime,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format<Tz>(&self, dt: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        dt.format(&self.strftime).to_string()
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn field_directive(field: char, width: usize) -> Option<&'static str> {
    let directive = match (field, width) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', 4) => "%B",
        ('d', 1) => "%-d",
        ('d', 2) => "%d",
        ('E', 1..=3) => "%a",
        ('E', 4) => "%A",
        ('H', 1) => "%-H",
        ('H', 2) => "%H",
        ('h', 1) => "%-I",
        ('h', 2) => "%I",
        ('m', 1) => "%-M",
        ('m', 2) => "%M",
        ('s', 1) => "%-S",
        ('s', 2) => "%S",
        ('a', 1..=3) => "%p",
        _ => return None,
    };
    Some(directive)
}
