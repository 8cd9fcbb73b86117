//! Rule description templates.
//!
//! A description may contain positional `%`-style placeholders that are filled
//! in when a message is prepared:
//!
//! | Placeholder | Accepts                                    |
//! |-------------|--------------------------------------------|
//! | `%s`        | any argument                               |
//! | `%r`        | any argument, text is quoted               |
//! | `%d`, `%i`  | integers (floats are truncated)            |
//! | `%f`        | integers and floats, six decimal places    |
//! | `%%`        | a literal `%`, consumes no argument        |
//!
//! Between `%` and the conversion a placeholder may carry flags (`-` left
//! align, `0` zero pad, `+` and space for the sign of numbers, `#` to keep the
//! decimal point of `%.0f`), a minimum width and a precision, as in `%-10s`,
//! `%5d` or `%.1f`. For text the precision truncates; for `%d` it is a
//! minimum digit count.
//!
//! The template is parsed once when the rule is constructed, so a malformed
//! description is rejected before any message is produced and the number of
//! expected arguments is known up front.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%([-+ #0]*)(\d*)(?:\.(\d*))?(.?)").expect("placeholder pattern is valid")
});

/// Errors produced while parsing or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// `%` followed by a character that is not a known conversion.
    #[error("unsupported format character '{found}' at index {index}")]
    UnsupportedConversion { found: char, index: usize },

    /// Template ends with a lone `%`.
    #[error("incomplete format")]
    Incomplete,

    /// Fewer arguments than placeholders.
    #[error("not enough arguments for format string (expected {expected}, got {given})")]
    NotEnoughArguments { expected: usize, given: usize },

    /// More arguments than placeholders.
    #[error("not all arguments converted during string formatting (expected {expected}, got {given})")]
    TooManyArguments { expected: usize, given: usize },

    /// Numeric argument has no integer value, e.g. NaN for `%d`.
    #[error("%{conversion} format: cannot convert {value} to an integer (argument {index})")]
    NotConvertible {
        index: usize,
        conversion: char,
        value: String,
    },

    /// Width or precision does not fit in memory.
    #[error("width or precision too big at index {index}")]
    TooBig { index: usize },

    /// Argument kind does not fit its placeholder.
    #[error("%{conversion} format: a number is required, not {kind} (argument {index})")]
    TypeMismatch {
        index: usize,
        conversion: char,
        kind: &'static str,
    },
}

/// Conversion requested by a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%s`
    Str,
    /// `%r`
    Repr,
    /// `%d` or `%i`
    Int,
    /// `%f`
    Float,
}

impl Conversion {
    fn from_char(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Str),
            'r' => Some(Self::Repr),
            'd' | 'i' => Some(Self::Int),
            'f' => Some(Self::Float),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Str => 's',
            Self::Repr => 'r',
            Self::Int => 'd',
            Self::Float => 'f',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alternate: bool,
}

impl Flags {
    fn parse(text: &str) -> Self {
        let mut flags = Flags::default();
        for c in text.chars() {
            match c {
                '-' => flags.left = true,
                '0' => flags.zero = true,
                '+' => flags.plus = true,
                ' ' => flags.space = true,
                '#' => flags.alternate = true,
                _ => {}
            }
        }
        flags
    }
}

/// One parsed `%` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    conversion: Conversion,
    flags: Flags,
    width: usize,
    precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder(Spec),
}

/// A positional argument for a message description.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl MessageArg {
    fn kind(&self) -> &'static str {
        match self {
            MessageArg::Str(_) => "str",
            MessageArg::Int(_) => "int",
            MessageArg::Float(_) => "float",
        }
    }
}

impl std::fmt::Display for MessageArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageArg::Str(s) => write!(f, "{}", s),
            MessageArg::Int(i) => write!(f, "{}", i),
            // Whole floats keep one decimal so 2.0 does not read as an integer
            MessageArg::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            MessageArg::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        MessageArg::Str(value.to_string())
    }
}

impl From<String> for MessageArg {
    fn from(value: String) -> Self {
        MessageArg::Str(value)
    }
}

impl From<&String> for MessageArg {
    fn from(value: &String) -> Self {
        MessageArg::Str(value.clone())
    }
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        MessageArg::Int(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        MessageArg::Int(value.into())
    }
}

impl From<u32> for MessageArg {
    fn from(value: u32) -> Self {
        MessageArg::Int(value.into())
    }
}

impl From<usize> for MessageArg {
    fn from(value: usize) -> Self {
        MessageArg::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MessageArg {
    fn from(value: f64) -> Self {
        MessageArg::Float(value)
    }
}

/// Parsed rule description.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl DescriptionTemplate {
    /// Parse a description, validating every placeholder.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(raw) {
            let (Some(whole), Some(conv)) = (caps.get(0), caps.get(4)) else {
                continue;
            };
            literal.push_str(&raw[last..whole.start()]);
            last = whole.end();

            let Some(c) = conv.as_str().chars().next() else {
                return Err(TemplateError::Incomplete);
            };
            if c == '%' {
                literal.push('%');
                continue;
            }
            let conversion = Conversion::from_char(c).ok_or(TemplateError::UnsupportedConversion {
                found: c,
                index: conv.start(),
            })?;

            let number = |group: usize| -> Result<Option<usize>, TemplateError> {
                match caps.get(group) {
                    None => Ok(None),
                    Some(m) if m.as_str().is_empty() => Ok(Some(0)),
                    Some(m) => m
                        .as_str()
                        .parse()
                        .map(Some)
                        .map_err(|_| TemplateError::TooBig { index: m.start() }),
                }
            };
            let spec = Spec {
                conversion,
                flags: Flags::parse(caps.get(1).map_or("", |m| m.as_str())),
                width: number(2)?.unwrap_or(0),
                precision: number(3)?,
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(spec));
        }

        literal.push_str(&raw[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The description exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of arguments the template consumes.
    pub fn arity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count()
    }

    /// Substitute `args` positionally.
    pub fn render(&self, args: &[MessageArg]) -> Result<String, TemplateError> {
        let expected = self.arity();
        if args.len() < expected {
            return Err(TemplateError::NotEnoughArguments {
                expected,
                given: args.len(),
            });
        }
        if args.len() > expected {
            return Err(TemplateError::TooManyArguments {
                expected,
                given: args.len(),
            });
        }

        let mut out = String::with_capacity(self.raw.len());
        let mut args = args.iter().enumerate();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(spec) => {
                    if let Some((index, arg)) = args.next() {
                        out.push_str(&convert(spec, index, arg)?);
                    }
                }
            }
        }
        Ok(out)
    }
}

fn convert(spec: &Spec, index: usize, arg: &MessageArg) -> Result<String, TemplateError> {
    let type_mismatch = || TemplateError::TypeMismatch {
        index,
        conversion: spec.conversion.as_char(),
        kind: arg.kind(),
    };

    let (sign, body) = match (spec.conversion, arg) {
        (Conversion::Str, arg) => return Ok(pad_text(spec, &arg.to_string())),
        (Conversion::Repr, MessageArg::Str(s)) => return Ok(pad_text(spec, &format!("'{}'", s))),
        (Conversion::Repr, arg) => return Ok(pad_text(spec, &arg.to_string())),
        (Conversion::Int | Conversion::Float, MessageArg::Str(_)) => return Err(type_mismatch()),
        (Conversion::Int, MessageArg::Int(i)) => (*i < 0, int_digits(spec, i.unsigned_abs())),
        (Conversion::Int, MessageArg::Float(x)) => {
            let value = float_to_int(*x).ok_or_else(|| TemplateError::NotConvertible {
                index,
                conversion: spec.conversion.as_char(),
                value: x.to_string(),
            })?;
            (value < 0, int_digits(spec, value.unsigned_abs()))
        }
        (Conversion::Float, MessageArg::Int(i)) => float_parts(spec, *i as f64),
        (Conversion::Float, MessageArg::Float(x)) => float_parts(spec, *x),
    };

    let sign = if sign {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    };
    Ok(pad_number(spec, sign, &body))
}

/// Truncate toward zero, or `None` when the value has no `i64` counterpart.
fn float_to_int(x: f64) -> Option<i64> {
    let truncated = x.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn int_digits(spec: &Spec, magnitude: u64) -> String {
    let digits = magnitude.to_string();
    match spec.precision {
        Some(p) if p > digits.len() => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    }
}

fn float_parts(spec: &Spec, x: f64) -> (bool, String) {
    if x.is_nan() {
        return (false, "nan".to_string());
    }
    if x.is_infinite() {
        return (x < 0.0, "inf".to_string());
    }
    let precision = spec.precision.unwrap_or(6);
    let mut body = format!("{:.*}", precision, x.abs());
    if precision == 0 && spec.flags.alternate {
        body.push('.');
    }
    (x.is_sign_negative(), body)
}

fn pad_text(spec: &Spec, text: &str) -> String {
    let text: String = match spec.precision {
        Some(p) => text.chars().take(p).collect(),
        None => text.to_string(),
    };
    let fill = spec.width.saturating_sub(text.chars().count());
    if spec.flags.left {
        format!("{}{}", text, " ".repeat(fill))
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}

fn pad_number(spec: &Spec, sign: &str, body: &str) -> String {
    let fill = spec.width.saturating_sub(sign.len() + body.len());
    let numeric = body.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if spec.flags.left {
        format!("{}{}{}", sign, body, " ".repeat(fill))
    } else if spec.flags.zero && numeric {
        format!("{}{}{}", sign, "0".repeat(fill), body)
    } else {
        format!("{}{}{}", " ".repeat(fill), sign, body)
    }
}

impl std::fmt::Display for DescriptionTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
