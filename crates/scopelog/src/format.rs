//! Message rendering.
//!
//! A textual message containing `%` is a printf-style template filled
//! positionally from the arguments. Anything else is rendered as the message
//! followed by every argument, each in its natural string form, separated by
//! single spaces.
//!
//! Template errors never fail a call; they are rendered inline:
//! `%!d(MISSING)` for a verb without an argument, `%!d(string=abc)` for an
//! argument the verb cannot print, `%!(EXTRA int=1, ...)` for unused
//! arguments and `%!(NOVERB)` for a trailing `%`. A width or precision
//! above one million renders `%!(BADWIDTH)` or `%!(BADPREC)` and is ignored.

use std::fmt::Write as _;
use std::iter::Peekable;
use std::str::Chars;

use crate::value::Value;

/// Largest accepted width or precision
const MAX_WIDTH: usize = 1_000_000;

/// Whether `s` should be treated as a template.
pub fn has_format_data(s: &str) -> bool {
    s.contains('%')
}

/// Render a message and its arguments into the record's message text.
pub fn render_message(message: &Value, args: &[Value]) -> String {
    match message.as_text() {
        Some(template) if has_format_data(template) => sprintf(template, args),
        _ => join_values(message, args),
    }
}

fn join_values(message: &Value, args: &[Value]) -> String {
    std::iter::once(message)
        .chain(args)
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
    verb: char,
}

/// Substitute `args` into `template` positionally.
///
/// Supported verbs: `%v %s %q %d %f %F %e %g %t %x %X %o %b %c %%`, with the
/// flags `-`, `+`, `0` and space, a width and a `.precision`.
pub fn sprintf(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let Some(spec) = parse_spec(&mut chars) else {
            out.push_str("%!(NOVERB)");
            break;
        };

        if spec.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if spec.bad_precision {
            out.push_str("%!(BADPREC)");
        }

        if spec.verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                match format_arg(&spec, arg) {
                    Some((body, numeric)) => out.push_str(&pad(&spec, body, numeric)),
                    None => {
                        let _ = write!(out, "%!{}({}={})", spec.verb, arg.type_name(), arg);
                    }
                }
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", spec.verb);
            }
        }
    }

    if next_arg < args.len() {
        let extra = args[next_arg..]
            .iter()
            .map(|arg| format!("{}={}", arg.type_name(), arg))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "%!(EXTRA {})", extra);
    }

    out
}

fn parse_spec(chars: &mut Peekable<Chars<'_>>) -> Option<Spec> {
    let mut spec = Spec::default();

    while let Some(&c) = chars.peek() {
        match c {
            '-' => spec.minus = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            '0' => spec.zero = true,
            _ => break,
        }
        chars.next();
    }

    spec.width = parse_number(chars);
    if spec.width.is_some_and(|width| width > MAX_WIDTH) {
        spec.width = None;
        spec.bad_width = true;
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        match parse_number(chars).unwrap_or(0) {
            precision if precision > MAX_WIDTH => spec.bad_precision = true,
            precision => spec.precision = Some(precision),
        }
    }

    spec.verb = chars.next()?;
    Some(spec)
}

fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut number: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        number = Some(
            number
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit as usize),
        );
        chars.next();
    }
    number
}

/// Render one argument for one verb. Returns the text and whether it is
/// numeric (zero padding applies), or `None` when the verb does not fit.
fn format_arg(spec: &Spec, arg: &Value) -> Option<(String, bool)> {
    let rendered = match (spec.verb, arg) {
        ('v', Value::Int(_) | Value::Uint(_)) => (signed(spec, arg.to_string()), true),
        ('v', Value::Float(f)) => (signed(spec, float_natural(spec, *f)), true),
        ('v', _) => (truncate(spec, arg.to_string()), false),

        ('s', Value::Str(_) | Value::Display(_) | Value::Char(_) | Value::Json(_)) => {
            (truncate(spec, arg.to_string()), false)
        }
        ('q', Value::Str(s) | Value::Display(s)) => (format!("{:?}", s), false),
        ('q', Value::Char(c)) => (format!("{:?}", c), false),

        ('d', Value::Int(v)) => (signed(spec, v.to_string()), true),
        ('d', Value::Uint(v)) => (signed(spec, v.to_string()), true),

        ('f' | 'F', Value::Float(v)) => {
            let precision = spec.precision.unwrap_or(6);
            (signed(spec, format!("{:.*}", precision, v)), true)
        }
        ('e', Value::Float(v)) => {
            let precision = spec.precision.unwrap_or(6);
            (signed(spec, exponent(format!("{:.*e}", precision, v))), true)
        }
        ('g', Value::Float(v)) => (signed(spec, float_natural(spec, *v)), true),

        ('t', Value::Bool(v)) => (v.to_string(), false),

        ('x', Value::Int(v)) => (radix(*v, |u| format!("{:x}", u)), true),
        ('x', Value::Uint(v)) => (format!("{:x}", v), true),
        ('X', Value::Int(v)) => (radix(*v, |u| format!("{:X}", u)), true),
        ('X', Value::Uint(v)) => (format!("{:X}", v), true),
        ('x', Value::Str(s)) => (s.bytes().map(|b| format!("{:02x}", b)).collect(), false),
        ('X', Value::Str(s)) => (s.bytes().map(|b| format!("{:02X}", b)).collect(), false),
        ('o', Value::Int(v)) => (radix(*v, |u| format!("{:o}", u)), true),
        ('o', Value::Uint(v)) => (format!("{:o}", v), true),
        ('b', Value::Int(v)) => (radix(*v, |u| format!("{:b}", u)), true),
        ('b', Value::Uint(v)) => (format!("{:b}", v), true),

        ('c', Value::Char(c)) => (c.to_string(), false),
        ('c', Value::Int(v)) => (codepoint(u32::try_from(*v).ok())?, false),
        ('c', Value::Uint(v)) => (codepoint(u32::try_from(*v).ok())?, false),

        _ => return None,
    };
    Some(rendered)
}

fn signed(spec: &Spec, digits: String) -> String {
    if digits.starts_with('-') {
        digits
    } else if spec.plus {
        format!("+{}", digits)
    } else if spec.space {
        format!(" {}", digits)
    } else {
        digits
    }
}

fn float_natural(spec: &Spec, v: f64) -> String {
    match spec.precision {
        Some(precision) => format!("{:.*}", precision, v),
        None => v.to_string(),
    }
}

fn truncate(spec: &Spec, s: String) -> String {
    match spec.precision {
        Some(precision) => s.chars().take(precision).collect(),
        None => s,
    }
}

fn radix(v: i64, digits: impl Fn(u64) -> String) -> String {
    if v < 0 {
        format!("-{}", digits(v.unsigned_abs()))
    } else {
        digits(v.unsigned_abs())
    }
}

fn codepoint(v: Option<u32>) -> Option<String> {
    v.and_then(char::from_u32).map(|c| c.to_string())
}

/// `1.5e2` -> `1.5e+02`
fn exponent(s: String) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        None => s,
    }
}

fn pad(spec: &Spec, body: String, numeric: bool) -> String {
    let Some(width) = spec.width else {
        return body;
    };
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let fill = width - len;

    if spec.minus {
        format!("{}{}", body, " ".repeat(fill))
    } else if spec.zero && numeric {
        let (sign, digits) = match body.chars().next() {
            Some('+' | '-' | ' ') => body.split_at(1),
            _ => ("", body.as_str()),
        };
        format!("{}{}{}", sign, "0".repeat(fill), digits)
    } else {
        format!("{}{}", " ".repeat(fill), body)
    }
}
