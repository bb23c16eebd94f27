//! Rendering of types and values in the type expression syntax.
//!
//! Output parses back to an equal type. Binary operators are parenthesized
//! only where precedence requires it (`|` binds loosest, then `^`, then
//! `&`). An alias is written out as `name = body` the first time it is met
//! and by name afterwards, so recursive types print finitely.

use std::fmt::Write;

use smallvec::SmallVec;

use dynty_stack::ensure_sufficient_stack;

use crate::{AliasMap, IntegerRange, SizeRange, Type, Value};

/// Binding strength of the context a type is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    AnyOf,
    OneOf,
    AllOf,
    Unary,
}

/// Renders types, optionally naming aliases known to a registry.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeFormatter<'a> {
    aliases: Option<&'a AliasMap>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new() -> Self {
        TypeFormatter { aliases: None }
    }

    /// Write types registered in `aliases` by their name.
    pub fn with_aliases(aliases: &'a AliasMap) -> Self {
        TypeFormatter {
            aliases: Some(aliases),
        }
    }

    pub fn format(&self, t: &Type) -> String {
        let mut r = Renderer {
            out: String::new(),
            aliases: self.aliases,
            expanded: SmallVec::new(),
        };
        r.write_type(t, Prec::AnyOf);
        r.out
    }
}

pub(crate) fn value_to_string(v: &Value) -> String {
    let mut r = Renderer {
        out: String::new(),
        aliases: None,
        expanded: SmallVec::new(),
    };
    r.write_value(v);
    r.out
}

struct Renderer<'a> {
    out: String,
    aliases: Option<&'a AliasMap>,
    /// Aliases already written out in full.
    expanded: SmallVec<[usize; 4]>,
}

impl<'a> Renderer<'a> {
    fn write_type(&mut self, t: &Type, prec: Prec) {
        ensure_sufficient_stack(|| self.write_type_inner(t, prec));
    }

    fn write_type_inner(&mut self, t: &Type, prec: Prec) {
        if let Some(name) = self.registered_name(t) {
            self.out.push_str(name);
            return;
        }
        match t {
            Type::Any => self.out.push_str("any"),
            Type::Nil => self.out.push_str("nil"),
            Type::Boolean => self.out.push_str("bool"),
            Type::ExactBoolean(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Type::Integer(r) => self.write_integer_range(r),
            Type::ExactInteger(i) => {
                let _ = write!(self.out, "{i}");
            }
            Type::Float(r) => {
                if r.is_unbounded() {
                    self.out.push_str("float");
                } else {
                    let op = if r.is_inclusive() { ".." } else { "..." };
                    self.write_bounds(r.min(), r.max(), op);
                }
            }
            Type::ExactFloat(f) => {
                let _ = write!(self.out, "{f}");
            }
            Type::String(s) => self.write_sized("string", *s),
            Type::ExactString(s) => write_quoted(&mut self.out, s),
            Type::CiString(s) => {
                self.out.push('~');
                write_quoted(&mut self.out, s);
            }
            Type::Pattern(r) => write_regexp(&mut self.out, r.as_str()),
            Type::Regexp => self.out.push_str("regexp"),
            Type::ExactRegexp(r) => self.write_call("regexp", r.as_str()),
            Type::Timestamp => self.out.push_str("time"),
            Type::ExactTimestamp(ts) => self.write_call("time", &ts.to_string()),
            Type::Binary(s) => self.write_sized("binary", *s),
            Type::ExactBinary(b) => self.write_call("binary", &b.to_hex()),
            Type::Native => self.out.push_str("native"),
            Type::ExactNative(n) => self.write_call("native", n.type_name()),
            Type::Array(a) => {
                self.out.push('[');
                self.write_type(&a.element, Prec::AnyOf);
                self.write_size_params(a.size);
                self.out.push(']');
            }
            Type::Tuple(tuple) => {
                self.out.push('{');
                for (i, e) in tuple.elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.write_type(e, Prec::AnyOf);
                }
                self.out.push('}');
            }
            Type::ExactArray(a) => self.write_value(&Value::Array(a.clone())),
            Type::Map(m) => {
                self.out.push_str("map[");
                self.write_type(&m.key, Prec::AnyOf);
                self.write_size_params(m.size);
                self.out.push(']');
                self.write_type(&m.value, Prec::Unary);
            }
            Type::Struct(s) => {
                self.out.push('{');
                for (i, e) in s.entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    write_key(&mut self.out, &e.key);
                    if !e.required {
                        self.out.push('?');
                    }
                    self.out.push(':');
                    self.write_type(&e.value, Prec::AnyOf);
                }
                if s.additional {
                    if !s.entries.is_empty() {
                        self.out.push(',');
                    }
                    self.out.push_str("...");
                }
                self.out.push('}');
            }
            Type::ExactMap(m) => self.write_value(&Value::Map(m.clone())),
            Type::AllOf(x) => self.write_operator(&x.operands, "&", Prec::AllOf, prec),
            Type::AnyOf(x) => self.write_operator(&x.operands, "|", Prec::AnyOf, prec),
            Type::OneOf(x) => self.write_operator(&x.operands, "^", Prec::OneOf, prec),
            Type::Not(x) => {
                self.out.push('!');
                self.write_type(&x.negated, Prec::Unary);
            }
            Type::Meta(None) => self.out.push_str("type"),
            Type::Meta(Some(inner)) => {
                self.out.push_str("type[");
                self.write_type(inner, Prec::AnyOf);
                self.out.push(']');
            }
            Type::Alias(a) => {
                let id = a.identity();
                match a.target() {
                    Some(target) if !self.expanded.contains(&id) => {
                        self.expanded.push(id);
                        let parens = prec > Prec::AnyOf;
                        if parens {
                            self.out.push('(');
                        }
                        self.out.push_str(a.name());
                        self.out.push_str(" = ");
                        self.write_type(target, Prec::AnyOf);
                        if parens {
                            self.out.push(')');
                        }
                    }
                    _ => self.out.push_str(a.name()),
                }
            }
        }
    }

    /// The registry name of an alias or composite type, if any.
    fn registered_name(&self, t: &Type) -> Option<&'a str> {
        let aliases: &'a AliasMap = self.aliases?;
        if t.identity() == 0 {
            return None;
        }
        aliases.get_name(t)
    }

    fn write_operator(&mut self, operands: &[Type], sep: &str, own: Prec, outer: Prec) {
        let parens = outer > own;
        if parens {
            self.out.push('(');
        }
        // Operands of the same operator were flattened at construction, so
        // only a tighter context is needed for the rest.
        let inner = match own {
            Prec::AnyOf => Prec::OneOf,
            Prec::OneOf => Prec::AllOf,
            Prec::AllOf | Prec::Unary => Prec::Unary,
        };
        for (i, t) in operands.iter().enumerate() {
            if i > 0 {
                self.out.push_str(sep);
            }
            self.write_type(t, inner);
        }
        if parens {
            self.out.push(')');
        }
    }

    fn write_integer_range(&mut self, r: &IntegerRange) {
        if r.is_unbounded() {
            self.out.push_str("int");
        } else {
            self.write_bounds(r.min(), r.max(), "..");
        }
    }

    fn write_bounds<T: std::fmt::Display>(&mut self, min: Option<&T>, max: Option<&T>, op: &str) {
        if let Some(lo) = min {
            let _ = write!(self.out, "{lo}");
        }
        self.out.push_str(op);
        if let Some(hi) = max {
            let _ = write!(self.out, "{hi}");
        }
    }

    fn write_sized(&mut self, name: &str, size: SizeRange) {
        self.out.push_str(name);
        if size.is_unbounded() {
            return;
        }
        let _ = write!(self.out, "[{}", size.min());
        if size.max() != usize::MAX {
            let _ = write!(self.out, ",{}", size.max());
        }
        self.out.push(']');
    }

    /// `,min,max` inside array and map brackets.
    fn write_size_params(&mut self, size: SizeRange) {
        if size.is_unbounded() {
            return;
        }
        let _ = write!(self.out, ",{}", size.min());
        if size.max() != usize::MAX {
            let _ = write!(self.out, ",{}", size.max());
        }
    }

    fn write_call(&mut self, name: &str, arg: &str) {
        self.out.push_str(name);
        self.out.push('[');
        write_quoted(&mut self.out, arg);
        self.out.push(']');
    }

    fn write_value(&mut self, v: &Value) {
        match v {
            Value::Nil => self.out.push_str("nil"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => {
                let _ = write!(self.out, "{i}");
            }
            Value::Float(f) => {
                let _ = write!(self.out, "{f}");
            }
            Value::String(s) => write_quoted(&mut self.out, s),
            Value::Binary(b) => self.write_call("binary", &b.to_hex()),
            Value::Regexp(r) => self.write_call("regexp", r.as_str()),
            Value::Timestamp(ts) => self.write_call("time", &ts.to_string()),
            Value::Native(n) => self.write_call("native", n.type_name()),
            Value::Type(t) => self.write_type(t, Prec::AnyOf),
            Value::Array(a) => {
                self.out.push('{');
                for (i, e) in a.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    ensure_sufficient_stack(|| self.write_value(e));
                }
                self.out.push('}');
            }
            Value::Map(_) | Value::Struct(_) => {
                let Some(map) = v.as_map_like() else { return };
                self.out.push('{');
                for (i, (k, e)) in map.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    ensure_sufficient_stack(|| {
                        self.write_value(k);
                        self.out.push(':');
                        self.write_value(e);
                    });
                }
                self.out.push('}');
            }
        }
    }
}

/// A struct key: bare when it lexes as an identifier, quoted otherwise.
fn write_key(out: &mut String, key: &str) {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_ident {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

pub(crate) fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_regexp(out: &mut String, pattern: &str) {
    out.push('/');
    let mut escaped = false;
    for c in pattern.chars() {
        if c == '/' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out.push('/');
}

#[cfg(test)]
mod tests;
