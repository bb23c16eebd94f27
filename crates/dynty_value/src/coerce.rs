//! Building values of a given type from loosely typed arguments.

use std::sync::Arc;

use crate::{Array, Binary, Error, Float, Integer, Regexp, Timestamp, Type, Value};

impl Type {
    /// Convert `arg` into an instance of `self`.
    ///
    /// Conversions follow the kind of the target: numbers parse from
    /// strings and convert between integer and float, strings are built
    /// from any scalar, booleans from `"true"`/`"false"`, regexps and
    /// timestamps from their text, binaries from hex, maps from key/value
    /// pair arrays and arrays from maps. The result must be an instance of
    /// `self`; otherwise this fails with [`Error::NotAssignable`].
    pub fn new_value(&self, arg: Value) -> Result<Value, Error> {
        let target = self.resolved();
        let candidate = convert(target, &arg)?.unwrap_or(arg);
        if target.instance(&candidate) {
            Ok(candidate)
        } else {
            Err(Error::not_assignable(self, candidate))
        }
    }
}

/// The converted argument, `None` when no conversion applies.
fn convert(target: &Type, arg: &Value) -> Result<Option<Value>, Error> {
    let converted = match target {
        Type::Integer(_) | Type::ExactInteger(_) => to_integer(arg).map(Value::Int),
        Type::Float(_) | Type::ExactFloat(_) => to_float(arg).map(Value::Float),
        Type::String(_) | Type::ExactString(_) | Type::CiString(_) | Type::Pattern(_) => {
            to_text(arg).map(|s| Value::String(Arc::from(s)))
        }
        Type::Boolean | Type::ExactBoolean(_) => to_bool(arg).map(Value::Bool),
        Type::Regexp | Type::ExactRegexp(_) => match arg.as_str() {
            Some(s) => Some(Value::Regexp(Regexp::new(s)?)),
            None => None,
        },
        Type::Timestamp | Type::ExactTimestamp(_) => match arg.as_str() {
            Some(s) => Some(Value::Timestamp(Timestamp::parse(s)?)),
            None => None,
        },
        Type::Binary(_) | Type::ExactBinary(_) => match arg {
            Value::String(s) => Some(Value::Binary(Binary::from_hex(s)?)),
            Value::Array(a) => to_bytes(a).map(|b| Value::Binary(Binary::from(b))),
            _ => None,
        },
        Type::Map(_) | Type::Struct(_) | Type::ExactMap(_) => match arg {
            Value::Array(a) => Some(Value::Map(a.to_map()?)),
            Value::Struct(s) => Some(Value::Map(s.to_map())),
            _ => None,
        },
        Type::Array(_) | Type::Tuple(_) | Type::ExactArray(_) => match arg {
            Value::Map(m) => Some(Value::Array(m.to_array())),
            Value::Array(_) => None,
            other => Some(Value::Array(Array::new(vec![other.clone()]))),
        },
        Type::Meta(_) => match arg {
            Value::Type(_) => None,
            other => Some(Value::Type(other.type_of())),
        },
        _ => None,
    };
    Ok(converted)
}

fn to_integer(arg: &Value) -> Option<Integer> {
    match arg {
        Value::Float(f) => {
            let v = f.to_f64().trunc();
            #[allow(
                clippy::cast_possible_truncation,
                reason = "range is checked before the cast"
            )]
            let small = (v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64).then(|| v as i64);
            small.map(Integer::from)
        }
        Value::String(s) => Integer::parse(s.trim()),
        Value::Bool(b) => Some(Integer::from(i64::from(*b))),
        _ => None,
    }
}

fn to_float(arg: &Value) -> Option<Float> {
    match arg {
        Value::Int(i) => Some(Float::from(i.to_f64())),
        Value::String(s) => Float::parse(s.trim()),
        Value::Bool(b) => Some(Float::from(if *b { 1.0 } else { 0.0 })),
        _ => None,
    }
}

fn to_text(arg: &Value) -> Option<String> {
    match arg {
        Value::String(_) => None,
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Regexp(r) => Some(r.as_str().to_owned()),
        Value::Timestamp(t) => Some(t.to_string()),
        Value::Binary(b) => Some(b.to_hex()),
        other => Some(other.to_string()),
    }
}

fn to_bool(arg: &Value) -> Option<bool> {
    match arg {
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Int(i) => Some(*i != Integer::from(0)),
        _ => None,
    }
}

fn to_bytes(a: &Array) -> Option<Vec<u8>> {
    a.iter()
        .map(|v| v.as_i64().and_then(|i| u8::try_from(i).ok()))
        .collect()
}

#[cfg(test)]
mod tests;
