//! Conversion between values and already decoded JSON documents.

use dynty_stack::ensure_sufficient_stack;
use serde_json::{Number, Value as Json};

use crate::{Error, Float, Integer, Map, Value};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => number(&n),
            Json::String(s) => Value::from(s),
            Json::Array(items) => ensure_sufficient_stack(|| {
                Value::Array(items.into_iter().map(Value::from).collect())
            }),
            Json::Object(entries) => ensure_sufficient_stack(|| {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::from(k), Value::from(v)))
                        .collect::<Map>(),
                )
            }),
        }
    }
}

fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(Integer::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Int(Integer::from(u))
    } else {
        Value::Float(Float::from(n.as_f64().unwrap_or(f64::NAN)))
    }
}

impl Value {
    /// The JSON form of this value.
    ///
    /// Binaries become hex strings, regexps their pattern and timestamps
    /// RFC 3339 text. Types, natives, non-finite floats, integers beyond 64
    /// bits and maps with non-string keys have no JSON form.
    pub fn to_json(&self) -> Result<Json, Error> {
        Ok(match self {
            Value::Nil => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(Integer::Small(i)) => Json::from(*i),
            Value::Int(big @ Integer::Big(_)) => {
                return Err(Error::NotRepresentable {
                    what: format!("integer {big}"),
                })
            }
            Value::Float(f) => Number::from_f64(f.to_f64())
                .map(Json::Number)
                .ok_or_else(|| Error::NotRepresentable {
                    what: format!("float {f}"),
                })?,
            Value::String(s) => Json::String(s.to_string()),
            Value::Binary(b) => Json::String(b.to_hex()),
            Value::Regexp(r) => Json::String(r.as_str().to_owned()),
            Value::Timestamp(t) => Json::String(t.to_string()),
            Value::Array(a) => Json::Array(ensure_sufficient_stack(|| {
                a.iter().map(Value::to_json).collect::<Result<_, _>>()
            })?),
            Value::Map(_) | Value::Struct(_) => {
                let mut object = serde_json::Map::new();
                if let Some(map) = self.as_map_like() {
                    for (k, v) in map.iter() {
                        let Some(key) = k.as_str() else {
                            return Err(Error::NotRepresentable {
                                what: format!("map key {k}"),
                            });
                        };
                        object.insert(key.to_owned(), ensure_sufficient_stack(|| v.to_json())?);
                    }
                }
                Json::Object(object)
            }
            Value::Type(t) => {
                return Err(Error::NotRepresentable {
                    what: format!("type {t}"),
                })
            }
            Value::Native(n) => {
                return Err(Error::NotRepresentable {
                    what: format!("native {}", n.type_name()),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{Type, Value};

    #[test]
    fn objects_become_maps() {
        let v = Value::from(json!({"a": 1, "b": [true, null, 2.5]}));
        let map = v.as_map().unwrap();
        assert_eq!(map.get_str("a"), Some(&Value::from(1)));
        assert_eq!(
            map.get_str("b").unwrap().to_string(),
            "{true,nil,2.5}"
        );
    }

    #[test]
    fn objects_keep_document_order() {
        let doc = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let v = Value::from(doc.clone());
        let keys: Vec<&str> = v
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&v.to_json().unwrap()).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn unsigned_beyond_i64_stays_integer() {
        let v = Value::from(json!(u64::MAX));
        assert_eq!(v.as_integer().unwrap().to_string(), u64::MAX.to_string());
    }

    #[test]
    fn round_trips_plain_data() {
        let doc = json!({"name": "x", "tags": ["a", "b"], "n": 3, "f": 0.5, "none": null});
        assert_eq!(Value::from(doc.clone()).to_json().unwrap(), doc);
    }

    #[test]
    fn types_have_no_json_form() {
        let v = Value::Type(Type::integer());
        assert!(v.to_json().is_err());
        let v = Value::from(vec![Value::Type(Type::string())]);
        assert!(v.to_json().is_err());
    }
}
