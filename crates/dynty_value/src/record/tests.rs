#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{Integer, Type};

#[derive(Clone, Debug)]
struct Server {
    host: String,
    port: i64,
}

impl Record for Server {
    fn record_name(&self) -> &str {
        "Server"
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["host", "port"]
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "host" => Some(Value::from(self.host.as_str())),
            "port" => Some(Value::from(self.port)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<(), Error> {
        match (name, &value) {
            ("host", Value::String(s)) => self.host = s.to_string(),
            ("port", Value::Int(Integer::Small(p))) => self.port = *p,
            ("host", _) => return Err(Error::not_assignable(&Type::string(), value.clone())),
            ("port", _) => return Err(Error::not_assignable(&Type::integer(), value.clone())),
            _ => {
                return Err(Error::UnknownField {
                    record: "Server".into(),
                    field: name.into(),
                })
            }
        }
        Ok(())
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }
}

fn server() -> StructMap {
    StructMap::new(Server {
        host: "localhost".into(),
        port: 80,
    })
}

#[test]
fn iterates_in_declaration_order() {
    let keys: Vec<Value> = server().iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![Value::from("host"), Value::from("port")]);
}

#[test]
fn equals_a_map_with_the_same_entries() {
    let s = server();
    let m: Map = [
        (Value::from("port"), Value::from(80)),
        (Value::from("host"), Value::from("localhost")),
    ]
    .into_iter()
    .collect();
    assert_eq!(Value::Struct(s.clone()), Value::Map(m.clone()));
    assert_eq!(Value::Struct(s).hash_code(), Value::Map(m).hash_code());
}

#[test]
fn put_through_the_map_protocol() {
    let mut m = server().thawed_copy();
    m.put(&Value::from("port"), Value::from(8080)).unwrap();
    assert_eq!(m.get(&Value::from("port")), Some(Value::from(8080)));

    let err = m.put(&Value::from("user"), Value::from("x")).unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref field, .. } if field == "user"));

    let err = m.put(&Value::from("port"), Value::from("x")).unwrap_err();
    assert!(matches!(err, Error::NotAssignable { .. }));
}

#[test]
fn thawing_does_not_affect_the_frozen_view() {
    let frozen = server();
    let mut thawed = frozen.thawed_copy();
    thawed.put(&Value::from("host"), Value::from("example.com")).unwrap();
    assert_eq!(frozen.get_field("host"), Some(Value::from("localhost")));
    assert_eq!(thawed.freeze().get_field("host"), Some(Value::from("example.com")));
}

#[test]
fn record_views_are_instances_of_struct_types() {
    let t = Type::structure(
        vec![
            crate::StructEntry::new("host", Type::string(), true),
            crate::StructEntry::new("port", Type::integer(), true),
        ],
        false,
    )
    .unwrap();
    assert!(t.instance(&Value::Struct(server())));
}
