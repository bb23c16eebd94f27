//! Identifiers: built-in types, alias declarations and alias references.

use dynty_lexer::{Token, TokenKind};
use dynty_value::{Alias, Binary, Regexp, Timestamp, Type};

use super::Grammar;
use crate::{ParseError, ParseErrorKind};

/// Names that always denote a built-in type.
const BUILTINS: &[&str] = &[
    "any",
    "nil",
    "bool",
    "boolean",
    "true",
    "false",
    "int",
    "integer",
    "float",
    "string",
    "binary",
    "regexp",
    "time",
    "timestamp",
    "type",
    "native",
    "map",
];

pub(crate) fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

impl Grammar<'_, '_, '_> {
    pub(super) fn named(&mut self) -> Result<Type, ParseError> {
        let token = self.cursor.advance();
        if self.cursor.check(TokenKind::Equals) {
            return self.declaration(&token);
        }
        match &*token.text {
            "any" => Ok(Type::Any),
            "nil" => Ok(Type::Nil),
            "bool" | "boolean" => Ok(Type::Boolean),
            "true" => Ok(Type::ExactBoolean(true)),
            "false" => Ok(Type::ExactBoolean(false)),
            "int" | "integer" => Ok(Type::integer()),
            "float" => Ok(Type::float()),
            "native" => Ok(Type::Native),
            "string" => {
                if !self.cursor.eat(TokenKind::LBracket) {
                    return Ok(Type::string());
                }
                let size = self.size_params()?;
                self.expect(TokenKind::RBracket, "`,` or `]`")?;
                Ok(Type::sized_string(size))
            }
            "binary" => self.binary(),
            "regexp" => match self.string_param()? {
                None => Ok(Type::Regexp),
                Some(arg) => {
                    let re = self.construct(Regexp::new(&arg.text), arg.span)?;
                    Ok(Type::ExactRegexp(re))
                }
            },
            "time" | "timestamp" => match self.string_param()? {
                None => Ok(Type::Timestamp),
                Some(arg) => {
                    let ts = self.construct(Timestamp::parse(&arg.text), arg.span)?;
                    Ok(Type::ExactTimestamp(ts))
                }
            },
            "type" => {
                if !self.cursor.eat(TokenKind::LBracket) {
                    return Ok(Type::meta(None));
                }
                let inner = self.any_of()?;
                self.expect(TokenKind::RBracket, "`]`")?;
                Ok(Type::meta(Some(inner)))
            }
            "map" => self.map(),
            _ => Ok(self.reference(&token)),
        }
    }

    /// `binary`, `binary[min(,max)]` or `binary["hex"]`.
    fn binary(&mut self) -> Result<Type, ParseError> {
        if !self.cursor.eat(TokenKind::LBracket) {
            return Ok(Type::binary());
        }
        if matches!(
            self.cursor.current_kind(),
            TokenKind::String | TokenKind::RawString
        ) {
            let hex = self.cursor.advance();
            let bytes = self.construct(Binary::from_hex(&hex.text), hex.span)?;
            self.expect(TokenKind::RBracket, "`]`")?;
            return Ok(Type::ExactBinary(bytes));
        }
        let size = self.size_params()?;
        self.expect(TokenKind::RBracket, "`,` or `]`")?;
        Ok(Type::sized_binary(size))
    }

    /// An optional `["text"]` argument.
    fn string_param(&mut self) -> Result<Option<Token>, ParseError> {
        if !self.cursor.eat(TokenKind::LBracket) {
            return Ok(None);
        }
        let arg = self.expect_string("a string")?;
        self.expect(TokenKind::RBracket, "`]`")?;
        Ok(Some(arg))
    }

    /// `name = type`. The slot exists before the right-hand side is parsed
    /// so the right-hand side can refer to it.
    fn declaration(&mut self, name: &Token) -> Result<Type, ParseError> {
        if is_builtin(&name.text) {
            let kind = ParseErrorKind::BuiltinRedefined {
                name: name.text.to_string(),
            };
            return Err(self.error_at(kind, name.span));
        }
        let Some(slot) = self.scope.declare(&name.text, name.span) else {
            let kind = ParseErrorKind::AliasRedefined {
                name: name.text.to_string(),
            };
            return Err(self.error_at(kind, name.span));
        };
        self.cursor.advance();
        let target = self.any_of()?;
        if reaches_unguarded(&target, &slot) {
            let kind = ParseErrorKind::SelfAlias {
                name: name.text.to_string(),
            };
            return Err(self.error_at(kind, name.span));
        }
        self.construct(slot.define(target), name.span)?;
        tracing::trace!(alias = %name.text, "alias declared");
        Ok(Type::Alias(slot))
    }

    /// A local slot, a registered alias, or a forward reference.
    fn reference(&mut self, name: &Token) -> Type {
        if let Some(slot) = self.scope.lookup(&name.text) {
            return Type::Alias(slot.clone());
        }
        if let Some(registered) = self.adder.get_type(&name.text) {
            return registered.clone();
        }
        Type::Alias(self.scope.forward(&name.text, name.span))
    }
}

/// Whether `slot` can be reached from `t` through aliases and set operators
/// alone, without passing a collection or struct. Such a declaration would
/// match any value, e.g. `x = int | x`.
fn reaches_unguarded(t: &Type, slot: &Alias) -> bool {
    let mut pending = vec![t];
    let mut seen: Vec<&Alias> = Vec::new();
    while let Some(current) = pending.pop() {
        match current {
            Type::Alias(alias) => {
                if alias.ptr_eq(slot) {
                    return true;
                }
                if seen.iter().any(|s| s.ptr_eq(alias)) {
                    continue;
                }
                seen.push(alias);
                pending.extend(alias.target());
            }
            Type::AllOf(x) => pending.extend(x.operands()),
            Type::AnyOf(x) => pending.extend(x.operands()),
            Type::OneOf(x) => pending.extend(x.operands()),
            Type::Not(x) => pending.push(x.negated()),
            _ => {}
        }
    }
    false
}
