//! Aliases declared or referenced by one parse.
//!
//! A declaration `x = ...` gets its slot before the right-hand side is
//! parsed. A name used before its declaration gets a pending slot that the
//! declaration later takes over; a pending slot still undefined when the
//! parse ends is an unresolved reference.

use dynty_lexer::Span;
use dynty_value::Alias;

#[derive(Default)]
pub(crate) struct Scope {
    declared: Vec<(Alias, Span)>,
    pending: Vec<(Alias, Span)>,
}

impl Scope {
    /// The local slot for `name`, declared or pending.
    pub(crate) fn lookup(&self, name: &str) -> Option<&Alias> {
        self.declared
            .iter()
            .chain(&self.pending)
            .map(|(slot, _)| slot)
            .find(|slot| slot.name() == name)
    }

    /// A pending slot for a name used before its declaration.
    pub(crate) fn forward(&mut self, name: &str, span: Span) -> Alias {
        let slot = Alias::new(name);
        self.pending.push((slot.clone(), span));
        slot
    }

    /// The slot a declaration of `name` binds, or `None` when `name` was
    /// already declared.
    pub(crate) fn declare(&mut self, name: &str, span: Span) -> Option<Alias> {
        if self.declared.iter().any(|(slot, _)| slot.name() == name) {
            return None;
        }
        let slot = match self.pending.iter().position(|(slot, _)| slot.name() == name) {
            Some(i) => self.pending.remove(i).0,
            None => Alias::new(name),
        };
        self.declared.push((slot.clone(), span));
        Some(slot)
    }

    /// The first reference that never received a declaration.
    pub(crate) fn unresolved(&self) -> Option<&(Alias, Span)> {
        self.pending.first()
    }

    /// Declared slots in declaration order.
    pub(crate) fn into_declared(self) -> Vec<(Alias, Span)> {
        self.declared
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::Scope;
    use dynty_lexer::Span;

    #[test]
    fn declaration_takes_over_forward_slot() {
        let mut scope = Scope::default();
        let forward = scope.forward("x", Span::new(0, 1));
        let declared = scope.declare("x", Span::new(4, 5)).unwrap();
        assert!(forward.ptr_eq(&declared));
        assert!(scope.unresolved().is_none());
        assert!(scope.lookup("x").unwrap().ptr_eq(&forward));
    }

    #[test]
    fn second_declaration_is_refused() {
        let mut scope = Scope::default();
        assert!(scope.declare("x", Span::new(0, 1)).is_some());
        assert!(scope.declare("x", Span::new(8, 9)).is_none());
        assert_eq!(scope.into_declared().len(), 1);
    }

    #[test]
    fn undeclared_forward_is_unresolved() {
        let mut scope = Scope::default();
        scope.forward("y", Span::new(3, 4));
        let (slot, span) = scope.unresolved().unwrap();
        assert_eq!(slot.name(), "y");
        assert_eq!(*span, Span::new(3, 4));
    }
}
