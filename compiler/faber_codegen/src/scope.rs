//! Lowering context passed by value through every recursive call.
//!
//! A `Scope` is `Copy`: nested calls receive a modified copy and the
//! caller's value is never touched, so depth and mode are restored on every
//! exit path without any save/restore bookkeeping.

use faber_ir::{FnModifiers, ReturnVerb};

/// Which value-production protocol governs the function body being lowered.
///
/// At most one return verb is active because the verb lives in a single
/// enum variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionMode {
    /// Module level, outside any function.
    TopLevel,
    /// A function without a return verb: native syntax, no wrapping.
    Native { is_async: bool, is_generator: bool },
    /// A function declared with `fit`, `fiunt`, `fiet` or `fient`.
    Verb(ReturnVerb),
}

impl FunctionMode {
    /// Mode for a function declaration. A return verb selects the verb
    /// path; otherwise the modifiers select native syntax.
    pub const fn for_function(verb: Option<ReturnVerb>, modifiers: FnModifiers) -> Self {
        match verb {
            Some(verb) => FunctionMode::Verb(verb),
            None => FunctionMode::Native {
                is_async: modifiers.is_async,
                is_generator: modifiers.is_generator,
            },
        }
    }

    /// Mode for a lambda body.
    pub const fn for_lambda(is_async: bool) -> Self {
        FunctionMode::Native {
            is_async,
            is_generator: false,
        }
    }

    /// Whether the lowered function is declared `async` in the target.
    pub const fn is_async(self) -> bool {
        match self {
            FunctionMode::Native { is_async, .. } => is_async,
            FunctionMode::Verb(verb) => verb.is_async(),
            FunctionMode::TopLevel => false,
        }
    }

    /// The stream verb whose body must be wrapped, if any.
    pub const fn stream_verb(self) -> Option<ReturnVerb> {
        match self {
            FunctionMode::Verb(verb) if verb.is_stream() => Some(verb),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    /// Indentation level of statements lowered in this scope.
    pub depth: usize,
    pub mode: FunctionMode,
    /// Inside a loop body of the current function.
    pub in_loop: bool,
}

impl Scope {
    pub const fn top() -> Self {
        Scope {
            depth: 0,
            mode: FunctionMode::TopLevel,
            in_loop: false,
        }
    }

    /// One indentation level deeper, same function.
    #[must_use]
    pub const fn nested(self) -> Self {
        Scope {
            depth: self.depth + 1,
            ..self
        }
    }

    #[must_use]
    pub const fn enter_loop(self) -> Self {
        Scope {
            depth: self.depth + 1,
            in_loop: true,
            ..self
        }
    }

    /// Body of a new function: one level deeper, fresh mode, no loop.
    #[must_use]
    pub const fn enter_function(self, mode: FunctionMode) -> Self {
        Scope {
            depth: self.depth + 1,
            mode,
            in_loop: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_wins_over_modifiers() {
        let modifiers = FnModifiers {
            is_async: true,
            is_generator: true,
        };
        assert_eq!(
            FunctionMode::for_function(Some(ReturnVerb::Fit), modifiers),
            FunctionMode::Verb(ReturnVerb::Fit)
        );
        assert!(!FunctionMode::for_function(Some(ReturnVerb::Fit), modifiers).is_async());
        assert_eq!(
            FunctionMode::for_function(None, modifiers),
            FunctionMode::Native {
                is_async: true,
                is_generator: true
            }
        );
    }

    #[test]
    fn nested_scopes_leave_the_parent_untouched() {
        let top = Scope::top();
        let body = top.enter_function(FunctionMode::Verb(ReturnVerb::Fiunt));
        let inner = body.enter_loop().nested();
        assert_eq!(inner.depth, 3);
        assert!(inner.in_loop);
        assert_eq!(inner.mode.stream_verb(), Some(ReturnVerb::Fiunt));
        assert_eq!(top, Scope::top());
        let lambda = inner.enter_function(FunctionMode::for_lambda(false));
        assert!(!lambda.in_loop);
        assert_eq!(lambda.mode.stream_verb(), None);
    }
}
