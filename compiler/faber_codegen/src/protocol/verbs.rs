//! Return-verb unification.
//!
//! Stream verbs (`fiunt`, `fient`) lower to an inner generator yielding
//! tagged `item` / `error` / `done` records, unwrapped by a helper. The
//! `done` record is appended by the wrapper, never by user code. Single
//! verbs (`fit`, `fiet`) lower to a plain or async function.

use faber_ir::ReturnVerb;

use crate::scope::FunctionMode;

/// Where a `cede` appears.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CedePosition {
    /// The whole expression statement.
    Statement,
    /// Inside a larger expression; its value is used.
    Value,
}

/// How one `cede` lowers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CedeLowering {
    /// Yield an `item` record to the stream wrapper.
    Item,
    /// Native `yield`.
    Yield,
    /// Native `await`.
    Await,
    /// Not meaningful in this function.
    Invalid(&'static str),
}

pub fn cede(mode: FunctionMode, position: CedePosition) -> CedeLowering {
    match mode {
        FunctionMode::Verb(ReturnVerb::Fiunt) => CedeLowering::Item,
        FunctionMode::Verb(ReturnVerb::Fiet) => CedeLowering::Await,
        FunctionMode::Verb(ReturnVerb::Fient) => match position {
            CedePosition::Statement => CedeLowering::Item,
            CedePosition::Value => CedeLowering::Await,
        },
        FunctionMode::Verb(ReturnVerb::Fit) => {
            CedeLowering::Invalid("in a `fit` function; declare it `fiunt` or `fiet`")
        }
        FunctionMode::Native {
            is_async,
            is_generator,
        } => match (is_async, is_generator, position) {
            (_, true, CedePosition::Statement) | (false, true, CedePosition::Value) => {
                CedeLowering::Yield
            }
            (true, _, _) => CedeLowering::Await,
            (false, false, _) => {
                CedeLowering::Invalid("in a function that is neither `futura` nor `cursor`")
            }
        },
        FunctionMode::TopLevel => CedeLowering::Await,
    }
}

/// How `redde value` lowers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReturnLowering {
    /// Native `return value`.
    Return,
    /// Emit the value as a final `item` record, then stop the generator.
    ItemThenStop,
}

pub fn redde(mode: FunctionMode) -> ReturnLowering {
    if mode.stream_verb().is_some() {
        ReturnLowering::ItemThenStop
    } else {
        ReturnLowering::Return
    }
}

/// How `iace error` lowers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ThrowLowering {
    /// Native raise/throw.
    Raise,
    /// Emit an `error` record, then stop; the wrapper raises on the caller side.
    ErrorThenStop,
}

pub fn iace(mode: FunctionMode) -> ThrowLowering {
    if mode.stream_verb().is_some() {
        ThrowLowering::ErrorThenStop
    } else {
        ThrowLowering::Raise
    }
}

/// Function-level wrapping chosen once on entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wrapping {
    /// Native function syntax; no helper involved.
    None,
    /// Inner generator unwrapped by the sync stream helper.
    Stream,
    /// Inner async generator unwrapped by the async stream helper.
    AsyncStream,
}

pub fn wrapping(mode: FunctionMode) -> Wrapping {
    match mode.stream_verb() {
        Some(ReturnVerb::Fient) => Wrapping::AsyncStream,
        Some(_) => Wrapping::Stream,
        None => Wrapping::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faber_ir::FnModifiers;

    const NATIVE_GEN: FunctionMode = FunctionMode::Native {
        is_async: false,
        is_generator: true,
    };

    #[test]
    fn stream_verbs_yield_items() {
        let fiunt = FunctionMode::Verb(ReturnVerb::Fiunt);
        assert_eq!(cede(fiunt, CedePosition::Statement), CedeLowering::Item);
        assert_eq!(redde(fiunt), ReturnLowering::ItemThenStop);
        assert_eq!(iace(fiunt), ThrowLowering::ErrorThenStop);
        assert_eq!(wrapping(fiunt), Wrapping::Stream);
    }

    #[test]
    fn fient_awaits_in_value_position() {
        let fient = FunctionMode::Verb(ReturnVerb::Fient);
        assert_eq!(cede(fient, CedePosition::Value), CedeLowering::Await);
        assert_eq!(cede(fient, CedePosition::Statement), CedeLowering::Item);
        assert_eq!(wrapping(fient), Wrapping::AsyncStream);
    }

    #[test]
    fn verbless_functions_never_wrap() {
        let modifiers = FnModifiers {
            is_async: true,
            is_generator: true,
        };
        let mode = FunctionMode::for_function(None, modifiers);
        assert_eq!(wrapping(mode), Wrapping::None);
        assert_eq!(redde(mode), ReturnLowering::Return);
        assert_eq!(cede(NATIVE_GEN, CedePosition::Value), CedeLowering::Yield);
    }

    #[test]
    fn fit_rejects_cede() {
        let fit = FunctionMode::Verb(ReturnVerb::Fit);
        assert!(matches!(
            cede(fit, CedePosition::Statement),
            CedeLowering::Invalid(_)
        ));
        assert_eq!(wrapping(fit), Wrapping::None);
    }
}
