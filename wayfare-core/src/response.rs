//! Outcome conversion traits.

use crate::{error::BoxError, hook::HookOutcome};

/// Trait for converting a closure hook's output into a [`HookOutcome`].
///
/// # Default Implementations
///
/// - `()` → Proceed
/// - `bool` → `true` = Proceed, `false` = Cancel
/// - `HookOutcome` → As is
/// - `Option<T>` → `None` = Proceed, `Some(t)` delegates
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be turned into a `HookOutcome`",
    label = "missing `IntoOutcome` implementation",
    note = "Hooks may return `()`, `bool`, `HookOutcome`, `Option<_>` or `Result<_, _>`."
)]
pub trait IntoOutcome {
    /// Convert the output into an outcome or an error.
    fn into_outcome(self) -> Result<HookOutcome, BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(HookOutcome::Proceed)
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(if self {
            HookOutcome::Proceed
        } else {
            HookOutcome::Cancel
        })
    }
}

impl IntoOutcome for HookOutcome {
    fn into_outcome(self) -> Result<HookOutcome, BoxError> {
        Ok(self)
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> Result<HookOutcome, BoxError> {
        match self {
            Some(t) => t.into_outcome(),
            None => Ok(HookOutcome::Proceed),
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<HookOutcome, BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_maps_false_to_cancel() {
        assert_eq!(true.into_outcome().unwrap(), HookOutcome::Proceed);
        assert_eq!(false.into_outcome().unwrap(), HookOutcome::Cancel);
    }

    #[test]
    fn test_unit_and_none_proceed() {
        assert_eq!(().into_outcome().unwrap(), HookOutcome::Proceed);
        assert_eq!(None::<bool>.into_outcome().unwrap(), HookOutcome::Proceed);
        assert_eq!(Some(false).into_outcome().unwrap(), HookOutcome::Cancel);
    }

    #[test]
    fn test_result_propagates_error() {
        let failed: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = failed.into_outcome().unwrap_err();
        assert_eq!(err.to_string(), "boom");

        let ok: Result<HookOutcome, BoxError> = Ok(HookOutcome::Cancel);
        assert_eq!(ok.into_outcome().unwrap(), HookOutcome::Cancel);
    }
}
