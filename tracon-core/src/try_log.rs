use std::fmt;

/// Evaluates `$expr`, yielding the successful value
/// or logging an error and evaluating the `or` expression instead.
#[macro_export]
macro_rules! try_log {
    (
        $expr:expr,
        expect $must:literal $(
            (
                $($must_args:expr),* $(,)?
            )
        )?
        or $never:expr
    ) => {
        match $crate::TryLog::convert_or_log(
            $expr,
            format_args!($must, $($($must_args),*)?),
        ) {
            Some(value) => value,
            None => $never,
        }
    }
}

pub use try_log;

/// [`try_log!`] with `or return`.
#[macro_export]
macro_rules! try_log_return {
    ($expr:expr, expect $must:literal $(, $($must_args:expr),*)? $(,)?) => {
        $crate::try_log!($expr, expect $must $(($($must_args),*))? or return)
    }
}

pub use try_log_return;

/// An expression that can be used for `$expr` in [`try_log!`](crate::try_log!).
pub trait TryLog<T> {
    /// Returns the successful result as `Some`, or log the error with `must`.
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T>;
}

impl<T> TryLog<T> for Option<T> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        if this.is_none() {
            bevy::log::error!("{must}");
        }
        this
    }
}

impl<T, E: fmt::Display> TryLog<T> for Result<T, E> {
    fn convert_or_log(this: Self, must: impl fmt::Display) -> Option<T> {
        match this {
            Ok(value) => Some(value),
            Err(err) => {
                bevy::log::error!("{must}: {err}");
                None
            }
        }
    }
}
