//! Utility macros shared by the parsing modules.

/// Returns early with an error if a condition is not met.
///
/// Works like `assert!`, but returns `Err($error)` instead of panicking, so a
/// failed check unwinds through `?` and drops every pooled resource on the way.
///
/// # Example
///
/// ```ignore
/// ensure!(!uri.is_empty(), ParseError::MissingUri);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
