//! Macros for building log-call argument lists.

/// Build a `Vec<LogArg>` from heterogeneous expressions.
///
/// Each expression is converted with `LogArg::from`, so strings, numbers,
/// booleans and `serde_json` values can be mixed freely.
///
/// # Examples
///
/// ```rust
/// use gelf_transport::{LogArg, gelf_args};
/// use serde_json::json;
///
/// let args = gelf_args!["order placed", json!({"order_id": 17}), 3];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[0], LogArg::from("order placed"));
/// ```
#[macro_export]
macro_rules! gelf_args {
    () => {
        ::std::vec::Vec::<$crate::LogArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogArg::from($arg)),+]
    };
}
