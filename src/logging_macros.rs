//! Format-style logging macros over the process-wide client.
//!
//! Each macro accepts either a single message expression or `format!`-style
//! arguments, optionally preceded by `name = <expr>,` to override the default
//! source name for that call. The macros evaluate to the call's
//! [`Delivery`](crate::Delivery).
//!
//! The macros are prefixed with `loglib_` to avoid collision with the `log`
//! crate's identically named macros.
//!
//! # Examples
//!
//! ```rust,ignore
//! loglib::logger().set_default_name("billing");
//! loglib_info!("server started on port {}", 8080);
//! loglib_error!(name = "billing.db", "connection lost");
//! ```

/// Log at `DEBUG` through the process-wide client.
#[macro_export]
macro_rules! loglib_debug {
    ($($arg:tt)+) => {
        $crate::__loglib_impl!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log at `INFO` through the process-wide client.
#[macro_export]
macro_rules! loglib_info {
    ($($arg:tt)+) => {
        $crate::__loglib_impl!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Log at `WARNING` through the process-wide client.
#[macro_export]
macro_rules! loglib_warning {
    ($($arg:tt)+) => {
        $crate::__loglib_impl!($crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log at `ERROR` through the process-wide client.
#[macro_export]
macro_rules! loglib_error {
    ($($arg:tt)+) => {
        $crate::__loglib_impl!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at `FATAL` through the process-wide client. Never filtered.
#[macro_export]
macro_rules! loglib_fatal {
    ($($arg:tt)+) => {
        $crate::__loglib_impl!($crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Internal implementation macro; not part of the public API.
///
/// The `name = ...` arms must precede the plain ones because `name = x` also
/// parses as an assignment expression.
#[doc(hidden)]
#[macro_export]
macro_rules! __loglib_impl {
    ($level:expr, name = $name:expr, $message:expr) => {
        $crate::logger().log(
            $level,
            ::std::convert::AsRef::<str>::as_ref(&$message),
            ::std::option::Option::Some(::std::convert::AsRef::<str>::as_ref(&$name)),
        )
    };
    ($level:expr, name = $name:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::logger().log(
            $level,
            &::std::format!($fmt, $($arg)+),
            ::std::option::Option::Some(::std::convert::AsRef::<str>::as_ref(&$name)),
        )
    };
    ($level:expr, $message:expr) => {
        $crate::logger().log(
            $level,
            ::std::convert::AsRef::<str>::as_ref(&$message),
            ::std::option::Option::None,
        )
    };
    ($level:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::logger().log(
            $level,
            &::std::format!($fmt, $($arg)+),
            ::std::option::Option::None,
        )
    };
}
