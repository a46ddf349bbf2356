//! Structured diagnostics for the collection-level codec entry points.
//!
//! The `log_metric!` macro is compiled out of release builds through
//! `#[cfg(debug_assertions)]`, so the hot encode/decode paths pay nothing for it
//! in production.

/// Logs a structured key-value metric line at `debug` level, only in debug builds.
///
/// # Example
/// ```
/// use permalink_codec::log_metric;
/// let features = 4;
/// log_metric!("event" = "encode_features", "features" = &features);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::debug!("PERMALINK_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}
