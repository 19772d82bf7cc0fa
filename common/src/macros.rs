//! Logging shortcuts.
//!
//! Plain progress and failures go through the `tracing` macros directly. A
//! finished operation is announced with [`success!`](crate::success), which
//! tags the event so the terminal formatter can render it with its own symbol.

/// Target attached to every event emitted by [`success!`](crate::success).
pub const SUCCESS_TARGET: &str = "wattbox::success";

#[doc(hidden)]
pub use tracing as __tracing;

/// Emits an INFO event marking a completed operation.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::macros::__tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}
