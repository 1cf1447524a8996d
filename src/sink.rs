/*!
Debug output.
*/
use std::fmt;

use crate::encoding::WChar;
use crate::format::format_into;

/// Capacity, in units, of the buffer `debug_emit` renders into.  Longer messages are cut short.
pub const DEBUG_CAPACITY: usize = 4096;

/// The `log` target debug messages are sent to, where `OutputDebugStringW` is unavailable.
pub const DEBUG_TARGET: &str = "wstrutil::debug";

/**
Renders `args` and sends the result to the platform debug sink.

Messages longer than `DEBUG_CAPACITY - 1` units are silently truncated.  Failure is not reported.
*/
pub fn debug_emit(args: fmt::Arguments) {
    let mut buf = [0; DEBUG_CAPACITY];
    let _ = format_into(&mut buf, args);
    emit(&buf);
}

#[cfg(windows)]
fn emit(msg: &[WChar]) {
    debug_assert!(msg.contains(&0));
    unsafe { crate::ffi::OutputDebugStringW(msg.as_ptr()) }
}

#[cfg(all(not(windows), feature = "log-sink"))]
fn emit(msg: &[WChar]) {
    log::debug!(target: DEBUG_TARGET, "{}", crate::util::WideDisplay(msg));
}

#[cfg(all(not(windows), not(feature = "log-sink")))]
fn emit(msg: &[WChar]) {
    eprintln!("{}", crate::util::WideDisplay(msg));
}

/**
Renders its arguments, as with `format!`, and sends them to the platform debug sink.
*/
#[macro_export]
macro_rules! dbg_outw {
    ($($arg:tt)*) => {
        $crate::debug_emit(::std::format_args!($($arg)*))
    };
}
