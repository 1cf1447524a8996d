/*!
Formatted output into wide buffers.

Formatting goes through Rust's own `fmt` machinery, so arguments are type-checked at the call site.  Use the `wformat!` and `wformat_into!` macros rather than calling these functions with hand-built `fmt::Arguments`.  Wide strings can be interpolated with `WideDisplay`.
*/
use std::fmt::{self, Write};

use log::{trace, warn};
use thiserror::Error;

use crate::alloc::{Allocator, Malloc};
use crate::encoding::conv::os;
use crate::encoding::WChar;
use crate::util::WideDisplay;
use crate::zstring::{WCString, ZString};

/// Capacity, in units, of the on-stack buffer `format_alloc` tries first.
pub const STACK_CAPACITY: usize = 256;

/**
A `Display` or `Debug` implementation reported an error part way through rendering.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("formatting failed after {written} units")]
pub struct FormatError {
    pub written: usize,
}

/**
How `format_alloc` grows its buffer when the output does not fit.

Below `doubling_limit` units, capacity doubles on each retry; from there on it grows by `increment` units.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Growth {
    pub doubling_limit: usize,
    pub increment: usize,
}

impl Default for Growth {
    fn default() -> Self {
        Growth {
            doubling_limit: 4 * 1024,
            increment: 1024,
        }
    }
}

impl Growth {
    /**
    The capacity to retry with after `cap` proved too small.
    */
    pub fn next(&self, cap: usize) -> usize {
        if cap < self.doubling_limit {
            cap.saturating_add(cap.max(1))
        } else {
            cap.saturating_add(self.increment.max(1))
        }
    }
}

/**
A write cursor over a bounded span of wide units.

Writes are truncated at the end of the span, but the cursor keeps counting how many units the complete output *would* need.  A character which needs two units is never split; once anything has been dropped, nothing further is written.

The cursor does not terminate the output.
*/
pub struct WideCursor<'a> {
    buf: &'a mut [WChar],
    pos: usize,
    required: usize,
    truncated: bool,
}

impl<'a> WideCursor<'a> {
    pub fn new(buf: &'a mut [WChar]) -> Self {
        WideCursor {
            buf,
            pos: 0,
            required: 0,
            truncated: false,
        }
    }

    /// Units actually written.
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Units the complete output needs, excluding any terminator.
    pub fn required(&self) -> usize {
        self.required
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<'a> Write for WideCursor<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut tmp = [0; 2];
        for c in s.chars() {
            let units = os::encode_char(c, &mut tmp);
            if !self.truncated && units.len() <= self.remaining() {
                self.buf[self.pos..self.pos + units.len()].copy_from_slice(units);
                self.pos += units.len();
            } else {
                self.truncated = true;
            }
            self.required = self.required.saturating_add(units.len());
        }
        Ok(())
    }
}

/**
Renders `args` into `out`, which is always left terminated (unless its capacity is zero).

Returns the number of units the complete output needs, not counting the terminator.  A result `>= out.len()` means the output was truncated.  A character which needs two units is never split by the truncation; if it does not fit whole, it is dropped.

# Failure

If a formatting implementation fails, `out` holds whatever was rendered up to that point, terminated, and the error is returned.
*/
pub fn format_into(out: &mut [WChar], args: fmt::Arguments) -> Result<usize, FormatError> {
    let capacity = out.len();
    // The last slot is reserved for the terminator.
    let mut cursor = WideCursor::new(&mut out[..capacity.saturating_sub(1)]);
    let result = fmt::write(&mut cursor, args);
    let (written, required) = (cursor.written(), cursor.required());

    if capacity > 0 {
        out[written] = 0;
    }

    match result {
        Ok(()) => Ok(required),
        Err(_) => Err(FormatError { written }),
    }
}

/**
Renders `args` into a freshly allocated wide string.  See `format_alloc_with`.
*/
pub fn format_alloc(args: fmt::Arguments) -> Option<WCString> {
    format_alloc_with::<Malloc>(Growth::default(), args)
}

/**
Renders `args` into a freshly allocated wide string, using allocator `A`.

Rendering is first attempted in a `STACK_CAPACITY`-unit buffer on the stack, which is duplicated if it suffices.  Otherwise, a heap buffer is allocated and grown according to `growth`, re-rendering each time, until the output fits.

The result is always independently owned.  Returns `None` if an allocation fails or a formatting implementation reports an error.
*/
pub fn format_alloc_with<A>(growth: Growth, args: fmt::Arguments) -> Option<ZString<WChar, A>>
where
    A: Allocator,
{
    let mut stack = [0; STACK_CAPACITY];
    match format_into(&mut stack, args) {
        Ok(required) if required < STACK_CAPACITY => {
            return ZString::new(&stack[..required])
                .map_err(|err| warn!("format_alloc: {}", err))
                .ok();
        },
        Ok(_) => (),
        Err(err) => {
            warn!("format_alloc: {}", err);
            return None;
        },
    }

    let mut cap = STACK_CAPACITY;
    loop {
        cap = growth.next(cap);
        trace!("format_alloc: retrying with {} units", cap);

        let mut buf = match ZString::<WChar, A>::zeroed(cap) {
            Ok(buf) => buf,
            Err(err) => {
                warn!("format_alloc: {} units: {}", cap, err);
                return None;
            },
        };

        match format_into(buf.buffer_mut(), args) {
            Ok(required) if required < cap => return Some(buf),
            Ok(_) => continue,
            Err(err) => {
                warn!("format_alloc: {}", err);
                return None;
            },
        }
    }
}

/**
Concatenates two wide strings into a new owned string.  Either may be absent, in which case it is treated as empty.
*/
pub fn concat_alloc(a: Option<&[WChar]>, b: Option<&[WChar]>) -> Option<WCString> {
    let a = WideDisplay(a.unwrap_or(&[]));
    let b = WideDisplay(b.unwrap_or(&[]));
    format_alloc(format_args!("{}{}", a, b))
}

/**
Renders its arguments into a freshly allocated wide string.

Accepts the same syntax as `format!`, and evaluates to `Option<WCString>`.
*/
#[macro_export]
macro_rules! wformat {
    ($($arg:tt)*) => {
        $crate::format_alloc(::std::format_args!($($arg)*))
    };
}

/**
Renders its arguments into a wide buffer.

The first argument is the destination, a `&mut [WChar]`; the rest are the same as for `format!`.  Evaluates to `Result<usize, FormatError>`; see `format_into`.
*/
#[macro_export]
macro_rules! wformat_into {
    ($out:expr, $($arg:tt)*) => {
        $crate::format_into($out, ::std::format_args!($($arg)*))
    };
}
