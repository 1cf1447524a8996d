/*!
This crate provides small, stateless utilities for working with zero-terminated wide (`wchar_t`) strings: bounded copy and concatenation into caller-supplied buffers, suffix and emptiness tests, formatted output into fixed or growing buffers, and conversion to and from narrow codepages.

For more details, see the [additional documentation](doc/index.html).

# Quick Reference

Buffers are plain slices of units.  A slice's length is its capacity, terminator included, and its content ends at the first zero unit (or at the end of the slice, if there is none).  "Absent" strings are `None`.

| Operation | Function | Result |
| ---: | --- | --- |
| Append to a buffer | `concat_into`, `concat_n_into` | `Err` on truncation; the truncated write still happens |
| Copy into a buffer | `copy_into`, `copy_n_into` | `false` on truncation; the truncated copy still happens |
| Suffix test | `ends_with`, `ends_with_ci` | `false` if either side is absent |
| Emptiness test | `is_empty` | `true` if absent or empty |
| Format into a buffer | `wformat_into!`, `format_into` | Units required; buffer always terminated |
| Format into a new string | `wformat!`, `format_alloc` | `Option<WCString>` |
| Narrow to wide | `wide_from_narrow` | `Option<WCString>` |
| Wide to narrow | `narrow_from_wide` | `Option<MbCString>` |
| Debug output | `dbg_outw!`, `debug_emit` | Nothing |

Owned results are `ZString`s, allocated with `calloc` by default, and released when dropped.  `into_ptr` hands them to foreign code, which must then release them with `free`.
*/

pub mod alloc;
#[doc(hidden)] pub mod doc;
pub mod encoding;

mod bounded;
mod ffi;
mod format;
mod predicate;
mod sink;
mod util;
mod zstring;

pub use bounded::{concat_into, concat_n_into, copy_into, copy_n_into, BoundedError};
pub use encoding::conv::{
    narrow_from_wide, narrow_from_wide_ptr, wide_from_narrow, wide_from_narrow_ptr, ConvError,
};
pub use encoding::{Codepage, WChar};
pub use format::{
    concat_alloc, format_alloc, format_alloc_with, format_into, FormatError, Growth, WideCursor,
    STACK_CAPACITY,
};
pub use predicate::{ends_with, ends_with_ci, is_empty};
pub use sink::{debug_emit, DEBUG_CAPACITY, DEBUG_TARGET};
pub use util::{units_eq, units_eq_ci, units_len, WideDisplay};
pub use zstring::{dup_n, MbCString, WCString, WRString, ZString};
