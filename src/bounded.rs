/*!
Bounded copy and concatenation into caller-supplied buffers.

The destination's capacity is the length of the slice, terminator included.  Both operations always leave the destination terminated, and both perform a truncated write when the source does not fit, *as well as* reporting the truncation.  Callers can detect the truncation without losing the partial data.
*/
use std::cmp;

use thiserror::Error;

use crate::encoding::WChar;
use crate::util::units_len;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum BoundedError {
    /// The destination's content already fills its capacity; nothing was written.
    #[error("destination is full: {len} units in a capacity of {capacity}")]
    Full { len: usize, capacity: usize },
    /// The source was cut short; the destination holds what fit.
    #[error("source truncated: {written} of {requested} units written")]
    Truncated { written: usize, requested: usize },
}

/**
Appends the zero-terminated `src` to the zero-terminated content of `dst`.

An absent `src` is treated as the empty string.  See `concat_n_into`.
*/
pub fn concat_into<'a>(dst: &'a mut [WChar], src: Option<&[WChar]>) -> Result<&'a mut [WChar], BoundedError> {
    let src = src.unwrap_or(&[]);
    concat_n_into(dst, src, units_len(src))
}

/**
Appends up to `src_len` units of `src` to the zero-terminated content of `dst`.

Copying also stops at a zero unit in `src`, or at the end of the slice.  On success, returns `dst`.

# Failure

If the content of `dst` already fills its capacity (there is no terminator anywhere in it), returns `BoundedError::Full` and `dst` is not touched.

If `src_len` units do not fit in the remaining room, as many as fit are appended and terminated, and `BoundedError::Truncated` is returned.
*/
pub fn concat_n_into<'a>(dst: &'a mut [WChar], src: &[WChar], src_len: usize) -> Result<&'a mut [WChar], BoundedError> {
    let capacity = dst.len();
    let len = units_len(dst);
    if capacity <= len {
        return Err(BoundedError::Full { len, capacity });
    }

    let window = cmp::min(src_len.saturating_add(1), capacity - len);
    copy_window(&mut dst[len..len + window], src);

    if src_len >= window {
        let written = units_len(&dst[len..]);
        return Err(BoundedError::Truncated { written, requested: src_len });
    }
    Ok(dst)
}

/**
Copies the zero-terminated `src` into `dst`.  See `copy_n_into`.
*/
#[must_use]
pub fn copy_into(dst: &mut [WChar], src: &[WChar]) -> bool {
    copy_n_into(dst, src, units_len(src))
}

/**
Copies up to `src_len` units of `src` into `dst`, replacing its content.

Copying also stops at a zero unit in `src`, or at the end of the slice.  The copy is always performed, truncated if need be, and `dst` is always left terminated.

Returns `true` iff nothing was truncated, *i.e.* `src_len < dst.len()`.  A zero-capacity `dst` cannot hold even the terminator; nothing is written and the result is `false`.
*/
#[must_use]
pub fn copy_n_into(dst: &mut [WChar], src: &[WChar], src_len: usize) -> bool {
    let capacity = dst.len();
    if capacity == 0 {
        return false;
    }

    let window = cmp::min(src_len.saturating_add(1), capacity);
    copy_window(&mut dst[..window], src);

    src_len < capacity
}

/*
`wcsncpy` into `window`, then force the last slot to zero.
*/
fn copy_window(window: &mut [WChar], src: &[WChar]) {
    let n = cmp::min(units_len(src), window.len());
    window[..n].copy_from_slice(&src[..n]);
    window[n..].fill(0);
    if let Some(last) = window.last_mut() {
        *last = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_wide;

    fn buf(content: &str, capacity: usize) -> Vec<WChar> {
        let mut v = encode_wide(content);
        v.resize(capacity, 0);
        v
    }

    fn content(units: &[WChar]) -> String {
        crate::util::WideDisplay(units).to_string()
    }

    #[test]
    fn test_concat_fits() {
        let mut dst = buf("foo", 8);
        let src = encode_wide("bar");
        assert!(concat_into(&mut dst, Some(&src[..])).is_ok());
        assert_eq!(content(&dst), "foobar");
    }

    #[test]
    fn test_concat_exact_fit() {
        let mut dst = buf("foo", 7);
        let src = encode_wide("bar");
        assert!(concat_into(&mut dst, Some(&src[..])).is_ok());
        assert_eq!(dst[6], 0);
        assert_eq!(content(&dst), "foobar");
    }

    #[test]
    fn test_concat_truncates_but_writes() {
        let mut dst = buf("foo", 6);
        let src = encode_wide("barbaz");
        assert_eq!(
            concat_into(&mut dst, Some(&src[..])).err(),
            Some(BoundedError::Truncated { written: 2, requested: 6 })
        );
        assert_eq!(content(&dst), "fooba");
        assert_eq!(dst[5], 0);
    }

    #[test]
    fn test_concat_absent_source() {
        let mut dst = buf("foo", 4);
        assert!(concat_into(&mut dst, None).is_ok());
        assert_eq!(content(&dst), "foo");
    }

    #[test]
    fn test_concat_into_full_destination() {
        // No terminator anywhere: the content consumes the whole capacity.
        let mut dst = encode_wide("full");
        let before = dst.clone();
        let src = encode_wide("x");
        assert_eq!(
            concat_into(&mut dst, Some(&src[..])).err(),
            Some(BoundedError::Full { len: 4, capacity: 4 })
        );
        assert_eq!(dst, before);

        let mut empty: [WChar; 0] = [];
        assert_eq!(
            concat_n_into(&mut empty, &src, 1).err(),
            Some(BoundedError::Full { len: 0, capacity: 0 })
        );
    }

    #[test]
    fn test_concat_n_respects_explicit_length() {
        let mut dst = buf("ab", 10);
        let src = encode_wide("cdefg");
        assert!(concat_n_into(&mut dst, &src, 2).is_ok());
        assert_eq!(content(&dst), "abcd");
    }

    #[test]
    fn test_concat_only_terminator_room() {
        let mut dst = buf("abc", 4);
        let src = encode_wide("d");
        assert_eq!(
            concat_into(&mut dst, Some(&src[..])).err(),
            Some(BoundedError::Truncated { written: 0, requested: 1 })
        );
        assert_eq!(content(&dst), "abc");
    }

    #[test]
    fn test_copy() {
        let mut dst = buf("zzzzzzzz", 8);
        assert!(copy_into(&mut dst, &encode_wide("hello")));
        assert_eq!(content(&dst), "hello");

        assert!(!copy_into(&mut dst, &encode_wide("hello world")));
        assert_eq!(content(&dst), "hello w");
        assert_eq!(dst[7], 0);
    }

    #[test]
    fn test_copy_boundary() {
        let mut dst = buf("", 5);
        assert!(copy_into(&mut dst, &encode_wide("abcd")));
        assert!(!copy_into(&mut dst, &encode_wide("abcde")));
        assert_eq!(content(&dst), "abcd");
    }

    #[test]
    fn test_copy_zero_capacity() {
        let mut dst: [WChar; 0] = [];
        assert!(!copy_into(&mut dst, &encode_wide("a")));
    }
}
