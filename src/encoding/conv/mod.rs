/*!
Encoding conversion support.

`mb_to_wc` and `wc_to_mb` follow the usual two-call convention: called without an output buffer, they report how many units (including the terminator) the output requires; called with one, they fill it.  `wide_from_narrow` and `narrow_from_wide` wrap both calls around an exactly-sized allocation.
*/
use encoding_rs::{EncoderResult, Encoding, UTF_8};
use log::warn;
use thiserror::Error;

use crate::alloc::{AllocError, Malloc};
use crate::encoding::{Codepage, Unit, WChar};
use crate::util::units_len;
use crate::zstring::{MbCString, WCString, ZString};

pub mod mb_x_wc;

#[cfg(not(windows))]
pub mod utf32;

#[cfg(not(windows))]
pub use self::utf32 as os;

#[cfg(windows)]
pub mod utf16;

#[cfg(windows)]
pub use self::utf16 as os;

use self::mb_x_wc::{MbsToWcIter, WcsToMbIter};

/// Substituted for characters the target codepage cannot represent.
pub const DEFAULT_CHAR: u8 = b'?';

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum WcToUniError {
    #[error("invalid unit at offset {0}")]
    InvalidAt(usize),
    #[error("incomplete unit")]
    Incomplete,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum MbsToWcError {
    #[error("invalid unit at offset {0}")]
    InvalidAt(usize),
    #[error("incomplete unit")]
    Incomplete,
    #[error("character too large to transcode at offset {0}")]
    OutOfBufferAt(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum WcsToMbError {
    #[error("invalid unit at offset {0}")]
    InvalidAt(usize),
    #[error("character too large to transcode at offset {0}")]
    OutOfBufferAt(usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvError {
    #[error("codepage {0} is not supported")]
    UnsupportedCodepage(u32),
    #[error("output buffer too small: {required} units required, {available} available")]
    InsufficientBuffer { required: usize, available: usize },
    #[error("overflow while computing output size")]
    SizeOverflow,
    #[error(transparent)]
    Decode(#[from] MbsToWcError),
    #[error(transparent)]
    Encode(#[from] WcsToMbError),
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

enum Backend {
    Locale,
    Table(&'static Encoding),
}

impl Backend {
    fn for_codepage(cp: Codepage) -> Result<Backend, ConvError> {
        if cp == Codepage::ACP {
            return Ok(Backend::Locale);
        }
        cp.encoding()
            .map(Backend::Table)
            .ok_or(ConvError::UnsupportedCodepage(cp.0))
    }
}

/**
Converts narrow text in codepage `cp` into wide units.

`src` ends at its first zero byte, or at the end of the slice.  If `dst` is `None`, nothing is written.  Either way, the result is the number of wide units the output needs, including the terminator.

Invalid sequences decode to U+FFFD, except with `Codepage::ACP`, where they are an error.
*/
pub fn mb_to_wc(cp: Codepage, src: &[u8], dst: Option<&mut [WChar]>) -> Result<usize, ConvError> {
    let src = &src[..units_len(src)];
    let units = match Backend::for_codepage(cp)? {
        Backend::Locale => MbsToWcIter::new(src.iter().cloned()).collect::<Result<Vec<_>, _>>()?,
        Backend::Table(encoding) => {
            let (text, _) = encoding.decode_without_bom_handling(src);
            os::encode_wide(&text)
        },
    };
    emit(&units, dst)
}

/**
Converts wide units into narrow text in codepage `cp`.

`src` ends at its first zero unit, or at the end of the slice.  If `dst` is `None`, nothing is written.  Either way, the result is the number of bytes the output needs, including the terminator.

Characters the codepage cannot represent are replaced with `DEFAULT_CHAR`, except with `Codepage::ACP`, where they are an error.
*/
pub fn wc_to_mb(cp: Codepage, src: &[WChar], dst: Option<&mut [u8]>) -> Result<usize, ConvError> {
    let src = &src[..units_len(src)];
    let bytes = match Backend::for_codepage(cp)? {
        Backend::Locale => WcsToMbIter::new(src.iter().cloned()).collect::<Result<Vec<_>, _>>()?,
        Backend::Table(encoding) => {
            let text: String = os::decode_lossy(src).collect();
            encode_narrow(encoding, &text)?
        },
    };
    emit(&bytes, dst)
}

fn emit<U>(units: &[U], dst: Option<&mut [U]>) -> Result<usize, ConvError> where U: Unit {
    let required = units.len().checked_add(1).ok_or(ConvError::SizeOverflow)?;
    if let Some(dst) = dst {
        if dst.len() < required {
            return Err(ConvError::InsufficientBuffer { required, available: dst.len() });
        }
        dst[..units.len()].copy_from_slice(units);
        dst[units.len()] = U::zero();
    }
    Ok(required)
}

fn encode_narrow(encoding: &'static Encoding, text: &str) -> Result<Vec<u8>, ConvError> {
    if encoding == UTF_8 {
        return Ok(text.as_bytes().to_vec());
    }

    let mut encoder = encoding.new_encoder();
    let max = encoder
        .max_buffer_length_from_utf8_without_replacement(text.len())
        .ok_or(ConvError::SizeOverflow)?;
    let mut out = vec![0u8; max];
    let mut read = 0;
    let mut written = 0;

    loop {
        let (result, r, w) = encoder.encode_from_utf8_without_replacement(
            &text[read..],
            &mut out[written..],
            true,
        );
        read += r;
        written += w;

        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::Unmappable(_) => {
                if written == out.len() {
                    out.push(DEFAULT_CHAR);
                } else {
                    out[written] = DEFAULT_CHAR;
                }
                written += 1;
            },
            EncoderResult::OutputFull => {
                let more = encoder
                    .max_buffer_length_from_utf8_without_replacement(text.len() - read)
                    .ok_or(ConvError::SizeOverflow)?;
                out.resize(written + more, 0);
            },
        }
    }

    out.truncate(written);
    Ok(out)
}

fn convert<U, V, F>(src: &[U], cp: Codepage, f: F) -> Result<ZString<V, Malloc>, ConvError>
where
    U: Unit,
    V: Unit,
    F: Fn(Codepage, &[U], Option<&mut [V]>) -> Result<usize, ConvError>,
{
    let required = f(cp, src, None)?;
    let mut out = ZString::<V, Malloc>::zeroed(required)?;
    f(cp, src, Some(out.buffer_mut()))?;
    Ok(out)
}

/**
Converts a wide string into an owned narrow string in codepage `cp`.

Returns `None` if the codepage is unsupported, the text cannot be converted, or allocation fails.
*/
pub fn narrow_from_wide(text: &[WChar], cp: Codepage) -> Option<MbCString> {
    convert(text, cp, wc_to_mb)
        .map_err(|err| warn!("narrow_from_wide: codepage {}: {}", cp.0, err))
        .ok()
}

/**
Converts a narrow string in codepage `cp` into an owned wide string.

Returns `None` if the codepage is unsupported, the text cannot be converted, or allocation fails.
*/
pub fn wide_from_narrow(text: &[u8], cp: Codepage) -> Option<WCString> {
    convert(text, cp, mb_to_wc)
        .map_err(|err| warn!("wide_from_narrow: codepage {}: {}", cp.0, err))
        .ok()
}

/**
Converts a zero-terminated wide string into an owned narrow string in codepage `cp`.

# Safety

If `text` is non-null, it must point to a valid zero-terminated wide string.

# Panics

A null `text` is a contract violation.  Debug builds assert; release builds return `None`.
*/
pub unsafe fn narrow_from_wide_ptr(text: *const WChar, cp: Codepage) -> Option<MbCString> {
    debug_assert!(!text.is_null(), "narrow_from_wide_ptr: null input");
    if text.is_null() {
        warn!("narrow_from_wide_ptr: null input");
        return None;
    }
    narrow_from_wide(zero_term_slice(text), cp)
}

/**
Converts a zero-terminated narrow string in codepage `cp` into an owned wide string.

# Safety

If `text` is non-null, it must point to a valid zero-terminated string.

# Panics

A null `text` is a contract violation.  Debug builds assert; release builds return `None`.
*/
pub unsafe fn wide_from_narrow_ptr(text: *const libc::c_char, cp: Codepage) -> Option<WCString> {
    debug_assert!(!text.is_null(), "wide_from_narrow_ptr: null input");
    if text.is_null() {
        warn!("wide_from_narrow_ptr: null input");
        return None;
    }
    wide_from_narrow(zero_term_slice(text as *const u8), cp)
}

unsafe fn zero_term_slice<'a, U>(ptr: *const U) -> &'a [U] where U: Unit {
    let mut len = 0;
    while !(*ptr.add(len)).is_zero() {
        len += 1;
    }
    std::slice::from_raw_parts(ptr, len)
}
