/*!
Wide units as UTF-32 code points.
*/
use std::char::REPLACEMENT_CHARACTER;

use crate::encoding::WChar;
pub use super::WcToUniError;

/**
Encodes a single character into `buf`, returning the units used.
*/
#[inline]
pub fn encode_char(c: char, buf: &mut [WChar; 2]) -> &[WChar] {
    buf[0] = c as u32 as WChar;
    &buf[..1]
}

/**
Encodes a Rust string as wide units.  No terminator is appended.
*/
pub fn encode_wide(s: &str) -> Vec<WChar> {
    s.chars().map(|c| c as u32 as WChar).collect()
}

/**
Decodes wide units, replacing anything that is not a Unicode scalar value with U+FFFD.
*/
pub fn decode_lossy(units: &[WChar]) -> impl Iterator<Item = char> + '_ {
    units
        .iter()
        .map(|&u| char::from_u32(u as u32).unwrap_or(REPLACEMENT_CHARACTER))
}

pub struct WcToUniIter<It> {
    at: usize,
    iter: Option<It>,
}

impl<It> WcToUniIter<It> {
    pub fn new(iter: It) -> Self {
        WcToUniIter {
            at: 0,
            iter: Some(iter),
        }
    }
}

impl<It> Iterator for WcToUniIter<It> where It: Iterator<Item = WChar> {
    type Item = Result<char, WcToUniError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cu = self.iter.as_mut()?.next()?;
        match char::from_u32(cu as u32) {
            Some(c) => {
                self.at += 1;
                Some(Ok(c))
            },
            None => {
                self.iter = None;
                Some(Err(WcToUniError::InvalidAt(self.at)))
            },
        }
    }
}
