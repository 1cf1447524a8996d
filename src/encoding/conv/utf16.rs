/*!
Wide units as UTF-16 code units.
*/
use std::char::REPLACEMENT_CHARACTER;

use crate::encoding::WChar;
pub use super::WcToUniError;

/**
Encodes a single character into `buf`, returning the units used.  Characters outside the BMP take two.
*/
#[inline]
pub fn encode_char(c: char, buf: &mut [WChar; 2]) -> &[WChar] {
    c.encode_utf16(&mut buf[..])
}

/**
Encodes a Rust string as wide units.  No terminator is appended.
*/
pub fn encode_wide(s: &str) -> Vec<WChar> {
    s.encode_utf16().collect()
}

/**
Decodes wide units, replacing unpaired surrogates with U+FFFD.
*/
pub fn decode_lossy(units: &[WChar]) -> impl Iterator<Item = char> + '_ {
    char::decode_utf16(units.iter().cloned()).map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
}

pub struct WcToUniIter<It> {
    at: usize,
    iter: Option<It>,
}

impl<It> WcToUniIter<It> {
    pub fn new(iter: It) -> WcToUniIter<It> {
        WcToUniIter {
            at: 0,
            iter: Some(iter),
        }
    }
}

impl<It> Iterator for WcToUniIter<It> where It: Iterator<Item = WChar> {
    type Item = Result<char, WcToUniError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cu0 = self.iter.as_mut()?.next()?;

        let r = match cu0 {
            0x0000..=0xd7ff | 0xe000..=0xffff => {
                self.at += 1;
                char::from_u32(cu0 as u32)
            },
            0xdc00..=0xdfff => None,
            cu0 /* @ 0xd800..=0xdbff */ => {
                let cu1 = match self.iter.as_mut().and_then(|iter| iter.next()) {
                    Some(cu1) => cu1,
                    None => {
                        self.iter = None;
                        return Some(Err(WcToUniError::Incomplete));
                    }
                };

                if !(0xdc00..=0xdfff).contains(&cu1) {
                    None
                } else {
                    self.at += 2;

                    let hi = (cu0 & 0x3ff) as u32;
                    let lo = (cu1 & 0x3ff) as u32;
                    char::from_u32(0x10000 + ((hi << 10) | lo))
                }
            },
        };

        match r {
            Some(c) => Some(Ok(c)),
            None => {
                self.iter = None;
                Some(Err(WcToUniError::InvalidAt(self.at)))
            },
        }
    }
}
