/*!
Conversion between the C runtime multibyte encoding and wide units, via `mbrtowc` and `wcrtomb`.

The results depend on the thread's current `LC_CTYPE` locale.
*/
use libc::c_char;

use crate::encoding::WChar;
use crate::ffi::{mbrtowc, mbstate_t, wcrtomb, MBRTOWC_ILLEGAL, MBRTOWC_INCOMPLETE, MB_LEN_MAX};
use super::{MbsToWcError, WcsToMbError};

pub struct MbsToWcIter<It> {
    iter: Option<It>,
    at: usize,
    state: mbstate_t,
}

impl<It> MbsToWcIter<It> {
    pub fn new(iter: It) -> Self {
        MbsToWcIter {
            iter: Some(iter),
            at: 0,
            state: mbstate_t::new(),
        }
    }
}

impl<It> Iterator for MbsToWcIter<It> where It: Iterator<Item = u8> {
    type Item = Result<WChar, MbsToWcError>;

    fn next(&mut self) -> Option<Self::Item> {
        let err;

        {
            let mut buf = [0u8; MB_LEN_MAX];
            let mut buf_len = 0;

            let iter = self.iter.as_mut()?;

            loop {
                if buf_len == buf.len() {
                    err = MbsToWcError::OutOfBufferAt(self.at);
                    break;
                }

                buf[buf_len] = match iter.next() {
                    Some(mbu) => mbu,
                    None if buf_len == 0 => return None,
                    None => {
                        err = MbsToWcError::Incomplete;
                        break;
                    },
                };
                buf_len += 1;

                let mut wc: WChar = 0;
                let mut state_new = self.state;

                let r = unsafe {
                    mbrtowc(&mut wc, buf.as_ptr() as *const c_char, buf_len, &mut state_new)
                };

                match r {
                    MBRTOWC_ILLEGAL => {
                        err = MbsToWcError::InvalidAt(self.at);
                        break;
                    },

                    // Keep pulling new units in until we run out or exhaust the buffer.
                    MBRTOWC_INCOMPLETE => continue,

                    _ => (),
                }

                self.at += buf_len;
                self.state = state_new;

                return Some(Ok(wc));
            }
        }

        self.iter = None;
        Some(Err(err))
    }
}

pub struct WcsToMbIter<It> {
    iter: Option<It>,
    at: usize,
    buf: [u8; MB_LEN_MAX],
    buf_at: usize,
    buf_len: usize,
    state: mbstate_t,
}

impl<It> WcsToMbIter<It> {
    pub fn new(iter: It) -> Self {
        WcsToMbIter {
            iter: Some(iter),
            at: 0,
            buf: [0; MB_LEN_MAX],
            buf_at: 0,
            buf_len: 0,
            state: mbstate_t::new(),
        }
    }
}

impl<It> Iterator for WcsToMbIter<It> where It: Iterator<Item = WChar> {
    type Item = Result<u8, WcsToMbError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf_at < self.buf_len {
            let mbu = self.buf[self.buf_at];
            self.buf_at += 1;
            return Some(Ok(mbu));
        }

        // Refresh buffer
        self.buf_at = 0;
        self.buf_len = 0;

        let wcu = self.iter.as_mut()?.next()?;

        let r = unsafe {
            wcrtomb(self.buf.as_mut_ptr() as *mut c_char, wcu, &mut self.state)
        };

        match r {
            MBRTOWC_ILLEGAL => {
                self.iter = None;
                Some(Err(WcsToMbError::InvalidAt(self.at)))
            },
            // Zero units for a non-zero input, or more than fits: the C runtime is misbehaving.
            0 => {
                self.iter = None;
                Some(Err(WcsToMbError::InvalidAt(self.at)))
            },
            len if len > MB_LEN_MAX => {
                self.iter = None;
                Some(Err(WcsToMbError::OutOfBufferAt(self.at)))
            },
            len => {
                self.at += 1;
                self.buf_at = 1;
                self.buf_len = len;
                Some(Ok(self.buf[0]))
            },
        }
    }
}
