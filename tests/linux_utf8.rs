#![cfg(target_os="linux")]
extern crate libc;
extern crate wstrutil;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use wstrutil::{narrow_from_wide, narrow_from_wide_ptr, wide_from_narrow, wide_from_narrow_ptr};
use wstrutil::{Codepage, WCString, WChar};

fn set_utf8() {
    unsafe {
        let r = libc::setlocale(libc::LC_ALL, b"C.UTF-8\0".as_ptr() as *const _);
        assert!(!r.is_null());
    }
}

#[test]
fn test_garcon() {
    const WORD: &'static str = "gªrçon";
    const WORD_MB: &'static [u8] = b"g\xc2\xaar\xc3\xa7on\0";
    const WORD_W: &'static [WChar] = &[0x67, 0xAA, 0x72, 0xE7, 0x6F, 0x6E, 0x00];

    set_utf8();

    for &cp in &[Codepage::ACP, Codepage::UTF8] {
        {
            let w = wide_from_narrow(WORD_MB, cp).expect(here!());
            assert_eq!(w.as_units_with_term(), WORD_W);
            assert_eq!(&w.into_string().expect(here!()), WORD);
        }
        {
            let mb = narrow_from_wide(WORD_W, cp).expect(here!());
            assert_eq!(mb.as_units_with_term(), WORD_MB);
        }
        {
            let w = unsafe { wide_from_narrow_ptr(WORD_MB.as_ptr() as *const _, cp).expect(here!()) };
            let mb = unsafe { narrow_from_wide_ptr(w.as_ptr(), cp).expect(here!()) };
            assert_eq!(mb.as_units_with_term(), WORD_MB);
        }
    }

    let zwcstr = WCString::from_str(WORD).expect(here!());
    assert_eq!(&zwcstr[..], &WORD_W[..6]);
}

#[test]
fn test_locale_rejects_invalid() {
    set_utf8();
    assert!(wide_from_narrow(b"ab\xff", Codepage::ACP).is_none());
    let w = wide_from_narrow(b"ab\xff", Codepage::UTF8).expect(here!());
    assert_eq!(w.to_string_lossy(), "ab\u{FFFD}");
}
