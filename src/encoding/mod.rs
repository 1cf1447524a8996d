/*!
Unit types and codepage identifiers.
*/
pub mod conv;

use std::fmt::Debug;

use encoding_rs::Encoding;

pub use self::conv::os::{decode_lossy, encode_wide};

/**
A single unit of the C runtime wide character encoding.

This is UTF-16 on Windows, and (in practice) UTF-32 everywhere else.
*/
pub type WChar = libc::wchar_t;

macro_rules! int_unit_impl {
    ($($ty_name:ty),*) => {
        $(
            impl Unit for $ty_name {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

/**
A code unit that can be stored in a zero-terminated string.
*/
pub trait Unit: Copy + Eq + Debug + 'static {
    fn zero() -> Self;
    fn is_zero(&self) -> bool;
}

int_unit_impl! { u8, i8, u16, u32, i32 }

/**
Identifies a narrow character encoding by its Windows codepage number.

`Codepage::ACP` selects the current C runtime multibyte encoding, as configured by `setlocale`.  Every other supported codepage maps onto a fixed table, and does not depend on the locale.
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Codepage(pub u32);

impl Codepage {
    pub const ACP: Codepage = Codepage(0);
    pub const UTF8: Codepage = Codepage(65001);
    pub const WINDOWS_1252: Codepage = Codepage(1252);
    pub const SHIFT_JIS: Codepage = Codepage(932);

    /**
    Returns the fixed encoding table for this codepage.

    Returns `None` for `Codepage::ACP`, and for codepages this crate does not know.
    */
    pub fn encoding(self) -> Option<&'static Encoding> {
        use encoding_rs::*;

        let enc = match self.0 {
            866 => IBM866,
            874 => WINDOWS_874,
            932 => SHIFT_JIS,
            936 => GBK,
            949 => EUC_KR,
            950 => BIG5,
            1250 => WINDOWS_1250,
            1251 => WINDOWS_1251,
            1252 => WINDOWS_1252,
            1253 => WINDOWS_1253,
            1254 => WINDOWS_1254,
            1255 => WINDOWS_1255,
            1256 => WINDOWS_1256,
            1257 => WINDOWS_1257,
            1258 => WINDOWS_1258,
            10000 => MACINTOSH,
            10007 => X_MAC_CYRILLIC,
            20866 => KOI8_R,
            21866 => KOI8_U,
            28592 => ISO_8859_2,
            28593 => ISO_8859_3,
            28594 => ISO_8859_4,
            28595 => ISO_8859_5,
            28596 => ISO_8859_6,
            28597 => ISO_8859_7,
            28598 => ISO_8859_8,
            28603 => ISO_8859_13,
            28605 => ISO_8859_15,
            50220 => ISO_2022_JP,
            51932 => EUC_JP,
            54936 => GB18030,
            65001 => UTF_8,
            _ => return None,
        };
        Some(enc)
    }
}

impl Default for Codepage {
    fn default() -> Self {
        Codepage::ACP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codepage_tables() {
        assert_eq!(Codepage::ACP.encoding(), None);
        assert_eq!(Codepage::UTF8.encoding(), Some(encoding_rs::UTF_8));
        assert_eq!(Codepage::WINDOWS_1252.encoding(), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(Codepage(1200).encoding(), None);
    }

    #[test]
    fn test_wide_round_trip() {
        let units = encode_wide("gªrçon \u{1F600}");
        let s: String = decode_lossy(&units).collect();
        assert_eq!(s, "gªrçon \u{1F600}");
    }
}
