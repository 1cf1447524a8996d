use std::fmt::{self, Write};

use crate::encoding::conv::os;
use crate::encoding::{Unit, WChar};

/**
Returns the number of units before the first zero unit, or the length of the slice if there is none.
*/
#[inline]
pub fn units_len<U>(units: &[U]) -> usize where U: Unit {
    units.iter().position(U::is_zero).unwrap_or(units.len())
}

/**
Compares two zero-terminated strings for exact equality.
*/
pub fn units_eq<U>(a: &[U], b: &[U]) -> bool where U: Unit {
    a[..units_len(a)] == b[..units_len(b)]
}

/**
Compares two zero-terminated wide strings, ignoring case.

Each unit is folded on its own with simple lowercase mapping; there is no locale or normalisation involved.
*/
pub fn units_eq_ci(a: &[WChar], b: &[WChar]) -> bool {
    let (a, b) = (&a[..units_len(a)], &b[..units_len(b)]);
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| x == y || fold_unit(x) == fold_unit(y))
}

/**
Lowercases a single wide unit.  Units which are not scalar values, or whose lowercase form is not a single unit, are returned unchanged.
*/
pub fn fold_unit(u: WChar) -> WChar {
    let c = match char::from_u32(u as u32) {
        Some(c) => c,
        None => return u,
    };
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => WChar::try_from(l as u32).unwrap_or(u),
        _ => u,
    }
}

/**
Displays a zero-terminated wide string, lossily.

This is the wide `%s`: `wformat!("{}{}", WideDisplay(a), WideDisplay(b))`.
*/
#[derive(Copy, Clone)]
pub struct WideDisplay<'a>(pub &'a [WChar]);

impl<'a> fmt::Display for WideDisplay<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for c in os::decode_lossy(&self.0[..units_len(self.0)]) {
            fmt.write_char(c)?;
        }
        Ok(())
    }
}

impl<'a> fmt::Debug for WideDisplay<'a> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{:?}", self.to_string())
    }
}

pub trait TrapErrExt: Sized + Iterator {
    type Trap;
    fn trap_err(self, trap: &mut Result<(), Self::Trap>) -> TrapErrIter<Self, Self::Trap>;
}

impl<It, T, E> TrapErrExt for It where It: Iterator<Item = Result<T, E>> {
    type Trap = E;

    fn trap_err(self, trap: &mut Result<(), Self::Trap>) -> TrapErrIter<Self, Self::Trap> {
        TrapErrIter {
            iter: Some(self),
            trap,
        }
    }
}

/**
Unwraps `Ok` items, stopping at the first `Err` and stashing it in the trap.
*/
pub struct TrapErrIter<'a, It, Trap: 'a> {
    iter: Option<It>,
    trap: &'a mut Result<(), Trap>,
}

impl<'a, It, T, E> Iterator for TrapErrIter<'a, It, E>
where
    It: Iterator<Item = Result<T, E>>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let trapped = {
            let iter = self.iter.as_mut()?;

            match iter.next() {
                Some(Ok(e)) => return Some(e),
                Some(Err(err)) => Err(err),
                None => Ok(()),
            }
        };

        self.iter = None;
        *self.trap = trapped;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode_wide;

    fn w(s: &str) -> Vec<WChar> {
        let mut v = encode_wide(s);
        v.push(0);
        v
    }

    #[test]
    fn test_units_len() {
        assert_eq!(units_len(&w("abc")), 3);
        assert_eq!(units_len(&encode_wide("abc")), 3);
        assert_eq!(units_len::<WChar>(&[]), 0);
    }

    #[test]
    fn test_units_eq_ignores_trailing_garbage() {
        let mut a = w("abc");
        a.extend(encode_wide("zzz"));
        assert!(units_eq(&a, &w("abc")));
        assert!(!units_eq(&a, &w("abcz")));
    }

    #[test]
    fn test_units_eq_ci() {
        assert!(units_eq_ci(&w("HeLLo"), &w("hello")));
        assert!(units_eq_ci(&w("ÇA"), &w("ça")));
        assert!(!units_eq_ci(&w("hello"), &w("hell")));
    }

    #[test]
    fn test_trap_err() {
        let items = vec![Ok(1), Ok(2), Err("boom"), Ok(3)];
        let mut err = Ok(());
        let got: Vec<i32> = items.into_iter().trap_err(&mut err).collect();
        assert_eq!(got, vec![1, 2]);
        assert_eq!(err, Err("boom"));
    }

    #[test]
    fn test_wide_display() {
        assert_eq!(WideDisplay(&w("gªrçon")).to_string(), "gªrçon");
    }
}
