//! Small integer helpers used by the version scanner.

/// Returns `base^exponent`, or `None` once the product no longer fits in a `u8`.
///
/// Computed by repeated multiplication; exponents here never exceed the
/// scratch buffer length, so there is nothing to gain from squaring.
pub fn pow_u8(base: u8, exponent: u8) -> Option<u8> {
    let mut val: u8 = 1;
    for _ in 0..exponent {
        val = val.checked_mul(base)?;
    }
    Some(val)
}

/// Number of decimal digits needed to print `n`.
pub fn u8_width(n: u8) -> usize {
    match n {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}
