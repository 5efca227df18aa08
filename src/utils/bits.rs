//! Bit-width derivation.
//!
//! All of these follow the iterative forms used by the emitted hardware, so
//! the widths match the generated structures exactly (including the floor of
//! one bit on every result; a zero-width signal is never valid).

/// Computes the number of bits needed to hold the sum of `inputs` unsigned
/// operands of `width` bits each: the smallest `w` with `2^w > width * inputs`.
///
/// # Examples
///
/// ```
/// # use hdlgen::utils::bits::sum_width;
/// #
/// assert_eq!(sum_width(4, 3), 4); // max sum 12, 2^4 = 16 > 12
/// assert_eq!(sum_width(1, 1), 1);
/// ```
pub fn sum_width(width: u64, inputs: u64) -> u64 {
    let max = width * inputs;
    let mut w = 1;

    while (1 << w) <= max {
        w += 1;
    }

    w
}

/// Computes the number of bits needed to index a bit within a `width`-bit
/// vector: the smallest `w` with `2^w > width - 1`, and 1 when `width` is 1.
pub fn index_width(width: u64) -> u64 {
    let max = width.saturating_sub(1);
    let mut w = 1;

    while (1 << w) <= max {
        w += 1;
    }

    w
}

/// Computes the width of a shift-amount input for a `width`-bit operand: the
/// smallest `s` with `2^s >= width`, and 1 when `width` is 1 or 2.
pub fn shift_amount_width(width: u64) -> u64 {
    let mut s = 1;

    while (1 << s) < width {
        s += 1;
    }

    s
}

/// Computes the width of the select input addressing groups of `group_bits`
/// within an `input_bits`-wide vector, with a minimum of one select bit even
/// when only one group exists.
pub fn select_width(input_bits: u64, group_bits: u64) -> u64 {
    let mut groups = (input_bits + group_bits - 1) / group_bits - 1;
    let mut sel = 1;

    if groups > 0 {
        while groups != 1 {
            groups >>= 1;
            sel += 1;
        }
    }

    sel
}

/// Computes the width of the zero-padded vector covering `2^select_bits`
/// groups of `group_bits` each.
pub fn extended_width(select_bits: u64, group_bits: u64) -> u64 {
    (1 << select_bits) * group_bits
}
