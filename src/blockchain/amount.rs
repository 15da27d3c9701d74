// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token amount encoding for uint256 calldata arguments.
//!
//! Starknet contracts take `u256` arguments as two felts: the low and high
//! 128-bit words. Amounts are entered in human-readable form ("1.5") and
//! scaled by the token's decimals before splitting. Parsing is done directly
//! on the decimal string with 256-bit integer arithmetic, so large amounts
//! never lose precision.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed-point scale of the tokens handled by this service.
pub const TOKEN_DECIMALS: u8 = 18;

/// Largest power of ten that fits in a `U256` (10^77 < 2^256 < 10^78).
const MAX_POW10: u64 = 77;

/// Errors produced while encoding an amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow: scaled value exceeds 256 bits")]
    Overflow,
}

/// A 256-bit unsigned integer split into two 128-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Uint256Pair {
    /// Least-significant 128 bits, base-10.
    pub low: String,
    /// Most-significant 128 bits, base-10.
    pub high: String,
}

impl Uint256Pair {
    /// Split a raw integer amount into its low and high words.
    pub fn from_u256(value: U256) -> Self {
        let mask = U256::from(u128::MAX);
        Self {
            low: (value & mask).to_string(),
            high: (value >> 128usize).to_string(),
        }
    }

    /// Recombine the words: `low + (high << 128)`.
    pub fn value(&self) -> Result<U256, AmountError> {
        let low = parse_word(&self.low)?;
        let high = parse_word(&self.high)?;
        Ok(U256::from(low) | (U256::from(high) << 128usize))
    }

    /// The two calldata felts, low word first.
    pub fn into_calldata(self) -> [String; 2] {
        [self.low, self.high]
    }
}

fn parse_word(word: &str) -> Result<u128, AmountError> {
    word.parse::<u128>()
        .map_err(|_| AmountError::InvalidAmount(format!("`{word}` is not a 128-bit word")))
}

/// Encode a human-readable amount with the default 18-decimal scale.
///
/// ```rust,ignore
/// let pair = encode("1")?;
/// assert_eq!(pair.low, "1000000000000000000");
/// assert_eq!(pair.high, "0");
/// ```
pub fn encode(amount: &str) -> Result<Uint256Pair, AmountError> {
    encode_with_decimals(amount, TOKEN_DECIMALS)
}

/// Encode a human-readable amount scaled by `10^decimals`.
pub fn encode_with_decimals(amount: &str, decimals: u8) -> Result<Uint256Pair, AmountError> {
    scale_amount(amount, decimals).map(Uint256Pair::from_u256)
}

/// Parse a decimal string into `floor(amount * 10^decimals)`.
///
/// Accepts an optional leading `+`, a single decimal point, and an optional
/// `e`/`E` exponent. Digits below the scale are truncated.
pub fn scale_amount(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    let parsed = DecimalParts::parse(amount.trim())?;

    // Position of the decimal point relative to the end of `digits`.
    let shift = parsed
        .exponent
        .checked_add(i64::from(decimals))
        .and_then(|v| v.checked_sub(parsed.fraction_len as i64));

    let Some(shift) = shift else {
        return if parsed.exponent < 0 || parsed.is_zero() {
            Ok(U256::ZERO)
        } else {
            Err(AmountError::Overflow)
        };
    };

    if shift >= 0 {
        let significand = digits_to_u256(&parsed.digits)?;
        if significand.is_zero() {
            return Ok(U256::ZERO);
        }
        significand
            .checked_mul(pow10(shift as u64)?)
            .ok_or(AmountError::Overflow)
    } else {
        let dropped = shift.unsigned_abs();
        let keep = (parsed.digits.len() as u64).saturating_sub(dropped) as usize;
        digits_to_u256(&parsed.digits[..keep])
    }
}

/// Render a raw amount as a decimal string, trimming trailing zeros.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
    }
}

/// Syntactic pieces of a decimal literal: all digits with the point removed.
struct DecimalParts<'a> {
    integer: &'a str,
    fraction: &'a str,
    digits: String,
    fraction_len: usize,
    exponent: i64,
}

impl<'a> DecimalParts<'a> {
    fn parse(input: &'a str) -> Result<Self, AmountError> {
        if input.is_empty() {
            return Err(AmountError::InvalidAmount("amount is empty".to_string()));
        }
        if input.starts_with('-') {
            return Err(AmountError::InvalidAmount(format!(
                "`{input}` is negative"
            )));
        }
        let unsigned = input.strip_prefix('+').unwrap_or(input);

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
            None => (unsigned, None),
        };

        let (integer, fraction) = match mantissa.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (mantissa, ""),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty())
            || !all_digits(integer)
            || !all_digits(fraction)
        {
            return Err(AmountError::InvalidAmount(format!(
                "`{input}` is not a decimal number"
            )));
        }

        let exponent = match exponent {
            Some(raw) => parse_exponent(raw, input)?,
            None => 0,
        };

        Ok(Self {
            integer,
            fraction,
            digits: format!("{integer}{fraction}"),
            fraction_len: fraction.len(),
            exponent,
        })
    }

    fn is_zero(&self) -> bool {
        self.integer
            .bytes()
            .chain(self.fraction.bytes())
            .all(|b| b == b'0')
    }
}

/// Exponents beyond `i64` saturate; the scaling step then either overflows
/// or truncates to zero.
fn parse_exponent(raw: &str, input: &str) -> Result<i64, AmountError> {
    let (negative, magnitude) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidAmount(format!(
            "`{input}` has a malformed exponent"
        )));
    }
    let value = magnitude.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -value } else { value })
}

fn digits_to_u256(digits: &str) -> Result<U256, AmountError> {
    let ten = U256::from(10u64);
    digits.bytes().try_fold(U256::ZERO, |acc, b| {
        acc.checked_mul(ten)
            .and_then(|v| v.checked_add(U256::from(b - b'0')))
            .ok_or(AmountError::Overflow)
    })
}

fn pow10(exp: u64) -> Result<U256, AmountError> {
    if exp > MAX_POW10 {
        return Err(AmountError::Overflow);
    }
    Ok(U256::from(10u64).pow(U256::from(exp)))
}
