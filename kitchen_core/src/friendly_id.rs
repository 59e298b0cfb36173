//! Friendly IDs: short, reversible base-58 codes for UUIDs.
//!
//! A friendly ID is the UUID's 128-bit value written in radix 58,
//! most significant symbol first, left-padded with `0` to at least
//! 8 symbols. No table is stored; the mapping is computed both ways.
//!
//! Kitchen-made items persist their source recipe's friendly ID as
//! their `item_code`, which is what [`recipe_id_from_item_code`] reverses.

use crate::{Error, Result};
use uuid::Uuid;

/// Symbol table. Codes in the wild were generated against exactly this
/// string and ordering; the upper-case `I`, `O` and lower-case `l` are absent.
pub const ALPHABET: &str = "0123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Arithmetic radix. The encoder only emits the first 58 symbols.
const RADIX: u128 = 58;

/// Shortest code `encode` produces
pub const MIN_LENGTH: usize = 8;

/// Longest string accepted as a friendly ID
pub const MAX_LENGTH: usize = 22;

fn symbol_value(ch: char) -> Option<u128> {
    ALPHABET.find(ch).map(|idx| idx as u128)
}

/// Encode a UUID as a friendly ID
pub fn encode(id: &Uuid) -> String {
    let symbols: Vec<char> = ALPHABET.chars().collect();

    let mut value = id.as_u128();
    let mut digits = Vec::with_capacity(MAX_LENGTH);
    while value > 0 {
        digits.push(symbols[(value % RADIX) as usize]);
        value /= RADIX;
    }
    while digits.len() < MIN_LENGTH {
        digits.push(symbols[0]);
    }

    digits.iter().rev().collect()
}

/// Encode a UUID given as text (hyphenated, simple, braced or URN form)
pub fn encode_str(id: &str) -> Result<String> {
    let uuid = Uuid::parse_str(id.trim()).map_err(|_| Error::InvalidUuid(id.to_string()))?;
    Ok(encode(&uuid))
}

/// Decode a friendly ID back to its UUID
///
/// Fails on the first symbol outside [`ALPHABET`], or when the code is
/// too large for 128 bits. Any length is accepted, so short hand-typed
/// codes decode even though `encode` would have padded them.
pub fn decode(code: &str) -> Result<Uuid> {
    let mut value: u128 = 0;

    for (position, ch) in code.chars().enumerate() {
        let digit = symbol_value(ch).ok_or(Error::InvalidFriendlyIdChar { ch, position })?;
        value = value
            .checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::FriendlyIdOverflow(code.to_string()))?;
    }

    Ok(Uuid::from_u128(value))
}

/// Length and alphabet check for a candidate friendly ID
///
/// A sanity check only; it does not prove the code came from `encode`.
pub fn is_valid_friendly_id(code: &str) -> bool {
    let len = code.chars().count();
    (MIN_LENGTH..=MAX_LENGTH).contains(&len) && code.chars().all(|c| symbol_value(c).is_some())
}

/// Whether an item code looks like one we generated rather than a vendor's
///
/// All-digit codes are rejected first: digits are alphabet symbols, but
/// vendor SKUs are usually numeric, and those must stay "purchased".
pub fn looks_self_generated(code: &str) -> bool {
    if code.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    is_valid_friendly_id(code) && !code.contains(['-', '_', '.'])
}

/// Item code persisted on a kitchen-made item prepared from `recipe_id`
pub fn prep_item_code(recipe_id: &Uuid) -> String {
    encode(recipe_id)
}

/// Recover the source recipe behind a self-generated item code
pub fn recipe_id_from_item_code(code: &str) -> Option<Uuid> {
    if !looks_self_generated(code) {
        return None;
    }

    match decode(code) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!("Item code {:?} is not a recipe link: {}", code, e);
            None
        }
    }
}
