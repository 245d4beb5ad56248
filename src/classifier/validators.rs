//! Pure validator predicates applied to a candidate match's substring.
//!
//! A [`crate::classifier::Rule`] runs its `validators` in order against the
//! raw matched text; the first failure rejects the candidate. Every
//! function here is a pure `fn(&str) -> bool` with no allocation beyond what
//! digit extraction requires.

/// Extracts only the ASCII digits from `s`, in order.
fn digits_only(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

// ── SSN ──────────────────────────────────────────────────────────────────

/// Validates a candidate US Social Security Number.
///
/// Rejects area `000`, `666`, or `900..999`; group `00`; serial `0000`.
#[must_use]
pub fn valid_ssn(candidate: &str) -> bool {
    let d = digits_only(candidate);
    if d.len() != 9 {
        return false;
    }
    let area = d[0] * 100 + d[1] * 10 + d[2];
    let group = d[3] * 10 + d[4];
    let serial = d[5] * 1000 + d[6] * 100 + d[7] * 10 + d[8];
    if area == 0 || area == 666 || (900..=999).contains(&area) {
        return false;
    }
    if group == 0 {
        return false;
    }
    serial != 0
}

// ── Luhn (credit cards) ────────────────────────────────────────────────

/// Mod-10 Luhn check digit validation for payment card numbers.
#[must_use]
pub fn luhn_valid(candidate: &str) -> bool {
    let digits = digits_only(candidate);
    if digits.len() < 2 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

// ── ABA routing number ───────────────────────────────────────────────────

/// Validates a 9-digit ABA routing number against its weighted checksum:
/// `3*(d0+d3+d6) + 7*(d1+d4+d7) + (d2+d5+d8) ≡ 0 (mod 10)`.
#[must_use]
pub fn valid_aba_routing(candidate: &str) -> bool {
    let d = digits_only(candidate);
    if d.len() != 9 {
        return false;
    }
    let checksum = 3 * (d[0] + d[3] + d[6]) + 7 * (d[1] + d[4] + d[7]) + (d[2] + d[5] + d[8]);
    checksum % 10 == 0
}

// ── IBAN (mod-97) ─────────────────────────────────────────────────────────

/// Validates an IBAN via the standard mod-97 rearrangement check.
///
/// Moves the first four characters (country code + check digits) to the
/// end, converts letters to their `A=10..Z=35` numeric value, and verifies
/// the resulting decimal number is `≡ 1 (mod 97)`.
#[must_use]
pub fn valid_iban(candidate: &str) -> bool {
    let cleaned: String = candidate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    if cleaned.len() < 5 || !cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let (head, tail) = cleaned.split_at(4);
    let rearranged = format!("{tail}{head}");

    let mut expanded = String::with_capacity(rearranged.len() * 2);
    for c in rearranged.chars() {
        if c.is_ascii_digit() {
            expanded.push(c);
        } else {
            expanded.push_str(&(c as u32 - 'A' as u32 + 10).to_string());
        }
    }

    let mut remainder: u64 = 0;
    for c in expanded.chars() {
        let digit = u64::from(c.to_digit(10).unwrap());
        remainder = (remainder * 10 + digit) % 97;
    }
    remainder == 1
}

// ── Phone number ──────────────────────────────────────────────────────────

/// Validates a US phone candidate: exactly 10 or 11 digits (with a leading
/// `1`), area code not starting with `0`/`1`, exchange not starting with
/// `0`/`1`, and not an obviously fake repeating/test number.
#[must_use]
pub fn valid_us_phone(candidate: &str) -> bool {
    let mut d = digits_only(candidate);
    if d.len() == 11 && d[0] == 1 {
        d.remove(0);
    }
    if d.len() != 10 {
        return false;
    }
    if d[0] == 0 || d[0] == 1 {
        return false;
    }
    if d[3] == 0 || d[3] == 1 {
        return false;
    }
    if d.windows(2).all(|w| w[0] == w[1]) {
        return false;
    }
    // Reserved "555-01XX" test block and the classic placeholder 555-1234.
    if d[3..6] == [5, 5, 5] && d[6] == 0 {
        return false;
    }
    true
}

/// Rejects phone-like candidates where a single digit dominates more than
/// 70% of the digit stream — used by the entity recognizer's phone prior,
/// not the classifier rule (which relies on [`valid_us_phone`] instead).
#[must_use]
pub fn no_dominant_digit(candidate: &str) -> bool {
    let d = digits_only(candidate);
    if d.is_empty() {
        return false;
    }
    let mut counts = [0usize; 10];
    for &digit in &d {
        counts[digit as usize] += 1;
    }
    let max_count = counts.into_iter().max().unwrap_or(0);
    (max_count as f64 / d.len() as f64) <= 0.7
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssn_rejects_invalid_area() {
        assert!(!valid_ssn("000-12-3456"));
        assert!(!valid_ssn("666-12-3456"));
        assert!(!valid_ssn("900-12-3456"));
    }

    #[test]
    fn ssn_rejects_zero_group_or_serial() {
        assert!(!valid_ssn("123-00-4567"));
        assert!(!valid_ssn("123-45-0000"));
    }

    #[test]
    fn ssn_accepts_well_formed() {
        assert!(valid_ssn("123-45-6789"));
    }

    #[test]
    fn luhn_rejects_known_bad_card() {
        assert!(!luhn_valid("4111111111111112"));
    }

    #[test]
    fn luhn_accepts_known_good_card() {
        assert!(luhn_valid("4111111111111111"));
    }

    #[test]
    fn aba_known_good_and_bad() {
        assert!(valid_aba_routing("021000021"));
        assert!(!valid_aba_routing("123456789"));
    }

    #[test]
    fn iban_known_good() {
        assert!(valid_iban("DE89370400440532013000"));
    }

    #[test]
    fn iban_rejects_mutated() {
        assert!(!valid_iban("DE89370400440532013001"));
    }

    #[test]
    fn phone_rejects_bad_area_and_exchange() {
        assert!(!valid_us_phone("011-555-1234"));
        assert!(!valid_us_phone("415-011-1234"));
    }

    #[test]
    fn phone_rejects_repeating_digits() {
        assert!(!valid_us_phone("111-111-1111"));
    }

    #[test]
    fn phone_accepts_well_formed() {
        assert!(valid_us_phone("415-555-0199"));
    }

    #[test]
    fn no_dominant_digit_rejects_repeats() {
        assert!(!no_dominant_digit("555-555-5555"));
        assert!(no_dominant_digit("415-867-5309"));
    }
}
