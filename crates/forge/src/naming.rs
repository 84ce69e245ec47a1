//! Catalog-style names
//!
//! Stars take capital suffixes (A, B), planets lowercase letters from b,
//! moons Roman numerals, belts a running number.

use celestial::SeededRng;
use rulepack::RulePack;

const PLANET_LETTERS: &[u8] = b"bcdefghijklmnopqrstuvwxyz";

/// Base name like "HD-4821", prefix drawn from the `catalog` table
pub fn catalog_name(pack: &RulePack, rng: &mut SeededRng) -> String {
    let prefix = pack
        .distribution("catalog")
        .and_then(|t| t.pick(rng))
        .unwrap_or("HD")
        .to_string();
    format!("{}-{}", prefix, rng.next_int(100, 9999))
}

/// "A" for the primary, "B" for the companion, and so on
pub fn star_suffix(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// Zero-based planet index to its letter: 0 → "b", 24 → "z", 25 → "bb"
pub fn planet_letter(index: usize) -> String {
    let n = PLANET_LETTERS.len();
    let letter = |i: usize| char::from(PLANET_LETTERS[i % n]);
    if index < n {
        letter(index).to_string()
    } else {
        format!("{}{}", letter(index / n - 1), letter(index))
    }
}

/// Zero-based moon index to its Roman numeral: 0 → "I", 3 → "IV"
pub fn moon_numeral(index: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    NUMERALS
        .iter()
        .fold((String::new(), index + 1), |(mut acc, mut remaining), &(value, numeral)| {
            while remaining >= value {
                acc.push_str(numeral);
                remaining -= value;
            }
            (acc, remaining)
        })
        .0
}

pub fn planet_name(host: &str, index: usize) -> String {
    format!("{} {}", host, planet_letter(index))
}

pub fn moon_name(planet: &str, index: usize) -> String {
    format!("{} {}", planet, moon_numeral(index))
}

pub fn belt_name(host: &str, index: usize) -> String {
    format!("{} Belt {}", host, index + 1)
}

pub fn ring_name(host: &str) -> String {
    format!("{host} Ring")
}

/// The first generated name, counting up from index 0, that no entry of
/// `taken` already uses
pub fn first_free_name(taken: &[String], name_at: impl Fn(usize) -> String) -> String {
    (0..)
        .map(name_at)
        .find(|name| !taken.contains(name))
        .unwrap_or_default()
}

/// Swaps `old_prefix` for `new_prefix` when `name` was derived from it
pub fn replace_prefix(name: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    let rest = name.strip_prefix(old_prefix)?;
    (rest.is_empty() || rest.starts_with(' ')).then(|| format!("{new_prefix}{rest}"))
}
