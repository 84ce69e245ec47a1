use celestial::SeededRng;
use rulepack::RulePack;

use crate::naming::*;

#[test]
fn test_planet_letters_start_at_b() {
    assert_eq!(planet_letter(0), "b");
    assert_eq!(planet_letter(1), "c");
    assert_eq!(planet_letter(24), "z");
    assert_eq!(planet_letter(25), "bb");
    assert_eq!(planet_letter(26), "bc");
}

#[test]
fn test_moon_numerals() {
    let numerals: Vec<String> = (0..10).map(moon_numeral).collect();
    assert_eq!(numerals, ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"]);
    assert_eq!(moon_numeral(13), "XIV");
    assert_eq!(moon_numeral(48), "XLIX");
}

#[test]
fn test_body_names() {
    assert_eq!(star_suffix(0), "A");
    assert_eq!(star_suffix(1), "B");
    assert_eq!(planet_name("HD-4821", 2), "HD-4821 d");
    assert_eq!(moon_name("HD-4821 d", 0), "HD-4821 d I");
    assert_eq!(belt_name("HD-4821 A", 0), "HD-4821 A Belt 1");
    assert_eq!(ring_name("HD-4821 d"), "HD-4821 d Ring");
}

#[test]
fn test_catalog_name_is_reproducible() {
    let pack = RulePack::standard().unwrap();
    let a = catalog_name(&pack, &mut SeededRng::from_seed_str("naming"));
    let b = catalog_name(&pack, &mut SeededRng::from_seed_str("naming"));
    assert_eq!(a, b);

    let (prefix, number) = a.split_once('-').unwrap();
    assert!(pack.distributions["catalog"].0.contains_key(prefix));
    let number: i64 = number.parse().unwrap();
    assert!((100..=9999).contains(&number));
}

#[test]
fn test_replace_prefix_only_matches_whole_words() {
    assert_eq!(
        replace_prefix("HD-4821 b I", "HD-4821 b", "Arrakis").as_deref(),
        Some("Arrakis I")
    );
    assert_eq!(replace_prefix("HD-4821", "HD-4821", "Dune").as_deref(), Some("Dune"));
    assert_eq!(replace_prefix("HD-48210 b", "HD-4821", "Dune"), None);
    assert_eq!(replace_prefix("Arrakis", "HD-4821", "Dune"), None);
}

#[test]
fn test_first_free_name_fills_gaps() {
    let taken = vec!["Sol c".to_string(), "Sol Belt 1".to_string()];
    assert_eq!(first_free_name(&taken, |i| planet_name("Sol", i)), "Sol b");
    let taken = vec!["Sol b".to_string(), "Sol d".to_string()];
    assert_eq!(first_free_name(&taken, |i| planet_name("Sol", i)), "Sol c");
    assert_eq!(first_free_name(&taken, |i| belt_name("Sol", i)), "Sol Belt 1");
    assert_eq!(first_free_name(&[], |i| moon_name("Sol b", i)), "Sol b I");
}
