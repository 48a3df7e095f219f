use quickcheck::quickcheck;
use thompson_regex::Regex;

/// Spell a bit string over the alphabet {a, b}.
fn ab(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { 'a' } else { 'b' }).collect()
}

quickcheck! {
    fn star_accepts_only_repetitions(bits: Vec<bool>) -> bool {
        let re = Regex::new("a*").unwrap();
        re.is_match(&ab(&bits)) == bits.iter().all(|&b| b)
    }

    fn even_length(bits: Vec<bool>) -> bool {
        let re = Regex::new("((a|b)(a|b))*").unwrap();
        re.is_match(&ab(&bits)) == (bits.len() % 2 == 0)
    }

    fn second_to_last_is_a(bits: Vec<bool>) -> bool {
        let re = Regex::new("(a|b)*a(a|b)").unwrap();
        let expected = bits.len() >= 2 && bits[bits.len() - 2];
        re.is_match(&ab(&bits)) == expected
    }

    fn literal_pattern_matches_only_itself(bits: Vec<bool>, other: Vec<bool>) -> bool {
        let pattern = ab(&bits);
        let re = Regex::new(&pattern).unwrap();
        re.is_match(&pattern) && re.is_match(&ab(&other)) == (bits == other)
    }

    fn clone_agrees_with_original(bits: Vec<bool>) -> bool {
        let re = Regex::new("(a*b|ba*)*(ab)*").unwrap();
        let copy = re.clone();
        let input = ab(&bits);
        re.is_match(&input) == copy.is_match(&input)
    }
}
