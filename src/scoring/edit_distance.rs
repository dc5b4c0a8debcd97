/// Levenshtein distance over sequences of discrete units.
///
/// Substitution, insertion and deletion each cost 1; no transposition.
/// Keeps two rolling rows sized by the shorter sequence.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, long_unit) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, short_unit) in short.iter().enumerate() {
            curr[j + 1] = min3(
                prev[j + 1] + 1,
                curr[j] + 1,
                prev[j] + usize::from(long_unit != short_unit),
            );
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[inline(always)]
fn min3(a: usize, b: usize, c: usize) -> usize {
    a.min(b).min(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn identical_sequences_have_zero_distance() {
        assert_eq!(levenshtein(&units("k ae t"), &units("k ae t")), 0);
    }

    #[test]
    fn empty_side_costs_other_length() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(levenshtein(&empty, &empty), 0);
        assert_eq!(levenshtein(&units("k ae t"), &empty), 3);
        assert_eq!(levenshtein(&empty, &units("k ae")), 2);
    }

    #[test]
    fn single_edits() {
        assert_eq!(levenshtein(&units("d ae t"), &units("k ae t")), 1);
        assert_eq!(levenshtein(&units("k ae t s"), &units("k ae t")), 1);
        assert_eq!(levenshtein(&units("k t"), &units("k ae t")), 1);
    }

    #[test]
    fn transposition_costs_two() {
        assert_eq!(levenshtein(&units("ae k"), &units("k ae")), 2);
    }

    #[test]
    fn symmetric() {
        let a = units("s ih t ih ng");
        let b = units("s ae t ng k");
        assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn character_sequences() {
        let a: Vec<char> = "kitten".chars().collect();
        let b: Vec<char> = "sitting".chars().collect();
        assert_eq!(levenshtein(&a, &b), 3);
    }

    #[test]
    fn multi_char_units_compare_whole() {
        // "ae" vs "a" is one substitution at unit level.
        assert_eq!(levenshtein(&units("k ae"), &units("k a")), 1);
    }
}
