/// Levenshtein distance counted in `char`s.
pub fn edit_distance(source: &str, target: &str) -> usize {
    strsim::levenshtein(source, target)
}

/// Title-case check: at least one cased letter, every upper-case letter
/// starts a cased run and every lower-case letter continues one.
///
/// `"Venus"` and `"Saint Joan"` are title case; `"venus"`, `"McCoy"` and
/// `"USA"` are not.
pub fn is_title(s: &str) -> bool {
    let mut any_cased = false;
    let mut prev_cased = false;
    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if ch.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("actress", "actor"), 4);
        assert_eq!(edit_distance("goddess", "god"), 4);
        assert_eq!(edit_distance("sculptress", "sculpturer"), 3);
    }

    #[test]
    fn empty_and_identical() {
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
    }

    #[test]
    fn title_detection() {
        assert!(is_title("Venus"));
        assert!(is_title("Saint Joan"));
        assert!(!is_title("venus"));
        assert!(!is_title("McCoy"));
        assert!(!is_title("USA"));
        assert!(!is_title("123"));
    }
}
