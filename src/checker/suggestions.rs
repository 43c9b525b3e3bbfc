use crate::checker::dictionary::Dictionary;

/// Most candidates looked at by the short-word scan.
const SCAN_LIMIT: usize = 100;

/// Generate ranked spelling suggestions using edit distance.
///
/// `extra` holds words accepted outside the main dictionary (session and
/// personal words); they are offered alongside dictionary words.
pub fn generate(
    word: &str,
    dictionary: &Dictionary,
    extra: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let word = word.to_lowercase();
    let length = word.chars().count();
    let mut suggestions = Vec::new();

    // 1. Try prefix matching (fast)
    if length >= 3 {
        let mut prefix_matches = with_prefix(&word, 3, dictionary, extra);
        prefix_matches.sort_by_key(|w| edit_distance(&word, w));
        prefix_matches.truncate(max_suggestions);

        for suggestion in prefix_matches {
            if suggestion != word && edit_distance(&word, &suggestion) <= 2 {
                push_unique(&mut suggestions, suggestion);
            }
        }
    }

    if suggestions.len() >= max_suggestions {
        suggestions.truncate(max_suggestions);
        return suggestions;
    }

    // 2. Try common transformations (medium speed)
    for transform in generate_transformations(&word) {
        let known = dictionary.contains(&transform)
            || extra.iter().any(|w| w.to_lowercase() == transform);
        if known {
            push_unique(&mut suggestions, transform);
            if suggestions.len() >= max_suggestions {
                return suggestions;
            }
        }
    }

    // 3. Try a shorter prefix
    if length >= 2 {
        let mut prefix_matches = with_prefix(&word, 2, dictionary, extra);
        prefix_matches.sort_by_key(|w| edit_distance(&word, w));

        for candidate in prefix_matches {
            if candidate != word && edit_distance(&word, &candidate) <= 3 {
                push_unique(&mut suggestions, candidate);
                if suggestions.len() >= max_suggestions {
                    return suggestions;
                }
            }
        }
    }

    // 4. Limited full scan, only for very short words
    if suggestions.len() < max_suggestions && length <= 3 {
        let near_length = |w: &str| w.chars().count().abs_diff(length) <= 1;
        let mut candidates: Vec<_> = dictionary
            .first_words_where(SCAN_LIMIT, near_length)
            .into_iter()
            .chain(extra.iter().map(|w| w.to_lowercase()).filter(|w| near_length(w.as_str())))
            .take(SCAN_LIMIT)
            .filter_map(|w| {
                let dist = edit_distance(&word, &w);
                if dist > 0 && dist <= 2 && !suggestions.contains(&w) {
                    Some((dist, w))
                } else {
                    None
                }
            })
            .collect();

        candidates.sort();

        for (_, candidate) in candidates {
            push_unique(&mut suggestions, candidate);
            if suggestions.len() >= max_suggestions {
                break;
            }
        }
    }

    suggestions.truncate(max_suggestions);
    suggestions
}

fn push_unique(suggestions: &mut Vec<String>, candidate: String) {
    if !suggestions.contains(&candidate) {
        suggestions.push(candidate);
    }
}

/// Dictionary and extra words sharing the first `chars` characters of `word`.
fn with_prefix(word: &str, chars: usize, dictionary: &Dictionary, extra: &[&str]) -> Vec<String> {
    let prefix: String = word.chars().take(chars).collect();
    let mut matches = dictionary.words_with_prefix(&prefix);

    for candidate in extra {
        let candidate = candidate.to_lowercase();
        if candidate.starts_with(&prefix) && !matches.contains(&candidate) {
            matches.push(candidate);
        }
    }

    matches
}

/// Levenshtein distance over chars, keeping one row of the table at a time.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a.chars().enumerate() {
        current[0] = i + 1;

        for (j, b_char) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(a_char != *b_char);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Letters commonly typed in place of each other.
const CONFUSABLE: &[(char, char)] = &[
    ('a', 'e'),
    ('e', 'i'),
    ('i', 'o'),
    ('o', 'u'),
    ('u', 'o'),
    ('b', 'v'),
    ('c', 'k'),
    ('f', 'v'),
    ('g', 'j'),
    ('m', 'n'),
    ('s', 'z'),
    ('t', 'd'),
];

/// Single-edit variants of `word`: a dropped letter, two neighbours swapped,
/// a confusable letter replaced or a letter doubled.
fn generate_transformations(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let splice = |i: usize, middle: &[char], skip: usize| -> String {
        chars[..i]
            .iter()
            .chain(middle)
            .chain(&chars[i + skip..])
            .collect()
    };

    let mut variants = Vec::new();

    for i in 0..chars.len() {
        variants.push(splice(i, &[], 1));
    }

    for i in 0..chars.len().saturating_sub(1) {
        variants.push(splice(i, &[chars[i + 1], chars[i]], 2));
    }

    for (i, &ch) in chars.iter().enumerate() {
        for &(_, to) in CONFUSABLE.iter().filter(|(from, _)| *from == ch) {
            variants.push(splice(i, &[to], 1));
        }
        variants.push(splice(i, &[ch, ch], 1));
    }

    variants
}
