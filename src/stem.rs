//! Porter stemmer for English words.
//!
//! Implements the five suffix-stripping steps of Porter (1980), "An algorithm
//! for suffix stripping". Input is lower-cased first. Words of two letters or
//! fewer, and words with non-ASCII letters, are returned lower-cased but
//! otherwise untouched.

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// "ion" is handled separately: it also needs the stem to end in s or t.
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Stem a single word
#[must_use]
pub fn stem(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.len() <= 2 || !lower.bytes().all(|b| b.is_ascii_lowercase()) {
        return lower;
    }

    let mut w = lower.into_bytes();
    step1a(&mut w);
    step1b(&mut w);
    step1c(&mut w);
    apply_rules(&mut w, STEP2_RULES, 0);
    apply_rules(&mut w, STEP3_RULES, 0);
    step4(&mut w);
    step5(&mut w);

    // Only ASCII letters were ever written
    String::from_utf8(w).unwrap_or_default()
}

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in `w`
fn measure(w: &[u8]) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for i in 0..w.len() {
        let vowel = !is_consonant(w, i);
        if !vowel && prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count
}

fn has_vowel(w: &[u8]) -> bool {
    (0..w.len()).any(|i| !is_consonant(w, i))
}

fn ends_double_consonant(w: &[u8]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

/// consonant-vowel-consonant ending, last letter not w, x or y
fn ends_cvc(w: &[u8]) -> bool {
    let n = w.len();
    n >= 3
        && is_consonant(w, n - 3)
        && !is_consonant(w, n - 2)
        && is_consonant(w, n - 1)
        && !matches!(w[n - 1], b'w' | b'x' | b'y')
}

fn replace_suffix(w: &mut Vec<u8>, suffix: &str, replacement: &str) {
    w.truncate(w.len() - suffix.len());
    w.extend_from_slice(replacement.as_bytes());
}

/// Apply the first rule whose suffix matches, if the remaining stem measures
/// above `threshold`. Later rules are not tried once a suffix matched.
fn apply_rules(w: &mut Vec<u8>, rules: &[(&str, &str)], threshold: usize) {
    if let Some((suffix, replacement)) = rules.iter().find(|(s, _)| w.ends_with(s.as_bytes()))
        && measure(&w[..w.len() - suffix.len()]) > threshold
    {
        replace_suffix(w, suffix, replacement);
    }
}

fn step1a(w: &mut Vec<u8>) {
    if w.ends_with(b"sses") {
        replace_suffix(w, "sses", "ss");
    } else if w.ends_with(b"ies") {
        replace_suffix(w, "ies", "i");
    } else if !w.ends_with(b"ss") && w.ends_with(b"s") {
        w.pop();
    }
}

fn step1b(w: &mut Vec<u8>) {
    if w.ends_with(b"eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }

    let suffix_len = if w.ends_with(b"ed") && has_vowel(&w[..w.len() - 2]) {
        2
    } else if w.ends_with(b"ing") && has_vowel(&w[..w.len() - 3]) {
        3
    } else {
        return;
    };
    w.truncate(w.len() - suffix_len);

    if w.ends_with(b"at") || w.ends_with(b"bl") || w.ends_with(b"iz") {
        w.push(b'e');
    } else if ends_double_consonant(w) && !matches!(w.last(), Some(b'l' | b's' | b'z')) {
        w.pop();
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push(b'e');
    }
}

fn step1c(w: &mut [u8]) {
    let n = w.len();
    if w.ends_with(b"y") && has_vowel(&w[..n - 1]) {
        w[n - 1] = b'i';
    }
}

fn step4(w: &mut Vec<u8>) {
    if w.ends_with(b"ion") {
        let stem = &w[..w.len() - 3];
        if measure(stem) > 1 && matches!(stem.last(), Some(b's' | b't')) {
            w.truncate(w.len() - 3);
        }
        return;
    }

    if let Some(suffix) = STEP4_SUFFIXES.iter().find(|s| w.ends_with(s.as_bytes()))
        && measure(&w[..w.len() - suffix.len()]) > 1
    {
        w.truncate(w.len() - suffix.len());
    }
}

fn step5(w: &mut Vec<u8>) {
    if w.ends_with(b"e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.pop();
        }
    }

    if w.ends_with(b"ll") && measure(w) > 1 {
        w.pop();
    }
}
