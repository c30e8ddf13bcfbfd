//! City-name normalization used for fixed-rate table lookups.
//!
//! The rule: trim, collapse runs of whitespace to one space, lowercase, and
//! fold Latin diacritics to their base letters. Combining marks left over
//! from decomposed (NFD) input are dropped, so precomposed and decomposed
//! spellings agree. "Yaoundé", "Yaounde" and " yaounde " all normalize to
//! `"yaounde"`.

/// Normalize a city name for table matching.
#[must_use]
pub fn normalize_city(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        for c in word.chars().flat_map(char::to_lowercase) {
            if is_combining_mark(c) {
                continue;
            }
            match fold_diacritic(c) {
                Some(folded) => out.push_str(folded),
                None => out.push(c),
            }
        }
    }
    out
}

/// Combining Diacritical Marks block (U+0300..=U+036F).
fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{300}'..='\u{36f}')
}

/// Map a lowercase accented Latin letter to its unaccented spelling.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        _ => return None,
    };
    Some(folded)
}
