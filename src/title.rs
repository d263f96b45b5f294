// SPDX-License-Identifier: PMPL-1.0-or-later

//! Display-title casing for native language names.
//!
//! Locale registries report native names the way they appear mid-sentence
//! (`français`, `português do brasil`). Language pickers show them as titles,
//! so every word starts with an uppercase letter and the rest is lowercased.
//! A "word" is a run of cased letters: digits, punctuation and uncased
//! scripts (CJK, Devanagari, ...) all start a new word.

/// Title-case `text`: uppercase the first cased letter of every word and
/// lowercase the others.
///
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
/// ```
/// use language_names::title::title_case;
/// assert_eq!(title_case("português do brasil"), "Português Do Brasil");
/// assert_eq!(title_case("ENGLISH"), "English");
/// assert_eq!(title_case("日本語"), "日本語");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;

    for ch in text.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut out, ch);
        }
        previous_cased = is_cased(ch);
    }

    out
}

/// Titlecase form of `ch`. The Latin digraph letters have their own
/// titlecase forms; when the uppercase mapping expands (`ß` to `SS`) only
/// the first letter stays uppercase.
fn push_titlecase(out: &mut String, ch: char) {
    match ch {
        'Ǆ' | 'ǅ' | 'ǆ' => out.push('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => out.push('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => out.push('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => out.push('ǲ'),
        _ => {
            let mut upper = ch.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }
    }
}

/// Uppercase, lowercase and titlecase letters.
fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || ch.to_lowercase().ne(ch.to_uppercase())
}
