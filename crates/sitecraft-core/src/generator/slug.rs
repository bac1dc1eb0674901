//! Slug derivation (§4.C.1): a total function from a normalized brand name
//! to a URL-safe slug, independent of the generator's token resolution.

/// Cyrillic (Russian) lowercase letter -> Latin transliteration. Applied
/// before lowercasing the rest of the string so mixed-script names
/// transliterate consistently.
const CYRILLIC_TABLE: &[(char, &str)] = &[
    ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"),
    ('е', "e"), ('ё', "e"), ('ж', "zh"), ('з', "z"), ('и', "i"),
    ('й', "i"), ('к', "k"), ('л', "l"), ('м', "m"), ('н', "n"),
    ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"),
    ('у', "u"), ('ф', "f"), ('х', "h"), ('ц', "ts"), ('ч', "ch"),
    ('ш', "sh"), ('щ', "sch"), ('ъ', ""), ('ы', "y"), ('ь', ""),
    ('э', "e"), ('ю', "yu"), ('я', "ya"),
];

fn transliterate_cyrillic(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let lower = c.to_lowercase().next().unwrap_or(c);
        if let Some((_, latin)) = CYRILLIC_TABLE.iter().find(|(cyr, _)| *cyr == lower) {
            out.push_str(latin);
        } else {
            out.push(c);
        }
    }
    out
}

/// Strips Unicode combining marks (accents) left behind after NFD-style
/// decomposition is not performed here in full, but covers the common
/// combining diacritical marks block directly.
fn strip_combining_marks(input: &str) -> String {
    input
        .chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

/// Derives a URL-safe slug from a brand name: transliterate Cyrillic,
/// strip combining marks, lowercase, collapse any run of non-`[a-z0-9]`
/// into a single hyphen, trim leading/trailing hyphens, truncate at 50
/// code points. An empty result falls back to `"site"`.
pub fn slug(brand_name: &str) -> String {
    let transliterated = transliterate_cyrillic(brand_name);
    let stripped = strip_combining_marks(&transliterated);
    let lowered = stripped.to_lowercase();

    let mut result = String::with_capacity(lowered.len());
    let mut prev_was_hyphen = true; // trims a leading run
    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }
    if result.ends_with('-') {
        result.pop();
    }

    let truncated: String = result.chars().take(50).collect();
    let truncated = truncated.trim_end_matches('-').to_string();

    if truncated.is_empty() {
        "site".to_string()
    } else {
        truncated
    }
}
