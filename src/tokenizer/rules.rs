//! Pattern tables for the English word tokenizer.
//!
//! Every function here returns plain pattern strings; anchoring and
//! compilation happen in [`super::Tokenizer::new`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Chunk text → the pieces it must be split into, verbatim.
pub type ExceptionMap = HashMap<String, Vec<String>>;

// ----- CHAR CLASS CONTENT -----
pub const ALPHA_LOWER: &str = "a-z";
pub const ALPHA_UPPER: &str = "A-Z";
pub const ALPHA: &str = "a-zA-Z";
pub const ALPHANUM: &str = "a-zA-Z0-9";
pub const DIGITS: &str = "0-9";
pub const QUOTES: &str = r#"'"`‘’“”„»«"#;
pub const CURRENCY: &str = r"\$|£|€|¥|¢|₹";

/// Bracketed stage directions, `(...)` or `[...]`, shortest match.
pub const STAGE_DIRECTION: &str = r"[(\[].*?[)\]]";

/// Words the apostrophe/period rules can't split the way English does.
const MULTI_SPLITS: &[(&str, &[&str])] = &[
    ("cannot", &["can", "not"]),
    ("d'ye", &["d'", "ye"]),
    ("gimme", &["gim", "me"]),
    ("gonna", &["gon", "na"]),
    ("gotta", &["got", "ta"]),
    ("lemme", &["lem", "me"]),
    ("more'n", &["more", "'n"]),
    ("wanna", &["wan", "na"]),
    ("'tis", &["'t", "is"]),
    ("'twas", &["'t", "was"]),
];

/// Kept as one token even though they end in a period.
const ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Dr.", "Jr.", "Sr.", "St.", "Mt.", "Prof.", "Rev.",
    "Gen.", "Gov.", "Sen.", "Rep.", "Capt.", "Lt.", "Sgt.", "Inc.", "Ltd.",
    "Co.", "Corp.", "Bros.", "vs.", "etc.", "e.g.", "i.e.", "a.m.", "p.m.",
    "U.S.", "U.K.", "N.Y.", "L.A.", "D.C.", "Ph.D.",
];

// Uppercases the first alphabetic char, so "'tis" becomes "'Tis".
fn capitalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut done = false;
    for c in s.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

// Re-cuts `cased` at the byte boundaries of `pieces`. Only valid while the
// casing change keeps byte lengths, which holds for the ASCII tables above.
fn recut(cased: &str, pieces: &[&str]) -> Vec<String> {
    let mut start = 0;
    pieces
        .iter()
        .map(|p| {
            let end = start + p.len();
            let piece = cased[start..end].to_string();
            start = end;
            piece
        })
        .collect()
}

fn build_exceptions() -> ExceptionMap {
    let mut exc = ExceptionMap::new();

    for &(key, pieces) in MULTI_SPLITS {
        for apostrophe in ['\'', '’'] {
            let key = key.replace('\'', &apostrophe.to_string());
            let pieces: Vec<String> = pieces
                .iter()
                .map(|p| p.replace('\'', &apostrophe.to_string()))
                .collect();
            let pieces: Vec<&str> = pieces.iter().map(String::as_str).collect();

            for cased in [key.clone(), capitalize(&key), key.to_uppercase()] {
                exc.insert(cased.clone(), recut(&cased, &pieces));
            }
        }
    }

    for &abbr in ABBREVIATIONS {
        exc.insert(abbr.to_string(), vec![abbr.to_string()]);
    }

    exc
}

pub static EXCEPTIONS: Lazy<ExceptionMap> = Lazy::new(build_exceptions);

// ----- PEELING RULES -----

/// Split off the front of a chunk, one at a time.
pub fn prefix_patterns() -> Vec<String> {
    let mut patterns: Vec<String> = vec![
        r"\.{2,}".into(),
        "…".into(),
        "-{2,}".into(),
        "—".into(),
        "–".into(),
        // a leading apostrophe is a quote unless it opens a contraction
        r"'(?!(?i:re|ve|ll|m|t|s|d|n)\b)".into(),
    ];
    patterns.extend(
        [r#"""#, "“", "‘", "„", "«", "»", "`", r"\(", r"\[", r"\{", "<"]
            .iter()
            .map(|s| s.to_string()),
    );
    patterns.extend(CURRENCY.split('|').map(String::from));
    patterns.extend(
        ["#", "&", r"\*", "§", "%", "=", r"\+(?![0-9])"]
            .iter()
            .map(|s| s.to_string()),
    );
    patterns
}

/// Split off the back of a chunk. Earlier patterns win.
pub fn suffix_patterns() -> Vec<String> {
    let mut patterns: Vec<String> = vec![
        r"\.{2,}".into(),
        "…".into(),
        "-{2,}".into(),
        // contractions: do|n't, I|'m, Michael|'s
        r"(?<=[^'’])(?i:n['’]t)".into(),
        r"(?<=[^'’])['’](?i:s|m|d|ll|re|ve)".into(),
    ];
    patterns.extend(
        [
            ":", ";", "!", r"\?", ",", r"\)", r"\]", r"\}", ">", r#"""#, "'", "`",
            "”", "’", "»", "«", "—", "–", r"\*",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    patterns.push(format!(
        r"(?<=[{alphanum}%²\-+{quotes}])\.",
        alphanum = ALPHANUM,
        quotes = QUOTES,
    ));
    patterns
}

/// Infixes found with Aho-Corasick, longest first.
pub fn infix_literals() -> Vec<String> {
    let mut literals: Vec<String> = ["--", "—", "–", "…", "!", "?", ";", "\"", "“", "”"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    literals.sort_by_key(|s| std::cmp::Reverse(s.len()));
    literals
}

/// Infixes that need context on either side.
pub fn infix_patterns() -> Vec<String> {
    vec![
        r"\.{2,}".to_string(),
        // 1+2, 3-4
        format!(r"(?<=[{d}])[+\-*^](?=[{d}-])", d = DIGITS),
        // Scranton.Stamford
        format!(
            r"(?<=[{lower}{quotes}])\.(?=[{upper}{quotes}])",
            lower = ALPHA_LOWER,
            upper = ALPHA_UPPER,
            quotes = QUOTES,
        ),
        format!(r"(?<=[{a}]),(?=[{a}])", a = ALPHA),
        format!(r"(?<=[{an}]):(?=[{a}])", an = ALPHANUM, a = ALPHA),
    ]
}

/// Chunks that are one token as a whole: numbers, money, ellipses, entities.
pub fn token_match_pattern() -> String {
    let parts: Vec<String> = vec![
        format!(r"(?:{})[0-9]{{1,3}}(?:,[0-9]{{3}})*(?:\.[0-9]{{2}})?", CURRENCY),
        format!(r"(?:{})[0-9]+(?:\.[0-9]{{2}})?", CURRENCY),
        r"[+-]?\d{1,3}(?:,\d{3})*(?:\.\d+)?".to_string(),
        r"[+-]?\d+(?:\.\d+)?".to_string(),
        r"[+-]?\.\d+".to_string(),
        r"\.{2,}".to_string(),
        "…".to_string(),
        "%".to_string(),
        r"&(?:amp|lt|gt|quot|apos);".to_string(),
    ];
    format!(r"^(?:{})$", parts.join("|"))
}

/// Explicit URLs only; bare domains fall through to the peeling rules.
pub fn url_match_pattern() -> String {
    r"^(?:[\w+\-.]{2,}://|www\.)\S+$".to_string()
}
