//! Identifier tokenization
//!
//! Splits method names at case and separator boundaries and lowercases the
//! pieces:
//!
//! ```text
//! whenInputInvalidThenThrows  ->  when input invalid then throws
//! test_user_login             ->  test user login
//! getURL                      ->  get u r l
//! ```
//!
//! Two configurations exist side by side. The pattern generalizer
//! canonicalizes verb forms (`thrown` -> `throws`, `asserted` -> `expect`)
//! so equivalent names collapse to one template; the token and n-gram
//! models keep the raw forms.

/// Whether [`tokenize`] maps verb variants onto a canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonicalize {
    Yes,
    No,
}

/// Split an identifier into lowercase tokens.
///
/// A new token starts before every ASCII uppercase letter except at
/// position 0, and at every `_` or `-` (the separator itself is dropped).
/// Blank input and separator-only input produce an empty sequence.
pub fn tokenize(identifier: &str, canonicalize: Canonicalize) -> Vec<String> {
    let mut tokens = Vec::new();
    if identifier.trim().is_empty() {
        return tokens;
    }

    let mut current = String::new();
    for (i, ch) in identifier.chars().enumerate() {
        match ch {
            '_' | '-' => flush(&mut current, &mut tokens, canonicalize),
            c if c.is_ascii_uppercase() && i > 0 => {
                flush(&mut current, &mut tokens, canonicalize);
                current.push(c);
            }
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens, canonicalize);

    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<String>, canonicalize: Canonicalize) {
    if current.trim().is_empty() {
        current.clear();
        return;
    }
    let lower = current.to_lowercase();
    current.clear();
    match canonicalize {
        Canonicalize::Yes => tokens.push(canonical_form(&lower).to_string()),
        Canonicalize::No => tokens.push(lower),
    }
}

/// Map a lowercase token onto its canonical verb form.
///
/// Idempotent: canonical forms map to themselves.
pub fn canonical_form(token: &str) -> &str {
    match token {
        "throw" | "throws" | "thrown" => "throws",
        "assert" | "asserts" | "asserted" | "expect" | "expects" | "expected" => "expect",
        other => other,
    }
}

/// Canonicalize an already tokenized sequence.
pub fn canonicalize_all(tokens: &[String]) -> Vec<String> {
    tokens.iter().map(|t| canonical_form(t).to_string()).collect()
}

/// Word split used by the phrase heuristic.
///
/// Splits at lower→upper transitions, letter↔digit transitions, and runs of
/// `_`, `-` or whitespace. Unlike [`tokenize`], an uppercase run such as
/// `URL` stays one word.
pub fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in identifier.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            push_word(&mut current, &mut words);
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let boundary = (p.is_ascii_lowercase() && ch.is_ascii_uppercase())
                || (p.is_ascii_alphabetic() && ch.is_ascii_digit())
                || (p.is_ascii_digit() && ch.is_ascii_alphabetic());
            if boundary {
                push_word(&mut current, &mut words);
            }
        }
        current.push(ch);
        prev = Some(ch);
    }
    push_word(&mut current, &mut words);

    words
}

fn push_word(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(current.to_lowercase());
        current.clear();
    }
}
