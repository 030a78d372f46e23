//! Glob-style key matching (MATCH option of SCAN)
//!
//! Supports:
//! - * : any run of bytes, including none
//! - ? : exactly one byte
//! - [abc], [a-z], [^abc] : one byte from (or not from) a class
//! - \x : the byte x taken literally

/// Check if a key matches a glob pattern
///
/// Iterative, with a single backtrack point: on a mismatch the most recent
/// `*` absorbs one more key byte and matching resumes just after it. Time
/// is bounded by pattern length times key length and stack use is constant.
pub fn matches(pattern: &[u8], key: &[u8]) -> bool {
    let mut p = 0;
    let mut k = 0;
    // (pattern position after the last star, key position it resumes at)
    let mut star: Option<(usize, usize)> = None;

    while k < key.len() {
        match step(pattern, p, key[k]) {
            Step::Star => {
                p += 1;
                star = Some((p, k));
                continue;
            }
            Step::Hit(next) => {
                p = next;
                k += 1;
                continue;
            }
            Step::Miss => {}
        }

        match star {
            Some((resume, absorbed)) => {
                p = resume;
                k = absorbed + 1;
                star = Some((resume, k));
            }
            None => return false,
        }
    }

    // Key exhausted: only stars may remain
    pattern[p..].iter().all(|&b| b == b'*')
}

/// Outcome of matching one pattern token against one key byte
enum Step {
    /// The token is a `*`
    Star,
    /// The byte is accepted; the next token starts at this position
    Hit(usize),
    Miss,
}

fn step(pattern: &[u8], p: usize, byte: u8) -> Step {
    match &pattern[p.min(pattern.len())..] {
        [] => Step::Miss,
        [b'*', ..] => Step::Star,
        [b'?', ..] => Step::Hit(p + 1),
        [b'[', class @ ..] => {
            let (hit, after) = match_class(class, byte);
            if hit {
                Step::Hit(pattern.len() - after.len())
            } else {
                Step::Miss
            }
        }
        [b'\\', escaped, ..] if *escaped == byte => Step::Hit(p + 2),
        [b'\\', _, ..] => Step::Miss,
        [literal, ..] if *literal == byte => Step::Hit(p + 1),
        _ => Step::Miss,
    }
}

/// Match one byte against a character class
///
/// `class` starts just after the opening bracket. Returns whether the byte
/// is admitted and the pattern remaining after the closing bracket. An
/// unterminated class runs to the end of the pattern.
fn match_class(class: &[u8], byte: u8) -> (bool, &[u8]) {
    let (negate, mut class) = match class.split_first() {
        Some((b'^', rest)) => (true, rest),
        _ => (false, class),
    };

    let mut hit = false;
    loop {
        match class {
            [] => break,
            [b']', rest @ ..] => {
                class = rest;
                break;
            }
            [b'\\', escaped, rest @ ..] => {
                hit |= *escaped == byte;
                class = rest;
            }
            [low, b'-', high, rest @ ..] if *high != b']' => {
                let (low, high) = if low <= high { (*low, *high) } else { (*high, *low) };
                hit |= (low..=high).contains(&byte);
                class = rest;
            }
            [single, rest @ ..] => {
                hit |= *single == byte;
                class = rest;
            }
        }
    }

    (hit != negate, class)
}
