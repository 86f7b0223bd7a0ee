//! Enumeration range parsing
//!
//! `{alpha=0,beta=1,gamma=2}` -> `["alpha", "beta", "gamma"]`
//!
//! Ordinals are assumed zero-based and already in descriptor order; the
//! numeric values are skipped, not used for sorting.

/// Parse a range descriptor into ordered ordinal names.
///
/// Returns `None` for a missing or empty descriptor, or when no names survive.
pub fn parse(descriptor: Option<&str>) -> Option<Vec<String>> {
    let descriptor = descriptor.filter(|d| !d.is_empty())?;

    let mut names = Vec::new();
    let mut current = String::new();
    let mut chars = descriptor.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '{' | '}' | ' ' => {}
            '=' => {
                // Skip the "=value" segment
                for skipped in chars.by_ref() {
                    if skipped == ',' {
                        flush(&mut current, &mut names);
                        break;
                    }
                    if skipped == '}' {
                        break;
                    }
                }
            }
            ',' => flush(&mut current, &mut names),
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut names);

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

fn flush(current: &mut String, names: &mut Vec<String>) {
    if !current.is_empty() {
        names.push(std::mem::take(current));
    }
}
