//! CSS Custom Properties `var()` Substitution
//!
//! [CSS Custom Properties for Cascading Variables Module Level 1 § 3](https://www.w3.org/TR/css-variables-1/#using-variables)
//!
//! "If a property value contains one or more `var()` functions, and those
//! functions are syntactically valid, the entire property's grammar must be
//! assumed to be valid at parse time. It is only syntax-checked at
//! computed-value time, after `var()` functions have been substituted."
//!
//! Styled nodes carry their declarations as raw strings, so substitution
//! works on text: each `var(--name[, fallback])` is replaced by the value of
//! the custom property, or by its fallback.

/// Maximum substitution depth to prevent infinite recursion from cycles.
///
/// [§ 2.3 Resolving Dependency Cycles](https://www.w3.org/TR/css-variables-1/#cycles)
///
/// "If there is a cycle in the dependency graph, all the custom properties
/// in the cycle are invalid at computed-value time."
///
/// We use a depth limit as a pragmatic approximation of cycle detection.
pub const MAX_SUBSTITUTION_DEPTH: u32 = 32;

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// Check if a raw value contains any `var()` function reference.
#[must_use]
pub fn contains_var(value: &str) -> bool {
    find_var(value).is_some()
}

/// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
///
/// "To substitute a `var()` in a property's value:
///  2. If the value of the custom property named by the first argument to
///     the `var()` function is anything but the initial value, replace the
///     `var()` function by the value of the corresponding custom property.
///  3. Otherwise, if the `var()` function has a fallback value as its second
///     argument, replace the `var()` function by the fallback value. If there
///     are any `var()` references in the fallback, substitute them as well.
///  4. Otherwise, the property containing the `var()` function is invalid at
///     computed-value time."
///
/// `lookup` returns the (already inherited) value of a custom property.
/// Returns `None` if substitution fails (guaranteed-invalid, unbalanced
/// parentheses, or a cycle deeper than [`MAX_SUBSTITUTION_DEPTH`]).
#[must_use]
pub fn substitute_var(
    value: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
    depth: u32,
) -> Option<String> {
    if depth > MAX_SUBSTITUTION_DEPTH {
        return None;
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = find_var(rest) {
        out.push_str(&rest[..start]);
        let args_start = start + "var(".len();
        let close = matching_paren(&rest[args_start..])? + args_start;
        let args = &rest[args_start..close];

        let (name, fallback) = match top_level_comma(args) {
            Some(comma) => (args[..comma].trim(), Some(&args[comma + 1..])),
            None => (args.trim(), None),
        };
        if !name.starts_with("--") {
            return None;
        }

        // STEP 2: the custom property's own value, which may itself use var().
        let replacement = match lookup(name) {
            Some(custom) => substitute_var(&custom, lookup, depth + 1)?,
            // STEP 3: the fallback, substituted as well.
            None => substitute_var(fallback?.trim(), lookup, depth + 1)?,
        };
        out.push_str(&replacement);
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    Some(out)
}

/// Byte offset of the next `var(` (ASCII case-insensitive), if any.
fn find_var(value: &str) -> Option<usize> {
    value
        .as_bytes()
        .windows(4)
        .position(|w| w.eq_ignore_ascii_case(b"var("))
}

/// Offset of the `)` closing an already-opened parenthesis.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Offset of the first comma not nested inside parentheses.
fn top_level_comma(s: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}
