//! Token substitution inside target values.

use tracing::debug;

use crate::sysdirs::SysDirs;

/// Replace `token` with `replacement` wherever the match is isolated,
/// i.e. not glued to an alphanumeric or underscore on either side.
pub fn replace_isolated(input: &str, token: &str, replacement: &str) -> String {
    replace_bounded(input, token, replacement, false)
}

/// Variant of [`replace_isolated`] that ignores ASCII case, for
/// tokens like folder names written `ownCloud` or `OwnCloud`.
pub fn replace_isolated_ci(input: &str, token: &str, replacement: &str) -> String {
    replace_bounded(input, token, replacement, true)
}

fn replace_bounded(input: &str, token: &str, replacement: &str, ci: bool) -> String {
    if token.is_empty() {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut pos = 0;
    // pos stays on a char boundary: it advances by whole chars, or by
    // the token length after an exact-length segment match.
    while let Some(ch) = input[pos..].chars().next() {
        let end = pos + token.len();
        if input.is_char_boundary(end) && segment_matches(&input[pos..end], token, ci) {
            let before_ok = input[..pos]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric() && c != '_');
            let after_ok = input[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric() && c != '_');
            if before_ok && after_ok {
                out.push_str(replacement);
                pos = end;
                continue;
            }
        }
        out.push(ch);
        pos += ch.len_utf8();
    }
    out
}

fn segment_matches(segment: &str, token: &str, ci: bool) -> bool {
    if ci {
        segment.eq_ignore_ascii_case(token)
    } else {
        segment == token
    }
}

/// Expand the well-known placeholder tokens against the directory
/// table. Percent tokens are plain substrings; the bare `$HOME` and
/// `~` forms only match at isolated positions.
pub fn apply(value: &str, dirs: &SysDirs) -> String {
    let home = dirs.home.to_string_lossy().into_owned();
    let documents = dirs.documents.to_string_lossy().into_owned();
    let plain: [(&str, String); 8] = [
        ("%APPDATA%", dirs.appdata.to_string_lossy().into_owned()),
        ("%LOCALAPPDATA%", dirs.local_appdata.to_string_lossy().into_owned()),
        ("%USERPROFILE%", home.clone()),
        ("%USER%", dirs.username.clone()),
        ("%MYDOCUMENTS%", documents.clone()),
        ("%MYDOCS%", documents),
        ("%PROFILESFOLDER%", dirs.profiles_root.to_string_lossy().into_owned()),
        ("%TEMP%", dirs.temp.to_string_lossy().into_owned()),
    ];
    let mut out = value.to_string();
    for (token, replacement) in &plain {
        if out.contains(token) {
            out = out.replace(token, replacement);
            debug!(token, "substituted placeholder");
        }
    }
    for token in ["$HOME", "~"] {
        let replaced = replace_isolated(&out, token, &home);
        if replaced != out {
            debug!(token, "substituted placeholder");
            out = replaced;
        }
    }
    out
}
