/// Match a file name against a shell glob supporting `*` and `?`.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    matches_at(pattern.as_bytes(), name.as_bytes())
}

fn matches_at(pattern: &[u8], name: &[u8]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((b'*', rest)) => (0..=name.len()).any(|skip| matches_at(rest, &name[skip..])),
        Some((b'?', rest)) => !name.is_empty() && matches_at(rest, &name[1..]),
        Some((c, rest)) => name.first() == Some(c) && matches_at(rest, &name[1..]),
    }
}
