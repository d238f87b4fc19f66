//! Normalization of inline migration source text.

/// Remove the leading whitespace shared by every non-blank line.
///
/// Only spaces and tabs count as indentation. Lines holding nothing but
/// whitespace are reduced to their line terminator and do not take part in
/// computing the common margin.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_indent)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                &line[line.trim_end_matches(['\r', '\n']).len()..]
            } else {
                line.strip_prefix(margin).unwrap_or(line)
            }
        })
        .collect()
}

/// Dedent `code` and strip surrounding whitespace, giving the exact text
/// written to a migration file.
pub fn normalize_source(code: &str) -> String {
    dedent(code).trim().to_string()
}

fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
