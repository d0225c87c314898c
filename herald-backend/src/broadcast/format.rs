//! Payload formatting for broadcasts.

/// Strip common indentation and surrounding whitespace, then append the
/// footer after a blank line. An empty footer appends nothing.
pub fn format_broadcast(text: &str, footer: &str) -> String {
    let clean = dedent(text);
    let clean = clean.trim();
    if footer.is_empty() {
        clean.to_string()
    } else {
        format!("{}\n\n{}", clean, footer)
    }
}

/// Remove the longest run of spaces and tabs shared by every non-blank line.
/// Lines holding only spaces and tabs are emptied and do not count toward the
/// margin. Other whitespace (NBSP, ideographic space) is content.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !is_blank(line))
        .map(|line| &line[..line.len() - line.trim_start_matches(is_indent).len()])
        .fold(None, |acc: Option<&str>, indent| match acc {
            None => Some(indent),
            Some(prev) => Some(common_prefix(prev, indent)),
        })
        .unwrap_or("");

    text.lines()
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_blank(line: &str) -> bool {
    line.trim_start_matches(is_indent).is_empty()
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((idx, c), _)| idx + c.len_utf8())
        .unwrap_or(0);
    &a[..len]
}
