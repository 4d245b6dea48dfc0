//! Removal of code regions before scanning.
//!
//! Three kinds of regions are removed, in order: fenced blocks, inline
//! backtick spans, and HTML `<code>` elements. Unterminated regions are kept.
//! Removing one region can join text into a new one, so the passes repeat
//! until nothing changes.

const FENCE_MIN_RUN: usize = 3;
const CODE_OPEN: &[u8] = b"<code";
const CODE_CLOSE: &[u8] = b"</code>";

/// Removes every code region from `text`.
pub fn strip_code_regions(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_html_code(&strip_inline_spans(&strip_fenced_blocks(&current)));
        // Every pass only removes text, so an unchanged length means a fixpoint.
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// Length of the backtick run opening `line` after blanks, if it can be a fence.
fn fence_run(line: &str) -> Option<usize> {
    let run = line
        .trim_start_matches([' ', '\t'])
        .bytes()
        .take_while(|&b| b == b'`')
        .count();
    (run >= FENCE_MIN_RUN).then_some(run)
}

/// Removes fenced blocks, fences included. The closing fence is the next line
/// opening with a backtick run of the same length; whatever follows that run
/// on the closing line is kept.
pub fn strip_fenced_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut open: Option<(usize, usize)> = None; // (run length, byte offset of fence)
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        match open {
            None => {
                if let Some(run) = fence_run(line) {
                    open = Some((run, offset));
                } else {
                    out.push_str(line);
                }
            }
            Some((run, _)) => {
                if fence_run(line) == Some(run) {
                    let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
                    out.push_str(&line[indent + run..]);
                    open = None;
                }
            }
        }
        offset += line.len();
    }

    if let Some((_, start)) = open {
        out.push_str(&text[start..]);
    }

    out
}

/// Removes inline backtick spans, backticks included.
///
/// Spans never cross a line break. A backtick preceded by a backslash is
/// escaped and never delimits a span. Delimiters pair up from the end of the
/// line, so with an odd count the leftmost backtick stays.
pub fn strip_inline_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let bytes = line.as_bytes();
        let delimiters: Vec<usize> = bytes
            .iter()
            .enumerate()
            .filter(|&(i, &b)| b == b'`' && (i == 0 || bytes[i - 1] != b'\\'))
            .map(|(i, _)| i)
            .collect();

        let unpaired = delimiters.len() % 2;
        let mut cursor = 0;
        for pair in delimiters[unpaired..].chunks_exact(2) {
            out.push_str(&line[cursor..pair[0]]);
            cursor = pair[1] + 1;
        }
        out.push_str(&line[cursor..]);
    }

    out
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

/// Removes `<code>` elements, including nested ones, in a single pass.
///
/// An opening tag without a matching closer keeps its content, except for the
/// complete elements nested inside it. Stray closing tags are kept.
pub fn strip_html_code(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut open_tags: Vec<usize> = Vec::new();
    let mut removed: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];
        if starts_with_ignore_case(rest, CODE_OPEN)
            && rest
                .get(CODE_OPEN.len())
                .is_some_and(|&b| b == b'>' || b.is_ascii_whitespace())
        {
            open_tags.push(i);
            i += CODE_OPEN.len();
        } else if starts_with_ignore_case(rest, CODE_CLOSE) {
            if let Some(start) = open_tags.pop() {
                removed.push((start, i + CODE_CLOSE.len()));
            }
            i += CODE_CLOSE.len();
        } else {
            i += 1;
        }
    }

    if removed.is_empty() {
        return text.to_string();
    }

    // Inner elements are recorded before the elements enclosing them.
    removed.sort_unstable();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in removed {
        if start >= cursor {
            out.push_str(&text[cursor..start]);
            cursor = end;
        } else if end > cursor {
            cursor = end;
        }
    }
    out.push_str(&text[cursor..]);

    out
}
