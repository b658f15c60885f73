const TRUNCATED_MARKER: &str = "\n.[truncated]";
pub const MAX_READER_TEXT: usize = 40_960;

/// Tidies converted page text for the reader: trims trailing spaces, keeps at
/// most one blank line in a row, and truncates on a char boundary.
pub fn prepare_reader_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_READER_TEXT));
    let mut blank_run = 0usize;
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 || out.is_empty() {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    let tidy = out.trim_end();

    if tidy.len() <= MAX_READER_TEXT {
        tidy.to_string()
    } else {
        let mut end = MAX_READER_TEXT;
        while end > 0 && !tidy.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}{TRUNCATED_MARKER}", &tidy[..end])
    }
}
