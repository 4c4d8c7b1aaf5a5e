//! Header line parsing.

/// Field separator of DCC extracts.
pub const COMMA: u8 = b',';

/// Field separator of ARDaC templates and node files.
pub const TAB: u8 = b'\t';

/// Splits one delimited line into fields, honoring double-quoted values.
///
/// Field text is kept verbatim, surrounding whitespace included.
pub fn parse_delimited_line(line: &str, separator: u8) -> Vec<String> {
    let separator = char::from(separator);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == separator && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}
