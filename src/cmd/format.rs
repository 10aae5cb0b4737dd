/*!
format.rs

Human-output styling for the shell's non-contractual text (help listing).

Style decisions live in `StyleOptions`: ANSI color is on by default and
disabled via the NO_COLOR env var; terminal width comes from COLUMNS,
clamped to something sane. Helpers return strings and never print, so the
contractual command output paths stay byte-exact and uncolored.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let use_color = std::env::var_os("NO_COLOR").is_none();
        let term_width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);
        StyleOptions {
            use_color,
            term_width,
        }
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

/* -------------------------------------------------------------------------- */
/* Color                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Accent,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Accent => "38;5;45",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct TableOpts {
    /// 0 means use the detected terminal width.
    pub max_width: usize,
    /// Truncate over-wide cells with an ellipsis instead of overflowing.
    pub truncate: bool,
    pub header_sep: bool,
}

impl Default for TableOpts {
    fn default() -> Self {
        Self {
            max_width: 0,
            truncate: false,
            header_sep: true,
        }
    }
}

pub fn table(headers: &[&str], rows: &[Vec<String>], opts: TableOpts, style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let col_count = headers.len();
    let width_limit = if opts.max_width == 0 {
        style.term_width
    } else {
        opts.max_width.min(style.term_width)
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    if opts.truncate {
        // Greedy shrink of the widest columns until the table fits.
        let gaps = (col_count - 1) * 2;
        let mut overflow = (widths.iter().sum::<usize>() + gaps).saturating_sub(width_limit);
        while overflow > 0 {
            let widest = widths
                .iter()
                .enumerate()
                .max_by_key(|(_, w)| **w)
                .map(|(i, _)| i)
                .unwrap_or(0);
            if widths[widest] <= 2 {
                break;
            }
            widths[widest] -= 1;
            overflow -= 1;
        }
    }

    let mut out = String::new();
    for (i, h) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&color(
            Role::Accent,
            pad_or_truncate(h, widths[i], opts.truncate),
            style,
        ));
    }
    out.push('\n');

    if opts.header_sep {
        let mut sep = String::new();
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                sep.push_str("  ");
            }
            sep.push_str(&"-".repeat(*w));
        }
        out.push_str(&color(Role::Dim, sep, style));
        out.push('\n');
    }

    for (r, row) in rows.iter().enumerate() {
        for c in 0..col_count {
            if c > 0 {
                out.push_str("  ");
            }
            let raw = row.get(c).map(|s| s.as_str()).unwrap_or("");
            out.push_str(&pad_or_truncate(raw, widths[c], opts.truncate));
        }
        if r + 1 < rows.len() {
            out.push('\n');
        }
    }
    out
}

fn pad_or_truncate(s: &str, width: usize, truncate: bool) -> String {
    let len = display_width(s);
    if len == width {
        return s.to_string();
    }
    if len < width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if !truncate {
        return s.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                     */
/* -------------------------------------------------------------------------- */

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            i += 2;
            while i < bytes.len() && !bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if i < bytes.len() {
                i += 1;
            }
            continue;
        }
        buf.push(bytes[i] as char);
        i += 1;
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> StyleOptions {
        StyleOptions {
            use_color: false,
            term_width: 100,
        }
    }

    #[test]
    fn table_pads_columns() {
        let t = table(
            &["A", "B"],
            &[
                vec!["x".into(), "y".into()],
                vec!["longer".into(), "val".into()],
            ],
            TableOpts::default(),
            &plain(),
        );
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "A       B  ");
        assert_eq!(lines[2], "x       y  ");
        assert_eq!(lines[3], "longer  val");
    }

    #[test]
    fn table_without_truncation_keeps_wide_cells() {
        let wide = "w".repeat(300);
        let t = table(
            &["A"],
            &[vec![wide.clone()]],
            TableOpts::default(),
            &plain(),
        );
        assert!(t.contains(&wide));
    }

    #[test]
    fn table_truncation_shrinks_to_width() {
        let style = plain();
        let t = table(
            &["A", "B"],
            &[vec!["x".repeat(120), "y".into()]],
            TableOpts {
                truncate: true,
                ..Default::default()
            },
            &style,
        );
        for line in t.lines() {
            assert!(display_width(line) <= style.term_width);
        }
        assert!(t.contains('…'));
    }

    #[test]
    fn color_disabled_passthrough() {
        let s = color(Role::Accent, "text", &plain());
        assert_eq!(s, "text");
    }

    #[test]
    fn strip_ansi_removes_codes() {
        assert_eq!(strip_ansi("\x1b[31mRED\x1b[0m"), "RED");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
