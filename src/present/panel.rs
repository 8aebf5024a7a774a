//! Bordered text panels for console output

const BLUE: &str = "\x1b[34m";
const BOLD_BLUE: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Smallest width a panel is drawn at
const MIN_WIDTH: usize = 20;

/// A titled block of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub body: String,
}

impl Panel {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Draw a panel `width` columns wide with the title centred in the top border
pub fn render_panel(panel: &Panel, width: usize, color: bool) -> String {
    let width = width.max(MIN_WIDTH);
    let inner = width - 4;
    let (border, title_style, reset) = if color {
        (BLUE, BOLD_BLUE, RESET)
    } else {
        ("", "", "")
    };

    let title: String = panel.title.chars().take(inner).collect();
    let title_len = title.chars().count() + 2;
    let fill = width - 2 - title_len;
    let left = fill / 2;
    let right = fill - left;

    let mut out = String::new();
    out.push_str(&format!(
        "{b}╭{}{r} {t}{}{r} {b}{}╮{r}\n",
        "─".repeat(left),
        title,
        "─".repeat(right),
        b = border,
        t = title_style,
        r = reset
    ));

    for line in wrap(&panel.body, inner) {
        let pad = inner - line.chars().count();
        out.push_str(&format!(
            "{b}│{r} {}{} {b}│{r}\n",
            line,
            " ".repeat(pad),
            b = border,
            r = reset
        ));
    }

    out.push_str(&format!(
        "{b}╰{}╯{r}\n",
        "─".repeat(width - 2),
        b = border,
        r = reset
    ));
    out
}

/// Word-wrap to `width` characters, hard-breaking words that do not fit
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word: String = word.to_string();

            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if needed > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_panel() {
        let out = render_panel(&Panel::new("Step 1", "hello world"), 30, false);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╭'));
        assert!(lines[0].contains(" Step 1 "));
        assert_eq!(lines[1], format!("│ hello world{} │", " ".repeat(15)));
        assert!(lines[2].starts_with('╰'));
        for line in &lines {
            assert_eq!(line.chars().count(), 30);
        }
    }

    #[test]
    fn test_render_colored_panel() {
        let out = render_panel(&Panel::new("Step 2", "x"), 30, true);
        assert!(out.contains(BLUE));
        assert!(out.contains(RESET));
    }

    #[test]
    fn test_wrap_long_text() {
        let lines = wrap("aaaa bbbb cccc", 9);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);

        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_keeps_blank_lines() {
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap("", 10), vec![""]);
    }
}
