//! Plain-text rendering of a display tree.
//!
//! Produces one `String` per terminal line. Fixed-width cells are padded or
//! truncated by display width; everything else is laid out at its natural
//! width. Good enough for logs, snapshots and the demo binary.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{Align, Border, CheckState, Node, Size};

/// Render a node into lines of plain text.
pub fn render_lines(node: &Node) -> Vec<String> {
    match node {
        Node::Empty => Vec::new(),
        Node::Text { content, .. } => content.lines().map(str::to_string).collect(),
        Node::Column {
            children, layout, ..
        } => {
            let mut lines: Vec<String> = children.iter().flat_map(render_lines).collect();
            let prefix = leading_prefix(layout.indent, layout.border);
            if !prefix.is_empty() {
                for line in &mut lines {
                    line.insert_str(0, &prefix);
                }
            }
            lines
        }
        Node::Row {
            children, layout, ..
        } => {
            let gap = " ".repeat(usize::from(layout.gap.max(1)));
            join_horizontal(children, &gap)
        }
        Node::Overlay { children, .. } => {
            let mut lines = vec!["┌ actions".to_string()];
            lines.extend(
                children
                    .iter()
                    .flat_map(render_lines)
                    .map(|line| format!("│ {line}")),
            );
            lines.push("└".to_string());
            lines
        }
        Node::Cell { child, layout, .. } => {
            let mut lines = render_lines(child);
            if let Size::Fixed(width) = layout.width {
                if lines.is_empty() {
                    lines.push(String::new());
                }
                for line in &mut lines {
                    *line = fit(line, usize::from(width), layout.align);
                }
            }
            lines
        }
        Node::Scroll { child, .. } => render_lines(child),
        Node::Checkbox {
            state, disabled, ..
        } => {
            let mark = match (state, disabled) {
                (_, true) => "[~]",
                (CheckState::Checked, _) => "[x]",
                (CheckState::Partial, _) => "[-]",
                (CheckState::Unchecked, _) => "[ ]",
            };
            vec![mark.to_string()]
        }
        Node::Disclosure { indicator, .. } => vec![indicator.to_string()],
        Node::Badge { label, .. } => vec![format!("({label})")],
        Node::Avatar { source, initials } => match source {
            Some(_) => vec![format!("<{initials}>")],
            None => vec![format!("@{initials}")],
        },
        Node::Button { label, .. } => vec![format!("[{label}]")],
        Node::Input {
            value, placeholder, ..
        } => {
            if value.is_empty() {
                vec![format!("> {placeholder}")]
            } else {
                vec![format!("> {value}")]
            }
        }
        Node::Spinner { label } => vec![format!("⠋ {label}")],
    }
}

/// Render a node into a single newline-joined string.
pub fn render_string(node: &Node) -> String {
    render_lines(node).join("\n")
}

fn leading_prefix(indent: u16, border: Border) -> String {
    let mut prefix = " ".repeat(usize::from(indent));
    match border {
        Border::None => {}
        Border::Leading | Border::Single => prefix.push_str("│ "),
    }
    prefix
}

/// Lay children side by side. Only the first line of each child shares the
/// row; extra lines (expanded content, wrapped text) follow underneath.
fn join_horizontal(children: &[Node], gap: &str) -> Vec<String> {
    let mut head = Vec::new();
    let mut tail = Vec::new();
    for child in children {
        let mut lines = render_lines(child).into_iter();
        if let Some(first) = lines.next() {
            head.push(first);
        }
        tail.extend(lines);
    }
    if head.is_empty() && tail.is_empty() {
        return Vec::new();
    }
    let mut out = vec![head.join(gap)];
    out.extend(tail);
    out
}

/// Pad or truncate `s` to exactly `width` display columns.
fn fit(s: &str, width: usize, align: Align) -> String {
    let current = s.width();
    if current > width {
        let mut out = String::new();
        let mut used = 0;
        for ch in s.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width.saturating_sub(1) {
                break;
            }
            out.push(ch);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
        out.push_str(&" ".repeat(width.saturating_sub(used)));
        return out;
    }
    let pad = width - current;
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
        Align::Center => {
            let left = pad / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(pad - left))
        }
    }
}
