//! Text frames for report headers

fn width(lines: &[&str]) -> usize {
    lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

fn framed(text: &str, top: (char, char, char), side: char, bottom: (char, char, char)) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let inner = width(&lines) + 2;
    let rule = |(left, fill, right): (char, char, char)| {
        format!("{}{}{}\n", left, fill.to_string().repeat(inner), right)
    };

    let mut out = rule(top);
    for line in &lines {
        let pad = inner - 1 - line.chars().count();
        out.push_str(&format!("{} {}{}{}\n", side, line, " ".repeat(pad), side));
    }
    out.push_str(&rule(bottom));
    out
}

/// Single-line box
pub fn singular_frame(text: &str) -> String {
    framed(text, ('┌', '─', '┐'), '│', ('└', '─', '┘'))
}

/// Double-line box, used for report titles
pub fn double_frame(text: &str) -> String {
    framed(text, ('╔', '═', '╗'), '║', ('╚', '═', '╝'))
}

/// Asterisk box, used for scope headers
pub fn asterisk_frame(text: &str) -> String {
    framed(text, ('*', '*', '*'), '*', ('*', '*', '*'))
}
