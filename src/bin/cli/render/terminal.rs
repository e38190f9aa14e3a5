/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const BLUE: &str = "\x1b[34m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, codes: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", codes, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Page heading, underlined when colors are off
pub fn heading(text: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}{}", Color::BOLD, Color::BLUE, text, Color::RESET)
    } else {
        format!("{}\n{}", text, "=".repeat(text.chars().count()))
    }
}

pub fn bold(text: &str, use_color: bool) -> String {
    paint(text, Color::BOLD, use_color)
}

pub fn dim(text: &str, use_color: bool) -> String {
    paint(text, Color::DIM, use_color)
}
