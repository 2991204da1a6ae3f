//! Block-letter banners for the end-of-game screens.

const HEIGHT: usize = 5;

fn glyph(c: char) -> [&'static str; HEIGHT] {
    match c {
        'X' => ["█   █", " █ █ ", "  █  ", " █ █ ", "█   █"],
        'O' => [" ███ ", "█   █", "█   █", "█   █", " ███ "],
        'W' => ["█   █", "█   █", "█ █ █", "██ ██", "█   █"],
        'I' => ["███", " █ ", " █ ", " █ ", "███"],
        'N' => ["█   █", "██  █", "█ █ █", "█  ██", "█   █"],
        'S' => [" ████", "█    ", " ███ ", "    █", "████ "],
        'D' => ["████ ", "█   █", "█   █", "█   █", "████ "],
        'R' => ["████ ", "█   █", "████ ", "█  █ ", "█   █"],
        'A' => [" ███ ", "█   █", "█████", "█   █", "█   █"],
        '!' => ["█", "█", "█", " ", "█"],
        _ => ["  ", "  ", "  ", "  ", "  "],
    }
}

/// Renders `text` in five-row block letters. Characters without a glyph
/// become blank space.
pub fn banner(text: &str) -> Vec<String> {
    (0..HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c.to_ascii_uppercase())[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
