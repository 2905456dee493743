//! Category colors.
//!
//! A fixed table of well-known languages and extensions mapped to hex
//! colors; anything else gets a neutral grey. Lookup is case-insensitive.

/// Color for categories missing from the table.
pub const DEFAULT_COLOR: &str = "#808080";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("js", "#F7DF1E"),
    ("python", "#3776AB"),
    ("java", "#007396"),
    ("csharp", "#239120"),
    ("cpp", "#00599C"),
    ("ruby", "#CC342D"),
    ("php", "#777BB4"),
    ("swift", "#FA7343"),
    ("rs", "#DEA584"),
    ("go", "#00ADD8"),
    ("typescript", "#3178C6"),
    ("kotlin", "#A97BFF"),
    ("scala", "#DC322F"),
    ("html", "#E34F26"),
    ("css", "#1572B6"),
    ("perl", "#39457E"),
    ("haskell", "#5D4F85"),
    ("r", "#276DC3"),
    ("dart", "#0175C2"),
    ("elixir", "#4B275F"),
    ("clojure", "#5881D8"),
    ("lua", "#000080"),
    ("julia", "#9558B2"),
    ("matlab", "#0076A8"),
    ("shell", "#89E051"),
];

/// Hex color for a category.
pub fn color_for(category: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(category))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

/// Parse `#RRGGBB` into its components.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Nearest xterm-256 palette index for a hex color.
///
/// Picks the closer of the 6x6x6 color cube and the 24-step grey ramp.
/// Unparseable input maps to the grey used for [`DEFAULT_COLOR`].
pub fn ansi256_for(hex: &str) -> u8 {
    let Some((r, g, b)) = parse_hex(hex) else {
        return 244;
    };

    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let nearest_level = |v: u8| -> usize {
        (0..LEVELS.len())
            .min_by_key(|&i| (LEVELS[i] as i32 - v as i32).abs())
            .unwrap_or(0)
    };
    let (ri, gi, bi) = (nearest_level(r), nearest_level(g), nearest_level(b));
    let cube = (LEVELS[ri], LEVELS[gi], LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    let avg = (r as u32 + g as u32 + b as u32) / 3;
    let grey_step = if avg < 8 { 0 } else { ((avg - 8) / 10).min(23) };
    let grey_value = (8 + grey_step * 10) as u8;
    let grey_index = 232 + grey_step as usize;

    let distance = |(cr, cg, cb): (u8, u8, u8)| -> i32 {
        let dr = cr as i32 - r as i32;
        let dg = cg as i32 - g as i32;
        let db = cb as i32 - b as i32;
        dr * dr + dg * dg + db * db
    };

    if distance((grey_value, grey_value, grey_value)) < distance(cube) {
        grey_index as u8
    } else {
        cube_index as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        assert_eq!(color_for("PYTHON"), color_for("python"));
        assert_eq!(color_for("Python"), "#3776AB");
        assert_eq!(color_for("RS"), "#DEA584");
    }

    #[test]
    fn test_unknown_category_is_default() {
        assert_eq!(color_for("brainfuck"), DEFAULT_COLOR);
        assert_eq!(color_for(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_table_size() {
        assert_eq!(LANGUAGE_COLORS.len(), 25);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#F7DF1E"), Some((0xF7, 0xDF, 0x1E)));
        assert_eq!(parse_hex("#000080"), Some((0, 0, 0x80)));
        assert_eq!(parse_hex("F7DF1E"), None);
        assert_eq!(parse_hex("#F7DF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_ansi256_for() {
        assert_eq!(ansi256_for("#000000"), 16);
        assert_eq!(ansi256_for("#FFFFFF"), 231);
        assert_eq!(ansi256_for("#FF0000"), 196);
        assert_eq!(ansi256_for(DEFAULT_COLOR), 244);
        assert_eq!(ansi256_for("not a color"), 244);
    }
}
