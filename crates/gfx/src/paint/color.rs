use egui::Color32;

/// Parse the CSS colors the demo markup uses: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`
/// and a handful of keywords.
pub fn parse_color(value: &str) -> Option<Color32> {
    let v = value.trim();
    if let Some(hex) = v.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = v
        .strip_prefix("rgb(")
        .or_else(|| v.strip_prefix("rgba("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let channel = |s: &str| s.parse::<u8>().ok();
        return match parts.as_slice() {
            [r, g, b] => Some(Color32::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
            [r, g, b, a] => {
                let a = a.parse::<f32>().ok().filter(|a| a.is_finite())?;
                let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
                Some(Color32::from_rgba_unmultiplied(channel(r)?, channel(g)?, channel(b)?, a))
            }
            _ => None,
        };
    }
    match v.to_ascii_lowercase().as_str() {
        "transparent" => Some(Color32::TRANSPARENT),
        "white" => Some(Color32::WHITE),
        "black" => Some(Color32::BLACK),
        "red" => Some(Color32::from_rgb(255, 0, 0)),
        "green" => Some(Color32::from_rgb(0, 128, 0)),
        "blue" => Some(Color32::from_rgb(0, 0, 255)),
        "gray" | "grey" => Some(Color32::from_rgb(128, 128, 128)),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Option<Color32> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color32::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}
