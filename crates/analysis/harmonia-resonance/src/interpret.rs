//! Traditional names for common resonances

/// Conventional name of the aspect `multiplicity/harmonic`.
///
/// Harmonics without a traditional name read as `"m/h resonance"`.
pub fn aspect_name(harmonic: u32, multiplicity: u32) -> String {
    match (harmonic, multiplicity) {
        (8, 3) => return "sesquiquadrate".to_string(),
        (12, 5) => return "quincunx".to_string(),
        _ => {}
    }

    let base = match harmonic {
        1 => "conjunction",
        2 => "opposition",
        3 => "trine",
        4 => "square",
        5 => "quintile",
        6 => "sextile",
        7 => "septile",
        8 => "octile",
        9 => "novile",
        10 => "decile",
        11 => "undecile",
        12 => "duodecile",
        _ => return format!("{}/{} resonance", multiplicity, harmonic),
    };

    let prefix = match multiplicity {
        0 | 1 => "",
        2 => "bi",
        3 => "tri",
        4 => "quad",
        _ => return format!("{}/{} resonance", multiplicity, harmonic),
    };

    format!("{}{}", prefix, base)
}
