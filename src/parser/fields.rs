//! Parsers for the dataset's free-text fields.

/// Parse the leading numeric token of a free-text field, ignoring trailing
/// unit text: `"6.9 kg"` -> `6.9`.
pub fn leading_number(text: &str) -> Option<f64> {
    text.split_whitespace().next()?.parse().ok()
}

/// Parse an egg field into a hatching distance in km.
///
/// The dataset uses `"X km"` for bucketed distances and `"Not in Eggs"` /
/// `"Unknown"` otherwise; anything without a recognizable numeric + "km"
/// pattern means "no egg".
pub fn parse_egg_distance(egg: &str) -> Option<f64> {
    if !egg.contains("km") {
        return None;
    }
    leading_number(egg)
}

/// Normalize a display name by stripping parenthetical suffixes and gendered
/// symbol glyphs: `"Nidoran♀ (Alternate)"` -> `"Nidoran"`.
///
/// Ingestion stores the raw dataset name as-is; this cleaner exists for
/// name-cleaning consumers, so name-keyed lookups against stored rows must
/// use the uncleaned form.
pub fn clean_name(name: &str) -> String {
    let stripped = match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let mut s = String::with_capacity(name.len());
            s.push_str(name[..open].trim_end());
            s.push_str(name[close + 1..].trim_start());
            s
        }
        _ => name.to_string(),
    };

    stripped
        .chars()
        .filter(|c| *c != '♂' && *c != '♀')
        .collect::<String>()
        .trim()
        .to_string()
}
