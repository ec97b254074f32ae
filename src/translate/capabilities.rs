//! Naturewalk tokens come out of the PDF with every spacing and casing
//! variation imaginable (`Naturewalk(Forest,Grasslands)`,
//! `nATuRewaLk ( foREsT, grAsSlaNDs )`, ...). They all collapse to one
//! canonical form so downstream comparison and display stay stable.

use std::sync::LazyLock;

use regex::Regex;

static NATUREWALK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(naturewalk)\s*\(\s*(.*?)\s*\)\s*$").unwrap());

/// Canonicalize the free-text capability list. Only Naturewalk tokens are
/// rewritten; everything else passes through untouched, casing included.
pub fn format_other(capabilities: &[String]) -> Vec<String> {
    capabilities
        .iter()
        .map(|capability| {
            if !capability.to_lowercase().contains("naturewalk") {
                return capability.clone();
            }
            match NATUREWALK_RE.captures(capability) {
                Some(caps) => {
                    let terrains = caps[2]
                        .split(',')
                        .map(|terrain| title_case(terrain.trim()))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("{} ({})", title_case(&caps[1]), terrains)
                }
                None => capability.clone(),
            }
        })
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

// ── Tests ──
