//! Hatch counter → average hatch rate in days, from the breeding chapter's
//! rate table. Counters outside the table fall back to half the counter,
//! rounded.

const HATCH_RATES: &[(i32, i32)] = &[
    (120, 75),
    (100, 50),
    (80, 40),
    (50, 30),
    (40, 25),
    (35, 20),
    (30, 16),
    (15, 7),
    (10, 4),
    (5, 2),
];

pub fn average_hatch_rate(counter: Option<i32>) -> Option<i32> {
    let counter = counter?;
    let rate = HATCH_RATES
        .iter()
        .find(|(c, _)| *c == counter)
        .map(|(_, rate)| *rate)
        .unwrap_or_else(|| (f64::from(counter) / 2.0).round() as i32);
    Some(rate)
}

// ── Tests ──
