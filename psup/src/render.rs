//!
//! Progress bar rendering
//!
const BAR_LEN: usize = 40;

/// Render one supply as a fixed-width progress bar line.
///
/// The level is clamped to 0..=100. A negative level is a Printer MIB
/// sentinel for "unknown": it renders with an empty bar, an `N/A` percentage
/// and the name marked accordingly, to keep it distinguishable from a
/// genuinely empty supply.
pub fn progress_bar(name: &str, level: i64) -> String {
    let (filled, percent, label) = if level < 0 {
        (0, "N/A".to_owned(), format!("{name} (unknown level)"))
    } else {
        let clamped = level.min(100) as usize;
        (BAR_LEN * clamped / 100, format!("{clamped}%"), name.to_owned())
    };

    format!("[{}{}] {} {}", "=".repeat(filled), "-".repeat(BAR_LEN - filled), percent, label)
}
