use crate::result::Summary;

/// One-line text such as `2 files inspected, no offences detected`.
pub fn summary_text(summary: &Summary) -> String {
    format!(
        "{} inspected, {} detected",
        pluralize(summary.inspected_file_count, "file", false),
        pluralize(summary.offence_count, "offence", true),
    )
}

fn pluralize(count: u64, noun: &str, no_for_zero: bool) -> String {
    match count {
        0 if no_for_zero => format!("no {noun}s"),
        1 => format!("1 {noun}"),
        n => format!("{n} {noun}s"),
    }
}
