use gigs_core::Gig;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Width of the title column in `list` output
const TITLE_WIDTH: usize = 32;

/// One line per gig: index, due date, title, overdue marker
pub fn gig_row(index: usize, gig: &Gig) -> String {
    let marker = if gig.is_overdue() { "  (overdue)" } else { "" };
    format!(
        "{:>3}. {}  {:<width$}{}",
        index + 1,
        gig.formatted_due_date(),
        truncate_string(&gig.title, TITLE_WIDTH),
        marker,
        width = TITLE_WIDTH,
    )
}

pub fn gig_detail(gig: &Gig) -> String {
    let id = gig
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "pending".to_string());
    format!(
        "{}\n  id:  {}\n  due: {}\n\n{}",
        gig.title,
        id,
        gig.due_date.to_rfc3339(),
        gig.description
    )
}
