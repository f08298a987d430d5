use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;

use crate::dom::norm;

/// Snapshot of one project card, read from its element at operation time.
/// All strings are already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    /// Tag texts joined with single spaces.
    pub tags: String,
    pub kind: String,
    pub date: DateTime<Utc>,
}

impl ProjectEntry {
    pub fn new(name: Option<&str>, tags: &[String], kind: Option<&str>, date: Option<&str>) -> Self {
        ProjectEntry {
            name: norm(name.unwrap_or_default()),
            tags: tags.iter().map(|t| norm(t)).collect::<Vec<_>>().join(" "),
            kind: norm(kind.unwrap_or_default()),
            date: parse_date(date),
        }
    }

    pub fn matches(&self, filter: &Filter) -> bool {
        let matches_search = filter.query.is_empty()
            || self.name.contains(&filter.query)
            || self.tags.contains(&filter.query);
        let matches_type = filter.kind.is_empty() || self.kind == filter.kind;
        matches_search && matches_type
    }
}

/// Current search text and type selector, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub query: String,
    pub kind: String,
}

impl Filter {
    pub fn new(query: &str, kind: &str) -> Self {
        Filter {
            query: norm(query),
            kind: norm(kind),
        }
    }
}

// ── Sorting ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    Type,
}

impl SortMode {
    /// Unknown values sort newest-first.
    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            "oldest" => Self::Oldest,
            "type" => Self::Type,
            _ => Self::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Type => "type",
        }
    }
}

pub fn compare(a: &ProjectEntry, b: &ProjectEntry, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Newest => b.date.cmp(&a.date),
        SortMode::Oldest => a.date.cmp(&b.date),
        SortMode::Type => a.kind.cmp(&b.kind),
    }
}

/// Stable permutation of `entries` under `mode`: `result[i]` is the index of the
/// entry that ends up at position `i`. Ties keep their current relative order.
pub fn sort_order(entries: &[ProjectEntry], mode: SortMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| compare(&entries[a], &entries[b], mode));
    order
}

// ── Dates ─────────────────────────────────────────────

/// Parse a card's date attribute. Missing or unreadable dates are the epoch, so
/// they sort as the oldest entries instead of failing.
pub fn parse_date(raw: Option<&str>) -> DateTime<Utc> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return DateTime::<Utc>::UNIX_EPOCH,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.and_utc();
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return midnight(d);
    }
    // Year-month and bare year forms are the first day of the period.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return midnight(d);
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01-01", raw), "%Y-%m-%d") {
            return midnight(d);
        }
    }

    log::debug!("[work] unreadable date {:?}, treating as epoch", raw);
    DateTime::<Utc>::UNIX_EPOCH
}

fn midnight(d: NaiveDate) -> DateTime<Utc> {
    d.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
