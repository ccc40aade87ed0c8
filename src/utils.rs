/// Rewrites a `/`-separated date into `-`-separated form and drops trailing
/// separators, e.g. `2023/05/01/` becomes `2023-05-01`.
pub fn normalize_date_separators(date: &str) -> String {
    date.trim()
        .replace('/', "-")
        .trim_end_matches('-')
        .to_string()
}

/// Splits an access date into exactly three non-empty parts.
///
/// Empty components are skipped, at most three are used. A missing year
/// falls back to `default_year`, a missing month or day to `"01"`.
pub fn split_access_date<'a>(date: &'a str, default_year: &'a str) -> [&'a str; 3] {
    let mut parts = date
        .split(['-', '/'])
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let year = parts.next().unwrap_or(default_year);
    let month = parts.next().unwrap_or("01");
    let day = parts.next().unwrap_or("01");
    [year, month, day]
}

/// Completes a partial `-`-separated date to `YYYY-MM-DD` shape, defaulting
/// missing or empty month and day components to `"01"`.
#[cfg_attr(not(feature = "bibtex"), allow(dead_code))]
pub fn complete_date(date: &str) -> Option<String> {
    let mut parts = date.trim().split('-').map(str::trim);
    let year = parts.next().filter(|year| !year.is_empty())?;
    let month = parts.next().filter(|m| !m.is_empty()).unwrap_or("01");
    let day = parts.next().filter(|d| !d.is_empty()).unwrap_or("01");
    Some(format!("{year}-{month}-{day}"))
}
