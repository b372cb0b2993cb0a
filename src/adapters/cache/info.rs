use crate::ports::cache::CacheInfo;

/// Parses the text returned by Redis `INFO`.
///
/// The format is `field:value` lines grouped under `# Section` headers,
/// separated by CRLF. Headers, blank lines and lines without a colon are
/// skipped. Only the first colon splits, so values may contain colons.
pub fn parse_info(raw: &str) -> CacheInfo {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .filter(|(field, _)| !field.is_empty())
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}
