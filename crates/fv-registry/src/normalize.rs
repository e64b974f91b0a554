use fv_core::text::fold_words;

/// Normalize a municipality name for comparison.
///
/// Diacritics are stripped, case is folded, punctuation other than hyphens
/// is dropped, and whitespace is collapsed. A hyphen keeps compound names
/// together, so spaces around it are removed as well.
///
/// ```
/// use fv_registry::normalize_name;
/// assert_eq!(normalize_name("  Vitoria - Gasteiz "), "vitoria-gasteiz");
/// assert_eq!(normalize_name("SANTA CRUZ de Tenerife."), "santa cruz de tenerife");
/// ```
pub fn normalize_name(raw: &str) -> String {
    fold_words(raw, &['-'])
        .replace(" - ", "-")
        .replace(" -", "-")
        .replace("- ", "-")
        .trim_matches('-')
        .to_string()
}

/// Return `true` if `needle` is a prefix of a compound token of `haystack`.
///
/// The match starts at the beginning of `haystack` or right after a hyphen,
/// and ends at the end of `haystack` or before a space or hyphen. So
/// `"vitoria"` and `"gasteiz"` are found in `"vitoria-gasteiz"`, but
/// `"de la"` is not found in `"santa cruz de la palma"`.
pub(crate) fn is_compound_prefix(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let is_sep = |c: char| c == ' ' || c == '-';
    haystack.match_indices(needle).any(|(start, _)| {
        let before_ok = haystack[..start].chars().next_back().map_or(true, |c| c == '-');
        let after_ok = haystack[start + needle.len()..].chars().next().map_or(true, is_sep);
        before_ok && after_ok
    })
}
