//! Text folding shared by name matching and date-expression parsing.
//!
//! Source documents spell the same name with and without accents, in any
//! case, and with stray punctuation. Both the municipality matcher and the
//! date-expression parser compare text only after folding it here.

/// Lowercase `s` and replace accented Latin letters with their base form.
///
/// Ligatures expand (`æ` → `ae`, `ß` → `ss`); every other character passes
/// through lowercased.
pub fn fold(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        for c in c.to_lowercase() {
            match c {
                'æ' => result.push_str("ae"),
                'œ' => result.push_str("oe"),
                'ß' => result.push_str("ss"),
                'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => result.push('a'),
                'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => result.push('e'),
                'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => result.push('i'),
                'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => result.push('o'),
                'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => result.push('u'),
                'ý' | 'ÿ' | 'ŷ' => result.push('y'),
                'ñ' | 'ń' | 'ņ' | 'ň' => result.push('n'),
                'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => result.push('c'),
                'ś' | 'ŝ' | 'ş' | 'š' => result.push('s'),
                'ź' | 'ż' | 'ž' => result.push('z'),
                'ð' | 'ď' | 'đ' => result.push('d'),
                'ł' | 'ĺ' | 'ļ' | 'ľ' | 'ŀ' => result.push('l'),
                'ŕ' | 'ř' => result.push('r'),
                'ť' | 'ţ' => result.push('t'),
                'ğ' | 'ĝ' | 'ġ' | 'ģ' => result.push('g'),
                _ => result.push(c),
            }
        }
    }
    result
}

/// Fold `s`, turn every character that is neither alphanumeric nor listed in
/// `keep` into a space, and collapse runs of whitespace.
///
/// ```
/// use fv_core::text::fold_words;
/// assert_eq!(fold_words("  Vitoria-Gasteiz, (Álava) ", &['-']), "vitoria-gasteiz alava");
/// assert_eq!(fold_words("Lunes de Pentecostés.", &[]), "lunes de pentecostes");
/// ```
pub fn fold_words(s: &str, keep: &[char]) -> String {
    let folded: String = fold(s)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || keep.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(fold("Miércoles"), "miercoles");
        assert_eq!(fold("ÁVILA"), "avila");
        assert_eq!(fold("Agüimes"), "aguimes");
        assert_eq!(fold("Logroño"), "logrono");
        assert_eq!(fold("Sant Adrià de Besòs"), "sant adria de besos");
    }

    #[test]
    fn collapses_whitespace_and_punctuation() {
        assert_eq!(fold_words("San  Lucas;\t", &[]), "san lucas");
        assert_eq!(fold_words("l'Hospitalet", &[]), "l hospitalet");
    }

    #[test]
    fn keeps_requested_separators() {
        assert_eq!(fold_words("Vitoria - Gasteiz", &['-']), "vitoria - gasteiz");
        assert_eq!(fold_words("Vitoria-Gasteiz", &[]), "vitoria gasteiz");
    }
}
