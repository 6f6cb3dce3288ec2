//! Locale code mapping for Android resource directories.
//!
//! Android resource qualifiers predate BCP 47: three languages still use
//! their withdrawn ISO 639 codes, region subtags carry an `r` prefix, and
//! every other composite tag is spelled with the `b+` syntax.
//!
//! | BCP 47        | Android           |
//! |---------------|-------------------|
//! | `he`          | `iw`              |
//! | `zh-CN`       | `zh-rCN`          |
//! | `ca-valencia` | `b+ca+valencia`   |

/// Standard language codes paired with their legacy Android spelling.
const LEGACY_CODES: [(&str, &str); 3] = [("he", "iw"), ("id", "in"), ("yi", "ji")];

/// Converts a BCP 47 locale code into its Android resource qualifier.
///
/// # Examples
///
/// ```
/// use patterns::android::to_android;
///
/// assert_eq!(to_android("de"), "de");
/// assert_eq!(to_android("he"), "iw");
/// assert_eq!(to_android("zh-CN"), "zh-rCN");
/// assert_eq!(to_android("sr-Latn-RS"), "b+sr+Latn+RS");
/// ```
#[must_use]
pub fn to_android(locale: &str) -> String {
    let (language, rest) = match locale.split_once('-') {
        Some((language, rest)) => (language, Some(rest)),
        None => (locale, None),
    };
    let language = LEGACY_CODES
        .iter()
        .find(|(standard, _)| *standard == language)
        .map_or(language, |(_, legacy)| legacy);

    match rest {
        None => language.to_owned(),
        Some(region) if is_language(language) && is_region(region) => {
            format!("{language}-r{region}")
        }
        Some(rest) => format!("b+{language}+{}", rest.replace('-', "+")),
    }
}

/// Converts an Android resource qualifier back into a BCP 47 locale code.
///
/// This is the inverse of [`to_android`].
#[must_use]
pub fn from_android(code: &str) -> String {
    let tag = if let Some(subtags) = code.strip_prefix("b+") {
        subtags.replace('+', "-")
    } else {
        match code.split_once("-r") {
            Some((language, region)) if is_region(region) => format!("{language}-{region}"),
            _ => code.to_owned(),
        }
    };

    let (language, rest) = match tag.split_once('-') {
        Some((language, rest)) => (language, Some(rest)),
        None => (tag.as_str(), None),
    };
    let language = LEGACY_CODES
        .iter()
        .find(|(_, legacy)| *legacy == language)
        .map_or(language, |(standard, _)| standard);

    match rest {
        Some(rest) => format!("{language}-{rest}"),
        None => language.to_owned(),
    }
}

fn is_language(subtag: &str) -> bool {
    (2..=3).contains(&subtag.len()) && subtag.bytes().all(|b| b.is_ascii_lowercase())
}

fn is_region(subtag: &str) -> bool {
    subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_codes_round_trip() {
        for (standard, legacy) in LEGACY_CODES {
            assert_eq!(to_android(standard), legacy);
            assert_eq!(from_android(legacy), standard);
        }
    }

    #[test]
    fn legacy_codes_apply_to_language_subtag_only() {
        assert_eq!(to_android("he-IL"), "iw-rIL");
        assert_eq!(from_android("iw-rIL"), "he-IL");
        assert_eq!(to_android("de-he"), "b+de+he");
    }

    #[test]
    fn region_tags_use_r_prefix() {
        assert_eq!(to_android("zh-CN"), "zh-rCN");
        assert_eq!(from_android("zh-rCN"), "zh-CN");
        assert_eq!(to_android("ast-ES"), "ast-rES");
    }

    #[test]
    fn other_composite_tags_use_bcp47_syntax() {
        assert_eq!(to_android("ca-valencia"), "b+ca+valencia");
        assert_eq!(from_android("b+ca+valencia"), "ca-valencia");
        assert_eq!(to_android("es-419"), "b+es+419");
        assert_eq!(from_android("b+es+419"), "es-419");
    }

    #[test]
    fn plain_codes_are_unchanged() {
        assert_eq!(to_android("fr"), "fr");
        assert_eq!(from_android("fr"), "fr");
    }
}
