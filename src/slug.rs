use chrono::Utc;

/// Builds a URL-safe ASCII slug. Cyrillic is transliterated, Latin
/// diacritics are folded and Uzbek apostrophes are dropped.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.trim().to_lowercase().chars() {
        if matches!(ch, '\'' | '‘' | '’' | 'ʻ' | 'ʼ' | '`' | 'ъ' | 'ь') {
            continue;
        }

        let mapped = match ch {
            'a'..='z' | '0'..='9' => None,
            _ => Some(fold(ch)),
        };

        match mapped {
            None => {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(ch);
            }
            Some("") => pending_dash = true,
            Some(latin) => {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push_str(latin);
            }
        }
    }

    out
}

fn fold(ch: char) -> &'static str {
    match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'ў' => "o",
        'қ' => "q",
        'ғ' => "g",
        'ҳ' => "h",
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ş' => "s",
        'ğ' => "g",
        _ => "",
    }
}

/// Picks the base slug for a record: explicit input first, then the Uzbek
/// name, then the Russian name, then `{prefix}-{unix_millis}`.
pub fn base_slug(input: Option<&str>, name_uz: &str, name_ru: &str, prefix: &str) -> String {
    [input.unwrap_or_default(), name_uz, name_ru]
        .into_iter()
        .map(slugify)
        .find(|slug| !slug.is_empty())
        .unwrap_or_else(|| format!("{prefix}-{}", Utc::now().timestamp_millis()))
}

/// Returns `base` if free, otherwise the first free `{base}-N` with `N >= 2`.
pub fn disambiguate<F>(base: &str, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}
