use crate::errors::RequestError;
use crate::slugify;

pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];
pub const BAD_WORDS_WARNING: &str = "Не ругайтесь!";
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

const SLUG_MAX_LENGTH: usize = 100;

/// Rejects comment text containing any banned word, matched
/// case-insensitively anywhere in the text.
pub fn check_comment_text(text: &str) -> Result<(), RequestError> {
    let lowered = text.to_lowercase();
    if BAD_WORDS.iter().any(|word| lowered.contains(word)) {
        return Err(RequestError::ValidationFailed {
            field: "text",
            message: BAD_WORDS_WARNING.to_string(),
        });
    }
    Ok(())
}

/// An explicitly supplied slug is used verbatim; an empty or missing one is
/// derived from the title and capped at 100 characters.
pub fn clean_slug(slug: Option<&str>, title: &str) -> String {
    match slug {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => slugify(title).chars().take(SLUG_MAX_LENGTH).collect(),
    }
}

pub fn duplicate_slug_error(slug: &str) -> RequestError {
    RequestError::ValidationFailed {
        field: "slug",
        message: format!("{}{}", slug, DUPLICATE_SLUG_WARNING),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banned_words_are_rejected_case_insensitively() {
        assert!(check_comment_text("Этот комментарий содержит слово Редиска.").is_err());
        assert!(check_comment_text("обычный текст").is_ok());
    }

    #[test]
    fn supplied_slug_wins_over_title() {
        assert_eq!(clean_slug(Some("my-note"), "Заголовок"), "my-note");
    }

    #[test]
    fn missing_slug_is_derived_from_title() {
        assert_eq!(clean_slug(None, "Заметка без slug"), "zametka-bez-slug");
        assert_eq!(clean_slug(Some(""), "Заметка без slug"), "zametka-bez-slug");
    }

    #[test]
    fn generated_slug_is_capped() {
        let title = "а".repeat(300);
        assert_eq!(clean_slug(None, &title).chars().count(), 100);
    }
}
