//! Evidence filename policy.
//!
//! Uploaded filenames are untrusted client input. [`sanitize_filename`]
//! strips path components and unsafe characters; [`stored_filename`]
//! prefixes the result with the owning answer id and a random token so two
//! uploads can never silently overwrite each other.

/// Fallback name when sanitization leaves nothing usable.
const FALLBACK_NAME: &str = "photo";

/// Reduce an untrusted original filename to a safe basename.
///
/// Path separators are treated as component boundaries joined by `_`, only
/// `[A-Za-z0-9._-]` survives, and leading dots/underscores are trimmed so
/// the result can never be a dotfile or escape the storage directory.
/// An empty result falls back to `"photo"`.
pub fn sanitize_filename(original: &str) -> String {
    let mut name: String = original
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_ascii_alphanumeric() => c,
            '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect();

    name = name.trim_matches(|c| c == '.' || c == '_').to_string();

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Build the on-disk name for a photo attached to `answer_id`.
///
/// Format: `{answer_id}-{token}-{sanitized}`. The token is caller-provided
/// (random hex) so collisions between unrelated uploads are ruled out even
/// when two originals sanitize to the same name.
pub fn stored_filename(answer_id: i64, token: &str, original: &str) -> String {
    format!("{answer_id}-{token}-{}", sanitize_filename(original))
}

/// Whether `name` is already a safe stored name (survives sanitization
/// unchanged). Used to guard retrieval against path traversal.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && sanitize_filename(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(sanitize_filename("evidencia_01.jpg"), "evidencia_01.jpg");
    }

    #[test]
    fn path_traversal_is_neutralized() {
        let name = sanitize_filename("../../etc/passwd");
        assert_eq!(name, "etc_passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[test]
    fn windows_separators_are_neutralized() {
        let name = sanitize_filename("..\\..\\boot.ini");
        assert!(!name.contains('\\'));
        assert!(!name.starts_with('.'));
    }

    #[test]
    fn unsafe_characters_become_underscores() {
        assert_eq!(sanitize_filename("foto né?.png"), "foto_n__.png");
    }

    #[test]
    fn dotfiles_lose_their_leading_dot() {
        assert_eq!(sanitize_filename(".htaccess"), "htaccess");
    }

    #[test]
    fn empty_and_all_dots_fall_back() {
        assert_eq!(sanitize_filename(""), "photo");
        assert_eq!(sanitize_filename("..."), "photo");
        assert_eq!(sanitize_filename("///"), "photo");
    }

    #[test]
    fn stored_name_embeds_answer_and_token() {
        let name = stored_filename(42, "a1b2c3d4", "scan.jpg");
        assert_eq!(name, "42-a1b2c3d4-scan.jpg");
    }

    #[test]
    fn stored_names_differ_for_identical_originals() {
        let a = stored_filename(1, "aaaaaaaa", "dup.png");
        let b = stored_filename(1, "bbbbbbbb", "dup.png");
        assert_ne!(a, b);
    }

    #[test]
    fn safe_filename_guard() {
        assert!(is_safe_filename("42-a1b2c3d4-scan.jpg"));
        assert!(!is_safe_filename("../42.jpg"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename(".hidden"));
    }
}
