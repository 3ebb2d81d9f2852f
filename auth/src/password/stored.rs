/// A password value as it sits in an account record.
///
/// Records migrate from plaintext to hashed storage in place, so the same
/// column can hold either form. The variant is picked by inspecting the
/// value's prefix:
/// - `$argon2` → Argon2 PHC string
/// - `$2` → bcrypt (`$2a$`, `$2b$`, `$2y$`)
/// - anything else → legacy plaintext
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredPassword<'a> {
    Argon2(&'a str),
    Bcrypt(&'a str),
    Plaintext(&'a str),
}

impl<'a> StoredPassword<'a> {
    const ARGON2_MARKER: &'static str = "$argon2";
    const BCRYPT_MARKER: &'static str = "$2";

    /// Classify a raw stored value.
    pub fn parse(raw: &'a str) -> Self {
        if raw.starts_with(Self::ARGON2_MARKER) {
            StoredPassword::Argon2(raw)
        } else if raw.starts_with(Self::BCRYPT_MARKER) {
            StoredPassword::Bcrypt(raw)
        } else {
            StoredPassword::Plaintext(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_argon2() {
        let raw = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";
        let stored = StoredPassword::parse(raw);
        assert_eq!(stored, StoredPassword::Argon2(raw));
    }

    #[test]
    fn test_parse_bcrypt_variants() {
        for raw in ["$2a$10$abc", "$2b$12$abc", "$2y$10$abc"] {
            let stored = StoredPassword::parse(raw);
            assert_eq!(stored, StoredPassword::Bcrypt(raw));
        }
    }

    #[test]
    fn test_parse_plaintext() {
        assert_eq!(
            StoredPassword::parse("hunter2"),
            StoredPassword::Plaintext("hunter2")
        );
    }

    #[test]
    fn test_dollar_without_marker_is_plaintext() {
        assert_eq!(
            StoredPassword::parse("$ecret"),
            StoredPassword::Plaintext("$ecret")
        );
    }
}
