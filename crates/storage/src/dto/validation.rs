use validator::ValidationError;

pub(crate) fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let is_valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");

    if is_valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_slug"))
    }
}

pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_username"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_rules() {
        assert!(validate_slug("ufc-300").is_ok());
        assert!(validate_slug("UFC-300").is_err());
        assert!(validate_slug("-ufc").is_err());
        assert!(validate_slug("ufc--300").is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("pick_master-99").is_ok());
        assert!(validate_username("has space").is_err());
    }
}
