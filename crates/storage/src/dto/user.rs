use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::validate_username;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(max = 100))]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let ok = CreateUserRequest {
            username: "knockout_king".to_string(),
            display_name: Some("KO King".to_string()),
        };
        assert!(ok.validate().is_ok());

        let short = CreateUserRequest {
            username: "ko".to_string(),
            display_name: None,
        };
        assert!(short.validate().is_err());

        let spaced = CreateUserRequest {
            username: "ko king".to_string(),
            display_name: None,
        };
        assert!(spaced.validate().is_err());
    }
}
