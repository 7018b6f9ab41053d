//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use studyhub_core::types::{FolderId, UserId};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Owning user.
    pub user_id: UserId,
    /// Folder name.
    #[validate(length(min = 1, max = 100))]
    pub folder_name: String,
}

/// Rename folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, max = 100))]
    pub new_name: String,
}

/// Rename document request. The extension is kept by the server.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameDocumentRequest {
    /// New name without extension.
    #[validate(length(min = 1, max = 200))]
    pub new_name: String,
}

/// Move document request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MoveDocumentRequest {
    /// Destination folder.
    #[validate(custom(function = "positive_folder_id"))]
    pub new_folder_id: FolderId,
}

fn positive_folder_id(id: &FolderId) -> Result<(), validator::ValidationError> {
    if id.get() > 0 {
        Ok(())
    } else {
        Err(validator::ValidationError::new("range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        let req = LoginRequest {
            email: "a@b.c".to_string(),
            password: "123".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_folder_name_bounds() {
        let ok = CreateFolderRequest {
            user_id: UserId::new(1),
            folder_name: "x".repeat(100),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreateFolderRequest {
            user_id: UserId::new(1),
            folder_name: "x".repeat(101),
        };
        assert!(too_long.validate().is_err());

        let empty = RenameFolderRequest {
            new_name: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_move_requires_positive_folder() {
        let req = MoveDocumentRequest {
            new_folder_id: FolderId::new(0),
        };
        assert!(req.validate().is_err());

        let req = MoveDocumentRequest {
            new_folder_id: FolderId::new(3),
        };
        assert!(req.validate().is_ok());
    }
}
