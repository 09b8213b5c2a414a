//! Validation of user supplied engraving sources.
//!
//! Every rule is checked and every violation reported, so the caller can show
//! the full list at once.

use crate::types::DiceType;
use thiserror::Error;

/// Maximum number of characters that fit legibly on one face.
pub const TEXT_MAX_LENGTH: usize = 2;

/// Maximum upload size for engraving images (2 MiB).
pub const FILE_MAX_SIZE: u64 = 2 * 1024 * 1024;

/// MIME types accepted for engraving images.
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/svg+xml", "image/png"];

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Text must be {max} characters or less")]
    TextTooLong { max: usize },

    #[error("Text cannot be empty")]
    TextEmpty,

    #[error("Text can only contain letters and numbers")]
    TextNotAlphanumeric,

    #[error("Only SVG and PNG files are allowed")]
    ImageType,

    #[error("File size must be {max_mb}MB or less")]
    ImageTooLarge { max_mb: u64 },

    #[error("Invalid dice type")]
    DiceType,
}

/// Outcome of validating one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human readable messages, in rule order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Validate engraving text.
pub fn validate_text_input(text: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let len = text.chars().count();

    if len > TEXT_MAX_LENGTH {
        errors.push(ValidationIssue::TextTooLong { max: TEXT_MAX_LENGTH });
    }

    if len == 0 {
        errors.push(ValidationIssue::TextEmpty);
    }

    // An empty string also fails this rule.
    if len == 0 || !text.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationIssue::TextNotAlphanumeric);
    }

    ValidationResult { errors }
}

/// Validate an uploaded image by MIME type and size in bytes.
pub fn validate_image_file(mime_type: &str, size: u64) -> ValidationResult {
    let mut errors = Vec::new();

    if !ALLOWED_IMAGE_TYPES.contains(&mime_type) {
        errors.push(ValidationIssue::ImageType);
    }

    if size > FILE_MAX_SIZE {
        errors.push(ValidationIssue::ImageTooLarge {
            max_mb: FILE_MAX_SIZE / (1024 * 1024),
        });
    }

    ValidationResult { errors }
}

/// Validate a die label such as `D20`.
pub fn validate_dice_type(label: &str) -> ValidationResult {
    let errors = match label.parse::<DiceType>() {
        Ok(_) => Vec::new(),
        Err(_) => vec![ValidationIssue::DiceType],
    };
    ValidationResult { errors }
}
