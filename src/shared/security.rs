use crate::shared::error::RuntimeError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a build descriptor (10 MB)
pub const MAX_DESCRIPTOR_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is checked, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        return Err(RuntimeError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Package the build descriptor as a regular file".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than [`MAX_DESCRIPTOR_SIZE`]
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        return Err(RuntimeError::SecurityError {
            path: path.to_path_buf(),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Package the build descriptor as a regular file".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_DESCRIPTOR_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates a single resource path segment such as a group or artifact identifier
///
/// Segments are joined onto a resource root, so separators and parent
/// references would let a caller escape it.
pub fn validate_path_segment(segment: &str, segment_type: &str) -> Result<()> {
    let reason = if segment.is_empty() {
        Some(format!("{} must not be empty", segment_type))
    } else if segment.contains('/') || segment.contains('\\') {
        Some(format!("{} contains path separators", segment_type))
    } else if segment == "." || segment.contains("..") {
        Some(format!("{} contains a parent directory reference", segment_type))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RuntimeError::SecurityError {
            path: segment.into(),
            reason,
            hint: "Group and artifact identifiers must be plain names such as 'com.acme'"
                .to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
