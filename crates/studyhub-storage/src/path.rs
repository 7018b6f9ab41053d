//! Storage path rules.

use studyhub_core::types::{FolderId, UserId};

/// Top-level directory under the storage root holding all documents.
pub const STORAGE_PREFIX: &str = "pdf_files";

/// Directory holding the files of one user's folder:
/// `pdf_files/{user_id}/{folder_id}`.
pub fn user_folder_dir(user_id: UserId, folder_id: FolderId) -> String {
    format!("{STORAGE_PREFIX}/{user_id}/{folder_id}")
}

/// Relative path of a document file:
/// `pdf_files/{user_id}/{folder_id}/{filename}`.
pub fn storage_path(user_id: UserId, folder_id: FolderId, filename: &str) -> String {
    format!("{}/{filename}", user_folder_dir(user_id, folder_id))
}

/// Extension of a file name including the leading dot, or `""`.
///
/// Leading dots do not start an extension, so `".bashrc"` has none while
/// `"notes."` has `"."`.
pub fn file_extension(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let stem_start = base.len() - base.trim_start_matches('.').len();
    match base[stem_start..].rfind('.') {
        Some(idx) => &base[stem_start + idx..],
        None => "",
    }
}
