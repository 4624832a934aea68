/**
 * Media Store
 *
 * Filesystem-backed storage for uploaded images. Files are written under a
 * single media directory with a millisecond-timestamp prefix so that
 * repeated uploads of the same client filename never collide.
 *
 * The store also inlines stored files as base64 data URLs; posts created
 * from an uploaded filename carry the encoded image, so feed reads never
 * touch the filesystem.
 */

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};

/// Maximum accepted upload size (1 MiB)
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Filesystem-backed media store
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory files are stored under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Strip a client-supplied filename down to a safe basename
    ///
    /// Path separators and parent references are dropped; anything that is
    /// not alphanumeric, `.`, `_`, or `-` becomes `_`. Empty input falls
    /// back to `upload`.
    pub fn sanitize_filename(name: &str) -> String {
        let base = name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(name)
            .trim_matches('.');

        let cleaned: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if cleaned.is_empty() {
            "upload".to_string()
        } else {
            cleaned
        }
    }

    /// Produce the stored name for a client filename
    /// (`<unix_millis>-<sanitized>`)
    pub fn stored_name(original: &str) -> String {
        format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            Self::sanitize_filename(original)
        )
    }

    /// Write an uploaded file under the media root
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("Stored upload {:?} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Inline an image reference as a base64 data URL
    ///
    /// URLs and data URLs pass through unchanged (as does an empty
    /// reference); a bare filename is read from the media root and encoded.
    pub async fn inline_as_data_url(&self, image: &str) -> std::io::Result<String> {
        if image.is_empty() || image.starts_with("data:") || image.starts_with("http") {
            return Ok(image.to_string());
        }

        let filename = Self::sanitize_filename(image);
        let path = self.root.join(&filename);
        let bytes = tokio::fs::read(&path).await?;

        Ok(format!(
            "data:{};base64,{}",
            mime_for(&filename),
            STANDARD.encode(&bytes)
        ))
    }
}

/// MIME type for a stored filename, by extension (JPEG when unknown)
fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(MediaStore::sanitize_filename("photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(
            MediaStore::sanitize_filename("../../etc/passwd"),
            "passwd"
        );
        assert_eq!(
            MediaStore::sanitize_filename("C:\\temp\\shot.png"),
            "shot.png"
        );
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(
            MediaStore::sanitize_filename("my photo (1).jpg"),
            "my_photo__1_.jpg"
        );
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(MediaStore::sanitize_filename(""), "upload");
        assert_eq!(MediaStore::sanitize_filename("..."), "upload");
    }

    #[test]
    fn test_stored_name_has_timestamp_prefix() {
        let name = MediaStore::stored_name("photo.jpg");
        let (prefix, rest) = name.split_once('-').unwrap();
        assert!(prefix.parse::<i64>().is_ok());
        assert_eq!(rest, "photo.jpg");
    }

    #[test]
    fn test_mime_for_extensions() {
        assert_eq!(mime_for("a.png"), "image/png");
        assert_eq!(mime_for("a.GIF"), "image/gif");
        assert_eq!(mime_for("a.jpg"), "image/jpeg");
        assert_eq!(mime_for("noext"), "image/jpeg");
    }

    #[tokio::test]
    async fn test_save_and_inline_roundtrip() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        store.save("pic.png", b"not-really-a-png").await.unwrap();

        let data_url = store.inline_as_data_url("pic.png").await.unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));

        let encoded = data_url.split(',').nth(1).unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), b"not-really-a-png");
    }

    #[tokio::test]
    async fn test_inline_passes_urls_through() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        let url = "https://example.com/pic.jpg";
        assert_eq!(store.inline_as_data_url(url).await.unwrap(), url);

        let data = "data:image/jpeg;base64,AAAA";
        assert_eq!(store.inline_as_data_url(data).await.unwrap(), data);

        assert_eq!(store.inline_as_data_url("").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_inline_missing_file_errors() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path().to_path_buf());

        assert!(store.inline_as_data_url("nope.jpg").await.is_err());
    }
}
