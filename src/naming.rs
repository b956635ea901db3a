//! Upload filename derivation.
//!
//! Every upload gets a fresh name of the form `<stem>_<token><ext>`:
//!
//! - `photo.JPG` → `photo_3f2b…9c.jpg`
//! - `holiday.snap.png` → `holiday.snap_3f2b…9c.png`
//! - `README` → `README_3f2b…9c`
//!
//! The token is a random v4 UUID in simple (hex, no dashes) form, so two
//! concurrent uploads of the same file within one process never collide.
//! The extension is lowercased; the stem is kept as uploaded.

use uuid::Uuid;

/// Stem used when the uploaded name has nothing before its extension.
const FALLBACK_STEM: &str = "image";

/// Result of splitting an uploaded filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitName<'a> {
    /// Everything before the final extension.
    pub stem: &'a str,
    /// The final extension including its dot, original case. Empty if none.
    pub extension: &'a str,
}

/// Split `name` into stem and final extension.
///
/// Directory components (`/` or `\`) are dropped first, so a client cannot
/// smuggle a path into the upload URL.
///
/// - `"photo.JPG"` → stem=`"photo"`, extension=`".JPG"`
/// - `"archive.tar.gz"` → stem=`"archive.tar"`, extension=`".gz"`
/// - `"../../etc/passwd"` → stem=`"passwd"`, extension=`""`
/// - `".env"` → stem=`""`, extension=`".env"`
pub fn split_filename(name: &str) -> SplitName<'_> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(dot) => SplitName {
            stem: &base[..dot],
            extension: &base[dot..],
        },
        None => SplitName {
            stem: base,
            extension: "",
        },
    }
}

/// Build an upload filename from the original name and an explicit token.
pub fn filename_with_token(original: &str, token: &str) -> String {
    let SplitName { stem, extension } = split_filename(original);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    format!("{}_{}{}", stem, token, extension.to_lowercase())
}

/// Build an upload filename with a fresh random token.
pub fn unique_filename(original: &str) -> String {
    filename_with_token(original, &new_token())
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}
