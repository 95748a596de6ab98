use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Subtitle,
}

/// A video or subtitle file taking part in a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Full file name as found on disk
    pub filename: String,
    /// File name without its suffix
    pub stem: String,
    /// Extension including the dot, possibly compound (`.en.vtt`)
    pub suffix: String,
    pub kind: MediaKind,
}
