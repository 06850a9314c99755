use strum_macros::{Display, EnumString};

/// Media categories accepted by the prediction service. The active modality
/// decides which file extensions pass validation and which `/predict/{..}`
/// endpoint a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    Video,
    Image,
    Audio,
}

/// Uploads above this size are rejected client-side.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Video, Modality::Image, Modality::Audio];

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Modality::Video => &["mp4", "avi", "mov", "mkv"],
            Modality::Image => &["jpg", "jpeg", "png"],
            Modality::Audio => &["flac", "wav", "mp3"],
        }
    }

    /// The form used in validation messages: ".mp4, .avi, .mov, .mkv".
    pub fn extension_list(self) -> String {
        self.allowed_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Value for a file input's `accept` attribute.
    pub fn accept_attr(self) -> String {
        self.allowed_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Modality::Video => "Video",
            Modality::Image => "Image",
            Modality::Audio => "Audio",
        }
    }
}

/// Lowercased extension of a file name, if it has one.
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
