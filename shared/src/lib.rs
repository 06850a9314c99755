pub mod auth;
pub mod error;
pub mod feed;
pub mod modality;
pub mod persona;
pub mod upload;
pub mod verdict;

pub use feed::{FeedBoard, FeedSource, MediaItem, MediaKind, ProtectionSummary};
pub use modality::Modality;
pub use upload::{SelectedFile, UploadError, UploadWorkflow};
pub use verdict::Verdict;
