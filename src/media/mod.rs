//! Media module: descriptors, rendition selection and strategy dispatch.

pub mod dispatch;
pub mod item;
pub mod parser;

pub use dispatch::{DispatchTable, DownloadStrategy};
pub use item::{MediaDescriptor, MediaKind, DEFAULT_CONTENT_TYPE};
pub use parser::{album_resources, photo_resource, video_resource, DownloadResource};
