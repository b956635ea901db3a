//! # cdnmate
//!
//! Takes an uploaded image, shrinks it slightly, re-encodes it in the format
//! it arrived in, pushes it to a storage origin with HTTP `PUT`, and hands
//! back the public CDN URL.
//!
//! ```text
//! bytes ─▶ decode ─▶ resize 99% ─▶ encode ─▶ PUT {uploader_url}/{name} ─▶ {cdn_url}/{name}
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use cdnmate::{ImageProcessor, Quality};
//!
//! let config = cdnmate::config::load_config(std::path::Path::new("."))?;
//! let processor = ImageProcessor::new(config)?;
//!
//! let bytes = std::fs::read("photo.JPG")?;
//! let url = processor.process(&bytes, "photo.JPG", Quality::new(85))?;
//! println!("{url}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | The pipeline: [`ImageProcessor`] wires decode, resize, encode and upload |
//! | [`imaging`] | Decoding, the 99% Catmull-Rom resize, JPEG / PNG / WebP encoding |
//! | [`upload`] | The [`Uploader`](upload::Uploader) trait and the `reqwest` based [`HttpUploader`] |
//! | [`naming`] | Collision-resistant upload filenames |
//! | [`config`] | `cdnmate.toml` loading, defaults and validation |
//!
//! # Design Decisions
//!
//! ## Synchronous by Design
//!
//! Each call runs start to finish on the caller's thread, and a blocking
//! `reqwest` client does the upload. The host decides how many requests run
//! in parallel. An async host should call [`ImageProcessor::process`] from
//! its blocking pool (e.g. `tokio::task::spawn_blocking`).
//!
//! ## One Trait per Capability
//!
//! Resizing, encoding and uploading are each a single-method trait
//! ([`ImageResizer`](imaging::ImageResizer),
//! [`ImageEncoder`](imaging::ImageEncoder), [`Uploader`](upload::Uploader))
//! with one default implementation. Tests replace the codec or network
//! boundary without touching the pipeline.
//!
//! ## Format In = Format Out
//!
//! The output format is the detected input format, never the file extension.
//! The `Content-Type` of the upload follows the encoded bytes too.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod process;
pub mod upload;

pub use config::Config;
pub use imaging::{OutputFormat, Quality};
pub use process::{ImageProcessor, ProcessError, Stage};
pub use upload::HttpUploader;

#[cfg(test)]
pub(crate) mod test_helpers;
