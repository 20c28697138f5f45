//! Image access for layout and output.
//!
//! Layout only needs the intrinsic pixel size of an image to derive a missing
//! width or height; the PDF writer needs the decoded pixels. Both read the
//! file through the `image` crate.
//!
//! # Architecture
//!
//! - `cache`: intrinsic size lookup, memoized per path
//! - `raster`: decoding to 8-bit RGB with an optional alpha plane
//!
//! # Example
//!
//! ```no_run
//! use slidewright::images::ImageCache;
//! use std::path::Path;
//!
//! let mut cache = ImageCache::new();
//! let (width, height) = cache.dimensions(Path::new("diagram.png"))?;
//! println!("{}x{} px", width, height);
//! # Ok::<(), slidewright::common::FormatError>(())
//! ```

// Submodule declarations
pub mod cache;
pub mod raster;

// Re-exports
pub use cache::ImageCache;
pub use raster::{RasterImage, decode};
