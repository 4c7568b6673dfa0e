//! Decoders for the Final Fantasy IX archive formats
//!
#![allow(clippy::cast_possible_truncation)] // Intentional for binary format parsing
#![allow(clippy::cast_possible_wrap)] // Intentional for binary operations
#![allow(clippy::cast_lossless)] // Sometimes clearer than From
//! This crate decodes the two container formats the game ships its assets in
//! and emits every contained object through an output sink:
//!
//! - **Disc image** (`FF9.IMG`): a sector-addressed archive of numbered
//!   directories holding file entries, fragment chains, or nested
//!   directories. Entries store only their *start* sector; sizes are
//!   recovered by walking entries in descending index order and folding
//!   adjacent start sectors into extents.
//! - **Database** (`.ff9db`): a pointer-table format of nested packs. Packs
//!   carry an implicit offset table (one trailing slot marks the terminal
//!   boundary); object sizes come from the same descending-order fold.
//!
//! Neither format stores object lengths, so every decode step runs through
//! [`span::Span`], a bounds-checked window over the input buffer: a corrupt
//! count or offset is caught where the window is narrowed, not where the
//! bytes are eventually read.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mognet_formats::extract::MemorySink;
//! use mognet_formats::image;
//!
//! let data = std::fs::read("FF9.IMG")?;
//! let mut sink = MemorySink::default();
//! image::extract_image(&data, &mut sink)?;
//!
//! for (path, bytes) in &sink.objects {
//!     println!("{path}: {} byte(s)", bytes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

pub mod extract;
pub mod image;
pub mod pack;
pub mod reader;
pub mod span;
