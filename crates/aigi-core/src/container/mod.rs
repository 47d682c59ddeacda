//! AIGI container codec.
//!
//! The codec is split the same way for both directions:
//! - `layout`: signature, version, and field offsets (source of truth)
//! - `reader`: bounds-checked sequential reads with field context
//! - `parser`: framing only; locates metadata and every image entry
//! - `payload`: per-image RGBA8 -> PNG -> zlib transform and its inverse
//! - `encoder` / `decoder`: public entry points
//! - `error`: explicit, actionable errors
//!
//! Decoding is two passes over one buffer: framing is validated first (all
//! length prefixes, so truncation is reported before any payload is touched),
//! then payloads are decoded independently and gathered in entry order.
//! Nothing here performs I/O; see `file` for the filesystem helpers.
//!
//! Version française (résumé):
//! Le codec lit d'abord l'encadrement (signature, version, longueurs), puis
//! décode chaque image indépendamment en conservant l'ordre d'origine.
//! Aucune E/S ici ; les positions sont dans `layout`.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod layout;
pub mod options;
pub mod parser;
pub mod payload;
pub mod reader;

mod fanout;

pub use decoder::{decode, decode_with_limits, inspect, inspect_with_limits};
pub use encoder::{encode, encode_with_options};
