//! Cookie decoding and normalization.
//!
//! The pipeline's front door: an opaque, variably-encoded cookie blob goes
//! in, a validated canonical cookie set comes out.
//!
//! - [`decode`] turns the blob into a raw name→value map, trying multiple
//!   encodings in a fixed priority order.
//! - [`normalize`] reconciles known aliases onto the canonical name set.
//! - [`validate`] checks the required subset is complete.

use std::collections::HashMap;

mod decode;
mod normalize;

pub use decode::decode;
pub use normalize::{
    normalize, validate, CanonicalCookieSet, Validation, CANONICAL_ALIASES, REQUIRED_COOKIES,
};

/// Raw decoded cookies: name → value, keys unique, order irrelevant.
pub type CookieMap = HashMap<String, String>;
