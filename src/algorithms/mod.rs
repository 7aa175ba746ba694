//
// Copyright (c) 2025 Nathan Fiedler
//

//! The built-in reference algorithms, one module each.

pub mod fastcdc;
pub mod jc;
pub mod ultracdc;

#[cfg(feature = "xorcdc")]
pub mod xorcdc;
