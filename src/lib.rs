#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `chanim-rs` plays character sprite animations on embedded displays.
//!
//! Animations loop until asked to change, and switch only at frames that
//! declare a way to the requested animation, so a character never jumps
//! between poses. See [`Animator`] to get started.
//!
pub use chanim_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use chanim_dylib;
