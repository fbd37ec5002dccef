//! Forces dynamic linking of the `chanim` workspace crates.
#![allow(clippy::single_component_path_imports)]

#[allow(unused_imports)]
use chanim_internal;
