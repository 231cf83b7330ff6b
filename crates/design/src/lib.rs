//! # ownbox Design Documentation
//!
//! This crate contains design documentation and architectural decision
//! records for the ownbox project.
//!
//! ## Documentation Location
//!
//! All design documents are located in the `docs/` directory at the root
//! of this crate.
//!
//! Key documents:
//! - `adr/0001-move-only-owned-box.md` - Why `OwnedBox` has no `Clone`
//! - `adr/0002-shallow-copy-is-opt-in.md` - Copy policies and their defaults
//! - `adr/0003-atomic-handoff.md` - Sharing ownership slots between threads

// This is a documentation-only crate
#![no_std]
