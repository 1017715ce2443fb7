/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! # Lumen-Treegen
//!
//! Turns a frozen [TreeContext](lumen_tree::TreeContext) into the generated
//! Lumen tree sources.
//!
//! For every element the generator emits the abstract declaration, for every
//! registered implementation the concrete node and its builder, plus the
//! visitor and transformer protocol units. Each unit is rendered into a
//! [GeneratedFile](printer::GeneratedFile) by the printers in [printer],
//! with its import list computed by [imports]. The [pipeline] maps all units
//! to the filesystem, either writing them or checking the files on disk for
//! staleness.
//!
//! Generation is a deterministic batch transformation: the same schema
//! always renders to byte identical text.

pub mod error;
pub mod imports;
pub mod pipeline;
pub mod printer;
pub mod schema;

pub use error::{GenError, PipelineError};
pub use pipeline::{generate_all, Pipeline};
pub use printer::GeneratedFile;
