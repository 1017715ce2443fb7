/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! # Lumen-Tree
//!
//! Schema model of the Lumen tree generator.
//!
//! The model describes the node hierarchy of the Lumen compiler tree as data:
//! [Element](element::Element)s form a single-rooted DAG over parent edges,
//! each element carries an ordered set of [Field](field::Field)s, and the
//! concrete side of the hierarchy is described by
//! [Implementation](builder::Implementation)s and builders.
//!
//! The schema is populated exactly once through the [TreeContext] registry,
//! finalized with [TreeContext::apply_configurations], and afterwards only
//! read. The [resolver] derives, per element, the effective field set with
//! all inheritance flags that the printers in `lumen-treegen` need.

pub mod builder;
pub mod context;
pub mod element;
pub mod error;
pub mod field;
pub mod resolver;
pub mod types;
pub mod util;

pub use context::TreeContext;
pub use element::{Element, ElementKey, ElementKind};
pub use error::SchemaError;
pub use field::{Field, FieldKind};
pub use types::{ClassRef, TypeBase, TypeRef};
pub use util::MutableOrEmptyList;
