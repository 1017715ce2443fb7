/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use crate::{context::TYPE_PREFIX, element::ElementKey, field::Field};

///Concrete realization of an element. The implementation takes every
/// effective field as a constructor parameter and provides the child
/// traversal bodies.
#[derive(Debug, Clone)]
pub struct Implementation {
    pub element: ElementKey,
}

///Builder producing exactly one [Implementation]. Its field set is the
/// implementation's effective field set, rendered as mutable setters.
#[derive(Debug, Clone)]
pub struct LeafBuilder {
    ///Index into the context's implementation list.
    pub implementation: usize,
    ///Indices of [IntermediateBuilder]s this builder refines.
    pub parents: Vec<usize>,
}

///Builder shape shared across several implementations that all materialize
/// the same abstract element.
#[derive(Debug, Clone)]
pub struct IntermediateBuilder {
    ///Schema name without the tree prefix, like the elements.
    pub name: String,
    pub package: String,
    pub fields: Vec<Field>,
    pub parents: Vec<usize>,
    ///The abstract element `build()` yields. Leaving this unset is a schema
    /// inconsistency that surfaces at generation time.
    pub materialized_element: Option<ElementKey>,
}

impl IntermediateBuilder {
    pub fn type_name(&self) -> String {
        format!("{}{}", TYPE_PREFIX, self.name)
    }

    ///Intermediate builders live in the builder package of their base.
    pub fn full_qualified_name(&self) -> String {
        format!("{}.builder.{}", self.package, self.type_name())
    }
}
