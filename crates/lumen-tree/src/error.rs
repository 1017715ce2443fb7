/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use thiserror::Error;

///Schema level faults. All of these are developer mistakes in the tree
/// definition, they abort the whole generation run and are never worked
/// around.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("element `{0}` is already registered")]
    DuplicateElement(String),
    #[error("field `{field}` is already declared on `{element}`")]
    DuplicateField { element: String, field: String },
    #[error("type `{0}` does not resolve to a builtin, a registered element or a declared external type")]
    UnresolvedType(String),
    #[error("type parameter `{param}` is not declared on `{element}`")]
    UnknownTypeParameter { element: String, param: String },
    #[error("field `{field}` on `{element}` re-declares an inherited field with an incompatible type")]
    IncompatibleFieldTypes { element: String, field: String },
    #[error("field `{field}` on `{element}` narrows a field an ancestor already finalized")]
    FinalFieldNarrowed { element: String, field: String },
    #[error("inheritance chain of `{0}` is cyclic")]
    CyclicInheritance(String),
}
