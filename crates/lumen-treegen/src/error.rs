/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use lumen_tree::SchemaError;
use thiserror::Error;

///Faults detected while printing units. Like [SchemaError]s these are
/// developer mistakes in the schema, a failing unit aborts the whole run and
/// no partial text is ever handed out.
#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("sealed element `{0}` has no children that narrow it")]
    SealedWithoutChildren(String),
    #[error("intermediate builder `{0}` never registered a materialized element")]
    MissingMaterializedElement(String),
    #[error("field `{field}` on `{element}` carries override types without requesting replace")]
    OverrideTypesWithoutReplace { element: String, field: String },
    #[error("field `{field}` on `{element}` lists the same override type twice")]
    DuplicateOverrideType { element: String, field: String },
    #[error("the root element must be an interface")]
    RootMustBeInterface,
}

///Error type collection of the full pipeline run.
///Mostly transparent errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
    #[error(transparent)]
    GenError(#[from] GenError),
}
