/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Computes the import list of a generatable unit.
//!
//! The list is minimal (builtins and same-package names are dropped),
//! deduplicated, sorted, and always ends in the one visitor protocol
//! wildcard. Element, implementation and builder units live in distinct
//! package suffixes, so redundancy is judged against the suffixed package.

use lumen_tree::{
    builder::{Implementation, IntermediateBuilder, LeafBuilder},
    element::Element,
    resolver::{ResolvedElement, ResolvedTree},
    ElementKey, TreeContext,
};

use crate::{
    error::GenError,
    printer::{
        BUILDER_DSL, IMPLEMENTATION_DETAIL, MUTABLE_OR_EMPTY_LIST, PURE_ABSTRACT_ELEMENT,
        TO_MUTABLE_OR_EMPTY, VISITOR_PACKAGE,
    },
};

///Sub-kind of a generatable unit. Each kind owns a distinct package suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Element,
    Implementation,
    Builder,
}

impl UnitKind {
    pub fn package_suffix(&self) -> &'static str {
        match self {
            UnitKind::Element => "",
            UnitKind::Implementation => ".impl",
            UnitKind::Builder => ".builder",
        }
    }
}

pub fn element_imports(ctx: &TreeContext, tree: &ResolvedTree, key: ElementKey) -> Vec<String> {
    let element = ctx.element(key);
    let resolved = tree.resolved(key);

    let mut base = Vec::new();
    for parent_ref in &element.parent_refs {
        base.push(ctx.element(parent_ref.element).full_qualified_name());
        for arg in &parent_ref.args {
            if let Some(fqn) = ctx.type_fqn(arg) {
                base.push(fqn);
            }
        }
    }
    //the root type shows up in every accept/transform signature
    base.push(ctx.element(ctx.root()).full_qualified_name());
    if resolved.need_pure_abstract_element {
        base.push(PURE_ABSTRACT_ELEMENT.full_qualified_name());
    }
    for extra in &element.additional_supertypes {
        base.push(extra.full_qualified_name());
    }

    collect_internal(ctx, element, resolved, base, UnitKind::Element)
}

pub fn implementation_imports(
    ctx: &TreeContext,
    tree: &ResolvedTree,
    implementation: &Implementation,
) -> Vec<String> {
    let element = ctx.element(implementation.element);
    let resolved = tree.resolved(implementation.element);
    let base = vec![
        element.full_qualified_name(),
        ctx.element(ctx.root()).full_qualified_name(),
    ];
    collect_internal(ctx, element, resolved, base, UnitKind::Implementation)
}

pub fn leaf_builder_imports(
    ctx: &TreeContext,
    tree: &ResolvedTree,
    builder: &LeafBuilder,
) -> Vec<String> {
    let implementation = &ctx.implementations()[builder.implementation];
    let element = ctx.element(implementation.element);
    let resolved = tree.resolved(implementation.element);

    let mut base = vec![
        element.full_qualified_name(),
        format!("{}.impl.{}Impl", element.package, element.type_name()),
        BUILDER_DSL.full_qualified_name(),
    ];
    for parent in &builder.parents {
        base.push(ctx.intermediate_builders()[*parent].full_qualified_name());
    }

    let mut imports = collect_internal(ctx, element, resolved, base, UnitKind::Builder);
    //explicitly requested by the contracts block, the builtin namespace
    //filter does not apply to it. Sorts before every generated package.
    imports.insert(0, "kotlin.contracts.*".to_owned());
    imports
}

pub fn intermediate_builder_imports(
    ctx: &TreeContext,
    builder: &IntermediateBuilder,
) -> Result<Vec<String>, GenError> {
    let materialized = builder
        .materialized_element
        .ok_or_else(|| GenError::MissingMaterializedElement(builder.type_name()))?;

    let mut fqns = vec![
        BUILDER_DSL.full_qualified_name(),
        ctx.element(materialized).full_qualified_name(),
    ];
    for parent in &builder.parents {
        fqns.push(ctx.intermediate_builders()[*parent].full_qualified_name());
    }
    for field in &builder.fields {
        if let Some(fqn) = ctx.type_fqn(&field.ty) {
            fqns.push(fqn);
        }
        for arg in &field.ty.args {
            if let Some(fqn) = ctx.type_fqn(arg) {
                fqns.push(fqn);
            }
        }
        for import in &field.arbitrary_imports {
            fqns.push(import.full_qualified_name());
        }
    }

    Ok(filter_redundant(fqns, &builder.package, UnitKind::Builder))
}

///Everything a unit pulls in through its effective fields, on top of the
/// unit specific `base` names.
fn collect_internal(
    ctx: &TreeContext,
    element: &Element,
    resolved: &ResolvedElement,
    mut base: Vec<String>,
    kind: UnitKind,
) -> Vec<String> {
    for rf in &resolved.fields {
        //a field the element finalized with an initializer never reappears
        //in implementations or builders
        if kind != UnitKind::Element && rf.field.is_final && rf.field.default.is_some() {
            continue;
        }
        if let Some(fqn) = ctx.type_fqn(&rf.field.ty) {
            base.push(fqn);
        }
        for arg in &rf.field.ty.args {
            if let Some(fqn) = ctx.type_fqn(arg) {
                base.push(fqn);
            }
        }
        for overridden in &rf.field.overridden_types {
            if let Some(fqn) = ctx.type_fqn(overridden) {
                base.push(fqn);
            }
        }
        for import in &rf.field.arbitrary_imports {
            base.push(import.full_qualified_name());
        }
    }
    for import in &element.arbitrary_imports {
        base.push(import.full_qualified_name());
    }
    for param in &element.params {
        if let Some(bound) = &param.bound {
            if let Some(fqn) = ctx.type_fqn(bound) {
                base.push(fqn);
            }
        }
    }

    //helper types are only pulled in when a mutable-or-empty list is present
    if resolved
        .fields
        .iter()
        .any(|rf| rf.field.is_mutable_or_empty())
    {
        match kind {
            UnitKind::Implementation => {
                base.push(MUTABLE_OR_EMPTY_LIST.full_qualified_name());
                base.push(TO_MUTABLE_OR_EMPTY.full_qualified_name());
            }
            UnitKind::Builder => base.push(TO_MUTABLE_OR_EMPTY.full_qualified_name()),
            UnitKind::Element => {}
        }
    }

    if resolved
        .fields
        .iter()
        .any(|rf| rf.field.name == "source" && rf.field.with_replace)
    {
        base.push(IMPLEMENTATION_DETAIL.full_qualified_name());
    }

    filter_redundant(base, &element.package, kind)
}

///Drops builtins and same-package names, dedups, sorts, and appends the
/// visitor protocol wildcard.
fn filter_redundant(fqns: Vec<String>, package: &str, kind: UnitKind) -> Vec<String> {
    let own_package = format!("{}{}", package, kind.package_suffix());
    let mut imports: Vec<String> = fqns
        .into_iter()
        .filter(|fqn| !fqn.starts_with("kotlin."))
        .filter(|fqn| {
            fqn.rsplit_once('.')
                .map(|(owning, _)| owning != own_package)
                .unwrap_or(true)
        })
        .collect();
    imports.sort();
    imports.dedup();
    imports.push(format!("{}.*", VISITOR_PACKAGE));
    imports
}
