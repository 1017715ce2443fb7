/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Derives the effective, inheritance-resolved view of a frozen schema.
//!
//! For every element the resolver computes the ordered union of fields
//! visible on it (own fields first, then everything inherited), with
//! narrowing validated and all flags the printers need.

use slotmap::SecondaryMap;

use crate::{
    context::{TreeContext, QUALIFIED_ACCESS_TYPE},
    element::{ElementKey, ElementKind},
    error::SchemaError,
    field::Field,
    types::{TypeBase, TypeRef},
};

///Field of an element with its inheritance flags resolved.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub field: Field,
    ///Inherited unchanged, the element does not re-declare it.
    pub from_parent: bool,
    ///A strict ancestor declares a field of this name. Drives the override
    /// modifier on the property declaration.
    pub overrides: bool,
    ///Override bit for the replace mutator. Same as `overrides` except for
    /// the `source` exemption: an ancestor declares the property but not the
    /// mutator, so the mutator must not carry the modifier there.
    pub needs_override: bool,
    ///Some ancestor also declares the separate transform hook for this
    /// field.
    pub parent_has_separate_transform: bool,
}

///Per element output of [resolve].
#[derive(Debug, Clone)]
pub struct ResolvedElement {
    ///Effective fields: own declarations first, inherited ones after, in
    /// parent order, deduplicated by name.
    pub fields: Vec<ResolvedField>,
    ///Transitive ancestors, deduplicated, excluding the element itself.
    pub ancestors: Vec<ElementKey>,
    ///Elements that name this one as a direct parent.
    pub children: Vec<ElementKey>,
    ///A class kind with no abstract or sealed class anywhere above it needs
    /// the synthetic pure abstract base.
    pub need_pure_abstract_element: bool,
    ///Any direct parent takes part in the transform-other-children protocol.
    pub parent_needs_transform_other_children: bool,
}

pub struct ResolvedTree {
    resolved: SecondaryMap<ElementKey, ResolvedElement>,
}

impl ResolvedTree {
    pub fn resolved(&self, key: ElementKey) -> &ResolvedElement {
        self.resolved
            .get(key)
            .expect("every registered element is resolved")
    }
}

///Resolves every element of the frozen `ctx`.
pub fn resolve(ctx: &TreeContext) -> Result<ResolvedTree, SchemaError> {
    let mut resolved = SecondaryMap::new();
    let mut stack = Vec::new();
    for key in ctx.elements() {
        resolve_element(ctx, key, &mut resolved, &mut stack)?;
    }

    //second pass wires up the child lists
    for key in ctx.elements() {
        let parents: Vec<ElementKey> = ctx
            .element(key)
            .parent_refs
            .iter()
            .map(|p| p.element)
            .collect();
        for parent in parents {
            resolved
                .get_mut(parent)
                .expect("parents resolve before their children")
                .children
                .push(key);
        }
    }

    Ok(ResolvedTree { resolved })
}

fn resolve_element(
    ctx: &TreeContext,
    key: ElementKey,
    memo: &mut SecondaryMap<ElementKey, ResolvedElement>,
    stack: &mut Vec<ElementKey>,
) -> Result<(), SchemaError> {
    if memo.contains_key(key) {
        return Ok(());
    }
    if stack.contains(&key) {
        return Err(SchemaError::CyclicInheritance(
            ctx.element(key).name.clone(),
        ));
    }

    stack.push(key);
    let parent_keys: Vec<ElementKey> = ctx
        .element(key)
        .parent_refs
        .iter()
        .map(|p| p.element)
        .collect();
    for parent in &parent_keys {
        resolve_element(ctx, *parent, memo, stack)?;
    }
    stack.pop();

    let element = ctx.element(key);

    let mut fields: Vec<ResolvedField> = element
        .fields
        .iter()
        .map(|field| ResolvedField {
            field: field.clone(),
            from_parent: false,
            overrides: false,
            needs_override: false,
            parent_has_separate_transform: false,
        })
        .collect();

    let mut ancestors: Vec<ElementKey> = Vec::new();
    let mut parent_needs_toc = false;

    for parent_ref in &element.parent_refs {
        let parent_key = parent_ref.element;
        let parent = ctx.element(parent_key);
        if parent.need_transform_other_children {
            parent_needs_toc = true;
        }
        if !ancestors.contains(&parent_key) {
            ancestors.push(parent_key);
        }

        //generic arguments of the edge substitute the parent's parameters,
        //positionally
        let substitution: Vec<(&str, &TypeRef)> = parent
            .params
            .iter()
            .zip(parent_ref.args.iter())
            .map(|(param, arg)| (param.name.as_str(), arg))
            .collect();

        let parent_resolved = memo.get(parent_key).expect("parent resolved above");
        for ancestor in &parent_resolved.ancestors {
            if !ancestors.contains(ancestor) {
                ancestors.push(*ancestor);
            }
        }

        for inherited in &parent_resolved.fields {
            let inherited_ty = substitute(&inherited.field.ty, &substitution);
            if let Some(existing) = fields
                .iter_mut()
                .find(|rf| rf.field.name == inherited.field.name)
            {
                //closest-to-leaf declaration wins, but only over a
                //compatible one
                if !compatible(ctx, &existing.field.ty, &inherited_ty) {
                    return Err(SchemaError::IncompatibleFieldTypes {
                        element: element.name.clone(),
                        field: existing.field.name.clone(),
                    });
                }
                if inherited.field.is_final && !existing.from_parent {
                    return Err(SchemaError::FinalFieldNarrowed {
                        element: element.name.clone(),
                        field: existing.field.name.clone(),
                    });
                }
                existing.overrides = true;
                if inherited.field.needs_separate_transform
                    || inherited.parent_has_separate_transform
                {
                    existing.parent_has_separate_transform = true;
                }
            } else {
                let mut field = inherited.field.clone();
                field.ty = inherited_ty;
                //a sealed hierarchy closes over its fields, children never
                //re-declare them
                if parent.is_sealed {
                    field.is_final = true;
                }
                fields.push(ResolvedField {
                    field,
                    from_parent: true,
                    overrides: true,
                    needs_override: false,
                    parent_has_separate_transform: inherited.field.needs_separate_transform
                        || inherited.parent_has_separate_transform,
                });
            }
        }
    }

    let full_qualified_name = element.full_qualified_name();
    for rf in &mut fields {
        rf.needs_override = rf.overrides
            && !(rf.field.name == "source"
                && full_qualified_name.ends_with(QUALIFIED_ACCESS_TYPE));
    }

    let need_pure_abstract_element = !element.kind.is_interface()
        && !ancestors.iter().any(|a| {
            matches!(
                ctx.element(*a).kind,
                ElementKind::AbstractClass | ElementKind::SealedClass
            )
        });

    memo.insert(
        key,
        ResolvedElement {
            fields,
            ancestors,
            children: Vec::new(),
            need_pure_abstract_element,
            parent_needs_transform_other_children: parent_needs_toc,
        },
    );
    Ok(())
}

///Replaces type parameter references according to `substitution`, leaving
/// everything else untouched.
fn substitute(ty: &TypeRef, substitution: &[(&str, &TypeRef)]) -> TypeRef {
    if substitution.is_empty() {
        return ty.clone();
    }
    if let TypeBase::Param(name) = &ty.base {
        if let Some((_, replacement)) = substitution.iter().find(|(param, _)| *param == name.as_str()) {
            let mut replaced = (*replacement).clone();
            replaced.nullable |= ty.nullable;
            return replaced;
        }
    }
    let mut out = ty.clone();
    out.args = ty
        .args
        .iter()
        .map(|arg| Box::new(substitute(arg, substitution)))
        .collect();
    out
}

///A re-declaration is compatible if it is the same type, or an element type
/// narrowed along the parent DAG, or a non-null narrowing of a nullable
/// field. Generic arguments must match exactly.
fn compatible(ctx: &TreeContext, narrow: &TypeRef, wide: &TypeRef) -> bool {
    if narrow == wide {
        return true;
    }
    if narrow.nullable && !wide.nullable {
        return false;
    }
    if narrow.args != wide.args {
        return false;
    }
    match (&narrow.base, &wide.base) {
        (TypeBase::Element(n), TypeBase::Element(w)) => n == w || is_ancestor(ctx, *w, *n),
        (n, w) => n == w,
    }
}

///True if `ancestor` is reachable from `element` over parent edges.
fn is_ancestor(ctx: &TreeContext, ancestor: ElementKey, element: ElementKey) -> bool {
    ctx.element(element)
        .parent_refs
        .iter()
        .any(|p| p.element == ancestor || is_ancestor(ctx, ancestor, p.element))
}
