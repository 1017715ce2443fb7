/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use crate::{
    types::{ClassRef, TypeBase, TypeRef},
    util::MutableOrEmptyList,
};

///Shape of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ///One value.
    Single,
    ///Ordered homogeneous sequence of values. `mutable_or_empty` picks the
    /// lazily allocated, shared-empty-until-first-write sequence over an
    /// always mutable owned one.
    List { mutable_or_empty: bool },
}

///A named, typed attribute of an element.
///
/// For list fields `ty` is the item type, the sequence wrapper is decided by
/// [FieldKind] at print time.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    pub kind: FieldKind,
    pub mutable: bool,
    pub default: Option<String>,
    ///Constructor parameter only, never a property and never mutated.
    pub is_parameter: bool,
    ///No descendant may narrow or replace this field.
    pub is_final: bool,
    ///Requests generation of the `replaceX` mutator.
    pub with_replace: bool,
    ///Forces the replace parameter to be nullable even for a non-null field.
    pub use_nullable_for_replace: bool,
    ///The field can be substituted independently through a `transformX` hook.
    pub needs_separate_transform: bool,
    ///Transformed by the bulk "other children" pass instead of directly in
    /// `transformChildren`.
    pub in_other_children: bool,
    ///Alternate parameter types accepted by additional replace overloads.
    pub overridden_types: MutableOrEmptyList<TypeRef>,
    pub arbitrary_imports: MutableOrEmptyList<ClassRef>,
}

impl Field {
    fn new(name: &str, ty: TypeRef, kind: FieldKind, mutable: bool) -> Self {
        Field {
            name: name.to_owned(),
            ty,
            kind,
            mutable,
            default: None,
            is_parameter: false,
            is_final: false,
            with_replace: false,
            use_nullable_for_replace: false,
            needs_separate_transform: false,
            in_other_children: false,
            overridden_types: MutableOrEmptyList::new(),
            arbitrary_imports: MutableOrEmptyList::new(),
        }
    }

    pub fn single(name: &str, ty: TypeRef) -> Self {
        Field::new(name, ty, FieldKind::Single, false)
    }

    ///An always mutable owned sequence of `item` values.
    pub fn list(name: &str, item: TypeRef) -> Self {
        Field::new(
            name,
            item,
            FieldKind::List {
                mutable_or_empty: false,
            },
            false,
        )
    }

    ///A sequence that shares the empty instance until the first write.
    pub fn mutable_or_empty_list(name: &str, item: TypeRef) -> Self {
        Field::new(
            name,
            item,
            FieldKind::List {
                mutable_or_empty: true,
            },
            false,
        )
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    ///Requests the replace mutator. The declared property stays a `val`,
    /// substitution goes through the mutator and the implementation's
    /// storage.
    pub fn with_replace(mut self) -> Self {
        self.with_replace = true;
        self
    }

    pub fn parameter(mut self) -> Self {
        self.is_parameter = true;
        self
    }

    pub fn final_field(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_owned());
        self
    }

    pub fn separate_transform(mut self) -> Self {
        self.needs_separate_transform = true;
        self
    }

    pub fn other_children(mut self) -> Self {
        self.in_other_children = true;
        self
    }

    pub fn overridden_type(mut self, ty: TypeRef) -> Self {
        self.overridden_types.push(ty);
        self
    }

    pub fn nullable_for_replace(mut self) -> Self {
        self.use_nullable_for_replace = true;
        self
    }

    pub fn import(mut self, class: &ClassRef) -> Self {
        self.arbitrary_imports.push(class.clone());
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, FieldKind::List { .. })
    }

    pub fn is_mutable_or_empty(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::List {
                mutable_or_empty: true
            }
        )
    }

    ///Declared as `val`. Only explicitly mutable fields surface as `var`,
    /// replaceable fields mutate through their mutator instead.
    pub fn is_val(&self) -> bool {
        !self.mutable
    }

    ///True if the value (or list item) is a generated element, so child
    /// traversal has to visit it.
    pub fn holds_element(&self) -> bool {
        matches!(self.ty.base, TypeBase::Element(_))
    }
}
