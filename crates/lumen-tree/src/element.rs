/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{
    context::TYPE_PREFIX,
    field::Field,
    types::{ClassRef, TypeRef},
    util::MutableOrEmptyList,
};

new_key_type! {
    ///Key of an [Element] inside the [TreeContext](crate::context::TreeContext) arena.
    pub struct ElementKey;
}

///Structural kind an element is printed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Class,
    AbstractClass,
    Interface,
    SealedClass,
    SealedInterface,
}

impl ElementKind {
    ///Keyword sequence that opens a declaration of this kind.
    pub fn title(&self) -> &'static str {
        match self {
            ElementKind::Class => "open class",
            ElementKind::AbstractClass => "abstract class",
            ElementKind::Interface => "interface",
            ElementKind::SealedClass => "sealed class",
            ElementKind::SealedInterface => "sealed interface",
        }
    }

    ///Bracket style when a type of this kind appears in a supertype list.
    pub fn braces(&self) -> &'static str {
        match self {
            ElementKind::Class | ElementKind::AbstractClass | ElementKind::SealedClass => "()",
            ElementKind::Interface | ElementKind::SealedInterface => "",
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, ElementKind::Interface | ElementKind::SealedInterface)
    }
}

///Generic type parameter declared on an element.
#[derive(Debug, Clone)]
pub struct TypeParam {
    pub name: String,
    pub bound: Option<TypeRef>,
}

///Edge to a parent element, optionally instantiating the parent's type
/// parameters.
#[derive(Debug, Clone)]
pub struct ParentRef {
    pub element: ElementKey,
    pub args: SmallVec<[TypeRef; 2]>,
}

impl ParentRef {
    pub fn new(element: ElementKey) -> Self {
        ParentRef {
            element,
            args: SmallVec::new(),
        }
    }

    pub fn with_args(element: ElementKey, args: impl IntoIterator<Item = TypeRef>) -> Self {
        ParentRef {
            element,
            args: args.into_iter().collect(),
        }
    }
}

///A node type of the generated tree.
///
/// Elements form a single rooted DAG over [ParentRef] edges. The field list
/// only holds the fields declared on the element itself, the effective set
/// including everything inherited is computed by the
/// [resolver](crate::resolver).
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub package: String,
    pub kind: ElementKind,
    pub is_sealed: bool,
    pub parent_refs: Vec<ParentRef>,
    pub fields: Vec<Field>,
    pub params: MutableOrEmptyList<TypeParam>,
    pub additional_supertypes: MutableOrEmptyList<ClassRef>,
    pub arbitrary_imports: MutableOrEmptyList<ClassRef>,
    ///Set if the element takes part in the bulk "transform remaining
    /// children" protocol.
    pub need_transform_other_children: bool,
}

impl Element {
    ///Name of the generated type, so the schema name with the tree prefix.
    pub fn type_name(&self) -> String {
        format!("{}{}", TYPE_PREFIX, self.name)
    }

    pub fn full_qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.type_name())
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    ///Schema name with a lowercase first char, usable as a parameter name.
    /// `Class` would collide with a keyword of the generated language.
    pub fn safe_decapitalized_name(&self) -> String {
        if self.name == "Class" {
            "klass".to_owned()
        } else {
            let mut chars = self.name.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
