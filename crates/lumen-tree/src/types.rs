/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
use lazy_static::lazy_static;
use smallvec::SmallVec;

use crate::element::ElementKey;

///Structural flavor of an externally declared type. Decides the bracket
/// style when such a type shows up in a supertype list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
}

///Reference to a type the generator does not emit itself, like a symbol or
/// a source handle of the surrounding compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub package: String,
    pub name: String,
    pub kind: TypeKind,
}

impl ClassRef {
    pub fn class(package: &str, name: &str) -> Self {
        ClassRef {
            package: package.to_owned(),
            name: name.to_owned(),
            kind: TypeKind::Class,
        }
    }

    pub fn interface(package: &str, name: &str) -> Self {
        ClassRef {
            package: package.to_owned(),
            name: name.to_owned(),
            kind: TypeKind::Interface,
        }
    }

    pub fn full_qualified_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

lazy_static! {
    //Builtin types of the generated language. Everything under `kotlin.` is
    //always available and never imported.
    pub static ref BOOLEAN: ClassRef = ClassRef::class("kotlin", "Boolean");
    pub static ref INT: ClassRef = ClassRef::class("kotlin", "Int");
    pub static ref STRING: ClassRef = ClassRef::class("kotlin", "String");
    pub static ref COLLECTION: ClassRef = ClassRef::interface("kotlin.collections", "Collection");
    pub static ref MAP: ClassRef = ClassRef::interface("kotlin.collections", "Map");
}

///What a [TypeRef] points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBase {
    ///A generated element.
    Element(ElementKey),
    ///An externally declared class or interface.
    Class(ClassRef),
    ///A type parameter of the owning element.
    Param(String),
}

///A possibly nullable, possibly generic type reference used by fields,
/// parent edges and replace overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub base: TypeBase,
    pub args: SmallVec<[Box<TypeRef>; 2]>,
    pub nullable: bool,
}

impl TypeRef {
    pub fn element(key: ElementKey) -> Self {
        TypeRef {
            base: TypeBase::Element(key),
            args: SmallVec::new(),
            nullable: false,
        }
    }

    pub fn class(class: &ClassRef) -> Self {
        TypeRef {
            base: TypeBase::Class(class.clone()),
            args: SmallVec::new(),
            nullable: false,
        }
    }

    pub fn param(name: &str) -> Self {
        TypeRef {
            base: TypeBase::Param(name.to_owned()),
            args: SmallVec::new(),
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_arg(mut self, arg: TypeRef) -> Self {
        self.args.push(Box::new(arg));
        self
    }
}
