/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Unit printers and the shared rendering helpers.
//!
//! One printer per unit flavor: [element] for the abstract declarations,
//! [implementation] for the concrete nodes, [builder] for leaf and
//! intermediate builders, [visitor] for the protocol units.

use std::path::PathBuf;

use lazy_static::lazy_static;

use lumen_tree::{
    context::BASE_PACKAGE, element::Element, field::FieldKind, ClassRef, Field, TreeContext,
    TypeBase, TypeRef,
};

pub mod builder;
pub mod element;
pub mod implementation;
pub mod visitor;

///Package of the visitor/transformer protocol, imported as one wildcard by
/// every other unit.
pub const VISITOR_PACKAGE: &str = "org.lumenlang.compiler.tree.visitors";

pub const VISITOR_TYPE: &str = "LumenVisitor";
pub const VISITOR_VOID_TYPE: &str = "LumenVisitorVoid";
pub const TRANSFORMER_TYPE: &str = "LumenTransformer";

lazy_static! {
    ///Synthetic base class inserted under class kinds that have no abstract
    /// or sealed class ancestor.
    pub static ref PURE_ABSTRACT_ELEMENT: ClassRef =
        ClassRef::class(BASE_PACKAGE, "LumenPureAbstractElement");
    ///Opt-in marker on the `source` replace contract.
    pub static ref IMPLEMENTATION_DETAIL: ClassRef =
        ClassRef::class(BASE_PACKAGE, "LumenImplementationDetail");
    pub static ref BUILDER_DSL: ClassRef =
        ClassRef::class(&format!("{}.builder", BASE_PACKAGE), "LumenBuilderDsl");
    pub static ref MUTABLE_OR_EMPTY_LIST: ClassRef =
        ClassRef::class(BASE_PACKAGE, "MutableOrEmptyList");
    pub static ref TO_MUTABLE_OR_EMPTY: ClassRef =
        ClassRef::class(&format!("{}.builder", BASE_PACKAGE), "toMutableOrEmpty");
}

///One rendered unit, ready to be handed to the writer. The path is relative
/// to the generation root: package as directories, type name as file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub text: String,
}

impl GeneratedFile {
    pub fn new(package: &str, type_name: &str, text: String) -> Self {
        let mut path = PathBuf::new();
        for part in package.split('.') {
            path.push(part);
        }
        path.push(format!("{}.kt", type_name));
        GeneratedFile { path, text }
    }
}

///Indentation aware line printer all units are rendered through.
pub struct SourcePrinter {
    buf: String,
    indent: usize,
    at_line_start: bool,
}

impl SourcePrinter {
    pub fn new() -> Self {
        SourcePrinter {
            buf: String::new(),
            indent: 0,
            at_line_start: true,
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            for _ in 0..self.indent {
                self.buf.push_str("    ");
            }
            self.at_line_start = false;
        }
    }

    ///Appends to the current line, indenting first if the line is fresh.
    pub fn print(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_indent();
        self.buf.push_str(text);
    }

    ///Prints `line` and terminates it.
    pub fn println(&mut self, line: &str) {
        if !line.is_empty() {
            self.write_indent();
            self.buf.push_str(line);
        }
        self.buf.push('\n');
        self.at_line_start = true;
    }

    ///Empty separator line.
    pub fn blank(&mut self) {
        self.println("");
    }

    pub fn indented(&mut self, f: impl FnOnce(&mut SourcePrinter)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl Default for SourcePrinter {
    fn default() -> Self {
        SourcePrinter::new()
    }
}

pub fn print_copyright(p: &mut SourcePrinter) {
    p.println("/*");
    p.println(" * Copyright 2025 the Lumen language contributors.");
    p.println(" * Use of this source code is governed by the MIT license that can be");
    p.println(" * found in the LICENSE file.");
    p.println(" */");
    p.blank();
}

pub fn print_generated_message(p: &mut SourcePrinter) {
    p.println("/*");
    p.println(" * This file was generated automatically");
    p.println(" * DO NOT MODIFY IT MANUALLY");
    p.println(" */");
    p.blank();
}

///Renders `ty` the way it appears in source, with generic arguments and the
/// nullability marker.
pub fn render_type(ctx: &TreeContext, ty: &TypeRef) -> String {
    let mut out = ctx.type_name_of(ty);
    if !ty.args.is_empty() {
        let args: Vec<String> = ty.args.iter().map(|arg| render_type(ctx, arg)).collect();
        out.push('<');
        out.push_str(&args.join(", "));
        out.push('>');
    }
    if ty.nullable {
        out.push('?');
    }
    out
}

///Declared value type of a field. Lists get the read-only sequence wrapper,
/// the storage side is decided by [mutable_value_type].
pub fn field_value_type(ctx: &TreeContext, field: &Field) -> String {
    match field.kind {
        FieldKind::Single => render_type(ctx, &field.ty),
        FieldKind::List { .. } => format!("List<{}>", render_type(ctx, &field.ty)),
    }
}

///Storage type of a field inside an implementation.
pub fn mutable_value_type(ctx: &TreeContext, field: &Field) -> String {
    match field.kind {
        FieldKind::List {
            mutable_or_empty: true,
        } => format!("MutableOrEmptyList<{}>", render_type(ctx, &field.ty)),
        FieldKind::List { .. } => format!("MutableList<{}>", render_type(ctx, &field.ty)),
        FieldKind::Single => render_type(ctx, &field.ty),
    }
}

pub fn cap(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

///`fun replaceX(newX: T)`, optionally against one of the override types.
pub fn replace_declaration(
    ctx: &TreeContext,
    field: &Field,
    overridden: Option<&TypeRef>,
    force_nullable: bool,
) -> String {
    let cap_name = cap(&field.name);
    let ty = match overridden {
        Some(overridden) => render_type(ctx, overridden),
        None => field_value_type(ctx, field),
    };
    let ty = if force_nullable && !ty.ends_with('?') {
        format!("{}?", ty)
    } else {
        ty
    };
    format!("fun replace{}(new{}: {})", cap_name, cap_name, ty)
}

///`fun <D> transformX(transformer: LumenTransformer<D>, data: D): R`.
pub fn transform_declaration(transform_name: &str, return_type: &str) -> String {
    format!(
        "fun <D> transform{}(transformer: {}<D>, data: D): {}",
        transform_name, TRANSFORMER_TYPE, return_type
    )
}

///Type name with its own parameters applied, used as a return type.
pub fn type_with_params(element: &Element) -> String {
    let mut out = element.type_name();
    if !element.params.is_empty() {
        let names: Vec<&str> = element.params.iter().map(|p| p.name.as_str()).collect();
        out.push('<');
        out.push_str(&names.join(", "));
        out.push('>');
    }
    out
}

///`<T : Bound>` declaration clause of an element, empty without parameters.
pub fn type_parameters_decl(ctx: &TreeContext, element: &Element) -> String {
    if element.params.is_empty() {
        return String::new();
    }
    let params: Vec<String> = element
        .params
        .iter()
        .map(|param| match &param.bound {
            Some(bound) => format!("{} : {}", param.name, render_type(ctx, bound)),
            None => param.name.clone(),
        })
        .collect();
    format!("<{}>", params.join(", "))
}

///Type name with every parameter erased to a star, for visitor signatures.
pub fn type_with_star_params(element: &Element) -> String {
    let mut out = element.type_name();
    if !element.params.is_empty() {
        let stars: Vec<&str> = element.params.iter().map(|_| "*").collect();
        out.push('<');
        out.push_str(&stars.join(", "));
        out.push('>');
    }
    out
}

///Storage keyword inside an implementation. The mutable-or-empty wrapper
/// and every replaceable single value are reassigned, plain lists mutate
/// their content in place.
pub fn impl_is_var(field: &Field) -> bool {
    match field.kind {
        FieldKind::List { mutable_or_empty } => mutable_or_empty,
        FieldKind::Single => field.with_replace || field.mutable,
    }
}

///Builtins that can not be `lateinit` in a builder and fall back to a
/// not-null delegate.
pub fn is_builtin_primitive(ty: &TypeRef) -> bool {
    matches!(
        &ty.base,
        TypeBase::Class(class) if class.package == "kotlin"
            && matches!(class.name.as_str(), "Boolean" | "Int" | "Long" | "Double")
    )
}

#[cfg(test)]
mod tests {
    use super::SourcePrinter;

    #[test]
    fn indentation_follows_nesting() {
        let mut p = SourcePrinter::new();
        p.println("class Foo {");
        p.indented(|p| {
            p.println("val bar: Int");
            p.blank();
            p.indented(|p| p.println("deep"));
        });
        p.println("}");
        assert_eq!(
            p.into_string(),
            "class Foo {\n    val bar: Int\n\n        deep\n}\n"
        );
    }

    #[test]
    fn print_appends_to_the_open_line() {
        let mut p = SourcePrinter::new();
        p.print("abstract ");
        p.print("val x");
        p.println(": Int");
        assert_eq!(p.into_string(), "abstract val x: Int\n");
    }
}
