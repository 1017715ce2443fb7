/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Prints leaf and intermediate builder units.
//!
//! A leaf builder enforces the "every required field was set" contract in
//! the generated text itself: required reference fields are `lateinit`,
//! required builtins use a not-null delegate, so `build()` faults at the
//! consumer's first miss instead of handing out a half initialized node.

use lumen_tree::{
    builder::{IntermediateBuilder, LeafBuilder},
    field::FieldKind,
    resolver::{ResolvedField, ResolvedTree},
    TreeContext,
};

use crate::{
    error::GenError,
    imports,
    printer::{
        field_value_type, is_builtin_primitive, print_copyright, print_generated_message,
        render_type, GeneratedFile, SourcePrinter, BUILDER_DSL,
    },
};

fn skipped(rf: &ResolvedField) -> bool {
    rf.field.is_final && rf.field.default.is_some()
}

///Names of every field the intermediate builder `index` declares, including
/// what it inherits from its own parents.
fn intermediate_field_names(ctx: &TreeContext, index: usize, out: &mut Vec<String>) {
    let builder = &ctx.intermediate_builders()[index];
    for field in &builder.fields {
        out.push(field.name.clone());
    }
    for parent in &builder.parents {
        intermediate_field_names(ctx, *parent, out);
    }
}

pub fn generate_leaf(
    ctx: &TreeContext,
    tree: &ResolvedTree,
    builder: &LeafBuilder,
) -> Result<GeneratedFile, GenError> {
    let implementation = &ctx.implementations()[builder.implementation];
    let element = ctx.element(implementation.element);
    let resolved = tree.resolved(implementation.element);
    let type_name = element.type_name();
    let builder_name = format!("{}Builder", type_name);
    let package = format!("{}.builder", element.package);

    let mut parent_fields = Vec::new();
    for parent in &builder.parents {
        intermediate_field_names(ctx, *parent, &mut parent_fields);
    }

    let mut p = SourcePrinter::new();
    print_copyright(&mut p);
    p.println("@file:Suppress(\"DuplicatedCode\", \"unused\")");
    p.blank();
    p.println(&format!("package {}", package));
    p.blank();
    let imports = imports::leaf_builder_imports(ctx, tree, builder);
    for import in &imports {
        p.println(&format!("import {}", import));
    }
    if !imports.is_empty() {
        p.blank();
    }
    print_generated_message(&mut p);

    p.println(&format!("@{}", BUILDER_DSL.name));
    if builder.parents.is_empty() {
        p.println(&format!("class {} {{", builder_name));
    } else {
        let parents: Vec<String> = builder
            .parents
            .iter()
            .map(|parent| ctx.intermediate_builders()[*parent].type_name())
            .collect();
        p.println(&format!("class {} : {} {{", builder_name, parents.join(", ")));
    }

    p.indented(|p| {
        for rf in &resolved.fields {
            if skipped(rf) {
                continue;
            }
            let override_kw = if parent_fields.contains(&rf.field.name) {
                "override "
            } else {
                ""
            };
            p.println(&builder_field_line(ctx, rf, override_kw));
        }
        p.blank();

        let override_kw = if builder.parents.is_empty() {
            ""
        } else {
            "override "
        };
        p.println(&format!("{}fun build(): {} {{", override_kw, type_name));
        p.indented(|p| {
            p.println(&format!("return {}Impl(", type_name));
            p.indented(|p| {
                //argument order mirrors the implementation's constructor
                for rf in &resolved.fields {
                    if skipped(rf) {
                        continue;
                    }
                    if rf.field.is_mutable_or_empty() {
                        p.println(&format!("{}.toMutableOrEmpty(),", rf.field.name));
                    } else {
                        p.println(&format!("{},", rf.field.name));
                    }
                }
            });
            p.println(")");
        });
        p.println("}");
    });
    p.println("}");
    p.blank();

    p.println("@OptIn(ExperimentalContracts::class)");
    p.println(&format!(
        "inline fun build{}(init: {}.() -> Unit): {} {{",
        element.name, builder_name, type_name
    ));
    p.indented(|p| {
        p.println("contract {");
        p.indented(|p| p.println("callsInPlace(init, kotlin.contracts.InvocationKind.EXACTLY_ONCE)"));
        p.println("}");
        p.println(&format!("return {}().apply(init).build()", builder_name));
    });
    p.println("}");

    Ok(GeneratedFile::new(&package, &builder_name, p.into_string()))
}

fn builder_field_line(ctx: &TreeContext, rf: &ResolvedField, override_kw: &str) -> String {
    let field = &rf.field;
    match field.kind {
        FieldKind::List { .. } => format!(
            "{}val {}: MutableList<{}> = mutableListOf()",
            override_kw,
            field.name,
            render_type(ctx, &field.ty)
        ),
        FieldKind::Single => {
            let ty = field_value_type(ctx, field);
            if let Some(default) = &field.default {
                format!("{}var {}: {} = {}", override_kw, field.name, ty, default)
            } else if field.ty.nullable {
                format!("{}var {}: {} = null", override_kw, field.name, ty)
            } else if is_builtin_primitive(&field.ty) {
                format!(
                    "{}var {}: {} by kotlin.properties.Delegates.notNull<{}>()",
                    override_kw, field.name, ty, ty
                )
            } else {
                //faults on `build()` if the consumer never set it
                format!("{}lateinit var {}: {}", override_kw, field.name, ty)
            }
        }
    }
}

pub fn generate_intermediate(
    ctx: &TreeContext,
    builder: &IntermediateBuilder,
) -> Result<GeneratedFile, GenError> {
    //fails before any text is rendered if the materialized element is absent
    let imports = imports::intermediate_builder_imports(ctx, builder)?;
    let materialized = ctx.element(
        builder
            .materialized_element
            .expect("checked by the import collector"),
    );
    let package = format!("{}.builder", builder.package);
    let builder_name = builder.type_name();

    let mut p = SourcePrinter::new();
    print_copyright(&mut p);
    p.println("@file:Suppress(\"DuplicatedCode\", \"unused\")");
    p.blank();
    p.println(&format!("package {}", package));
    p.blank();
    for import in &imports {
        p.println(&format!("import {}", import));
    }
    if !imports.is_empty() {
        p.blank();
    }
    print_generated_message(&mut p);

    p.println(&format!("@{}", BUILDER_DSL.name));
    if builder.parents.is_empty() {
        p.println(&format!("interface {} {{", builder_name));
    } else {
        let parents: Vec<String> = builder
            .parents
            .iter()
            .map(|parent| ctx.intermediate_builders()[*parent].type_name())
            .collect();
        p.println(&format!(
            "interface {} : {} {{",
            builder_name,
            parents.join(", ")
        ));
    }
    p.indented(|p| {
        for field in &builder.fields {
            match field.kind {
                FieldKind::List { .. } => p.println(&format!(
                    "val {}: MutableList<{}>",
                    field.name,
                    render_type(ctx, &field.ty)
                )),
                FieldKind::Single => p.println(&format!(
                    "var {}: {}",
                    field.name,
                    field_value_type(ctx, field)
                )),
            }
        }
        if !builder.fields.is_empty() {
            p.blank();
        }
        p.println(&format!("fun build(): {}", materialized.type_name()));
    });
    p.println("}");

    Ok(GeneratedFile::new(&package, &builder_name, p.into_string()))
}
