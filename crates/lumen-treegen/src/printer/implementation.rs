/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Prints the concrete implementation unit of an element.

use lumen_tree::{
    builder::Implementation,
    resolver::{ResolvedField, ResolvedTree},
    TreeContext,
};

use crate::{
    error::GenError,
    imports,
    printer::{
        cap, field_value_type, impl_is_var, mutable_value_type, print_copyright,
        print_generated_message, replace_declaration, GeneratedFile, SourcePrinter,
        TRANSFORMER_TYPE, VISITOR_TYPE,
    },
};

///A field the element declared with a concrete initializer never reappears
/// in the implementation.
fn skipped(rf: &ResolvedField) -> bool {
    rf.field.is_final && rf.field.default.is_some()
}

pub fn generate(
    ctx: &TreeContext,
    tree: &ResolvedTree,
    implementation: &Implementation,
) -> Result<GeneratedFile, GenError> {
    let element = ctx.element(implementation.element);
    let resolved = tree.resolved(implementation.element);
    let type_name = element.type_name();
    let impl_name = format!("{}Impl", type_name);
    let package = format!("{}.impl", element.package);

    let mut p = SourcePrinter::new();
    print_copyright(&mut p);
    p.println("@file:Suppress(\"DuplicatedCode\", \"unused\")");
    p.blank();
    p.println(&format!("package {}", package));
    p.blank();
    let imports = imports::implementation_imports(ctx, tree, implementation);
    for import in &imports {
        p.println(&format!("import {}", import));
    }
    if !imports.is_empty() {
        p.blank();
    }
    print_generated_message(&mut p);

    p.println(&format!("internal class {}(", impl_name));
    p.indented(|p| {
        for rf in &resolved.fields {
            if skipped(rf) {
                continue;
            }
            if rf.field.is_parameter {
                //constructor-only, never a property
                p.println(&format!(
                    "{}: {},",
                    rf.field.name,
                    field_value_type(ctx, &rf.field)
                ));
                continue;
            }
            let keyword = if impl_is_var(&rf.field) { "var" } else { "val" };
            p.println(&format!(
                "override {} {}: {},",
                keyword,
                rf.field.name,
                mutable_value_type(ctx, &rf.field)
            ));
        }
    });
    p.println(&format!(") : {}() {{", type_name));

    //the abstract transform-other-children contract may come from an
    //ancestor, the concrete node has to satisfy it either way
    let needs_other_children = element.need_transform_other_children
        || resolved
            .ancestors
            .iter()
            .any(|ancestor| ctx.element(*ancestor).need_transform_other_children);

    p.indented(|p| {
        print_accept_children(p, ctx, resolved.fields.as_slice());
        p.blank();
        print_transform_children(p, ctx, needs_other_children, resolved, &impl_name);

        for rf in resolved
            .fields
            .iter()
            .filter(|rf| rf.field.needs_separate_transform && !skipped(rf))
        {
            p.blank();
            p.println(&format!(
                "override fun <D> transform{}(transformer: {}<D>, data: D): {} {{",
                cap(&rf.field.name),
                TRANSFORMER_TYPE,
                impl_name
            ));
            p.indented(|p| {
                print_inline_transform(p, rf);
                p.println("return this");
            });
            p.println("}");
        }

        if needs_other_children {
            p.blank();
            p.println(&format!(
                "override fun <D> transformOtherChildren(transformer: {}<D>, data: D): {} {{",
                TRANSFORMER_TYPE, impl_name
            ));
            p.indented(|p| {
                for rf in resolved
                    .fields
                    .iter()
                    .filter(|rf| rf.field.in_other_children && !skipped(rf))
                {
                    if rf.field.needs_separate_transform {
                        p.println(&format!("transform{}(transformer, data)", cap(&rf.field.name)));
                    } else if rf.field.holds_element() {
                        print_inline_transform(p, rf);
                    }
                }
                p.println("return this");
            });
            p.println("}");
        }

        for rf in resolved
            .fields
            .iter()
            .filter(|rf| rf.field.with_replace && !rf.field.is_parameter && !skipped(rf))
        {
            let cap_name = cap(&rf.field.name);
            p.blank();
            p.println(&format!(
                "override {} {{",
                replace_declaration(ctx, &rf.field, None, rf.field.use_nullable_for_replace)
            ));
            p.indented(|p| {
                if rf.field.is_mutable_or_empty() {
                    p.println(&format!(
                        "{} = new{}.toMutableOrEmpty()",
                        rf.field.name, cap_name
                    ));
                } else if rf.field.is_list() {
                    p.println(&format!("{}.clear()", rf.field.name));
                    p.println(&format!("{}.addAll(new{})", rf.field.name, cap_name));
                } else if rf.field.use_nullable_for_replace && !rf.field.ty.nullable {
                    p.println(&format!("{} = new{}!!", rf.field.name, cap_name));
                } else {
                    p.println(&format!("{} = new{}", rf.field.name, cap_name));
                }
            });
            p.println("}");

            for overridden in &rf.field.overridden_types {
                p.blank();
                p.println(&format!(
                    "override {} {{",
                    replace_declaration(ctx, &rf.field, Some(overridden), false)
                ));
                p.indented(|p| {
                    p.println(&format!(
                        "require(new{} is {})",
                        cap_name,
                        field_value_type(ctx, &rf.field)
                    ));
                    p.println(&format!("{} = new{}", rf.field.name, cap_name));
                });
                p.println("}");
            }
        }
    });
    p.println("}");

    Ok(GeneratedFile::new(&package, &impl_name, p.into_string()))
}

fn print_accept_children(p: &mut SourcePrinter, _ctx: &TreeContext, fields: &[ResolvedField]) {
    p.println(&format!(
        "override fun <R, D> acceptChildren(visitor: {}<R, D>, data: D) {{",
        VISITOR_TYPE
    ));
    p.indented(|p| {
        //every own child-holding field, in declaration order
        for rf in fields {
            if !rf.field.holds_element() || rf.field.is_parameter || skipped(rf) {
                continue;
            }
            if rf.field.is_list() {
                p.println(&format!(
                    "{}.forEach {{ it.accept(visitor, data) }}",
                    rf.field.name
                ));
            } else if rf.field.ty.nullable {
                p.println(&format!("{}?.accept(visitor, data)", rf.field.name));
            } else {
                p.println(&format!("{}.accept(visitor, data)", rf.field.name));
            }
        }
    });
    p.println("}");
}

fn print_transform_children(
    p: &mut SourcePrinter,
    _ctx: &TreeContext,
    need_transform_other_children: bool,
    resolved: &lumen_tree::resolver::ResolvedElement,
    impl_name: &str,
) {
    p.println(&format!(
        "override fun <D> transformChildren(transformer: {}<D>, data: D): {} {{",
        TRANSFORMER_TYPE, impl_name
    ));
    p.indented(|p| {
        for rf in &resolved.fields {
            if !rf.field.holds_element()
                || rf.field.is_parameter
                || rf.field.in_other_children
                || skipped(rf)
            {
                continue;
            }
            if rf.field.needs_separate_transform {
                p.println(&format!("transform{}(transformer, data)", cap(&rf.field.name)));
            } else if rf.field.is_list() || impl_is_var(&rf.field) {
                print_inline_transform(p, rf);
            }
            //an immutable single child can not be swapped here
        }
        if need_transform_other_children {
            p.println("transformOtherChildren(transformer, data)");
        }
        p.println("return this");
    });
    p.println("}");
}

fn print_inline_transform(p: &mut SourcePrinter, rf: &ResolvedField) {
    if rf.field.is_list() {
        p.println(&format!(
            "{}.transformInplace(transformer, data)",
            rf.field.name
        ));
    } else if rf.field.ty.nullable {
        p.println(&format!(
            "{} = {}?.transform(transformer, data)",
            rf.field.name, rf.field.name
        ));
    } else {
        p.println(&format!(
            "{} = {}.transform(transformer, data)",
            rf.field.name, rf.field.name
        ));
    }
}
