/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Prints the abstract declaration unit of an element.

use lumen_tree::{
    resolver::{ResolvedElement, ResolvedTree},
    ElementKey, TreeContext,
};

use crate::{
    error::GenError,
    imports,
    printer::{
        cap, field_value_type, print_copyright, print_generated_message, render_type,
        replace_declaration, transform_declaration, type_parameters_decl, type_with_params,
        GeneratedFile, SourcePrinter, PURE_ABSTRACT_ELEMENT, TRANSFORMER_TYPE, VISITOR_TYPE,
        VISITOR_VOID_TYPE,
    },
};

pub fn generate(
    ctx: &TreeContext,
    tree: &ResolvedTree,
    key: ElementKey,
) -> Result<GeneratedFile, GenError> {
    let element = ctx.element(key);
    let resolved = tree.resolved(key);

    //a failing unit must not leave partial text behind, so validate before
    //rendering anything
    if element.is_sealed && resolved.children.is_empty() {
        return Err(GenError::SealedWithoutChildren(element.name.clone()));
    }
    if key == ctx.root() && !element.kind.is_interface() {
        return Err(GenError::RootMustBeInterface);
    }
    validate_override_types(ctx, key, resolved)?;

    let mut p = SourcePrinter::new();
    print_copyright(&mut p);
    p.println(&format!("package {}", element.package));
    p.blank();
    let imports = imports::element_imports(ctx, tree, key);
    for import in &imports {
        p.println(&format!("import {}", import));
    }
    if !imports.is_empty() {
        p.blank();
    }
    print_generated_message(&mut p);
    print_element(&mut p, ctx, tree, key);

    Ok(GeneratedFile::new(
        &element.package,
        &element.type_name(),
        p.into_string(),
    ))
}

fn validate_override_types(
    ctx: &TreeContext,
    key: ElementKey,
    resolved: &ResolvedElement,
) -> Result<(), GenError> {
    for rf in &resolved.fields {
        if rf.field.overridden_types.is_empty() {
            continue;
        }
        if !rf.field.with_replace {
            return Err(GenError::OverrideTypesWithoutReplace {
                element: ctx.element(key).name.clone(),
                field: rf.field.name.clone(),
            });
        }
        for (index, overridden) in rf.field.overridden_types.iter().enumerate() {
            if rf.field.overridden_types[..index].contains(overridden) {
                return Err(GenError::DuplicateOverrideType {
                    element: ctx.element(key).name.clone(),
                    field: rf.field.name.clone(),
                });
            }
        }
    }
    Ok(())
}

fn print_element(p: &mut SourcePrinter, ctx: &TreeContext, tree: &ResolvedTree, key: ElementKey) {
    let element = ctx.element(key);
    let resolved = tree.resolved(key);
    let is_interface = element.kind.is_interface();
    let is_root = key == ctx.root();

    p.print(&format!("{} {}", element.kind.title(), element.type_name()));
    p.print(&type_parameters_decl(ctx, element));

    let mut supertypes: Vec<String> = element
        .parent_refs
        .iter()
        .map(|parent_ref| {
            let parent = ctx.element(parent_ref.element);
            let mut rendered = parent.type_name();
            if !parent_ref.args.is_empty() {
                let args: Vec<String> = parent_ref
                    .args
                    .iter()
                    .map(|arg| render_type(ctx, arg))
                    .collect();
                rendered.push('<');
                rendered.push_str(&args.join(", "));
                rendered.push('>');
            }
            rendered.push_str(parent.kind.braces());
            rendered
        })
        .collect();
    supertypes.extend(
        element
            .additional_supertypes
            .iter()
            .map(|extra| extra.name.clone()),
    );

    if resolved.need_pure_abstract_element || !supertypes.is_empty() {
        p.print(" : ");
        if resolved.need_pure_abstract_element {
            p.print(&format!("{}()", PURE_ABSTRACT_ELEMENT.name));
            if !supertypes.is_empty() {
                p.print(", ");
            }
        }
        p.print(&supertypes.join(", "));
    }
    p.println(" {");

    p.indented(|p| {
        for rf in &resolved.fields {
            if (rf.field.is_final && rf.from_parent) || rf.field.is_parameter {
                continue;
            }
            let mut line = String::new();
            if !is_interface && !rf.field.is_final {
                line.push_str("abstract ");
            }
            if rf.overrides {
                line.push_str("override ");
            }
            line.push_str(if rf.field.is_val() { "val " } else { "var " });
            line.push_str(&rf.field.name);
            line.push_str(": ");
            line.push_str(&field_value_type(ctx, &rf.field));
            if rf.field.is_final {
                if let Some(default) = &rf.field.default {
                    line.push_str(" = ");
                    line.push_str(default);
                }
            }
            p.println(&line);
        }
        if !resolved.fields.is_empty() {
            p.blank();
        }

        //double dispatch: always against the element's own selector, never a
        //parent's
        if !is_root {
            p.print("override ");
        }
        p.println(&format!(
            "fun <R, D> accept(visitor: {}<R, D>, data: D): R =",
            VISITOR_TYPE
        ));
        p.indented(|p| p.println(&format!("visitor.visit{}(this, data)", element.name)));

        p.blank();
        p.println("@Suppress(\"UNCHECKED_CAST\")");
        if !is_root {
            p.print("override ");
        }
        p.println(&format!(
            "fun <E : LumenElement, D> transform(transformer: {}<D>, data: D): E =",
            TRANSFORMER_TYPE
        ));
        p.indented(|p| p.println(&format!("transformer.transform{}(this, data) as E", element.name)));

        //parameter-only fields never get mutators
        for rf in resolved
            .fields
            .iter()
            .filter(|rf| rf.field.with_replace && !rf.field.is_parameter)
        {
            print_replace_declaration(
                p,
                ctx,
                is_interface,
                rf,
                None,
                rf.field.use_nullable_for_replace,
                rf.needs_override,
            );
            for overridden in &rf.field.overridden_types {
                print_replace_declaration(p, ctx, is_interface, rf, Some(overridden), false, true);
            }
        }

        for rf in resolved
            .fields
            .iter()
            .filter(|rf| rf.field.needs_separate_transform)
        {
            p.blank();
            let mut line = String::new();
            if !is_interface {
                line.push_str("abstract ");
            }
            //modifier only when an ancestor also declares the hook
            if rf.parent_has_separate_transform {
                line.push_str("override ");
            }
            line.push_str(&transform_declaration(
                &cap(&rf.field.name),
                &type_with_params(element),
            ));
            p.println(&line);
        }

        if element.need_transform_other_children {
            p.blank();
            let mut line = String::new();
            if !is_interface {
                line.push_str("abstract ");
            }
            if resolved.parent_needs_transform_other_children {
                line.push_str("override ");
            }
            line.push_str(&transform_declaration(
                "OtherChildren",
                &type_with_params(element),
            ));
            p.println(&line);
        }

        if is_root {
            p.blank();
            p.println(&format!(
                "fun accept(visitor: {}) = accept(visitor, null)",
                VISITOR_VOID_TYPE
            ));
            p.blank();
            p.println(&format!(
                "fun <R, D> acceptChildren(visitor: {}<R, D>, data: D)",
                VISITOR_TYPE
            ));
            p.blank();
            p.println(&format!(
                "fun acceptChildren(visitor: {}) = acceptChildren(visitor, null)",
                VISITOR_VOID_TYPE
            ));
            p.blank();
            p.println(&format!(
                "fun <D> transformChildren(transformer: {}<D>, data: D): LumenElement",
                TRANSFORMER_TYPE
            ));
        }
    });
    p.println("}");
}

fn print_replace_declaration(
    p: &mut SourcePrinter,
    ctx: &TreeContext,
    is_interface: bool,
    rf: &lumen_tree::resolver::ResolvedField,
    overridden: Option<&lumen_tree::TypeRef>,
    force_nullable: bool,
    override_modifier: bool,
) {
    p.blank();
    if rf.field.name == "source" {
        p.println(&format!("@{}", crate::printer::IMPLEMENTATION_DETAIL.name));
    }
    let mut line = String::new();
    if !is_interface {
        line.push_str("abstract ");
    }
    if override_modifier {
        line.push_str("override ");
    }
    line.push_str(&replace_declaration(ctx, &rf.field, overridden, force_nullable));
    p.println(&line);
}
