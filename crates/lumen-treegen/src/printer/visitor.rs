/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! Prints the visitor/transformer protocol units.
//!
//! One selector per element. Every non-root selector defaults to the root
//! selector, so a concrete visitor only overrides what it cares about.

use lumen_tree::{ElementKey, TreeContext};

use crate::printer::{
    print_copyright, print_generated_message, type_with_star_params, GeneratedFile, SourcePrinter,
    TRANSFORMER_TYPE, VISITOR_PACKAGE, VISITOR_TYPE, VISITOR_VOID_TYPE,
};

///Elements in registration order, without the root.
fn non_root_elements(ctx: &TreeContext) -> impl Iterator<Item = ElementKey> + '_ {
    ctx.elements().filter(|key| *key != ctx.root())
}

fn print_unit_head(p: &mut SourcePrinter, ctx: &TreeContext) {
    print_copyright(p);
    p.println(&format!("package {}", VISITOR_PACKAGE));
    p.blank();
    let mut imports: Vec<String> = ctx
        .elements()
        .map(|key| ctx.element(key).full_qualified_name())
        .collect();
    imports.sort();
    for import in &imports {
        p.println(&format!("import {}", import));
    }
    p.blank();
    print_generated_message(p);
}

pub fn generate_visitor(ctx: &TreeContext) -> GeneratedFile {
    let mut p = SourcePrinter::new();
    print_unit_head(&mut p, ctx);

    p.println(&format!("abstract class {}<out R, in D> {{", VISITOR_TYPE));
    p.indented(|p| {
        p.println("abstract fun visitElement(element: LumenElement, data: D): R");
        for key in non_root_elements(ctx) {
            let element = ctx.element(key);
            let param = element.safe_decapitalized_name();
            p.blank();
            p.println(&format!(
                "open fun visit{}({}: {}, data: D): R = visitElement({}, data)",
                element.name,
                param,
                type_with_star_params(element),
                param
            ));
        }
    });
    p.println("}");

    GeneratedFile::new(VISITOR_PACKAGE, VISITOR_TYPE, p.into_string())
}

pub fn generate_visitor_void(ctx: &TreeContext) -> GeneratedFile {
    let mut p = SourcePrinter::new();
    print_unit_head(&mut p, ctx);

    p.println(&format!(
        "abstract class {} : {}<Unit, Nothing?>() {{",
        VISITOR_VOID_TYPE, VISITOR_TYPE
    ));
    p.indented(|p| {
        p.println("abstract fun visitElement(element: LumenElement)");
        for key in non_root_elements(ctx) {
            let element = ctx.element(key);
            let param = element.safe_decapitalized_name();
            p.blank();
            p.println(&format!(
                "open fun visit{}({}: {}) = visitElement({})",
                element.name,
                param,
                type_with_star_params(element),
                param
            ));
        }
        p.blank();
        p.println("final override fun visitElement(element: LumenElement, data: Nothing?) =");
        p.indented(|p| p.println("visitElement(element)"));
        for key in non_root_elements(ctx) {
            let element = ctx.element(key);
            let param = element.safe_decapitalized_name();
            p.blank();
            p.println(&format!(
                "final override fun visit{}({}: {}, data: Nothing?) =",
                element.name,
                param,
                type_with_star_params(element)
            ));
            p.indented(|p| p.println(&format!("visit{}({})", element.name, param)));
        }
    });
    p.println("}");

    GeneratedFile::new(VISITOR_PACKAGE, VISITOR_VOID_TYPE, p.into_string())
}

pub fn generate_transformer(ctx: &TreeContext) -> GeneratedFile {
    let mut p = SourcePrinter::new();
    print_unit_head(&mut p, ctx);

    p.println(&format!(
        "abstract class {}<in D> : {}<LumenElement, D>() {{",
        TRANSFORMER_TYPE, VISITOR_TYPE
    ));
    p.indented(|p| {
        p.println("abstract fun <E : LumenElement> transformElement(element: E, data: D): E");
        for key in non_root_elements(ctx) {
            let element = ctx.element(key);
            let param = element.safe_decapitalized_name();
            p.blank();
            p.println(&format!(
                "open fun transform{}({}: {}, data: D): {} =",
                element.name,
                param,
                type_with_star_params(element),
                type_with_star_params(element)
            ));
            p.indented(|p| p.println(&format!("transformElement({}, data)", param)));
        }
        p.blank();
        p.println("final override fun visitElement(element: LumenElement, data: D): LumenElement =");
        p.indented(|p| p.println("transformElement(element, data)"));
        for key in non_root_elements(ctx) {
            let element = ctx.element(key);
            let param = element.safe_decapitalized_name();
            p.blank();
            p.println(&format!(
                "final override fun visit{}({}: {}, data: D): LumenElement =",
                element.name,
                param,
                type_with_star_params(element)
            ));
            p.indented(|p| p.println(&format!("transform{}({}, data)", element.name, param)));
        }
    });
    p.println("}");

    GeneratedFile::new(VISITOR_PACKAGE, TRANSFORMER_TYPE, p.into_string())
}
