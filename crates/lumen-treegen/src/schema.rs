/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2025 The Lumen project
 */
//! The Lumen compiler tree schema.
//!
//! This is the one place the node hierarchy is described. Everything else in
//! the workspace is schema agnostic.

use lumen_tree::{ClassRef, ElementKind, Field, SchemaError, TreeContext, TypeRef};

fn source_element() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.source", "SourceElement")
}

fn name_type() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.names", "Name")
}

fn declaration_symbol() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.symbols", "DeclarationSymbol")
}

fn variance() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.types", "Variance")
}

fn annotation_use_site_target() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.annotations", "AnnotationUseSiteTarget")
}

///Lives in the same package as the expression elements, so only the impl
/// and builder units ever import it.
fn function_call_origin() -> ClassRef {
    ClassRef::class("org.lumenlang.compiler.tree.expressions", "FunctionCallOrigin")
}

///Builds and finalizes the complete Lumen tree schema.
pub fn lumen_tree() -> Result<TreeContext, SchemaError> {
    let mut ctx = TreeContext::new();
    let root = ctx.root();
    ctx.add_field(
        root,
        Field::single("source", TypeRef::class(&source_element()).nullable()),
    )?;

    let annotation_container =
        ctx.define_element("AnnotationContainer", ElementKind::Interface, &[])?;
    ctx.set_transform_other_children(annotation_container);
    //Annotation is registered further down, attach the field once every
    //element exists
    ctx.configure(annotation_container, |ctx, key| {
        let annotation = ctx.element_type("Annotation")?;
        ctx.add_field(
            key,
            Field::mutable_or_empty_list("annotations", annotation)
                .with_replace()
                .separate_transform()
                .other_children(),
        )
    });

    let type_ref = ctx.define_element_in(
        "TypeRef",
        "types",
        ElementKind::AbstractClass,
        &[annotation_container],
    )?;

    let type_projection =
        ctx.define_sealed_element_in("TypeProjection", "types", ElementKind::SealedClass, &[])?;
    let star_projection = ctx.define_element_in(
        "StarProjection",
        "types",
        ElementKind::AbstractClass,
        &[type_projection],
    )?;
    let projection_with_variance = ctx.define_element_in(
        "TypeProjectionWithVariance",
        "types",
        ElementKind::AbstractClass,
        &[type_projection],
    )?;
    ctx.add_field(
        projection_with_variance,
        Field::single("typeRef", TypeRef::element(type_ref)),
    )?;
    ctx.add_field(
        projection_with_variance,
        Field::single("variance", TypeRef::class(&variance())),
    )?;

    let statement = ctx.define_element_in(
        "Statement",
        "expressions",
        ElementKind::Interface,
        &[annotation_container],
    )?;
    ctx.set_transform_other_children(statement);

    let expression = ctx.define_element_in(
        "Expression",
        "expressions",
        ElementKind::AbstractClass,
        &[statement],
    )?;
    ctx.set_transform_other_children(expression);
    ctx.add_field(
        expression,
        Field::single("typeRef", TypeRef::element(type_ref)).with_replace(),
    )?;

    let annotation = ctx.define_element_in(
        "Annotation",
        "expressions",
        ElementKind::AbstractClass,
        &[expression],
    )?;
    ctx.add_field(
        annotation,
        Field::single("annotationTypeRef", TypeRef::element(type_ref)).with_replace(),
    )?;
    ctx.add_field(
        annotation,
        Field::single(
            "useSiteTarget",
            TypeRef::class(&annotation_use_site_target()).nullable(),
        ),
    )?;

    let reference =
        ctx.define_element_in("Reference", "references", ElementKind::AbstractClass, &[])?;
    let named_reference = ctx.define_element_in(
        "NamedReference",
        "references",
        ElementKind::AbstractClass,
        &[reference],
    )?;
    ctx.add_field(
        named_reference,
        Field::single("name", TypeRef::class(&name_type())),
    )?;
    let resolved_named_reference = ctx.define_element_in(
        "ResolvedNamedReference",
        "references",
        ElementKind::AbstractClass,
        &[named_reference],
    )?;
    ctx.add_field(
        resolved_named_reference,
        Field::single("resolvedSymbol", TypeRef::class(&declaration_symbol())),
    )?;

    let argument_list =
        ctx.define_element_in("ArgumentList", "expressions", ElementKind::AbstractClass, &[])?;
    ctx.add_field(
        argument_list,
        Field::list("arguments", TypeRef::element(expression))
            .with_replace()
            .separate_transform(),
    )?;

    let qualified_access = ctx.define_element_in(
        "QualifiedAccessExpression",
        "expressions",
        ElementKind::AbstractClass,
        &[expression],
    )?;
    ctx.set_transform_other_children(qualified_access);
    //re-declares the root's `source` to make it replaceable. This is the one
    //place the replace contract is emitted without an override modifier.
    ctx.add_field(
        qualified_access,
        Field::single("source", TypeRef::class(&source_element()).nullable()).with_replace(),
    )?;
    ctx.add_field(
        qualified_access,
        Field::single("calleeReference", TypeRef::element(reference))
            .with_replace()
            .separate_transform(),
    )?;
    ctx.add_field(
        qualified_access,
        Field::mutable_or_empty_list("typeArguments", TypeRef::element(type_projection))
            .with_replace()
            .separate_transform(),
    )?;

    let function_call = ctx.define_element_in(
        "FunctionCall",
        "expressions",
        ElementKind::AbstractClass,
        &[qualified_access],
    )?;
    ctx.set_transform_other_children(function_call);
    //narrows the callee and keeps a replace overload against the wide type
    ctx.add_field(
        function_call,
        Field::single("calleeReference", TypeRef::element(named_reference))
            .with_replace()
            .separate_transform()
            .overridden_type(TypeRef::element(reference)),
    )?;
    ctx.add_field(
        function_call,
        Field::single("argumentList", TypeRef::element(argument_list)).with_replace(),
    )?;
    ctx.add_field(
        function_call,
        Field::single("origin", TypeRef::class(&function_call_origin()))
            .final_field()
            .with_default("FunctionCallOrigin.Regular"),
    )?;

    let block = ctx.define_element_in("Block", "expressions", ElementKind::AbstractClass, &[expression])?;
    ctx.add_field(
        block,
        Field::list("statements", TypeRef::element(statement)).separate_transform(),
    )?;

    let declaration = ctx.define_element_in(
        "Declaration",
        "declarations",
        ElementKind::AbstractClass,
        &[annotation_container],
    )?;
    ctx.add_field(
        declaration,
        Field::single("symbol", TypeRef::class(&declaration_symbol())),
    )?;

    let value_parameter = ctx.define_element_in(
        "ValueParameter",
        "declarations",
        ElementKind::AbstractClass,
        &[declaration],
    )?;
    ctx.add_field(
        value_parameter,
        Field::single("name", TypeRef::class(&name_type())),
    )?;
    ctx.add_field(
        value_parameter,
        Field::single("defaultValue", TypeRef::element(expression).nullable()).with_replace(),
    )?;

    let function = ctx.define_element_in(
        "Function",
        "declarations",
        ElementKind::AbstractClass,
        &[declaration],
    )?;
    ctx.add_field(
        function,
        Field::list("valueParameters", TypeRef::element(value_parameter)).separate_transform(),
    )?;
    ctx.add_field(
        function,
        Field::single("returnTypeRef", TypeRef::element(type_ref)).with_replace(),
    )?;
    ctx.add_field(
        function,
        Field::single("body", TypeRef::element(block).nullable()).with_replace(),
    )?;

    //implementations
    let annotation_impl = ctx.implementation(annotation);
    let _star_projection_impl = ctx.implementation(star_projection);
    let projection_with_variance_impl = ctx.implementation(projection_with_variance);
    let resolved_named_reference_impl = ctx.implementation(resolved_named_reference);
    let _argument_list_impl = ctx.implementation(argument_list);
    let qualified_access_impl = ctx.implementation(qualified_access);
    let function_call_impl = ctx.implementation(function_call);
    let block_impl = ctx.implementation(block);
    let value_parameter_impl = ctx.implementation(value_parameter);
    let function_impl = ctx.implementation(function);

    //shared builder shapes
    let annotation_container_builder = ctx.intermediate_builder("AnnotationContainerBuilder");
    let annotation_ty = ctx.element_type("Annotation")?;
    ctx.builder_field(
        annotation_container_builder,
        Field::list("annotations", annotation_ty),
    )?;
    ctx.set_materialized_element(annotation_container_builder, annotation_container);

    let expression_builder = ctx.intermediate_builder("ExpressionBuilder");
    ctx.builder_parent(expression_builder, annotation_container_builder);
    ctx.set_materialized_element(expression_builder, expression);

    //leaf builders. The object-like nodes (star projection, argument list)
    //are built by hand in the compiler and get none.
    let b = ctx.leaf_builder(annotation_impl);
    ctx.leaf_builder_parent(b, expression_builder);
    ctx.leaf_builder(projection_with_variance_impl);
    ctx.leaf_builder(resolved_named_reference_impl);
    let b = ctx.leaf_builder(qualified_access_impl);
    ctx.leaf_builder_parent(b, expression_builder);
    let b = ctx.leaf_builder(function_call_impl);
    ctx.leaf_builder_parent(b, expression_builder);
    let b = ctx.leaf_builder(block_impl);
    ctx.leaf_builder_parent(b, expression_builder);
    ctx.leaf_builder(value_parameter_impl);
    ctx.leaf_builder(function_impl);

    ctx.apply_configurations()?;
    Ok(ctx)
}
