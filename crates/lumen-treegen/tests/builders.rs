use lumen_tree::{resolver::resolve, types, ElementKind, Field, TreeContext, TypeRef};
use lumen_treegen::{
    generate_all,
    printer::{builder, element, implementation},
    schema, GenError,
};

#[test]
fn missing_materialized_element_aborts_the_run() {
    let mut ctx = TreeContext::new();
    let _container = ctx
        .define_element("Container", ElementKind::Interface, &[])
        .unwrap();
    //configured, but the materialized element registration never happens
    ctx.intermediate_builder("ContainerBuilder");
    ctx.apply_configurations().unwrap();

    assert!(matches!(
        generate_all(&ctx),
        Err(GenError::MissingMaterializedElement(_))
    ));
}

#[test]
fn required_builtins_use_the_not_null_delegate() {
    let mut ctx = TreeContext::new();
    let counter = ctx
        .define_element("Counter", ElementKind::Class, &[])
        .unwrap();
    ctx.add_field(counter, Field::single("count", TypeRef::class(&types::INT)))
        .unwrap();
    let implementation = ctx.implementation(counter);
    let leaf = ctx.leaf_builder(implementation);
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = builder::generate_leaf(&ctx, &tree, &ctx.leaf_builders()[leaf])
        .unwrap()
        .text;
    assert!(text.contains("var count: Int by kotlin.properties.Delegates.notNull<Int>()"));
    assert!(!text.contains("lateinit var count"));
}

#[test]
fn leaf_builder_enforces_required_fields_and_offers_the_build_function() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();
    let text = files
        .iter()
        .find(|f| f.path.ends_with("LumenFunctionCallBuilder.kt"))
        .unwrap()
        .text
        .clone();

    //required reference fields fault on first unset use
    assert!(text.contains("lateinit var calleeReference: LumenNamedReference"));
    assert!(text.contains("lateinit var argumentList: LumenArgumentList"));
    assert!(text.contains("lateinit var typeRef: LumenTypeRef"));
    //nullable fields just default to null
    assert!(text.contains("var source: SourceElement? = null"));
    //list fields come up empty, the shared-empty promotion happens in build()
    assert!(text.contains("override val annotations: MutableList<LumenAnnotation> = mutableListOf()"));
    assert!(text.contains("val typeArguments: MutableList<LumenTypeProjection> = mutableListOf()"));
    assert!(text.contains("annotations.toMutableOrEmpty(),"));
    assert!(text.contains("typeArguments.toMutableOrEmpty(),"));

    //refines the shared expression shape
    assert!(text.contains("class LumenFunctionCallBuilder : LumenExpressionBuilder {"));
    assert!(text.contains("override fun build(): LumenFunctionCall {"));
    assert!(text.contains("return LumenFunctionCallImpl("));

    //the inline build function with its contract
    assert!(text.contains("@OptIn(ExperimentalContracts::class)"));
    assert!(text.contains(
        "inline fun buildFunctionCall(init: LumenFunctionCallBuilder.() -> Unit): LumenFunctionCall {"
    ));
    assert!(text.contains("callsInPlace(init, kotlin.contracts.InvocationKind.EXACTLY_ONCE)"));
}

#[test]
fn intermediate_builder_declares_the_shape_and_the_contract() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    let container = files
        .iter()
        .find(|f| f.path.ends_with("LumenAnnotationContainerBuilder.kt"))
        .unwrap()
        .text
        .clone();
    assert!(container.contains("@LumenBuilderDsl"));
    assert!(container.contains("interface LumenAnnotationContainerBuilder {"));
    assert!(container.contains("val annotations: MutableList<LumenAnnotation>"));
    assert!(container.contains("fun build(): LumenAnnotationContainer"));

    let expression = files
        .iter()
        .find(|f| f.path.ends_with("LumenExpressionBuilder.kt"))
        .unwrap()
        .text
        .clone();
    assert!(expression
        .contains("interface LumenExpressionBuilder : LumenAnnotationContainerBuilder {"));
    assert!(expression.contains("fun build(): LumenExpression"));
}

#[test]
fn parameter_only_fields_stay_out_of_properties_and_mutators() {
    let mut ctx = TreeContext::new();
    let node = ctx
        .define_element("Stub", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_field(
        node,
        Field::single("origin", TypeRef::class(&types::STRING))
            .parameter()
            .with_replace(),
    )
    .unwrap();
    let node_impl = ctx.implementation(node);
    let leaf = ctx.leaf_builder(node_impl);
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    //never declared on the element, never replaceable
    let element_text = element::generate(&ctx, &tree, node).unwrap().text;
    assert!(!element_text.contains("origin"));
    assert!(!element_text.contains("replaceOrigin"));

    //a bare constructor parameter on the implementation
    let impl_text = implementation::generate(&ctx, &tree, &ctx.implementations()[node_impl])
        .unwrap()
        .text;
    assert!(impl_text.contains("origin: String,"));
    assert!(!impl_text.contains("override val origin"));
    assert!(!impl_text.contains("replaceOrigin"));

    //the builder still has to feed the constructor
    let builder_text = builder::generate_leaf(&ctx, &tree, &ctx.leaf_builders()[leaf])
        .unwrap()
        .text;
    assert!(builder_text.contains("lateinit var origin: String"));
}

#[test]
fn defaulted_fields_survive_into_the_builder_with_their_default() {
    let mut ctx = TreeContext::new();
    let node = ctx.define_element("Loop", ElementKind::Class, &[]).unwrap();
    ctx.add_field(
        node,
        Field::single("label", TypeRef::class(&types::STRING).nullable()),
    )
    .unwrap();
    ctx.add_field(
        node,
        Field::single("unrolled", TypeRef::class(&types::BOOLEAN)).with_default("false"),
    )
    .unwrap();
    let implementation = ctx.implementation(node);
    let leaf = ctx.leaf_builder(implementation);
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = builder::generate_leaf(&ctx, &tree, &ctx.leaf_builders()[leaf])
        .unwrap()
        .text;
    assert!(text.contains("var label: String? = null"));
    assert!(text.contains("var unrolled: Boolean = false"));
}
