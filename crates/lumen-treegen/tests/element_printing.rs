use lumen_tree::{
    element::{ParentRef, TypeParam},
    resolver::resolve,
    types, ClassRef, ElementKind, Field, TreeContext, TypeRef,
};
use lumen_treegen::{generate_all, printer::element, GenError};

#[test]
fn plain_field_gets_no_replace_and_no_override() {
    let mut ctx = TreeContext::new();
    let leaf = ctx
        .define_element("Leaf", ElementKind::Class, &[])
        .unwrap();
    ctx.add_field(leaf, Field::single("value", TypeRef::class(&types::INT)))
        .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, leaf).unwrap().text;
    assert!(text.contains("abstract val value: Int"));
    assert!(!text.contains("override val value"));
    assert!(!text.contains("replaceValue"));
}

#[test]
fn replaceable_field_gets_exactly_one_mutator_without_override() {
    let mut ctx = TreeContext::new();
    let leaf = ctx
        .define_element("MutableLeaf", ElementKind::Class, &[])
        .unwrap();
    ctx.add_field(
        leaf,
        Field::single("value", TypeRef::class(&types::INT)).with_replace(),
    )
    .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, leaf).unwrap().text;
    assert_eq!(text.matches("fun replaceValue(newValue: Int)").count(), 1);
    assert!(text.contains("abstract fun replaceValue(newValue: Int)"));
    assert!(!text.contains("override fun replaceValue"));
}

#[test]
fn sealed_children_do_not_duplicate_the_sealed_fields() {
    let mut ctx = TreeContext::new();
    let sealed = ctx
        .define_sealed_element("SealedLeaf", ElementKind::SealedClass, &[])
        .unwrap();
    ctx.add_field(
        sealed,
        Field::single("shared", TypeRef::class(&types::STRING)),
    )
    .unwrap();
    let a = ctx
        .define_element("LeftLeaf", ElementKind::Class, &[sealed])
        .unwrap();
    ctx.add_field(a, Field::single("left", TypeRef::class(&types::INT)))
        .unwrap();
    let b = ctx
        .define_element("RightLeaf", ElementKind::Class, &[sealed])
        .unwrap();
    ctx.add_field(b, Field::single("right", TypeRef::class(&types::INT)))
        .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let sealed_text = element::generate(&ctx, &tree, sealed).unwrap().text;
    assert!(sealed_text.contains("sealed class LumenSealedLeaf"));
    assert!(sealed_text.contains("abstract val shared: String"));

    let a_text = element::generate(&ctx, &tree, a).unwrap().text;
    assert!(a_text.contains("abstract val left: Int"));
    assert!(!a_text.contains("shared"));
    //the sealed parent is a class, no pure abstract base on top
    assert!(a_text.contains(" : LumenSealedLeaf()"));
    assert!(!a_text.contains("LumenPureAbstractElement"));

    let b_text = element::generate(&ctx, &tree, b).unwrap().text;
    assert!(!b_text.contains("left"));
    assert!(b_text.contains("abstract val right: Int"));
}

#[test]
fn sealed_element_without_children_fails() {
    let mut ctx = TreeContext::new();
    let sealed = ctx
        .define_sealed_element("Childless", ElementKind::SealedClass, &[])
        .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    assert!(matches!(
        element::generate(&ctx, &tree, sealed),
        Err(GenError::SealedWithoutChildren(_))
    ));
}

#[test]
fn accept_always_dispatches_on_the_own_selector() {
    let mut ctx = TreeContext::new();
    let base = ctx
        .define_element("Reference", ElementKind::AbstractClass, &[])
        .unwrap();
    //declares no fields of its own, the dispatch target must still be its
    //own selector
    let child = ctx
        .define_element("ErrorReference", ElementKind::Class, &[base])
        .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, child).unwrap().text;
    assert!(text.contains("visitor.visitErrorReference(this, data)"));
    assert!(text.contains("transformer.transformErrorReference(this, data) as E"));
    assert!(!text.contains("visitor.visitReference(this, data)"));
}

#[test]
fn pure_abstract_base_is_inserted_for_orphan_classes() {
    let mut ctx = TreeContext::new();
    let orphan = ctx
        .define_element("ArgumentList", ElementKind::Class, &[])
        .unwrap();
    let abstract_base = ctx
        .define_element("Expression", ElementKind::AbstractClass, &[])
        .unwrap();
    let grounded = ctx
        .define_element("Literal", ElementKind::Class, &[abstract_base])
        .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let orphan_text = element::generate(&ctx, &tree, orphan).unwrap().text;
    assert!(orphan_text.contains("open class LumenArgumentList : LumenPureAbstractElement(), LumenElement {"));

    let grounded_text = element::generate(&ctx, &tree, grounded).unwrap().text;
    assert!(!grounded_text.contains("LumenPureAbstractElement"));
    assert!(grounded_text.contains("open class LumenLiteral : LumenExpression() {"));
}

#[test]
fn generic_parameters_render_through_declaration_and_visitors() {
    let mut ctx = TreeContext::new();
    let typed = ctx
        .define_element("TypedOperator", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_type_param(
        typed,
        TypeParam {
            name: "T".to_owned(),
            bound: Some(TypeRef::element(ctx.root())),
        },
    );
    ctx.add_field(typed, Field::single("operand", TypeRef::param("T")))
        .unwrap();
    let leaf = ctx
        .define_element("NegateOperator", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_parent(
        leaf,
        ParentRef::with_args(typed, [TypeRef::element(ctx.root())]),
    )
    .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let typed_text = element::generate(&ctx, &tree, typed).unwrap().text;
    assert!(typed_text.contains(
        "abstract class LumenTypedOperator<T : LumenElement> : LumenPureAbstractElement(), LumenElement {"
    ));
    assert!(typed_text.contains("abstract val operand: T"));

    let leaf_text = element::generate(&ctx, &tree, leaf).unwrap().text;
    //parent instantiated with its argument, class bracket style applied
    assert!(leaf_text.contains("LumenTypedOperator<LumenElement>()"));
    //the inherited field surfaces with the argument substituted
    assert!(leaf_text.contains("abstract override val operand: LumenElement"));

    //visitor signatures erase the parameters to stars
    let files = generate_all(&ctx).unwrap();
    let visitor = files
        .iter()
        .find(|f| f.path.ends_with("LumenVisitor.kt"))
        .unwrap();
    assert!(visitor
        .text
        .contains("open fun visitTypedOperator(typedOperator: LumenTypedOperator<*>, data: D): R"));
}

#[test]
fn additional_supertype_interfaces_follow_the_parents() {
    let mut ctx = TreeContext::new();
    let resolvable = ClassRef::interface("org.lumenlang.compiler.resolve", "Resolvable");
    let node = ctx
        .define_element("LoopJump", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_supertype_interface(node, &resolvable);
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, node).unwrap().text;
    assert!(text.contains(
        "abstract class LumenLoopJump : LumenPureAbstractElement(), LumenElement, Resolvable {"
    ));
    assert!(text.contains("import org.lumenlang.compiler.resolve.Resolvable"));
}

#[test]
fn forced_nullable_replace_widens_the_parameter() {
    let mut ctx = TreeContext::new();
    let node = ctx
        .define_element("Wrapper", ElementKind::AbstractClass, &[])
        .unwrap();
    let inner = ctx
        .define_element("Inner", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_field(
        node,
        Field::single("inner", TypeRef::element(inner))
            .with_replace()
            .nullable_for_replace(),
    )
    .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, node).unwrap().text;
    assert!(text.contains("abstract val inner: LumenInner"));
    assert!(text.contains("abstract fun replaceInner(newInner: LumenInner?)"));
}

#[test]
fn root_unit_carries_the_traversal_scaffolding() {
    let ctx = lumen_treegen::schema::lumen_tree().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, ctx.root()).unwrap().text;
    assert!(text.contains("interface LumenElement {"));
    //no override on the root's own dispatch methods
    assert!(!text.contains("override fun <R, D> accept"));
    assert!(text.contains("visitor.visitElement(this, data)"));
    assert!(text.contains("fun accept(visitor: LumenVisitorVoid) = accept(visitor, null)"));
    assert!(text.contains("fun <R, D> acceptChildren(visitor: LumenVisitor<R, D>, data: D)"));
    assert!(text.contains("fun acceptChildren(visitor: LumenVisitorVoid) = acceptChildren(visitor, null)"));
    assert!(text
        .contains("fun <D> transformChildren(transformer: LumenTransformer<D>, data: D): LumenElement"));
}

#[test]
fn override_exemption_is_limited_to_the_qualified_access_type() {
    let ctx = lumen_treegen::schema::lumen_tree().unwrap();
    let tree = resolve(&ctx).unwrap();

    let access = ctx.lookup("QualifiedAccessExpression").unwrap();
    let access_text = element::generate(&ctx, &tree, access).unwrap().text;
    //the property override is real, only the mutator is exempt
    assert!(access_text.contains("abstract override val source: SourceElement?"));
    assert!(access_text.contains("@LumenImplementationDetail"));
    assert!(access_text.contains("abstract fun replaceSource(newSource: SourceElement?)"));
    assert!(!access_text.contains("override fun replaceSource"));

    let call = ctx.lookup("FunctionCall").unwrap();
    let call_text = element::generate(&ctx, &tree, call).unwrap().text;
    //one level further down the ancestor declares the mutator
    assert!(call_text.contains("abstract override fun replaceSource(newSource: SourceElement?)"));
}

#[test]
fn narrowed_field_emits_the_override_replace_overload() {
    let ctx = lumen_treegen::schema::lumen_tree().unwrap();
    let tree = resolve(&ctx).unwrap();

    let call = ctx.lookup("FunctionCall").unwrap();
    let text = element::generate(&ctx, &tree, call).unwrap().text;
    assert!(text.contains("abstract override val calleeReference: LumenNamedReference"));
    assert!(text
        .contains("abstract override fun replaceCalleeReference(newCalleeReference: LumenNamedReference)"));
    assert!(text
        .contains("abstract override fun replaceCalleeReference(newCalleeReference: LumenReference)"));
}
