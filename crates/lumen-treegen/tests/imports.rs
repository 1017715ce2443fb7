use lumen_tree::{resolver::resolve, ClassRef, ElementKind, Field, TreeContext, TypeRef};
use lumen_treegen::{generate_all, printer::element, schema};

fn import_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.starts_with("import "))
        .map(|line| line.trim_start_matches("import ").to_owned())
        .collect()
}

fn unit_text(files: &[lumen_treegen::GeneratedFile], suffix: &str) -> String {
    files
        .iter()
        .find(|file| file.path.to_string_lossy().ends_with(suffix))
        .unwrap_or_else(|| panic!("no unit matching {}", suffix))
        .text
        .clone()
}

#[test]
fn imports_are_sorted_unique_and_end_in_the_protocol_wildcard() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    for file in files
        .iter()
        .filter(|file| !file.path.starts_with("org/lumenlang/compiler/tree/visitors"))
    {
        let imports = import_lines(&file.text);
        let (wildcard, rest) = imports.split_last().unwrap();
        assert_eq!(wildcard, "org.lumenlang.compiler.tree.visitors.*");

        let mut sorted = rest.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(rest, sorted.as_slice(), "{} imports", file.path.display());
    }
}

#[test]
fn own_package_names_are_never_imported() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    let access = unit_text(&files, "expressions/LumenQualifiedAccessExpression.kt");
    for import in import_lines(&access) {
        let (package, _) = import.rsplit_once('.').unwrap();
        assert_ne!(package, "org.lumenlang.compiler.tree.expressions");
    }
    //the parent element lives in the same package and is usable bare
    assert!(!access.contains("import org.lumenlang.compiler.tree.expressions.LumenExpression"));
    //the root sits one package up and has to be imported
    assert!(access.contains("import org.lumenlang.compiler.tree.LumenElement"));
}

#[test]
fn kind_suffix_distinguishes_redundancy() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    //FunctionCallOrigin shares the element package and stays bare there
    let element = unit_text(&files, "expressions/LumenFunctionCall.kt");
    assert!(!element.contains("import org.lumenlang.compiler.tree.expressions.FunctionCallOrigin"));
    assert!(element.contains("val origin: FunctionCallOrigin = FunctionCallOrigin.Regular"));

    //the element type is same-package for its own unit but foreign from
    //inside the impl and builder packages
    let implementation = unit_text(&files, "expressions/impl/LumenFunctionCallImpl.kt");
    assert!(implementation
        .contains("import org.lumenlang.compiler.tree.expressions.LumenFunctionCall"));
    let builder = unit_text(&files, "expressions/builder/LumenFunctionCallBuilder.kt");
    assert!(builder.contains("import org.lumenlang.compiler.tree.expressions.LumenFunctionCall"));
    assert!(builder
        .contains("import org.lumenlang.compiler.tree.expressions.impl.LumenFunctionCallImpl"));
}

#[test]
fn builtin_namespace_is_never_imported() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    for file in &files {
        for import in import_lines(&file.text) {
            assert!(
                !import.starts_with("kotlin.") || import == "kotlin.contracts.*",
                "{} leaks builtin import {}",
                file.path.display(),
                import
            );
        }
    }
}

#[test]
fn mutable_or_empty_helpers_are_conditional() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    //has a mutable-or-empty list (typeArguments, annotations)
    let access_impl = unit_text(&files, "expressions/impl/LumenQualifiedAccessExpressionImpl.kt");
    assert!(access_impl.contains("import org.lumenlang.compiler.tree.MutableOrEmptyList"));
    assert!(access_impl.contains("import org.lumenlang.compiler.tree.builder.toMutableOrEmpty"));

    let access_builder =
        unit_text(&files, "expressions/builder/LumenQualifiedAccessExpressionBuilder.kt");
    assert!(!access_builder.contains("import org.lumenlang.compiler.tree.MutableOrEmptyList"));
    assert!(access_builder.contains("import org.lumenlang.compiler.tree.builder.toMutableOrEmpty"));
    assert!(access_builder.contains("import kotlin.contracts.*"));

    //element units never need the storage helpers
    let access = unit_text(&files, "expressions/LumenQualifiedAccessExpression.kt");
    assert!(!access.contains("MutableOrEmptyList"));
}

#[test]
fn arbitrary_imports_are_collected_and_sorted_in() {
    let mut ctx = TreeContext::new();
    let checker = ClassRef::class("org.lumenlang.compiler.util", "AttributeChecker");
    let registry = ClassRef::interface("org.lumenlang.compiler.util", "AttributeRegistry");
    let node = ctx
        .define_element("Attribute", ElementKind::AbstractClass, &[])
        .unwrap();
    ctx.add_import(node, &registry);
    ctx.add_field(
        node,
        Field::single("value", TypeRef::class(&lumen_tree::types::STRING)).import(&checker),
    )
    .unwrap();
    ctx.apply_configurations().unwrap();
    let tree = resolve(&ctx).unwrap();

    let text = element::generate(&ctx, &tree, node).unwrap().text;
    let position_checker = text
        .find("import org.lumenlang.compiler.util.AttributeChecker")
        .unwrap();
    let position_registry = text
        .find("import org.lumenlang.compiler.util.AttributeRegistry")
        .unwrap();
    assert!(position_checker < position_registry);
}

#[test]
fn source_replace_pulls_the_marker_import() {
    let ctx = schema::lumen_tree().unwrap();
    let files = generate_all(&ctx).unwrap();

    let access = unit_text(&files, "expressions/LumenQualifiedAccessExpression.kt");
    assert!(access.contains("import org.lumenlang.compiler.tree.LumenImplementationDetail"));

    //no source replace anywhere on the reference chain
    let reference = unit_text(&files, "references/LumenNamedReference.kt");
    assert!(!reference.contains("LumenImplementationDetail"));
}
