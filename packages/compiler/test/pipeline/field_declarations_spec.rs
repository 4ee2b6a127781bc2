//! Field Declaration Phase Tests
//!
//! Helper field declarations, runtime support fields and generation modes.

use template_compiler::{
    generate_field_declarations, AttributeDescriptor, AttributeEntry, CompilerConfig,
    CompilerError, Declaration, FieldDeclarationPass, HelperCatalog, HelperDescriptor, NodeId,
    NodeTree, NodeTreeBuilder, SourceWriter,
};

fn catalog() -> HelperCatalog {
    [
        HelperDescriptor::new("Foo", vec![AttributeDescriptor::new("foo-value")]),
        HelperDescriptor::new("Bar", vec![AttributeDescriptor::new("bar-value")]),
        HelperDescriptor::new("My.Helpers.Baz", vec![]),
    ]
    .into_iter()
    .collect()
}

fn field_types(declarations: &[Declaration]) -> Vec<String> {
    declarations
        .iter()
        .filter_map(|d| match d {
            Declaration::Field { type_name, .. } => Some(type_name.clone()),
            _ => None,
        })
        .collect()
}

fn helper_fields(declarations: &[Declaration]) -> Vec<String> {
    declarations
        .iter()
        .filter_map(|d| match d {
            Declaration::Field {
                type_name, name, ..
            } if name.starts_with("__") && !name.starts_with("__tagHelper") => {
                Some(type_name.clone())
            }
            _ => None,
        })
        .collect()
}

/// <div> <Foo,Bar> ( <Bar> ( <Baz,Foo> ) ) <Baz> </div>
fn nested_tree() -> NodeTree {
    let mut b = NodeTreeBuilder::new();
    let innermost = b.helper_usage("i", ["My.Helpers.Baz", "Foo"], vec![], vec![]);
    let middle_text = b.literal("text");
    let middle = b.helper_usage("span", ["Bar"], vec![], vec![middle_text, innermost]);
    let outer = b.helper_usage("p", ["Foo", "Bar"], vec![], vec![middle]);
    let block = b.parent(vec![outer]);
    let code = b.expression("DateTime.Now");
    let trailing = b.helper_usage("b", ["My.Helpers.Baz"], vec![], vec![]);
    let root = b.parent(vec![block, code, trailing]);
    b.build(root)
}

#[test]
fn should_declare_each_distinct_type_once_in_first_seen_order() {
    let mut tree = nested_tree();
    let generated =
        generate_field_declarations(&mut tree, &catalog(), &CompilerConfig::runtime()).unwrap();

    assert_eq!(
        generated.output.declared_types,
        vec!["Foo", "Bar", "My.Helpers.Baz"]
    );
    assert_eq!(
        helper_fields(&generated.output.declarations),
        vec!["Foo", "Bar", "My.Helpers.Baz"]
    );
    assert!(generated.source.ends_with(
        "private global::Foo __Foo;\n\
         private global::Bar __Bar;\n\
         private global::My.Helpers.Baz __My_Helpers_Baz;\n"
    ));
}

#[test]
fn should_declare_same_types_in_design_time() {
    let mut tree = nested_tree();
    let generated =
        generate_field_declarations(&mut tree, &catalog(), &CompilerConfig::design_time()).unwrap();

    assert_eq!(
        field_types(&generated.output.declarations),
        vec!["Foo", "Bar", "My.Helpers.Baz"]
    );
}

#[test]
fn should_emit_nothing_without_helper_usages() {
    for config in [CompilerConfig::runtime(), CompilerConfig::design_time()] {
        let mut b = NodeTreeBuilder::new();
        let text = b.literal("<p>plain</p>");
        let code = b.expression("Model.Name");
        let inner = b.parent(vec![code]);
        let root = b.parent(vec![text, inner]);
        let mut tree = b.build(root);

        let generated = generate_field_declarations(&mut tree, &catalog(), &config).unwrap();
        assert!(generated.output.declarations.is_empty());
        assert!(!generated.source.contains("#line hidden"));
        assert_eq!(generated.source, "");
    }
}

#[test]
fn should_emit_runtime_support_only_once() {
    let mut tree = nested_tree();
    let generated =
        generate_field_declarations(&mut tree, &catalog(), &CompilerConfig::runtime()).unwrap();

    let source = &generated.source;
    assert_eq!(source.matches("#line hidden").count(), 1);
    assert_eq!(source.matches("__tagHelperScopeManager = new global::").count(), 1);
    assert_eq!(source.matches("__tagHelperRunner;").count(), 1);
    assert!(source.starts_with("#line hidden\n#pragma warning disable 0414\n"));
}

#[test]
fn should_skip_runtime_support_and_hoisting_in_design_time() {
    let mut b = NodeTreeBuilder::new();
    let first = b.literal_attribute("class", "btn");
    let second = b.literal_attribute("href", "x");
    let usage = b.helper_usage("a", ["Foo"], vec![first, second], vec![]);
    let mut tree = b.build(usage);
    let before = tree.clone();

    let generated =
        generate_field_declarations(&mut tree, &catalog(), &CompilerConfig::design_time()).unwrap();

    assert_eq!(field_types(&generated.output.declarations), vec!["Foo"]);
    assert!(generated.output.attribute_symbols.is_empty());
    assert_eq!(generated.output.rewritten_attributes, 0);
    assert!(!generated.source.contains("__tagHelperExecutionContext"));
    assert!(!generated.source.contains("#pragma"));
    assert_eq!(tree, before);
}

#[test]
fn should_use_configured_symbols() {
    let config = CompilerConfig::from_json(
        r#"{
            "symbols": {
                "runnerTypeName": "Runtime.Runner",
                "runnerVariableName": "_runner",
                "unusedFieldWarning": "CS0414"
            }
        }"#,
    )
    .unwrap();

    let mut b = NodeTreeBuilder::new();
    let usage = b.helper_usage("p", ["Foo"], vec![], vec![]);
    let mut tree = b.build(usage);
    let generated = generate_field_declarations(&mut tree, &catalog(), &config).unwrap();

    assert!(generated.source.contains("private global::Runtime.Runner _runner;\n"));
    assert!(generated.source.contains("#pragma warning disable CS0414\n"));
}

#[test]
fn should_leave_writer_and_tree_untouched_on_structural_error() {
    let mut b = NodeTreeBuilder::new();
    let attr = b.literal_attribute("data-x", "1");
    let good = b.helper_usage("p", ["Foo"], vec![attr], vec![]);
    let root = b.parent(vec![good, NodeId(1000)]);
    let mut tree = b.build(root);
    let before = tree.clone();

    let catalog = catalog();
    let config = CompilerConfig::runtime();
    let mut writer = SourceWriter::create_root();
    let result = FieldDeclarationPass::new(&catalog, &config)
        .unwrap()
        .run(&mut tree, &mut writer);

    assert!(matches!(
        result,
        Err(CompilerError::Structural { node, .. }) if node == NodeId(1000)
    ));
    assert_eq!(writer.to_source(), "");
    assert_eq!(tree, before);
}

#[test]
fn should_reject_tree_without_root() {
    let mut b = NodeTreeBuilder::new();
    b.helper_usage("p", ["Foo"], vec![AttributeEntry::minimized("hidden")], vec![]);
    let mut tree = b.build_detached();

    let err = generate_field_declarations(&mut tree, &catalog(), &CompilerConfig::runtime())
        .unwrap_err();
    assert!(matches!(err, CompilerError::InvalidArgument { .. }));
}
