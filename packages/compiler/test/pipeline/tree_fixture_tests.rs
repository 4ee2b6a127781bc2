//! JSON Fixture Tests
//!
//! Trees and catalogs as the parser front-end serializes them.

use template_compiler::{
    generate_field_declarations, CompilerConfig, CompilerError, HelperCatalog, Node, NodeId,
    NodeTree,
};

const CATALOG: &str = r#"{
    "Shop.AnchorHelper": {
        "typeName": "Shop.AnchorHelper",
        "attributes": [
            { "name": "asp-action" },
            { "name": "asp-route-", "isPrefix": true }
        ]
    },
    "Shop.EnvironmentHelper": {
        "typeName": "Shop.EnvironmentHelper",
        "attributes": [{ "name": "names" }]
    }
}"#;

// <environment names="Dev"> <a asp-action="Index" asp-route-id="@id" class="nav">Home</a> </environment>
const TREE: &str = r#"{
    "nodes": [
        { "kind": "literal", "text": "Dev" },
        { "kind": "literal", "text": "Index" },
        { "kind": "expression", "code": "id" },
        { "kind": "literal", "text": "nav" },
        { "kind": "literal", "text": "Home" },
        {
            "kind": "helperUsage",
            "tagName": "a",
            "attributes": [
                { "name": "asp-action", "value": 1 },
                { "name": "asp-route-id", "value": 2 },
                { "name": "class", "value": 3 }
            ],
            "boundTypeNames": ["Shop.AnchorHelper"],
            "children": [4]
        },
        {
            "kind": "helperUsage",
            "tagName": "environment",
            "attributes": [{ "name": "names", "value": 0 }],
            "boundTypeNames": ["Shop.EnvironmentHelper"],
            "children": [5]
        },
        { "kind": "transparentParent", "children": [6] }
    ],
    "root": 7
}"#;

fn load() -> (NodeTree, HelperCatalog) {
    let tree = NodeTree::from_json(TREE).unwrap();
    let catalog: HelperCatalog = serde_json::from_str(CATALOG).unwrap();
    (tree, catalog)
}

#[test]
fn should_load_fixture() {
    let (tree, catalog) = load();
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.root(), Some(NodeId(7)));
    assert_eq!(catalog.len(), 2);
}

#[test]
fn should_process_fixture_tree() {
    let (mut tree, catalog) = load();

    let generated =
        generate_field_declarations(&mut tree, &catalog, &CompilerConfig::runtime()).unwrap();

    assert_eq!(
        generated.output.declared_types,
        vec!["Shop.EnvironmentHelper", "Shop.AnchorHelper"]
    );
    // Only `class="nav"` is unbound and constant.
    assert_eq!(generated.output.attribute_symbols, vec!["__tagHelperAttribute_0"]);

    let anchor = tree.attributes(NodeId(5)).unwrap();
    assert_eq!(anchor[0].value, Some(NodeId(1)));
    assert_eq!(anchor[1].value, Some(NodeId(2)));
    let class_value = anchor[2].value.unwrap();
    assert_eq!(
        tree.get(class_value),
        Some(&Node::PreallocatedAttributeRef {
            symbol: "__tagHelperAttribute_0".to_string()
        })
    );
    assert!(generated.source.contains("private global::Shop.AnchorHelper __Shop_AnchorHelper;\n"));
    assert!(generated
        .source
        .contains("private global::Shop.EnvironmentHelper __Shop_EnvironmentHelper;\n"));
}

#[test]
fn should_serialize_rewritten_tree() {
    let (mut tree, catalog) = load();
    generate_field_declarations(&mut tree, &catalog, &CompilerConfig::runtime()).unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    assert!(json.contains(r#"{"kind":"preallocatedAttributeRef","symbol":"__tagHelperAttribute_0"}"#));
    assert_eq!(NodeTree::from_json(&json).unwrap(), tree);
}

#[test]
fn should_reject_malformed_fixture() {
    let err = NodeTree::from_json(r#"{ "nodes": [{ "kind": "element" }] }"#).unwrap_err();
    assert!(matches!(err, CompilerError::InvalidArgument { .. }));
}
