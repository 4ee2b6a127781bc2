#![deny(clippy::all)]

/**
 * Template Compiler - Helper Field Declarations
 *
 * Declares the class members generated code needs for helper usages in a parsed
 * template and rewrites constant attributes to shared, pre-allocated instances.
 */

pub mod config;
pub mod error;
pub mod helper_descriptors;
pub mod output;
pub mod template;
pub mod util;

// Re-exports
pub use config::{CompilerConfig, GeneratedSymbols};
pub use error::{CompilerError, Result};
pub use helper_descriptors::{
    AttributeDescriptor, DescriptorCatalog, HelperCatalog, HelperDescriptor,
};
pub use output::{CodeWriter, Declaration, SourceWriter};
pub use template::pipeline::ir::{AttributeEntry, Node, NodeId, NodeTree, NodeTreeBuilder};
pub use template::pipeline::phases::{FieldDeclarationPass, PassOutput};

/// Generated member declarations for one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFields {
    /// Rendered C# source
    pub source: String,
    pub output: PassOutput,
}

/// Run the field declaration pass over `tree` and render the result.
///
/// On success the tree has its constant attributes rewritten to shared field
/// references. On failure nothing is rendered and the tree is unchanged.
pub fn generate_field_declarations<C: DescriptorCatalog>(
    tree: &mut NodeTree,
    catalog: &C,
    config: &CompilerConfig,
) -> Result<GeneratedFields> {
    let mut writer = SourceWriter::create_root();
    let output = FieldDeclarationPass::new(catalog, config)?.run(tree, &mut writer)?;
    Ok(GeneratedFields {
        source: writer.to_source(),
        output,
    })
}
