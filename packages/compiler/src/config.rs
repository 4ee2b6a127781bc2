//! Compiler Configuration
//!
//! Generation mode and the names of every runtime type and variable the
//! field declaration pass writes into generated code.

use crate::error::{CompilerError, Result};
use crate::util::is_legal_identifier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names of the runtime types and fields referenced by generated declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedSymbols {
    /// Type of every pre-allocated attribute field
    pub attribute_type_name: String,
    /// Type wrapping a literal attribute value that must not be re-encoded
    pub encoded_string_type_name: String,
    /// Prefix of pre-allocated attribute fields; a counter is appended
    pub attribute_symbol_prefix: String,

    pub string_value_buffer_type_name: String,
    pub string_value_buffer_variable_name: String,
    pub execution_context_type_name: String,
    pub execution_context_variable_name: String,
    pub runner_type_name: String,
    pub runner_variable_name: String,
    pub scope_manager_type_name: String,
    pub scope_manager_variable_name: String,

    /// Diagnostic silenced around the string value buffer; whether the buffer
    /// is read depends on template content.
    pub unused_field_warning: String,
}

impl Default for GeneratedSymbols {
    fn default() -> Self {
        GeneratedSymbols {
            attribute_type_name: "Microsoft.AspNet.Razor.TagHelpers.TagHelperAttribute".to_string(),
            encoded_string_type_name: "Microsoft.AspNet.Mvc.Rendering.HtmlString".to_string(),
            attribute_symbol_prefix: "__tagHelperAttribute_".to_string(),
            string_value_buffer_type_name: "System.String".to_string(),
            string_value_buffer_variable_name: "__tagHelperStringValueBuffer".to_string(),
            execution_context_type_name:
                "Microsoft.AspNet.Razor.Runtime.TagHelpers.TagHelperExecutionContext".to_string(),
            execution_context_variable_name: "__tagHelperExecutionContext".to_string(),
            runner_type_name: "Microsoft.AspNet.Razor.Runtime.TagHelpers.TagHelperRunner"
                .to_string(),
            runner_variable_name: "__tagHelperRunner".to_string(),
            scope_manager_type_name:
                "Microsoft.AspNet.Razor.Runtime.TagHelpers.TagHelperScopeManager".to_string(),
            scope_manager_variable_name: "__tagHelperScopeManager".to_string(),
            unused_field_warning: "0414".to_string(),
        }
    }
}

impl GeneratedSymbols {
    /// Check that every name is usable before anything is emitted.
    pub fn validate(&self) -> Result<()> {
        let types = [
            ("attributeTypeName", &self.attribute_type_name),
            ("encodedStringTypeName", &self.encoded_string_type_name),
            ("stringValueBufferTypeName", &self.string_value_buffer_type_name),
            ("executionContextTypeName", &self.execution_context_type_name),
            ("runnerTypeName", &self.runner_type_name),
            ("scopeManagerTypeName", &self.scope_manager_type_name),
            ("unusedFieldWarning", &self.unused_field_warning),
        ];
        for (name, value) in types {
            if value.trim().is_empty() {
                return Err(CompilerError::invalid_argument(name, "must not be empty"));
            }
        }

        let identifiers = [
            ("attributeSymbolPrefix", &self.attribute_symbol_prefix),
            ("stringValueBufferVariableName", &self.string_value_buffer_variable_name),
            ("executionContextVariableName", &self.execution_context_variable_name),
            ("runnerVariableName", &self.runner_variable_name),
            ("scopeManagerVariableName", &self.scope_manager_variable_name),
        ];
        for (name, value) in identifiers {
            if !is_legal_identifier(value) {
                return Err(CompilerError::invalid_argument(
                    name,
                    format!("'{}' is not a legal identifier", value),
                ));
            }
        }
        Ok(())
    }
}

/// Compiler configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Generate for tooling (completion, diagnostics) rather than execution.
    /// Runtime support fields and attribute pre-allocation are skipped.
    pub design_time: bool,
    pub symbols: GeneratedSymbols,
}

impl CompilerConfig {
    pub fn runtime() -> Self {
        CompilerConfig::default()
    }

    pub fn design_time() -> Self {
        CompilerConfig {
            design_time: true,
            ..CompilerConfig::default()
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CompilerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CompilerConfig = serde_json::from_str(&content)?;
        config.symbols.validate()?;
        Ok(config)
    }
}
