//! Emit
//!
//! Renders collected declarations through a `CodeWriter`.

use crate::output::{CodeWriter, Declaration};

pub fn emit_declarations<W: CodeWriter>(writer: &mut W, declarations: &[Declaration]) {
    for declaration in declarations {
        emit_declaration(writer, declaration);
    }
}

pub fn emit_declaration<W: CodeWriter>(writer: &mut W, declaration: &Declaration) {
    match declaration {
        Declaration::LineHidden => {
            writer.write_line_hidden();
        }
        Declaration::Pragma { value } => {
            writer.write_pragma(value);
        }
        Declaration::Field {
            type_name,
            name,
            constructed_type,
        } => {
            writer.write("private ").write_global_type(type_name).write(" ");
            match constructed_type {
                Some(constructed) => {
                    writer
                        .write_start_assignment(name)
                        .write_start_new_object(constructed)
                        .write_end_method_invocation(true);
                }
                None => {
                    writer.write(name).write_line(";");
                }
            }
        }
        Declaration::PreallocatedAttribute {
            attribute_type_name,
            encoded_string_type_name,
            symbol,
            attribute_name,
            value,
        } => {
            writer
                .write("private static readonly ")
                .write_global_type(attribute_type_name)
                .write(" ")
                .write_start_assignment(symbol)
                .write_start_new_object(attribute_type_name)
                .write_string_literal(attribute_name);
            if let Some(value) = value {
                writer
                    .write_parameter_separator()
                    .write_start_new_object(encoded_string_type_name)
                    .write_string_literal(value)
                    .write_end_method_invocation(false);
            }
            writer.write_end_method_invocation(true);
        }
    }
}
