use indoc::indoc;

use super::codegen_enum;
use crate::ts::ast::{self, TsType};

pub fn codegen_message(message: &ast::MessageDef) -> String {
    let mut blocks: Vec<String> = vec!();

    blocks.extend(message.enums().iter().map(codegen_enum));
    blocks.push(codegen_model_interface(message));
    blocks.push(codegen_json_interface(message));
    blocks.push(codegen_to_json(message));
    blocks.push(codegen_from_json(message));

    blocks.join("\n\n")
}

fn codegen_model_interface(message: &ast::MessageDef) -> String {
    indoc!(
        "export interface #NAME {
          #FIELDS
        }"
    )
    .replace(
        "#FIELDS",
        &message
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.ts_name(), field.field_type().ts_type()))
            .collect::<Vec<String>>()
            .join("\n  "),
    )
    .replace("#NAME", message.name())
}

fn codegen_json_interface(message: &ast::MessageDef) -> String {
    indoc!(
        "export interface #NAME {
          #FIELDS
        }"
    )
    .replace(
        "#FIELDS",
        &message
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.name(), field.field_type().json_type()))
            .collect::<Vec<String>>()
            .join("\n  "),
    )
    .replace("#NAME", &message.json_name())
}

fn codegen_to_json(message: &ast::MessageDef) -> String {
    indoc!(
        "export const #NAMEToJSON = (m: #NAME): #JSON_NAME => {
          return <#JSON_NAME>{
            #FIELDS
          }
        }"
    )
    .replace(
        "#FIELDS",
        &message
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.name(), to_json_expr(field)))
            .collect::<Vec<String>>()
            .join(",\n    "),
    )
    .replace("#JSON_NAME", &message.json_name())
    .replace("#NAME", message.name())
}

fn codegen_from_json(message: &ast::MessageDef) -> String {
    indoc!(
        "export const #NAMEFromJSON = (m: #JSON_NAME): #NAME => {
          return <#NAME>{
            #FIELDS
          }
        }"
    )
    .replace(
        "#FIELDS",
        &message
            .fields()
            .iter()
            .map(|field| format!("{}: {}", field.ts_name(), from_json_expr(field)))
            .collect::<Vec<String>>()
            .join(",\n    "),
    )
    .replace("#JSON_NAME", &message.json_name())
    .replace("#NAME", message.name())
}

fn scalar_coercion(element: &TsType) -> Option<&'static str> {
    match element {
        TsType::Number => Some("Number"),
        TsType::String => Some("String"),
        TsType::Boolean => Some("Boolean"),
        _ => None,
    }
}

/// Wire-bound conversion for one field: message references convert, repeated
/// scalars re-coerce element-wise, everything else (scalars, enums, the
/// timestamp) copies verbatim.
fn to_json_expr(field: &ast::FieldDef) -> String {
    let access = format!("m.{}", field.ts_name());

    match field.field_type() {
        TsType::Message(name) => format!("{}ToJSON({})", name, access),
        TsType::Array(element) => match element.as_ref() {
            TsType::Message(name) => format!("({} || []).map({}ToJSON)", access, name),
            element => match scalar_coercion(element) {
                Some(coerce) => format!("({} || []).map((v) => {{ return {}(v) }})", access, coerce),
                None => access,
            },
        },
        _ => access,
    }
}

/// Memory-bound conversion for one field, reading the wire JSON key.
fn from_json_expr(field: &ast::FieldDef) -> String {
    let access = format!("m.{}", field.name());

    match field.field_type() {
        TsType::Message(name) => format!("{}FromJSON({})", name, access),
        TsType::Array(element) => match element.as_ref() {
            TsType::Message(name) => format!("({} || []).map({}FromJSON)", access, name),
            element => match scalar_coercion(element) {
                Some(coerce) => format!("({} || []).map((v) => {{ return {}(v) }})", access, coerce),
                None => access,
            },
        },
        _ => access,
    }
}
