#[macro_use]
extern crate derive_more;
extern crate getset;
extern crate prost;
extern crate prost_types;

pub mod ast;

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    MethodDescriptorProto, ServiceDescriptorProto,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read code generator request: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to decode code generator request: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("no files to generate")]
    NoFilesToGenerate,
}

trait ParseFrom<R>: Sized {
    fn parse(reader: &R) -> Self;
}

impl ParseFrom<FieldDescriptorProto> for ast::Type {
    fn parse(field: &FieldDescriptorProto) -> ast::Type {
        use prost_types::field_descriptor_proto::Type;

        match field.r#type() {
            Type::Double => ast::Type::Double,
            Type::Float => ast::Type::Float,
            Type::Int32 => ast::Type::Int32,
            Type::Int64 => ast::Type::Int64,
            Type::Uint32 => ast::Type::Uint32,
            Type::Uint64 => ast::Type::Uint64,
            Type::Sint32 => ast::Type::Sint32,
            Type::Sint64 => ast::Type::Sint64,
            Type::Fixed32 => ast::Type::Fixed32,
            Type::Fixed64 => ast::Type::Fixed64,
            Type::Sfixed32 => ast::Type::Sfixed32,
            Type::Sfixed64 => ast::Type::Sfixed64,
            Type::Bool => ast::Type::Bool,
            Type::String => ast::Type::Text,
            Type::Bytes => ast::Type::Bytes,
            Type::Enum => ast::Type::Enum {
                type_name: String::from(field.type_name()),
            },
            // Proto2 groups are message references to the group type.
            Type::Message | Type::Group => ast::Type::Message {
                type_name: String::from(field.type_name()),
            },
        }
    }
}

impl ParseFrom<FieldDescriptorProto> for ast::Field {
    fn parse(field: &FieldDescriptorProto) -> ast::Field {
        ast::Field::new(
            String::from(field.name()),
            ast::Type::parse(field),
            field.label() == field_descriptor_proto::Label::Repeated,
        )
    }
}

impl ParseFrom<EnumDescriptorProto> for ast::Enum {
    fn parse(enum_type: &EnumDescriptorProto) -> ast::Enum {
        let values = enum_type
            .value
            .iter()
            .map(|value| ast::EnumValue::new(String::from(value.name()), value.number()))
            .collect();

        ast::Enum::new(String::from(enum_type.name()), values)
    }
}

impl ParseFrom<DescriptorProto> for ast::Message {
    fn parse(message: &DescriptorProto) -> ast::Message {
        ast::Message::new(
            String::from(message.name()),
            message.field.iter().map(ast::Field::parse).collect(),
            message.enum_type.iter().map(ast::Enum::parse).collect(),
            message.nested_type.iter().map(ast::Message::parse).collect(),
        )
    }
}

impl ParseFrom<MethodDescriptorProto> for ast::Method {
    fn parse(method: &MethodDescriptorProto) -> ast::Method {
        ast::Method::new(
            String::from(method.name()),
            String::from(method.input_type()),
            String::from(method.output_type()),
        )
    }
}

impl ParseFrom<ServiceDescriptorProto> for ast::Service {
    fn parse(service: &ServiceDescriptorProto) -> ast::Service {
        ast::Service::new(
            String::from(service.name()),
            service.method.iter().map(ast::Method::parse).collect(),
        )
    }
}

impl ParseFrom<FileDescriptorProto> for ast::SchemaFile {
    fn parse(file: &FileDescriptorProto) -> ast::SchemaFile {
        ast::SchemaFile::new(
            String::from(file.name()),
            String::from(file.package()),
            file.enum_type.iter().map(ast::Enum::parse).collect(),
            file.message_type.iter().map(ast::Message::parse).collect(),
            file.service.iter().map(ast::Service::parse).collect(),
        )
    }
}

pub fn parse(request: &CodeGeneratorRequest) -> ast::CodeGeneratorRequest {
    ast::CodeGeneratorRequest::new(
        request.file_to_generate.clone(),
        request.proto_file.iter().map(ast::SchemaFile::parse).collect(),
    )
}

pub fn read_request(reader: &mut dyn std::io::Read) -> Result<ast::CodeGeneratorRequest, ParseError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;

    let request = CodeGeneratorRequest::decode(buf.as_slice())?;
    if request.file_to_generate.is_empty() {
        return Err(ParseError::NoFilesToGenerate);
    }

    Ok(parse(&request))
}
