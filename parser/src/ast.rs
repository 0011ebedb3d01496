use getset::{CopyGetters, Getters};

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct CodeGeneratorRequest {
    files_to_generate: Vec<String>,
    files: Vec<SchemaFile>,
}

/// One decoded schema file. The request's `files` list covers every compiled
/// descriptor, dependencies included; only the requested subset is generated.
#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct SchemaFile {
    name: String,
    package: String,
    enums: Vec<Enum>,
    messages: Vec<Message>,
    services: Vec<Service>,
}

/// Declared field type. Composite references keep the descriptor's
/// leading-dot fully-qualified form (`.pkg.Name`).
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    Text,
    Bytes,
    Message { type_name: String },
    Enum { type_name: String },
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq)]
pub struct Field {
    #[get = "pub"]
    name: String,

    #[get = "pub"]
    field_type: Type,

    #[get_copy = "pub"]
    repeated: bool,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Enum {
    name: String,
    values: Vec<EnumValue>,
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq)]
pub struct EnumValue {
    #[get = "pub"]
    name: String,

    #[get_copy = "pub"]
    number: i32,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Message {
    name: String,
    fields: Vec<Field>,
    enums: Vec<Enum>,
    messages: Vec<Message>,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Service {
    name: String,
    methods: Vec<Method>,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Method {
    name: String,
    input_type: String,
    output_type: String,
}
