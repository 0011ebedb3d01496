use multimap::MultiMap;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::ts::ast::*;
use crate::ts::resolver::{self, DefiningFile, TypeResolver, TIMESTAMP_TYPE_NAME};
use parser::ast as schema;

/// Registration pass. Runs over every compiled file before any reference is
/// resolved, so cross-file forward references always find their target.
pub fn register_types(resolver: &mut TypeResolver, cgr: &schema::CodeGeneratorRequest) {
    for file in cgr.files() {
        for enum_type in file.enums() {
            resolver.register(file, enum_type.name());
        }
        for message in file.messages() {
            register_message(resolver, file, message);
        }
        for service in file.services() {
            resolver.register(file, service.name());
        }
    }
}

fn register_message(resolver: &mut TypeResolver, file: &schema::SchemaFile, message: &schema::Message) {
    resolver.register(file, message.name());
    resolver.register(file, &format!("{}{}", message.name(), JSON_SUFFIX));

    for enum_type in message.enums() {
        resolver.register(file, &format!("{}.{}", message.name(), enum_type.name()));
    }
}

/// Builds the per-file intermediate units for every requested file and
/// aggregates them into one `OutputUnit` per output identity.
pub fn translate(resolver: &TypeResolver, cgr: &schema::CodeGeneratorRequest) -> TsAst {
    let mut order: Vec<PathBuf> = vec!();
    let mut grouped: MultiMap<PathBuf, OutputUnit> = MultiMap::new();

    for file in cgr.files() {
        if !cgr.files_to_generate().contains(file.name()) {
            continue;
        }

        let unit = translate_file(resolver, file);
        if order.contains(unit.path()) {
            warn!(
                file = %file.name(),
                unit = %unit.path().display(),
                "output unit collision, merging declarations"
            );
        } else {
            order.push(unit.path().clone());
        }
        grouped.insert(unit.path().clone(), unit);
    }

    let units = order
        .iter()
        .filter_map(|path| {
            let mut parts = grouped.remove(path)?.into_iter();
            let mut unit = parts.next()?;
            for part in parts {
                unit.merge(part);
            }
            Some(unit)
        })
        .collect();

    TsAst::new(units)
}

fn translate_file(resolver: &TypeResolver, file: &schema::SchemaFile) -> OutputUnit {
    let mut imports: BTreeMap<String, ImportDef> = BTreeMap::new();

    let enums = file.enums().iter().map(translate_enum).collect();

    let messages = file
        .messages()
        .iter()
        .map(|message| translate_message(resolver, file, message, &mut imports))
        .collect();

    let services = file
        .services()
        .iter()
        .map(|service| translate_service(resolver, file, service, &mut imports))
        .collect();

    OutputUnit::new(
        DefiningFile::of(file).unit_path(),
        imports,
        enums,
        messages,
        services,
    )
}

fn translate_enum(enum_type: &schema::Enum) -> EnumDef {
    EnumDef::new(
        enum_type.name().clone(),
        translate_enum_values(enum_type),
    )
}

fn translate_enum_values(enum_type: &schema::Enum) -> Vec<EnumValueDef> {
    enum_type
        .values()
        .iter()
        .map(|value| EnumValueDef::new(value.name().clone(), value.number()))
        .collect()
}

fn translate_message(
    resolver: &TypeResolver,
    file: &schema::SchemaFile,
    message: &schema::Message,
    imports: &mut BTreeMap<String, ImportDef>,
) -> MessageDef {
    for nested in message.messages() {
        warn!(
            message = %message.name(),
            nested = %nested.name(),
            "nested message types are not supported, skipping"
        );
    }

    // Nested enums hoist to the package level under a composite name.
    let enums = message
        .enums()
        .iter()
        .map(|enum_type| {
            EnumDef::new(
                format!("{}_{}", message.name(), enum_type.name()),
                translate_enum_values(enum_type),
            )
        })
        .collect();

    let fields = message
        .fields()
        .iter()
        .map(|field| {
            FieldDef::new(
                field.name().clone(),
                translate_field_type(resolver, file, field, imports),
            )
        })
        .collect();

    MessageDef::new(message.name().clone(), fields, enums)
}

fn translate_field_type(
    resolver: &TypeResolver,
    file: &schema::SchemaFile,
    field: &schema::Field,
    imports: &mut BTreeMap<String, ImportDef>,
) -> TsType {
    let base = match field.field_type() {
        schema::Type::Double
        | schema::Type::Float
        | schema::Type::Int32
        | schema::Type::Int64
        | schema::Type::Uint32
        | schema::Type::Uint64
        | schema::Type::Sint32
        | schema::Type::Sint64
        | schema::Type::Fixed32
        | schema::Type::Fixed64
        | schema::Type::Sfixed32
        | schema::Type::Sfixed64 => TsType::Number,
        schema::Type::Bool => TsType::Boolean,
        // Bytes travel base64-encoded in protobuf JSON.
        schema::Type::Text | schema::Type::Bytes => TsType::String,
        schema::Type::Message { type_name } if type_name == TIMESTAMP_TYPE_NAME => TsType::Date,
        schema::Type::Message { type_name } => {
            TsType::Message(resolve_reference(resolver, file, type_name, imports))
        }
        schema::Type::Enum { type_name } => {
            TsType::Enum(resolve_reference(resolver, file, type_name, imports))
        }
    };

    if field.repeated() {
        TsType::Array(Box::new(base))
    } else {
        base
    }
}

/// Resolves a leading-dot reference to its qualified local TypeScript name,
/// recording an import when the type lives in a foreign output unit.
fn resolve_reference(
    resolver: &TypeResolver,
    file: &schema::SchemaFile,
    type_name: &str,
    imports: &mut BTreeMap<String, ImportDef>,
) -> String {
    match resolver.resolve(type_name) {
        Some(defining) => {
            if defining.unit_path() != DefiningFile::of(file).unit_path() {
                imports.insert(
                    defining.package().clone(),
                    ImportDef::new(defining.import_alias(), defining.import_path()),
                );
            }
            let local = resolver::local_type_name(defining.package(), type_name);
            resolver.qualify(file, Some(defining), &local)
        }
        None => {
            debug!(type_name, "reference did not resolve, emitting bare name");
            String::from(resolver::base_type_name(type_name))
        }
    }
}

fn translate_service(
    resolver: &TypeResolver,
    file: &schema::SchemaFile,
    service: &schema::Service,
    imports: &mut BTreeMap<String, ImportDef>,
) -> ServiceDef {
    let methods = service
        .methods()
        .iter()
        .map(|method| {
            MethodDef::new(
                method.name().clone(),
                resolve_reference(resolver, file, method.input_type(), imports),
                resolve_reference(resolver, file, method.output_type(), imports),
            )
        })
        .collect();

    ServiceDef::new(service.name().clone(), file.package().clone(), methods)
}
