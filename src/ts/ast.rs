use getset::{CopyGetters, Getters};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Suffix distinguishing the wire-representation type from the in-memory one.
pub const JSON_SUFFIX: &str = "JSON";

/// Identifier split into case tokens, on underscores and lower-to-upper
/// transitions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name {
    tokens: Vec<String>,
}

impl Name {
    pub fn from(name: &str) -> Name {
        let mut tokens = vec!();
        let mut current = String::new();
        let mut last_was_lowercase = false;

        for ch in name.chars() {
            if ch == '_' {
                if !current.is_empty() {
                    tokens.push(current);
                    current = String::new();
                }
                last_was_lowercase = false;
                continue;
            }
            if last_was_lowercase && ch.is_uppercase() {
                tokens.push(current);
                current = String::new();
            }
            current.push(ch);
            last_was_lowercase = ch.is_lowercase();
        }
        if !current.is_empty() {
            tokens.push(current);
        }

        Name { tokens }
    }

    pub fn to_lower_camel_case(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }

        let (head, tail) = self.tokens.split_first().unwrap();
        head.to_lowercase()
            + tail
                .iter()
                .map(|token| {
                    if token.is_empty() {
                        return String::new();
                    }
                    token[0..1].to_uppercase() + token[1..].to_lowercase().as_str()
                })
                .collect::<Vec<String>>()
                .join("")
                .as_str()
    }
}

/// Canonical field type. Both TypeScript representations derive from this one
/// value, so the two can never disagree on a field.
#[derive(Clone, Debug, PartialEq)]
pub enum TsType {
    Number,
    String,
    Boolean,
    Date,
    Message(String),
    Enum(String),
    Array(Box<TsType>),
}

impl TsType {
    /// In-memory type name.
    pub fn ts_type(&self) -> String {
        match self {
            TsType::Number => String::from("number"),
            TsType::String => String::from("string"),
            TsType::Boolean => String::from("boolean"),
            TsType::Date => String::from("Date"),
            TsType::Message(name) => name.clone(),
            TsType::Enum(name) => name.clone(),
            TsType::Array(element) => format!("{}[]", element.ts_type()),
        }
    }

    /// Wire (JSON) type name. Differs from `ts_type` only for message
    /// references and the timestamp, which travels as RFC 3339 text.
    pub fn json_type(&self) -> String {
        match self {
            TsType::Date => String::from("string"),
            TsType::Message(name) => format!("{}{}", name, JSON_SUFFIX),
            TsType::Array(element) => format!("{}[]", element.json_type()),
            _ => self.ts_type(),
        }
    }
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq)]
pub struct EnumValueDef {
    #[get = "pub"]
    name: String,

    #[get_copy = "pub"]
    number: i32,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct EnumDef {
    name: String,
    values: Vec<EnumValueDef>,
}

/// One message field. `name` is the schema-declared name and doubles as the
/// wire JSON key; the in-memory accessor is its lower-camel form.
#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct FieldDef {
    name: String,
    field_type: TsType,
}

impl FieldDef {
    pub fn ts_name(&self) -> String {
        Name::from(&self.name).to_lower_camel_case()
    }
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct MessageDef {
    name: String,
    fields: Vec<FieldDef>,

    // Nested enums, hoisted under a `<Message>_<Enum>` composite name.
    enums: Vec<EnumDef>,
}

impl MessageDef {
    pub fn json_name(&self) -> String {
        format!("{}{}", self.name, JSON_SUFFIX)
    }
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct MethodDef {
    name: String,
    input_type: String,
    output_type: String,
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct ServiceDef {
    name: String,
    package: String,
    methods: Vec<MethodDef>,
}

impl ServiceDef {
    /// Fully-qualified name as it appears in the request path.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct ImportDef {
    name: String,
    path: String,
}

/// One emitted source file, aggregated from every schema file that shares its
/// output identity. Imports are keyed by source package.
#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct OutputUnit {
    path: PathBuf,
    imports: BTreeMap<String, ImportDef>,
    enums: Vec<EnumDef>,
    messages: Vec<MessageDef>,
    services: Vec<ServiceDef>,
}

impl OutputUnit {
    /// Folds another unit that landed on the same output path into this one:
    /// imports union, declaration lists append in arrival order.
    pub fn merge(&mut self, other: OutputUnit) {
        self.imports.extend(other.imports);
        self.enums.extend(other.enums);
        self.messages.extend(other.messages);
        self.services.extend(other.services);
    }
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct TsAst {
    units: Vec<OutputUnit>,
}
