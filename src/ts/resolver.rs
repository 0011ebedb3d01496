use getset::Getters;
use std::collections::HashMap;
use std::path::PathBuf;

use parser::ast::SchemaFile;

/// The well-known timestamp type. It is replaced by the native `Date`, so it
/// never resolves and never gains an import.
pub const TIMESTAMP_TYPE_NAME: &str = ".google.protobuf.Timestamp";

/// Pseudo-package the well-known types live in.
pub const WELL_KNOWN_PACKAGE: &str = "google.protobuf";

/// Identity of the schema file a type was registered from, reduced to what
/// qualification and import generation need.
#[derive(Clone, Constructor, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct DefiningFile {
    name: String,
    package: String,
}

impl DefiningFile {
    pub fn of(file: &SchemaFile) -> DefiningFile {
        DefiningFile::new(file.name().clone(), file.package().clone())
    }

    /// Stem of the output unit this file aggregates into: the package, or the
    /// schema file stem when no package is declared.
    pub fn unit_stem(&self) -> String {
        if self.package.is_empty() {
            file_stem(&self.name)
        } else {
            self.package.clone()
        }
    }

    /// Path of the output unit this file aggregates into.
    pub fn unit_path(&self) -> PathBuf {
        let file_name = format!("{}.ts", self.unit_stem());
        match file_dir(&self.name) {
            Some(dir) => PathBuf::from(dir).join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Module path emitted in import statements for this unit.
    pub fn import_path(&self) -> String {
        match file_dir(&self.name) {
            Some(dir) => format!("./{}/{}", dir, self.unit_stem()),
            None => format!("./{}", self.unit_stem()),
        }
    }

    /// Identifier the unit is imported under.
    pub fn import_alias(&self) -> String {
        self.unit_stem().replace('.', "_")
    }
}

/// Table of every type declared across the compiled schema files, keyed by
/// fully-qualified name. One instance lives for exactly one generation run
/// and is passed by reference wherever resolution happens.
#[derive(Default, Debug)]
pub struct TypeResolver {
    types: HashMap<String, DefiningFile>,
}

impl TypeResolver {
    pub fn new() -> TypeResolver {
        TypeResolver {
            types: HashMap::new(),
        }
    }

    pub fn register(&mut self, file: &SchemaFile, local_name: &str) {
        let key = full_type_name(file.package(), local_name);
        self.types.insert(key, DefiningFile::of(file));
    }

    /// Looks up a leading-dot fully-qualified reference. The well-known
    /// timestamp is excluded even when its descriptor file was compiled in.
    pub fn resolve(&self, type_name: &str) -> Option<&DefiningFile> {
        if type_name == TIMESTAMP_TYPE_NAME {
            return None;
        }
        self.types.get(type_name)
    }

    /// Qualifies `bare` for use inside `current`: unchanged when the type is
    /// unresolved or defined into the same output unit, alias-prefixed
    /// otherwise.
    pub fn qualify(&self, current: &SchemaFile, resolved: Option<&DefiningFile>, bare: &str) -> String {
        match resolved {
            Some(defining) if defining.unit_path() != DefiningFile::of(current).unit_path() => {
                format!("{}.{}", defining.import_alias(), bare)
            }
            _ => String::from(bare),
        }
    }
}

/// `.package.Local` lookup key. The local name may itself be dotted for
/// nested declarations.
pub fn full_type_name(package: &str, local_name: &str) -> String {
    if package.is_empty() {
        format!(".{}", local_name)
    } else {
        format!(".{}.{}", package, local_name)
    }
}

/// Local name of a reference relative to its defining package, with nested
/// path segments flattened by underscores.
pub fn local_type_name(package: &str, type_name: &str) -> String {
    let name = type_name.strip_prefix('.').unwrap_or(type_name);
    let name = if package.is_empty() {
        name
    } else {
        match name.strip_prefix(package) {
            Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
            None => name,
        }
    };
    name.replace('.', "_")
}

/// Last segment of a dotted type reference.
pub fn base_type_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

fn file_stem(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rfind('.') {
        Some(index) => String::from(&base[..index]),
        None => String::from(base),
    }
}

fn file_dir(name: &str) -> Option<&str> {
    name.rfind('/').map(|index| &name[..index])
}
