extern crate parser;
extern crate protoc_gen_twirp_ts;

use std::path::PathBuf;

use parser::ast::{
    CodeGeneratorRequest, Enum, EnumValue, Field, Message, Method, SchemaFile, Service, Type,
};
use protoc_gen_twirp_ts::ts;

fn timestamp_file() -> SchemaFile {
    SchemaFile::new(
        String::from("google/protobuf/timestamp.proto"),
        String::from("google.protobuf"),
        vec![],
        vec![Message::new(
            String::from("Timestamp"),
            vec![],
            vec![],
            vec![],
        )],
        vec![],
    )
}

#[test]
fn test_generate_single_package_with_service() {
    let user = SchemaFile::new(
        String::from("user.proto"),
        String::from("pkg"),
        vec![],
        vec![Message::new(
            String::from("User"),
            vec![
                Field::new(String::from("name"), Type::Text, false),
                Field::new(
                    String::from("created"),
                    Type::Message {
                        type_name: String::from(".google.protobuf.Timestamp"),
                    },
                    false,
                ),
            ],
            vec![],
            vec![],
        )],
        vec![Service::new(
            String::from("UserService"),
            vec![Method::new(
                String::from("Get"),
                String::from(".pkg.User"),
                String::from(".pkg.User"),
            )],
        )],
    );

    let request = CodeGeneratorRequest::new(
        vec![String::from("user.proto")],
        vec![timestamp_file(), user],
    );

    let code = ts::code_gen(&request).unwrap();

    // One unit named from the package, plus the fixed runtime file.
    assert_eq!(2, code.files().len());
    assert!(code.files().contains_key(&PathBuf::from("twirp.ts")));
    let unit = &code.files()[&PathBuf::from("pkg.ts")];

    assert!(unit.contains("export interface User {\n  name: string\n  created: Date\n}"));
    assert!(unit.contains("export interface UserJSON {\n  name: string\n  created: string\n}"));

    // Conversion bodies copy the scalar and pass the timestamp through.
    assert!(unit.contains("name: m.name"));
    assert!(unit.contains("created: m.created"));

    assert!(unit.contains("export class UserService implements UserServiceInterface"));
    assert!(unit.contains("private path = '/twirp/pkg.UserService/'"));
    assert!(unit.contains("const url = this.hostname + this.path + 'Get'"));
    assert!(unit.contains("get(_user: User): Promise<User>"));
    assert!(unit.contains("UserToJSON(_user)"));
    assert!(unit.contains("res.json().then(UserFromJSON)"));

    // The timestamp never surfaces as an import; the only import in the unit
    // is the transport runtime.
    assert!(!unit.contains("import * as"));
    assert!(unit.contains("} from './twirp'"));
}

#[test]
fn test_generate_cross_package_reference() {
    let a = SchemaFile::new(
        String::from("a.proto"),
        String::from("a"),
        vec![],
        vec![Message::new(String::from("Foo"), vec![], vec![], vec![])],
        vec![],
    );
    let b = SchemaFile::new(
        String::from("b.proto"),
        String::from("b"),
        vec![],
        vec![Message::new(
            String::from("Bar"),
            vec![
                Field::new(
                    String::from("foo"),
                    Type::Message {
                        type_name: String::from(".a.Foo"),
                    },
                    false,
                ),
                Field::new(
                    String::from("foos"),
                    Type::Message {
                        type_name: String::from(".a.Foo"),
                    },
                    true,
                ),
            ],
            vec![],
            vec![],
        )],
        vec![],
    );

    let request = CodeGeneratorRequest::new(
        vec![String::from("a.proto"), String::from("b.proto")],
        vec![a, b],
    );

    let code = ts::code_gen(&request).unwrap();

    assert_eq!(3, code.files().len());
    assert!(code.files().contains_key(&PathBuf::from("a.ts")));
    let unit = &code.files()[&PathBuf::from("b.ts")];

    // Exactly one import entry, however many references point at package a.
    assert_eq!(1, unit.matches("import * as a from './a'").count());

    // The wire interface references the aliased foreign wire type.
    assert!(unit.contains("foo: a.FooJSON"));
    assert!(unit.contains("foos: a.FooJSON[]"));
    assert!(unit.contains("foo: a.FooToJSON(m.foo)"));
    assert!(unit.contains("foos: (m.foos || []).map(a.FooToJSON)"));
    assert!(unit.contains("foo: a.FooFromJSON(m.foo)"));
}

#[test]
fn test_generate_merges_files_sharing_an_output_unit() {
    let first = SchemaFile::new(
        String::from("one.proto"),
        String::from("pkg"),
        vec![Enum::new(
            String::from("Color"),
            vec![
                EnumValue::new(String::from("RED"), 0),
                EnumValue::new(String::from("GREEN"), 1),
            ],
        )],
        vec![Message::new(String::from("One"), vec![], vec![], vec![])],
        vec![],
    );
    let second = SchemaFile::new(
        String::from("two.proto"),
        String::from("pkg"),
        vec![],
        vec![Message::new(String::from("Two"), vec![], vec![], vec![])],
        vec![],
    );

    let request = CodeGeneratorRequest::new(
        vec![String::from("one.proto"), String::from("two.proto")],
        vec![first, second],
    );

    let code = ts::code_gen(&request).unwrap();

    assert_eq!(2, code.files().len());
    let unit = &code.files()[&PathBuf::from("pkg.ts")];

    assert!(unit.contains("export const Color = {\n  RED: 0,\n  GREEN: 1\n}"));
    assert!(unit.contains("export interface One"));
    assert!(unit.contains("export interface Two"));

    let one_index = unit.find("export interface One").unwrap();
    let two_index = unit.find("export interface Two").unwrap();
    assert!(one_index < two_index);
}

#[test]
fn test_generate_without_package_names_unit_from_file_stem() {
    let file = SchemaFile::new(
        String::from("misc.proto"),
        String::new(),
        vec![],
        vec![Message::new(
            String::from("Note"),
            vec![Field::new(String::from("text"), Type::Text, false)],
            vec![],
            vec![],
        )],
        vec![],
    );

    let request = CodeGeneratorRequest::new(vec![String::from("misc.proto")], vec![file]);
    let code = ts::code_gen(&request).unwrap();

    assert!(code.files().contains_key(&PathBuf::from("misc.ts")));
}

#[test]
fn test_generate_always_emits_runtime_file() {
    let file = SchemaFile::new(
        String::from("empty.proto"),
        String::from("empty"),
        vec![],
        vec![],
        vec![],
    );

    let request = CodeGeneratorRequest::new(vec![String::from("empty.proto")], vec![file]);
    let code = ts::code_gen(&request).unwrap();

    let runtime = &code.files()[&PathBuf::from("twirp.ts")];
    assert!(runtime.contains("export class TwirpError extends Error"));
    assert!(runtime.contains("createTwirpRequest"));
    assert!(runtime.contains("\"Content-Type\": \"application/json\""));
}
