extern crate parser;
extern crate prost;
extern crate prost_types;
extern crate protoc_gen_twirp_ts;
extern crate tracing_subscriber;

use std::io::{self, Write};

use prost::Message;
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::CodeGeneratorResponse;
use tracing_subscriber::EnvFilter;

use protoc_gen_twirp_ts::ts;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Stdout carries the encoded response, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let request = parser::read_request(&mut io::stdin())?;
    let code = ts::code_gen(&request)?;

    let mut files: Vec<File> = code
        .files()
        .iter()
        .map(|(path, content)| File {
            name: Some(path.to_string_lossy().into_owned()),
            content: Some(content.clone()),
            ..Default::default()
        })
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let response = CodeGeneratorResponse {
        file: files,
        ..Default::default()
    };

    let mut buf = Vec::new();
    response.encode(&mut buf)?;
    io::stdout().write_all(&buf)?;

    Ok(())
}
