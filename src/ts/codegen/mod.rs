use getset::Getters;
use indoc::indoc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ts::ast;
use crate::ts::resolver::WELL_KNOWN_PACKAGE;
use crate::ts::runtime;

mod message;
mod service;

/// Emission failure. Any of these aborts the whole run: generation is
/// all-or-nothing, with no partial output mode.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("template for {file} left {placeholder} unfilled")]
    UnfilledPlaceholder { file: String, placeholder: String },
}

#[derive(Constructor, Clone, Getters, Debug, PartialEq)]
#[get = "pub"]
pub struct Code {
    files: HashMap<PathBuf, String>,
}

const RUNTIME_IMPORT: &str = "\
import {
  createTwirpRequest,
  Fetch,
  throwTwirpError
} from './twirp'";

pub fn codegen(ast: &ast::TsAst) -> Result<Code, Error> {
    let mut files = HashMap::new();
    files.insert(
        PathBuf::from(runtime::TWIRP_FILE_NAME),
        String::from(runtime::TWIRP_SOURCE),
    );

    for unit in ast.units() {
        let code = codegen_unit(unit);
        audit_placeholders(unit.path(), &code)?;
        files.insert(unit.path().clone(), code);
    }

    Ok(Code::new(files))
}

fn codegen_unit(unit: &ast::OutputUnit) -> String {
    let mut sections: Vec<String> = vec!();

    let imports = unit
        .imports()
        .iter()
        .filter(|(package, _)| package.as_str() != WELL_KNOWN_PACKAGE)
        .map(|(_, import)| codegen_import(import))
        .collect::<Vec<String>>();
    if !imports.is_empty() {
        sections.push(imports.join("\n"));
    }

    if !unit.services().is_empty() {
        sections.push(String::from(RUNTIME_IMPORT));
    }

    if !unit.enums().is_empty() {
        sections.push(format!(
            "// Enums\n{}",
            unit.enums()
                .iter()
                .map(codegen_enum)
                .collect::<Vec<String>>()
                .join("\n\n")
        ));
    }

    if !unit.messages().is_empty() {
        sections.push(format!(
            "// Messages\n{}",
            unit.messages()
                .iter()
                .map(message::codegen_message)
                .collect::<Vec<String>>()
                .join("\n\n")
        ));
    }

    if !unit.services().is_empty() {
        sections.push(format!(
            "// Services\n{}",
            unit.services()
                .iter()
                .map(service::codegen_service)
                .collect::<Vec<String>>()
                .join("\n\n")
        ));
    }

    sections.join("\n\n") + "\n"
}

fn codegen_import(import: &ast::ImportDef) -> String {
    String::from("import * as #NAME from '#PATH'")
        .replace("#NAME", import.name())
        .replace("#PATH", import.path())
}

fn codegen_enum(enum_def: &ast::EnumDef) -> String {
    indoc!(
        "export const #NAME = {
          #VALUES
        }
        export type #NAME = number"
    )
    .replace(
        "#VALUES",
        &enum_def
            .values()
            .iter()
            .map(|value| format!("{}: {}", value.name(), value.number()))
            .collect::<Vec<String>>()
            .join(",\n  "),
    )
    .replace("#NAME", enum_def.name())
}

/// Scans composed output for an unfilled `#MARKER`. Markers are uppercase
/// runs; generated TypeScript never contains one.
fn audit_placeholders(path: &Path, code: &str) -> Result<(), Error> {
    for (index, _) in code.match_indices('#') {
        let marker: String = code[index + 1..]
            .chars()
            .take_while(|ch| ch.is_ascii_uppercase() || *ch == '_')
            .collect();

        if !marker.is_empty() {
            return Err(Error::UnfilledPlaceholder {
                file: path.display().to_string(),
                placeholder: format!("#{}", marker),
            });
        }
    }
    Ok(())
}
