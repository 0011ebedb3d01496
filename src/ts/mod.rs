mod ast;
mod codegen;
mod resolver;
mod runtime;
mod translator;

pub use crate::ts::codegen::{Code, Error};

use crate::ts::resolver::TypeResolver;
use parser::ast::CodeGeneratorRequest;

/// Runs one full generation pass: type registration, per-file model building,
/// package aggregation, emission. The resolver lives for exactly this call,
/// so repeated runs never share state.
pub fn code_gen(cgr: &CodeGeneratorRequest) -> Result<Code, Error> {
    let mut resolver = TypeResolver::new();
    translator::register_types(&mut resolver, cgr);

    let ast = translator::translate(&resolver, cgr);

    codegen::codegen(&ast)
}
