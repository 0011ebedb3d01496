use indoc::indoc;

use crate::ts::ast::{self, Name};
use crate::ts::resolver;

pub fn codegen_service(service: &ast::ServiceDef) -> String {
    indoc!(
        "export interface #NAMEInterface {
          #SIGNATURES
        }

        export class #NAME implements #NAMEInterface {
          private hostname: string
          private fetch: Fetch
          private path = '/twirp/#QUALIFIED_NAME/'

          constructor(hostname: string, fetch: Fetch) {
            this.hostname = hostname
            this.fetch = fetch
          }

          #METHODS
        }"
    )
    .replace(
        "#SIGNATURES",
        &service
            .methods()
            .iter()
            .map(codegen_signature)
            .collect::<Vec<String>>()
            .join("\n  "),
    )
    .replace(
        "#METHODS",
        &service
            .methods()
            .iter()
            .map(codegen_method)
            .collect::<Vec<String>>()
            .join("\n\n")
            .replace('\n', "\n  "),
    )
    .replace("#QUALIFIED_NAME", &service.qualified_name())
    .replace("#NAME", service.name())
}

fn method_name(method: &ast::MethodDef) -> String {
    Name::from(method.name()).to_lower_camel_case()
}

// Underscore prefix keeps generated argument names clear of reserved words.
fn argument_name(method: &ast::MethodDef) -> String {
    format!(
        "_{}",
        Name::from(resolver::base_type_name(method.input_type())).to_lower_camel_case()
    )
}

fn codegen_signature(method: &ast::MethodDef) -> String {
    String::from("#METHOD: (#ARG: #INPUT) => Promise<#OUTPUT>")
        .replace("#METHOD", &method_name(method))
        .replace("#ARG", &argument_name(method))
        .replace("#INPUT", method.input_type())
        .replace("#OUTPUT", method.output_type())
}

fn codegen_method(method: &ast::MethodDef) -> String {
    indoc!(
        "#METHOD(#ARG: #INPUT): Promise<#OUTPUT> {
          const url = this.hostname + this.path + '#RPC_NAME'
          return this.fetch(createTwirpRequest(url, #INPUTToJSON(#ARG))).then((res) => {
            if (!res.ok) {
              return throwTwirpError(res)
            }
            return res.json().then(#OUTPUTFromJSON)
          })
        }"
    )
    .replace("#METHOD", &method_name(method))
    .replace("#RPC_NAME", method.name())
    .replace("#ARG", &argument_name(method))
    .replace("#INPUT", method.input_type())
    .replace("#OUTPUT", method.output_type())
}
