//! Generates TypeScript data-transfer types, JSON codecs, and Twirp client
//! stubs from a decoded protoc code generator request.

#[macro_use]
extern crate derive_more;
extern crate getset;
extern crate indoc;
extern crate multimap;
extern crate parser;
extern crate tracing;

pub mod ts;
