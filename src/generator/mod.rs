//! # Generator Module
//!
//! Turns a [`SchemaFile`](crate::schema::SchemaFile) into the Go source of a
//! connect-gateway adapter: a type that implements the gRPC server interface
//! grpc-gateway expects, backed by Connect handlers.
//!
//! ## Architecture
//!
//! ```text
//! SchemaFile → file (preamble, paths) → service (per service) → GeneratedFile → Askama → Go source
//!                                          ├─ classify (unary vs streaming)
//!                                          ├─ names (identifiers, procedure paths)
//!                                          └─ comments (word-wrapped doc comments)
//! ```
//!
//! ## Generated code
//!
//! For a service `Greeter` in package `pkg.v1` with a unary `SayHello` and a
//! bidirectional `Chat`, the output contains:
//!
//! ```text
//! type GreeterGatewayServer struct {
//!     v1.UnimplementedGreeterServer
//!     sayHello connect_gateway.UnaryHandler[v1.HelloRequest, v1.HelloResponse]
//! }
//!
//! func NewGreeterGatewayServer(svc GreeterHandler, opts ...connect_gateway.HandlerOption) *GreeterGatewayServer
//! func (s *GreeterGatewayServer) SayHello(ctx context.Context, req *v1.HelloRequest) (*v1.HelloResponse, error)
//! func (s *GreeterGatewayServer) Chat(v1.Greeter_ChatServer) error   // always codes.Unimplemented
//! func RegisterGreeterHandlerGatewayServer(mux *runtime.ServeMux, svc GreeterHandler, opts ...connect_gateway.HandlerOption)
//! ```
//!
//! The output lands next to the Connect-generated code (package suffix
//! `connect`), so `GreeterHandler` resolves without an import.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use connect_gateway_gen::{config::GeneratorConfig, generator::generate_files, schema::load_schemas};
//!
//! let files = load_schemas(Path::new("greeter.yaml"))?;
//! for generated in generate_files(&files, &GeneratorConfig::default()) {
//!     generated.write_to(Path::new("gen"))?;
//! }
//! ```

mod classify;
mod comments;
mod file;
mod names;
mod output;
mod service;
mod templates;

pub use classify::*;
pub use comments::*;
pub use file::*;
pub use names::*;
pub use output::*;
pub use service::*;
pub use templates::*;
