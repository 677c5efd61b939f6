//! # connect-gateway-gen
//!
//! Generates Go adapters that let a [grpc-gateway](https://github.com/grpc-ecosystem/grpc-gateway)
//! `runtime.ServeMux` dispatch straight into [Connect](https://connectrpc.com) handlers,
//! without a gRPC server in between.
//!
//! ## Overview
//!
//! Input is a normalized service schema: files, services, methods, message
//! type references and streaming/deprecation flags. Output is one Go file per
//! schema file that declares services. Each service gets:
//!
//! - an adapter type implementing the gRPC server interface,
//! - a constructor wiring every unary method to a `connect_gateway.UnaryHandler`,
//! - one method per RPC (unary methods forward, streaming methods return
//!   `codes.Unimplemented`),
//! - a `Register<Service>HandlerGatewayServer` function for the mux.
//!
//! Generation is deterministic and side-effect free; the same schema always
//! yields byte-identical output at the same path.
//!
//! ## Modules
//!
//! - **[`schema`]** - the schema data model and a YAML/JSON loader
//! - **[`generator`]** - identifier derivation, comment wrapping, emission
//! - **[`config`]** - output settings (comment width, package suffix, import paths)
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`error`]** - rendering and writing errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use connect_gateway_gen::config::config_for_schema;
//! use connect_gateway_gen::generator::generate_files;
//! use connect_gateway_gen::schema::load_schemas;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema_path = Path::new("greeter.yaml");
//! let config = config_for_schema(None, schema_path)?;
//! let files = load_schemas(schema_path)?;
//! for generated in generate_files(&files, &config) {
//!     generated.write_to(Path::new("gen"))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod schema;

pub use config::GeneratorConfig;
pub use error::GenerateError;
pub use generator::{generate_file, generate_files, GeneratedFile};
pub use schema::{load_schema, load_schemas, SchemaFile};
