use tracing::debug;

use super::classify::{dispatch, is_deprecated_method, is_deprecated_service, Dispatch};
use super::comments::CommentFragment;
use super::names::{method_server_name, procedure_path, unexported_go_name, ServiceNames};
use super::output::GeneratedFile;
use crate::schema::{GoImportPath, MethodRef, ServiceRef, StreamingShape};

/// Comment line appended after the doc comment of anything deprecated.
pub const DEPRECATED_NOTICE: &str = "// Deprecated: do not use.";

/// Error message returned by every streaming method of a generated adapter.
pub const STREAMING_NOT_SUPPORTED: &str =
    "streaming calls are not yet supported in the in-process transport";

/// Import paths the generated adapters call into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoPackages {
    pub context: GoImportPath,
    pub fmt: GoImportPath,
    pub codes: GoImportPath,
    pub status: GoImportPath,
    /// The connect-gateway runtime (`UnaryHandler`, `NewUnaryHandler`, `HandlerOption`).
    pub connect_gateway: GoImportPath,
    /// grpc-gateway runtime (`ServeMux`).
    pub runtime: GoImportPath,
}

impl GoPackages {
    pub fn new(connect_gateway: GoImportPath, runtime: GoImportPath) -> Self {
        GoPackages {
            context: GoImportPath::new("context"),
            fmt: GoImportPath::new("fmt"),
            codes: GoImportPath::new("google.golang.org/grpc/codes"),
            status: GoImportPath::new("google.golang.org/grpc/status"),
            connect_gateway,
            runtime,
        }
    }
}

fn generate_deprecated(g: &mut GeneratedFile) {
    g.p("//");
    g.p(DEPRECATED_NOTICE);
}

/// Emit the adapter type, constructor, methods and registration function for one service.
pub fn generate_service(g: &mut GeneratedFile, service: ServiceRef<'_>, packages: &GoPackages) {
    let file = service.file();
    let names = ServiceNames::new(&service.go_name);
    let deprecated = is_deprecated_service(&service);
    debug!(
        service = %service.full_name(),
        methods = service.methods.len(),
        deprecated,
        "generating service"
    );

    // Adapter type
    g.wrap_comments([
        CommentFragment::from(&names.gateway_server),
        " implements the gRPC server API for the ".into(),
        (&service.go_name).into(),
        " service.".into(),
    ]);
    if deprecated {
        generate_deprecated(g);
    }
    g.p(format!("type {} struct {{", names.gateway_server));
    let unimplemented = g.qualified_go_ident(&file.go_import_path.ident(&names.unimplemented_server));
    g.p(format!("\t{unimplemented}"));
    for method in service.methods().filter(|m| dispatch(m) == Dispatch::Unary) {
        let unary_handler = g.qualified_go_ident(&packages.connect_gateway.ident("UnaryHandler"));
        let input = g.qualified_go_ident(&method.input);
        let output = g.qualified_go_ident(&method.output);
        g.p(format!(
            "\t{} {unary_handler}[{input}, {output}]",
            unexported_go_name(&method.go_name)
        ));
    }
    g.p("}");
    g.blank();

    // Constructor
    g.wrap_comments([
        CommentFragment::from(&names.new_gateway_server),
        " constructs a Connect-Gateway gRPC server for the ".into(),
        (&service.go_name).into(),
        " service.".into(),
    ]);
    if deprecated {
        generate_deprecated(g);
    }
    let handler_option = g.qualified_go_ident(&packages.connect_gateway.ident("HandlerOption"));
    g.p(format!(
        "func {}(svc {}, opts ...{handler_option}) *{} {{",
        names.new_gateway_server, names.handler, names.gateway_server
    ));
    g.p(format!("\treturn &{}{{", names.gateway_server));
    for method in service.methods().filter(|m| dispatch(m) == Dispatch::Unary) {
        let path = procedure_path(&file.package, &service.name, &method.name);
        let new_unary_handler =
            g.qualified_go_ident(&packages.connect_gateway.ident("NewUnaryHandler"));
        g.p(format!(
            "\t\t{}: {new_unary_handler}(\"{path}\", svc.{}, opts...),",
            unexported_go_name(&method.go_name),
            method.go_name
        ));
    }
    g.p("\t}");
    g.p("}");
    g.blank();

    for method in service.methods() {
        generate_method(g, &names, method, packages);
        g.blank();
    }

    // Registration
    g.wrap_comments([
        CommentFragment::from(&names.register_gateway_server),
        " registers the Connect handlers for the ".into(),
        (&service.go_name).into(),
        " \"svc\" to \"mux\".".into(),
    ]);
    if deprecated {
        generate_deprecated(g);
    }
    let serve_mux = g.qualified_go_ident(&packages.runtime.ident("ServeMux"));
    g.p(format!(
        "func {}(mux *{serve_mux}, svc {}, opts ...{handler_option}) {{",
        names.register_gateway_server, names.handler
    ));
    let register_server = g.qualified_go_ident(&file.go_import_path.ident(&names.register_server));
    let context_todo = g.qualified_go_ident(&packages.context.ident("TODO"));
    g.p(format!(
        "\tif err := {register_server}({context_todo}(), mux, {}(svc, opts...)); err != nil {{",
        names.new_gateway_server
    ));
    let errorf = g.qualified_go_ident(&packages.fmt.ident("Errorf"));
    g.p(format!("\t\tpanic({errorf}(\"connect-gateway: %w\", err))"));
    g.p("\t}");
    g.p("}");
}

fn generate_method(
    g: &mut GeneratedFile,
    names: &ServiceNames,
    method: MethodRef<'_>,
    packages: &GoPackages,
) {
    let service = method.service();
    let file = service.file();
    let shape = method.streaming;
    debug!(method = %method.full_name(), %shape, "generating method");

    match dispatch(&method) {
        Dispatch::Unary => g.wrap_comments([
            CommentFragment::from(&method.go_name),
            " calls ".into(),
            method.full_name().into(),
            ".".into(),
        ]),
        Dispatch::Unsupported => g.wrap_comments([
            CommentFragment::from(&method.go_name),
            " rejects ".into(),
            method.full_name().into(),
            ": streaming calls are not supported.".into(),
        ]),
    }
    // Every doc comment under a deprecated service carries the notice.
    if is_deprecated_method(&method) || is_deprecated_service(&service) {
        generate_deprecated(g);
    }

    let receiver = format!("func (s *{})", names.gateway_server);
    match shape {
        StreamingShape::Unary => {
            let context = g.qualified_go_ident(&packages.context.ident("Context"));
            let input = g.qualified_go_ident(&method.input);
            let output = g.qualified_go_ident(&method.output);
            g.p(format!(
                "{receiver} {}(ctx {context}, req *{input}) (*{output}, error) {{",
                method.go_name
            ));
            g.p(format!(
                "\treturn s.{}(ctx, req)",
                unexported_go_name(&method.go_name)
            ));
            g.p("}");
        }
        StreamingShape::ServerStreaming => {
            let input = g.qualified_go_ident(&method.input);
            let stream = g.qualified_go_ident(
                &file
                    .go_import_path
                    .ident(method_server_name(&service.go_name, &method.go_name)),
            );
            g.p(format!(
                "{receiver} {}(*{input}, {stream}) error {{",
                method.go_name
            ));
            generate_streaming_not_supported(g, packages);
            g.p("}");
        }
        StreamingShape::ClientStreaming | StreamingShape::Bidirectional => {
            let stream = g.qualified_go_ident(
                &file
                    .go_import_path
                    .ident(method_server_name(&service.go_name, &method.go_name)),
            );
            g.p(format!("{receiver} {}({stream}) error {{", method.go_name));
            generate_streaming_not_supported(g, packages);
            g.p("}");
        }
    }
}

fn generate_streaming_not_supported(g: &mut GeneratedFile, packages: &GoPackages) {
    let status_error = g.qualified_go_ident(&packages.status.ident("Error"));
    let unimplemented = g.qualified_go_ident(&packages.codes.ident("Unimplemented"));
    g.p(format!(
        "\treturn {status_error}({unimplemented}, \"{STREAMING_NOT_SUPPORTED}\")"
    ));
}
