#![allow(clippy::unwrap_used, clippy::expect_used)]

use connect_gateway_gen::config::{config_for_schema, DEFAULT_CONFIG_FILE};
use connect_gateway_gen::generator::{generate_files, DEPRECATED_NOTICE, STREAMING_NOT_SUPPORTED};
use connect_gateway_gen::schema::{load_schema, load_schemas, StreamingShape};
use std::fs;
use std::path::Path;

const GREETER_YAML: &str = r#"
path: pkg/v1/greeter.proto
package: pkg.v1
go_package_name: pkgv1
go_import_path: example.com/gen/pkgv1
services:
  - name: Greeter
    methods:
      - name: SayHello
        input: { go_name: HelloRequest }
        output: { go_name: HelloResponse }
      - name: Chat
        input: { go_name: ChatMessage }
        output: { go_name: ChatMessage }
        client_streaming: true
        server_streaming: true
"#;

const MULTI_YAML: &str = r#"
files:
  - path: pkg/v1/types.proto
    package: pkg.v1
    go_package_name: pkgv1
    go_import_path: example.com/gen/pkgv1
  - path: pkg/v1/legacy.proto
    package: pkg.v1
    go_package_name: pkgv1
    go_import_path: example.com/gen/pkgv1
    deprecated: true
    services:
      - name: Legacy
        deprecated: true
        methods:
          - name: get_thing
            input: { go_name: GetThingRequest }
            output: { go_name: Thing }
            deprecated: true
          - name: watch_things
            input: { go_name: WatchRequest }
            output: { go_name: Thing }
            server_streaming: true
"#;

fn write_schema(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_greeter_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write_schema(dir.path(), "greeter.yaml", GREETER_YAML);

    let file = load_schema(&schema_path).unwrap();
    assert_eq!(file.services[0].methods[1].streaming, StreamingShape::Bidirectional);

    let config = config_for_schema(None, &schema_path).unwrap();
    let generated = generate_files(&[file], &config);
    assert_eq!(generated.len(), 1);

    let out_dir = dir.path().join("gen");
    let written = generated[0].write_to(&out_dir).unwrap();
    assert_eq!(
        written,
        out_dir.join("pkg/v1/pkgv1connect/greeter.connect.gw.go")
    );

    let content = fs::read_to_string(&written).unwrap();
    assert!(content.starts_with("// Code generated by protoc-gen-connect-gateway. DO NOT EDIT.\n"));
    assert!(content.contains("\npackage pkgv1connect\n"));
    assert!(content.contains("type GreeterGatewayServer struct {\n\tpkgv1.UnimplementedGreeterServer\n\tsayHello connect_gateway.UnaryHandler[pkgv1.HelloRequest, pkgv1.HelloResponse]\n}\n"));
    assert!(content.contains("func NewGreeterGatewayServer(svc GreeterHandler, opts ...connect_gateway.HandlerOption) *GreeterGatewayServer {"));
    assert!(content.contains("\"/pkg.v1.Greeter/SayHello\""));
    assert!(content.contains("\treturn s.sayHello(ctx, req)\n"));
    assert!(content.contains(&format!(
        "func (s *GreeterGatewayServer) Chat(pkgv1.Greeter_ChatServer) error {{\n\treturn status.Error(codes.Unimplemented, \"{STREAMING_NOT_SUPPORTED}\")\n}}\n"
    )));
    assert!(!content.contains("/pkg.v1.Greeter/Chat"));
    assert!(content.contains("func RegisterGreeterHandlerGatewayServer(mux *runtime.ServeMux, svc GreeterHandler, opts ...connect_gateway.HandlerOption) {"));
    assert!(content.contains("\t\tpanic(fmt.Errorf(\"connect-gateway: %w\", err))\n"));
    assert!(!content.contains(DEPRECATED_NOTICE));
}

#[test]
fn test_config_file_next_to_schema_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write_schema(dir.path(), "greeter.yaml", GREETER_YAML);
    fs::write(
        dir.path().join(DEFAULT_CONFIG_FILE),
        "package_suffix = \"gw\"\nfilename_extension = \".gw.go\"\n",
    )
    .unwrap();

    let config = config_for_schema(None, &schema_path).unwrap();
    let files = load_schemas(&schema_path).unwrap();
    let generated = generate_files(&files, &config);
    assert_eq!(generated[0].filename(), "pkg/v1/pkgv1gw/greeter.gw.go");
    assert!(generated[0].content().unwrap().contains("\npackage pkgv1gw\n"));
}

#[test]
fn test_multi_file_document_skips_files_without_services() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write_schema(dir.path(), "schemas.yml", MULTI_YAML);

    let files = load_schemas(&schema_path).unwrap();
    assert_eq!(files.len(), 2);

    let config = config_for_schema(None, &schema_path).unwrap();
    let generated = generate_files(&files, &config);
    assert_eq!(generated.len(), 1);
    assert_eq!(
        generated[0].filename(),
        "pkg/v1/pkgv1connect/legacy.connect.gw.go"
    );

    let content = generated[0].content().unwrap();
    assert!(content.contains("// pkg/v1/legacy.proto is a deprecated file.\n"));
    assert!(!content.contains("// Source:"));
    // Three service-level declarations plus both methods of the deprecated service
    assert_eq!(content.matches(DEPRECATED_NOTICE).count(), 5);
    assert!(content.contains("// GetThing calls pkg.v1.Legacy.get_thing.\n//\n// Deprecated: do not use.\nfunc (s *LegacyGatewayServer) GetThing("));
    assert!(content.contains("\"/pkg.v1.Legacy/get_thing\", svc.GetThing, opts...)"));
    assert!(content.contains("func (s *LegacyGatewayServer) WatchThings(*pkgv1.WatchRequest, pkgv1.Legacy_WatchThingsServer) error {"));
}

#[test]
fn test_json_schema_document() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{
        "path": "echo.proto",
        "package": "echo",
        "go_package_name": "echo",
        "go_import_path": "example.com/echo",
        "services": [{
            "name": "Echo",
            "methods": [{
                "name": "Echo",
                "input": {"go_name": "Msg"},
                "output": {"go_name": "Msg"}
            }]
        }]
    }"#;
    let schema_path = write_schema(dir.path(), "echo.json", json);
    let file = load_schema(&schema_path).unwrap();
    let generated = generate_files(&[file], &config_for_schema(None, &schema_path).unwrap());
    assert_eq!(generated[0].filename(), "echoconnect/echo.connect.gw.go");
    let content = generated[0].content().unwrap();
    assert!(content.contains("\techo: connect_gateway.NewUnaryHandler(\"/echo.Echo/Echo\", svc.Echo, opts...),\n"));
    assert!(content.contains("\techo \"example.com/echo\"\n"));
}

#[test]
fn test_invalid_schema_document_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write_schema(dir.path(), "broken.yaml", "services: [not, a, file]");
    let err = load_schemas(&schema_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse schema"));
}
