use std::fmt;
use std::ops::Deref;

/// A Go import path such as `context` or `github.com/acme/api/greeter/v1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GoImportPath(String);

impl GoImportPath {
    pub fn new(path: impl Into<String>) -> Self {
        GoImportPath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an identifier that lives in this package.
    pub fn ident(&self, go_name: impl Into<String>) -> GoIdent {
        GoIdent {
            go_name: go_name.into(),
            import_path: self.clone(),
        }
    }

    /// Append a path segment, `path.Join` style.
    pub fn join(&self, segment: &str) -> GoImportPath {
        let base = self.0.trim_end_matches('/');
        if base.is_empty() {
            GoImportPath(segment.to_string())
        } else {
            GoImportPath(format!("{base}/{segment}"))
        }
    }
}

impl fmt::Display for GoImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GoImportPath {
    fn from(path: &str) -> Self {
        GoImportPath::new(path)
    }
}

/// A reference to a Go identifier plus the package it is declared in.
///
/// Message types are carried verbatim; the generator never resolves them
/// further than qualifying them with a package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoIdent {
    pub go_name: String,
    pub import_path: GoImportPath,
}

/// Calling shape of an RPC, derived from the two streaming flags in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingShape {
    Unary,
    ClientStreaming,
    ServerStreaming,
    Bidirectional,
}

impl StreamingShape {
    pub fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => StreamingShape::Unary,
            (false, true) => StreamingShape::ServerStreaming,
            (true, false) => StreamingShape::ClientStreaming,
            (true, true) => StreamingShape::Bidirectional,
        }
    }

    pub fn is_client_streaming(self) -> bool {
        matches!(
            self,
            StreamingShape::ClientStreaming | StreamingShape::Bidirectional
        )
    }

    pub fn is_server_streaming(self) -> bool {
        matches!(
            self,
            StreamingShape::ServerStreaming | StreamingShape::Bidirectional
        )
    }
}

impl fmt::Display for StreamingShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamingShape::Unary => "unary",
            StreamingShape::ClientStreaming => "client-streaming",
            StreamingShape::ServerStreaming => "server-streaming",
            StreamingShape::Bidirectional => "bidirectional",
        };
        f.write_str(s)
    }
}

/// An RPC declared on a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Name as written in the schema; used for the procedure path.
    pub name: String,
    /// Exported Go name of the method.
    pub go_name: String,
    pub input: GoIdent,
    pub output: GoIdent,
    pub streaming: StreamingShape,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Name as written in the schema; used for the procedure path.
    pub name: String,
    /// Exported Go name of the service.
    pub go_name: String,
    pub methods: Vec<Method>,
    pub deprecated: bool,
}

/// One schema source file and the services it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// Source path of the schema file, e.g. `greeter/v1/greeter.proto`.
    pub path: String,
    /// Schema package, e.g. `greeter.v1`.
    pub package: String,
    /// Go package name of the code generated for the schema itself.
    pub go_package_name: String,
    /// Go import path of the code generated for the schema itself.
    pub go_import_path: GoImportPath,
    /// Output path prefix without extension, e.g. `greeter/v1/greeter`.
    pub generated_filename_prefix: String,
    pub deprecated: bool,
    pub services: Vec<Service>,
}

impl SchemaFile {
    /// Services in declaration order, each carrying a borrowed link back to this file.
    pub fn services(&self) -> impl Iterator<Item = ServiceRef<'_>> + '_ {
        self.services
            .iter()
            .map(move |service| ServiceRef { file: self, service })
    }
}

/// A service together with a non-owning link to the file that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ServiceRef<'a> {
    file: &'a SchemaFile,
    service: &'a Service,
}

impl<'a> ServiceRef<'a> {
    pub fn file(&self) -> &'a SchemaFile {
        self.file
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = MethodRef<'a>> + 'a {
        let parent = *self;
        let service: &'a Service = self.service;
        service
            .methods
            .iter()
            .map(move |method| MethodRef { parent, method })
    }

    /// Fully-qualified schema name, e.g. `greeter.v1.Greeter`.
    pub fn full_name(&self) -> String {
        if self.file.package.is_empty() {
            self.service.name.clone()
        } else {
            format!("{}.{}", self.file.package, self.service.name)
        }
    }
}

impl Deref for ServiceRef<'_> {
    type Target = Service;

    fn deref(&self) -> &Service {
        self.service
    }
}

/// A method together with a non-owning link to its service.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'a> {
    parent: ServiceRef<'a>,
    method: &'a Method,
}

impl<'a> MethodRef<'a> {
    pub fn service(&self) -> ServiceRef<'a> {
        self.parent
    }

    /// Fully-qualified schema name, e.g. `greeter.v1.Greeter.SayHello`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.parent.full_name(), self.method.name)
    }
}

impl Deref for MethodRef<'_> {
    type Target = Method;

    fn deref(&self) -> &Method {
        self.method
    }
}
