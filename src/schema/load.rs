use super::types::{GoIdent, GoImportPath, Method, SchemaFile, Service, StreamingShape};
use crate::generator::go_camel_case;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// Serialized form of a schema file, as read from YAML or JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaFileDocument {
    pub path: String,
    #[serde(default)]
    pub package: String,
    pub go_package_name: String,
    pub go_import_path: String,
    #[serde(default)]
    pub generated_filename_prefix: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub services: Vec<ServiceDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceDocument {
    pub name: String,
    #[serde(default)]
    pub go_name: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub methods: Vec<MethodDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodDocument {
    pub name: String,
    #[serde(default)]
    pub go_name: Option<String>,
    pub input: TypeDocument,
    pub output: TypeDocument,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
    #[serde(default)]
    pub deprecated: bool,
}

/// A message type reference. A missing import path means the schema file's own package.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDocument {
    pub go_name: String,
    #[serde(default)]
    pub import_path: Option<String>,
}

/// Either a single file document or a `files` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaDocument {
    Many { files: Vec<SchemaFileDocument> },
    One(SchemaFileDocument),
}

impl SchemaFileDocument {
    /// Normalize into the generator's data model.
    pub fn into_schema_file(self) -> SchemaFile {
        let go_import_path = GoImportPath::new(self.go_import_path);
        let generated_filename_prefix = self
            .generated_filename_prefix
            .unwrap_or_else(|| default_filename_prefix(&self.path));
        let services = self
            .services
            .into_iter()
            .map(|service| service.into_service(&go_import_path))
            .collect();
        SchemaFile {
            path: self.path,
            package: self.package,
            go_package_name: self.go_package_name,
            go_import_path,
            generated_filename_prefix,
            deprecated: self.deprecated,
            services,
        }
    }
}

impl ServiceDocument {
    fn into_service(self, local: &GoImportPath) -> Service {
        let go_name = self.go_name.unwrap_or_else(|| go_camel_case(&self.name));
        Service {
            name: self.name,
            go_name,
            methods: self
                .methods
                .into_iter()
                .map(|method| method.into_method(local))
                .collect(),
            deprecated: self.deprecated,
        }
    }
}

impl MethodDocument {
    fn into_method(self, local: &GoImportPath) -> Method {
        let go_name = self.go_name.unwrap_or_else(|| go_camel_case(&self.name));
        Method {
            name: self.name,
            go_name,
            input: self.input.into_ident(local),
            output: self.output.into_ident(local),
            streaming: StreamingShape::from_flags(self.client_streaming, self.server_streaming),
            deprecated: self.deprecated,
        }
    }
}

impl TypeDocument {
    fn into_ident(self, local: &GoImportPath) -> GoIdent {
        let import_path = self
            .import_path
            .map(GoImportPath::new)
            .unwrap_or_else(|| local.clone());
        GoIdent {
            go_name: self.go_name,
            import_path,
        }
    }
}

fn default_filename_prefix(path: &str) -> String {
    path.strip_suffix(".proto").unwrap_or(path).to_string()
}

fn parse_document(file_path: &Path) -> anyhow::Result<SchemaDocument> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read schema: {}", file_path.display()))?;
    let is_yaml = matches!(
        file_path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let document = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse schema: {}", file_path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse schema: {}", file_path.display()))?
    };
    Ok(document)
}

/// Load every schema file described by a YAML or JSON document.
pub fn load_schemas(file_path: &Path) -> anyhow::Result<Vec<SchemaFile>> {
    let files = match parse_document(file_path)? {
        SchemaDocument::Many { files } => files,
        SchemaDocument::One(file) => vec![file],
    };
    Ok(files
        .into_iter()
        .map(SchemaFileDocument::into_schema_file)
        .collect())
}

/// Load a document that describes exactly one schema file.
pub fn load_schema(file_path: &Path) -> anyhow::Result<SchemaFile> {
    let mut files = load_schemas(file_path)?;
    if files.len() != 1 {
        anyhow::bail!(
            "Expected one schema file in {}, found {}",
            file_path.display(),
            files.len()
        );
    }
    files
        .pop()
        .ok_or_else(|| anyhow::anyhow!("Empty schema document: {}", file_path.display()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_schema_file_defaults() {
        let doc: SchemaFileDocument = serde_json::from_value(json!({
            "path": "greeter/v1/greeter.proto",
            "package": "greeter.v1",
            "go_package_name": "greeterv1",
            "go_import_path": "example.com/gen/greeter/v1",
            "services": [{
                "name": "Greeter",
                "methods": [{
                    "name": "say_hello",
                    "input": {"go_name": "HelloRequest"},
                    "output": {"go_name": "Empty", "import_path": "google.golang.org/protobuf/types/known/emptypb"},
                    "server_streaming": true
                }]
            }]
        }))
        .unwrap();
        let file = doc.into_schema_file();
        assert_eq!(file.generated_filename_prefix, "greeter/v1/greeter");
        assert!(!file.deprecated);

        let service = &file.services[0];
        assert_eq!(service.go_name, "Greeter");
        assert!(!service.deprecated);

        let method = &service.methods[0];
        assert_eq!(method.name, "say_hello");
        assert_eq!(method.go_name, "SayHello");
        assert_eq!(method.streaming, StreamingShape::ServerStreaming);
        assert_eq!(method.input.import_path.as_str(), "example.com/gen/greeter/v1");
        assert_eq!(
            method.output.import_path.as_str(),
            "google.golang.org/protobuf/types/known/emptypb"
        );
    }

    #[test]
    fn test_explicit_go_names_win() {
        let doc: SchemaFileDocument = serde_json::from_value(json!({
            "path": "a.proto",
            "go_package_name": "a",
            "go_import_path": "example.com/a",
            "generated_filename_prefix": "out/a",
            "services": [{
                "name": "svc",
                "go_name": "Service",
                "methods": []
            }]
        }))
        .unwrap();
        let file = doc.into_schema_file();
        assert_eq!(file.generated_filename_prefix, "out/a");
        assert_eq!(file.services[0].go_name, "Service");
        assert_eq!(file.package, "");
    }

    #[test]
    fn test_load_schemas_many() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemas.json");
        let doc = json!({
            "files": [
                {"path": "a.proto", "go_package_name": "a", "go_import_path": "x/a"},
                {"path": "b.proto", "go_package_name": "b", "go_import_path": "x/b"}
            ]
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        let files = load_schemas(&path).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].path, "b.proto");
        assert!(load_schema(&path).is_err());
    }

    #[test]
    fn test_load_schema_missing_file() {
        let err = load_schema(Path::new("/nonexistent/schema.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read schema"));
    }
}
