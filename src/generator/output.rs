use askama::Template;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::comments::{wrap_comment, CommentFragment};
use super::names::base_package_name;
use super::templates::{GoFileTemplateData, Import};
use crate::error::GenerateError;
use crate::schema::{GoIdent, GoImportPath};

/// Names Go predeclares in the universe block; an import alias must not shadow them.
const GO_PREDECLARED: &[&str] = &[
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex128", "complex64", "copy", "delete", "error", "false", "float32", "float64", "imag",
    "int", "int16", "int32", "int64", "int8", "iota", "len", "make", "max", "min", "new", "nil",
    "panic", "print", "println", "real", "recover", "rune", "string", "true", "uint", "uint16",
    "uint32", "uint64", "uint8", "uintptr",
];

/// One output Go file being built.
///
/// Lines are appended in order and never rewritten. Identifiers from other
/// packages go through [`GeneratedFile::qualified_go_ident`], which records
/// the import and picks a stable, collision-free package name for it.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    filename: String,
    go_import_path: GoImportPath,
    comment_width: usize,
    lines: Vec<String>,
    package_line: Option<usize>,
    package_names: BTreeMap<GoImportPath, String>,
    used_package_names: HashSet<String>,
    manual_imports: BTreeSet<GoImportPath>,
}

impl GeneratedFile {
    pub fn new(
        filename: impl Into<String>,
        go_import_path: GoImportPath,
        comment_width: usize,
    ) -> Self {
        GeneratedFile {
            filename: filename.into(),
            go_import_path,
            comment_width,
            lines: Vec::new(),
            package_line: None,
            package_names: BTreeMap::new(),
            used_package_names: GO_PREDECLARED.iter().map(|s| s.to_string()).collect(),
            manual_imports: BTreeSet::new(),
        }
    }

    /// Output path, relative to the output root.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Import path of the package this file belongs to.
    pub fn go_import_path(&self) -> &GoImportPath {
        &self.go_import_path
    }

    /// All emitted lines, without the import block.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Append one line.
    pub fn p(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Append the package clause; the import block is rendered right after it.
    pub fn package_clause(&mut self, package_name: &str) {
        self.package_line = Some(self.lines.len());
        self.lines.push(format!("package {package_name}"));
    }

    /// Text to use for `ident` in this file, importing its package if needed.
    pub fn qualified_go_ident(&mut self, ident: &GoIdent) -> String {
        if ident.import_path == self.go_import_path {
            return ident.go_name.clone();
        }
        let package_name = self.package_name_for(&ident.import_path);
        format!("{package_name}.{}", ident.go_name)
    }

    /// Require an import even if nothing in the file references it.
    pub fn import(&mut self, import_path: &GoImportPath) {
        if *import_path != self.go_import_path {
            self.manual_imports.insert(import_path.clone());
        }
    }

    fn package_name_for(&mut self, import_path: &GoImportPath) -> String {
        if let Some(name) = self.package_names.get(import_path) {
            return name.clone();
        }
        let base = base_package_name(import_path.as_str());
        let mut name = base.clone();
        let mut suffix = 1;
        while self.used_package_names.contains(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }
        self.used_package_names.insert(name.clone());
        self.package_names.insert(import_path.clone(), name.clone());
        name
    }

    /// Append a word-wrapped doc comment built from `fragments`.
    pub fn wrap_comments<I>(&mut self, fragments: I)
    where
        I: IntoIterator<Item = CommentFragment>,
    {
        let fragments: Vec<CommentFragment> = fragments.into_iter().collect();
        let width = self.comment_width;
        let lines = wrap_comment(&fragments, width, |ident| self.qualified_go_ident(ident));
        self.lines.extend(lines);
    }

    /// Imports the rendered file will declare, sorted by path.
    ///
    /// Manual imports that nothing referenced come out as blank (`_`) imports.
    pub fn imports(&self) -> Vec<Import> {
        let mut imports: BTreeMap<&GoImportPath, String> = self
            .package_names
            .iter()
            .map(|(path, name)| (path, name.clone()))
            .collect();
        for path in &self.manual_imports {
            imports.entry(path).or_insert_with(|| "_".to_string());
        }
        imports
            .into_iter()
            .map(|(path, name)| Import {
                name,
                path: path.to_string(),
            })
            .collect()
    }

    /// Render the complete Go source.
    pub fn content(&self) -> Result<String, GenerateError> {
        let split = self.package_line.map_or(0, |idx| idx + 1);
        let (preamble, body) = self.lines.split_at(split);
        let imports = self.imports();
        GoFileTemplateData {
            preamble,
            imports: &imports,
            body,
        }
        .render()
        .map_err(|e| GenerateError::Render {
            filename: self.filename.clone(),
            message: e.to_string(),
        })
    }

    /// Write the rendered file below `out_dir`, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn write_to(&self, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let path = out_dir.join(&self.filename);
        let content = self.content()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerateError::Write {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(&path, content).map_err(|e| GenerateError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "wrote generated file");
        Ok(path)
    }
}
