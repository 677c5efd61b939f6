use askama::Template;

/// One line of the generated `import ( ... )` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Package name the file refers to the import by, or `_` for a blank import
    pub name: String,
    /// Import path
    pub path: String,
}

/// Template data for a complete generated Go file
///
/// The import block sits between the preamble (which ends with the package
/// clause) and the body.
#[derive(Template)]
#[template(path = "generated_file.go.txt", escape = "none")]
pub struct GoFileTemplateData<'a> {
    /// Lines up to and including the package clause
    pub preamble: &'a [String],
    /// Imports, already sorted by path
    pub imports: &'a [Import],
    /// Everything after the package clause
    pub body: &'a [String],
}
