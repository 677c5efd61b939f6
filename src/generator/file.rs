use tracing::{debug, info};

use super::comments::CommentFragment;
use super::output::GeneratedFile;
use super::service::generate_service;
use crate::config::GeneratorConfig;
use crate::schema::{GoImportPath, SchemaFile};

/// Go package name of the generated adapter: the schema's package plus the configured suffix.
pub fn output_package_name(file: &SchemaFile, config: &GeneratorConfig) -> String {
    format!("{}{}", file.go_package_name, config.package_suffix)
}

/// Output path of the generated adapter.
///
/// `dir(prefix)/<output package>/<base(prefix)><extension>`, cleaned like Go's
/// `path.Join`; a pure function of the schema's filename prefix and package name.
pub fn output_filename(file: &SchemaFile, config: &GeneratorConfig) -> String {
    let prefix = file.generated_filename_prefix.replace('\\', "/");
    let package = output_package_name(file, config);
    let joined = clean_path(&format!(
        "{}/{package}/{}",
        path_dir(&prefix),
        path_base(&prefix)
    ));
    format!("{joined}{}", config.filename_extension)
}

/// Lexically clean a slash-separated path the way Go's `path.Clean` does.
fn clean_path(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last().copied() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }
    let cleaned = segments.join("/");
    match (rooted, cleaned.is_empty()) {
        (true, _) => format!("/{cleaned}"),
        (false, true) => ".".to_string(),
        (false, false) => cleaned,
    }
}

fn path_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean_path(&path[..=idx]),
        None => ".".to_string(),
    }
}

fn path_base(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Import path of the generated adapter's package.
pub fn output_import_path(file: &SchemaFile, config: &GeneratorConfig) -> GoImportPath {
    file.go_import_path.join(&output_package_name(file, config))
}

fn generate_preamble(g: &mut GeneratedFile, file: &SchemaFile, package_name: &str, config: &GeneratorConfig) {
    g.p(format!(
        "// Code generated by {}. DO NOT EDIT.",
        config.generator_name
    ));
    g.p("//");
    if file.deprecated {
        g.wrap_comments([
            CommentFragment::from(&file.path),
            " is a deprecated file.".into(),
        ]);
    } else {
        g.p(format!("// Source: {}", file.path));
    }
    g.blank();
    g.package_clause(package_name);
    g.blank();
}

/// Generate the adapter file for one schema file.
///
/// Returns `None` for a schema file without services; nothing is emitted and
/// nothing is imported for it.
pub fn generate_file(file: &SchemaFile, config: &GeneratorConfig) -> Option<GeneratedFile> {
    if file.services.is_empty() {
        debug!(path = %file.path, "no services, skipping");
        return None;
    }

    let package_name = output_package_name(file, config);
    let mut g = GeneratedFile::new(
        output_filename(file, config),
        output_import_path(file, config),
        config.comment_width,
    );
    g.import(&file.go_import_path);
    generate_preamble(&mut g, file, &package_name, config);

    let packages = config.go_packages();
    for (i, service) in file.services().enumerate() {
        if i > 0 {
            g.blank();
        }
        generate_service(&mut g, service, &packages);
    }

    info!(
        source = %file.path,
        output = %g.filename(),
        services = file.services.len(),
        "generated gateway adapter"
    );
    Some(g)
}

/// Generate adapters for every schema file, in order; files without services produce nothing.
pub fn generate_files(files: &[SchemaFile], config: &GeneratorConfig) -> Vec<GeneratedFile> {
    files
        .iter()
        .filter_map(|file| generate_file(file, config))
        .collect()
}
