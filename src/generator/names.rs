//! Identifier derivation for generated Go code.

/// Go keywords; a sanitized package name must not collide with one.
const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

/// Convert a schema name into an exported Go identifier.
///
/// Follows the protobuf Go naming rules: `_x` and `.x` start a new word,
/// a leading `_` becomes `X`, other `.` become `_`.
///
/// # Example
///
/// ```rust
/// use connect_gateway_gen::generator::go_camel_case;
///
/// assert_eq!(go_camel_case("say_hello"), "SayHello");
/// assert_eq!(go_camel_case("_private"), "XPrivate");
/// ```
pub fn go_camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let next_is_lower = bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);
        if c == b'.' && next_is_lower {
            // ".x" starts a new word; drop the dot
        } else if c == b'.' {
            out.push('_');
        } else if c == b'_' && (i == 0 || bytes[i - 1] == b'.') {
            out.push('X');
        } else if c == b'_' && next_is_lower {
            // "_x" starts a new word; drop the underscore
        } else if c.is_ascii_digit() {
            out.push(char::from(c));
        } else if c.is_ascii() {
            out.push(char::from(c.to_ascii_uppercase()));
            while bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
                i += 1;
                out.push(char::from(bytes[i]));
            }
        } else {
            // Non-ASCII: copy the whole char through untouched.
            let ch = s[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }
        i += 1;
    }
    out
}

/// Lower-case the first character of an identifier, leaving the rest alone.
///
/// Works on chars, not bytes, so non-ASCII identifiers keep their shape.
pub fn unexported_go_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The procedure path the router compares against: `/{package}.{service}/{method}`.
///
/// The result is byte-exact; no normalization is applied.
pub fn procedure_path(package: &str, service: &str, method: &str) -> String {
    format!("/{package}.{service}/{method}")
}

fn is_go_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

fn is_go_digit(c: char) -> bool {
    c.is_numeric() && !c.is_alphabetic()
}

/// Turn an arbitrary string into a valid Go package identifier.
///
/// Anything other than a letter or digit becomes `_`. The result gets a `_`
/// prefix when it is a Go keyword or does not start with a letter, so
/// `_x` becomes `__x` and an empty input becomes `_`.
pub fn go_sanitized(s: &str) -> String {
    let out: String = s
        .chars()
        .map(|c| if is_go_letter(c) || is_go_digit(c) { c } else { '_' })
        .collect();
    let starts_with_letter = out.chars().next().is_some_and(is_go_letter);
    if !starts_with_letter || GO_KEYWORDS.contains(&out.as_str()) {
        return format!("_{out}");
    }
    out
}

/// Go package name implied by the last element of an import path.
pub fn base_package_name(import_path: &str) -> String {
    let base = import_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    go_sanitized(base)
}

/// Every identifier derived from one service's Go name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceNames {
    /// Connect handler interface, e.g. `GreeterHandler`.
    pub handler: String,
    /// Adapter type, e.g. `GreeterGatewayServer`.
    pub gateway_server: String,
    /// Adapter constructor, e.g. `NewGreeterGatewayServer`.
    pub new_gateway_server: String,
    /// Embedded gRPC base type, e.g. `UnimplementedGreeterServer`.
    pub unimplemented_server: String,
    /// Generated registration function, e.g. `RegisterGreeterHandlerGatewayServer`.
    pub register_gateway_server: String,
    /// grpc-gateway registration entry point, e.g. `RegisterGreeterHandlerServer`.
    pub register_server: String,
}

impl ServiceNames {
    pub fn new(service_go_name: &str) -> Self {
        let gateway_server = format!("{service_go_name}GatewayServer");
        ServiceNames {
            handler: format!("{service_go_name}Handler"),
            new_gateway_server: format!("New{gateway_server}"),
            gateway_server,
            unimplemented_server: format!("Unimplemented{service_go_name}Server"),
            register_gateway_server: format!("Register{service_go_name}HandlerGatewayServer"),
            register_server: format!("Register{service_go_name}HandlerServer"),
        }
    }
}

/// Per-method gRPC stream type, e.g. `Greeter_ChatServer`.
pub fn method_server_name(service_go_name: &str, method_go_name: &str) -> String {
    format!("{service_go_name}_{method_go_name}Server")
}
