//! Route discovery from compiled client source.
//!
//! The client build leaves a comment-delimited region (the router point)
//! listing every route registration and layout call:
//!
//! ```text
//! /* ROUTER POINT FOR SSR */RouterPoint(Home, true, '/');Header();/* END OF ROUTER POINT FOR SSR */
//! ```
//!
//! Each `;`-separated statement is either a registration call with three
//! positional arguments (handler, exact flag, pattern) or a bare call naming a
//! global handler. Statements of any other shape are skipped with a warning.

use thiserror::Error;

use crate::config::SsrConfig;
use crate::extract::types::{RouteDescriptor, RouteTable};

/// Comment opening the router point region.
pub const DEFAULT_START_MARKER: &str = "/* ROUTER POINT FOR SSR */";

/// Comment closing the router point region.
pub const DEFAULT_END_MARKER: &str = "/* END OF ROUTER POINT FOR SSR */";

/// Name of the registration call.
pub const DEFAULT_REGISTER_FN: &str = "RouterPoint";

/// Markers and callee that delimit and identify registrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterPointSyntax {
    pub start_marker: String,
    pub end_marker: String,
    pub register_fn: String,
}

impl Default for RouterPointSyntax {
    fn default() -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
            register_fn: DEFAULT_REGISTER_FN.to_string(),
        }
    }
}

impl From<&SsrConfig> for RouterPointSyntax {
    fn from(config: &SsrConfig) -> Self {
        Self {
            start_marker: config.start_marker.clone(),
            end_marker: config.end_marker.clone(),
            register_fn: config.register_fn.clone(),
        }
    }
}

/// Why a statement inside the router point was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{callee} expects 3 arguments, found {found}")]
    Arity { callee: String, found: usize },

    #[error("unterminated argument list")]
    Unterminated,

    #[error("'{0}' is not a valid handler name")]
    InvalidHandler(String),

    #[error("not a call expression")]
    NotACall,
}

/// A classified router point statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Route(RouteDescriptor),
    Global(String),
}

/// Return the text between the start marker and the first end marker after
/// it, or `None` when either marker is missing.
pub fn locate_region<'a>(source: &'a str, syntax: &RouterPointSyntax) -> Option<&'a str> {
    let start = source.find(&syntax.start_marker)? + syntax.start_marker.len();
    let rest = &source[start..];
    let end = rest.find(&syntax.end_marker)?;
    Some(&rest[..end])
}

/// Recover the route table from compiled source.
///
/// A missing router point yields an empty table: pre-rendering is simply off.
pub fn extract_routes(source: &str, syntax: &RouterPointSyntax) -> RouteTable {
    let mut table = RouteTable::new();

    let Some(region) = locate_region(source, syntax) else {
        tracing::debug!(
            start_marker = %syntax.start_marker,
            "No router point found, pre-rendering disabled"
        );
        return table;
    };

    for raw in region.split(';') {
        let statement = raw.trim();
        if statement.is_empty() || contains_keyword(statement, "function") {
            continue;
        }

        match parse_statement(statement, syntax) {
            Ok(Statement::Route(descriptor)) => table.insert_route(descriptor),
            Ok(Statement::Global(name)) => table.push_global(name),
            Err(error) => {
                tracing::warn!(statement = %statement, error = %error, "Skipping router point statement");
            }
        }
    }

    tracing::debug!(
        routes = table.routes().len(),
        globals = table.globals().len(),
        "Router point extracted"
    );
    table
}

/// Classify one statement.
pub fn parse_statement(statement: &str, syntax: &RouterPointSyntax) -> Result<Statement, RegistrationError> {
    let compact: String = statement.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(args_start) = find_call(&compact, &syntax.register_fn) {
        let args = split_arguments(&compact[args_start..])?;
        if args.len() != 3 {
            return Err(RegistrationError::Arity {
                callee: syntax.register_fn.clone(),
                found: args.len(),
            });
        }

        let handler = strip_quotes(args[0]);
        if !is_identifier(&handler) {
            return Err(RegistrationError::InvalidHandler(handler));
        }
        let route: String = args[2]
            .chars()
            .filter(|c| !matches!(c, '\'' | '"' | '`' | '}' | ';'))
            .collect();

        return Ok(Statement::Route(RouteDescriptor {
            handler,
            route,
            exact: parse_flag(args[1]),
        }));
    }

    let Some((callee, _)) = statement.split_once('(') else {
        return Err(RegistrationError::NotACall);
    };
    let callee = callee.trim();
    if !is_identifier(callee) {
        return Err(RegistrationError::InvalidHandler(callee.to_string()));
    }
    Ok(Statement::Global(callee.to_string()))
}

/// Whether `name` is a plain JavaScript-style identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Minified builds emit `!0` for `true`.
fn parse_flag(arg: &str) -> bool {
    matches!(arg, "true" | "!0")
}

fn strip_quotes(arg: &str) -> String {
    arg.chars().filter(|c| !matches!(c, '\'' | '"' | '`')).collect()
}

fn contains_keyword(statement: &str, keyword: &str) -> bool {
    statement.match_indices(keyword).any(|(at, _)| {
        let before = statement[..at].chars().next_back();
        let after = statement[at + keyword.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

/// Byte offset just past `callee(` when `callee` appears as a whole name.
fn find_call(compact: &str, callee: &str) -> Option<usize> {
    let needle = format!("{}(", callee);
    compact.match_indices(&needle).find_map(|(at, _)| {
        let before = compact[..at].chars().next_back();
        match before {
            Some(c) if is_ident_char(c) => None,
            _ => Some(at + needle.len()),
        }
    })
}

/// Split a call's arguments on top-level commas, up to the closing paren.
fn split_arguments(input: &str) -> Result<Vec<&str>, RegistrationError> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' if depth == 0 => {
                let last = &input[start..i];
                if !last.is_empty() || !args.is_empty() {
                    args.push(last);
                }
                return Ok(args);
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    Err(RegistrationError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            "var a=1;{}{}{}console.log(a);",
            DEFAULT_START_MARKER, body, DEFAULT_END_MARKER
        )
    }

    #[test]
    fn test_missing_markers_disable_extraction() {
        let syntax = RouterPointSyntax::default();
        assert!(extract_routes("RouterPoint(Home, true, '/');", &syntax).is_empty());

        let only_start = format!("{}RouterPoint(Home, true, '/');", DEFAULT_START_MARKER);
        assert!(extract_routes(&only_start, &syntax).is_empty());
    }

    #[test]
    fn test_registration_produces_descriptor() {
        let source = wrap("RouterPoint(Home, true, '/');RouterPoint(Blog, false, \"/blog\");");
        let table = extract_routes(&source, &RouterPointSyntax::default());

        assert_eq!(
            table.routes(),
            &[
                RouteDescriptor::new("Home", "/", true),
                RouteDescriptor::new("Blog", "/blog", false),
            ]
        );
        assert!(table.globals().is_empty());
    }

    #[test]
    fn test_whitespace_and_minified_flags() {
        let source = wrap("  RouterPoint ( About ,\n !0 , `/about` ) ;RouterPoint(Docs,!1,'/docs')");
        let table = extract_routes(&source, &RouterPointSyntax::default());

        assert_eq!(
            table.routes(),
            &[
                RouteDescriptor::new("About", "/about", true),
                RouteDescriptor::new("Docs", "/docs", false),
            ]
        );
    }

    #[test]
    fn test_globals_in_discovery_order() {
        let source = wrap("Header();RouterPoint(Home, true, '/');Footer();Header();");
        let table = extract_routes(&source, &RouterPointSyntax::default());

        assert_eq!(table.globals(), &["Header".to_string(), "Footer".to_string()]);
        assert_eq!(table.routes().len(), 1);
    }

    #[test]
    fn test_malformed_statements_are_skipped() {
        let source = wrap(
            "RouterPoint(Home, true);RouterPoint('a-b', true, '/x');RouterPoint(Open, true, '/o';\
             x = 5;a.b();function Foo(){return 1};RouterPoint(Ok, true, '/ok');",
        );
        let table = extract_routes(&source, &RouterPointSyntax::default());

        assert_eq!(table.routes(), &[RouteDescriptor::new("Ok", "/ok", true)]);
        assert!(table.globals().is_empty());
    }

    #[test]
    fn test_parse_statement_errors() {
        let syntax = RouterPointSyntax::default();
        assert_eq!(
            parse_statement("RouterPoint(Home, true)", &syntax),
            Err(RegistrationError::Arity {
                callee: "RouterPoint".into(),
                found: 2
            })
        );
        assert_eq!(
            parse_statement("RouterPoint(Home, true, '/'", &syntax),
            Err(RegistrationError::Unterminated)
        );
        assert_eq!(parse_statement("x = 5", &syntax), Err(RegistrationError::NotACall));
    }

    #[test]
    fn test_register_fn_must_be_whole_name() {
        let syntax = RouterPointSyntax::default();
        assert_eq!(
            parse_statement("MyRouterPoint(a, true, '/')", &syntax),
            Ok(Statement::Global("MyRouterPoint".into()))
        );
    }

    #[test]
    fn test_custom_syntax() {
        let syntax = RouterPointSyntax {
            start_marker: "//<routes>".into(),
            end_marker: "//</routes>".into(),
            register_fn: "route".into(),
        };
        let source = "//<routes>route(Shop, true, '/shop');Nav();//</routes>";
        let table = extract_routes(source, &syntax);

        assert_eq!(table.routes(), &[RouteDescriptor::new("Shop", "/shop", true)]);
        assert_eq!(table.globals(), &["Nav".to_string()]);
    }

    #[test]
    fn test_function_keyword_needs_word_boundary() {
        let source = wrap("functionList();function x(){};");
        let table = extract_routes(&source, &RouterPointSyntax::default());
        assert_eq!(table.globals(), &["functionList".to_string()]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Home"));
        assert!(is_identifier("_$page2"));
        assert!(!is_identifier("2page"));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier(""));
    }
}
