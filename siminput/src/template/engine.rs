//! Strict variable substitution on top of minijinja.

use crate::context::ContextMap;
use crate::errors::RenderError;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde_json::Value;

/// Substitutes `namespace` into `content`, failing on any variable or
/// attribute path without a resolvable value.
///
/// Referenced paths are checked against the namespace before rendering so
/// the error can carry the exact variable name; the engine's strict
/// undefined mode backstops lookups that cannot be checked statically.
/// Text outside `{{ ... }}` markers is preserved bit-exact.
pub(crate) fn substitute(
    name: &str,
    content: &str,
    namespace: &ContextMap,
) -> Result<String, RenderError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    let template = env
        .template_from_str(content)
        .map_err(|err| classify(name, &err))?;

    let mut referenced: Vec<String> = template.undeclared_variables(true).into_iter().collect();
    referenced.sort();
    for variable in referenced {
        if !resolves(namespace, &variable) {
            return Err(RenderError::unresolved(name, variable));
        }
    }

    template.render(namespace).map_err(|err| classify(name, &err))
}

fn classify(name: &str, err: &minijinja::Error) -> RenderError {
    match err.kind() {
        ErrorKind::SyntaxError => RenderError::syntax(name, err.to_string()),
        _ => RenderError::engine(name, err.to_string()),
    }
}

/// Walks a dotted variable path through the namespace. Numeric segments
/// index arrays.
fn resolves(namespace: &ContextMap, path: &str) -> bool {
    let mut segments = path.split('.');
    let Some(first) = segments.next() else {
        return false;
    };
    let Some(mut value) = namespace.get(first) else {
        return false;
    };
    for segment in segments {
        let next = match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
            _ => None,
        };
        match next {
            Some(found) => value = found,
            None => return false,
        }
    }
    true
}
