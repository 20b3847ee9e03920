//! Canonical textual serialization of routes.
//!
//! # Responsibilities
//! - Produce one deterministic byte form per logical route set
//! - Reject values that have no canonical rendering (non-finite numbers)
//!
//! # Design Decisions
//! - Serialization is a pure function of content; combined with the
//!   by-id sort upstream, set-equal inputs always yield identical bytes
//! - Numbers with integral values render without a fractional part so the
//!   same logical argument never has two spellings

use std::fmt::Write;

use thiserror::Error;

use crate::routes::types::{Arg, Backend, Route};

/// Error for route content that cannot be rendered canonically.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("route {route_id:?}: non-finite number argument cannot be serialized")]
    NonFiniteNumber { route_id: String },
}

/// Serialize a route sequence into its canonical text form.
///
/// One line per route, in the order given:
///
/// ```text
/// id: Pred("a") && Pred2() -> filter(1) -> "http://backend";
/// ```
pub fn serialize_routes(routes: &[Route]) -> Result<Vec<u8>, SerializeError> {
    let mut out = String::new();
    for route in routes {
        write_route(&mut out, route)?;
        out.push('\n');
    }
    Ok(out.into_bytes())
}

fn write_route(out: &mut String, route: &Route) -> Result<(), SerializeError> {
    out.push_str(&route.id);
    out.push_str(": ");

    if route.predicates.is_empty() {
        out.push('*');
    } else {
        for (i, predicate) in route.predicates.iter().enumerate() {
            if i > 0 {
                out.push_str(" && ");
            }
            out.push_str(&predicate.name);
            write_args(out, &route.id, &predicate.args)?;
        }
    }

    for filter in &route.filters {
        out.push_str(" -> ");
        out.push_str(&filter.name);
        write_args(out, &route.id, &filter.args)?;
    }

    out.push_str(" -> ");
    match &route.backend {
        Backend::Network(address) => write_quoted(out, address),
        Backend::Shunt => out.push_str("<shunt>"),
        Backend::Loopback => out.push_str("<loopback>"),
    }
    out.push(';');
    Ok(())
}

fn write_args(out: &mut String, route_id: &str, args: &[Arg]) -> Result<(), SerializeError> {
    out.push('(');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match arg {
            Arg::Str(s) => write_quoted(out, s),
            Arg::Num(n) => {
                if !n.is_finite() {
                    return Err(SerializeError::NonFiniteNumber {
                        route_id: route_id.to_string(),
                    });
                }
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    let _ = write!(out, "{}", *n as i64);
                } else {
                    let _ = write!(out, "{}", n);
                }
            }
            Arg::Bool(b) => {
                let _ = write!(out, "{}", b);
            }
        }
    }
    out.push(')');
    Ok(())
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::types::{Filter, Predicate};

    fn route(id: &str) -> Route {
        Route {
            id: id.into(),
            predicates: vec![],
            filters: vec![],
            backend: Backend::Shunt,
        }
    }

    #[test]
    fn empty_predicates_render_as_wildcard() {
        let bytes = serialize_routes(&[route("r1")]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "r1: * -> <shunt>;\n");
    }

    #[test]
    fn full_route_renders_predicates_filters_and_backend() {
        let r = Route {
            id: "api".into(),
            predicates: vec![
                Predicate {
                    name: "Path".into(),
                    args: vec![Arg::Str("/api".into())],
                },
                Predicate {
                    name: "Method".into(),
                    args: vec![Arg::Str("GET".into())],
                },
            ],
            filters: vec![Filter::new("setHeader", vec!["X-Id".into(), Arg::Num(3.0)])],
            backend: Backend::Network("http://10.0.0.1:8080".into()),
        };
        let bytes = serialize_routes(&[r]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "api: Path(\"/api\") && Method(\"GET\") -> setHeader(\"X-Id\", 3) -> \"http://10.0.0.1:8080\";\n"
        );
    }

    #[test]
    fn string_args_are_escaped() {
        let r = Route {
            id: "q".into(),
            predicates: vec![Predicate {
                name: "Header".into(),
                args: vec![Arg::Str("say \"hi\"\\".into())],
            }],
            filters: vec![],
            backend: Backend::Loopback,
        };
        let bytes = serialize_routes(&[r]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "q: Header(\"say \\\"hi\\\"\\\\\") -> <loopback>;\n"
        );
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        let mut r = route("n");
        r.filters = vec![Filter::new("limit", vec![Arg::Num(100.0), Arg::Num(0.5)])];
        let bytes = serialize_routes(&[r]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "n: * -> limit(100, 0.5) -> <shunt>;\n"
        );
    }

    #[test]
    fn non_finite_number_is_rejected() {
        let mut r = route("bad");
        r.filters = vec![Filter::new("limit", vec![Arg::Num(f64::NAN)])];
        let err = serialize_routes(&[r]).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
