//! Metadata directives understood by the TypeScript mapping.
//!
//! * `ts:type:<T>` replaces the computed type of a field, parameter,
//!   return value, sequence element or dictionary key/value.
//! * `ts:generic:<P>` adds `<P>` type parameters to the generated type.
//! * `deprecate` / `deprecate:<reason>` marks the declaration deprecated.

const TYPE_OVERRIDE_PREFIX: &str = "ts:type:";
const GENERIC_PREFIX: &str = "ts:generic:";
const DEPRECATE_PREFIX: &str = "deprecate";

fn directive<'a>(metadata: &'a [String], prefix: &str) -> Option<&'a str> {
    metadata
        .iter()
        .filter_map(|meta| meta.strip_prefix(prefix))
        .find(|value| !value.is_empty())
}

/// Explicit TypeScript type from `ts:type:<T>`.
pub fn type_override(metadata: &[String]) -> Option<&str> {
    directive(metadata, TYPE_OVERRIDE_PREFIX)
}

/// Type parameter list from `ts:generic:<P>`, rendered as `<P>`.
pub fn generic_parameters(metadata: &[String]) -> Option<String> {
    directive(metadata, GENERIC_PREFIX).map(|params| format!("<{params}>"))
}

/// Deprecation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deprecation<'a> {
    /// Explanation following `deprecate:`, if any.
    pub reason: Option<&'a str>,
}

pub fn deprecation(metadata: &[String]) -> Option<Deprecation<'_>> {
    metadata.iter().find_map(|meta| {
        let rest = meta.strip_prefix(DEPRECATE_PREFIX)?;
        if rest.is_empty() {
            return Some(Deprecation { reason: None });
        }
        let reason = rest.strip_prefix(':')?;
        Some(Deprecation {
            reason: Some(reason).filter(|reason| !reason.is_empty()),
        })
    })
}
