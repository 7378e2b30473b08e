//! Type name resolution.
//!
//! A name is first resolved relative to the starting scope, walking its
//! qualifier segments through lookup chains. If that does not end on a
//! declaration, the search restarts from the lexical parent, and so on up to
//! the root. The innermost match wins; there is no ambiguity detection.

use crate::errors::ResolveError;
use crate::scope::{Binding, ResolvedType, ScopeId, TypeScope};
use slice2ts_common::QualifiedName;
use tracing::trace;

enum PathLookup<'a> {
    Found(ResolvedType<'a>),
    /// The qualifier resolved but the terminal name did not.
    MissingMember,
    /// A qualifier segment did not resolve to a module.
    MissingQualifier,
}

impl<'a> TypeScope<'a> {
    /// Resolve `type_name` as written inside `scope`.
    pub fn resolve(&self, scope: ScopeId, type_name: &str) -> Result<ResolvedType<'a>, ResolveError> {
        let name = QualifiedName::parse(type_name);

        let mut current = Some(if name.rooted { self.root() } else { scope });
        let mut qualifier_found = false;

        while let Some(start) = current {
            match self.lookup_path(start, &name) {
                PathLookup::Found(resolved) => {
                    trace!(
                        type_name,
                        from = self.module_path(scope),
                        declared_in = self.module_path(resolved.scope),
                        "resolved type"
                    );
                    return Ok(resolved);
                }
                PathLookup::MissingMember => qualifier_found = true,
                PathLookup::MissingQualifier => {}
            }

            if name.rooted {
                break;
            }
            current = self.get(start).parent;
        }

        if name.is_qualified() && !qualifier_found {
            Err(ResolveError::ModuleNotFound {
                module: name.qualifier_text(),
                type_name: type_name.to_string(),
            })
        } else {
            Err(ResolveError::TypeNotFound {
                type_name: type_name.to_string(),
            })
        }
    }

    fn lookup_path(&self, start: ScopeId, name: &QualifiedName<'_>) -> PathLookup<'a> {
        let mut scope = start;
        for segment in &name.qualifier {
            match self.lookup(scope, segment) {
                Some((_, Binding::Scope(child))) => scope = child,
                _ => return PathLookup::MissingQualifier,
            }
        }

        match self.lookup(scope, name.name) {
            Some((owner, Binding::Declaration(declaration))) => PathLookup::Found(ResolvedType {
                scope: owner,
                declaration,
            }),
            _ => PathLookup::MissingMember,
        }
    }
}
