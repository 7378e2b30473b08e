//! Rendering Slice type references as TypeScript types.
//!
//! The printer is pure: it never records anything. Whether a reference needs
//! its top-level namespace aliased is a function of the [`TypeSite`] and the
//! resolved declaration alone, so the usage analyzer and the emitter ask the
//! same question and get the same answer.

use once_cell::sync::Lazy;
use regex::Regex;
use slice2ts_binder::{ResolvedType, ScopeId, TypeScope};
use slice2ts_common::qualified::module_segments;
use slice2ts_common::{QualifiedName, escape, top_level_module};
use slice2ts_syntax::{DeclarationKind, ModuleChild};

use crate::errors::GenerateError;

/// `Foo`, `Foo*` and `Foo *` all name `Foo`; the star marks a proxy.
static PROXY_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(\s*\*)?$").expect("proxy reference regex is valid"));

/// Built-in key types that can back a native `Map`.
const PRIMITIVE_KEY_TYPES: &[&str] = &["bool", "byte", "short", "int", "float", "double", "string"];

pub(crate) const ALIAS_MARKER: char = '$';

/// TypeScript spelling of a Slice builtin, `None` for user types.
pub(crate) fn builtin_type(data_type: &str) -> Option<&'static str> {
    Some(match data_type {
        "bool" => "boolean",
        "string" => "string",
        "void" => "void",
        "byte" | "short" | "int" | "float" | "double" => "number",
        "long" => "Ice.Long",
        "LocalObject" => "object",
        _ => return None,
    })
}

/// Built-in value sentinels, resolved without a scope lookup.
fn sentinel_type(type_name: &str, is_proxy: bool) -> Option<&'static str> {
    match (type_name, is_proxy) {
        ("Object", true) => Some("Ice.Object"),
        ("Object" | "Value", _) => Some("Ice.Value"),
        _ => None,
    }
}

fn split_proxy(data_type: &str) -> (&str, bool) {
    match PROXY_REFERENCE.captures(data_type) {
        Some(captures) => {
            let name = captures.get(1).map_or(data_type, |m| m.as_str());
            (name, captures.get(2).is_some())
        }
        None => (data_type, false),
    }
}

/// Where a type reference is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// Field, parameter, return value, element or constant.
    Value,
    /// `extends` / `implements` clause; never nullable.
    Base,
}

/// Where a type reference was written and where its text is printed.
///
/// The two differ for members inherited from a base declared in another
/// module: the name resolves where the base declares it, but the printed
/// path has to make sense inside the derived type's namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeSite {
    pub declared_in: ScopeId,
    pub emitted_in: ScopeId,
}

impl TypeSite {
    pub(crate) fn local(scope: ScopeId) -> Self {
        TypeSite {
            declared_in: scope,
            emitted_in: scope,
        }
    }

    pub(crate) fn inherited(declared_in: ScopeId, emitted_in: ScopeId) -> Self {
        TypeSite {
            declared_in,
            emitted_in,
        }
    }

    /// User types are printed fully qualified when the reference was
    /// written in another module; its spelling is only meaningful there.
    fn is_external(self) -> bool {
        self.declared_in != self.emitted_in
    }
}

pub(crate) struct TypePrinter<'s, 'a> {
    scopes: &'s TypeScope<'a>,
    no_nullable_values: bool,
}

impl<'s, 'a> TypePrinter<'s, 'a> {
    pub(crate) fn new(scopes: &'s TypeScope<'a>, no_nullable_values: bool) -> Self {
        TypePrinter {
            scopes,
            no_nullable_values,
        }
    }

    pub(crate) fn print_data_type(
        &self,
        site: TypeSite,
        data_type: &str,
    ) -> Result<String, GenerateError> {
        match builtin_type(data_type) {
            Some(builtin) => Ok(builtin.to_string()),
            None => self.print_complex_type(site, data_type, Position::Value),
        }
    }

    pub(crate) fn print_complex_type(
        &self,
        site: TypeSite,
        data_type: &str,
        position: Position,
    ) -> Result<String, GenerateError> {
        let (type_name, is_proxy) = split_proxy(data_type);

        let (mut printed, is_class) = match sentinel_type(type_name, is_proxy) {
            Some(sentinel) => (sentinel.to_string(), true),
            None => {
                let resolved = self.scopes.resolve(site.declared_in, type_name)?;
                let is_class = resolved.declaration.kind() == DeclarationKind::Class;

                let printed = if self.needs_alias(site.emitted_in, &resolved) {
                    format!("{ALIAS_MARKER}{}", self.qualified_ts_path(&resolved))
                } else if site.is_external() {
                    self.qualified_ts_path(&resolved)
                } else {
                    QualifiedName::parse(type_name).to_ts_path()
                };
                (printed, is_class)
            }
        };

        if is_proxy {
            printed.push_str("Prx");
        }

        let nullable = is_proxy || (is_class && !self.no_nullable_values);
        if position == Position::Value && nullable {
            printed.push_str(" | null");
        }

        Ok(printed)
    }

    /// Top-level namespace that must be aliased for a reference to
    /// `data_type` at `site` to be unambiguous.
    pub(crate) fn alias_for(
        &self,
        site: TypeSite,
        data_type: &str,
    ) -> Result<Option<String>, GenerateError> {
        if builtin_type(data_type).is_some() {
            return Ok(None);
        }
        let (type_name, is_proxy) = split_proxy(data_type);
        if sentinel_type(type_name, is_proxy).is_some() {
            return Ok(None);
        }

        let resolved = self.scopes.resolve(site.declared_in, type_name)?;
        if !self.needs_alias(site.emitted_in, &resolved) {
            return Ok(None);
        }
        Ok(self.declared_top_level(&resolved).map(str::to_string))
    }

    /// True if the key type can back a native `Map`.
    pub(crate) fn is_native_key(&self, scope: ScopeId, key_type: &str) -> Result<bool, GenerateError> {
        if PRIMITIVE_KEY_TYPES.contains(&key_type) {
            return Ok(true);
        }
        if builtin_type(key_type).is_some() {
            return Ok(false);
        }
        let (type_name, _) = split_proxy(key_type);
        let resolved = self.scopes.resolve(scope, type_name)?;
        Ok(matches!(resolved.declaration, ModuleChild::Enum(_)))
    }

    /// The resolved type's top-level namespace is hidden inside the
    /// namespace of `scope` when `scope` sits inside a nested module of the
    /// same name, or when `scope` itself binds that name.
    fn needs_alias(&self, scope: ScopeId, resolved: &ResolvedType<'a>) -> bool {
        let Some(top) = self.declared_top_level(resolved) else {
            return false;
        };

        let current = self.scopes.module_path(scope);
        let nested_under_same_name = module_segments(current).skip(1).any(|segment| segment == top);

        nested_under_same_name || self.scopes.get(scope).has_own(top)
    }

    fn declared_top_level(&self, resolved: &ResolvedType<'a>) -> Option<&'s str> {
        top_level_module(self.scopes.module_path(resolved.scope))
    }

    fn qualified_ts_path(&self, resolved: &ResolvedType<'a>) -> String {
        let module = self.scopes.module_path(resolved.scope);
        module_segments(module)
            .chain(std::iter::once(resolved.declaration.name()))
            .map(|segment| escape(segment))
            .collect::<Vec<_>>()
            .join(".")
    }
}
