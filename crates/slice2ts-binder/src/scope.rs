//! Module scope tree.
//!
//! Each scope owns a local name table and two parent links:
//!
//! * `parent` is the lexical parent (the enclosing module). The resolver
//!   walks it outward when a name is not visible from the starting scope.
//! * `lookup_parent` is the table consulted when a local lookup misses.
//!   Normally it is the lexical parent. When a nested module reuses the simple
//!   name of an unrelated module visible from its enclosing module (e.g.
//!   `::Foo::Ice` while `::Ice` exists), it chains onto the shadowed module's
//!   scope instead, so names visible from `::Ice` stay visible from
//!   `::Foo::Ice` without touching the binding in `::Ice`'s parent.

use crate::errors::ResolveError;
use rustc_hash::FxHashMap;
use slice2ts_common::join_module_path;
use slice2ts_syntax::ModuleChild;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a name in a scope table refers to.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    /// A nested module.
    Scope(ScopeId),
    /// A type or constant declaration.
    Declaration(&'a ModuleChild),
}

/// A declaration together with the scope that declares it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedType<'a> {
    pub scope: ScopeId,
    pub declaration: &'a ModuleChild,
}

#[derive(Debug, Clone)]
pub struct Scope<'a> {
    /// `::` qualified module path; empty for the root.
    pub module: String,
    /// Lexical parent, `None` for the root.
    pub parent: Option<ScopeId>,
    /// Next table in the lookup chain, `None` for the root.
    pub lookup_parent: Option<ScopeId>,
    pub(crate) table: FxHashMap<String, Binding<'a>>,
}

impl<'a> Scope<'a> {
    pub fn get_local(&self, name: &str) -> Option<Binding<'a>> {
        self.table.get(name).copied()
    }

    /// True if `name` is bound in this scope's own table.
    pub fn has_own(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

/// The scope tree for one generation run.
#[derive(Debug, Clone)]
pub struct TypeScope<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> TypeScope<'a> {
    pub(crate) fn new() -> Self {
        TypeScope {
            scopes: vec![Scope {
                module: String::new(),
                parent: None,
                lookup_parent: None,
                table: FxHashMap::default(),
            }],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn get(&self, id: ScopeId) -> &Scope<'a> {
        &self.scopes[id.index()]
    }

    pub fn module_path(&self, id: ScopeId) -> &str {
        &self.get(id).module
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub(crate) fn alloc(
        &mut self,
        module: String,
        parent: ScopeId,
        lookup_parent: ScopeId,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            module,
            parent: Some(parent),
            lookup_parent: Some(lookup_parent),
            table: FxHashMap::default(),
        });
        id
    }

    pub(crate) fn set_lookup_parent(&mut self, scope: ScopeId, lookup_parent: ScopeId) {
        self.scopes[scope.index()].lookup_parent = Some(lookup_parent);
    }

    pub(crate) fn bind(&mut self, scope: ScopeId, name: &str, binding: Binding<'a>) {
        self.scopes[scope.index()]
            .table
            .insert(name.to_string(), binding);
    }

    /// Look `name` up through the lookup chain of `scope`.
    ///
    /// Returns the scope whose table holds the binding along with it.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, Binding<'a>)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.get(id);
            if let Some(binding) = scope.get_local(name) {
                return Some((id, binding));
            }
            current = scope.lookup_parent;
        }
        None
    }

    /// Nested module `name` declared directly in `scope`.
    pub fn child_scope(&self, scope: ScopeId, name: &str) -> Result<ScopeId, ResolveError> {
        match self.get(scope).get_local(name) {
            Some(Binding::Scope(child)) => Ok(child),
            _ => Err(ResolveError::ChildModuleNotFound {
                module: join_module_path(self.module_path(scope), name),
            }),
        }
    }

    /// Scope of a module by its `::` qualified path.
    pub fn scope_by_path(&self, module_path: &str) -> Option<ScopeId> {
        slice2ts_common::qualified::module_segments(module_path).try_fold(
            ScopeId::ROOT,
            |scope, segment| match self.get(scope).get_local(segment) {
                Some(Binding::Scope(child)) => Some(child),
                _ => None,
            },
        )
    }

    /// Fully-qualified name of a declaration resolved to `scope`.
    pub fn qualified_name(&self, resolved: &ResolvedType<'_>) -> String {
        join_module_path(self.module_path(resolved.scope), resolved.declaration.name())
    }
}
