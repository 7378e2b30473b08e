//! Building the [`TypeScope`] from loaded modules.

use crate::errors::BindError;
use crate::scope::{Binding, ScopeId, TypeScope};
use slice2ts_common::join_module_path;
use slice2ts_common::qualified::module_segments;
use slice2ts_syntax::{LoadedModules, ModuleChild, ModuleDeclaration};
use tracing::{debug, debug_span, trace};

/// Fold every top-level module of every loaded file into one scope tree.
///
/// Reopening a module with the same fully-qualified path from any number of
/// files fills the same scope node. Shadowing links are computed only once
/// every module exists, so the result does not depend on the order of
/// `modules`.
pub fn build_scope(modules: &LoadedModules) -> Result<TypeScope<'_>, BindError> {
    let _span = debug_span!("build_scope", files = modules.len()).entered();

    let mut builder = ScopeBuilder {
        tree: TypeScope::new(),
    };

    for module in modules.iter() {
        for declaration in &module.parsed.modules {
            builder.declare_module(ScopeId::ROOT, declaration, &module.name)?;
        }
    }
    builder.link_shadowed_modules();

    debug!(scopes = builder.tree.len(), "scope tree built");
    Ok(builder.tree)
}

struct ScopeBuilder<'a> {
    tree: TypeScope<'a>,
}

impl<'a> ScopeBuilder<'a> {
    fn declare_module(
        &mut self,
        parent: ScopeId,
        declaration: &'a ModuleDeclaration,
        file: &str,
    ) -> Result<(), BindError> {
        let scope = self.module_scope(parent, &declaration.name, file)?;

        for child in &declaration.content {
            match child {
                ModuleChild::Module(nested) => self.declare_module(scope, nested, file)?,
                ModuleChild::ClassForward(_) | ModuleChild::InterfaceForward(_) => {}
                _ => self.declare(scope, child, file)?,
            }
        }

        Ok(())
    }

    /// Scope to fill for module `name` declared in `parent`: the existing node
    /// when the module is being reopened, a fresh one otherwise.
    fn module_scope(
        &mut self,
        parent: ScopeId,
        name: &str,
        file: &str,
    ) -> Result<ScopeId, BindError> {
        let module = join_module_path(self.tree.module_path(parent), name);

        match self.tree.get(parent).get_local(name) {
            None => {}
            Some(Binding::Scope(existing)) => {
                trace!(module = %module, file, "reopening module");
                return Ok(existing);
            }
            Some(Binding::Declaration(existing)) => {
                return Err(BindError::NameConflict {
                    qualified_name: module,
                    file: file.to_string(),
                    existing: existing.kind(),
                    declared: slice2ts_syntax::DeclarationKind::Module,
                });
            }
        }

        let scope = self.tree.alloc(module, parent, parent);
        self.tree.bind(parent, name, Binding::Scope(scope));
        Ok(scope)
    }

    /// Chain each module onto the module it shadows: the scope its name
    /// resolves to from the enclosing module, not counting itself.
    ///
    /// The shadowed scope is always shallower than the shadowing one, so
    /// linking shallow modules first means every chain walked here is final.
    fn link_shadowed_modules(&mut self) {
        let mut order: Vec<ScopeId> = (1..self.tree.len() as u32).map(ScopeId).collect();
        order.sort_by_key(|&id| module_segments(self.tree.module_path(id)).count());

        for id in order {
            let scope = self.tree.get(id);
            let Some(parent) = scope.parent else {
                continue;
            };
            let Some(name) = module_segments(&scope.module).last().map(str::to_string) else {
                continue;
            };
            let Some(outer) = self.tree.get(parent).lookup_parent else {
                continue;
            };

            if let Some((_, Binding::Scope(shadowed))) = self.tree.lookup(outer, &name) {
                debug!(
                    module = self.tree.module_path(id),
                    shadowed = self.tree.module_path(shadowed),
                    "module shadows a visible module of the same name"
                );
                self.tree.set_lookup_parent(id, shadowed);
            }
        }
    }

    fn declare(
        &mut self,
        scope: ScopeId,
        child: &'a ModuleChild,
        file: &str,
    ) -> Result<(), BindError> {
        let name = child.name();

        match self.tree.get(scope).get_local(name) {
            None => {}
            Some(Binding::Declaration(_)) => {
                return Err(BindError::DuplicateDeclaration {
                    qualified_name: join_module_path(self.tree.module_path(scope), name),
                    file: file.to_string(),
                });
            }
            Some(Binding::Scope(_)) => {
                return Err(BindError::NameConflict {
                    qualified_name: join_module_path(self.tree.module_path(scope), name),
                    file: file.to_string(),
                    existing: slice2ts_syntax::DeclarationKind::Module,
                    declared: child.kind(),
                });
            }
        }

        self.tree.bind(scope, name, Binding::Declaration(child));
        Ok(())
    }
}
