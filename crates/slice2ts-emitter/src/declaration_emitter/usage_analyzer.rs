//! Alias pre-pass.
//!
//! Walks every type reference the emitter will print for one file and
//! records the top-level namespaces that must be aliased (`import $X = X;`)
//! because they are hidden at the point of reference. The emitter needs the
//! full set before it writes the first declaration.

use indexmap::IndexSet;
use slice2ts_binder::ScopeId;
use slice2ts_syntax::metadata::type_override;
use slice2ts_syntax::{ModuleChild, ModuleDeclaration, OperationDeclaration};
use tracing::trace;

use super::GenerateContext;
use super::hierarchy::{inheritance_chain, interface_operations};
use super::type_printer::{TypePrinter, TypeSite};
use crate::errors::GenerateError;

pub(crate) struct UsageAnalyzer<'c, 'a> {
    ctx: &'c GenerateContext<'a>,
    printer: &'c TypePrinter<'a, 'a>,
    aliases: IndexSet<String>,
}

impl<'c, 'a> UsageAnalyzer<'c, 'a> {
    pub(crate) fn new(ctx: &'c GenerateContext<'a>, printer: &'c TypePrinter<'a, 'a>) -> Self {
        UsageAnalyzer {
            ctx,
            printer,
            aliases: IndexSet::new(),
        }
    }

    /// Namespaces to alias, in first-use order.
    pub(crate) fn analyze(
        mut self,
        modules: &'a [ModuleDeclaration],
    ) -> Result<IndexSet<String>, GenerateError> {
        let root = self.ctx.scopes.root();
        for module in modules {
            let scope = self.ctx.scopes.child_scope(root, &module.name)?;
            self.visit_module(scope, module)?;
        }
        Ok(self.aliases)
    }

    fn visit_module(
        &mut self,
        scope: ScopeId,
        module: &'a ModuleDeclaration,
    ) -> Result<(), GenerateError> {
        for child in &module.content {
            if child.kind().is_forward() || self.ctx.is_ignored(scope, child.name()) {
                continue;
            }
            self.visit_child(scope, child)?;
        }
        Ok(())
    }

    fn visit_child(&mut self, scope: ScopeId, child: &'a ModuleChild) -> Result<(), GenerateError> {
        match child {
            ModuleChild::Module(nested) => {
                let nested_scope = self.ctx.scopes.child_scope(scope, &nested.name)?;
                self.visit_module(nested_scope, nested)?;
            }
            ModuleChild::Class(class) => {
                if let Some(parent) = &class.extends {
                    self.note(TypeSite::local(scope), parent)?;
                }
                self.visit_data_members(scope, child)?;
                if class.local {
                    for operation in class.operations() {
                        self.visit_operation(TypeSite::local(scope), operation)?;
                    }
                }
            }
            ModuleChild::Exception(exception) => {
                if let Some(parent) = &exception.extends {
                    self.note(TypeSite::local(scope), parent)?;
                }
                self.visit_data_members(scope, child)?;
            }
            ModuleChild::Interface(interface) => {
                for parent in &interface.extends {
                    self.note(TypeSite::local(scope), parent)?;
                }
                for inherited in interface_operations(self.ctx.scopes, scope, interface)? {
                    let site = TypeSite::inherited(inherited.scope, scope);
                    self.visit_operation(site, inherited.operation)?;
                }
            }
            ModuleChild::Struct(structure) => {
                for field in &structure.fields {
                    self.note_value(TypeSite::local(scope), &field.data_type, &field.metadata)?;
                }
            }
            ModuleChild::Sequence(sequence) => {
                let overridden = type_override(&sequence.metadata).is_some()
                    || type_override(&sequence.data_type_metadata).is_some();
                if !overridden && sequence.data_type != "byte" {
                    self.note(TypeSite::local(scope), &sequence.data_type)?;
                }
            }
            ModuleChild::Dictionary(dictionary) => {
                let site = TypeSite::local(scope);
                self.note_value(site, &dictionary.key_type, &dictionary.key_type_metadata)?;
                self.note_value(site, &dictionary.value_type, &dictionary.value_type_metadata)?;
            }
            ModuleChild::Const(constant) => {
                self.note_value(TypeSite::local(scope), &constant.data_type, &constant.metadata)?;
            }
            ModuleChild::Enum(_) | ModuleChild::ClassForward(_) | ModuleChild::InterfaceForward(_) => {}
        }
        Ok(())
    }

    /// Constructor parameters walk the whole chain; own fields are its tail.
    fn visit_data_members(
        &mut self,
        scope: ScopeId,
        declaration: &'a ModuleChild,
    ) -> Result<(), GenerateError> {
        for member in inheritance_chain(self.ctx.scopes, scope, declaration)? {
            for field in member.data_members() {
                let site = TypeSite::inherited(member.scope, scope);
                self.note_value(site, &field.data_type, &field.metadata)?;
            }
        }
        Ok(())
    }

    fn visit_operation(
        &mut self,
        site: TypeSite,
        operation: &'a OperationDeclaration,
    ) -> Result<(), GenerateError> {
        self.note_value(site, &operation.return_type, &operation.metadata)?;
        for parameter in &operation.parameters {
            self.note_value(site, &parameter.data_type, &parameter.metadata)?;
        }
        Ok(())
    }

    fn note_value(
        &mut self,
        site: TypeSite,
        data_type: &str,
        metadata: &[String],
    ) -> Result<(), GenerateError> {
        if type_override(metadata).is_some() {
            return Ok(());
        }
        self.note(site, data_type)
    }

    fn note(&mut self, site: TypeSite, data_type: &str) -> Result<(), GenerateError> {
        if let Some(namespace) = self.printer.alias_for(site, data_type)? {
            if self.aliases.insert(namespace) {
                trace!(
                    data_type,
                    from = self.ctx.scopes.module_path(site.emitted_in),
                    "namespace needs alias"
                );
            }
        }
        Ok(())
    }
}
