//! `.d.ts` generation for one input file.
//!
//! Output layout:
//!
//! ```text
//! import { Ice } from "ice";
//! import { Other } from "../Other";
//!
//! import $Ice = Ice;
//!
//! declare module "./Demo.ns" {
//!     namespace Demo {
//!         ...
//!     }
//! }
//! export { Demo } from "./Demo.ns";
//! ```
//!
//! Alias imports are known before anything is written: a
//! [`usage_analyzer::UsageAnalyzer`] pass walks the same references the
//! emitter prints and collects them first.

mod hierarchy;
pub(crate) mod type_printer;
mod usage_analyzer;

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use slice2ts_binder::{ScopeId, TypeScope};
use slice2ts_common::{escape, join_module_path};
use slice2ts_syntax::metadata::{deprecation, generic_parameters, type_override};
use slice2ts_syntax::{
    ClassDeclaration, DictionaryDeclaration, EnumDeclaration, ExceptionDeclaration,
    FieldDeclaration, InterfaceDeclaration, LoadedModules, ModuleChild, ModuleDeclaration,
    OperationDeclaration, SequenceDeclaration, StructDeclaration,
};
use tracing::{debug, debug_span};

use crate::errors::GenerateError;
use crate::imports::plan_imports;
use crate::namespaces::{NamespaceFilePaths, namespace_module_specifier};
use crate::source_writer::SourceWriter;
use hierarchy::{inheritance_chain, interface_operations};
use type_printer::{ALIAS_MARKER, Position, TypePrinter, TypeSite};
use usage_analyzer::UsageAnalyzer;

/// Per-run switches of the typings generator.
#[derive(Debug, Clone, Default)]
pub struct TypingsOptions {
    /// Fully-qualified names (`Demo::Internal`) whose declarations are
    /// skipped. A leading `::` is optional.
    pub ignore: FxHashSet<String>,
    /// Import built-in Slice modules from their own files rather than the
    /// `ice` package.
    pub ice_imports: bool,
    /// Don't add `| null` to class-typed values.
    pub no_nullable_values: bool,
}

impl TypingsOptions {
    pub fn with_ignored<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore.extend(
            names
                .into_iter()
                .map(|name| normalize_qualified(name.as_ref()).to_string()),
        );
        self
    }
}

fn normalize_qualified(name: &str) -> &str {
    let name = name.trim();
    name.strip_prefix("::").unwrap_or(name)
}

/// Shared, read-only inputs for generating any file of one run.
#[derive(Debug, Clone, Copy)]
pub struct GenerateContext<'a> {
    pub scopes: &'a TypeScope<'a>,
    pub modules: &'a LoadedModules,
    pub namespace_file_paths: &'a NamespaceFilePaths,
    pub options: &'a TypingsOptions,
}

impl<'a> GenerateContext<'a> {
    pub(crate) fn is_ignored(&self, scope: ScopeId, name: &str) -> bool {
        if self.options.ignore.is_empty() {
            return false;
        }
        let qualified = join_module_path(self.scopes.module_path(scope), name);
        self.options.ignore.contains(normalize_qualified(&qualified))
    }
}

/// Declaration text for input file `file_name`.
///
/// Any failure is reported as [`GenerateError::InFile`].
pub fn generate_typings(ctx: &GenerateContext<'_>, file_name: &str) -> Result<String, GenerateError> {
    let _span = debug_span!("generate_typings", file = file_name).entered();
    DeclarationEmitter::new(ctx)
        .emit(file_name)
        .map_err(|err| err.in_file(file_name))
}

struct DeclarationEmitter<'c, 'a> {
    ctx: &'c GenerateContext<'a>,
    printer: TypePrinter<'a, 'a>,
    writer: SourceWriter,
}

impl<'c, 'a> DeclarationEmitter<'c, 'a> {
    fn new(ctx: &'c GenerateContext<'a>) -> Self {
        DeclarationEmitter {
            ctx,
            printer: TypePrinter::new(ctx.scopes, ctx.options.no_nullable_values),
            writer: SourceWriter::with_capacity(4096),
        }
    }

    fn emit(mut self, file_name: &str) -> Result<String, GenerateError> {
        let loaded = self
            .ctx
            .modules
            .get(file_name)
            .ok_or_else(|| GenerateError::ModuleNotLoaded {
                name: file_name.to_string(),
            })?;

        let imports = plan_imports(file_name, self.ctx.modules, self.ctx.options.ice_imports)?;
        let aliases = UsageAnalyzer::new(self.ctx, &self.printer).analyze(&loaded.parsed.modules)?;
        debug!(aliases = aliases.len(), "usage analysis done");

        for line in imports.lines() {
            self.writer.line(line);
        }

        self.emit_aliases(&aliases);

        for module in &loaded.parsed.modules {
            self.writer.blank_line();
            self.emit_top_level_module(file_name, module)?;
        }

        Ok(self.writer.finish())
    }

    fn emit_aliases(&mut self, aliases: &IndexSet<String>) {
        if aliases.is_empty() {
            return;
        }
        self.writer.blank_line();
        for namespace in aliases {
            let namespace = escape(namespace);
            self.writer
                .line(&format!("import {ALIAS_MARKER}{namespace} = {namespace};"));
        }
    }

    fn emit_top_level_module(
        &mut self,
        file_name: &str,
        module: &ModuleDeclaration,
    ) -> Result<(), GenerateError> {
        let namespace_file = self
            .ctx
            .namespace_file_paths
            .get(&module.name)
            .ok_or_else(|| GenerateError::MissingNamespaceFile {
                module: module.name.clone(),
            })?;
        let specifier = namespace_module_specifier(file_name, namespace_file);
        let scope = self.ctx.scopes.child_scope(self.ctx.scopes.root(), &module.name)?;

        self.writer.line(&format!("declare module \"{specifier}\" {{"));
        self.writer.increase_indent();
        self.emit_module(scope, module)?;
        self.writer.decrease_indent();
        self.writer.line("}");
        self.writer.line(&format!(
            "export {{ {} }} from \"{specifier}\";",
            escape(&module.name)
        ));
        Ok(())
    }

    fn emit_module(&mut self, scope: ScopeId, module: &ModuleDeclaration) -> Result<(), GenerateError> {
        self.emit_doc_comment(module.doc.as_deref(), &module.metadata);
        self.writer
            .line(&format!("namespace {} {{", escape(&module.name)));
        self.writer.increase_indent();

        let mut first = true;
        for child in &module.content {
            if child.kind().is_forward() || self.ctx.is_ignored(scope, child.name()) {
                continue;
            }
            if !first {
                self.writer.blank_line();
            }
            first = false;
            self.emit_module_child(scope, child)?;
        }

        self.writer.decrease_indent();
        self.writer.line("}");
        Ok(())
    }

    fn emit_module_child(&mut self, scope: ScopeId, child: &ModuleChild) -> Result<(), GenerateError> {
        match child {
            ModuleChild::Module(nested) => {
                let nested_scope = self.ctx.scopes.child_scope(scope, &nested.name)?;
                self.emit_module(nested_scope, nested)
            }
            ModuleChild::Class(class) => self.emit_class(scope, child, class),
            ModuleChild::Interface(interface) => self.emit_interface(scope, interface),
            ModuleChild::Exception(exception) => self.emit_exception(scope, child, exception),
            ModuleChild::Struct(structure) => self.emit_struct(scope, structure),
            ModuleChild::Enum(enumeration) => {
                self.emit_enum(enumeration);
                Ok(())
            }
            ModuleChild::Sequence(sequence) => self.emit_sequence(scope, sequence),
            ModuleChild::Dictionary(dictionary) => self.emit_dictionary(scope, dictionary),
            ModuleChild::Const(constant) => {
                let data_type =
                    self.value_type(TypeSite::local(scope), &constant.data_type, &constant.metadata)?;
                self.emit_doc_comment(constant.doc.as_deref(), &constant.metadata);
                self.writer.line(&format!(
                    "const {}: {data_type};",
                    escape(&constant.name)
                ));
                Ok(())
            }
            ModuleChild::ClassForward(_) | ModuleChild::InterfaceForward(_) => Ok(()),
        }
    }

    fn emit_doc_comment(&mut self, doc: Option<&str>, metadata: &[String]) {
        let deprecated = deprecation(metadata);
        if doc.is_none() && deprecated.is_none() {
            return;
        }

        let mut lines: Vec<String> = doc
            .map(|doc| doc.lines().map(str::to_string).collect())
            .unwrap_or_default();

        if let Some(deprecated) = deprecated {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(match deprecated.reason {
                Some(reason) => format!("@deprecated {reason}"),
                None => "@deprecated".to_string(),
            });
        }

        self.writer.line("/**");
        for line in &lines {
            let line = line.trim_end();
            if line.is_empty() {
                self.writer.line(" *");
            } else {
                self.writer.line(&format!(" * {line}"));
            }
        }
        self.writer.line(" */");
    }

    // =========================================================================
    // Classes and exceptions
    // =========================================================================

    fn emit_class(
        &mut self,
        scope: ScopeId,
        child: &ModuleChild,
        class: &ClassDeclaration,
    ) -> Result<(), GenerateError> {
        if !class.local && class.operations().next().is_some() {
            return Err(GenerateError::UnsupportedConstruct {
                construct: "Class operations",
                qualified_name: join_module_path(self.ctx.scopes.module_path(scope), &class.name),
            });
        }

        let base = match &class.extends {
            Some(parent) => Some(self.printer.print_complex_type(TypeSite::local(scope), parent, Position::Base)?),
            None if class.local => None,
            None => Some("Ice.Value".to_string()),
        };
        let params = generic_parameters(&class.metadata).unwrap_or_default();
        let extends = base.map(|base| format!(" extends {base}")).unwrap_or_default();

        self.emit_doc_comment(class.doc.as_deref(), &class.metadata);
        self.writer
            .line(&format!("class {}{params}{extends} {{", escape(&class.name)));
        self.writer.increase_indent();

        self.emit_constructor(scope, child)?;
        for field in class.fields() {
            self.emit_field(scope, field)?;
        }
        for operation in class.operations() {
            self.emit_local_operation(TypeSite::local(scope), operation)?;
        }

        self.writer.decrease_indent();
        self.writer.line("}");
        Ok(())
    }

    fn emit_exception(
        &mut self,
        scope: ScopeId,
        child: &ModuleChild,
        exception: &ExceptionDeclaration,
    ) -> Result<(), GenerateError> {
        let base = match &exception.extends {
            Some(parent) => self.printer.print_complex_type(TypeSite::local(scope), parent, Position::Base)?,
            None if exception.local => "Ice.LocalException".to_string(),
            None => "Ice.UserException".to_string(),
        };

        self.emit_doc_comment(exception.doc.as_deref(), &exception.metadata);
        self.writer
            .line(&format!("class {} extends {base} {{", escape(&exception.name)));
        self.writer.increase_indent();

        self.emit_constructor(scope, child)?;
        for field in &exception.content {
            self.emit_field(scope, field)?;
        }

        self.writer.decrease_indent();
        self.writer.line("}");
        Ok(())
    }

    /// Constructor taking every data member of the chain, root ancestor
    /// first. Omitted when the whole chain has no data members. Inherited
    /// field types resolve where the ancestor declares them but are printed
    /// inside `scope`.
    fn emit_constructor(&mut self, scope: ScopeId, declaration: &ModuleChild) -> Result<(), GenerateError> {
        let chain = inheritance_chain(self.ctx.scopes, scope, declaration)?;

        let mut parameters = Vec::new();
        for member in &chain {
            for field in member.data_members() {
                let site = TypeSite::inherited(member.scope, scope);
                let data_type = self.value_type(site, &field.data_type, &field.metadata)?;
                let undefined = if field.is_optional() { " | undefined" } else { "" };
                parameters.push(format!("{}?: {data_type}{undefined}", escape(&field.name)));
            }
        }

        if !parameters.is_empty() {
            self.writer
                .line(&format!("constructor({});", parameters.join(", ")));
        }
        Ok(())
    }

    fn emit_field(&mut self, scope: ScopeId, field: &FieldDeclaration) -> Result<(), GenerateError> {
        let data_type = self.value_type(TypeSite::local(scope), &field.data_type, &field.metadata)?;
        let optional = if field.is_optional() { "?" } else { "" };
        self.emit_doc_comment(field.doc.as_deref(), &field.metadata);
        self.writer
            .line(&format!("{}{optional}: {data_type};", escape(&field.name)));
        Ok(())
    }

    // =========================================================================
    // Interfaces and operations
    // =========================================================================

    fn emit_interface(&mut self, scope: ScopeId, interface: &InterfaceDeclaration) -> Result<(), GenerateError> {
        let operations = interface_operations(self.ctx.scopes, scope, interface)?;
        let bases = interface
            .extends
            .iter()
            .map(|parent| self.printer.print_complex_type(TypeSite::local(scope), parent, Position::Base))
            .collect::<Result<Vec<_>, _>>()?;
        let params = generic_parameters(&interface.metadata).unwrap_or_default();
        let name = escape(&interface.name);

        if interface.local {
            let extends = if bases.is_empty() {
                String::new()
            } else {
                format!(" extends {}", bases.join(", "))
            };

            self.emit_doc_comment(interface.doc.as_deref(), &interface.metadata);
            self.writer
                .line(&format!("interface {name}{params}{extends} {{"));
            self.writer.increase_indent();
            for inherited in &operations {
                self.emit_local_operation(TypeSite::inherited(inherited.scope, scope), inherited.operation)?;
            }
            self.writer.decrease_indent();
            self.writer.line("}");
            return Ok(());
        }

        let implements = implements_clause(bases.iter().map(String::as_str), "");
        self.emit_doc_comment(interface.doc.as_deref(), &interface.metadata);
        self.writer.line(&format!(
            "abstract class {name}{params} extends Ice.Object{implements} {{"
        ));
        self.writer.increase_indent();
        for inherited in &operations {
            self.emit_dispatch_operation(TypeSite::inherited(inherited.scope, scope), inherited.operation)?;
        }
        self.writer.decrease_indent();
        self.writer.line("}");

        self.writer.blank_line();

        let implements = implements_clause(bases.iter().map(String::as_str), "Prx");
        self.emit_doc_comment(interface.doc.as_deref(), &interface.metadata);
        self.writer.line(&format!(
            "class {name}Prx{params} extends Ice.ObjectPrx{implements} {{"
        ));
        self.writer.increase_indent();
        for inherited in &operations {
            self.emit_proxy_operation(TypeSite::inherited(inherited.scope, scope), inherited.operation)?;
        }
        self.writer.decrease_indent();
        self.writer.line("}");
        Ok(())
    }

    fn emit_local_operation(
        &mut self,
        site: TypeSite,
        operation: &OperationDeclaration,
    ) -> Result<(), GenerateError> {
        let parameters = self.caller_parameters(site, operation, None)?;
        let return_type = self.return_type(site, operation)?;

        self.emit_doc_comment(operation.doc.as_deref(), &operation.metadata);
        self.writer.line(&format!(
            "{}({parameters}): {return_type};",
            escape(&operation.name)
        ));
        Ok(())
    }

    /// Servant side: parameters in declaration order plus `current`.
    fn emit_dispatch_operation(
        &mut self,
        site: TypeSite,
        operation: &OperationDeclaration,
    ) -> Result<(), GenerateError> {
        let mut parameters = Vec::new();
        for parameter in operation.in_parameters() {
            let data_type =
                self.value_type(site, &parameter.data_type, &parameter.metadata)?;
            let undefined = if parameter.is_optional() { " | undefined" } else { "" };
            parameters.push(format!("{}: {data_type}{undefined}", escape(&parameter.name)));
        }
        let current = synthesized_name(operation, "current");
        parameters.push(format!("{current}: Ice.Current"));

        let return_type = self.return_type(site, operation)?;

        self.emit_doc_comment(operation.doc.as_deref(), &operation.metadata);
        self.writer.line(&format!(
            "abstract {}({}): Ice.OperationResult<{return_type}>;",
            escape(&operation.name),
            parameters.join(", ")
        ));
        Ok(())
    }

    fn emit_proxy_operation(
        &mut self,
        site: TypeSite,
        operation: &OperationDeclaration,
    ) -> Result<(), GenerateError> {
        let context = format!("{}?: Ice.Context", synthesized_name(operation, "ctx"));
        let parameters = self.caller_parameters(site, operation, Some(context))?;
        let return_type = self.return_type(site, operation)?;

        self.emit_doc_comment(operation.doc.as_deref(), &operation.metadata);
        self.writer.line(&format!(
            "{}({parameters}): Ice.AsyncResult<{return_type}>;",
            escape(&operation.name)
        ));
        Ok(())
    }

    /// Caller side parameter list.
    ///
    /// An optional parameter may only be `?`-marked when no required
    /// parameter follows it; otherwise it is typed `T | undefined`. The list
    /// is built back to front so that is known at each step. `trailing` is
    /// an already rendered optional parameter placed last.
    fn caller_parameters(
        &self,
        site: TypeSite,
        operation: &OperationDeclaration,
        trailing: Option<String>,
    ) -> Result<String, GenerateError> {
        let mut reversed: Vec<String> = trailing.into_iter().collect();
        let mut seen_required = false;

        for parameter in operation.in_parameters().rev() {
            let data_type =
                self.value_type(site, &parameter.data_type, &parameter.metadata)?;
            let name = escape(&parameter.name);

            reversed.push(if !parameter.is_optional() {
                seen_required = true;
                format!("{name}: {data_type}")
            } else if seen_required {
                format!("{name}: {data_type} | undefined")
            } else {
                format!("{name}?: {data_type}")
            });
        }

        reversed.reverse();
        Ok(reversed.join(", "))
    }

    /// Declared return type, or a tuple of it and every out parameter.
    fn return_type(
        &self,
        site: TypeSite,
        operation: &OperationDeclaration,
    ) -> Result<String, GenerateError> {
        let returned =
            self.value_type(site, &operation.return_type, &operation.metadata)?;

        let outs: Vec<_> = operation.out_parameters().collect();
        if outs.is_empty() {
            return Ok(if operation.has_optional_return() {
                format!("{returned} | void")
            } else {
                returned
            });
        }

        let mut slots = Vec::with_capacity(outs.len() + 1);
        slots.push(if operation.has_optional_return() {
            format!("{returned} | undefined")
        } else {
            returned
        });
        for parameter in outs {
            let data_type =
                self.value_type(site, &parameter.data_type, &parameter.metadata)?;
            slots.push(if parameter.is_optional() {
                format!("{data_type} | undefined")
            } else {
                data_type
            });
        }

        Ok(format!("[{}]", slots.join(", ")))
    }

    // =========================================================================
    // Structs, enums, sequences, dictionaries
    // =========================================================================

    fn emit_struct(&mut self, scope: ScopeId, structure: &StructDeclaration) -> Result<(), GenerateError> {
        let mut parameters = Vec::with_capacity(structure.fields.len());
        let mut types = Vec::with_capacity(structure.fields.len());
        for field in &structure.fields {
            let data_type = self.value_type(TypeSite::local(scope), &field.data_type, &field.metadata)?;
            parameters.push(format!("{}?: {data_type}", escape(&field.name)));
            types.push(data_type);
        }

        self.emit_doc_comment(structure.doc.as_deref(), &structure.metadata);
        self.writer.line(&format!(
            "class {} implements Ice.Struct {{",
            escape(&structure.name)
        ));
        self.writer.increase_indent();
        self.writer
            .line(&format!("constructor({});", parameters.join(", ")));
        for (field, data_type) in structure.fields.iter().zip(&types) {
            self.emit_doc_comment(field.doc.as_deref(), &field.metadata);
            self.writer
                .line(&format!("{}: {data_type};", escape(&field.name)));
        }
        self.writer.line("clone(): this;");
        self.writer.line("equals(other: this): boolean;");
        self.writer.line("hashCode(): number;");
        self.writer.decrease_indent();
        self.writer.line("}");
        Ok(())
    }

    fn emit_enum(&mut self, enumeration: &EnumDeclaration) {
        let class_name = escape(&enumeration.name);
        let names_type = format!("{class_name}Name");

        let names = if enumeration.enums.is_empty() {
            "never".to_string()
        } else {
            enumeration
                .enums
                .iter()
                .map(|element| format!("'{}'", escape(&element.name)))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        self.writer.line(&format!("type {names_type} = {names};"));
        self.writer.blank_line();
        self.emit_doc_comment(enumeration.doc.as_deref(), &enumeration.metadata);
        self.writer.line(&format!(
            "class {class_name}<Name extends {names_type} = {names_type}> extends Ice.EnumBase<Name> {{"
        ));
        self.writer.increase_indent();
        for element in &enumeration.enums {
            let name = escape(&element.name);
            self.emit_doc_comment(element.doc.as_deref(), &element.metadata);
            self.writer
                .line(&format!("static {name}: {class_name}<'{name}'>;"));
        }
        self.writer.decrease_indent();
        self.writer.line("}");
    }

    fn emit_sequence(&mut self, scope: ScopeId, sequence: &SequenceDeclaration) -> Result<(), GenerateError> {
        let aliased = if let Some(whole) = type_override(&sequence.metadata) {
            whole.to_string()
        } else if let Some(element) = type_override(&sequence.data_type_metadata) {
            format!("Array<{element}>")
        } else if sequence.data_type == "byte" {
            "Uint8Array".to_string()
        } else {
            let element = self
                .printer
                .print_data_type(TypeSite::local(scope), &sequence.data_type)?;
            format!("Array<{element}>")
        };
        let params = generic_parameters(&sequence.metadata).unwrap_or_default();

        self.emit_doc_comment(sequence.doc.as_deref(), &sequence.metadata);
        self.writer.line(&format!(
            "type {}{params} = {aliased};",
            escape(&sequence.name)
        ));
        Ok(())
    }

    fn emit_dictionary(
        &mut self,
        scope: ScopeId,
        dictionary: &DictionaryDeclaration,
    ) -> Result<(), GenerateError> {
        let site = TypeSite::local(scope);
        let key = self.value_type(site, &dictionary.key_type, &dictionary.key_type_metadata)?;
        let value = self.value_type(site, &dictionary.value_type, &dictionary.value_type_metadata)?;
        let native = self.printer.is_native_key(scope, &dictionary.key_type)?;

        let (container, argument) = if native {
            ("Map", format!("entries?: ReadonlyArray<[{key}, {value}]>"))
        } else {
            ("Ice.HashMap", String::new())
        };
        let params = generic_parameters(&dictionary.metadata).unwrap_or_default();
        let name = escape(&dictionary.name);
        let constructed = format!("{container}<{key}, {value}>");

        self.emit_doc_comment(dictionary.doc.as_deref(), &dictionary.metadata);
        self.writer
            .line(&format!("type {name}{params} = {constructed};"));
        self.writer.line(&format!("const {name}: {{"));
        self.writer.increase_indent();
        self.emit_doc_comment(dictionary.doc.as_deref(), &dictionary.metadata);
        let new_params = if params.is_empty() { " ".to_string() } else { format!(" {params}") };
        self.writer
            .line(&format!("new{new_params}({argument}): {constructed};"));
        self.writer.decrease_indent();
        self.writer.line("};");
        Ok(())
    }

    /// Type of a value position: a `ts:type` override wins outright.
    fn value_type(
        &self,
        site: TypeSite,
        data_type: &str,
        metadata: &[String],
    ) -> Result<String, GenerateError> {
        match type_override(metadata) {
            Some(explicit) => Ok(explicit.to_string()),
            None => self.printer.print_data_type(site, data_type),
        }
    }
}

fn implements_clause<'s>(bases: impl Iterator<Item = &'s str>, suffix: &str) -> String {
    let bases: Vec<String> = bases.map(|base| format!("{base}{suffix}")).collect();
    if bases.is_empty() {
        String::new()
    } else {
        format!(" implements {}", bases.join(", "))
    }
}

/// `preferred`, or `_preferred` when a real parameter already uses it.
fn synthesized_name(operation: &OperationDeclaration, preferred: &str) -> String {
    if operation.has_parameter_named(preferred) {
        format!("_{preferred}")
    } else {
        preferred.to_string()
    }
}

#[cfg(test)]
#[path = "../tests/declaration_emitter_tests.rs"]
mod tests;
