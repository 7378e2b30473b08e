//! Inheritance walks shared by the emitter and the usage analyzer.

use rustc_hash::FxHashSet;
use slice2ts_binder::{ResolvedType, ScopeId, TypeScope};
use slice2ts_syntax::{
    DeclarationKind, FieldDeclaration, InterfaceDeclaration, ModuleChild, OperationDeclaration,
};
use std::collections::VecDeque;

use crate::errors::GenerateError;

/// One class or exception of an inheritance chain.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChainMember<'a> {
    pub scope: ScopeId,
    pub declaration: &'a ModuleChild,
}

impl<'a> ChainMember<'a> {
    /// Data members in declaration order, for classes and exceptions alike.
    pub(crate) fn data_members(&self) -> Vec<&'a FieldDeclaration> {
        match self.declaration {
            ModuleChild::Class(class) => class.fields().collect(),
            ModuleChild::Exception(exception) => exception.content.iter().collect(),
            _ => Vec::new(),
        }
    }
}

fn base_name(declaration: &ModuleChild) -> Option<&str> {
    match declaration {
        ModuleChild::Class(class) => class.extends.as_deref(),
        ModuleChild::Exception(exception) => exception.extends.as_deref(),
        _ => None,
    }
}

/// Chain of a class or exception from its root ancestor down to itself.
pub(crate) fn inheritance_chain<'a>(
    scopes: &TypeScope<'a>,
    scope: ScopeId,
    declaration: &'a ModuleChild,
) -> Result<Vec<ChainMember<'a>>, GenerateError> {
    let mut chain = vec![ChainMember { scope, declaration }];
    let mut visited = FxHashSet::default();
    visited.insert(scopes.qualified_name(&ResolvedType { scope, declaration }));

    while let Some(parent) = base_name(chain[0].declaration) {
        let resolved = scopes.resolve(chain[0].scope, parent)?;
        let qualified_name = scopes.qualified_name(&resolved);
        if !visited.insert(qualified_name.clone()) {
            return Err(GenerateError::InheritanceCycle { qualified_name });
        }
        chain.insert(
            0,
            ChainMember {
                scope: resolved.scope,
                declaration: resolved.declaration,
            },
        );
    }

    Ok(chain)
}

/// An operation together with where its interface is declared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InheritedOperation<'a> {
    pub scope: ScopeId,
    pub operation: &'a OperationDeclaration,
}

/// Every operation an interface exposes, ancestors first.
///
/// Ancestors are collected breadth first from the interface itself. An
/// ancestor reachable through several parents is visited once, keyed by its
/// fully-qualified name. The visit order is then reversed.
pub(crate) fn interface_operations<'a>(
    scopes: &TypeScope<'a>,
    scope: ScopeId,
    declaration: &'a InterfaceDeclaration,
) -> Result<Vec<InheritedOperation<'a>>, GenerateError> {
    let mut ordered: Vec<(ScopeId, &'a InterfaceDeclaration)> = Vec::new();
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut queue = VecDeque::from([(scope, declaration)]);
    visited.insert(slice2ts_common::join_module_path(
        scopes.module_path(scope),
        &declaration.name,
    ));

    while let Some((member_scope, member)) = queue.pop_front() {
        ordered.push((member_scope, member));

        for parent_name in &member.extends {
            let resolved = scopes.resolve(member_scope, parent_name)?;
            let parent = resolved
                .declaration
                .as_interface()
                .ok_or_else(|| GenerateError::UnexpectedKind {
                    type_name: parent_name.clone(),
                    expected: DeclarationKind::Interface,
                    found: resolved.declaration.kind(),
                })?;
            if visited.insert(scopes.qualified_name(&resolved)) {
                queue.push_back((resolved.scope, parent));
            }
        }
    }

    Ok(ordered
        .into_iter()
        .rev()
        .flat_map(|(member_scope, member)| {
            member.content.iter().map(move |operation| InheritedOperation {
                scope: member_scope,
                operation,
            })
        })
        .collect())
}
