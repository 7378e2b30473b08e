//! Slice declaration tree.
//!
//! These types mirror the JSON emitted by `slice2json`-style parsers: every
//! node is tagged by a `type` field and uses camelCase keys. Optional fields
//! carry the optional tag number (`optional: 1`), so presence is what
//! matters, not the value.

use serde::{Deserialize, Serialize};

/// One parsed Slice file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceSource {
    /// Included module names (`Ice/Identity` for `#include <Ice/Identity.ice>`).
    #[serde(default)]
    pub includes: Vec<String>,
    /// Top-level module declarations in source order.
    #[serde(default)]
    pub modules: Vec<ModuleDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDeclaration {
    pub name: String,
    #[serde(default)]
    pub content: Vec<ModuleChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

/// Anything that can appear inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ModuleChild {
    Module(ModuleDeclaration),
    Class(ClassDeclaration),
    ClassForward(ForwardDeclaration),
    Interface(InterfaceDeclaration),
    InterfaceForward(ForwardDeclaration),
    Exception(ExceptionDeclaration),
    Struct(StructDeclaration),
    Enum(EnumDeclaration),
    Sequence(SequenceDeclaration),
    Dictionary(DictionaryDeclaration),
    Const(ConstDeclaration),
}

/// Discriminant of [`ModuleChild`], used in diagnostics and quick checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Module,
    Class,
    ClassForward,
    Interface,
    InterfaceForward,
    Exception,
    Struct,
    Enum,
    Sequence,
    Dictionary,
    Const,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Module => "module",
            DeclarationKind::Class => "class",
            DeclarationKind::ClassForward => "class forward declaration",
            DeclarationKind::Interface => "interface",
            DeclarationKind::InterfaceForward => "interface forward declaration",
            DeclarationKind::Exception => "exception",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Sequence => "sequence",
            DeclarationKind::Dictionary => "dictionary",
            DeclarationKind::Const => "const",
        }
    }

    /// Forward declarations only exist to satisfy the parser.
    pub fn is_forward(self) -> bool {
        matches!(
            self,
            DeclarationKind::ClassForward | DeclarationKind::InterfaceForward
        )
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardDeclaration {
    pub name: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    pub name: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(default)]
    pub content: Vec<ClassMember>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl ClassDeclaration {
    pub fn fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.content.iter().filter_map(|member| match member {
            ClassMember::Field(field) => Some(field),
            ClassMember::Operation(_) => None,
        })
    }

    pub fn operations(&self) -> impl Iterator<Item = &OperationDeclaration> {
        self.content.iter().filter_map(|member| match member {
            ClassMember::Operation(operation) => Some(operation),
            ClassMember::Field(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClassMember {
    Field(FieldDeclaration),
    Operation(OperationDeclaration),
}

/// Data member of a class, exception or struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDeclaration {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl FieldDeclaration {
    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDeclaration {
    pub name: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub content: Vec<OperationDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDeclaration {
    pub name: String,
    #[serde(default)]
    pub idempotent: bool,
    pub return_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_optional: Option<u32>,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl OperationDeclaration {
    pub fn has_optional_return(&self) -> bool {
        self.return_optional.is_some()
    }

    /// Parameters sent by the caller, in declaration order.
    pub fn in_parameters(&self) -> impl DoubleEndedIterator<Item = &ParameterDeclaration> {
        self.parameters.iter().filter(|parameter| !parameter.out)
    }

    /// Parameters returned to the caller, in declaration order.
    pub fn out_parameters(&self) -> impl Iterator<Item = &ParameterDeclaration> {
        self.parameters.iter().filter(|parameter| parameter.out)
    }

    pub fn has_parameter_named(&self, name: &str) -> bool {
        self.parameters.iter().any(|parameter| parameter.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl ParameterDeclaration {
    pub fn is_optional(&self) -> bool {
        self.optional.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDeclaration {
    pub name: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub content: Vec<FieldDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDeclaration {
    pub name: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDeclaration {
    pub name: String,
    #[serde(default)]
    pub enums: Vec<EnumElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumElement {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDeclaration {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_type_metadata: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDeclaration {
    pub name: String,
    pub key_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_type_metadata: Vec<String>,
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_type_metadata: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstDeclaration {
    pub name: String,
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<String>,
}

impl ModuleChild {
    pub fn name(&self) -> &str {
        match self {
            ModuleChild::Module(decl) => &decl.name,
            ModuleChild::Class(decl) => &decl.name,
            ModuleChild::ClassForward(decl) | ModuleChild::InterfaceForward(decl) => &decl.name,
            ModuleChild::Interface(decl) => &decl.name,
            ModuleChild::Exception(decl) => &decl.name,
            ModuleChild::Struct(decl) => &decl.name,
            ModuleChild::Enum(decl) => &decl.name,
            ModuleChild::Sequence(decl) => &decl.name,
            ModuleChild::Dictionary(decl) => &decl.name,
            ModuleChild::Const(decl) => &decl.name,
        }
    }

    pub fn kind(&self) -> DeclarationKind {
        match self {
            ModuleChild::Module(_) => DeclarationKind::Module,
            ModuleChild::Class(_) => DeclarationKind::Class,
            ModuleChild::ClassForward(_) => DeclarationKind::ClassForward,
            ModuleChild::Interface(_) => DeclarationKind::Interface,
            ModuleChild::InterfaceForward(_) => DeclarationKind::InterfaceForward,
            ModuleChild::Exception(_) => DeclarationKind::Exception,
            ModuleChild::Struct(_) => DeclarationKind::Struct,
            ModuleChild::Enum(_) => DeclarationKind::Enum,
            ModuleChild::Sequence(_) => DeclarationKind::Sequence,
            ModuleChild::Dictionary(_) => DeclarationKind::Dictionary,
            ModuleChild::Const(_) => DeclarationKind::Const,
        }
    }

    pub fn metadata(&self) -> &[String] {
        match self {
            ModuleChild::Module(decl) => &decl.metadata,
            ModuleChild::Class(decl) => &decl.metadata,
            ModuleChild::ClassForward(decl) | ModuleChild::InterfaceForward(decl) => {
                &decl.metadata
            }
            ModuleChild::Interface(decl) => &decl.metadata,
            ModuleChild::Exception(decl) => &decl.metadata,
            ModuleChild::Struct(decl) => &decl.metadata,
            ModuleChild::Enum(decl) => &decl.metadata,
            ModuleChild::Sequence(decl) => &decl.metadata,
            ModuleChild::Dictionary(decl) => &decl.metadata,
            ModuleChild::Const(decl) => &decl.metadata,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDeclaration> {
        match self {
            ModuleChild::Class(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceDeclaration> {
        match self {
            ModuleChild::Interface(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_exception(&self) -> Option<&ExceptionDeclaration> {
        match self {
            ModuleChild::Exception(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Doc text and metadata shared by every documented node.
pub trait Documented {
    fn doc(&self) -> Option<&str>;
    fn metadata(&self) -> &[String];
}

macro_rules! impl_documented {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Documented for $ty {
                fn doc(&self) -> Option<&str> {
                    self.doc.as_deref()
                }

                fn metadata(&self) -> &[String] {
                    &self.metadata
                }
            }
        )*
    };
}

impl_documented!(
    ModuleDeclaration,
    ClassDeclaration,
    FieldDeclaration,
    InterfaceDeclaration,
    OperationDeclaration,
    ExceptionDeclaration,
    StructDeclaration,
    EnumDeclaration,
    EnumElement,
    SequenceDeclaration,
    DictionaryDeclaration,
    ConstDeclaration,
);
