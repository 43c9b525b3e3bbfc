//! Documentation tree handed over by the documentation host.
//!
//! The host parses the sources and exports the tree as JSON; this module only
//! describes its shape and the order items are visited in.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Natural-language text attached to a documentation item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A source file as the documentation host knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLocation {
    pub absolute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_name: Option<String>,
}

impl FileLocation {
    pub fn new(absolute_name: impl Into<String>) -> Self {
        Self {
            absolute_name: absolute_name.into(),
            relative_name: None,
        }
    }

    pub fn with_relative_name(mut self, relative_name: impl Into<String>) -> Self {
        self.relative_name = Some(relative_name.into());
        self
    }

    /// Display name used in report headers.
    pub fn full_name(&self) -> &str {
        self.relative_name.as_deref().unwrap_or(&self.absolute_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Class,
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLocation {
    pub comment: Comment,
    pub file: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Include {
    pub name: String,
    #[serde(default)]
    pub comment: Comment,
    pub file: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(default)]
    pub comment: Comment,
    pub file: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// Access mode: `R`, `W` or `RW`.
    #[serde(default = "default_rw")]
    pub rw: String,
    #[serde(default)]
    pub comment: Comment,
    pub file: FileLocation,
}

fn default_rw() -> String {
    "RW".to_string()
}

impl Attribute {
    /// The declaring call, e.g. `attr_accessor`.
    pub fn definition(&self) -> &'static str {
        match self.rw.as_str() {
            "R" => "attr_reader",
            "W" => "attr_writer",
            _ => "attr_accessor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub singleton: bool,
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub block_params: Option<String>,
    #[serde(default)]
    pub comment: Comment,
    pub file: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub old_name: String,
    pub new_name: String,
    #[serde(default)]
    pub comment: Comment,
    pub file: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModule {
    pub kind: ModuleKind,
    pub name: String,
    /// Namespaced name; defaults to `name` for top-level modules.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub comments: Vec<CommentLocation>,
    #[serde(default)]
    pub includes: Vec<Include>,
    #[serde(default)]
    pub constants: Vec<Constant>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
}

impl ClassModule {
    pub fn new(kind: ModuleKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            full_name: None,
            comments: Vec::new(),
            includes: Vec::new(),
            constants: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    /// `class Foo` or `module Foo`.
    pub fn definition(&self) -> String {
        match self.kind {
            ModuleKind::Class => format!("class {}", self.full_name()),
            ModuleKind::Module => format!("module {}", self.full_name()),
        }
    }

    /// Comments first, then includes, constants, attributes, methods and aliases.
    pub fn items(&self) -> impl Iterator<Item = DocItem<'_>> {
        let comments = self
            .comments
            .iter()
            .map(move |location| DocItem::Module {
                module: self,
                location,
            });
        let includes = self
            .includes
            .iter()
            .map(move |include| DocItem::Include {
                parent: self,
                include,
            });
        let constants = self
            .constants
            .iter()
            .map(move |constant| DocItem::Constant {
                parent: self,
                constant,
            });
        let attributes = self
            .attributes
            .iter()
            .map(move |attribute| DocItem::Attribute {
                parent: self,
                attribute,
            });
        let methods = self
            .methods
            .iter()
            .map(move |method| DocItem::Method {
                parent: self,
                method,
            });
        let aliases = self
            .aliases
            .iter()
            .map(move |alias| DocItem::Alias {
                parent: self,
                alias,
            });

        comments
            .chain(includes)
            .chain(constants)
            .chain(attributes)
            .chain(methods)
            .chain(aliases)
    }
}

/// A parsed file and its file-level comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevel {
    #[serde(flatten)]
    pub location: FileLocation,
    #[serde(default)]
    pub comment: Comment,
}

impl TopLevel {
    pub fn new(location: FileLocation) -> Self {
        Self {
            location,
            comment: Comment::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTree {
    #[serde(default)]
    pub modules: Vec<ClassModule>,
    #[serde(default)]
    pub files: Vec<TopLevel>,
}

impl DocTree {
    pub fn from_reader(reader: impl Read) -> crate::Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Every spell-checkable item in report order: modules with their
    /// members, then the files.
    pub fn items(&self) -> impl Iterator<Item = DocItem<'_>> {
        self.modules
            .iter()
            .flat_map(|module| module.items())
            .chain(self.files.iter().map(DocItem::File))
    }
}

/// One spell-checkable element of the tree.
#[derive(Debug, Clone, Copy)]
pub enum DocItem<'a> {
    Module {
        module: &'a ClassModule,
        location: &'a CommentLocation,
    },
    Include {
        parent: &'a ClassModule,
        include: &'a Include,
    },
    Constant {
        parent: &'a ClassModule,
        constant: &'a Constant,
    },
    Attribute {
        parent: &'a ClassModule,
        attribute: &'a Attribute,
    },
    Method {
        parent: &'a ClassModule,
        method: &'a Method,
    },
    Alias {
        parent: &'a ClassModule,
        alias: &'a Alias,
    },
    File(&'a TopLevel),
}

impl<'a> DocItem<'a> {
    /// Name shown in the report header; files have none.
    pub fn header_name(&self) -> Option<String> {
        match self {
            DocItem::Module { module, .. } => Some(module.definition()),
            DocItem::Include { parent, include } => {
                Some(format!("{}.include {}", parent.full_name(), include.name))
            }
            DocItem::Constant { parent, constant } => {
                let parent_name = match parent.full_name() {
                    "" => "(unknown)",
                    name => name,
                };
                Some(format!("{}::{}", parent_name, constant.name))
            }
            DocItem::Attribute { parent, attribute } => Some(format!(
                "{}.{} :{}",
                parent.full_name(),
                attribute.definition(),
                attribute.name
            )),
            DocItem::Method { parent, method } => {
                let separator = if method.singleton { "::" } else { "#" };
                Some(format!("{}{}{}", parent.full_name(), separator, method.name))
            }
            DocItem::Alias { parent, alias } => Some(format!(
                "{} alias {} {}",
                parent.full_name(),
                alias.old_name,
                alias.new_name
            )),
            DocItem::File(_) => None,
        }
    }

    pub fn comment(&self) -> &'a Comment {
        match self {
            DocItem::Module { location, .. } => &location.comment,
            DocItem::Include { include, .. } => &include.comment,
            DocItem::Constant { constant, .. } => &constant.comment,
            DocItem::Attribute { attribute, .. } => &attribute.comment,
            DocItem::Method { method, .. } => &method.comment,
            DocItem::Alias { alias, .. } => &alias.comment,
            DocItem::File(top_level) => &top_level.comment,
        }
    }

    pub fn file(&self) -> &'a FileLocation {
        match self {
            DocItem::Module { location, .. } => &location.file,
            DocItem::Include { include, .. } => &include.file,
            DocItem::Constant { constant, .. } => &constant.file,
            DocItem::Attribute { attribute, .. } => &attribute.file,
            DocItem::Method { method, .. } => &method.file,
            DocItem::Alias { alias, .. } => &alias.file,
            DocItem::File(top_level) => &top_level.location,
        }
    }
}
