//! Module schemas for every supported paper type.
//!
//! A [`TemplateCatalog`] maps each [`PaperType`] to an ordered [`ModuleSchema`].
//! Besides the key and label shown to callers, every [`ModuleDef`] carries the
//! data the extractor needs: heading aliases (English and Chinese), trigger
//! terms for sentence matching, an optional conventional position in the
//! document and a length cap.
//!
//! The built-in schemas follow the usual journal structures:
//!
//! | Type | Modules |
//! |---|---|
//! | `clinical_research` | background, objective, methods, participants, intervention, outcomes, results, conclusion |
//! | `case_report` | case_summary, clinical_presentation, diagnosis, treatment, outcome |
//! | `basic_research` | scientific_question, research_method, results, conclusion, mechanism |

mod basic;
mod case_report;
mod clinical;

use std::collections::BTreeMap;

use crate::models::PaperType;

/// Conventional location of a module within a paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Usually found in the opening sentences
    Leading,
    /// Usually found in the closing sentences
    Trailing,
}

/// Definition of a single content module
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleDef {
    /// Key used in `core_info`
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Lowercase section headings that introduce this module
    pub aliases: &'static [&'static str],
    /// Lowercase terms that mark a sentence as belonging to this module
    pub triggers: &'static [&'static str],
    /// Position used when neither headings nor triggers match
    pub position: Option<Position>,
    /// Maximum snippet length in characters
    pub max_chars: usize,
}

impl ModuleDef {
    /// Whether `heading` (any case) is one of this module's aliases
    pub fn has_alias(&self, heading: &str) -> bool {
        let heading = heading.trim().to_lowercase();
        self.aliases.iter().any(|a| *a == heading)
    }
}

/// Ordered list of modules extracted for one paper type
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSchema {
    paper_type: PaperType,
    modules: Vec<ModuleDef>,
}

impl ModuleSchema {
    pub fn new(paper_type: PaperType, modules: Vec<ModuleDef>) -> Self {
        Self {
            paper_type,
            modules,
        }
    }

    pub fn paper_type(&self) -> PaperType {
        self.paper_type
    }

    pub fn modules(&self) -> &[ModuleDef] {
        &self.modules
    }

    /// Module keys in schema order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|m| m.key)
    }

    /// `(key, label)` pairs in schema order
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.modules.iter().map(|m| (m.key, m.label))
    }

    pub fn get(&self, key: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| m.key == key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Section names that end a labeled section without belonging to any module
const GENERIC_HEADINGS: &[&str] = &[
    "abstract",
    "summary",
    "keywords",
    "key words",
    "discussion",
    "limitations",
    "funding",
    "acknowledgements",
    "acknowledgments",
    "conflicts of interest",
    "references",
    "摘要",
    "关键词",
    "讨论",
    "致谢",
    "参考文献",
];

/// Read-only registry of module schemas
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    schemas: BTreeMap<PaperType, ModuleSchema>,
}

impl TemplateCatalog {
    /// Catalog with the built-in schema of every supported type
    pub fn builtin() -> Self {
        Self::empty()
            .with_schema(clinical::schema())
            .with_schema(case_report::schema())
            .with_schema(basic::schema())
    }

    /// Catalog without any schema, for assembling custom catalogs
    pub fn empty() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Add or replace the schema for its paper type
    pub fn with_schema(mut self, schema: ModuleSchema) -> Self {
        self.schemas.insert(schema.paper_type(), schema);
        self
    }

    /// Schema for a paper type
    ///
    /// # Panics
    ///
    /// Panics if the catalog was built without a schema for `paper_type`.
    /// The built-in catalog covers every type.
    pub fn schema(&self, paper_type: PaperType) -> &ModuleSchema {
        match self.schemas.get(&paper_type) {
            Some(schema) => schema,
            None => panic!("no module schema registered for paper type '{}'", paper_type),
        }
    }

    /// Schema for a paper type, if registered
    pub fn try_schema(&self, paper_type: PaperType) -> Option<&ModuleSchema> {
        self.schemas.get(&paper_type)
    }

    /// Registered types in priority order
    pub fn types(&self) -> impl Iterator<Item = PaperType> + '_ {
        self.schemas.keys().copied()
    }

    /// Every heading the extractor recognizes, lowercase, longest first
    ///
    /// Includes the aliases of every module of every registered type plus
    /// generic section names, so a labeled section always stops at the next
    /// section of any kind.
    pub fn headings(&self) -> Vec<&'static str> {
        let mut headings: Vec<&'static str> = self
            .schemas
            .values()
            .flat_map(|s| s.modules().iter().flat_map(|m| m.aliases.iter().copied()))
            .chain(GENERIC_HEADINGS.iter().copied())
            .collect();
        headings.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        headings.dedup();
        headings
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
