use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// IDM's conventional marker for missing data.
pub const MISSING: &str = "-";

/// An element of an outline with a single headline and nested contents.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
// Serialize using a special form that triggers IDM's raw mode.
#[serde(from = "((String,), Outline)", into = "((String,), Outline)")]
pub struct Section {
    /// First line of the section.
    pub head: String,
    /// Indented outline block under the section head.
    pub body: Outline,
}

impl Section {
    pub fn new(head: impl Into<String>, body: Outline) -> Self {
        Section {
            head: head.into(),
            body,
        }
    }
}

impl From<((String,), Outline)> for Section {
    fn from(((head,), body): ((String,), Outline)) -> Self {
        Section { head, body }
    }
}

impl From<Section> for ((String,), Outline) {
    fn from(val: Section) -> Self {
        ((val.head,), val.body)
    }
}

/// An outline block with named attributes and child elements.
///
/// For counting, each toplevel child section is one entity. The headline is
/// the entity identifier and the section's attributes hold its values:
///
/// ```text
/// SAMN001
///   :attributes tissue age sex
///   :value liver
/// SAMN002
///   :value -
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
// Serialize using a special form that triggers IDM's raw mode.
#[serde(
    from = "((IndexMap<String, String>,), Vec<Section>)",
    into = "((IndexMap<String, String>,), Vec<Section>)"
)]
pub struct Outline {
    /// Named attributes of the outline.
    pub attrs: IndexMap<String, String>,
    /// Contents of the outline.
    pub children: Vec<Section>,
}

impl Outline {
    pub fn new(
        attrs: IndexMap<String, String>,
        children: Vec<Section>,
    ) -> Self {
        Outline { attrs, children }
    }

    /// Get an attribute value deserialized to type.
    ///
    /// Both a missing attribute and the `-` missing data marker give
    /// `Ok(None)`.
    pub fn get<'a, T: Deserialize<'a>>(
        &'a self,
        name: &str,
    ) -> Result<Option<T>> {
        let Some(a) = self.attrs.get(name) else {
            return Ok(None);
        };
        if a.trim() == MISSING {
            return Ok(None);
        }
        Ok(Some(idm::from_str(a)?))
    }

    /// Map every entity to the label list in attribute `field`.
    pub fn entity_labels(
        &self,
        field: &str,
    ) -> Result<IndexMap<String, Option<Vec<String>>>> {
        self.entities(|body| body.get::<Vec<String>>(field), field)
    }

    /// Map every entity to the single value in attribute `field`.
    pub fn entity_values(
        &self,
        field: &str,
    ) -> Result<IndexMap<String, Option<String>>> {
        self.entities(|body| body.get::<String>(field), field)
    }

    fn entities<T>(
        &self,
        f: impl Fn(&Outline) -> Result<Option<T>>,
        field: &str,
    ) -> Result<IndexMap<String, Option<T>>> {
        let mut ret = IndexMap::new();

        for sec in &self.children {
            let id = sec.head.trim();
            if id.is_empty() {
                log::debug!("entities: skipping blank headline");
                continue;
            }

            if ret.contains_key(id) {
                bail!("entities: duplicate entity {id:?}");
            }

            let value = f(&sec.body).with_context(|| {
                format!("entities: bad {field:?} attribute in {id:?}")
            })?;
            ret.insert(id.to_owned(), value);
        }

        log::debug!("entities: read {} entities", ret.len());
        Ok(ret)
    }
}

impl From<((IndexMap<String, String>,), Vec<Section>)> for Outline {
    fn from(
        ((attrs,), children): ((IndexMap<String, String>,), Vec<Section>),
    ) -> Self {
        Outline { attrs, children }
    }
}

impl From<Outline> for ((IndexMap<String, String>,), Vec<Section>) {
    fn from(val: Outline) -> Self {
        ((val.attrs,), val.children)
    }
}
