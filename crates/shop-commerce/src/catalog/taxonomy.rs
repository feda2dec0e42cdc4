//! Categories, brands and the references products hold to them.

use crate::ids::{BrandId, CategoryId};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Number of products, when the API reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// A product brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// A product's link to a category or brand.
///
/// Decodes from a nested `{id, name, slug}` object or from a bare key; in
/// the latter case `name` and `slug` are empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    from = "TaxonRefRepr<Id>",
    bound(deserialize = "Id: Deserialize<'de>")
)]
pub struct TaxonRef<Id> {
    pub id: Id,
    pub name: String,
    pub slug: String,
}

/// Reference from a product to its category.
pub type CategoryRef = TaxonRef<CategoryId>;

/// Reference from a product to its brand.
pub type BrandRef = TaxonRef<BrandId>;

impl<Id> TaxonRef<Id> {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

impl From<&Category> for CategoryRef {
    fn from(category: &Category) -> Self {
        TaxonRef::new(category.id.clone(), category.name.clone(), category.slug.clone())
    }
}

impl From<&Brand> for BrandRef {
    fn from(brand: &Brand) -> Self {
        TaxonRef::new(brand.id.clone(), brand.name.clone(), brand.slug.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaxonRefRepr<Id> {
    Nested {
        id: Id,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },
    Key(Id),
}

impl<Id> From<TaxonRefRepr<Id>> for TaxonRef<Id> {
    fn from(repr: TaxonRefRepr<Id>) -> Self {
        match repr {
            TaxonRefRepr::Nested { id, name, slug } => TaxonRef {
                id,
                name: name.unwrap_or_default(),
                slug: slug.unwrap_or_default(),
            },
            TaxonRefRepr::Key(id) => TaxonRef {
                id,
                name: String::new(),
                slug: String::new(),
            },
        }
    }
}
