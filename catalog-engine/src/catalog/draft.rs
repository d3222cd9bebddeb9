//! Mutation inputs
//!
//! Drafts are what the admin forms and the spreadsheet importer hand to the
//! engine. They are validated at the mutation boundary; nothing invalid is
//! ever stored in the tree.

use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, validate_features, validate_required_text};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use std::str::FromStr;

/// One item or many, as submitted by a form or a bulk upload
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Single(T),
    Batch(Vec<T>),
}

impl<T> Submission<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Batch(items) => items,
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Category, subcategory or sub-subcategory fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeDraft {
    pub name: String,
    /// `None` keeps the current image on edit and uses the placeholder on create
    pub image: Option<String>,
    pub features: Vec<String>,
    /// Parent name as seen by the submitter; the engine stamps the real one
    pub parent_id: Option<String>,
}

impl NodeDraft {
    pub fn new(name: impl Into<String>, features: Vec<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            features,
            parent_id: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn image_or(&self, placeholder: &str) -> String {
        self.image.clone().unwrap_or_else(|| placeholder.to_string())
    }

    /// Trim the name and features, rejecting blank values.
    pub fn normalized(&self) -> AppResult<NodeDraft> {
        validate_required_text(&self.name, "Name", MAX_NAME_LEN)?;
        validate_features(&self.features)?;
        Ok(NodeDraft {
            name: self.name.trim().to_string(),
            image: self
                .image
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            features: self.features.iter().map(|f| f.trim().to_string()).collect(),
            parent_id: self.parent_id.clone(),
        })
    }
}

/// Product form fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub features: Vec<String>,
    /// `None` keeps the current image on edit and uses the placeholder on create
    pub image: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            features: Vec::new(),
            image: None,
        }
    }

    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = features;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Parse a price typed into a form field
    pub fn parse_price(raw: &str) -> AppResult<Decimal> {
        let price = Decimal::from_str(raw.trim())
            .map_err(|_| AppError::new(ErrorCode::InvalidPrice).with_detail("value", raw))?;
        if price <= Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidPrice).with_detail("value", raw));
        }
        Ok(price)
    }

    /// Trim text fields and check required values, price and features.
    pub fn normalized(&self) -> AppResult<ProductDraft> {
        validate_required_text(&self.name, "Name", MAX_NAME_LEN)?;
        validate_required_text(&self.description, "Description", MAX_DESCRIPTION_LEN)?;
        if self.price <= Decimal::ZERO {
            return Err(AppError::new(ErrorCode::InvalidPrice)
                .with_detail("value", self.price.to_string()));
        }
        validate_features(&self.features)?;
        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            features: self.features.iter().map(|f| f.trim().to_string()).collect(),
            image: self
                .image
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}
