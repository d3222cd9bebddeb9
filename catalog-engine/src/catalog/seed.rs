//! Bootstrap datasets
//!
//! The tree is created once at startup, either from the built-in demo data or
//! from a JSON file in the wire shape of [`Catalog`].

use crate::utils::validation::{MAX_NAME_LEN, validate_features, validate_required_text};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Catalog, Category, Product, SubSubcategory, Subcategory};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn product(id: i64, name: &str, price: i64, description: &str, feats: &[&str], image: &str) -> Arc<Product> {
    Arc::new(Product {
        id,
        name: name.into(),
        description: description.into(),
        price: Decimal::from(price),
        features: features(feats),
        image: image.into(),
    })
}

fn sub_sub(name: &str, parent: &str, feats: &[&str], image: &str, products: Vec<Arc<Product>>) -> Arc<SubSubcategory> {
    Arc::new(SubSubcategory {
        name: name.into(),
        image: image.into(),
        features: features(feats),
        parent_id: parent.into(),
        products,
    })
}

/// The demo expense catalog every fresh session starts with
pub fn bootstrap_catalog(image: &str) -> Catalog {
    let stationery = sub_sub(
        "Stationery",
        "Office Supplies",
        &["Writing", "Paper-Based"],
        image,
        vec![
            product(
                1,
                "Smart Pen",
                2999,
                "A smart pen for seamless digital note-taking with real-time sync.",
                &["Digital note-taking", "Bluetooth sync", "USB-C charging", "Ergonomic design"],
                image,
            ),
            product(
                2,
                "Eco Notebook",
                499,
                "Sustainable notebook designed for eco-conscious professionals.",
                &["Recyclable paper", "Hardcover", "Bookmark ribbon", "100 pages"],
                image,
            ),
        ],
    );
    let desk = sub_sub(
        "Desk Accessories",
        "Office Supplies",
        &["Organization", "Aesthetics"],
        image,
        vec![product(
            3,
            "Desk Organizer",
            1499,
            "Organize your workspace with this stylish, modular desk accessory.",
            &["Modular design", "Phone holder", "Cable management", "Non-slip base"],
            image,
        )],
    );
    let productivity = sub_sub(
        "Productivity Tools",
        "Software Subscriptions",
        &["Collaboration", "Analytics"],
        image,
        vec![product(
            4,
            "Pro Suite",
            999,
            "All-in-one productivity software for teams and individuals.",
            &["Cloud storage", "Team collaboration", "AI analytics", "Mobile app"],
            image,
        )],
    );
    let crafts = sub_sub(
        "Craft Supplies",
        "Raw Materials",
        &["Sustainable", "Creative"],
        image,
        vec![product(
            5,
            "Artisan Kit",
            2499,
            "Create sustainable crafts with this premium artisan kit.",
            &["Natural dyes", "Reusable tools", "Instruction guide", "Eco-friendly"],
            image,
        )],
    );

    Catalog::new(vec![
        Category {
            name: "Operating Expenses".into(),
            image: image.into(),
            features: features(&["Essential", "Daily Operations"]),
            subcategories: vec![
                Arc::new(Subcategory {
                    name: "Office Supplies".into(),
                    image: image.into(),
                    features: features(&["Stationery", "Organization"]),
                    parent_id: "Operating Expenses".into(),
                    sub_subcategories: vec![stationery, desk],
                }),
                Arc::new(Subcategory {
                    name: "Software Subscriptions".into(),
                    image: image.into(),
                    features: features(&["Productivity", "Cloud-Based"]),
                    parent_id: "Operating Expenses".into(),
                    sub_subcategories: vec![productivity],
                }),
            ],
        },
        Category {
            name: "Cost of Goods Sold (COGS)".into(),
            image: image.into(),
            features: features(&["Production", "Inventory"]),
            subcategories: vec![Arc::new(Subcategory {
                name: "Raw Materials".into(),
                image: image.into(),
                features: features(&["Sourcing", "Quality"]),
                parent_id: "Cost of Goods Sold (COGS)".into(),
                sub_subcategories: vec![crafts],
            })],
        },
    ])
}

/// Load a catalog from a JSON file and check its invariants.
///
/// `parentId` fields are restamped from containment. Names and features are
/// validated and trimmed like form input, prices must be positive, and
/// duplicate sibling names or product ids are rejected.
pub fn load_catalog(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&raw)?;
    let catalog = normalize(catalog)?;
    tracing::info!(
        path = %path.display(),
        categories = catalog.categories.len(),
        products = catalog.products().count(),
        "Catalog loaded"
    );
    Ok(catalog)
}

fn check_unique<'a>(level: &str, names: impl Iterator<Item = &'a str>) -> AppResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(AppError::duplicate_name(level, name));
        }
    }
    Ok(())
}

/// Trimmed name and features of one seed node
fn clean_node(level: &str, name: &str, features: &[String]) -> AppResult<(String, Vec<String>)> {
    let located = |e: AppError| e.with_detail("level", level).with_detail("name", name);
    validate_required_text(name, "Name", MAX_NAME_LEN).map_err(located)?;
    validate_features(features).map_err(located)?;
    Ok((
        name.trim().to_string(),
        features.iter().map(|f| f.trim().to_string()).collect(),
    ))
}

fn clean_product(product: &Product) -> AppResult<Arc<Product>> {
    let (name, features) = clean_node("Product", &product.name, &product.features)
        .map_err(|e| e.with_detail("id", product.id))?;
    if product.price <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::InvalidPrice)
            .with_detail("id", product.id)
            .with_detail("value", product.price.to_string()));
    }
    Ok(Arc::new(Product {
        name,
        description: product.description.trim().to_string(),
        features,
        ..product.clone()
    }))
}

fn normalize(catalog: Catalog) -> AppResult<Catalog> {
    let mut ids = HashSet::new();
    for product in catalog.products() {
        if !ids.insert(product.id) {
            return Err(AppError::with_message(
                ErrorCode::AlreadyExists,
                format!("Duplicate product id {}", product.id),
            )
            .with_detail("id", product.id));
        }
    }

    let mut categories = Vec::with_capacity(catalog.categories.len());
    for category in &catalog.categories {
        let (category_name, category_features) =
            clean_node("Category", &category.name, &category.features)?;
        let mut subcategories = Vec::with_capacity(category.subcategories.len());
        for sub in &category.subcategories {
            let (sub_name, sub_features) = clean_node("Subcategory", &sub.name, &sub.features)?;
            let mut sub_subcategories = Vec::with_capacity(sub.sub_subcategories.len());
            for ss in &sub.sub_subcategories {
                let (name, features) = clean_node("Sub-Subcategory", &ss.name, &ss.features)?;
                let products = ss
                    .products
                    .iter()
                    .map(|p| clean_product(p))
                    .collect::<AppResult<Vec<_>>>()?;
                sub_subcategories.push(Arc::new(SubSubcategory {
                    name,
                    features,
                    parent_id: sub_name.clone(),
                    products,
                    ..SubSubcategory::clone(ss)
                }));
            }
            check_unique(
                "Sub-Subcategory",
                sub_subcategories.iter().map(|s| s.name.as_str()),
            )?;
            subcategories.push(Arc::new(Subcategory {
                name: sub_name,
                features: sub_features,
                parent_id: category_name.clone(),
                sub_subcategories,
                ..Subcategory::clone(sub)
            }));
        }
        check_unique("Subcategory", subcategories.iter().map(|s| s.name.as_str()))?;
        categories.push(Arc::new(Category {
            name: category_name,
            features: category_features,
            subcategories,
            ..Category::clone(category)
        }));
    }
    check_unique("Category", categories.iter().map(|c| c.name.as_str()))?;
    Ok(Catalog { categories })
}
