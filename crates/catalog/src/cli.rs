//! `hastkala-shop` command line.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use hastkala_core::Entity;

use crate::config::CatalogConfig;
use crate::product::{Category, Material, Product};
use crate::provider::CatalogProvider;
use crate::query::{PriceBracket, Query, SortKey};

#[derive(Debug, Parser)]
#[command(name = "hastkala-shop", about = "Browse the Hastkala handloom catalog", version)]
pub struct Cli {
    /// JSON catalog file (overrides HASTKALA_CATALOG_PATH).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter and sort the catalog like the shop page.
    Browse(BrowseArgs),

    /// List featured products.
    Featured,

    /// Show one product and its related products.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Shop search params, e.g. `category=sarees&sort=price-low`.
    #[arg(long)]
    pub params: Option<String>,

    #[arg(long = "category", value_parser = Category::parse)]
    pub categories: Vec<Category>,

    #[arg(long = "material", value_parser = Material::parse)]
    pub materials: Vec<Material>,

    /// all | under-2000 | 2000-5000 | above-5000
    #[arg(long, value_parser = PriceBracket::parse)]
    pub price: Option<PriceBracket>,

    /// featured | price-low | price-high | name
    #[arg(long, value_parser = SortKey::parse)]
    pub sort: Option<SortKey>,
}

impl BrowseArgs {
    /// Search params first, then explicit flags on top.
    pub fn to_query(&self) -> Query {
        let mut query = self
            .params
            .as_deref()
            .map(Query::from_search_params)
            .unwrap_or_default();

        query.categories.extend(self.categories.iter().cloned());
        query.materials.extend(self.materials.iter().cloned());
        if let Some(bracket) = self.price {
            query.price_bracket = bracket;
        }
        if let Some(key) = self.sort {
            query.sort_key = key;
        }
        query
    }
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub slug: String,

    /// Related products to list (overrides HASTKALA_RELATED_LIMIT).
    #[arg(long)]
    pub related_limit: Option<usize>,
}

/// One output line per listed product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub name: &'a str,
    pub price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_percent: Option<u8>,
    pub category: &'a str,
    pub material: &'a str,
    pub in_stock: bool,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

impl<'a> From<&'a Product> for ProductSummary<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: p.id().as_str(),
            slug: p.slug().as_str(),
            name: p.name(),
            price: p.price().amount(),
            original_price: p.original_price().map(|o| o.amount()),
            savings_percent: p.savings_percent(),
            category: p.category().as_str(),
            material: p.material().as_str(),
            in_stock: p.in_stock(),
            featured: p.featured(),
            average_rating: p.average_rating(),
        }
    }
}

fn write_summaries(out: &mut impl Write, products: &[&Product]) -> Result<()> {
    for product in products {
        serde_json::to_writer(&mut *out, &ProductSummary::from(*product))?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn run(cli: Cli, mut config: CatalogConfig, out: &mut impl Write) -> Result<()> {
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    let catalog = config.load_catalog().context("loading catalog")?;

    match cli.command {
        Commands::Browse(args) => {
            let query = args.to_query();
            let view = catalog.query(&query);
            if view.is_empty() && query.is_filtered() {
                tracing::info!(
                    params = %query.to_search_params(),
                    "no products found matching filters"
                );
            }
            tracing::info!(count = view.len(), "showing products");
            write_summaries(out, &view)
        }
        Commands::Featured => write_summaries(out, &catalog.featured()),
        Commands::Show(args) => {
            let Some(product) = catalog.by_slug(&args.slug) else {
                bail!("product `{}` not found", args.slug);
            };
            serde_json::to_writer_pretty(&mut *out, product)?;
            writeln!(out)?;

            let limit = args.related_limit.unwrap_or(config.related_limit);
            write_summaries(out, &catalog.related(product, limit))
        }
    }
}
