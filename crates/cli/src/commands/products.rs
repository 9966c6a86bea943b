//! Product catalogue commands.

use std::io::Write;

use clap::{Args, Subcommand};

use selam_admin::controllers::ListFilter;
use selam_admin::detail::DetailView;
use selam_admin::forms::ProductForm;
use selam_admin::{AppError, Dashboard, DashboardView, render};
use selam_core::{ProductStatus, Slug};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List {
        /// Search name, category and summary
        #[arg(short, long)]
        search: Option<String>,

        /// active, coming_soon, discontinued or all
        #[arg(long, default_value = "all")]
        status: String,

        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show one product and its status options
    Show { slug: Slug },
    /// Create a product; the slug is derived from the name
    Create(ProductArgs),
    /// Change some fields of a product
    Update {
        slug: Slug,
        #[command(flatten)]
        changes: ProductChanges,
    },
    /// Change catalogue status
    SetStatus { slug: Slug, status: ProductStatus },
    /// Archive a product
    Archive { slug: Slug },
}

#[derive(Args)]
pub struct ProductArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    /// Short description
    #[arg(long)]
    summary: String,
    /// Long description (defaults to the summary)
    #[arg(long, default_value = "")]
    description: String,
    /// Repeat for each feature
    #[arg(long = "feature")]
    features: Vec<String>,
    #[arg(long, default_value = "")]
    price_model: String,
    #[arg(long, default_value = "")]
    hero_image: String,
    #[arg(long)]
    status: Option<ProductStatus>,
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            category: args.category,
            short_description: args.summary,
            long_description: args.description,
            features_text: args.features.join("\n"),
            hero_image_url: args.hero_image,
            price_model: args.price_model,
            rating: None,
            users_count: None,
            status: args.status,
        }
    }
}

#[derive(Args)]
pub struct ProductChanges {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    summary: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Repeat for each feature; replaces the whole list
    #[arg(long = "feature")]
    features: Vec<String>,
    #[arg(long)]
    price_model: Option<String>,
    #[arg(long)]
    hero_image: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
    #[arg(long)]
    users: Option<u64>,
}

impl ProductChanges {
    fn apply_to(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(summary) = self.summary {
            form.short_description = summary;
        }
        if let Some(description) = self.description {
            form.long_description = description;
        }
        if !self.features.is_empty() {
            form.features_text = self.features.join("\n");
        }
        if let Some(price_model) = self.price_model {
            form.price_model = price_model;
        }
        if let Some(hero_image) = self.hero_image {
            form.hero_image_url = hero_image;
        }
        if self.rating.is_some() {
            form.rating = self.rating;
        }
        if self.users.is_some() {
            form.users_count = self.users;
        }
    }
}

pub async fn run<W: Write>(
    dashboard: &mut Dashboard,
    out: &mut W,
    action: ProductAction,
) -> Result<(), CliError> {
    match action {
        ProductAction::List {
            search,
            status,
            category,
        } => {
            dashboard.navigate(DashboardView::Products).await?;
            let status = super::applications::normalize_status(&status);
            let filter = ListFilter::new()
                .term(search.as_deref().unwrap_or(""))
                .facet("status", &status)
                .facet("category", &category);
            render::products(out, &dashboard.products.filter(&filter))?;
        }
        ProductAction::Show { slug } => {
            dashboard.navigate(DashboardView::Products).await?;
            dashboard.products.select(slug.as_str())?;
            if let Some(view) = DetailView::of(&dashboard.products) {
                render::detail(out, &view)?;
                writeln!(out)?;
                render::status_options(out, &view.status_options())?;
            }
        }
        ProductAction::Create(args) => {
            // Loaded first so a taken slug is caught before the request.
            dashboard.navigate(DashboardView::Products).await?;
            let draft = ProductForm::from(args).into_draft()?;
            let slug = draft.slug.clone();
            let result = dashboard.products.create(draft).await;
            dashboard.observe(result)?;
            writeln!(out, "Product created: {slug}")?;
        }
        ProductAction::Update { slug, changes } => {
            dashboard.navigate(DashboardView::Products).await?;
            let original = dashboard.products.select(slug.as_str())?.clone();

            let mut form = ProductForm::from_product(&original);
            changes.apply_to(&mut form);
            let patch = form.diff(&original);
            if patch.is_empty() {
                return Err(AppError::Validation("Nothing to update".to_string()).into());
            }

            let result = dashboard.products.update(&slug, patch).await;
            dashboard.observe(result)?;
            writeln!(out, "Product updated.")?;
        }
        ProductAction::SetStatus { slug, status } => {
            dashboard.navigate(DashboardView::Products).await?;
            dashboard.products.select(slug.as_str())?;
            let result = dashboard.products.update_status(&slug, status).await;
            dashboard.observe(result)?;
            if let Some(view) = DetailView::of(&dashboard.products) {
                writeln!(out, "{}: {}", view.heading(), view.status_label())?;
            }
        }
        ProductAction::Archive { slug } => {
            let result = dashboard.products.delete(&slug).await;
            dashboard.observe(result)?;
            writeln!(out, "Product archived.")?;
        }
    }
    Ok(())
}
