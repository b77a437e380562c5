//! Marketing page handlers: about, FAQs, lookbook, trending.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::products::ProductView;

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate;

/// Display the about page.
pub async fn about() -> AboutTemplate {
    AboutTemplate
}

/// One frequently asked question.
#[derive(Debug, Clone)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// FAQs page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/faqs.html")]
pub struct FaqsTemplate {
    pub faqs: Vec<Faq>,
}

/// Display the FAQs page. The FAQ copy is site content, not backend data.
pub async fn faqs() -> FaqsTemplate {
    let faqs = vec![
        Faq {
            question: "How long does shipping take?".to_string(),
            answer: "Orders ship within 2 business days and arrive in 3-7 days \
                     depending on your region."
                .to_string(),
        },
        Faq {
            question: "What is your return policy?".to_string(),
            answer: "Unworn items can be returned within 30 days of delivery for \
                     a full refund."
                .to_string(),
        },
        Faq {
            question: "How do I find my size?".to_string(),
            answer: "Each product page lists the available sizes. Our fits run \
                     true to size; size up for a relaxed fit."
                .to_string(),
        },
        Faq {
            question: "How can I track my order?".to_string(),
            answer: "Use the order number from your confirmation email on the \
                     track-order page."
                .to_string(),
        },
    ];
    FaqsTemplate { faqs }
}

/// Theme display data for the lookbook.
#[derive(Debug, Clone)]
pub struct ThemeView {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Lookbook page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/lookbook.html")]
pub struct LookbookTemplate {
    pub themes: Vec<ThemeView>,
}

/// Display the lookbook: every theme with its imagery.
#[instrument(skip(state))]
pub async fn lookbook(State(state): State<AppState>) -> Result<LookbookTemplate> {
    let themes = state.backend().list_themes().await?;
    Ok(LookbookTemplate {
        themes: themes
            .iter()
            .map(|t| ThemeView {
                name: t.name.clone(),
                slug: t.slug.clone(),
                description: t.description.clone(),
                image_url: t.image_url.clone(),
            })
            .collect(),
    })
}

/// Trending page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/trending.html")]
pub struct TrendingTemplate {
    pub products: Vec<ProductView>,
}

/// Display the trending products page.
#[instrument(skip(state))]
pub async fn trending(State(state): State<AppState>) -> Result<TrendingTemplate> {
    let products = state.backend().trending_products().await?;
    Ok(TrendingTemplate {
        products: products.iter().map(ProductView::from).collect(),
    })
}
