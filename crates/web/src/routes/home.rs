//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

use super::products::ProductView;

/// A single slide in the home hero carousel.
#[derive(Debug, Clone)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_url: String,
    pub image_url: String,
}

/// Static hero content for the landing carousel.
fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            title: "Built For The Grind".to_string(),
            subtitle: "Performance gymwear that moves with you".to_string(),
            button_text: "Shop Now".to_string(),
            button_url: "/shop".to_string(),
            image_url: "/static/images/hero/grind.jpg".to_string(),
        },
        HeroSlide {
            title: "New Season Drop".to_string(),
            subtitle: "The latest Silsila series has landed".to_string(),
            button_text: "Explore The Lookbook".to_string(),
            button_url: "/lookbook".to_string(),
            image_url: "/static/images/hero/drop.jpg".to_string(),
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub slides: Vec<HeroSlide>,
    pub trending: Vec<ProductView>,
}

/// Display the home page: hero carousel plus the trending shelf.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<HomeTemplate> {
    let trending = state.backend().trending_products().await?;

    Ok(HomeTemplate {
        slides: hero_slides(),
        trending: trending.iter().take(8).map(ProductView::from).collect(),
    })
}
