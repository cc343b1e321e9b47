pub mod fetcher;
pub mod web;

pub use fetcher::{PageFetcher, StaticFetcher, scrape_page};
pub use web::WebDriverFetcher;
