pub mod disclosure;
pub mod html;
pub mod pages;
pub mod routes;
pub mod site;
pub mod themes;

pub use disclosure::{CardField, DisclosureState, QuestionCard};
pub use pages::PageOutcome;
pub use routes::Route;
pub use site::{publish_site, ProgressFn, PublishError, PublishOptions, PublishResult, SiteRenderer};
