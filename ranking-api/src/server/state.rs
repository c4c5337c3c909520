// App state for Axum server
use std::sync::Arc;

use ranking_pipeline::ballot::BallotBox;
use ranking_pipeline::listing::ListingService;

#[derive(Clone)]
pub struct AppState {
    pub listing: Arc<ListingService>,
    pub ballot: Arc<BallotBox>,
}
