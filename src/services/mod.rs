//! Business logic services

pub mod circulation;
pub mod inventory;
pub mod members;
pub mod overview;
pub mod purchasing;
pub mod search;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub inventory: inventory::InventoryService,
    pub purchasing: purchasing::PurchasingService,
    pub members: members::MembersService,
    pub circulation: circulation::CirculationService,
    pub search: search::SearchService,
    pub overview: overview::OverviewService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            inventory: inventory::InventoryService::new(repository.clone()),
            purchasing: purchasing::PurchasingService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            search: search::SearchService::new(repository.clone()),
            overview: overview::OverviewService::new(repository),
        }
    }
}
