/// Use cases module containing application business logic orchestration
mod explore_inventory;

pub use explore_inventory::ExploreInventoryUseCase;
