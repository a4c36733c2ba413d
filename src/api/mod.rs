pub mod adoptions;
pub mod animals;
pub mod auth;
pub mod configuration;
pub mod daily_tasks;
pub mod events;
pub mod middleware;
pub mod rate_limit;
pub mod species;
pub mod users;
