pub mod adoption;
pub mod animal;
pub mod breed;
pub mod daily_task;
pub mod daily_task_default_entry;
pub mod daily_task_entry;
pub mod event;
pub mod refresh_token;
pub mod shelter_configuration;
pub mod species;
pub mod user;

pub use adoption::Entity as Adoption;
pub use animal::Entity as Animal;
pub use breed::Entity as Breed;
pub use daily_task::Entity as DailyTask;
pub use daily_task_default_entry::Entity as DailyTaskDefaultEntry;
pub use daily_task_entry::Entity as DailyTaskEntry;
pub use event::Entity as Event;
pub use refresh_token::Entity as RefreshToken;
pub use shelter_configuration::Entity as ShelterConfiguration;
pub use species::Entity as Species;
pub use user::Entity as User;

pub mod prelude;
