pub use super::adoption::Entity as Adoption;
pub use super::animal::Entity as Animal;
pub use super::breed::Entity as Breed;
pub use super::daily_task::Entity as DailyTask;
pub use super::daily_task_default_entry::Entity as DailyTaskDefaultEntry;
pub use super::daily_task_entry::Entity as DailyTaskEntry;
pub use super::event::Entity as Event;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::shelter_configuration::Entity as ShelterConfiguration;
pub use super::species::Entity as Species;
pub use super::user::Entity as User;
