mod event;
mod fight;
mod fight_time;
mod pick;
mod user;
mod user_stats;

pub use event::Event;
pub use fight::{Corner, Fight, FightResult, FinishMethod, Outcome};
pub use fight_time::{FightTime, FightTimeError};
pub use pick::{Pick, PickDetail};
pub use user::User;
pub use user_stats::UserStats;
