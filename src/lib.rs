pub mod config;
pub mod dom;
pub mod gesture;
pub mod player;
pub mod skins;
pub mod time;
pub mod view;
pub mod watcher;
pub mod window_view;

pub use config::{BridgeConfig, TrackingRegion};
pub use dom::{DocumentBinding, Node, PageDocument};
pub use gesture::GesturePhase;
pub use player::{PlayerCommand, PlayerControl, RecordingPlayer};
pub use skins::{SkinCatalog, SkinInfo};
pub use time::MediaTime;
pub use view::{PlaybackSnapshot, StyledView};
pub use watcher::SkinWatcher;
pub use window_view::StyledWindowView;
