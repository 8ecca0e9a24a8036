pub mod config;
pub mod decode;
pub mod draw;
pub mod layout;
pub mod locate;
pub mod model;
pub mod poll;
pub mod stats;
pub mod store;
pub mod view;

pub use config::EngineConfig;
pub use decode::{decode, DecodeError};
pub use draw::{build_frame, DrawPrimitive, DrawStyle, EdgeClass, Frame, Rgb};
pub use layout::{JitterSource, LayoutCache, LayoutParams, NoJitter, Point2, SeededJitter};
pub use locate::{find_latest, list_snapshots};
pub use model::{Edge, GraphState, Node, NodeId};
pub use poll::{PollError, PollOutcome, SnapshotPoller, TickReport};
pub use stats::{SnapshotDiff, SnapshotStats};
pub use store::LiveGraph;
pub use view::{ViewController, ViewEvents, ViewToggles};
