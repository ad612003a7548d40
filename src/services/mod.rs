pub mod analytics;
pub mod export;
pub mod interaction;
pub mod interlocutors;
pub mod pipeline;
pub mod progress;
pub mod scenes;
pub mod smoothing;

pub use analytics::{compute_centrality, CentralityMetric, SpeakerCentrality};
pub use export::{export_network, GraphFormat, NetworkExport};
pub use interaction::build_interaction_network;
pub use interlocutors::{estimate_interlocutors, estimate_scene};
pub use pipeline::{generate_network, GeneratedNetwork};
pub use progress::{NoopProgressReporter, ProgressReporter};
pub use scenes::assign_turns_to_scenes;
pub use smoothing::narrative_smoothing;
