//! Client-side engine for the random profile card: subject selection, image
//! carousel, reaction counts, and the animated randomize transition.

pub mod age;
pub mod assembler;
pub mod carousel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod reactions;
pub mod selector;
pub mod transport;
pub mod types;
pub mod view;

pub use age::{compute_age, AgeOutcome, Clock, FixedClock, SystemClock};
pub use assembler::{DataAssembler, DirectoryService, ImageCatalogService};
pub use carousel::Carousel;
pub use config::{load_settings, load_settings_from, CardSettings};
pub use coordinator::{
    AnimationCoordinator, AnimationPhase, CardEvent, RandomizeOutcome, SessionStatus,
    TransitionTimings,
};
pub use error::CardError;
pub use reactions::{ReactionKind, ReactionTracker};
pub use selector::RandomSelector;
pub use transport::HttpServiceClient;
pub use types::{ImageAsset, Subject, SubjectImageSet};
pub use view::CardView;
