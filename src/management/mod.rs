mod features;
mod playlist;
mod session;
pub mod token;

pub use features::FEATURE_TTL_MS;
pub use features::FeatureCache;
pub use features::FeatureService;
pub use features::cache_key;
pub use features::resolve_features;
pub use playlist::AddReport;
pub use playlist::MoveError;
pub use playlist::MovePhase;
pub use playlist::PlaylistApi;
pub use playlist::add_tracks;
pub use playlist::move_tracks;
pub use playlist::reorder_track;
pub use playlist::translate_reorder;
pub use session::SESSION_COOKIE;
pub use session::SESSION_MAX_AGE_DAYS;
pub use session::STATE_COOKIE;
pub use session::STATE_MAX_AGE_MINUTES;
pub use session::SessionCodec;
pub use session::SessionDecodeError;
pub use token::FreshSession;
pub use token::ensure_fresh;
pub use token::needs_refresh;
