//! # Harvest Module
//!
//! The genre-to-artist collection pipeline:
//!
//! ```text
//! genres ──> Harvester ──(per genre)──> Collector ──> rank ──> RecordSink
//! ```
//!
//! - [`Collector`] pages through the catalog search for one genre until the
//!   quota is met, the catalog runs dry, or a page request fails. A failed
//!   page keeps what was gathered so far.
//! - [`rank`] orders a genre's artists by popularity (stable for ties) and
//!   truncates them.
//! - [`Harvester`] runs both for every genre in order, hands each ranked batch
//!   to a [`RecordSink`] and reports progress through a callback. Only sink
//!   failures abort a run.
//! - [`validate_genres`] keeps the genres for which the catalog has tracks.
//!
//! Everything is strictly sequential: one outstanding request at a time, with
//! a fixed throttle between requests.

mod aggregator;
mod collector;
mod ranker;
mod traits;
mod validate;

pub use aggregator::{DEFAULT_POOL_SIZE, GenreReport, HarvestSummary, Harvester, Progress};
pub use collector::{Collection, Collector, DEFAULT_THROTTLE, MAX_PAGE_SIZE};
pub use ranker::rank;
pub use traits::{ArtistSearch, GenreCheck, RecordSink};
pub use validate::{ValidationProgress, validate_genres};
