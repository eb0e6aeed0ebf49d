pub mod http;
pub mod remote;

pub use http::HttpDealsRemote;
pub use remote::{
    BoardFilters, BoardPayload, BoardQuery, BoardSummary, DealsRemote, RemoteError, StageMetric,
};
