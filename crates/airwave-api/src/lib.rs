//! Rust client for the Aruba AirWave management server.
//!
//! - **[`GraphUrlBuilder`]** — builds `/nf/rrd_graph` URLs for an access
//!   point record. Stateless and I/O-free; [`ApGraphs`] adds one named
//!   method per (graph type, radio technology) pair.
//! - **[`GraphRecord`] / [`ApList`]** — read-only views over access point
//!   attribute mappings, parsed from AirWave XML by [`xml`].
//! - **[`AirWaveClient`]** — async session login and the XML API read
//!   endpoints (`ap_list.xml`, `ap_detail.xml`, reports, ...).

pub mod client;
pub mod error;
pub mod graph;
pub mod model;
pub mod transport;
pub mod xml;

pub use client::AirWaveClient;
pub use error::Error;
pub use graph::{
    ApGraphs, GraphKind, GraphParams, GraphScope, GraphUrlBuilder, RadioType, TimeWindow,
};
pub use model::{ApList, ApLookup, GraphRecord, RadioRecord};
pub use transport::{TlsMode, TransportConfig};
