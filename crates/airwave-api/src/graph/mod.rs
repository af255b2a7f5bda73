// RRD graph URLs
//
// AirWave renders historical graphs at `/nf/rrd_graph`, driven entirely by
// the query string. The builder is stateless: it holds the server URL and
// the default time window, and takes the access point record per call.
// No request is made here; the URL is handed to whatever transport the
// caller uses (typically an authenticated `AirWaveClient` session).

mod facade;
pub mod params;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::model::GraphRecord;

pub use facade::{ApGraphs, OPERATIONS};
pub use params::{DEFAULT_END, DEFAULT_START, GraphParams, TimeWindow, format_offset};

use params::{AP_UID, END, ID, RADIO_INDEX, RADIO_INTERFACE, START, TYPE};

/// Path of the graph rendering endpoint.
pub const GRAPH_PATH: &str = "/nf/rrd_graph";

// ── Graph vocabulary ────────────────────────────────────────────────

/// Which identifier a graph is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphScope {
    /// Keyed by the access point `@id`.
    AccessPoint,
    /// Keyed by the access point LAN MAC plus radio index and interface.
    Radio,
}

/// Graph types understood by the `rrd_graph` endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
pub enum GraphKind {
    #[strum(serialize = "ap_client_count")]
    ApClientCount,
    #[strum(serialize = "ap_bandwidth")]
    ApBandwidth,
    #[strum(serialize = "dot11_counters")]
    Dot11Counters,
    #[strum(serialize = "radio_channel")]
    RadioChannel,
    #[strum(serialize = "radio_noise")]
    RadioNoise,
    #[strum(serialize = "radio_power")]
    RadioPower,
    #[strum(serialize = "radio_errors")]
    RadioErrors,
    #[strum(serialize = "radio_goodput")]
    RadioGoodput,
    #[strum(serialize = "channel_utilization")]
    ChannelUtilization,
}

impl GraphKind {
    pub fn scope(self) -> GraphScope {
        match self {
            Self::ApClientCount | Self::ApBandwidth | Self::Dot11Counters => {
                GraphScope::AccessPoint
            }
            Self::RadioChannel
            | Self::RadioNoise
            | Self::RadioPower
            | Self::RadioErrors
            | Self::RadioGoodput
            | Self::ChannelUtilization => GraphScope::Radio,
        }
    }

    /// The token sent as the `type` parameter.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Radio technology, matched verbatim against a radio's `radio_type`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, AsRefStr, EnumIter,
)]
pub enum RadioType {
    /// IEEE 802.11b/g/n, 2.4GHz.
    #[strum(serialize = "bgn")]
    Bgn,
    /// IEEE 802.11a/n, 5GHz.
    #[strum(serialize = "aN")]
    An,
}

impl RadioType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ── GraphUrlBuilder ─────────────────────────────────────────────────

/// Builds `rrd_graph` URLs for access point records.
#[derive(Debug, Clone)]
pub struct GraphUrlBuilder {
    base_url: Url,
    default_start: i64,
    default_end: i64,
}

impl GraphUrlBuilder {
    /// Parse `base_url` (e.g. `https://airwave.example.com`) and use the
    /// stock window of the last two hours.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self::from_url(Url::parse(base_url)?))
    }

    pub fn from_url(base_url: Url) -> Self {
        Self {
            base_url,
            default_start: DEFAULT_START,
            default_end: DEFAULT_END,
        }
    }

    /// Override the offsets substituted for unset `start` / `end`.
    pub fn with_default_window(mut self, start: i64, end: i64) -> Self {
        self.default_start = start;
        self.default_end = end;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The `(start, end)` offsets used when a request leaves them unset.
    pub fn default_window(&self) -> (i64, i64) {
        (self.default_start, self.default_end)
    }

    /// Named graph operations bound to one record.
    pub fn for_record<'a>(&'a self, record: &'a GraphRecord) -> ApGraphs<'a> {
        ApGraphs::new(self, record)
    }

    /// Build the graph URL for `record`.
    ///
    /// The key parameter is `id` (from `@id`) for access point graphs and
    /// `ap_uid` (from `lan_mac`) for radio graphs; a missing key attribute
    /// is an error. Radios are scanned in order and every radio whose
    /// `radio_type` equals `radio` overwrites `radio_index` (and, for radio
    /// graphs, `radio_interface`), so the last match wins. The time window
    /// is only emitted when some radio matched; without a match the URL
    /// carries just `type` and the key.
    pub fn graph_url(
        &self,
        record: &GraphRecord,
        kind: GraphKind,
        radio: RadioType,
        window: TimeWindow,
    ) -> Result<Url, Error> {
        let params = self.graph_params(record, kind, radio, window)?;
        let url = self.assemble(&params)?;
        debug!(graph = %kind, radio = %radio, "built graph URL {}", url);
        Ok(url)
    }

    /// The parameters `graph_url` would encode, with defaults applied.
    pub fn graph_params(
        &self,
        record: &GraphRecord,
        kind: GraphKind,
        radio: RadioType,
        window: TimeWindow,
    ) -> Result<GraphParams, Error> {
        let scope = kind.scope();
        let mut params = GraphParams::new();
        params.insert(TYPE, kind.as_str());
        match scope {
            GraphScope::AccessPoint => params.insert_value(ID, record.id()?)?,
            GraphScope::Radio => params.insert_value(AP_UID, record.lan_mac()?)?,
        }

        let mut matched = false;
        for entry in record.radios() {
            if entry.radio_type() == Some(radio.as_str()) {
                trace!(radio = %radio, index = ?entry.get("@index"), "radio matched");
                params.insert_value(RADIO_INDEX, entry.index()?)?;
                if scope == GraphScope::Radio {
                    params.insert_value(RADIO_INTERFACE, entry.interface()?)?;
                }
                matched = true;
            }
        }

        if matched {
            let (start, end) = window.or_defaults(self.default_start, self.default_end);
            params.insert(START, format_offset(start));
            params.insert(END, format_offset(end));
        }
        Ok(params)
    }

    fn assemble(&self, params: &GraphParams) -> Result<Url, Error> {
        let mut url = self.base_url.join(GRAPH_PATH)?;
        url.set_query(Some(&params.encode()));
        Ok(url)
    }
}
