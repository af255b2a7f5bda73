// Named graph operations
//
// One method per (graph type, radio technology) pair, generated from the
// table at the bottom of this file. Each is a thin call into
// `GraphUrlBuilder::graph_url`.

use url::Url;

use super::{GraphKind, GraphUrlBuilder, RadioType, TimeWindow};
use crate::error::Error;
use crate::model::GraphRecord;

/// A [`GraphUrlBuilder`] bound to one access point record.
///
/// ```no_run
/// # fn demo(record: &airwave_api::GraphRecord) -> Result<(), airwave_api::Error> {
/// let builder = airwave_api::GraphUrlBuilder::new("https://192.168.1.1")?;
/// let url = builder.for_record(record).client_count_802dot11bgn(Some(-3600), None)?;
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApGraphs<'a> {
    builder: &'a GraphUrlBuilder,
    record: &'a GraphRecord,
}

impl<'a> ApGraphs<'a> {
    pub(crate) fn new(builder: &'a GraphUrlBuilder, record: &'a GraphRecord) -> Self {
        Self { builder, record }
    }

    pub fn record(&self) -> &'a GraphRecord {
        self.record
    }

    pub fn graph(
        &self,
        kind: GraphKind,
        radio: RadioType,
        window: TimeWindow,
    ) -> Result<Url, Error> {
        self.builder.graph_url(self.record, kind, radio, window)
    }
}

macro_rules! graph_operations {
    ($($(#[$doc:meta])* $name:ident => ($kind:ident, $radio:ident);)*) => {
        impl ApGraphs<'_> {
            $(
                $(#[$doc])*
                pub fn $name(&self, start: Option<i64>, end: Option<i64>) -> Result<Url, Error> {
                    self.graph(GraphKind::$kind, RadioType::$radio, TimeWindow::new(start, end))
                }
            )*
        }

        /// Every named operation as `(method, graph type, radio technology)`.
        pub const OPERATIONS: &[(&str, GraphKind, RadioType)] = &[
            $((stringify!($name), GraphKind::$kind, RadioType::$radio),)*
        ];
    };
}

graph_operations! {
    /// Client count on the 2.4GHz (b/g/n) radio.
    client_count_802dot11bgn => (ApClientCount, Bgn);
    /// Client count on the 5GHz (a/n) radio.
    client_count_802dot11an => (ApClientCount, An);
    /// Access point bandwidth, 2.4GHz radio.
    bandwidth_802dot11bgn => (ApBandwidth, Bgn);
    /// Access point bandwidth, 5GHz radio.
    bandwidth_802dot11an => (ApBandwidth, An);
    /// 802.11 counters, 2.4GHz radio.
    dot11_counters_802dot11bgn => (Dot11Counters, Bgn);
    /// 802.11 counters, 5GHz radio.
    dot11_counters_802dot11an => (Dot11Counters, An);
    /// Radio channel history, 2.4GHz.
    radio_channel_802dot11bgn => (RadioChannel, Bgn);
    /// Radio channel history, 5GHz.
    radio_channel_802dot11an => (RadioChannel, An);
    /// Noise floor, 2.4GHz.
    radio_noise_802dot11bgn => (RadioNoise, Bgn);
    /// Noise floor, 5GHz.
    radio_noise_802dot11an => (RadioNoise, An);
    /// Transmit power, 2.4GHz.
    radio_power_802dot11bgn => (RadioPower, Bgn);
    /// Transmit power, 5GHz.
    radio_power_802dot11an => (RadioPower, An);
    /// Radio errors, 2.4GHz.
    radio_errors_802dot11bgn => (RadioErrors, Bgn);
    /// Radio errors, 5GHz.
    radio_errors_802dot11an => (RadioErrors, An);
    /// Goodput, 2.4GHz.
    radio_goodput_802dot11bgn => (RadioGoodput, Bgn);
    /// Goodput, 5GHz.
    radio_goodput_802dot11an => (RadioGoodput, An);
    /// Channel utilization, 2.4GHz.
    channel_utilization_802dot11bgn => (ChannelUtilization, Bgn);
    /// Channel utilization, 5GHz.
    channel_utilization_802dot11an => (ChannelUtilization, An);
}
