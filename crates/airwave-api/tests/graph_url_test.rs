#![allow(clippy::unwrap_used)]
// Graph URL generation against realistic access point records.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use airwave_api::graph::OPERATIONS;
use airwave_api::{
    Error, GraphKind, GraphRecord, GraphScope, GraphUrlBuilder, RadioType, TimeWindow,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn builder() -> GraphUrlBuilder {
    GraphUrlBuilder::new("https://x.x.x.x").unwrap()
}

fn record(value: Value) -> GraphRecord {
    GraphRecord::from_value(value).unwrap()
}

/// An AP with one radio per technology, shaped like a parsed `ap_detail.xml`.
fn dual_radio_ap() -> GraphRecord {
    record(json!({
        "@id": "1",
        "name": "AP001",
        "lan_mac": "00:00:10:00:00:03",
        "radio": [
            {"@index": "1", "radio_interface": "2", "radio_type": "bgn"},
            {"@index": "2", "radio_interface": "1", "radio_type": "aN"}
        ]
    }))
}

fn query(url: &url::Url) -> &str {
    url.query().unwrap_or_default()
}

// ── Documented examples ─────────────────────────────────────────────

#[test]
fn client_count_bgn_example() {
    let ap = record(json!({
        "@id": 1,
        "radio": [{"radio_type": "bgn", "@index": 1}]
    }));

    let url = builder()
        .for_record(&ap)
        .client_count_802dot11bgn(Some(-3600), None)
        .unwrap();

    assert_eq!(
        url.as_str(),
        "https://x.x.x.x/nf/rrd_graph?end=0s&id=1&radio_index=1&start=-3600s&type=ap_client_count"
    );
}

#[test]
fn radio_channel_an_example() {
    let ap = record(json!({
        "lan_mac": "00:00:10:00:00:03",
        "radio": [{"radio_type": "aN", "@index": 2, "radio_interface": 1}]
    }));

    let url = builder()
        .for_record(&ap)
        .radio_channel_802dot11an(Some(-3600), None)
        .unwrap();

    assert_eq!(
        query(&url),
        "ap_uid=00%3A00%3A10%3A00%3A00%3A03&end=0s&radio_index=2&radio_interface=1\
         &start=-3600s&type=radio_channel"
    );
}

// ── Records parsed from ap_detail.xml ───────────────────────────────

const AP_DETAIL_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<amp:amp_ap_detail version="1" xmlns:amp="http://www.airwave.com">
  <ap id="1">
    <name>AP001</name>
    <lan_mac>00:00:10:00:00:03</lan_mac>
    <radio index="1">
      <radio_interface>2</radio_interface>
      <radio_type>bgn</radio_type>
      <client id="11000001"><signal>-43</signal><snr>51</snr></client>
    </radio>
    <radio index="2">
      <radio_interface>1</radio_interface>
      <radio_type>aN</radio_type>
    </radio>
  </ap>
</amp:amp_ap_detail>"#;

#[test]
fn ap_detail_xml_feeds_graph_urls() {
    let ap = GraphRecord::from_ap_detail_xml(AP_DETAIL_XML).unwrap();
    let b = builder();
    let g = b.for_record(&ap);

    let url = g.radio_power_802dot11an(Some(-3600), None).unwrap();
    assert_eq!(
        query(&url),
        "ap_uid=00%3A00%3A10%3A00%3A00%3A03&end=0s&radio_index=2&radio_interface=1\
         &start=-3600s&type=radio_power"
    );

    let url = g.client_count_802dot11bgn(None, None).unwrap();
    assert_eq!(
        query(&url),
        "end=0s&id=1&radio_index=1&start=-7200s&type=ap_client_count"
    );
}

#[test]
fn ap_detail_xml_matches_hand_built_record() {
    let parsed = GraphRecord::from_ap_detail_xml(AP_DETAIL_XML).unwrap();
    let hand_built = dual_radio_ap();
    let window = TimeWindow::new(Some(-600), None);
    let b = builder();
    for (name, kind, radio) in OPERATIONS {
        let from_xml = b.graph_url(&parsed, *kind, *radio, window).unwrap();
        let by_hand = b.graph_url(&hand_built, *kind, *radio, window).unwrap();
        assert_eq!(from_xml, by_hand, "operation {name}");
    }
}

// ── Every named operation ───────────────────────────────────────────

#[test]
fn named_operations_match_the_operation_table() {
    let ap = dual_radio_ap();
    let b = builder();
    let g = b.for_record(&ap);
    let (s, e) = (Some(-3600), Some(-60));

    let produced = [
        ("client_count_802dot11bgn", g.client_count_802dot11bgn(s, e)),
        ("client_count_802dot11an", g.client_count_802dot11an(s, e)),
        ("bandwidth_802dot11bgn", g.bandwidth_802dot11bgn(s, e)),
        ("bandwidth_802dot11an", g.bandwidth_802dot11an(s, e)),
        ("dot11_counters_802dot11bgn", g.dot11_counters_802dot11bgn(s, e)),
        ("dot11_counters_802dot11an", g.dot11_counters_802dot11an(s, e)),
        ("radio_channel_802dot11bgn", g.radio_channel_802dot11bgn(s, e)),
        ("radio_channel_802dot11an", g.radio_channel_802dot11an(s, e)),
        ("radio_noise_802dot11bgn", g.radio_noise_802dot11bgn(s, e)),
        ("radio_noise_802dot11an", g.radio_noise_802dot11an(s, e)),
        ("radio_power_802dot11bgn", g.radio_power_802dot11bgn(s, e)),
        ("radio_power_802dot11an", g.radio_power_802dot11an(s, e)),
        ("radio_errors_802dot11bgn", g.radio_errors_802dot11bgn(s, e)),
        ("radio_errors_802dot11an", g.radio_errors_802dot11an(s, e)),
        ("radio_goodput_802dot11bgn", g.radio_goodput_802dot11bgn(s, e)),
        ("radio_goodput_802dot11an", g.radio_goodput_802dot11an(s, e)),
        (
            "channel_utilization_802dot11bgn",
            g.channel_utilization_802dot11bgn(s, e),
        ),
        (
            "channel_utilization_802dot11an",
            g.channel_utilization_802dot11an(s, e),
        ),
    ];

    assert_eq!(produced.len(), OPERATIONS.len());
    for ((name, url), (op_name, kind, radio)) in produced.into_iter().zip(OPERATIONS) {
        assert_eq!(name, *op_name);
        let url = url.unwrap();

        let (index, interface) = match radio {
            RadioType::Bgn => ("1", "2"),
            RadioType::An => ("2", "1"),
        };
        let tail = format!("start=-3600s&type={kind}");
        let expected = match kind.scope() {
            GraphScope::AccessPoint => format!("end=-60s&id=1&radio_index={index}&{tail}"),
            GraphScope::Radio => {
                let head = "ap_uid=00%3A00%3A10%3A00%3A00%3A03&end=-60s";
                format!("{head}&radio_index={index}&radio_interface={interface}&{tail}")
            }
        };
        assert_eq!(query(&url), expected, "operation {name}");
        assert_eq!(url.path(), "/nf/rrd_graph");
    }
}

// ── Properties ──────────────────────────────────────────────────────

#[test]
fn query_keys_are_sorted() {
    let ap = dual_radio_ap();
    let window = TimeWindow::new(Some(-10), Some(-5));
    let b = builder();
    for (_, kind, radio) in OPERATIONS {
        let url = b.graph_url(&ap, *kind, *radio, window).unwrap();
        let keys: Vec<_> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}

#[test]
fn unset_and_zero_offsets_use_defaults() {
    let ap = dual_radio_ap();
    let b = builder();
    let windows = [
        TimeWindow::new(None, None),
        TimeWindow::new(Some(0), Some(0)),
        TimeWindow::new(None, Some(0)),
        TimeWindow::new(Some(0), None),
    ];
    for window in windows {
        let params = b
            .graph_params(&ap, GraphKind::RadioNoise, RadioType::Bgn, window)
            .unwrap();
        assert_eq!(params.get("start"), Some("-7200s"));
        assert_eq!(params.get("end"), Some("0s"));
    }
}

#[test]
fn nonzero_offsets_are_passed_through() {
    let ap = dual_radio_ap();
    for t in [-86400_i64, -3600, -1, 1, 3600] {
        let window = TimeWindow::new(Some(t), Some(t));
        let params = builder()
            .graph_params(&ap, GraphKind::ApBandwidth, RadioType::An, window)
            .unwrap();
        assert_eq!(params.get("start"), Some(format!("{t}s").as_str()));
        assert_eq!(params.get("end"), Some(format!("{t}s").as_str()));
    }
}

#[test]
fn record_without_radios_gets_a_bare_url() {
    let ap = record(json!({"@id": 9, "lan_mac": "aa:bb:cc:00:11:22"}));
    let b = builder();
    let g = b.for_record(&ap);

    let url = g.bandwidth_802dot11an(Some(-3600), Some(-60)).unwrap();
    assert_eq!(
        url.as_str(),
        "https://x.x.x.x/nf/rrd_graph?id=9&type=ap_bandwidth"
    );

    let url = g.radio_goodput_802dot11bgn(None, None).unwrap();
    assert_eq!(
        query(&url),
        "ap_uid=aa%3Abb%3Acc%3A00%3A11%3A22&type=radio_goodput"
    );
}

#[test]
fn unmatched_technology_gets_a_bare_url() {
    let ap = record(json!({
        "@id": 3,
        "radio": [{"radio_type": "bgn", "@index": 1}]
    }));
    let url = builder()
        .for_record(&ap)
        .dot11_counters_802dot11an(Some(-3600), None)
        .unwrap();
    for key in ["radio_index", "start", "end"] {
        assert!(!url.query_pairs().any(|(k, _)| k == key), "unexpected {key}");
    }
}

#[test]
fn technology_tokens_match_case_sensitively() {
    let ap = record(json!({
        "@id": 3,
        "radio": [{"radio_type": "an", "@index": 2}, {"radio_type": "BGN", "@index": 1}]
    }));
    let b = builder();
    let g = b.for_record(&ap);

    let an = g.client_count_802dot11an(None, None).unwrap();
    let bgn = g.client_count_802dot11bgn(None, None).unwrap();
    assert_eq!(query(&an), "id=3&type=ap_client_count");
    assert_eq!(query(&bgn), "id=3&type=ap_client_count");
}

// ── Errors ──────────────────────────────────────────────────────────

#[test]
fn missing_id_propagates() {
    let ap = record(json!({"lan_mac": "00:00:10:00:00:03"}));
    let err = builder()
        .for_record(&ap)
        .client_count_802dot11bgn(None, None)
        .unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { ref key } if key == "@id"));
}

#[test]
fn missing_lan_mac_propagates() {
    let ap = record(json!({"@id": 1}));
    let err = builder()
        .for_record(&ap)
        .radio_errors_802dot11an(None, None)
        .unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { ref key } if key == "lan_mac"));
}

#[test]
fn structured_key_value_is_rejected() {
    let ap = record(json!({"@id": {"nested": true}}));
    let err = builder()
        .for_record(&ap)
        .bandwidth_802dot11bgn(None, None)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[test]
fn builder_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphUrlBuilder>();
    assert_send_sync::<GraphRecord>();
}
