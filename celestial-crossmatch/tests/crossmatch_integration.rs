use approx::assert_abs_diff_eq;
use celestial_crossmatch::catalog::load_candidates;
use celestial_crossmatch::{
    cone_search, match_candidates, CandidateMatcher, ConeSearchParams, CrossmatchError,
    GalaxyRecord, MatchConfig, SkyPoint,
};
use serde_json::{json, Value};
use std::io::Write;
use tempfile::NamedTempFile;

const TRANSIENT: SkyPoint = SkyPoint::new(106.996905, 31.665367);

fn cgcg_146_027_json() -> Value {
    json!([
        {"id": "CGCG 146-027 NED01", "ra": 106.99741666666999, "dec": 31.663861111110002,
         "a": null, "b2a": null, "pa": -999, "type": "G"},
        {"id": "CGCG 146-027", "ra": 107.00121833, "dec": 31.6644722,
         "a": null, "b2a": -999, "pa": -999, "type": "GPair"},
        {"id": "CGCG 146-027 NED02", "ra": 107.00420833333, "dec": 31.66327777778,
         "a": 0.0245556, "b2a": 0.5, "pa": 80, "type": "G"}
    ])
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// --- End-to-end scenario ---

#[test]
fn deblended_components_all_match() {
    let file = write_temp(&cgcg_146_027_json().to_string());
    let candidates = load_candidates(file.path()).unwrap();

    let matches = match_candidates(&TRANSIENT, &candidates, 3.0);

    let distances: Vec<f64> = matches.iter().map(|m| m.distance_arcsec).collect();
    assert_eq!(distances, [5.64, 13.6, 23.61]);
    assert_eq!(matches[1].galaxy.extra["type"], json!("GPair"));
}

#[test]
fn json_output_is_flat() {
    let matcher = CandidateMatcher::default();
    let matches = matcher.match_json(&TRANSIENT, &cgcg_146_027_json()).unwrap();
    let out = serde_json::to_value(&matches).unwrap();

    assert_eq!(out[0]["id"], json!("CGCG 146-027 NED01"));
    assert_eq!(out[0]["a"], Value::Null);
    assert_eq!(out[0]["distance_arcsec"], json!(5.64));
    assert_eq!(out[2]["pa"], json!(80.0));
}

#[test]
fn config_file_drives_matcher() {
    let file = write_temp(r#"{"size_margin": 0.15, "parallel": true}"#);
    let config = MatchConfig::from_json_file(file.path()).unwrap();
    let matcher = CandidateMatcher::new(config).unwrap();

    let matches = matcher.match_json(&TRANSIENT, &cgcg_146_027_json()).unwrap();
    // At 0.15x the catalogued size only the nearest component still holds the transient.
    let ids: Vec<&str> = matches.iter().map(|m| m.galaxy.id.as_str()).collect();
    assert_eq!(ids, ["CGCG 146-027 NED01"]);
}

// --- Failure semantics ---

#[test]
fn malformed_record_fails_whole_call() {
    let mut raw = cgcg_146_027_json();
    raw.as_array_mut().unwrap()[2]
        .as_object_mut()
        .unwrap()
        .remove("ra");

    let err = CandidateMatcher::default()
        .match_json(&TRANSIENT, &raw)
        .unwrap_err();
    match err {
        CrossmatchError::InvalidRecord { index, field, .. } => {
            assert_eq!(index, 2);
            assert_eq!(field, "ra");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparseable_file_is_reported() {
    let file = write_temp("not json");
    assert!(matches!(
        load_candidates(file.path()),
        Err(CrossmatchError::Json(_))
    ));
}

// --- Pipeline composition ---

#[test]
fn cone_then_match() {
    let mut candidates: Vec<GalaxyRecord> = celestial_crossmatch::catalog::parse_candidates(
        &cgcg_146_027_json(),
    )
    .unwrap();
    candidates.push(GalaxyRecord::from_raw("unrelated", 120.0, -5.0, 0.5, 0.9, 10.0));

    let params = ConeSearchParams {
        ra_deg: TRANSIENT.ra_deg,
        dec_deg: TRANSIENT.dec_deg,
        radius_deg: 0.1,
        max_results: None,
    };
    let within = cone_search(&candidates, &params);
    assert_eq!(within.len(), 3);
    assert_abs_diff_eq!(within[0].distance_deg * 3600.0, 5.6433, epsilon = 1e-3);

    let narrowed: Vec<GalaxyRecord> = within.iter().map(|r| r.galaxy.clone()).collect();
    let matches = match_candidates(&TRANSIENT, &narrowed, 3.0);
    assert_eq!(matches.len(), 3);
}

#[test]
fn transient_outside_every_halo() {
    let far = SkyPoint::new(107.2, 31.665367);
    let matcher = CandidateMatcher::default();
    let matches = matcher.match_json(&far, &cgcg_146_027_json()).unwrap();
    assert!(matches.is_empty());
}
